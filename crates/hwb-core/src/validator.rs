//! Shape checks for the review API envelope.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{Cursor, HomeworkRecord, StatusUpdate},
    errors::Error,
    Result,
};

/// Validate a decoded envelope and extract its homework list and cursor.
///
/// An empty `homeworks` list is a valid result ("nothing changed").
pub fn validate(envelope: &Value) -> Result<StatusUpdate> {
    let obj = envelope.as_object().ok_or(Error::TypeMismatch {
        field: "response",
        expected: "object",
    })?;

    let homeworks = obj
        .get("homeworks")
        .ok_or_else(|| Error::Shape("missing key `homeworks`".to_string()))?;
    let current_date = obj
        .get("current_date")
        .ok_or_else(|| Error::Shape("missing key `current_date`".to_string()))?;

    let list = homeworks.as_array().ok_or(Error::TypeMismatch {
        field: "homeworks",
        expected: "list",
    })?;
    let current_date = current_date.as_i64().ok_or(Error::TypeMismatch {
        field: "current_date",
        expected: "integer",
    })?;

    let homeworks = list
        .iter()
        .enumerate()
        .map(|(idx, raw)| record(idx, raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(StatusUpdate {
        homeworks,
        current_date: Cursor(current_date),
    })
}

fn record(idx: usize, raw: &Value) -> Result<HomeworkRecord> {
    HomeworkRecord::deserialize(raw)
        .map_err(|e| Error::Shape(format!("homework #{idx} is malformed: {e}")))
}
