use async_trait::async_trait;

use crate::{domain::Cursor, Result};

/// Hexagonal port for the homework review API.
///
/// Implementations issue one request per call and return the decoded JSON body
/// untouched; shape checks belong to [`crate::validator`].
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn fetch(&self, from_date: Cursor) -> Result<serde_json::Value>;
}
