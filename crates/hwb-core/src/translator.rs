use crate::{
    domain::{HomeworkRecord, HomeworkStatus},
    errors::Error,
    Result,
};

/// Render the notification for a homework whose review status changed.
pub fn translate(record: &HomeworkRecord) -> Result<String> {
    let status = HomeworkStatus::parse(&record.status)
        .ok_or_else(|| Error::UnknownStatus(record.status.clone()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.homework_name,
        status.verdict()
    ))
}

/// Text sent to the chat when a polling cycle fails.
pub fn malfunction_message(err: &Error) -> String {
    format!("Сбой в работе программы: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, status: &str) -> HomeworkRecord {
        HomeworkRecord {
            homework_name: name.to_string(),
            status: status.to_string(),
            lesson_name: None,
            reviewer_comment: None,
            date_updated: None,
        }
    }

    #[test]
    fn approved_message_matches_exactly() {
        assert_eq!(
            translate(&rec("hw1", "approved")).unwrap(),
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn every_known_status_maps_to_its_verdict() {
        for status in HomeworkStatus::ALL {
            let text = translate(&rec("project", status.as_api_str())).unwrap();
            assert!(text.contains("\"project\""));
            assert!(text.ends_with(status.verdict()));
        }
    }

    #[test]
    fn unknown_status_is_an_error() {
        match translate(&rec("hw2", "pending")) {
            Err(Error::UnknownStatus(s)) => assert_eq!(s, "pending"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malfunction_message_embeds_the_error() {
        let text = malfunction_message(&Error::UnknownStatus("pending".to_string()));
        assert_eq!(
            text,
            "Сбой в работе программы: unknown homework status: pending"
        );
    }
}
