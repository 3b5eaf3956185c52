use std::fmt;

use serde::Deserialize;

/// Chat the notifications go to.
///
/// Opaque on purpose: the messenger adapter decides whether it is a numeric id
/// or a channel username.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub String);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower bound (Unix seconds) of the next poll window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(pub i64);

impl Cursor {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review statuses the bot knows how to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_api_str() == raw)
    }

    pub fn as_api_str(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// One submission as returned by the review API.
///
/// `status` is kept raw so unknown values reach the translator and surface as
/// errors instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: String,
    #[serde(default)]
    pub lesson_name: Option<String>,
    #[serde(default)]
    pub reviewer_comment: Option<String>,
    #[serde(default)]
    pub date_updated: Option<String>,
}

/// A validated API response envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Most recent first, as the API orders them.
    pub homeworks: Vec<HomeworkRecord>,
    pub current_date: Cursor,
}

impl StatusUpdate {
    pub fn latest(&self) -> Option<&HomeworkRecord> {
        self.homeworks.first()
    }
}
