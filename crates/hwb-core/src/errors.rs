/// Core error type for the bot.
///
/// Adapter crates map their library errors into these variants so the poller
/// can treat every failure of a cycle the same way (log, notify, retry).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("endpoint {endpoint} answered with status {status}")]
    Access { status: u16, endpoint: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("response does not meet expectations: {0}")]
    Shape(String),

    #[error("`{field}` has unexpected type, expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("delivery error: {0}")]
    Delivery(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the upstream API returned something its contract does not allow
    /// for (a status we have no verdict for).
    pub fn is_contract_change(&self) -> bool {
        matches!(self, Error::UnknownStatus(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
