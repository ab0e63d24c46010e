/// Result alias that carries the custom [`ParamsError`] type.
pub type Result<T> = std::result::Result<T, ParamsError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// The key is empty or contains one of the reserved wire delimiters.
    #[error("invalid parameter key `{0}`")]
    InvalidKey(String),
    /// The value contains one of the reserved wire delimiters (`=` or `;`).
    #[error("invalid value `{value}` for parameter `{key}`")]
    InvalidValue { key: String, value: String },
    /// A hardware profile or application config could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Free-form message used by the command line front-end.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ParamsError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid_value(key: &str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

impl From<&str> for ParamsError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for ParamsError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}
