use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty alias list, blank keyword, etc.).
    ConfigValidation(String),
    /// The order number column could not be resolved for a ledger.
    MissingIdentifierColumn { ledger: String },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingIdentifierColumn { ledger } => write!(
                f,
                "{ledger}: cannot identify the order number column, check the header names"
            ),
        }
    }
}

impl std::error::Error for ReconError {}
