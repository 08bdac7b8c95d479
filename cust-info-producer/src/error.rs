use thiserror::Error;

/// Failures while synthesizing a record or its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The random source could not produce a draw.
    #[error("random source unavailable: {0}")]
    Entropy(String),

    /// A choice was requested from an empty collection.
    #[error("cannot choose from an empty collection")]
    EmptyChoice,

    /// A generated date fell outside the representable calendar.
    #[error("date of birth out of range: {days_back} days before {today}")]
    DateOutOfRange { today: String, days_back: u64 },
}

/// Invalid configuration read at cold start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
