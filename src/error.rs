use std::fmt;

/// Errors surfaced at the crate's configuration boundaries.
///
/// Nothing on the per-sample audio path returns these — that path always
/// produces a playable sample. They appear where profiles are loaded and
/// where render requests are validated.
#[derive(Debug)]
pub enum CoreError {
    /// A waveform name no table exists for.
    UnknownWaveform { name: String },
    /// A render or profile parameter outside its valid domain.
    InvalidParameter { what: String },
    /// Profile JSON that failed to deserialize.
    ProfileParse(serde_json::Error),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::UnknownWaveform { name } => {
                write!(f, "Unknown waveform '{name}'")
            }
            CoreError::InvalidParameter { what } => {
                write!(f, "Invalid parameter: {what}")
            }
            CoreError::ProfileParse(e) => write!(f, "Profile parse error: {e}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::ProfileParse(e)
    }
}
