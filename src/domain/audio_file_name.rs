use std::fmt;

use chrono::Utc;
use uuid::Uuid;

pub const WAV_EXTENSION: &str = "wav";

/// Name of a file kept in the audio store.
///
/// Always a single path segment, so it can be joined onto the store root
/// without escaping it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFileName(String);

impl AudioFileName {
    /// Builds `<prefix>_<unix seconds>_<suffix>.wav`.
    pub fn generate(prefix: &str) -> Self {
        let seconds = Utc::now().timestamp();
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}_{}_{}.{}",
            prefix,
            seconds,
            &suffix[..8],
            WAV_EXTENSION
        ))
    }

    pub fn for_upload() -> Self {
        Self::generate("input")
    }

    pub fn for_response() -> Self {
        Self::generate("response")
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidAudioFileName> {
        let invalid = raw.is_empty()
            || raw == "."
            || raw.contains("..")
            || raw.contains('/')
            || raw.contains('\\')
            || raw.chars().any(char::is_control);

        if invalid {
            return Err(InvalidAudioFileName(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid audio file name: {0:?}")]
pub struct InvalidAudioFileName(pub String);
