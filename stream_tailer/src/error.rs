use crate::reader::EntryId;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum TailError {
    Transport(anyhow::Error),
    StreamShape {
        requested: String,
        returned: Vec<String>,
    },
    Decode {
        entry_id: EntryId,
        field: &'static str,
        error: anyhow::Error,
    },
    Render(anyhow::Error),
    Output(std::io::Error),
}

impl TailError {
    pub fn is_transport(&self) -> bool {
        matches!(self, TailError::Transport(_))
    }
}

impl Display for TailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TailError::Transport(e) => write!(f, "Stream transport error: {e}"),
            TailError::StreamShape {
                requested,
                returned,
            } => write!(
                f,
                "Exactly one stream response is expected for '{}', got {} streams: {:?}",
                requested,
                returned.len(),
                returned
            ),
            TailError::Decode {
                entry_id,
                field,
                error,
            } => write!(
                f,
                "Error while decoding field '{field}' of entry {entry_id}: {error}"
            ),
            TailError::Render(e) => write!(f, "Error while rendering record: {e}"),
            TailError::Output(e) => write!(f, "Error while writing output: {e}"),
        }
    }
}

impl std::error::Error for TailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TailError::Transport(e) | TailError::Render(e) => Some(&**e),
            TailError::Decode { error, .. } => Some(&**error),
            TailError::Output(e) => Some(e),
            TailError::StreamShape { .. } => None,
        }
    }
}
