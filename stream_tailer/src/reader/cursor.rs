use crate::reader::{EntryId, StartFrom};
use std::fmt::{Display, Formatter};

const BEGINNING: &str = "0";
const LATEST: &str = "$";

/// Id of the last processed entry, reads return only entries after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    last_seen: String,
}

impl Cursor {
    pub fn beginning() -> Self {
        Self {
            last_seen: BEGINNING.to_owned(),
        }
    }

    pub fn latest() -> Self {
        Self {
            last_seen: LATEST.to_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.last_seen
    }

    pub fn advance(&mut self, id: &EntryId) {
        self.last_seen.clear();
        self.last_seen.push_str(id.as_str());
    }
}

impl From<&StartFrom> for Cursor {
    fn from(value: &StartFrom) -> Self {
        match value {
            StartFrom::Beginning => Cursor::beginning(),
            StartFrom::Latest => Cursor::latest(),
            StartFrom::Id(id) => Cursor {
                last_seen: id.clone(),
            },
        }
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.last_seen)
    }
}
