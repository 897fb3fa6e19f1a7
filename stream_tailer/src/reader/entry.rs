use bytes::Bytes;
use chrono::{DateTime, Utc};
use getset::Getters;
use redis::streams::StreamId;
use redis::Value;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use tracing::trace;

/// Stream entry id in the `<milliseconds>-<sequence>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let milliseconds = self.0.split('-').next()?.parse::<i64>().ok()?;

        DateTime::from_timestamp_millis(milliseconds)
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct StreamEntry {
    id: EntryId,
    fields: HashMap<String, Bytes>,
}

impl StreamEntry {
    pub fn new(id: EntryId, fields: HashMap<String, Bytes>) -> Self {
        Self { id, fields }
    }

    pub fn field(&self, name: &str) -> Option<&Bytes> {
        self.fields.get(name)
    }
}

impl From<StreamId> for StreamEntry {
    fn from(value: StreamId) -> Self {
        let id = EntryId::new(value.id);

        let fields = value
            .map
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::BulkString(bytes) => Some((name, Bytes::from(bytes))),
                Value::SimpleString(s) => Some((name, Bytes::from(s))),
                other => {
                    trace!("Skipping non byte field '{}' of entry {}: {:?}", name, id, other);
                    None
                }
            })
            .collect();

        Self { id, fields }
    }
}
