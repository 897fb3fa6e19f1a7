use crate::error::TailError;
use crate::reader::StreamEntry;
use redis::streams::StreamReadReply;

/// Takes the entries of `key` out of an XREAD reply. Any reply that is not
/// exactly the requested stream is a protocol violation.
pub fn single_stream_entries(
    reply: StreamReadReply,
    key: &str,
) -> Result<Vec<StreamEntry>, TailError> {
    let mut keys = reply.keys;

    let is_requested_stream = keys.len() == 1 && keys[0].key == key;
    if !is_requested_stream {
        return Err(TailError::StreamShape {
            requested: key.to_owned(),
            returned: keys.into_iter().map(|k| k.key).collect(),
        });
    }

    let stream = keys.remove(0);
    let entries = stream.ids.into_iter().map(StreamEntry::from).collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::streams::{StreamId, StreamKey};
    use redis::Value;
    use std::collections::HashMap;

    fn stream_key(key: &str, ids: &[&str]) -> StreamKey {
        StreamKey {
            key: key.to_owned(),
            ids: ids
                .iter()
                .map(|id| StreamId {
                    id: (*id).to_owned(),
                    map: HashMap::from([("up".to_owned(), Value::BulkString(vec![]))]),
                })
                .collect(),
        }
    }

    #[test]
    fn returns_entries_in_reply_order() -> Result<(), TailError> {
        let reply = StreamReadReply {
            keys: vec![stream_key("gw:stream:frame", &["1-0", "1-1", "2-0"])],
        };

        let entries = single_stream_entries(reply, "gw:stream:frame")?;

        let ids = entries.iter().map(|e| e.id().as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["1-0", "1-1", "2-0"]);

        Ok(())
    }

    #[test]
    fn several_streams_are_rejected() {
        let reply = StreamReadReply {
            keys: vec![
                stream_key("gw:stream:frame", &["1-0"]),
                stream_key("other", &["1-0"]),
            ],
        };

        let result = single_stream_entries(reply, "gw:stream:frame");

        match result {
            Err(TailError::StreamShape { requested, returned }) => {
                assert_eq!(requested, "gw:stream:frame");
                assert_eq!(returned, vec!["gw:stream:frame", "other"]);
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[test]
    fn empty_reply_is_rejected() {
        let reply = StreamReadReply { keys: vec![] };

        let result = single_stream_entries(reply, "api:stream:request");

        assert!(matches!(result, Err(TailError::StreamShape { .. })));
    }

    #[test]
    fn foreign_stream_is_rejected() {
        let reply = StreamReadReply {
            keys: vec![stream_key("other", &["1-0"])],
        };

        let result = single_stream_entries(reply, "api:stream:request");

        assert!(matches!(result, Err(TailError::StreamShape { .. })));
    }
}
