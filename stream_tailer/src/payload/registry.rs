use crate::error::TailError;
use crate::payload::{DecodedRecord, PayloadKind};
use crate::reader::StreamEntry;
use anyhow::{bail, Context};
use getset::{CopyGetters, Getters};
use proto_text_converter::{proto_bytes_to_message, ProtoDescriptorPreparer, ProtoSource};
use protobuf::reflect::MessageDescriptor;
use tracing::{debug, trace};

pub const STREAM_PROTO_FILE_NAME: &str = "stream.proto";
pub const STREAM_PROTO: &str = include_str!("../protos/stream.proto");

#[derive(Getters, CopyGetters)]
pub struct PayloadDecoder {
    #[getset(get_copy = "pub")]
    kind: PayloadKind,
    #[getset(get = "pub")]
    descriptor: MessageDescriptor,
}

/// Decoders in the order fields are checked on every entry.
pub struct PayloadRegistry {
    decoders: Vec<PayloadDecoder>,
}

impl PayloadRegistry {
    pub async fn prepare(kinds: &[PayloadKind]) -> Result<Self, anyhow::Error> {
        let source = ProtoSource::new(STREAM_PROTO_FILE_NAME, STREAM_PROTO);
        let mut preparer = ProtoDescriptorPreparer::new(source);
        preparer
            .prepare()
            .await
            .context("While initializing ProtoDescriptorPreparer")?;

        Self::from_preparer(&preparer, kinds)
    }

    pub fn from_preparer(
        preparer: &ProtoDescriptorPreparer,
        kinds: &[PayloadKind],
    ) -> Result<Self, anyhow::Error> {
        let mut decoders: Vec<PayloadDecoder> = Vec::with_capacity(kinds.len());

        for &kind in kinds {
            if decoders.iter().any(|d| d.kind == kind) {
                bail!("Payload kind '{}' registered twice", kind)
            }

            let descriptor = preparer
                .message_descriptor(kind.message_type_name())
                .with_context(|| format!("While registering decoder for '{}'", kind))?;

            debug!(
                "Field '{}' is decoded as {}",
                kind.field_name(),
                descriptor.full_name()
            );

            decoders.push(PayloadDecoder { kind, descriptor });
        }

        Ok(Self { decoders })
    }

    pub fn kinds(&self) -> impl Iterator<Item = PayloadKind> + '_ {
        self.decoders.iter().map(|d| d.kind)
    }

    pub fn decoder(&self, field_name: &str) -> Option<&PayloadDecoder> {
        self.decoders
            .iter()
            .find(|d| d.kind.field_name() == field_name)
    }

    /// Decodes every known field present in the entry. Either all of them
    /// decode or the entry yields an error and nothing.
    pub fn decode_entry(&self, entry: &StreamEntry) -> Result<Vec<DecodedRecord>, TailError> {
        let mut records = vec![];

        for decoder in &self.decoders {
            let field = decoder.kind.field_name();
            let Some(bytes) = entry.field(field) else {
                continue;
            };

            trace!("Decoding field '{}' of entry {}", field, entry.id());

            let message = proto_bytes_to_message(bytes, &decoder.descriptor).map_err(|error| {
                TailError::Decode {
                    entry_id: entry.id().clone(),
                    field,
                    error,
                }
            })?;

            records.push(DecodedRecord::new(decoder.kind, message));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::EntryId;
    use bytes::Bytes;
    use proto_text_converter::json_string_to_proto_bytes;
    use std::collections::HashMap;

    fn encode(registry: &PayloadRegistry, field: &str, json: &str) -> Bytes {
        let decoder = registry.decoder(field).expect("Decoder is registered");
        let bytes = json_string_to_proto_bytes(json, decoder.descriptor()).expect("Valid json");
        Bytes::from(bytes)
    }

    fn entry(id: &str, fields: Vec<(&str, Bytes)>) -> StreamEntry {
        let fields = fields
            .into_iter()
            .map(|(name, bytes)| (name.to_owned(), bytes))
            .collect::<HashMap<_, _>>();
        StreamEntry::new(EntryId::new(id), fields)
    }

    #[tokio::test]
    async fn all_kinds_are_in_the_schema() -> Result<(), anyhow::Error> {
        let registry =
            PayloadRegistry::prepare(&[PayloadKind::Up, PayloadKind::Down, PayloadKind::Request])
                .await?;

        let kinds = registry.kinds().collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![PayloadKind::Up, PayloadKind::Down, PayloadKind::Request]
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_kind_is_rejected() {
        let result = PayloadRegistry::prepare(&[PayloadKind::Up, PayloadKind::Up]).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn decodes_known_fields_in_registration_order() -> Result<(), anyhow::Error> {
        let registry = PayloadRegistry::prepare(&[PayloadKind::Up, PayloadKind::Down]).await?;
        let up = encode(&registry, "up", r#"{"devEui": "0102030405060708", "mType": "UNCONFIRMED_DATA_UP"}"#);
        let down = encode(&registry, "down", r#"{"gatewayId": "0016c001ff10a235", "downlinkId": 7}"#);

        let entry = entry(
            "1-0",
            vec![("down", down), ("up", up), ("request", Bytes::from_static(b"\x0a\x03GET"))],
        );

        let records = registry.decode_entry(&entry)?;

        let kinds = records.iter().map(|r| r.kind()).collect::<Vec<_>>();
        assert_eq!(kinds, vec![PayloadKind::Up, PayloadKind::Down]);
        assert_eq!(
            records[0].message().descriptor_dyn().full_name(),
            "stream.UplinkFrameLog"
        );

        Ok(())
    }

    #[tokio::test]
    async fn entry_without_known_fields_decodes_to_nothing() -> Result<(), anyhow::Error> {
        let registry = PayloadRegistry::prepare(&[PayloadKind::Request]).await?;

        let entry = entry("1-0", vec![("up", Bytes::from_static(b"\x0a\x00"))]);

        assert!(registry.decode_entry(&entry)?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_payload_is_a_decode_error() -> Result<(), anyhow::Error> {
        let registry = PayloadRegistry::prepare(&[PayloadKind::Up, PayloadKind::Down]).await?;
        let up = encode(&registry, "up", r#"{"devAddr": "01020304"}"#);

        let entry = entry(
            "3-0",
            vec![("up", up), ("down", Bytes::from_static(&[0x12, 0x0a, 0x01]))],
        );

        match registry.decode_entry(&entry) {
            Err(TailError::Decode {
                entry_id, field, ..
            }) => {
                assert_eq!(entry_id, EntryId::new("3-0"));
                assert_eq!(field, "down");
            }
            other => panic!("Unexpected result {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn uplink_time_decodes_as_timestamp() -> Result<(), anyhow::Error> {
        let registry = PayloadRegistry::prepare(&[PayloadKind::Up]).await?;

        // dev_eui (6) = "ab", time (7) = Timestamp { seconds: 1 }
        let up = Bytes::from_static(&[0x32, 0x02, b'a', b'b', 0x3a, 0x02, 0x08, 0x01]);
        let records = registry.decode_entry(&entry("4-0", vec![("up", up)]))?;

        let text = proto_text_converter::proto_message_to_text_string(&**records[0].message());
        assert!(text.contains("dev_eui: \"ab\""), "{text}");
        assert!(text.contains("time {"), "{text}");
        assert!(text.contains("seconds: 1"), "{text}");

        Ok(())
    }
}
