use crate::payload::PayloadKind;
use getset::{CopyGetters, Getters};
use protobuf::MessageDyn;

#[derive(Debug, Getters, CopyGetters)]
pub struct DecodedRecord {
    #[getset(get_copy = "pub")]
    kind: PayloadKind,
    #[getset(get = "pub")]
    message: Box<dyn MessageDyn>,
}

impl DecodedRecord {
    pub fn new(kind: PayloadKind, message: Box<dyn MessageDyn>) -> Self {
        Self { kind, message }
    }
}
