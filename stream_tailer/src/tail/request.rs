use crate::format::Format;
use crate::reader::StartFrom;
use crate::tail::FailurePolicy;

pub const DEFAULT_BATCH_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct TailRequest {
    pub key: String,
    pub start_from: StartFrom,
    pub count: usize,
    pub format: Format,
    pub failure_policy: FailurePolicy,
}

impl TailRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            start_from: StartFrom::Beginning,
            count: DEFAULT_BATCH_SIZE,
            format: Format::Text,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}
