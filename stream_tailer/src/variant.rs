use crate::payload::PayloadKind;

/// The two stream tailers, each with its own stream and payload fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TailerVariant {
    FrameLog,
    RequestLog,
}

impl TailerVariant {
    pub const fn name(&self) -> &'static str {
        match self {
            TailerVariant::FrameLog => "frame_log",
            TailerVariant::RequestLog => "request_log",
        }
    }

    pub const fn default_key(&self) -> &'static str {
        match self {
            TailerVariant::FrameLog => "gw:stream:frame",
            TailerVariant::RequestLog => "api:stream:request",
        }
    }

    /// Fields are checked in this order on every entry.
    pub const fn payload_kinds(&self) -> &'static [PayloadKind] {
        match self {
            TailerVariant::FrameLog => &[PayloadKind::Up, PayloadKind::Down],
            TailerVariant::RequestLog => &[PayloadKind::Request],
        }
    }
}
