use std::fmt::{Display, Formatter};

/// Payload kinds known to the tailer, keyed by the stream field they are stored under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Up,
    Down,
    Request,
}

impl PayloadKind {
    pub const fn field_name(&self) -> &'static str {
        match self {
            PayloadKind::Up => "up",
            PayloadKind::Down => "down",
            PayloadKind::Request => "request",
        }
    }

    pub const fn message_type_name(&self) -> &'static str {
        match self {
            PayloadKind::Up => "UplinkFrameLog",
            PayloadKind::Down => "DownlinkFrameLog",
            PayloadKind::Request => "ApiRequestLog",
        }
    }

    pub const fn begin_marker(&self) -> &'static str {
        match self {
            PayloadKind::Up => "=== UP ===",
            PayloadKind::Down => "=== DOWN ===",
            PayloadKind::Request => "=== Request ===",
        }
    }

    pub fn end_marker(&self) -> String {
        "=".repeat(self.begin_marker().len())
    }
}

impl Display for PayloadKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_marker_matches_begin_marker_width() {
        assert_eq!(PayloadKind::Up.end_marker(), "==========");
        assert_eq!(PayloadKind::Down.end_marker(), "============");
        assert_eq!(PayloadKind::Request.end_marker(), "===============");
    }
}
