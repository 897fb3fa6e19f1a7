use crate::error::TailError;
use crate::format::Format;
use crate::payload::DecodedRecord;
use proto_text_converter::{proto_message_to_json_string, proto_message_to_text_string};
use std::io::Write;

pub fn render_record_to_string(record: &DecodedRecord, format: Format) -> Result<String, TailError> {
    let message = &**record.message();

    let body = match format {
        Format::Text => proto_message_to_text_string(message),
        Format::Json => proto_message_to_json_string(message).map_err(TailError::Render)?,
    };

    Ok(body.trim_end().to_owned())
}

/// Writes the record between its begin and end marker lines.
pub fn render_record<W: Write>(
    out: &mut W,
    record: &DecodedRecord,
    format: Format,
) -> Result<(), TailError> {
    let kind = record.kind();
    let body = render_record_to_string(record, format)?;

    writeln!(out, "{}", kind.begin_marker()).map_err(TailError::Output)?;
    if !body.is_empty() {
        writeln!(out, "{}", body).map_err(TailError::Output)?;
    }
    writeln!(out, "{}", kind.end_marker()).map_err(TailError::Output)?;

    Ok(())
}
