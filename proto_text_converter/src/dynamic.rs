use anyhow::Context;
use protobuf::reflect::MessageDescriptor;
use protobuf::MessageDyn;
use protobuf_json_mapping::{parse_dyn_from_str, PrintOptions};

pub fn proto_bytes_to_message(
    bytes: &[u8],
    message: &MessageDescriptor,
) -> Result<Box<dyn MessageDyn>, anyhow::Error> {
    let deserialized_message = message.parse_from_bytes(bytes).with_context(|| {
        format!(
            "While parsing dynamic proto message {} bytes",
            message.full_name()
        )
    })?;

    Ok(deserialized_message)
}

/// Protobuf text format, one field per line, nested messages indented.
pub fn proto_message_to_text_string(message: &dyn MessageDyn) -> String {
    protobuf::text_format::print_to_string_pretty(message)
}

/// Canonical protobuf JSON, camelCase names, unpopulated fields omitted,
/// indented two spaces with fields in declaration order.
pub fn proto_message_to_json_string(message: &dyn MessageDyn) -> Result<String, anyhow::Error> {
    let print_options = PrintOptions {
        proto_field_name: false,
        enum_values_int: false,
        always_output_default_values: false,
        _future_options: (),
    };
    let json = protobuf_json_mapping::print_to_string_with_options(message, &print_options)
        .context("While converting from dynamic descriptor to json")?;

    let value: serde_json::Value =
        serde_json::from_str(&json).context("While reading printed json")?;
    let pretty = serde_json::to_string_pretty(&value).context("While indenting json")?;

    Ok(pretty)
}

pub fn json_string_to_proto_bytes(
    json: &str,
    message: &MessageDescriptor,
) -> Result<Vec<u8>, anyhow::Error> {
    let parsed = parse_dyn_from_str(message, json).context("While parsing json")?;

    let bytes = parsed
        .write_to_bytes_dyn()
        .context("While getting parsed proto bytes from parsed json")?;

    Ok(bytes)
}
