use anyhow::{bail, Context};
use protobuf::descriptor::FileDescriptorProto;
use protobuf::reflect::{FileDescriptor, MessageDescriptor};
use std::path::Path;
use tracing::{debug, error, trace};

/// `.proto` file content that is compiled at runtime into a dynamic descriptor.
#[derive(Debug, Clone)]
pub struct ProtoSource {
    pub file_name: String,
    pub content: String,
}

impl ProtoSource {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

pub struct ProtoDescriptorPreparer {
    source: ProtoSource,
    file_descriptor: Option<FileDescriptor>,
}

impl ProtoDescriptorPreparer {
    pub fn new(source: ProtoSource) -> Self {
        Self {
            source,
            file_descriptor: None,
        }
    }

    pub fn file_descriptor(&self) -> Option<&FileDescriptor> {
        self.file_descriptor.as_ref()
    }

    pub fn message_descriptor(&self, message_type_name: &str) -> Result<MessageDescriptor, anyhow::Error> {
        let Some(file_descriptor) = self.file_descriptor() else {
            bail!("ProtoDescriptorPreparer wasn't initialized")
        };

        let Some(message) = file_descriptor.message_by_package_relative_name(message_type_name)
        else {
            bail!("Proto message with name {} wasn't found", message_type_name)
        };

        Ok(message)
    }

    pub async fn prepare(&mut self) -> Result<(), anyhow::Error> {
        if self.file_descriptor.is_some() {
            return Ok(());
        }

        // The pure parser only reads from disk, the directory is removed on drop
        let dir = tempfile::tempdir().context("While creating directory for proto files")?;
        let file_path = dir.path().join(&self.source.file_name);

        tokio::fs::write(&file_path, self.source.content.as_bytes())
            .await
            .context("While filling temp file with proto")?;

        let file_descriptor_protos = protobuf_parse::Parser::new()
            .pure()
            .include(dir.path())
            .input(&file_path)
            .parse_and_typecheck()
            .inspect_err(|e| error!("Proto parsing error {:?}", e))
            .context("While building file descriptors")?
            .file_descriptors;

        trace!("Descriptors: {:#?} ", file_descriptor_protos);

        let file_descriptor = build_dynamic_descriptor(
            file_descriptor_protos,
            Path::new(&self.source.file_name),
        )?;

        debug!(
            "Prepared proto file {}, {} messages",
            self.source.file_name,
            file_descriptor.messages().count()
        );

        self.file_descriptor = Some(file_descriptor);

        Ok(())
    }
}

fn well_known_descriptors() -> Vec<FileDescriptor> {
    use protobuf::well_known_types as wkt;

    vec![
        wkt::timestamp::file_descriptor().clone(),
        wkt::duration::file_descriptor().clone(),
        wkt::wrappers::file_descriptor().clone(),
        wkt::empty::file_descriptor().clone(),
        wkt::any::file_descriptor().clone(),
        wkt::struct_::file_descriptor().clone(),
        wkt::field_mask::file_descriptor().clone(),
    ]
}

/// Builds descriptors in import order. Imports of `google/protobuf/*.proto`
/// resolve to the generated well-known types so their messages print natively.
fn build_dynamic_descriptor(
    file_descriptor_protos: Vec<FileDescriptorProto>,
    target_file: &Path,
) -> Result<FileDescriptor, anyhow::Error> {
    let mut built = well_known_descriptors();
    let mut target = None;
    let mut pending = file_descriptor_protos;

    while !pending.is_empty() {
        let (ready, waiting): (Vec<_>, Vec<_>) = pending.into_iter().partition(|proto| {
            proto
                .dependency
                .iter()
                .all(|import| built.iter().any(|file| file.name() == import))
        });

        if ready.is_empty() {
            let unresolved = waiting
                .iter()
                .map(|proto| proto.name().to_owned())
                .collect::<Vec<_>>();
            bail!("Unresolved proto imports in {}", unresolved.join(", "))
        }

        for proto in ready {
            let is_target = Path::new(proto.name()) == target_file;

            if let Some(existing) = built.iter().find(|file| file.name() == proto.name()) {
                if is_target {
                    target = Some(existing.clone());
                }
                continue;
            }

            let dependencies = proto
                .dependency
                .iter()
                .filter_map(|import| built.iter().find(|file| file.name() == import).cloned())
                .collect::<Vec<_>>();

            let name = proto.name().to_owned();
            let file_descriptor = FileDescriptor::new_dynamic(proto, &dependencies)
                .with_context(|| format!("While building file descriptor for {name}"))?;

            if is_target {
                target = Some(file_descriptor.clone());
            }
            built.push(file_descriptor);
        }

        pending = waiting;
    }

    let Some(target) = target else {
        bail!("Internal error, generated file not found")
    };

    Ok(target)
}
