use crate::error::TailError;
use crate::format::Format;
use crate::payload::PayloadRegistry;
use crate::reader::{Cursor, EntrySource, StreamEntry};
use crate::render::render_record;
use crate::tail::TailRequest;
use std::io::Write;
use tokio::select;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Reads the stream forever, printing every decoded record to `out`.
/// Returns the last cursor when cancelled, or the first fatal error.
#[tracing::instrument(skip_all, fields(key = %request.key))]
pub async fn run_tail<S, W>(
    source: &mut S,
    request: &TailRequest,
    registry: &PayloadRegistry,
    out: &mut W,
    cancellation_token: CancellationToken,
) -> Result<Cursor, TailError>
where
    S: EntrySource,
    W: Write,
{
    let mut cursor = Cursor::from(&request.start_from);
    info!("Tailing from {}", cursor);

    loop {
        let batch_result = select! {
            batch = source.read_batch(&cursor, request.count) => {
                Some(batch)
            }
            _ = cancellation_token.cancelled() => {
                None
            }
        };

        let Some(batch_result) = batch_result else {
            info!("Tailing was cancelled at {}", cursor);
            return Ok(cursor);
        };

        let entries = match batch_result {
            Ok(entries) => entries,
            Err(error) => {
                let Some(delay) = request.failure_policy.retry_delay(&error) else {
                    return Err(error);
                };

                warn!("{}. Reconnecting in {:?}", error, delay);
                let cancelled = select! {
                    _ = sleep(delay) => false,
                    _ = cancellation_token.cancelled() => true,
                };
                if cancelled {
                    info!("Tailing was cancelled at {}", cursor);
                    return Ok(cursor);
                }

                if let Err(e) = source.reconnect().await {
                    warn!("{}", e);
                }
                continue;
            }
        };

        debug!("Read {} entries after {}", entries.len(), cursor);

        process_batch(&mut cursor, &entries, registry, request.format, out)?;
    }
}

/// Advances the cursor over `entries` and renders each decoded record.
/// Stops at the first entry that fails to decode without printing it.
pub fn process_batch<W: Write>(
    cursor: &mut Cursor,
    entries: &[StreamEntry],
    registry: &PayloadRegistry,
    format: Format,
    out: &mut W,
) -> Result<(), TailError> {
    for entry in entries {
        trace!(
            "New entry. Id: '{}', time: {:?}, fields: {:?}",
            entry.id(),
            entry.id().timestamp(),
            entry.fields().keys()
        );

        cursor.advance(entry.id());

        let records = registry.decode_entry(entry)?;
        for record in &records {
            render_record(out, record, format)?;
        }
    }

    out.flush().map_err(TailError::Output)
}
