use crate::connection_settings::ConnectionSettings;
use crate::error::TailError;
use crate::reader::{single_stream_entries, Cursor, EntrySource, StreamEntry};
use anyhow::Context;
use redis::aio::MultiplexedConnection;
use redis::streams::{StreamReadOptions, StreamReadReply};
use tracing::{debug, info, trace};

/// XREAD based source for a single stream key.
pub struct RedisStreamReader {
    client: redis::Client,
    connection: MultiplexedConnection,
    key: String,
    block_ms: usize,
}

impl RedisStreamReader {
    /// `block_ms == 0` blocks until entries arrive.
    pub async fn connect(
        settings: &ConnectionSettings,
        key: impl Into<String>,
        block_ms: usize,
    ) -> Result<Self, anyhow::Error> {
        let client = redis::Client::try_from(settings)?;
        let connection = client
            .get_multiplexed_tokio_connection()
            .await
            .with_context(|| format!("While connecting to {}", settings.redacted()))?;

        let key = key.into();
        info!("Connected to {}, stream '{}'", settings.redacted(), key);

        Ok(Self {
            client,
            connection,
            key,
            block_ms,
        })
    }
}

fn xread_options(count: usize, block_ms: usize) -> StreamReadOptions {
    StreamReadOptions::default().count(count).block(block_ms)
}

/// `XREAD [BLOCK ms] [COUNT n] STREAMS key cursor`
fn xread_command(key: &str, cursor: &Cursor, options: &StreamReadOptions) -> redis::Cmd {
    let mut command = redis::cmd("XREAD");
    command
        .arg(options)
        .arg("STREAMS")
        .arg(key)
        .arg(cursor.as_str());
    command
}

impl EntrySource for RedisStreamReader {
    #[tracing::instrument(skip_all, fields(key = %self.key, cursor = %cursor))]
    async fn read_batch(
        &mut self,
        cursor: &Cursor,
        count: usize,
    ) -> Result<Vec<StreamEntry>, TailError> {
        let options = xread_options(count, self.block_ms);

        trace!("XREAD COUNT {} BLOCK {}", count, self.block_ms);

        let reply: Option<StreamReadReply> = xread_command(&self.key, cursor, &options)
            .query_async(&mut self.connection)
            .await
            .context("While reading stream")
            .map_err(TailError::Transport)?;

        // Nil reply means the block timeout expired
        let Some(reply) = reply else {
            debug!("No entries before block timeout");
            return Ok(vec![]);
        };

        single_stream_entries(reply, &self.key)
    }

    async fn reconnect(&mut self) -> Result<(), TailError> {
        self.connection = self
            .client
            .get_multiplexed_tokio_connection()
            .await
            .context("While reconnecting")
            .map_err(TailError::Transport)?;

        info!("Reconnected, stream '{}'", self.key);

        Ok(())
    }
}
