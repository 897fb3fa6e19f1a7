use crate::app_config::{AppConfig, CliArgs};
use crate::logging::init_tracing;
use anyhow::Context;
use clap::{CommandFactory, FromArgMatches};
use std::process::ExitCode;
use stream_tailer::payload::PayloadRegistry;
use stream_tailer::reader::RedisStreamReader;
use stream_tailer::tail::run_tail;
use stream_tailer::variant::TailerVariant;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Entry point shared by the tailer binaries. Every error is fatal.
pub async fn run(variant: TailerVariant) -> ExitCode {
    init_tracing();

    let result = async {
        let matches = CliArgs::command().name(variant.name()).get_matches();
        let args = CliArgs::from_arg_matches(&matches).context("While parsing arguments")?;
        let config = AppConfig::build(variant, args).context("While building app config")?;

        run_until_stopped(config, variant).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

#[tracing::instrument(skip_all, fields(tailer = variant.name()))]
pub async fn run_until_stopped(
    config: AppConfig,
    variant: TailerVariant,
) -> Result<(), anyhow::Error> {
    let request = config.tail_request()?;

    let registry = PayloadRegistry::prepare(variant.payload_kinds())
        .await
        .context("While preparing payload decoders")?;
    info!(
        "Decoding fields {:?}",
        registry.kinds().map(|k| k.field_name()).collect::<Vec<_>>()
    );

    let mut reader =
        RedisStreamReader::connect(&config.connection_settings(), &request.key, config.block_ms)
            .await
            .context("While connecting to redis")?;

    let cancellation_token = CancellationToken::new();
    let ctrl_c_token = cancellation_token.clone();
    tokio::task::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Stopping");
            ctrl_c_token.cancel();
        }
    });

    let mut stdout = std::io::stdout();
    let cursor = run_tail(
        &mut reader,
        &request,
        &registry,
        &mut stdout,
        cancellation_token,
    )
    .await
    .with_context(|| format!("While tailing stream '{}'", request.key))?;

    info!("Stopped after {}", cursor);

    Ok(())
}
