use std::process::ExitCode;
use stream_tailer::variant::TailerVariant;
use stream_tailer_cli::startup::run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    run(TailerVariant::RequestLog).await
}
