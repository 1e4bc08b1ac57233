//! # hourline Main Entry Point
//!
//! Interactive terminal lookup by default; `--once --matricula <id>` prints a
//! single result and exits.

use anyhow::{anyhow, Context, Result};
use hourline::{
    cmd_args::CommandLineArgs, config, run_once, AppController, IniSessionStore,
    TerminalEventStream, TerminalRenderStream,
};
use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{time::ChronoLocal, writer::BoxMakeWriter},
    EnvFilter,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.once())?;

    let settings = config::load_settings(&cmd_args)?;
    let state_path = config::expand_path(&config::get_state_path());
    let session = Box::new(IniSessionStore::new(state_path));

    if cmd_args.once() {
        let raw = cmd_args.matricula().unwrap_or_default();
        let report = run_once(&settings, session, raw).await?;
        println!("{}", report.text);

        return Ok(if report.succeeded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let mut app = AppController::with_io_streams(
        &settings,
        session,
        cmd_args.matricula().map(str::to_string),
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await?;

    Ok(ExitCode::SUCCESS)
}

/// Route logs away from the terminal the UI owns
///
/// `HOURLINE_LOG_FILE` wins; otherwise one-shot mode logs to stderr and the
/// interactive mode discards everything.
fn init_tracing_subscriber(once: bool) -> Result<()> {
    let log_file = std::env::var_os(config::LOG_FILE_ENV_VAR);
    let ansi = once && log_file.is_none();

    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.to_string_lossy()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if once => BoxMakeWriter::new(std::io::stderr),
        None => BoxMakeWriter::new(std::io::sink),
    };

    let filter = EnvFilter::try_from_env(config::LOG_FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new("error"))
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("rustls=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
