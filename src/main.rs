use std::{fs::File, path::Path, process::ExitCode};

use autocomplete::complete::{execute_completion, CompleteArgs};
use clap::Parser;
use tracing::{info, Level};

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_writer(file)
                .with_ansi(false)
                .with_max_level(Level::DEBUG)
                .init();
        }
        None => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(Level::WARN)
            .init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = CompleteArgs::parse();
    init_logging(args.log_file.as_deref())?;

    info!("Prefixes: {:?}", args.prefixes);

    let status = execute_completion(&args, &mut std::io::stdout(), &mut std::io::stderr()).await?;
    Ok(ExitCode::from(status.code()))
}
