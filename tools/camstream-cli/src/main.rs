//! camstream CLI: stream a camera over the network and play the stream back.
//!
//! Usage:
//!   camstream capture [OPTIONS]   Stream the camera (alias: stream)
//!   camstream play [OPTIONS]      Play a stream with ffplay, mpv or mplayer
//!   camstream check               Check which external tools are installed

use camstream_common::config::AppConfig;
use camstream_common::error::{CamstreamError, EXIT_FAILURE};
use clap::{Parser, Subcommand};

mod commands;

use commands::capture::CaptureArgs;
use commands::play::PlayArgs;

#[derive(Parser)]
#[command(
    name = "camstream",
    about = "Low-latency camera streaming for robots and single-board computers",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream the camera over tcp, udp or rtsp
    #[command(visible_alias = "stream")]
    Capture(CaptureArgs),

    /// Play a stream with the first available player
    Play(PlayArgs),

    /// Check which capture, pipeline and player tools are installed
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = AppConfig::from_env().with_verbose(cli.verbose);
    camstream_common::logging::init_logging(&config.logging);

    let result = match cli.command {
        Commands::Capture(args) => commands::capture::run(args).await,
        Commands::Play(args) => commands::play::run(args).await,
        Commands::Check => commands::check::run(),
    };

    let code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ERROR: {err}");
            exit_code(&err)
        }
    };
    std::process::exit(code);
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CamstreamError>()
        .map(CamstreamError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
