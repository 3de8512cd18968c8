//! Play a stream.

use camstream_launcher::{execute_player, SystemToolPresence};
use camstream_model::{validate_playback, RawPlaybackOptions};
use clap::Args;

/// Flags of `camstream play`.
#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Transport: tcp, udp or rtsp
    #[arg(long = "netmode", default_value = "tcp")]
    net_mode: String,

    /// Stream address; auto picks 127.0.0.1 for udp and 192.168.10.1 otherwise
    #[arg(long, default_value = "auto")]
    address: String,

    /// Stream port; 0 picks 8554 for rtsp and 5008 otherwise
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    port: i64,

    /// Path component of the rtsp URL
    #[arg(long = "rtspkey", default_value = "stream")]
    rtsp_key: String,

    /// Stream format hint: auto, h264 or mjpeg
    #[arg(long, default_value = "auto")]
    format: String,

    /// Player: auto, ffplay, mpv or mplayer
    #[arg(long, default_value = "auto")]
    player: String,

    #[arg(long, default_value_t = 60, allow_negative_numbers = true)]
    framerate: i64,

    /// Print the command without running it
    #[arg(long)]
    dry_run: bool,

    /// Print the player invocation as JSON (with --dry-run)
    #[arg(long, requires = "dry_run")]
    json: bool,
}

impl PlayArgs {
    pub fn options(&self) -> RawPlaybackOptions {
        RawPlaybackOptions {
            net_mode: self.net_mode.clone(),
            address: self.address.clone(),
            port: self.port,
            rtsp_key: self.rtsp_key.clone(),
            format: self.format.clone(),
            player: self.player.clone(),
            framerate: self.framerate,
        }
    }
}

pub async fn run(args: PlayArgs) -> anyhow::Result<i32> {
    let config = validate_playback(&args.options())?;
    let compiled = camstream_playback::compile(&config, &SystemToolPresence)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&compiled)?);
    } else {
        println!("{}", compiled.invocation);
    }

    let launcher = super::launcher(args.dry_run);
    let outcome = execute_player(launcher.as_ref(), &compiled).await?;
    Ok(outcome.exit_code())
}
