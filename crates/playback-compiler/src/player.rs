//! Player resolution and per-player argument construction.

use camstream_common::error::{CamstreamError, CamstreamResult};
use camstream_model::{Invocation, NetMode, PlaybackConfig, PlaybackFormat, Player, PlayerChoice};

use crate::presence::ToolPresence;

/// Pick the player to run.
///
/// An explicit choice must be installed. `auto` takes the first installed
/// player in [`Player::PRIORITY`] order.
pub fn resolve_player<P>(choice: PlayerChoice, presence: &P) -> CamstreamResult<Player>
where
    P: ToolPresence + ?Sized,
{
    match choice.explicit() {
        Some(player) => {
            if presence.is_present(player.binary()) {
                Ok(player)
            } else {
                Err(CamstreamError::player_not_found(
                    player.binary(),
                    player.install_hint(),
                ))
            }
        }
        None => {
            let found = Player::PRIORITY
                .into_iter()
                .find(|player| presence.is_present(player.binary()));
            match found {
                Some(player) => {
                    tracing::debug!(player = player.binary(), "Auto-selected player");
                    Ok(player)
                }
                None => Err(CamstreamError::NoPlayerAvailable),
            }
        }
    }
}

/// Build the invocation for an already-resolved player.
pub fn player_args(player: Player, config: &PlaybackConfig, url: &str) -> CamstreamResult<Invocation> {
    match player {
        Player::Ffplay => Ok(ffplay(config, url)),
        Player::Mpv => Ok(mpv(config, url)),
        Player::Mplayer => mplayer(config, url),
    }
}

/// Minimal probing, no buffering, drop late frames, sync to external clock.
/// ffplay rejects `-framerate` for rtsp inputs.
fn ffplay(config: &PlaybackConfig, url: &str) -> Invocation {
    let mut invocation = Invocation::new(Player::Ffplay.binary()).args(["-probesize", "32"]);
    if config.transport.net_mode != NetMode::Rtsp {
        invocation = invocation
            .arg("-framerate")
            .arg(config.framerate.to_string());
    }
    invocation
        .args([
            "-fflags",
            "nobuffer",
            "-flags",
            "low_delay",
            "-framedrop",
            "-sync",
            "ext",
        ])
        .arg(url)
}

/// mpv misdetects MJPEG streams at its default probe score, so anything
/// other than explicit h264 lowers the threshold.
fn mpv(config: &PlaybackConfig, url: &str) -> Invocation {
    let mut invocation = Invocation::new(Player::Mpv.binary())
        .args([
            "--no-cache",
            "--untimed",
            "--profile=low-latency",
            "--no-correct-pts",
        ])
        .arg(format!("--fps={}", config.framerate))
        .arg("--osc=no");
    if config.format != PlaybackFormat::H264 {
        invocation = invocation.arg("--demuxer-lavf-probescore=10");
    }
    invocation.arg(url)
}

/// mplayer cannot detect the format itself, and its own network demuxers
/// are unreliable for these streams, so tcp/udp go through ffmpeg.
fn mplayer(config: &PlaybackConfig, url: &str) -> CamstreamResult<Invocation> {
    let demuxer = match config.format {
        PlaybackFormat::Auto => {
            return Err(CamstreamError::ambiguous_format(Player::Mplayer.binary()))
        }
        PlaybackFormat::Mjpeg => "lavf",
        PlaybackFormat::H264 => "h264es",
    };

    let url = match config.transport.net_mode {
        NetMode::Tcp | NetMode::Udp => format!("ffmpeg://{url}"),
        NetMode::Rtsp => url.to_string(),
    };

    Ok(Invocation::new(Player::Mplayer.binary())
        .args(["-benchmark", "-nocache", "-fps"])
        .arg(config.framerate.to_string())
        .args(["-demuxer", demuxer])
        .arg(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_player_must_be_present() {
        let err = resolve_player(PlayerChoice::Mpv, &|_: &str| false).unwrap_err();
        match err {
            CamstreamError::PlayerNotFound { player, hint } => {
                assert_eq!(player, "mpv");
                assert!(hint.contains("Install mpv"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_explicit_player_skips_priority() {
        let player = resolve_player(PlayerChoice::Mplayer, &|_: &str| true).unwrap();
        assert_eq!(player, Player::Mplayer);
    }

    #[test]
    fn test_auto_prefers_ffplay_then_mpv_then_mplayer() {
        assert_eq!(
            resolve_player(PlayerChoice::Auto, &|_: &str| true).unwrap(),
            Player::Ffplay
        );
        assert_eq!(
            resolve_player(PlayerChoice::Auto, &|t: &str| t != "ffplay").unwrap(),
            Player::Mpv
        );
        assert_eq!(
            resolve_player(PlayerChoice::Auto, &|t: &str| t == "mplayer").unwrap(),
            Player::Mplayer
        );
    }

    #[test]
    fn test_auto_with_nothing_installed() {
        let err = resolve_player(PlayerChoice::Auto, &|_: &str| false).unwrap_err();
        assert!(matches!(err, CamstreamError::NoPlayerAvailable));
    }
}
