//! Playback request types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::OptionDomain;
use crate::transport::{NetMode, TransportConfig};

/// Default server address for tcp/rtsp playback (the robot's access point).
pub const DEFAULT_SERVER_ADDRESS: &str = "192.168.10.1";

/// Default receiving address for udp playback.
pub const DEFAULT_UDP_ADDRESS: &str = "127.0.0.1";

/// Default port for tcp and udp streams.
pub const DEFAULT_STREAM_PORT: u16 = 5008;

/// Default RTSP server port.
pub const DEFAULT_RTSP_PORT: u16 = 8554;

/// Address used when the caller asks for `auto`.
pub fn default_address(net_mode: NetMode) -> &'static str {
    match net_mode {
        NetMode::Udp => DEFAULT_UDP_ADDRESS,
        NetMode::Tcp | NetMode::Rtsp => DEFAULT_SERVER_ADDRESS,
    }
}

/// Port used when the caller passes 0.
pub fn default_port(net_mode: NetMode) -> u16 {
    match net_mode {
        NetMode::Rtsp => DEFAULT_RTSP_PORT,
        NetMode::Tcp | NetMode::Udp => DEFAULT_STREAM_PORT,
    }
}

/// Stream format hint for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackFormat {
    /// Let the player probe the stream.
    Auto,
    H264,
    Mjpeg,
}

impl PlaybackFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackFormat::Auto => "auto",
            PlaybackFormat::H264 => "h264",
            PlaybackFormat::Mjpeg => "mjpeg",
        }
    }
}

impl OptionDomain for PlaybackFormat {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("auto", PlaybackFormat::Auto),
        ("h264", PlaybackFormat::H264),
        ("mjpeg", PlaybackFormat::Mjpeg),
    ];
}

/// A concrete player program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Ffplay,
    Mpv,
    Mplayer,
}

impl Player {
    /// Probe order used by automatic resolution.
    pub const PRIORITY: [Player; 3] = [Player::Ffplay, Player::Mpv, Player::Mplayer];

    /// Executable name looked up on PATH.
    pub fn binary(self) -> &'static str {
        match self {
            Player::Ffplay => "ffplay",
            Player::Mpv => "mpv",
            Player::Mplayer => "mplayer",
        }
    }

    /// What to tell the user when the binary is missing.
    pub fn install_hint(self) -> &'static str {
        match self {
            Player::Ffplay => "Install ffmpeg and ensure ffplay is in your PATH.",
            Player::Mpv => "Install mpv and ensure it is in your PATH.",
            Player::Mplayer => "Install mplayer and ensure it is in your PATH.",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Player selection: a specific program, or the first one found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerChoice {
    Auto,
    Ffplay,
    Mpv,
    Mplayer,
}

impl PlayerChoice {
    /// The explicitly requested player, or `None` for `auto`.
    pub fn explicit(self) -> Option<Player> {
        match self {
            PlayerChoice::Auto => None,
            PlayerChoice::Ffplay => Some(Player::Ffplay),
            PlayerChoice::Mpv => Some(Player::Mpv),
            PlayerChoice::Mplayer => Some(Player::Mplayer),
        }
    }
}

impl OptionDomain for PlayerChoice {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("auto", PlayerChoice::Auto),
        ("ffplay", PlayerChoice::Ffplay),
        ("mpv", PlayerChoice::Mpv),
        ("mplayer", PlayerChoice::Mplayer),
    ];
}

/// A validated playback request. Address and port are always concrete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub transport: TransportConfig,
    pub format: PlaybackFormat,
    pub player: PlayerChoice,

    /// Playback rate hint; twice the stream rate keeps the newest frame on screen.
    pub framerate: u32,
}
