//! Raw, unvalidated option sets as supplied by a caller.
//!
//! Enumerated options are plain strings and numbers are wide so that every
//! out-of-domain value reaches the validator and is reported by name instead
//! of failing earlier in a parser. Callers may pass every field regardless
//! of which ones apply to the chosen driver or format.

use serde::{Deserialize, Serialize};

/// Capture options before validation. `Default` matches the CLI defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCaptureOptions {
    pub driver: String,
    pub device: String,
    pub io_mode: String,
    pub h264_encoder: Option<String>,
    pub width: i64,
    pub height: i64,
    pub framerate: i64,
    pub convert: bool,
    pub format: String,
    pub bitrate: i64,
    pub profile: String,
    pub quality: i64,
    pub vflip: bool,
    pub hflip: bool,
    pub rotate: i64,
    pub gain: f64,
    pub net_mode: String,
    pub address: String,
    pub port: i64,
    pub rtsp_key: String,
}

impl Default for RawCaptureOptions {
    fn default() -> Self {
        Self {
            driver: "libcamera".to_string(),
            device: String::new(),
            io_mode: "auto".to_string(),
            h264_encoder: Some("libav-omx".to_string()),
            width: 640,
            height: 480,
            framerate: 30,
            convert: false,
            format: "h264".to_string(),
            bitrate: 2_048_000,
            profile: "baseline".to_string(),
            quality: 50,
            vflip: false,
            hflip: false,
            rotate: 0,
            gain: 10.0,
            net_mode: "tcp".to_string(),
            address: "0.0.0.0".to_string(),
            port: 5008,
            rtsp_key: "stream".to_string(),
        }
    }
}

/// Playback options before validation. `Default` matches the CLI defaults.
///
/// `address = "auto"` and `port = 0` are resolved per net mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPlaybackOptions {
    pub net_mode: String,
    pub address: String,
    pub port: i64,
    pub rtsp_key: String,
    pub format: String,
    pub player: String,
    pub framerate: i64,
}

impl Default for RawPlaybackOptions {
    fn default() -> Self {
        Self {
            net_mode: "tcp".to_string(),
            address: "auto".to_string(),
            port: 0,
            rtsp_key: "stream".to_string(),
            format: "auto".to_string(),
            player: "auto".to_string(),
            framerate: 60,
        }
    }
}
