//! Capture request types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::OptionDomain;
use crate::transport::TransportConfig;

/// Camera stack used to read frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// Pi camera modules through the libcamera stack (`libcamera-vid`).
    Libcamera,
    /// Pi camera modules through the legacy stack (`raspivid`).
    Raspicam,
    /// Any Video4Linux device, e.g. USB webcams.
    V4l2,
}

impl Driver {
    pub fn as_str(self) -> &'static str {
        match self {
            Driver::Libcamera => "libcamera",
            Driver::Raspicam => "raspicam",
            Driver::V4l2 => "v4l2",
        }
    }
}

impl OptionDomain for Driver {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("libcamera", Driver::Libcamera),
        ("raspicam", Driver::Raspicam),
        ("v4l2", Driver::V4l2),
    ];
}

/// V4L2 buffer I/O mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IoMode {
    Auto,
    Rw,
    Mmap,
    Userptr,
    Dmabuf,
    DmabufImport,
}

impl IoMode {
    pub fn as_str(self) -> &'static str {
        match self {
            IoMode::Auto => "auto",
            IoMode::Rw => "rw",
            IoMode::Mmap => "mmap",
            IoMode::Userptr => "userptr",
            IoMode::Dmabuf => "dmabuf",
            IoMode::DmabufImport => "dmabuf-import",
        }
    }
}

impl OptionDomain for IoMode {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("auto", IoMode::Auto),
        ("rw", IoMode::Rw),
        ("mmap", IoMode::Mmap),
        ("userptr", IoMode::Userptr),
        ("dmabuf", IoMode::Dmabuf),
        ("dmabuf-import", IoMode::DmabufImport),
    ];
}

/// H.264 encoder element used by the V4L2 pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum H264Encoder {
    /// libav wrapper around the hardware OMX encoder (`avenc_h264_omx`).
    LibavOmx,
    /// GStreamer OMX encoder (`omxh264enc`).
    Omx,
    /// Software encoder (`x264enc`).
    Libx264,
}

impl H264Encoder {
    pub fn as_str(self) -> &'static str {
        match self {
            H264Encoder::LibavOmx => "libav-omx",
            H264Encoder::Omx => "omx",
            H264Encoder::Libx264 => "libx264",
        }
    }
}

impl OptionDomain for H264Encoder {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("libav-omx", H264Encoder::LibavOmx),
        ("omx", H264Encoder::Omx),
        ("libx264", H264Encoder::Libx264),
    ];
}

/// Encoded stream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    H264,
    Mjpeg,
}

impl VideoFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoFormat::H264 => "h264",
            VideoFormat::Mjpeg => "mjpeg",
        }
    }
}

impl OptionDomain for VideoFormat {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("h264", VideoFormat::H264), ("mjpeg", VideoFormat::Mjpeg)];
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// H.264 profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum H264Profile {
    Baseline,
    Main,
    High,
}

impl H264Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            H264Profile::Baseline => "baseline",
            H264Profile::Main => "main",
            H264Profile::High => "high",
        }
    }
}

impl OptionDomain for H264Profile {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("baseline", H264Profile::Baseline),
        ("main", H264Profile::Main),
        ("high", H264Profile::High),
    ];
}

/// Image rotation in degrees.
///
/// libcamera only honours 0 and 180; other values are passed through and
/// left for the camera tool to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "270")]
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }
}

/// A validated capture request.
///
/// Exactly one of the encoder field groups is active, selected by `format`:
/// `bitrate`/`profile` for h264, `quality` for mjpeg. The inactive group is
/// carried but has no effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub driver: Driver,

    /// Device node (e.g. `/dev/video0`). Only meaningful for V4L2.
    pub device: String,

    /// Only meaningful for V4L2.
    pub io_mode: IoMode,

    /// Only meaningful for V4L2 with h264.
    pub h264_encoder: Option<H264Encoder>,

    /// Frame geometry; not checked against what the hardware supports.
    pub width: u32,
    pub height: u32,
    pub framerate: u32,

    /// Pass raw V4L2 frames through `videoconvert` before encoding.
    pub convert: bool,

    pub format: VideoFormat,

    /// Bits per second (h264).
    pub bitrate: u32,

    /// h264 only.
    pub profile: H264Profile,

    /// JPEG quality 1-99 (mjpeg). Unused by raspicam.
    pub quality: u8,

    pub vflip: bool,
    pub hflip: bool,
    pub rotate: Rotation,

    /// Combined gain; split into analog and digital parts where needed.
    pub gain: f64,

    pub transport: TransportConfig,
}
