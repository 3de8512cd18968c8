//! Encode stages for the V4L2 pipeline, selected by format and encoder.
//!
//! libcamera and raspicam encode inside the camera tool and never use these.

use camstream_common::error::{CamstreamError, CamstreamResult};
use camstream_model::{CaptureConfig, H264Encoder, H264Profile, OptionDomain, VideoFormat};

use crate::plan::{Element, PipelineStage, StageKind};

/// Encode stages for `config`.
///
/// h264 needs an encoder choice; every h264 path ends in the same
/// normalization stage.
pub fn v4l2_encode(config: &CaptureConfig) -> CamstreamResult<Vec<PipelineStage>> {
    match config.format {
        VideoFormat::Mjpeg => Ok(vec![jpeg(config.quality)]),
        VideoFormat::H264 => {
            let encoder = config.h264_encoder.ok_or_else(|| {
                CamstreamError::unsupported_combination(format!(
                    "driver=v4l2 with format=h264 requires an h264 encoder ({})",
                    H264Encoder::allowed()
                ))
            })?;
            Ok(vec![
                h264(encoder, config.bitrate, config.profile),
                h264_normalize(),
            ])
        }
    }
}

fn jpeg(quality: u8) -> PipelineStage {
    PipelineStage::elements(
        StageKind::Encode,
        vec![Element::new("jpegenc").property("quality", quality)],
    )
}

fn profile_caps(profile: H264Profile) -> Element {
    Element::new(format!("video/x-h264,profile={}", profile.as_str()))
}

fn h264(encoder: H264Encoder, bitrate: u32, profile: H264Profile) -> PipelineStage {
    let elements = match encoder {
        // x264enc takes kbit/s
        H264Encoder::Libx264 => vec![
            Element::new("x264enc")
                .property("tune", "zerolatency")
                .property("speed-preset", "ultrafast")
                .property("bitrate", bitrate / 1000),
            profile_caps(profile),
        ],
        H264Encoder::LibavOmx => vec![Element::new("avenc_h264_omx")
            .property("bitrate", bitrate)
            .property("profile", profile.as_str())],
        H264Encoder::Omx => vec![
            Element::new("omxh264enc")
                .property("target-bitrate", bitrate)
                .property("control-rate", "variable"),
            profile_caps(profile),
        ],
    };
    PipelineStage::elements(StageKind::Encode, elements)
}

/// Byte-stream, AU-aligned output with SPS/PPS repeated before every
/// keyframe (`config-interval=-1`), so clients can join mid-stream.
fn h264_normalize() -> PipelineStage {
    PipelineStage::elements(
        StageKind::Encode,
        vec![
            Element::new("h264parse").property("config-interval", -1),
            Element::new("video/x-h264,stream-format=byte-stream,alignment=au"),
        ],
    )
}
