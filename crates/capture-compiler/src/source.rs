//! Source stages, one builder per driver.

use camstream_model::{CaptureConfig, Invocation};

use crate::gain::{format_gain, DerivedGain};
use crate::plan::{DeviceControl, Element, PipelineStage, StageKind};

pub const LIBCAMERA_VID: &str = "libcamera-vid";
pub const RASPIVID: &str = "raspivid";

/// Flags shared by `libcamera-vid` and `raspivid` up to the codec options:
/// run forever, repeat SPS/PPS inline, geometry.
fn camera_tool_prelude(program: &str, config: &CaptureConfig) -> Invocation {
    Invocation::new(program)
        .args(["-t", "0", "--inline"])
        .arg("--width")
        .arg(config.width.to_string())
        .arg("--height")
        .arg(config.height.to_string())
        .arg("--framerate")
        .arg(config.framerate.to_string())
}

fn flips(mut invocation: Invocation, config: &CaptureConfig) -> Invocation {
    if config.vflip {
        invocation = invocation.arg("--vflip");
    }
    if config.hflip {
        invocation = invocation.arg("--hflip");
    }
    invocation
        .arg("--rotation")
        .arg(config.rotate.degrees().to_string())
}

/// `libcamera-vid` encodes on its own and takes a single combined gain.
pub fn libcamera(config: &CaptureConfig) -> PipelineStage {
    let invocation = camera_tool_prelude(LIBCAMERA_VID, config)
        .arg("--codec")
        .arg(config.format.as_str())
        .arg("--bitrate")
        .arg(config.bitrate.to_string())
        .arg("--profile")
        .arg(config.profile.as_str())
        .arg("--quality")
        .arg(config.quality.to_string());

    let invocation = flips(invocation, config)
        .arg("--gain")
        .arg(format_gain(config.gain))
        .args(["-n", "-o", "-"]);

    PipelineStage::process(StageKind::Source, invocation)
}

/// `raspivid` wants the codec name in uppercase, has no JPEG quality
/// option, and takes gain as separate digital and analog parts. Manual gain
/// requires dynamic range compression off.
pub fn raspicam(config: &CaptureConfig, gain: DerivedGain) -> PipelineStage {
    let invocation = camera_tool_prelude(RASPIVID, config)
        .arg("--codec")
        .arg(config.format.as_str().to_uppercase())
        .arg("--bitrate")
        .arg(config.bitrate.to_string())
        .arg("--profile")
        .arg(config.profile.as_str());

    let invocation = flips(invocation, config)
        .args(["--drc", "off"])
        .arg("--digitalgain")
        .arg(format_gain(gain.digital))
        .arg("--analoggain")
        .arg(format_gain(gain.analog))
        .args(["-n", "-o", "-"]);

    PipelineStage::process(StageKind::Source, invocation)
}

/// Raw frames from a V4L2 device at the requested geometry, optionally
/// through `videoconvert` (otherwise `identity`, a passthrough).
pub fn v4l2(config: &CaptureConfig) -> PipelineStage {
    let caps = format!(
        "video/x-raw,width={},height={},framerate={}/1",
        config.width, config.height, config.framerate
    );
    let convert = if config.convert {
        "videoconvert"
    } else {
        "identity"
    };

    PipelineStage::elements(
        StageKind::Source,
        vec![
            Element::new("v4l2src")
                .property("device", &config.device)
                .property("io-mode", config.io_mode.as_str()),
            Element::new(caps),
            Element::new(convert),
        ],
    )
}

/// Controls applied with `v4l2-ctl` before the pipeline starts.
///
/// Which gain control a device exposes is unknown ahead of time, so the
/// split analog part, the split digital part, and the raw combined gain are
/// all attempted.
pub fn v4l2_controls(config: &CaptureConfig, gain: DerivedGain) -> Vec<DeviceControl> {
    let device = config.device.as_str();
    vec![
        DeviceControl::new(device, "rotate", config.rotate.degrees()),
        DeviceControl::new(device, "horizontal_flip", u8::from(config.hflip)),
        DeviceControl::new(device, "vertical_flip", u8::from(config.vflip)),
        DeviceControl::new(device, "analogue_gain", format_gain(gain.analog)),
        DeviceControl::new(device, "digital_gain", format_gain(gain.digital)),
        DeviceControl::new(device, "gain", format_gain(config.gain)),
    ]
}
