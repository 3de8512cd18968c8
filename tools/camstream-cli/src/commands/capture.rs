//! Stream the camera.

use camstream_launcher::execute_plan;
use camstream_model::{validate_capture, RawCaptureOptions};
use clap::Args;

/// Flags of `camstream capture`.
#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Camera driver: libcamera, raspicam or v4l2
    #[arg(long, default_value = "libcamera")]
    driver: String,

    /// Video device (required for v4l2)
    #[arg(long, default_value = "")]
    device: String,

    /// v4l2 io mode: auto, rw, mmap, userptr, dmabuf, dmabuf-import
    #[arg(long = "iomode", default_value = "auto")]
    io_mode: String,

    /// v4l2 h264 encoder: libav-omx, omx or libx264
    #[arg(long = "h264encoder", default_value = "libav-omx")]
    h264_encoder: String,

    #[arg(long, default_value_t = 640, allow_negative_numbers = true)]
    width: i64,

    #[arg(long, default_value_t = 480, allow_negative_numbers = true)]
    height: i64,

    /// Insert videoconvert after the v4l2 source
    #[arg(long = "vconvert")]
    convert: bool,

    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    framerate: i64,

    /// Stream format: h264 or mjpeg
    #[arg(long, default_value = "h264")]
    format: String,

    /// Bitrate in bits per second
    #[arg(long, default_value_t = 2_048_000, allow_negative_numbers = true)]
    bitrate: i64,

    /// H.264 profile: baseline, main or high
    #[arg(long, default_value = "baseline")]
    profile: String,

    /// JPEG quality, 1 to 99
    #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
    quality: i64,

    #[arg(long)]
    vflip: bool,

    #[arg(long)]
    hflip: bool,

    /// Rotation in degrees: 0, 90, 180 or 270
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    rotate: i64,

    /// Total sensor gain
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    gain: f64,

    /// Transport: tcp, udp or rtsp
    #[arg(long = "netmode", default_value = "tcp")]
    net_mode: String,

    /// Listen address (tcp), destination (udp) or server (rtsp)
    #[arg(long, default_value = "0.0.0.0")]
    address: String,

    #[arg(long, default_value_t = 5008, allow_negative_numbers = true)]
    port: i64,

    /// Path component of the rtsp URL
    #[arg(long = "rtspkey", default_value = "stream")]
    rtsp_key: String,

    /// Print the commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Print the compiled plan as JSON (with --dry-run)
    #[arg(long, requires = "dry_run")]
    json: bool,
}

impl CaptureArgs {
    pub fn options(&self) -> RawCaptureOptions {
        RawCaptureOptions {
            driver: self.driver.clone(),
            device: self.device.clone(),
            io_mode: self.io_mode.clone(),
            h264_encoder: Some(self.h264_encoder.clone()),
            width: self.width,
            height: self.height,
            framerate: self.framerate,
            convert: self.convert,
            format: self.format.clone(),
            bitrate: self.bitrate,
            profile: self.profile.clone(),
            quality: self.quality,
            vflip: self.vflip,
            hflip: self.hflip,
            rotate: self.rotate,
            gain: self.gain,
            net_mode: self.net_mode.clone(),
            address: self.address.clone(),
            port: self.port,
            rtsp_key: self.rtsp_key.clone(),
        }
    }
}

pub async fn run(args: CaptureArgs) -> anyhow::Result<i32> {
    let config = validate_capture(&args.options())?;
    let plan = camstream_capture::compile(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for step in plan.setup_invocations() {
            println!("{step}");
        }
        println!("{}", plan.pipeline());
    }

    let launcher = super::launcher(args.dry_run);
    let execution = execute_plan(launcher.as_ref(), &plan).await?;

    let failed = execution.failed_setup().count();
    if failed > 0 {
        tracing::warn!(failed, "Some device controls were not applied");
    }

    Ok(execution.outcome.exit_code())
}
