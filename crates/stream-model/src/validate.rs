//! Option validation.
//!
//! Turns raw option sets into validated configs. Pure: no I/O, no side
//! effects. Fails fast on the first out-of-domain field with
//! [`CamstreamError::InvalidOption`] naming the field and its allowed domain.
//! Compilers may assume everything they receive passed through here.

use camstream_common::error::{CamstreamError, CamstreamResult};

use crate::capture::{CaptureConfig, Driver, H264Encoder, H264Profile, IoMode, Rotation, VideoFormat};
use crate::domain::OptionDomain;
use crate::options::{RawCaptureOptions, RawPlaybackOptions};
use crate::playback::{default_address, default_port, PlaybackConfig, PlaybackFormat, PlayerChoice};
use crate::transport::{NetMode, TransportConfig};

/// Highest JPEG quality accepted.
pub const MAX_QUALITY: i64 = 99;

/// Validate a capture request.
pub fn validate_capture(raw: &RawCaptureOptions) -> CamstreamResult<CaptureConfig> {
    let driver: Driver = choice("driver", &raw.driver)?;
    let io_mode: IoMode = choice("iomode", &raw.io_mode)?;

    // An unset encoder is structurally fine here; the compiler decides
    // whether the combination needs one.
    let h264_encoder = raw
        .h264_encoder
        .as_deref()
        .map(|name| choice::<H264Encoder>("h264encoder", name))
        .transpose()?;

    let device = raw.device.trim().to_string();
    if driver == Driver::V4l2 && device.is_empty() {
        return Err(CamstreamError::invalid_option(
            "device",
            &raw.device,
            "a device path such as /dev/video0 (required for v4l2)",
        ));
    }

    let config = CaptureConfig {
        driver,
        device,
        io_mode,
        h264_encoder,
        width: positive_u32("width", raw.width)?,
        height: positive_u32("height", raw.height)?,
        framerate: positive_u32("framerate", raw.framerate)?,
        convert: raw.convert,
        format: choice::<VideoFormat>("format", &raw.format)?,
        bitrate: positive_u32("bitrate", raw.bitrate)?,
        profile: choice::<H264Profile>("profile", &raw.profile)?,
        quality: quality(raw.quality)?,
        vflip: raw.vflip,
        hflip: raw.hflip,
        rotate: Rotation::from_degrees(raw.rotate).ok_or_else(|| {
            CamstreamError::invalid_option("rotate", raw.rotate, "0, 90, 180, 270")
        })?,
        gain: gain(raw.gain)?,
        transport: TransportConfig {
            net_mode: choice("netmode", &raw.net_mode)?,
            address: address(&raw.address)?,
            port: port(raw.port)?,
            rtsp_key: raw.rtsp_key.clone(),
        },
    };

    tracing::debug!(
        driver = config.driver.as_str(),
        format = config.format.as_str(),
        net_mode = config.transport.net_mode.as_str(),
        "Capture options validated"
    );
    Ok(config)
}

/// Validate a playback request, resolving `auto` address and port 0.
pub fn validate_playback(raw: &RawPlaybackOptions) -> CamstreamResult<PlaybackConfig> {
    let net_mode: NetMode = choice("netmode", &raw.net_mode)?;

    let address = if raw.address.trim().eq_ignore_ascii_case("auto") {
        default_address(net_mode).to_string()
    } else {
        address(&raw.address)?
    };

    let port = match raw.port {
        0 => default_port(net_mode),
        other => port(other)?,
    };

    let config = PlaybackConfig {
        transport: TransportConfig {
            net_mode,
            address,
            port,
            rtsp_key: raw.rtsp_key.clone(),
        },
        format: choice::<PlaybackFormat>("format", &raw.format)?,
        player: choice::<PlayerChoice>("player", &raw.player)?,
        framerate: positive_u32("framerate", raw.framerate)?,
    };

    tracing::debug!(
        net_mode = config.transport.net_mode.as_str(),
        address = %config.transport.address,
        port = config.transport.port,
        "Playback options validated"
    );
    Ok(config)
}

fn choice<T: OptionDomain>(field: &str, value: &str) -> CamstreamResult<T> {
    T::from_name(value).ok_or_else(|| CamstreamError::invalid_option(field, value, T::allowed()))
}

fn positive_u32(field: &str, value: i64) -> CamstreamResult<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| CamstreamError::invalid_option(field, value, format!("1-{}", u32::MAX)))
}

fn quality(value: i64) -> CamstreamResult<u8> {
    if (1..=MAX_QUALITY).contains(&value) {
        // in range, so the cast is lossless
        Ok(value as u8)
    } else {
        Err(CamstreamError::invalid_option(
            "quality",
            value,
            format!("1-{MAX_QUALITY}"),
        ))
    }
}

fn gain(value: f64) -> CamstreamResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CamstreamError::invalid_option(
            "gain",
            value,
            "a finite number greater than 0",
        ))
    }
}

fn port(value: i64) -> CamstreamResult<u16> {
    u16::try_from(value)
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| CamstreamError::invalid_option("port", value, "1-65535"))
}

fn address(value: &str) -> CamstreamResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CamstreamError::invalid_option(
            "address",
            value,
            "a host name or IP address",
        ));
    }
    Ok(trimmed.to_string())
}
