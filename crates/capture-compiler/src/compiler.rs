//! Top-level capture compilation.

use camstream_common::error::{CamstreamError, CamstreamResult};
use camstream_model::{CaptureConfig, Driver};

use crate::encode;
use crate::gain::DerivedGain;
use crate::plan::{render, CommandPlan};
use crate::sink::build_sink;
use crate::source;

/// Compile a validated capture request into a command plan.
///
/// Fails with `UnsupportedCombination` when V4L2 h264 has no encoder. Any
/// other combination compiles; whether the hardware supports it is left to
/// the external tools.
pub fn compile(config: &CaptureConfig) -> CamstreamResult<CommandPlan> {
    let gain = DerivedGain::split(config.gain);

    let (setup, mut stages) = match config.driver {
        Driver::Libcamera => (Vec::new(), vec![source::libcamera(config)]),
        Driver::Raspicam => (Vec::new(), vec![source::raspicam(config, gain)]),
        Driver::V4l2 => {
            let mut stages = vec![source::v4l2(config)];
            stages.extend(encode::v4l2_encode(config)?);
            (source::v4l2_controls(config, gain), stages)
        }
    };
    stages.push(build_sink(&config.transport, config.format));

    let pipeline = render(&stages)
        .ok_or_else(|| CamstreamError::unsupported_combination("capture plan has no stages"))?;

    tracing::info!(
        driver = config.driver.as_str(),
        format = config.format.as_str(),
        net_mode = config.transport.net_mode.as_str(),
        setup_steps = setup.len(),
        stages = stages.len(),
        processes = pipeline.len(),
        "Compiled capture plan"
    );
    tracing::debug!(pipeline = %pipeline, "Capture pipeline");

    Ok(CommandPlan::new(setup, stages, pipeline))
}
