//! Capture Pipeline Compiler
//!
//! Turns a validated [`CaptureConfig`](camstream_model::CaptureConfig) into a
//! [`CommandPlan`]: best-effort device-control steps (V4L2 only) followed by
//! one pipeline made of ordered stages.
//!
//! # Architecture
//!
//! ```text
//!  CaptureConfig
//!       │
//!       ├── driver ──────────► source stage   (+ V4L2 device controls)
//!       ├── format × encoder ► encode stages  (V4L2 only)
//!       └── net mode ────────► sink stage
//!                                 │
//!                                 ▼
//!                  CommandPlan { setup, stages, pipeline }
//!
//!  libcamera-vid ... -o - | gst-launch-1.0 fdsrc fd=0 ! <sink>
//!  gst-launch-1.0 v4l2src ... ! <convert> ! <encode> ! <sink>
//! ```
//!
//! Nothing here spawns processes.

pub mod compiler;
pub mod encode;
pub mod gain;
pub mod plan;
pub mod sink;
pub mod source;

pub use compiler::compile;
pub use gain::{DerivedGain, MAX_ANALOG_GAIN};
pub use plan::*;
pub use sink::build_sink;
