//! Request model for camstream.
//!
//! Value types describing a capture request ([`CaptureConfig`]) and a
//! playback request ([`PlaybackConfig`]), the raw option sets they are
//! validated from, and the command vocabulary ([`Invocation`],
//! [`ProcessChain`]) that both compilers emit.
//!
//! Configs are immutable once validated; compilers consume them read-only.

pub mod capture;
pub mod command;
pub mod domain;
pub mod options;
pub mod playback;
pub mod transport;
pub mod validate;

pub use capture::*;
pub use command::*;
pub use domain::OptionDomain;
pub use options::*;
pub use playback::*;
pub use transport::*;
pub use validate::{validate_capture, validate_playback};
