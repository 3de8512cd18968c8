//! Playback Command Compiler
//!
//! Builds one player invocation for a validated
//! [`PlaybackConfig`](camstream_model::PlaybackConfig):
//!
//! 1. construct the stream URL from the transport,
//! 2. resolve a player (explicit, or the first of ffplay, mpv, mplayer found),
//! 3. add the player's low-latency flags for that URL and format.
//!
//! Tool lookup goes through a [`ToolPresence`] oracle so compilation stays
//! free of I/O.

pub mod compiler;
pub mod player;
pub mod presence;

pub use compiler::{compile, PlayerInvocation};
pub use player::{player_args, resolve_player};
pub use presence::ToolPresence;
