//! Top-level playback compilation.

use camstream_common::error::CamstreamResult;
use camstream_model::{Invocation, PlaybackConfig, Player, ProcessChain};
use serde::Serialize;

use crate::player::{player_args, resolve_player};
use crate::presence::ToolPresence;

/// A resolved player and the command that plays the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerInvocation {
    pub player: Player,
    pub url: String,
    pub invocation: Invocation,
}

impl PlayerInvocation {
    /// The invocation as a single-process chain, ready for a launcher.
    pub fn chain(&self) -> ProcessChain {
        ProcessChain::new(self.invocation.clone())
    }
}

/// Compile a validated playback request.
///
/// Errors are final: a player that fails construction (e.g. mplayer with
/// `format=auto`) is not replaced by another one.
pub fn compile<P>(config: &PlaybackConfig, presence: &P) -> CamstreamResult<PlayerInvocation>
where
    P: ToolPresence + ?Sized,
{
    let url = config.transport.url();
    let player = resolve_player(config.player, presence)?;
    let invocation = player_args(player, config, &url)?;

    tracing::info!(
        player = player.binary(),
        url = %url,
        format = config.format.as_str(),
        "Compiled playback command"
    );

    Ok(PlayerInvocation {
        player,
        url,
        invocation,
    })
}
