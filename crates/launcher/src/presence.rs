//! Search-path lookups for external tools.

use std::process::Command;

use camstream_model::Player;
use camstream_playback::ToolPresence;
use serde::Serialize;

/// True when `binary` resolves through the shell's `command -v`.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Answers presence queries against the real `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemToolPresence;

impl ToolPresence for SystemToolPresence {
    fn is_present(&self, tool: &str) -> bool {
        let found = command_exists(tool);
        tracing::debug!(tool, found, "Tool lookup");
        found
    }
}

/// What an external tool is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolRole {
    CameraSource,
    DeviceControl,
    Pipeline,
    Player,
}

impl ToolRole {
    pub fn label(self) -> &'static str {
        match self {
            ToolRole::CameraSource => "camera source",
            ToolRole::DeviceControl => "device control",
            ToolRole::Pipeline => "pipeline",
            ToolRole::Player => "player",
        }
    }
}

/// Presence of one external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub name: &'static str,
    pub role: ToolRole,
    pub available: bool,
    pub hint: &'static str,
}

const CAPTURE_TOOLS: [(&str, ToolRole, &str); 4] = [
    (
        "libcamera-vid",
        ToolRole::CameraSource,
        "Install libcamera-apps to capture with the libcamera driver.",
    ),
    (
        "raspivid",
        ToolRole::CameraSource,
        "Install the legacy Raspberry Pi camera userland to capture with the raspicam driver.",
    ),
    (
        "v4l2-ctl",
        ToolRole::DeviceControl,
        "Install v4l-utils to apply rotation, flip and gain on v4l2 devices.",
    ),
    (
        "gst-launch-1.0",
        ToolRole::Pipeline,
        "Install gstreamer1.0-tools with the good, bad and ugly plugin sets.",
    ),
];

/// Look up every tool either side of the stream relies on.
pub fn check_tools<P>(presence: &P) -> Vec<ToolStatus>
where
    P: ToolPresence + ?Sized,
{
    let players = Player::PRIORITY
        .into_iter()
        .map(|player| (player.binary(), ToolRole::Player, player.install_hint()));

    CAPTURE_TOOLS
        .into_iter()
        .chain(players)
        .map(|(name, role, hint)| ToolStatus {
            name,
            role,
            available: presence.is_present(name),
            hint,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tools_covers_capture_and_playback() {
        let report = check_tools(&|tool: &str| tool == "mpv" || tool == "gst-launch-1.0");
        let names: Vec<&str> = report.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "libcamera-vid",
                "raspivid",
                "v4l2-ctl",
                "gst-launch-1.0",
                "ffplay",
                "mpv",
                "mplayer"
            ]
        );
        let available: Vec<&str> = report
            .iter()
            .filter(|t| t.available)
            .map(|t| t.name)
            .collect();
        assert_eq!(available, vec!["gst-launch-1.0", "mpv"]);
        assert!(report[4].hint.contains("ffmpeg"));
    }

    #[test]
    fn test_finds_shell_builtins_and_standard_tools() {
        assert!(SystemToolPresence.is_present("sh"));
        assert!(!SystemToolPresence.is_present("camstream-definitely-missing-tool"));
    }
}
