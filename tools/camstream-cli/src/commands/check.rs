//! Check which external tools are installed.

use camstream_launcher::{check_tools, SystemToolPresence, ToolRole};

pub fn run() -> anyhow::Result<i32> {
    println!("camstream System Check");
    println!("{}", "=".repeat(50));

    let tools = check_tools(&SystemToolPresence);
    for tool in &tools {
        let status = if tool.available { "[OK]" } else { "[MISSING]" };
        println!("  {status} {} ({})", tool.name, tool.role.label());
        if !tool.available {
            println!("    Fix: {}", tool.hint);
        }
    }

    let has = |role: ToolRole| tools.iter().any(|t| t.role == role && t.available);
    let pipeline = has(ToolRole::Pipeline);

    println!();
    if pipeline && has(ToolRole::CameraSource) {
        println!("Capture: ready (libcamera/raspicam).");
    } else if pipeline {
        println!("Capture: v4l2 only, no Raspberry Pi camera tool found.");
    } else {
        println!("Capture: unavailable, gst-launch-1.0 is missing.");
    }
    if has(ToolRole::Player) {
        println!("Playback: ready.");
    } else {
        println!("Playback: unavailable, no player found.");
    }

    Ok(0)
}
