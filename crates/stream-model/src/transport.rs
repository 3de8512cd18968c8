//! Network transport addressing shared by capture and playback.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::OptionDomain;

/// How a compiled stream is delivered over the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetMode {
    /// The capture pipeline runs a TCP server; one client is fully served.
    Tcp,
    /// Datagrams are sent to a known receiver; no delivery or order guarantee.
    Udp,
    /// The capture pipeline pushes to an already-running RTSP server.
    Rtsp,
}

impl NetMode {
    pub fn as_str(self) -> &'static str {
        match self {
            NetMode::Tcp => "tcp",
            NetMode::Udp => "udp",
            NetMode::Rtsp => "rtsp",
        }
    }
}

impl OptionDomain for NetMode {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("tcp", NetMode::Tcp),
        ("udp", NetMode::Udp),
        ("rtsp", NetMode::Rtsp),
    ];
}

impl fmt::Display for NetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how a stream travels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    pub net_mode: NetMode,

    /// TCP bind address, UDP destination, or RTSP server host.
    pub address: String,

    pub port: u16,

    /// Stream path on the RTSP server. Ignored for tcp and udp.
    pub rtsp_key: String,
}

impl TransportConfig {
    /// Stream URL for this transport: `tcp://host:port`, `udp://host:port`,
    /// or `rtsp://host:port/key`.
    pub fn url(&self) -> String {
        match self.net_mode {
            NetMode::Tcp => format!("tcp://{}:{}", self.address, self.port),
            NetMode::Udp => format!("udp://{}:{}", self.address, self.port),
            NetMode::Rtsp => self.rtsp_url(),
        }
    }

    /// RTSP location regardless of the configured mode.
    pub fn rtsp_url(&self) -> String {
        format!("rtsp://{}:{}/{}", self.address, self.port, self.rtsp_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(net_mode: NetMode, address: &str, port: u16, key: &str) -> TransportConfig {
        TransportConfig {
            net_mode,
            address: address.to_string(),
            port,
            rtsp_key: key.to_string(),
        }
    }

    #[test]
    fn test_url_per_net_mode() {
        assert_eq!(transport(NetMode::Tcp, "h", 5008, "").url(), "tcp://h:5008");
        assert_eq!(transport(NetMode::Udp, "h", 9000, "").url(), "udp://h:9000");
        assert_eq!(
            transport(NetMode::Rtsp, "h", 8554, "stream").url(),
            "rtsp://h:8554/stream"
        );
    }

    #[test]
    fn test_rtsp_key_ignored_outside_rtsp() {
        assert_eq!(
            transport(NetMode::Tcp, "10.0.0.2", 5008, "cam").url(),
            "tcp://10.0.0.2:5008"
        );
    }

    #[test]
    fn test_net_mode_names_are_case_insensitive() {
        assert_eq!(NetMode::from_name("RTSP"), Some(NetMode::Rtsp));
        assert_eq!(NetMode::from_name(" udp "), Some(NetMode::Udp));
        assert_eq!(NetMode::from_name("http"), None);
        assert_eq!(NetMode::allowed(), "tcp, udp, rtsp");
    }
}
