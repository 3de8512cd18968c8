//! Transport-sink stage builder.

use camstream_model::{NetMode, TransportConfig, VideoFormat};

use crate::plan::{Element, PipelineStage, StageKind};

/// Build the sink for a transport. Depends only on the net mode (and, for
/// rtsp, the format's parser).
///
/// - tcp: the pipeline itself listens on `address:port`. `tcpserversink`
///   tears down after its first client, which is a known limitation.
/// - udp: fire-and-forget datagrams to `address:port`.
/// - rtsp: parse, then push to an existing server at
///   `rtsp://address:port/key`. The only mode where the pipeline is a client.
pub fn build_sink(transport: &TransportConfig, format: VideoFormat) -> PipelineStage {
    let elements = match transport.net_mode {
        NetMode::Tcp => vec![Element::new("tcpserversink")
            .property("host", &transport.address)
            .property("port", transport.port)],
        NetMode::Udp => vec![Element::new("udpsink")
            .property("host", &transport.address)
            .property("port", transport.port)],
        NetMode::Rtsp => {
            let parser = match format {
                VideoFormat::H264 => "h264parse",
                VideoFormat::Mjpeg => "jpegparse",
            };
            vec![
                Element::new(parser),
                Element::new("rtspclientsink")
                    .property("name", "s")
                    .property("location", transport.rtsp_url()),
            ]
        }
    };
    PipelineStage::elements(StageKind::TransportSink, elements)
}
