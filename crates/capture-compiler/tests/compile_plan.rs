use camstream_capture::{compile, DerivedGain, StageKind, MAX_ANALOG_GAIN};
use camstream_common::error::CamstreamError;
use camstream_model::{validate_capture, CaptureConfig, RawCaptureOptions};
use proptest::prelude::*;

fn config(raw: RawCaptureOptions) -> CaptureConfig {
    validate_capture(&raw).expect("test options should validate")
}

fn v4l2(format: &str, encoder: Option<&str>) -> RawCaptureOptions {
    RawCaptureOptions {
        driver: "v4l2".to_string(),
        device: "/dev/video0".to_string(),
        format: format.to_string(),
        h264_encoder: encoder.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn libcamera_default_plan() {
    let plan = compile(&config(RawCaptureOptions::default())).unwrap();

    assert!(plan.setup().is_empty());
    assert_eq!(
        plan.stage_kinds(),
        vec![StageKind::Source, StageKind::TransportSink]
    );
    assert_eq!(
        plan.pipeline().to_string(),
        "libcamera-vid -t 0 --inline --width 640 --height 480 --framerate 30 \
         --codec h264 --bitrate 2048000 --profile baseline --quality 50 \
         --rotation 0 --gain 10.0 -n -o - \
         | gst-launch-1.0 --no-fault fdsrc fd=0 ! tcpserversink host=0.0.0.0 port=5008"
    );
}

#[test]
fn libcamera_uses_raw_gain_and_flips() {
    let plan = compile(&config(RawCaptureOptions {
        gain: 40.0,
        vflip: true,
        hflip: true,
        rotate: 180,
        ..Default::default()
    }))
    .unwrap();

    let source = &plan.pipeline().processes()[0];
    assert_eq!(source.program, "libcamera-vid");
    assert_eq!(source.value_of("--gain"), Some("40.0"));
    assert_eq!(source.value_of("--rotation"), Some("180"));
    assert!(source.has_arg("--vflip"));
    assert!(source.has_arg("--hflip"));
    assert!(!source.has_arg("--analoggain"));
}

#[test]
fn libcamera_accepts_rotation_it_cannot_honour() {
    let plan = compile(&config(RawCaptureOptions {
        rotate: 90,
        ..Default::default()
    }))
    .unwrap();
    assert_eq!(plan.pipeline().processes()[0].value_of("--rotation"), Some("90"));
}

#[test]
fn raspicam_splits_gain_and_uppercases_codec() {
    let plan = compile(&config(RawCaptureOptions {
        driver: "raspicam".to_string(),
        format: "mjpeg".to_string(),
        gain: 30.0,
        vflip: true,
        net_mode: "udp".to_string(),
        address: "10.0.0.5".to_string(),
        port: 9000,
        ..Default::default()
    }))
    .unwrap();

    assert!(plan.setup().is_empty());
    assert_eq!(
        plan.pipeline().to_string(),
        "raspivid -t 0 --inline --width 640 --height 480 --framerate 30 \
         --codec MJPEG --bitrate 2048000 --profile baseline --vflip \
         --rotation 0 --drc off --digitalgain 2.0 --analoggain 15.0 -n -o - \
         | gst-launch-1.0 --no-fault fdsrc fd=0 ! udpsink host=10.0.0.5 port=9000"
    );
}

#[test]
fn raspicam_ignores_quality() {
    let low = compile(&config(RawCaptureOptions {
        driver: "raspicam".to_string(),
        format: "mjpeg".to_string(),
        quality: 5,
        ..Default::default()
    }))
    .unwrap();
    let high = compile(&config(RawCaptureOptions {
        driver: "raspicam".to_string(),
        format: "mjpeg".to_string(),
        quality: 95,
        ..Default::default()
    }))
    .unwrap();

    assert!(!low.pipeline().processes()[0].has_arg("--quality"));
    assert_eq!(low.pipeline(), high.pipeline());
}

#[test]
fn v4l2_libx264_rtsp_plan() {
    let plan = compile(&config(RawCaptureOptions {
        io_mode: "dmabuf".to_string(),
        convert: true,
        hflip: true,
        rotate: 180,
        gain: 20.0,
        bitrate: 1_500_000,
        profile: "main".to_string(),
        net_mode: "rtsp".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8554,
        rtsp_key: "cam".to_string(),
        ..v4l2("h264", Some("libx264"))
    }))
    .unwrap();

    let setup: Vec<String> = plan
        .setup_invocations()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        setup,
        vec![
            "v4l2-ctl -d /dev/video0 --set-ctrl=rotate=180",
            "v4l2-ctl -d /dev/video0 --set-ctrl=horizontal_flip=1",
            "v4l2-ctl -d /dev/video0 --set-ctrl=vertical_flip=0",
            "v4l2-ctl -d /dev/video0 --set-ctrl=analogue_gain=15.0",
            "v4l2-ctl -d /dev/video0 --set-ctrl=digital_gain=1.3333333333333333",
            "v4l2-ctl -d /dev/video0 --set-ctrl=gain=20.0",
        ]
    );

    assert_eq!(plan.pipeline().len(), 1);
    assert_eq!(
        plan.pipeline().to_string(),
        "gst-launch-1.0 --no-fault v4l2src device=/dev/video0 io-mode=dmabuf \
         ! video/x-raw,width=640,height=480,framerate=30/1 ! videoconvert \
         ! x264enc tune=zerolatency speed-preset=ultrafast bitrate=1500 \
         ! video/x-h264,profile=main \
         ! h264parse config-interval=-1 ! video/x-h264,stream-format=byte-stream,alignment=au \
         ! h264parse ! rtspclientsink name=s location=rtsp://127.0.0.1:8554/cam"
    );
    assert_eq!(
        plan.stage_kinds(),
        vec![
            StageKind::DeviceControl,
            StageKind::DeviceControl,
            StageKind::DeviceControl,
            StageKind::DeviceControl,
            StageKind::DeviceControl,
            StageKind::DeviceControl,
            StageKind::Source,
            StageKind::Encode,
            StageKind::Encode,
            StageKind::TransportSink
        ]
    );
}

#[test]
fn v4l2_without_convert_uses_identity() {
    let plan = compile(&config(v4l2("mjpeg", None))).unwrap();
    let source = &plan.stages()[0];
    assert_eq!(
        source.factories(),
        vec![
            "v4l2src",
            "video/x-raw,width=640,height=480,framerate=30/1",
            "identity"
        ]
    );
}

#[test]
fn v4l2_mjpeg_uses_quality_and_needs_no_encoder() {
    let plan = compile(&config(RawCaptureOptions {
        quality: 80,
        ..v4l2("mjpeg", None)
    }))
    .unwrap();

    let encode = &plan.stages()[1];
    assert_eq!(encode.kind, StageKind::Encode);
    assert_eq!(encode.factories(), vec!["jpegenc"]);
    assert_eq!(encode.element("jpegenc").unwrap().get("quality"), Some("80"));
    assert_eq!(plan.stages().len(), 3);
}

#[test]
fn v4l2_libav_omx_encoder() {
    let plan = compile(&config(v4l2("h264", Some("libav-omx")))).unwrap();
    let encoder = plan.stages()[1].element("avenc_h264_omx").unwrap();
    assert_eq!(encoder.get("bitrate"), Some("2048000"));
    assert_eq!(encoder.get("profile"), Some("baseline"));
    assert_eq!(
        plan.stages()[2].factories(),
        vec!["h264parse", "video/x-h264,stream-format=byte-stream,alignment=au"]
    );
}

#[test]
fn v4l2_omx_encoder() {
    let plan = compile(&config(RawCaptureOptions {
        profile: "high".to_string(),
        ..v4l2("h264", Some("omx"))
    }))
    .unwrap();
    let stage = &plan.stages()[1];
    assert_eq!(
        stage.factories(),
        vec!["omxh264enc", "video/x-h264,profile=high"]
    );
    let encoder = stage.element("omxh264enc").unwrap();
    assert_eq!(encoder.get("target-bitrate"), Some("2048000"));
    assert_eq!(encoder.get("control-rate"), Some("variable"));
    assert_eq!(
        plan.stages()[2].element("h264parse").unwrap().get("config-interval"),
        Some("-1")
    );
}

#[test]
fn v4l2_h264_without_encoder_is_unsupported() {
    let err = compile(&config(v4l2("h264", None))).unwrap_err();
    assert!(matches!(err, CamstreamError::UnsupportedCombination { .. }));
}

#[test]
fn encoder_is_ignored_outside_v4l2() {
    let with = compile(&config(RawCaptureOptions {
        h264_encoder: Some("omx".to_string()),
        ..Default::default()
    }))
    .unwrap();
    let without = compile(&config(RawCaptureOptions {
        h264_encoder: None,
        ..Default::default()
    }))
    .unwrap();
    assert_eq!(with.pipeline(), without.pipeline());
}

#[test]
fn plan_serializes_for_dry_runs() {
    let plan = compile(&config(v4l2("mjpeg", None))).unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["setup"].as_array().unwrap().len(), 6);
    assert_eq!(json["stages"][0]["kind"], "source");
    assert_eq!(json["pipeline"][0]["program"], "gst-launch-1.0");
}

fn driver_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("libcamera"), Just("raspicam"), Just("v4l2")]
}

fn format_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("h264".to_string()),
        Just("H264".to_string()),
        Just("mjpeg".to_string()),
        Just("MJpeg".to_string()),
    ]
}

proptest! {
    #[test]
    fn gain_split_invariants(gain in 0.001f64..500.0) {
        let split = DerivedGain::split(gain);
        prop_assert!(split.analog <= MAX_ANALOG_GAIN);
        prop_assert_eq!(split.analog, gain.min(MAX_ANALOG_GAIN));
        prop_assert!((split.combined() - gain).abs() <= gain * 1e-12);
        if gain <= MAX_ANALOG_GAIN {
            prop_assert_eq!(split.digital, 1.0);
        }
    }

    #[test]
    fn pi_drivers_emit_one_pipeline_and_no_setup(
        driver in prop_oneof![Just("libcamera"), Just("raspicam")],
        format in format_strategy(),
        net_mode in prop_oneof![Just("tcp"), Just("udp"), Just("rtsp")],
    ) {
        let plan = compile(&config(RawCaptureOptions {
            driver: driver.to_string(),
            format,
            net_mode: net_mode.to_string(),
            ..Default::default()
        })).unwrap();
        prop_assert!(plan.setup().is_empty());
        prop_assert!(!plan.stage_kinds().contains(&StageKind::DeviceControl));
        prop_assert_eq!(plan.pipeline().len(), 2);
    }

    #[test]
    fn raspicam_codec_token_is_uppercase(format in format_strategy()) {
        let plan = compile(&config(RawCaptureOptions {
            driver: "raspicam".to_string(),
            format: format.clone(),
            ..Default::default()
        })).unwrap();
        let codec = plan.pipeline().processes()[0].value_of("--codec").unwrap().to_string();
        prop_assert_eq!(codec.clone(), format.to_uppercase());
        prop_assert_eq!(codec.clone(), codec.to_uppercase());
    }

    #[test]
    fn sink_is_last_stage_for_every_driver(
        driver in driver_strategy(),
        format in format_strategy(),
        net_mode in prop_oneof![Just("tcp"), Just("udp"), Just("rtsp")],
    ) {
        let plan = compile(&config(RawCaptureOptions {
            format,
            net_mode: net_mode.to_string(),
            ..v4l2("h264", Some("libx264"))
        }.with_driver(driver))).unwrap();
        let last = plan.stages().last().unwrap();
        prop_assert_eq!(last.kind, StageKind::TransportSink);
        let expected_sink = match net_mode {
            "tcp" => "tcpserversink",
            "udp" => "udpsink",
            _ => "rtspclientsink",
        };
        prop_assert!(last.element(expected_sink).is_some());
    }
}

trait WithDriver {
    fn with_driver(self, driver: &str) -> Self;
}

impl WithDriver for RawCaptureOptions {
    fn with_driver(mut self, driver: &str) -> Self {
        self.driver = driver.to_string();
        self
    }
}
