use camstream_capture::compile;
use camstream_launcher::{execute_plan, execute_player, DryRunLauncher, LaunchOutcome, Launcher};
use camstream_model::{validate_capture, validate_playback, RawCaptureOptions, RawPlaybackOptions};

#[tokio::test]
async fn v4l2_plan_runs_setup_before_pipeline() {
    let config = validate_capture(&RawCaptureOptions {
        driver: "v4l2".to_string(),
        device: "/dev/video2".to_string(),
        format: "mjpeg".to_string(),
        ..Default::default()
    })
    .unwrap();
    let plan = compile(&config).unwrap();
    let launcher = DryRunLauncher::new();

    let execution = execute_plan(&launcher, &plan).await.unwrap();

    assert_eq!(execution.outcome, LaunchOutcome::Exited(0));
    assert_eq!(execution.setup.len(), 6);
    assert_eq!(execution.failed_setup().count(), 0);

    let commands = launcher.commands();
    assert_eq!(commands.len(), 7);
    assert!(commands[..6]
        .iter()
        .all(|line| line.starts_with("v4l2-ctl -d /dev/video2 --set-ctrl=")));
    assert_eq!(commands[6], plan.pipeline().to_string());
}

#[tokio::test]
async fn pi_plan_skips_setup() {
    let plan = compile(&validate_capture(&RawCaptureOptions::default()).unwrap()).unwrap();
    let launcher = DryRunLauncher::new();

    let execution = execute_plan(&launcher, &plan).await.unwrap();

    assert!(execution.setup.is_empty());
    assert_eq!(launcher.commands().len(), 1);
    assert!(launcher.commands()[0].starts_with("libcamera-vid "));
}

#[tokio::test]
async fn player_runs_as_single_process() {
    let config = validate_playback(&RawPlaybackOptions {
        player: "mpv".to_string(),
        ..Default::default()
    })
    .unwrap();
    let compiled = camstream_playback::compile(&config, &|_: &str| true).unwrap();
    let launcher = DryRunLauncher::new();

    let outcome = execute_player(&launcher, &compiled).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(launcher.commands(), vec![compiled.invocation.to_string()]);
}

#[tokio::test]
async fn launcher_is_object_safe() {
    let launcher: Box<dyn Launcher> = Box::new(DryRunLauncher::new());
    let plan = compile(&validate_capture(&RawCaptureOptions::default()).unwrap()).unwrap();
    let execution = execute_plan(launcher.as_ref(), &plan).await.unwrap();
    assert_eq!(execution.outcome.exit_code(), 0);
}
