mod session;

use clap::Parser;
use gaze_camera::{CameraConfig, V4l2Camera};
use gaze_capture::{Recorder, RecorderConfig, extract_frames};
use gaze_model::{GazeJudgment, summarize};
use session::Session;
use std::time::Duration;

/// Record a short webcam clip and check where the gaze lands.
#[derive(Parser, Debug)]
#[command(name = "gaze-check", about = "Webcam gaze check client")]
struct Args {
    /// V4L2 device path.
    #[arg(long, default_value = "/dev/video0")]
    device: String,

    /// Suggested capture width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Suggested capture height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Recording duration in seconds.
    #[arg(long, default_value_t = 5)]
    duration: u64,

    /// Target number of sampled frames.
    #[arg(long, default_value_t = 8)]
    frames: usize,

    /// Analysis proxy base URL.
    #[arg(long, default_value = "http://127.0.0.1:8090")]
    proxy: String,
}

#[tokio::main]
async fn main() {
    gaze_base::init_stdout_logger();
    let args = Args::parse();
    let http = reqwest::Client::new();
    let mut session = Session::new();

    loop {
        session.reset();
        if let Err(e) = run_attempt(&args, &http, &mut session).await {
            log::error!("{e}");
        }
        if !ask_retake() {
            break;
        }
    }
}

async fn run_attempt(
    args: &Args,
    http: &reqwest::Client,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    let camera_config = CameraConfig::default()
        .with_device(args.device.clone())
        .with_width(args.width)
        .with_height(args.height);
    let camera = V4l2Camera::new(camera_config)
        .map_err(|e| format!("camera unavailable ({}): {e}", args.device))?;

    let recorder = Recorder::new(
        RecorderConfig::default()
            .with_duration(Duration::from_secs(args.duration))
            .with_target_frames(args.frames),
    );

    // Ctrl-C aborts the attempt; the recorder releases the camera on its way out
    let cancel = recorder.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let mut countdown = recorder.countdown();
    let printer = tokio::spawn(async move {
        println!("Recording... {}s", *countdown.borrow());
        while countdown.changed().await.is_ok() {
            let remaining = *countdown.borrow();
            if remaining > 0 {
                println!("Recording... {remaining}s");
            }
        }
    });

    let outcome = recorder.record(camera).await;
    printer.abort();
    let outcome = outcome?;

    session.frames = outcome.frames;
    session.recording = outcome.recording;

    // Top up from the clip when live sampling under-delivered
    if session.frames.len() < args.frames && !session.recording.is_empty() {
        log::info!(
            "sampled {} of {} frames; extracting from the clip",
            session.frames.len(),
            args.frames
        );
        session.frames = extract_frames(&session.recording, args.frames)?;
    }
    if session.frames.is_empty() {
        return Err("no frames captured".into());
    }

    println!("Analyzing {} frames...", session.frames.len());
    let frames: Vec<String> = session.frames.iter().map(|f| f.to_data_uri()).collect();
    let response = http
        .post(format!("{}/api/analyze", args.proxy))
        .json(&serde_json::json!({ "frames": frames }))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body["error"].as_str().unwrap_or("unknown error");
        return Err(format!("analysis failed ({status}): {message}").into());
    }

    session.results = response.json::<Vec<GazeJudgment>>().await?;
    render(&session.results);
    Ok(())
}

fn render(results: &[GazeJudgment]) {
    for judgment in results {
        let direction = if judgment.gaze { "on-screen" } else { "off-screen" };
        let eyes = if judgment.eyes_closed {
            "  (eyes closed)"
        } else {
            ""
        };
        println!(
            "Frame {:>2}  {:<10}  {:>5.1}%{}",
            judgment.frame, direction, judgment.confidence, eyes
        );
    }

    let summary = summarize(results);
    println!(
        "Summary: {} on-screen / {} off-screen of {} frames",
        summary.on_screen,
        summary.off_screen,
        summary.total()
    );
}

fn ask_retake() -> bool {
    println!("Press r + Enter to retake, anything else to quit.");
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    line.trim().eq_ignore_ascii_case("r")
}
