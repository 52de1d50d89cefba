use gaze_model::{GazeJudgment, summarize};

#[test]
fn test_parse_full_judgment() {
    let json = r#"{"frame": 2, "gaze": true, "eyesClosed": false, "confidence": 87.5}"#;
    let judgment: GazeJudgment = serde_json::from_str(json).expect("parse failed");

    assert_eq!(judgment.frame, 2);
    assert!(judgment.gaze);
    assert!(!judgment.eyes_closed);
    assert_eq!(judgment.confidence, 87.5);
}

#[test]
fn test_eyes_closed_defaults_to_false() {
    // Older payloads omit the field entirely
    let json = r#"{"frame": 1, "gaze": false, "confidence": 60}"#;
    let judgment: GazeJudgment = serde_json::from_str(json).expect("parse failed");

    assert!(!judgment.eyes_closed);
}

#[test]
fn test_serializes_camel_case() {
    let judgment = GazeJudgment {
        frame: 3,
        gaze: false,
        eyes_closed: true,
        confidence: 42.0,
    };

    let json = serde_json::to_string(&judgment).expect("serialize failed");
    assert!(json.contains("\"eyesClosed\":true"));
    assert!(!json.contains("eyes_closed"));
}

#[test]
fn test_parse_judgment_list() {
    let json = r#"[
        {"frame": 1, "gaze": true, "confidence": 90},
        {"frame": 2, "gaze": false, "eyesClosed": true, "confidence": 75}
    ]"#;
    let judgments: Vec<GazeJudgment> = serde_json::from_str(json).expect("parse failed");

    assert_eq!(judgments.len(), 2);
    assert!(judgments[1].eyes_closed);
}

#[test]
fn test_summarize_counts() {
    let judgments = vec![
        GazeJudgment { frame: 1, gaze: true, eyes_closed: false, confidence: 90.0 },
        GazeJudgment { frame: 2, gaze: false, eyes_closed: true, confidence: 80.0 },
        GazeJudgment { frame: 3, gaze: true, eyes_closed: false, confidence: 70.0 },
    ];

    let summary = summarize(&judgments);
    assert_eq!(summary.on_screen, 2);
    assert_eq!(summary.off_screen, 1);
    assert_eq!(summary.total(), 3);
}

#[test]
fn test_summarize_empty() {
    let summary = summarize(&[]);
    assert_eq!(summary.total(), 0);
}
