use gaze_base::logging;
use log::LevelFilter;

#[test]
fn test_timestamp_structure() {
    let ts = logging::timestamp();
    // YYYY-MM-DDTHH:MM:SS.mmmZ
    assert_eq!(ts.len(), 24);
    assert_eq!(&ts[4..5], "-");
    assert_eq!(&ts[7..8], "-");
    assert_eq!(&ts[10..11], "T");
    assert_eq!(&ts[13..14], ":");
    assert_eq!(&ts[16..17], ":");
    assert_eq!(&ts[19..20], ".");
    assert!(ts.ends_with('Z'));
}

#[test]
fn test_parse_level_known_values() {
    assert_eq!(logging::parse_level("off"), LevelFilter::Off);
    assert_eq!(logging::parse_level("error"), LevelFilter::Error);
    assert_eq!(logging::parse_level("warn"), LevelFilter::Warn);
    assert_eq!(logging::parse_level("info"), LevelFilter::Info);
    assert_eq!(logging::parse_level("debug"), LevelFilter::Debug);
    assert_eq!(logging::parse_level("trace"), LevelFilter::Trace);
}

#[test]
fn test_parse_level_is_case_insensitive() {
    assert_eq!(logging::parse_level("DEBUG"), LevelFilter::Debug);
    assert_eq!(logging::parse_level("Warn"), LevelFilter::Warn);
}

#[test]
fn test_parse_level_unknown_falls_back_to_info() {
    assert_eq!(logging::parse_level("verbose"), LevelFilter::Info);
    assert_eq!(logging::parse_level(""), LevelFilter::Info);
}

#[test]
fn test_init_is_idempotent() {
    logging::init_stdout_logger();
    // Second call must not panic
    logging::init_stdout_logger();
    log::info!("logger initialized twice without panicking");
}
