use gaze_capture::Frame;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_frame_data_uri() {
    let jpeg = Arc::new(vec![0xFFu8, 0xD8, 0xFF, 0xD9]);
    let frame = Frame::new(1, Duration::from_millis(250), jpeg.clone());

    let uri = frame.to_data_uri();
    assert!(uri.starts_with("data:image/jpeg;base64,"));

    let (mime, decoded) = gaze_base::data_uri::parse(&uri).expect("parse failed");
    assert_eq!(mime, "image/jpeg");
    assert_eq!(&decoded, jpeg.as_ref());
}

#[test]
fn test_frame_clone_shares_bytes() {
    let jpeg = Arc::new(vec![0u8; 1024]);
    let frame = Frame::new(3, Duration::ZERO, jpeg);
    let copy = frame.clone();

    assert_eq!(copy.index, 3);
    assert!(Arc::ptr_eq(&frame.jpeg, &copy.jpeg));
}
