/// System instruction sent with every analysis request.
pub const SYSTEM_INSTRUCTION: &str = "You are a precise visual attention classifier. \
You judge webcam stills and answer only in the requested JSON shape.";

/// Build the instruction block for a batch of `frame_count` frames.
///
/// The images follow this text in the request, each preceded by its
/// 1-indexed label ("Frame 1" .. "Frame N").
pub fn build_prompt(frame_count: usize) -> String {
    format!(
        "You are shown {frame_count} webcam frames of the same person, labeled Frame 1 \
         through Frame {frame_count}. For each frame, judge whether the person's gaze is \
         directed at the camera or screen.\n\
         Count gaze aimed slightly below the camera as on-screen: front cameras are \
         usually mounted above the screen, so a person reading the screen appears to \
         look a little below the lens.\n\
         Judge the gaze as off-screen when it is clearly directed elsewhere (far left, \
         right, up, or away from the device).\n\
         If the eyes are closed or no face is visible, judge the frame as off-screen \
         and set eyesClosed to true when the eyes are closed.\n\
         Report a confidence between 0 and 100 for every frame, and answer for every \
         frame in order."
    )
}

/// Label attached before the image with the given 1-indexed position.
pub fn frame_label(index: usize) -> String {
    format!("Frame {index}")
}
