//! Window object: the host's animation-frame registry.

use std::collections::HashMap;

/// Callback invoked with a timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64) + Send>;

/// Browser window object.
///
/// Holds the native animation-frame queue; callbacks registered here run on
/// the host's next paint, driven by whoever owns the frame tick.
#[derive(Default)]
pub struct Window {
    animation_frames: HashMap<u32, FrameCallback>,
    next_frame_id: u32,
}

impl Window {
    pub fn new() -> Self {
        Self {
            animation_frames: HashMap::new(),
            next_frame_id: 1,
        }
    }

    /// Request an animation frame. Returns the cancel handle.
    pub fn request_animation_frame(&mut self, callback: FrameCallback) -> u32 {
        let id = self.next_frame_id;
        self.next_frame_id += 1;
        self.animation_frames.insert(id, callback);
        id
    }

    /// Cancel a previously requested animation frame.
    pub fn cancel_animation_frame(&mut self, id: u32) {
        self.animation_frames.remove(&id);
    }

    /// Take all pending callbacks, to be run with the current frame timestamp.
    pub fn drain_animation_frames(&mut self) -> Vec<FrameCallback> {
        self.animation_frames.drain().map(|(_, cb)| cb).collect()
    }

    pub fn pending_frames(&self) -> usize {
        self.animation_frames.len()
    }
}
