//! Animation-frame scheduling: the native window queue, with a fixed-rate
//! timer shim as fallback.

use dom::{FrameCallback, Window};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Tick interval of the timer shim: a fixed 60 fps.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(1_000_000 / 60);

/// Cancel handle returned by [`FrameSource::request`].
pub type FrameHandle = u32;

/// A source of repaint callbacks. `request` schedules a callback for the
/// next frame and returns the handle `cancel` accepts; that handle is the
/// only cancellation support there is.
pub trait FrameSource: Send + Sync {
    fn request(&self, callback: FrameCallback) -> FrameHandle;
    fn cancel(&self, handle: FrameHandle);
}

/// The native path: callbacks land in the window's animation-frame queue
/// and run when the host drains it for the next paint.
pub struct WindowFrames {
    window: Arc<Mutex<Window>>,
}

impl WindowFrames {
    pub fn new(window: Arc<Mutex<Window>>) -> Self {
        Self { window }
    }
}

impl FrameSource for WindowFrames {
    fn request(&self, callback: FrameCallback) -> FrameHandle {
        self.window.lock().request_animation_frame(callback)
    }

    fn cancel(&self, handle: FrameHandle) {
        self.window.lock().cancel_animation_frame(handle);
    }
}

/// The shim: each requested frame fires from a one-shot timer after
/// [`FRAME_INTERVAL`]. Must be constructed inside a tokio runtime.
pub struct TimerFrames {
    tasks: Arc<Mutex<HashMap<FrameHandle, tokio::task::JoinHandle<()>>>>,
    next_id: AtomicU32,
    epoch: Instant,
}

impl TimerFrames {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU32::new(1),
            epoch: Instant::now(),
        }
    }
}

impl Default for TimerFrames {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for TimerFrames {
    fn request(&self, callback: FrameCallback) -> FrameHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tasks = self.tasks.clone();
        let epoch = self.epoch;

        let task = tokio::spawn(async move {
            tokio::time::sleep(FRAME_INTERVAL).await;
            tasks.lock().remove(&id);
            let timestamp = epoch.elapsed().as_secs_f64() * 1000.0;
            callback(timestamp);
        });

        self.tasks.lock().insert(id, task);
        id
    }

    fn cancel(&self, handle: FrameHandle) {
        if let Some(task) = self.tasks.lock().remove(&handle) {
            task.abort();
        }
    }
}

/// The scheduling pair behind a single front: prefers the window's native
/// queue, falls back to the timer shim when no window is present.
pub struct FrameScheduler {
    source: Box<dyn FrameSource>,
}

impl FrameScheduler {
    pub fn detect(window: Option<Arc<Mutex<Window>>>) -> Self {
        let source: Box<dyn FrameSource> = match window {
            Some(window) => Box::new(WindowFrames::new(window)),
            None => Box::new(TimerFrames::new()),
        };
        Self { source }
    }

    /// Run `callback` on the next repaint. Returns the cancel handle.
    pub fn next_frame(&self, callback: FrameCallback) -> FrameHandle {
        self.source.request(callback)
    }

    pub fn cancel_frame(&self, handle: FrameHandle) {
        self.source.cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_source_lands_in_queue() {
        let window = Arc::new(Mutex::new(Window::new()));
        let frames = WindowFrames::new(window.clone());

        let handle = frames.request(Box::new(|_| {}));
        assert_eq!(window.lock().pending_frames(), 1);

        frames.cancel(handle);
        assert_eq!(window.lock().pending_frames(), 0);
    }

    #[test]
    fn test_scheduler_prefers_window() {
        let window = Arc::new(Mutex::new(Window::new()));
        let scheduler = FrameScheduler::detect(Some(window.clone()));

        scheduler.next_frame(Box::new(|_| {}));
        assert_eq!(window.lock().pending_frames(), 1);
    }

    #[tokio::test]
    async fn test_timer_shim_fires() {
        let frames = TimerFrames::new();
        let (tx, rx) = tokio::sync::oneshot::channel();

        frames.request(Box::new(move |timestamp| {
            let _ = tx.send(timestamp);
        }));

        let timestamp = tokio::time::timeout(Duration::from_secs(1), rx)
            .await
            .expect("frame did not fire")
            .expect("callback dropped");
        assert!(timestamp >= 0.0);
    }

    #[tokio::test]
    async fn test_timer_shim_cancel() {
        let frames = TimerFrames::new();
        let (tx, mut rx) = tokio::sync::oneshot::channel::<()>();

        let handle = frames.request(Box::new(move |_| {
            let _ = tx.send(());
        }));
        frames.cancel(handle);

        tokio::time::sleep(FRAME_INTERVAL * 5).await;
        assert!(rx.try_recv().is_err());
    }
}
