//! The host render loop: a registry of per-refresh callbacks driven with the
//! measured frame time.

use std::time::Instant;

use tracing::warn;

/// Longest frame time handed to callbacks. A stall beyond this (a debugger
/// pause, a suspended laptop) is treated as a slow frame, not a time jump.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Identifies a registered callback for [`FrameHost::deregister`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// A per-refresh callback. Receives the host's target and the frame time in
/// seconds.
pub type FrameCallback<T> = Box<dyn FnMut(&mut T, f32)>;

/// Calls every registered callback once per frame, in registration order.
pub struct FrameHost<T> {
    previous_time: Instant,
    callbacks: Vec<(CallbackId, FrameCallback<T>)>,
    next_id: u64,
    frame_count: u64,
}

impl<T> FrameHost<T> {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            callbacks: Vec::new(),
            next_id: 0,
            frame_count: 0,
        }
    }

    pub fn register(&mut self, callback: impl FnMut(&mut T, f32) + 'static) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn deregister(&mut self, id: CallbackId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cid, _)| *cid != id);
        self.callbacks.len() != before
    }

    /// Measure the time since the previous frame and run one frame with it.
    /// Returns the frame time actually passed on.
    pub fn run_frame(&mut self, target: &mut T) -> f32 {
        let current_time = Instant::now();
        let mut frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }
        self.dispatch(frame_time as f32, target);
        frame_time as f32
    }

    /// Run one frame with an explicit frame time, clamped like
    /// [`run_frame`](Self::run_frame).
    pub fn run_frame_with(&mut self, frame_time: f64, target: &mut T) -> f32 {
        let clamped = frame_time.clamp(0.0, MAX_FRAME_TIME) as f32;
        self.dispatch(clamped, target);
        clamped
    }

    fn dispatch(&mut self, dt: f32, target: &mut T) {
        for (_, callback) in &mut self.callbacks {
            callback(target, dt);
        }
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }
}

impl<T> Default for FrameHost<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callbacks_receive_frame_time() {
        let mut host: FrameHost<Vec<f32>> = FrameHost::new();
        host.register(|seen, dt| seen.push(dt));
        let mut seen = Vec::new();
        host.run_frame_with(0.016, &mut seen);
        host.run_frame_with(0.020, &mut seen);
        assert_eq!(seen.len(), 2);
        assert!((seen[0] - 0.016).abs() < 1e-6);
        assert_eq!(host.frame_count(), 2);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut host: FrameHost<f32> = FrameHost::new();
        host.register(|last, dt| *last = dt);
        let mut last = 0.0;
        let passed = host.run_frame_with(1.0, &mut last);
        assert_eq!(passed, MAX_FRAME_TIME as f32);
        assert_eq!(last, MAX_FRAME_TIME as f32);
    }

    #[test]
    fn test_deregister_stops_callback() {
        let mut host: FrameHost<u32> = FrameHost::new();
        let id = host.register(|count, _| *count += 1);
        host.register(|count, _| *count += 10);
        let mut count = 0;
        host.run_frame_with(0.01, &mut count);
        assert!(host.deregister(id));
        assert!(!host.deregister(id));
        host.run_frame_with(0.01, &mut count);
        assert_eq!(count, 21);
        assert_eq!(host.callback_count(), 1);
    }

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let mut host: FrameHost<Vec<u8>> = FrameHost::new();
        host.register(|order, _| order.push(1));
        host.register(|order, _| order.push(2));
        let mut order = Vec::new();
        host.run_frame_with(0.0, &mut order);
        assert_eq!(order, [1, 2]);
    }

    #[test]
    fn test_measured_frame_is_bounded() {
        let mut host: FrameHost<()> = FrameHost::default();
        let dt = host.run_frame(&mut ());
        assert!((0.0..=MAX_FRAME_TIME as f32).contains(&dt));
    }
}
