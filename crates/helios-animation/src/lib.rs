//! The per-frame update: orbits, spins, dependent-entity tracking, and the
//! camera sweep, all advanced in a fixed order once per display refresh.

pub mod clock;
pub mod driver;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{AnimationDriver, FrameParams};
