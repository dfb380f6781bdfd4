//! Platform trait implementations
//!
//! Re-exports the time abstraction from `quadfc_core` together with the
//! Embassy-backed implementation used on target.

pub mod time;

#[cfg(feature = "embassy")]
pub use time::EmbassyTime;
pub use time::{MockDelay, MockTime, TimeSource};
