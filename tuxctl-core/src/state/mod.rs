//! Driver lifecycle
//!
//! The caller only ever observes `Uninitialized` or `Ready`; the other
//! states are passed through while the lock is held.

pub mod events;
pub mod machine;

pub use events::DriverEvent;
pub use machine::DriverState;
