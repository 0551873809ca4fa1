//! Outbound ports: what the core needs from the outside world.

pub mod candidate;
pub mod clock;
pub mod events;
pub mod sink;
pub mod store;
