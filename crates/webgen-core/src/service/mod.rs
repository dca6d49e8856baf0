//! Business logic services.
//!
//! Services depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod clock;
pub mod render;
pub mod website;
