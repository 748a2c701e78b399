pub mod config;
pub mod link;
pub mod schedule;
pub mod types;

// Keep the public surface small and intentional.
pub use config::*;
pub use link::*;
pub use schedule::*;
pub use types::*;
