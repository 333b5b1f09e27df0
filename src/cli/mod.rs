//! CLI command handling

pub mod monitor;
pub mod route;
pub mod sample;
pub mod setup;

pub use monitor::*;
pub use route::*;
pub use sample::*;
pub use setup::*;
