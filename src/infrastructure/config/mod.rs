//! Infrastructure configuration modules.

pub mod logging;
pub mod monitor;
pub mod settings;

pub use settings::Config;
