//! Configuration loading for the screener.
//!
//! This module loads engine settings, the engine variable catalog and the
//! program parameters that calculators apply on top of engine output.
//!
//! # Example
//!
//! ```no_run
//! use eligibility_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/screener").unwrap();
//! println!("Simulating {}", config.engine().period);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineSettings, Parameters, PovertyGuideline, ScreenerConfig, VariableCatalog,
};
