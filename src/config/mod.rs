//! Configuration loading for the payroll engine.
//!
//! School profiles and seed data come from YAML files; process settings come
//! from the environment.
//!
//! # Example
//!
//! ```no_run
//! use bursar_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded {} schools", config.schools().len());
//! ```

mod loader;
mod server;
mod types;

pub use loader::ConfigLoader;
pub use server::ServerConfig;
pub use types::{SchoolProfile, SeedData};
