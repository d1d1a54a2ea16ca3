pub mod config;

pub use config::InputConfig;
