pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{AdminLogin, CliConfig, Command, FarmerLogin};
pub use toml_config::TomlConfig;
