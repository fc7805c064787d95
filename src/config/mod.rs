//! Configuration module.
//!
//! Settings are resolved in four layers, each overriding the previous:
//! built-in defaults, the TOML config file, environment variables and
//! command-line flags. See [`loader`] for the individual steps.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ConfigError, ConfigFile, ResolvedConfig,
};
