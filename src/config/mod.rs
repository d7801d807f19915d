//! Configuration module.
//!
//! Row heights, column widths, the day-boundary offset and the log file
//! path, resolved from defaults, a TOML file, environment and CLI flags.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};
