//! Shared constants.

/// Environment variable overriding the global configuration path.
pub const CONFIG_ENV_VAR: &str = "LAZYREACTOR_CONFIG";

/// Name of the per-user configuration directory on Unix-like systems.
pub const CONFIG_DIR_NAME: &str = ".lazyreactor";

/// Name of the configuration directory below the local data directory on Windows.
pub const WINDOWS_CONFIG_DIR_NAME: &str = "lazyreactor";

/// File name of the global configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
