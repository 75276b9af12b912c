//! User configuration.
//!
//! IconStash runs without any configuration file. When one exists it is read
//! once at startup from the first location returned by [`config_paths`].

pub mod types;

pub use types::{
    ConfigError, IconStashConfig, RestoreConfig, WaitConfig, config_paths, load_config,
    load_config_from_path,
};
