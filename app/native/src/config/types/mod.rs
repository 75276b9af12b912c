//! Configuration types.

mod restore;
mod root;
mod wait;

pub use restore::RestoreConfig;
pub use root::{ConfigError, IconStashConfig, config_paths, load_config, load_config_from_path};
pub use wait::WaitConfig;
