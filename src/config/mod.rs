mod core;
mod loader;

pub use self::core::{
    GateConfig, ShortPathPolicy, DEFAULT_DIFF_COMMAND, DEFAULT_MIN_PATH_SEGMENTS, DEFAULT_SHELL,
    DEFAULT_SOURCE_EXTENSION, DEFAULT_TARGET_SUFFIX,
};
pub use loader::{load_config, load_explicit_config, parse_and_validate_config, CONFIG_FILE_NAME};
