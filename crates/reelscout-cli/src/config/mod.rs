//! TOML settings for the `reelscout` binary.
//!
//! `[tmdb]` carries request defaults (language, adult filter, timeout) and
//! `[search]` tunes paging and typing debounce. Missing keys take defaults.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
