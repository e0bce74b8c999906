//! `log` setup for the browser console.
//!
//! Native hosts and tests install their own logger (`env_logger`); there
//! `init_logging` only raises the max level.

use log::LevelFilter;

/// Installs the console logger (wasm only). Safe to call more than once.
pub fn init_logging(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(level) = level.to_level() {
            // a second call finds the logger already set
            let _ = console_log::init_with_level(level);
        }
    }
    log::set_max_level(level);
}
