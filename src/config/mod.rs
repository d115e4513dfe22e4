pub mod files;
pub mod settings;

pub use files::{atomic_write, log_file, settings_file};
pub use settings::{init_settings, load_settings, Settings};
