pub mod environment;
pub mod format;

pub use environment::{DATA_DIR_ENV, default_history_path, get_data_dir};
pub use format::format_duration;
