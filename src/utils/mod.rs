pub mod logging;
pub mod text;

pub use logging::truncate_text;
pub use text::{contains_ignore_case, normalize_line_breaks, terminal_text};
