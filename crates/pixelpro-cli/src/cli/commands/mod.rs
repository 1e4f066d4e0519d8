//! CLI command handlers, one file per command.

mod browse;
mod generate;
mod saved;
mod search;
mod theme;

pub use browse::{parse_line, run_browse, BrowseCommand};
pub use generate::{run_completions, run_man};
pub use saved::{run_saved_clear, run_saved_list, run_saved_remove};
pub use search::{run_search, SearchArgs};
pub use theme::{run_theme_show, run_theme_toggle};
