pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locate;
pub mod logging;
pub mod menu;
pub mod parse;
pub mod pipeline;

pub use config::{Config, OutputMode};
pub use error::{MenuError, Result};
pub use extract::{LopdfSource, PageSource, extract_text, extract_text_from_bytes};
pub use locate::ListingPage;
pub use menu::{DayMenu, MenuOutput, MenuResource, WeeklyMenu};
pub use parse::{ParseError, parse_menu_text};
pub use pipeline::{Pipeline, load_menu_text, load_menus};
