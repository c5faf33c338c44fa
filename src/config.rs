use std::env;
use std::str::FromStr;

use crate::error::{MenuError, Result};
use crate::menu::MenuResource;

pub const DEFAULT_LISTING_URL: &str =
    "https://www.mcgill.ca/foodservices/locations/dining-hall-menus";
pub const DEFAULT_USER_AGENT: &str = "dining-hall-menu/0.1";

/// Last stage of a pipeline run: parse the text, or hand it back as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Parse,
    Raw,
}

impl FromStr for OutputMode {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "menu" | "parse" => Ok(Self::Parse),
            "raw" | "text" => Ok(Self::Raw),
            other => Err(MenuError::Config {
                message: format!("unknown output mode {other:?}, expected \"menu\" or \"raw\""),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listing_url: String,
    pub resource: MenuResource,
    pub mode: OutputMode,
    /// Scheme put in front of the scheme-relative links on the listing page.
    pub document_scheme: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            resource: MenuResource::default(),
            mode: OutputMode::Parse,
            document_scheme: "https".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by any `MENU_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("MENU_LISTING_URL") {
            config.listing_url = url;
        }
        if let Some(code) = lookup("MENU_RESOURCE") {
            config.resource = MenuResource::new(code);
        }
        if let Some(mode) = lookup("MENU_OUTPUT") {
            config.mode = mode.parse()?;
        }
        if let Some(scheme) = lookup("MENU_DOCUMENT_SCHEME") {
            config.document_scheme = scheme;
        }
        if let Some(agent) = lookup("MENU_USER_AGENT") {
            config.user_agent = agent;
        }
        Ok(config)
    }
}
