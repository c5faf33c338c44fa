use tracing::{info, instrument};

use crate::config::{Config, OutputMode};
use crate::error::Result;
use crate::extract::extract_text_from_bytes;
use crate::fetch::{build_client, fetch_document, resolve_document_url};
use crate::locate::ListingPage;
use crate::menu::{MenuOutput, WeeklyMenu};
use crate::parse::parse_menu_text;

/// Locate → fetch → extract → parse, run once per call.
///
/// Every run builds its own HTTP client and drops it on the way out, whether
/// the run succeeds or not. Nothing is cached between runs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[instrument(skip(self), fields(resource = %self.config.resource, mode = ?self.config.mode))]
    pub async fn run(&self) -> Result<MenuOutput> {
        let text = self.fetch_text().await?;
        match self.config.mode {
            OutputMode::Raw => Ok(MenuOutput::Raw(text)),
            OutputMode::Parse => {
                let menu = parse_menu_text(&text, &self.config.resource)?;
                info!(days = menu.days.len(), "parsed weekly menu");
                Ok(MenuOutput::Menu(menu))
            }
        }
    }

    /// Everything up to and including text extraction.
    pub async fn fetch_text(&self) -> Result<String> {
        let client = build_client(&self.config.user_agent)?;
        let page = ListingPage::load(&client, &self.config.listing_url).await?;
        let link = page.find_resource_link(&self.config.resource)?;
        let url = resolve_document_url(&link, &self.config.document_scheme)?;
        let bytes = fetch_document(&client, url).await?;
        extract_text_from_bytes(&bytes).await
    }
}

/// Parsed menu for the default dining hall.
pub async fn load_menus() -> Result<WeeklyMenu> {
    let pipeline = Pipeline::default();
    let text = pipeline.fetch_text().await?;
    Ok(parse_menu_text(&text, &pipeline.config().resource)?)
}

/// Raw extracted text for the default dining hall, without parsing.
pub async fn load_menu_text() -> Result<String> {
    Pipeline::default().fetch_text().await
}
