use std::sync::LazyLock;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

use crate::error::{MenuError, Result};
use crate::menu::MenuResource;

/// Download buttons on the listing page. Each one links to a hall's PDF.
static DOWNLOAD_BUTTON: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".button--outline").expect("download button selector should parse")
});

/// The dining-hall listing page, fetched once and queried afterwards.
#[derive(Debug, Clone)]
pub struct ListingPage {
    html: String,
}

impl ListingPage {
    #[instrument(skip(client), err)]
    pub async fn load(client: &Client, url: &str) -> Result<Self> {
        let html = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        info!(bytes = html.len(), "loaded listing page");
        Ok(Self::from_html(html))
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// The `href` of the first download button whose link contains the
    /// resource code.
    ///
    /// This is a plain substring match, so a code that also appears inside
    /// another hall's link can pick the wrong button if that one comes first.
    pub fn find_resource_link(&self, resource: &MenuResource) -> Result<String> {
        let doc = Html::parse_document(&self.html);
        let link = doc
            .select(&DOWNLOAD_BUTTON)
            .filter_map(|element| element.value().attr("href"))
            .find(|href| href.contains(resource.as_str()))
            .map(str::to_string)
            .ok_or_else(|| MenuError::ResourceNotFound(resource.to_string()))?;
        debug!(%resource, %link, "found menu link");
        Ok(link)
    }
}
