use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{MenuError, Result};

pub fn build_client(user_agent: &str) -> Result<Client> {
    let client = Client::builder()
        // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
        .no_proxy()
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Makes aws-lc-rs the process-wide rustls provider. Returns `false` when a
/// provider was already installed, which is left in place.
pub fn install_crypto_provider() -> bool {
    let installed = rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_ok();
    if !installed {
        debug!("rustls crypto provider already installed");
    }
    installed
}

/// Turns a scheme-relative link (`//host/path.pdf`) into an absolute URL.
pub fn resolve_document_url(fragment: &str, scheme: &str) -> Result<Url> {
    Url::parse(&format!("{scheme}:{fragment}")).map_err(|source| MenuError::InvalidDocumentUrl {
        fragment: fragment.to_string(),
        source,
    })
}

#[instrument(skip(client, url), fields(url = %url), err)]
pub async fn fetch_document(client: &Client, url: Url) -> Result<Vec<u8>> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    info!(bytes = bytes.len(), "downloaded menu document");
    Ok(bytes.to_vec())
}
