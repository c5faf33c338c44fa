use dining_hall_menu::{Config, Pipeline, fetch, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logger();
    // pin TLS to aws-lc-rs for every client in the process
    fetch::install_crypto_provider();

    let config = Config::from_env()?;
    tracing::info!(
        url = %config.listing_url,
        resource = %config.resource,
        mode = ?config.mode,
        "loading menu"
    );

    let output = Pipeline::new(config).run().await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
