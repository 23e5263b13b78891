use irvault_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    irvault_api::telemetry::init_telemetry()?;

    // Load configuration; fail fast on missing required settings.
    let config = Config::from_env()?;

    // Initialize the application (database, services, routes)
    let (_state, router) = irvault_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    irvault_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
