use std::sync::Arc;
use tryon::{logger, Config, GeminiClient, TryOnService};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading anything else from the environment.
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    logger::log_config_info(&config);

    let client = match GeminiClient::new(&config.gemini) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized");
            client
        }
        Err(e) => {
            log::error!("❌ {}", e);
            return Err(e.into());
        }
    };

    let service = TryOnService::from_config(&config, Arc::new(client));

    logger::log_startup_info("Virtual Try-On API", env!("CARGO_PKG_VERSION"), &config);
    tryon::server::run(&config, service).await?;

    Ok(())
}
