use anyhow::Result;
use graphdesk::backend::create_backend;
use graphdesk::config::Config;
use graphdesk::constants::ERROR_NO_SERVER;
use graphdesk::{logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().nth(1).as_deref() == Some("--generate-config") {
        return Config::generate_default_config(Config::get_default_config_path()?);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error loading configuration: {e:#}");
            eprintln!("\n💡 Run `graphdesk --generate-config` to write a default config file.");
            std::process::exit(1);
        }
    };

    match logger::init(&config.logging) {
        Ok(Some(path)) => log::info!("logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("⚠️  Logging disabled: {e:#}"),
    }

    let backend = match create_backend(&config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("❌ {ERROR_NO_SERVER}: {e:#}");
            std::process::exit(1);
        }
    };

    let config_path = Config::resolve_save_path().ok();
    ui::run_app(config, config_path, backend).await?;

    Ok(())
}
