use capdoc::app::console::Console;
use capdoc::utils::{logger, validation::Validate};
use capdoc::{CliConfig, FileActivityLog, LocalStorage, MailerConfig, MailgunNotifier, Wizard};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting capdoc");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let mailer_config = MailerConfig::from_env();
    if let Err(e) = mailer_config.validate() {
        // Not fatal: the notifier reports a failed outcome at send time and
        // the user is pointed at the manual fallback.
        tracing::warn!("⚠️ Email transport incomplete: {}", e);
    }

    let activity = FileActivityLog::new(&config.log_path);
    let notifier = MailgunNotifier::new(mailer_config, activity.clone());
    let storage = LocalStorage::new(config.output_path.clone());

    let wizard = Wizard::new(notifier, activity);
    let mut console = Console::new(wizard, storage);
    console.run().await?;

    tracing::info!("capdoc finished");
    Ok(())
}
