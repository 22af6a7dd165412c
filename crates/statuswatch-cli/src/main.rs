mod notify;

use anyhow::Context;
use clap::Parser;
use statuswatch_core::config::{DEFAULT_ENDPOINT, DEFAULT_PERIOD_SECS, DEFAULT_TIMEOUT_SECS};
use statuswatch_core::{CycleOutcome, RawConfig, Scheduler, WatchConfig};
use telegram_client::{BotClient, DEFAULT_API_URL};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use notify::TelegramNotifier;

#[derive(Parser)]
#[command(
    name = "statuswatch",
    about = "Watch a review-status endpoint and send a Telegram message whenever the status changes",
    version,
    after_help = "Credentials are read from flags or the process environment only; \
no .env file is loaded. Export PRACTICUM_TOKEN, TELEGRAM_TOKEN and \
TELEGRAM_CHAT_ID before starting."
)]
struct Cli {
    /// Status endpoint to poll
    #[arg(long, env = "STATUSWATCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// OAuth token for the status endpoint
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    /// Telegram chat that receives notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    chat_id: Option<String>,

    /// Seconds to wait between polls
    #[arg(long, env = "STATUSWATCH_PERIOD_SECS", default_value_t = DEFAULT_PERIOD_SECS)]
    period: u64,

    /// HTTP timeout in seconds, for both the endpoint and Telegram
    #[arg(long, env = "STATUSWATCH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_API_URL)]
    telegram_api: String,

    /// Run a single poll cycle and exit (non-zero if the cycle failed)
    #[arg(long)]
    once: bool,
}

impl Cli {
    fn raw_config(&self) -> RawConfig {
        RawConfig {
            endpoint: self.endpoint.clone(),
            api_token: self.api_token.clone(),
            bot_token: self.bot_token.clone(),
            chat_id: self.chat_id.clone(),
            period_secs: self.period,
            timeout_secs: self.timeout,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.raw_config().validate() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(critical = true, "{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config, &cli.telegram_api, cli.once) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(config: &WatchConfig, telegram_api: &str, once: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    runtime.block_on(watch(config, telegram_api, once))
}

async fn watch(config: &WatchConfig, telegram_api: &str, once: bool) -> anyhow::Result<()> {
    let bot = BotClient::with_timeout(&config.bot_token, config.timeout)
        .context("failed to build Telegram client")?
        .with_base_url(telegram_api);
    let mut scheduler = Scheduler::new(config, TelegramNotifier::new(bot))?;

    if !once {
        scheduler.run().await;
        return Ok(());
    }

    match scheduler.run_cycle().await {
        CycleOutcome::Failed { error, .. } => {
            Err(anyhow::Error::new(error).context("poll cycle failed"))
        }
        CycleOutcome::Notified {
            delivered: false, ..
        } => anyhow::bail!("status changed but the notification was not delivered"),
        _ => Ok(()),
    }
}
