use clap::Parser;
use trendbot::api::BinanceClient;
use trendbot::config::{ExchangeSettings, MonitorConfig};
use trendbot::execution::{shutdown_channel, Monitor};
use trendbot::strategy::RsiMode;
use trendbot::Result;

/// EMA(12/26) crossover monitor for Binance spot pairs
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Only act on a cross when RSI agrees (no buys while overbought, no sells while oversold)
    #[arg(long)]
    rsi_confirm: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();

    tracing::info!("🚀 TrendBot starting");

    let settings = ExchangeSettings::from_env()?;
    tracing::info!("Exchange endpoint: {}", settings.base_url);

    let client = BinanceClient::new(settings)?;

    let config = MonitorConfig {
        rsi_mode: if cli.rsi_confirm {
            RsiMode::Confirm
        } else {
            RsiMode::Informational
        },
        ..MonitorConfig::default()
    };

    tracing::info!("\n📊 Configuration:");
    tracing::info!("  Interval: {}", config.interval);
    tracing::info!("  Tick: every {:?}", config.tick_period);
    tracing::info!("  Buy amount: {} (quote)", config.buy_quote_amount);
    tracing::info!("  RSI mode: {:?}", config.rsi_mode);
    for symbol in &config.symbols {
        tracing::info!("    - {}", symbol);
    }

    let (trigger, shutdown) = shutdown_channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("\n⚠️  Received Ctrl+C, shutting down...");
                trigger.trigger();
            }
            // Monitor keeps running; the process can still be killed
            Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    tracing::info!("\nPress Ctrl+C to stop...\n");

    let monitor = Monitor::new(client, config);
    monitor.run(shutdown).await;

    tracing::info!("👋 TrendBot stopped");
    Ok(())
}

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trendbot=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
