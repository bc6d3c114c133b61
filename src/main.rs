//! TVL Dashboard CLI
//!
//! Command-line interface for the dashboard:
//! - Serve the web dashboard
//! - Render the chart to a file
//! - Print the series as a table
//! - Generate axis ticks
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tvl_dashboard::api::{serve, AppState};
use tvl_dashboard::config::{Config, LoggingConfig};
use tvl_dashboard::dashboard::{render_png, render_svg, ChartStyle, Dashboard};
use tvl_dashboard::format::{format_date, format_full_date, format_value};
use tvl_dashboard::series::{parse_timestamp, ticks, Period};
use tvl_dashboard::source::{AssetClient, FileSource, SeriesSource};

#[derive(Parser)]
#[command(name = "tvl-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Staked-value (TVL) history dashboard for a single asset")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard page
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Read the history from a JSON file instead of the remote endpoint
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Render the chart to a file (.png or .svg)
    Render {
        /// Lookback window in days (7, 14, 30, 90)
        #[arg(short, long)]
        period: Option<Period>,
        /// Output path; a .png extension selects the bitmap backend
        #[arg(short, long, default_value = "tvl.svg")]
        output: PathBuf,
        /// Read the history from a JSON file instead of the remote endpoint
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the series with formatted labels
    Show {
        /// Lookback window in days (7, 14, 30, 90)
        #[arg(short, long)]
        period: Option<Period>,
        /// Read the history from a JSON file instead of the remote endpoint
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Generate day ticks. Timestamps: Unix seconds or ISO 8601
    Ticks {
        /// First tick
        #[arg(short, long)]
        start: String,
        /// Last day to cover (takes precedence over --period)
        #[arg(short, long)]
        end: Option<String>,
        /// Number of days
        #[arg(short, long)]
        period: Option<u32>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    match cli.command {
        Commands::Serve { host, port, input } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }

            tracing::info!("Starting TVL dashboard v{}", env!("CARGO_PKG_VERSION"));

            let source = build_source(&config, input)?;
            let dashboard = Arc::new(Dashboard::new(config.chart.default_period));

            // The page shows the loading state until this settles
            {
                let dashboard = Arc::clone(&dashboard);
                tokio::spawn(async move {
                    let _ = dashboard.init(source.as_ref()).await;
                });
            }

            let state = AppState::new(dashboard, chart_style(&config));
            serve(state, &server).await?;
        }

        Commands::Render {
            period,
            output,
            input,
        } => {
            let source = build_source(&config, input)?;
            let dashboard = Dashboard::new(period.unwrap_or(config.chart.default_period));
            let loaded = dashboard.init(source.as_ref()).await;

            let view = dashboard.view().await;
            let style = chart_style(&config);

            if is_png(&output) {
                render_png(&view, &style, &output)?;
            } else {
                let svg = render_svg(&view, &style)?;
                if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&output, svg)?;
            }

            match loaded {
                Ok(()) => println!("Chart written to {:?}", output),
                Err(e) => {
                    eprintln!("Empty chart written to {:?}", output);
                    return Err(e).context("Failed to load asset history");
                }
            }
        }

        Commands::Show { period, input } => {
            let source = build_source(&config, input)?;
            let dashboard = Dashboard::new(period.unwrap_or(config.chart.default_period));
            dashboard
                .init(source.as_ref())
                .await
                .context("Failed to load asset history")?;

            let view = dashboard.view().await;

            if let Some(info) = &view.info {
                println!("{}: {}", info.farm, info.asset);
                println!();
            }

            let labels: Vec<String> = view.ticks.iter().map(|t| format_date(*t)).collect();
            println!("Ticks ({}): {}", view.period, labels.join(" "));
            println!();

            if let Some(series) = &view.data {
                println!("{:<12} | {}", "Date", "TVL");
                println!("{}", "-".repeat(24));
                for point in &series.chart_values {
                    println!(
                        "{:<12} | {}",
                        format_full_date(point.date),
                        format_value(point.value)
                    );
                }
            }
        }

        Commands::Ticks { start, end, period } => {
            let start = parse_time_arg(&start)?;
            let end = end.as_deref().map(parse_time_arg).transpose()?;

            for tick in ticks(start, end, period)? {
                println!("{}  {}", tick, format_date(tick));
            }
        }

        Commands::Config { output } => {
            let config = tvl_dashboard::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Initialize tracing; `RUST_LOG` wins over the configured level
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("tvl_dashboard={},tower_http={}", logging.level, logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_source(config: &Config, input: Option<PathBuf>) -> anyhow::Result<Box<dyn SeriesSource>> {
    Ok(match input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(AssetClient::new(config.source.client_config())?),
    })
}

fn chart_style(config: &Config) -> ChartStyle {
    ChartStyle::default().with_size(config.chart.width, config.chart.height)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

fn parse_time_arg(s: &str) -> anyhow::Result<i64> {
    let s = s.trim();
    if let Ok(seconds) = s.parse::<i64>() {
        return Ok(seconds);
    }
    parse_timestamp(s).with_context(|| format!("Invalid timestamp: {}", s))
}
