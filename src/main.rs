use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vision_report::acquire::FilePathPicker;
use vision_report::app::Session;
use vision_report::models::Config;
use vision_report::report;

#[derive(Debug, Parser)]
#[command(name = "vision-report")]
#[command(about = "Analyze a photo with Azure AI Vision and print a report")]
struct CliArgs {
    /// Photo to analyze. Without one, nothing is picked.
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Directory the photo is copied into before analysis.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vision_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let mut session = Session::from_config(&config, Box::new(FilePathPicker::new(args.image)));

    match session.select_picture().await {
        Ok(Some(_)) => {}
        Ok(None) => {
            info!("No photo selected");
            return Ok(());
        }
        Err(e) => {
            error!("Failed to store photo: {}", e);
            std::process::exit(1);
        }
    }

    let result = session.analysis().await?;
    print!("{}", report::render(&result));

    if !result.is_success() {
        std::process::exit(2);
    }
    Ok(())
}
