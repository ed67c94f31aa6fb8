use anyhow::Context;
use clap::Parser;
use plate_client::{HttpPlateDetector, PlateWorkflow, config::Config};
use std::{path::PathBuf, sync::Arc};

/// Detect license plates in photos through the plate service
#[derive(Parser, Debug)]
#[command(name = "plate-client")]
#[command(about = "Uploads photos to the plate detection service and prints the results")]
struct Args {
    /// Photos to run detection on, in order
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Save every successful detection to the session history
    #[arg(long)]
    save: bool,

    /// Override PLATE_ENDPOINT_URL
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,plate_client=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint_url = endpoint;
    }

    let detector = Arc::new(HttpPlateDetector::from_config(&config)?);
    tracing::info!("Using plate service at {}", detector.endpoint());
    let workflow = PlateWorkflow::new(detector);

    for path in &args.images {
        workflow.clear_result();

        let image = match image::open(path)
            .with_context(|| format!("Failed to load image {}", path.display()))
        {
            Ok(image) => image,
            Err(e) => {
                eprintln!("{:#}", e);
                continue;
            }
        };

        workflow.detect(&image).await?;

        let state = workflow.snapshot();
        match (state.last_result.as_ref().and_then(|r| r.plate()), &state.last_error) {
            (Some(plate), _) => {
                let confidence = state.last_result.as_ref().and_then(|r| r.confidence);
                match confidence {
                    Some(c) => println!("{}: {} (confidence {:.2})", path.display(), plate, c),
                    None => println!("{}: {}", path.display(), plate),
                }
                if args.save {
                    workflow.save();
                }
            }
            (None, Some(error)) => println!("{}: {}", path.display(), error),
            (None, None) => println!("{}: no plate", path.display()),
        }
    }

    let history = workflow.history();
    if !history.is_empty() {
        println!("{}", serde_json::to_string_pretty(&history)?);
    }

    Ok(())
}
