use clap::{Parser, Subcommand};
use image::ImageReader;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

use toolshed::{DetectorConfig, WorkbenchDetector};

#[derive(Parser)]
#[command(name = "toolshed")]
#[command(about = "Find workbenches in toolshed photos and try out new layouts")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect workbench surfaces in a photo and write an annotated copy
    Detect {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Where to write the annotated image (defaults to <IMAGE>_detected.jpg)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// JSON detector config; missing keys use the defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Save debug outputs to directory (must be empty)
        #[arg(long, value_name = "DIR")]
        debug_out: Option<PathBuf>,

        /// Print detections as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Serve the detector over HTTP
    #[cfg(feature = "server")]
    Serve {
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: std::net::SocketAddr,

        /// JSON detector config; missing keys use the defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Request body limit in MiB
        #[arg(long, default_value_t = 16)]
        max_body_mb: usize,
    },

    /// Open the interactive layout simulator
    #[cfg(feature = "gui")]
    Simulate,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Detect {
            image_path,
            output,
            config,
            debug_out,
            json,
        } => detect(&image_path, output, config, debug_out, json),

        #[cfg(feature = "server")]
        Command::Serve {
            bind,
            config,
            max_body_mb,
        } => {
            let detector = WorkbenchDetector::new(load_config(config)?)?;
            let server_config = toolshed::service::ServerConfig {
                bind,
                max_body_bytes: max_body_mb * 1024 * 1024,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(toolshed::service::serve(detector, server_config))
        }

        #[cfg(feature = "gui")]
        Command::Simulate => {
            toolshed::gui::run().map_err(|e| anyhow::anyhow!("Simulator failed: {}", e))
        }
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<DetectorConfig> {
    match path {
        Some(path) => DetectorConfig::from_json_file(path),
        None => Ok(DetectorConfig::default()),
    }
}

fn detect(
    image_path: &Path,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    debug_out: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    info!("Loading image: {:?}", image_path);
    let img = ImageReader::open(image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    info!("Image loaded: {}x{}", img.width(), img.height());

    let mut detector = WorkbenchDetector::new(load_config(config)?)?;
    if let Some(dir) = debug_out {
        detector = detector.with_debug(dir);
    }

    let result = detector.detect(&img)?;

    let output = output.unwrap_or_else(|| default_output_path(image_path));
    result
        .annotated
        .save(&output)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output.display(), e))?;
    info!("Annotated image written to {}", output.display());

    if json {
        println!("{}", serde_json::to_string_pretty(&result.detections)?);
        return Ok(());
    }

    println!("\n=== Workbench Detection Results ===");
    println!("Total detections: {}", result.detections.len());
    if result.detections.is_empty() {
        println!("No workbenches detected.");
    } else {
        for detection in &result.detections {
            let bbox = &detection.bbox;
            println!(
                "  {} at ({}, {}) - {}x{}",
                detection.source, bbox.x, bbox.y, bbox.width, bbox.height
            );
        }
    }

    Ok(())
}

fn default_output_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image_path.with_file_name(format!("{stem}_detected.jpg"))
}
