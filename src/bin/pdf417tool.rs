use clap::{Parser, Subcommand};
use pdf417_scan::tools::{
    candidate_file_name, candidate_plan, init_tracing, load_source, parse_quad, raster_stats,
    render_plan, write_raster,
};
use pdf417_scan::utils::crop::crop;
use pdf417_scan::{ImageRenderer, Renderer, Rotation, ScanConfig, TransformCandidate};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pdf417tool", version, about = "PDF417 scan diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the candidates a scan of an image would try
    Plan {
        #[arg(long)]
        image: PathBuf,
    },
    /// Render every candidate of an image to PNG files
    Render {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Render one candidate and crop it around hand-labeled corners
    Crop {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long, default_value_t = 0)]
        rotation: u16,
        /// Corners as tlx,tly,blx,bly,trx,try,brx,bry
        #[arg(long)]
        quad: String,
        #[arg(long)]
        margin: Option<u32>,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let config = ScanConfig::from_env();

    let result = match cli.command {
        Command::Plan { image } => plan_cmd(&image, &config),
        Command::Render { image, out, limit } => render_cmd(&image, &out, limit, &config),
        Command::Crop {
            image,
            width,
            rotation,
            quad,
            margin,
            out,
        } => crop_cmd(
            &image,
            width,
            rotation,
            &quad,
            margin.unwrap_or(config.crop_margin),
            &out,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn plan_cmd(image: &Path, config: &ScanConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = load_source(image)?;
    println!(
        "Image: {} ({}x{})",
        image.display(),
        source.width(),
        source.height()
    );
    let plan = candidate_plan(&source, config);
    println!("{} candidates", plan.len());
    for (i, candidate) in plan.iter().enumerate() {
        println!("  {:3}: {}", i, candidate);
    }
    Ok(())
}

fn render_cmd(
    image: &Path,
    out: &Path,
    limit: Option<usize>,
    config: &ScanConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = load_source(image)?;
    std::fs::create_dir_all(out)?;

    let start = Instant::now();
    let rendered = render_plan(&source, config, &ImageRenderer::new(), limit);
    info!(
        candidates = rendered.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "rendered candidate plan"
    );

    for (i, (candidate, raster)) in rendered.into_iter().enumerate() {
        match raster {
            Ok(raster) => {
                let stats = raster_stats(&raster);
                let path = out.join(candidate_file_name(i, candidate));
                println!(
                    "  {:3}: {} -> {}x{} luminance {}-{} avg {} ({})",
                    i,
                    candidate,
                    raster.width(),
                    raster.height(),
                    stats.min,
                    stats.max,
                    stats.avg,
                    path.display()
                );
                write_raster(raster, &path)?;
            }
            Err(err) => println!("  {:3}: {} -> render failed: {}", i, candidate, err),
        }
    }
    Ok(())
}

fn crop_cmd(
    image: &Path,
    width: u32,
    rotation: u16,
    quad: &str,
    margin: u32,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let rotation = Rotation::from_degrees(rotation)
        .ok_or_else(|| format!("rotation must be a multiple of 90, got {rotation}"))?;
    let quad = parse_quad(quad).ok_or("quad must be eight comma-separated numbers")?;

    let source = load_source(image)?;
    let candidate = TransformCandidate::new(width, rotation);
    let raster = ImageRenderer::new().render(&source, candidate)?;
    println!(
        "Rendered {} -> {}x{}",
        candidate,
        raster.width(),
        raster.height()
    );

    let cropped = crop(&raster, &quad, margin).ok_or("crop around quad is empty")?;
    println!(
        "Cropped to {}x{} ({})",
        cropped.width(),
        cropped.height(),
        out.display()
    );
    write_raster(cropped, out)?;
    Ok(())
}
