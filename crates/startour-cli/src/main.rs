use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use startour_data::render::instance_bytes;
use startour_data::{
    render_instances, synthetic, CatalogSource, LoadReport, PipelineConfig, ScaledCatalog,
    StarPipeline, StarRecord,
};
use startour_tour::{CameraPose, CameraTour, TourEvent, TourTiming};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "startour")]
#[command(about = "Nearest-star catalog pipeline and camera tour")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the catalog comes from and how the pipeline is tuned
#[derive(clap::Args, Clone, Debug)]
struct SourceArgs {
    /// Catalog URL or local CSV path (overrides the config file)
    #[arg(short, long)]
    source: Option<String>,

    /// Pipeline config JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of closest stars to keep visible
    #[arg(long)]
    count: Option<usize>,

    /// Render depth limit (far clip) in render units
    #[arg(long)]
    depth: Option<f64>,

    /// Minimum catalog size after cleaning
    #[arg(long)]
    min_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic catalog in HYG v3 layout
    GenerateSynthetic {
        #[arg(short, long, default_value = "20000")]
        count: usize,
        #[arg(short, long, default_value = "data/synthetic.csv")]
        output: PathBuf,
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Write the default pipeline configuration as JSON
    InitConfig {
        #[arg(short, long, default_value = "startour.json")]
        output: PathBuf,
    },

    /// Load, parse and deduplicate a catalog, then report
    Load {
        #[command(flatten)]
        args: SourceArgs,
    },

    /// Run the full pipeline and show the visible set
    Visible {
        #[command(flatten)]
        args: SourceArgs,
        /// Rows to print
        #[arg(long, default_value = "20")]
        show: usize,
        /// Write the visible set as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Run the pipeline, then fly the camera tour over the closest stars
    Tour {
        #[command(flatten)]
        args: SourceArgs,
        /// Stars to visit
        #[arg(long, default_value = "10")]
        stops: usize,
        /// Clock tick in seconds
        #[arg(long, default_value = "0.1")]
        dt: f64,
        #[arg(long, default_value = "3.0")]
        rotate_secs: f64,
        #[arg(long, default_value = "3.0")]
        translate_secs: f64,
        #[arg(long, default_value = "1.0")]
        hold_secs: f64,
        /// Stop this far short of each star (render units)
        #[arg(long, default_value = "2.0")]
        offset: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateSynthetic { count, output, seed } => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let stars = synthetic::generate_synthetic_stars(count, seed);
            let file = std::fs::File::create(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            synthetic::write_hyg_csv(&stars, file)?;
            println!("Generated {} stars -> {:?}", count, output);
        }

        Commands::InitConfig { output } => {
            PipelineConfig::default().save(&output)?;
            println!("Wrote default configuration -> {:?}", output);
        }

        Commands::Load { args } => {
            let config = resolve_config(&args)?;
            let pipeline = StarPipeline::new(config)?;
            let source = pipeline.config().source();

            let pb = spinner(source.as_ref());
            let result = pipeline.loader().load_with_report(source.as_ref());
            pb.finish_and_clear();
            let (catalog, report) = result?;

            print_report(&report);
            println!("\n{:<8} {:>8}", "Color", "Stars");
            for (color, n) in catalog.color_counts() {
                println!("{:<8} {:>8}", color, n);
            }
            if let Some(closest) = catalog.closest() {
                println!("\nClosest: {} at {:.4}", display_name(closest), closest.distance);
            }
        }

        Commands::Visible { args, show, json } => {
            let (scaled, report) = run_pipeline(&args)?;
            print_report(&report);

            let reference = scaled.reference();
            println!("\nScale:");
            println!("  min distance:  {:.4}", reference.min_distance);
            println!("  max distance:  {:.4}", reference.max_distance);
            println!("  scale factor:  {:.6}", reference.scale_factor);

            let visible = scaled.visible();
            println!("\nVisible set: {} stars", visible.len());
            println!("{:>6} {:<24} {:>12} {:>12} {:>12} {:>10} {:<7}", "#", "Name", "X", "Y", "Z", "Dist", "Color");
            for (i, s) in visible.iter().take(show).enumerate() {
                println!("{:>6} {:<24} {:>12.4} {:>12.4} {:>12.4} {:>10.4} {:<7}",
                    i, display_name(s), s.position.x, s.position.y, s.position.z, s.distance, s.color);
            }

            let instances = render_instances(visible);
            println!("\nRender buffer: {} instances, {} bytes", instances.len(), instance_bytes(&instances).len());

            if let Some(path) = json {
                write_json(visible, &path)?;
                println!("\nWrote visible set -> {:?}", path);
            }
        }

        Commands::Tour { args, stops, dt, rotate_secs, translate_secs, hold_secs, offset } => {
            let timing = TourTiming { rotate_secs, translate_secs, hold_secs, approach_offset: offset };
            timing.tick_budget(dt, stops).context("Bad --dt")?;

            let (scaled, _) = run_pipeline(&args)?;
            let visible = scaled.visible();
            let stops = stops.min(visible.len());
            let targets = visible[..stops].iter().map(|s| s.position.to_dvec3()).collect();
            let mut tour = CameraTour::new(targets, CameraPose::default(), timing)?;

            let mut clock = 0.0;
            let mut events: Vec<TourEvent> = tour.start().into_iter().collect();
            let max_ticks = timing.tick_budget(dt, stops)?;

            for _ in 0..max_ticks {
                for event in events.drain(..) {
                    print_event(event, clock, visible);
                }
                if tour.is_finished() {
                    break;
                }
                events = tour.tick(dt);
                clock += dt;
            }
            for event in events {
                print_event(event, clock, visible);
            }
        }
    }

    Ok(())
}

/// Config file (or defaults) with command line overrides applied
fn resolve_config(args: &SourceArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(source) = &args.source { config.data_source_url = source.clone(); }
    if let Some(n) = args.count { config.target_count = n; }
    if let Some(d) = args.depth { config.render_depth_limit = d; }
    if let Some(m) = args.min_size { config.min_catalog_size = m; }

    Ok(config)
}

fn run_pipeline(args: &SourceArgs) -> Result<(ScaledCatalog, LoadReport)> {
    let config = resolve_config(args)?;
    let pipeline = StarPipeline::new(config)?;
    let source = pipeline.config().source();

    let pb = spinner(source.as_ref());
    let result = pipeline.run_with_report(source.as_ref());
    pb.finish_and_clear();

    Ok(result?)
}

fn spinner(source: &dyn CatalogSource) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .expect("Invalid progress template"));
    pb.set_message(format!("Loading {}", source.location()));
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn print_report(report: &LoadReport) {
    println!("Catalog:");
    println!("  rows:             {}", report.rows);
    println!("  parsed:           {}", report.parsed);
    println!("  rejected:         {}", report.rejected);
    println!("  near-duplicates:  {}", report.duplicates_removed);
    println!("  kept:             {}", report.kept);
}

fn print_event(event: TourEvent, clock: f64, visible: &[StarRecord]) {
    match event {
        TourEvent::Started(i) => {
            println!("[{:>8.2}s] -> {} ({})", clock, display_name(&visible[i]), visible[i].color);
        }
        TourEvent::Arrived(i) => {
            let p = visible[i].position;
            println!("[{:>8.2}s]    arrived near {} at ({:.3}, {:.3}, {:.3})",
                clock, display_name(&visible[i]), p.x, p.y, p.z);
        }
        TourEvent::Finished => println!("[{:>8.2}s] tour finished", clock),
    }
}

fn display_name(star: &StarRecord) -> &str {
    if star.name.is_empty() { "(unnamed)" } else { &star.name }
}

fn write_json(stars: &[StarRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(stars)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
