use clap::Parser;
use kml_orgs::address::AddressNormalizer;
use kml_orgs::config::AppConfig;
use kml_orgs::error::AppError;
use kml_orgs::pipeline::{ConversionJob, ConversionPipeline, ConversionSummary};
use kml_orgs::places::{GooglePlacesClient, NoopLookup, PlaceLookup};
use kml_orgs::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "kml-orgs",
    about = "Convert KML organization maps into normalized CSV files",
    version
)]
struct Cli {
    /// Circular directory KML export
    #[arg(long, default_value = "Data/Circular NYC.kml")]
    circular: PathBuf,
    /// ReUse organizations KML export
    #[arg(long, default_value = "Data/ReUse Orgs.kml")]
    reuse: PathBuf,
    /// Directory that receives the timestamped run folder (defaults to KML_ORGS_OUTPUT_ROOT)
    #[arg(long)]
    output_root: Option<PathBuf>,
    /// Skip place lookups; placemarks without an inline address are dropped
    #[arg(long)]
    offline: bool,
}

impl Cli {
    fn jobs(&self) -> Vec<ConversionJob> {
        vec![
            ConversionJob::circular(&self.circular),
            ConversionJob::reuse(&self.reuse),
        ]
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = if cli.offline {
        AppConfig::load_offline()?
    } else {
        AppConfig::load()?
    };
    telemetry::init(&config.telemetry)?;

    let lookup: Box<dyn PlaceLookup> = if cli.offline {
        info!("place lookups disabled");
        Box::new(NoopLookup)
    } else {
        Box::new(GooglePlacesClient::new(config.places()?)?)
    };

    let output_root = cli
        .output_root
        .clone()
        .unwrap_or_else(|| config.output.root.clone());
    let normalizer = AddressNormalizer::postal()?;
    let summary = ConversionPipeline::new(&*lookup, &normalizer, output_root).run(&cli.jobs())?;
    render_summary(&summary);
    Ok(())
}

fn render_summary(summary: &ConversionSummary) {
    println!("Output directory: {}", summary.output_dir.display());
    for output in &summary.outputs {
        println!(
            "  {:<9} {} rows ({} skipped) -> {}",
            output.label,
            output.rows,
            output.skipped,
            output.path.display()
        );
    }
    println!(
        "  {:<9} {} rows -> {}",
        "Merged",
        summary.merged_rows,
        summary.merged_path.display()
    );
}
