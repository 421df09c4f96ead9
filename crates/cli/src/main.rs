use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use panel_data::{parse_panel_body, Gender, PanelRequest, ReferenceCatalog, ReferenceRanges, Status};
use rand::Rng;
use server::{BloodReport, ReportOrchestrator, ServerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Blood Report Analyzer
#[derive(Parser)]
#[command(name = "blood-report")]
#[command(about = "Analyze blood test panels from the command line", long_about = None)]
struct Cli {
    /// TOML config file (same format as the server's)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model artifacts directory, overrides the config
    #[arg(short, long)]
    artifacts: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a panel stored as a JSON file
    Analyze {
        /// Payload with `gender`, `age` and `testResults`
        #[arg(long)]
        input: PathBuf,

        /// Print the raw JSON report instead of tables
        #[arg(long)]
        json: bool,
    },

    /// List analytes and their reference ranges
    Catalog {
        /// Show a single analyte in detail
        #[arg(long)]
        code: Option<String>,
    },

    /// Time the report pipeline on random panels
    Benchmark {
        /// Number of reports to generate
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Reports generated in parallel
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog { code } => handle_catalog(code.as_deref()),
        Commands::Analyze { input, json } => {
            let orchestrator = load_orchestrator(cli.config, cli.artifacts)?;
            handle_analyze(&orchestrator, &input, json)
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let orchestrator = load_orchestrator(cli.config, cli.artifacts)?;
            handle_benchmark(Arc::new(orchestrator), requests, concurrent).await
        }
    }
}

fn load_orchestrator(config: Option<PathBuf>, artifacts: Option<PathBuf>) -> Result<ReportOrchestrator> {
    let mut config = match config {
        Some(path) => ServerConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(dir) = artifacts {
        config.artifacts_dir = dir;
    }

    println!("Loading model artifacts from {}...", config.artifacts_dir.display());
    let start = Instant::now();
    let orchestrator = ReportOrchestrator::from_config(&config);
    if orchestrator.model_loaded() {
        println!("{} Loaded model in {:?}", "✓".green(), start.elapsed());
    } else {
        println!("{} Model not loaded, predictions disabled", "!".yellow());
    }
    Ok(orchestrator)
}

/// Handle the 'analyze' command
fn handle_analyze(orchestrator: &ReportOrchestrator, input: &Path, json: bool) -> Result<()> {
    let body = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let request = parse_panel_body(&body).context("Invalid panel")?;
    debug!("Parsed panel with {} result(s)", request.test_results.len());

    let report = orchestrator.generate_report(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog(code: Option<&str>) -> Result<()> {
    let catalog = ReferenceCatalog::standard();

    if let Some(code) = code {
        let test = catalog
            .get_test(code)
            .ok_or_else(|| anyhow!("Unknown test code '{}'", code))?;
        println!("{}", format!("{} ({})", test.name, test.code).bold().blue());
        println!("{}Units: {}", "• ".green(), test.units);
        println!("{}Range: {}", "• ".green(), format_ranges(&test.ranges));
        println!("{}Low: {}", "• ".cyan(), test.low.condition);
        println!("    Symptoms: {}", test.low.symptoms);
        println!("{}High: {}", "• ".cyan(), test.high.condition);
        println!("    Symptoms: {}", test.high.symptoms);
        return Ok(());
    }

    let (tests, abnormalities) = catalog.counts();
    println!(
        "{}",
        format!("{} analytes, {} known conditions", tests, abnormalities).bold().blue()
    );
    for test in catalog.tests() {
        println!(
            "{:<12} {:<36} {:<18} {}",
            test.code.green(),
            test.name,
            test.units,
            format_ranges(&test.ranges)
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: Arc<ReportOrchestrator>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be at least 1"));
    }

    let catalog = orchestrator.catalog();
    let mut rng = rand::rng();
    let panels: Vec<PanelRequest> = (0..requests).map(|_| random_panel(catalog, &mut rng)).collect();

    let wall = Instant::now();
    let mut timings = Vec::with_capacity(requests);
    for chunk in panels.chunks(concurrent.max(1)) {
        let mut handles = Vec::with_capacity(chunk.len());
        for panel in chunk.iter().cloned() {
            let orchestrator = Arc::clone(&orchestrator);
            handles.push(tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                orchestrator.generate_report(&panel);
                start.elapsed()
            }));
        }
        for handle in handles {
            timings.push(handle.await?);
        }
    }
    let total_time = wall.elapsed();

    timings.sort();
    let busy: Duration = timings.iter().sum();
    let avg_latency = busy / timings.len() as u32;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Reports: {} ({} in parallel)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} reports/second", throughput);

    Ok(())
}

/// Nearest-rank percentile over sorted timings
fn percentile(sorted: &[Duration], q: f64) -> Duration {
    let rank = ((sorted.len() as f64 * q).ceil() as usize).clamp(1, sorted.len());
    sorted[rank - 1]
}

/// Random panel with most analytes present and values spread around their ranges
fn random_panel<R: Rng>(catalog: &ReferenceCatalog, rng: &mut R) -> PanelRequest {
    let gender = if rng.random_bool(0.5) { Gender::Male } else { Gender::Female };
    let mut panel = PanelRequest::new(gender.as_str(), rng.random_range(18..=85));

    for test in catalog.tests() {
        if !rng.random_bool(0.8) {
            continue;
        }
        if let Some(bounds) = test.ranges.for_gender(Some(gender)) {
            let value = rng.random_range(bounds.min * 0.6..=bounds.max * 1.4);
            panel = panel.with_result(test.code, (value * 10.0).round() / 10.0);
        }
    }
    panel
}

fn format_ranges(ranges: &ReferenceRanges) -> String {
    match ranges {
        ReferenceRanges::Default(bounds) => bounds.to_string(),
        ReferenceRanges::ByGender { male, female } => format!("male {}, female {}", male, female),
    }
}

/// Helper function to format and print a report
fn print_report(report: &BloodReport) {
    println!(
        "{}",
        format!("Blood report: {}, age {}", report.gender, report.age).bold().blue()
    );

    println!("\n{}", "Results".bold());
    for (code, result) in report.analysis.iter() {
        let status = match result.status {
            Status::Low => result.status.to_string().yellow(),
            Status::High => result.status.to_string().red(),
            Status::Normal => result.status.to_string().green(),
        };
        println!(
            "  {:<12} {:>8} {:<18} {:<12} {}",
            code, result.value, result.units, result.reference_range, status
        );
        if let Some(condition) = result.condition {
            println!("               {}", condition.dimmed());
        }
    }

    println!("\n{}", "Predictions".bold());
    if report.ml_predictions.is_error() {
        // Error markers serialize as {"Error": message}
        let marker = serde_json::to_value(&report.ml_predictions).unwrap_or_default();
        println!("  {}", marker["Error"].as_str().unwrap_or("unavailable").red());
    } else if report.ml_predictions.conditions().is_empty() {
        println!("  {}", "Normal".green());
    } else {
        for condition in report.ml_predictions.conditions() {
            println!("  {} ({:.2}%)", condition.label.red(), condition.confidence);
        }
    }

    println!("\n{}", "Recommendations".bold());
    for block in &report.recommendations {
        println!("  {}", block.title.cyan());
        if let Some(description) = block.description {
            println!("    {}", description);
        }
        for item in &block.items {
            println!("    - {}", item);
        }
    }

    println!("\n{}", "Summary".bold());
    println!("{}", report.summary);
}
