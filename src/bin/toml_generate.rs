use anyhow::Context;
use clap::Parser;
use drill_sim::core::report;
use drill_sim::utils::{logger, validation::Validate};
use drill_sim::{GenerationPipeline, LocalStorage, SimulationEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "drill-sim-toml")]
#[command(about = "Generate synthetic drilling logs from a TOML profile")]
struct Args {
    /// Path to TOML profile
    #[arg(short, long, default_value = "drill-sim.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - generate and report without writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load profile '{}'", args.config))?;

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based drill-sim");
    tracing::info!("📁 Loaded profile '{}' from {}", config.profile_name(), args.config);

    // 套用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let count = config.count();
    let preview_rows = config.preview_rows();
    let summary = config.summary_format();

    if args.dry_run {
        tracing::info!("🧪 Dry run: nothing will be written");
    }

    let storage = LocalStorage::new(config.output.dir.clone());
    let pipeline = GenerationPipeline::new(storage, config);
    let engine = SimulationEngine::new_with_monitoring(pipeline, monitor_enabled);

    let produced = engine
        .run_batch(count, !args.dry_run, |output| {
            let description = report::describe(&output.rendered.log, preview_rows, summary)?;
            if !description.is_empty() {
                println!("{}", description);
            }
            if let Some(path) = &output.path {
                println!("Data exported to {}", path);
            }
            Ok(())
        })
        .await;

    let produced = match produced {
        Ok(produced) => produced,
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    tracing::info!("✅ Generated {} drilling log(s)", produced);
    Ok(())
}
