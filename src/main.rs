use clap::Parser;
use drill_sim::core::report;
use drill_sim::utils::{logger, validation::Validate};
use drill_sim::{CliConfig, GenerationPipeline, LocalStorage, SimulationEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting drill-sim");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 Process monitoring enabled");
    }

    let count = config.count;
    let preview_rows = config.preview;
    let summary = config.summary;
    let to_stdout = config.stdout;

    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = GenerationPipeline::new(storage, config);
    let engine = SimulationEngine::new_with_monitoring(pipeline, monitor_enabled);

    // --stdout 時所有資料列寫進同一份 CSV，標頭只出現一次
    let mut sink = to_stdout.then(|| report::CsvSink::new(std::io::stdout()));

    let result = engine
        .run_batch(count, !to_stdout, |output| {
            if let Some(sink) = sink.as_mut() {
                return sink.append(&output.rendered.log);
            }

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
    let result = result.and_then(|produced| match sink {
        Some(sink) => {
            tracing::debug!("Streamed {} rows to stdout", sink.rows());
            sink.finish().map(|_| produced)
        }
        None => Ok(produced),
    });

    match result {
        Ok(produced) => {
            tracing::info!("✅ Generated {} drilling log(s)", produced);
        }
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
