use clap::Parser;
use empathy_etl::utils::error::ErrorSeverity;
use empathy_etl::utils::{logger, validation::Validate};
use empathy_etl::{CliConfig, EtlEngine, LocalStorage, RunConfig, SurveyPipeline, TomlConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting empathy-etl CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let file_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let config = RunConfig::resolve(cli.input, cli.output, !cli.dry_run, file_config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let storage = LocalStorage::default();
    let pipeline = SurveyPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            let summary = format!(
                "✅ Successfully converted {} survey responses to empathy interview format.",
                report.record_count()
            );
            match &report.output_path {
                Some(path) => {
                    println!("Saved formatted data to {}", path);
                    println!("{}", summary);
                }
                None => {
                    // stdout 只留 JSON
                    match report.to_json() {
                        Ok(json) => println!("{}", json),
                        Err(e) => exit_with(&e),
                    }
                    eprintln!("{}", summary);
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&e);
        }
    }

    Ok(())
}

fn exit_with(e: &empathy_etl::EtlError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
