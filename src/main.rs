use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::utils::error::{ErrorSeverity, SantaError};
use secret_santa::utils::{logger, validation::Validate};
use secret_santa::{CliArgs, ConfigProvider, DeliveryStatus, SantaConfig, SantaEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🎄 Starting secret-santa");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match SantaConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML or JSON");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if args.dry_run {
        config.dry_run = Some(true);
        tracing::info!("🔧 Dry run forced from the command line");
    }
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = Some(max_attempts);
        tracing::info!("🔧 max_attempts overridden to: {}", max_attempts);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_on_config_error(&e);
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    let sender = match config.twilio_sender() {
        Ok(sender) => sender,
        Err(e) => exit_on_config_error(&e),
    };
    let engine = match SantaEngine::new(&config, sender) {
        Ok(engine) => engine,
        Err(e) => exit_on_config_error(&e),
    };

    let mut rng = match args.seed {
        Some(seed) => {
            tracing::debug!("Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    match engine.run(&mut rng).await {
        Ok(report) => {
            for delivery in &report.notifications.deliveries {
                if let DeliveryStatus::Failed { reason } = &delivery.status {
                    eprintln!("⚠️ {} was not notified: {}", delivery.giver, reason);
                }
            }
            println!(
                "✅ Secret Santa assignments completed on attempt {} ({} sent, {} dry run, {} failed)",
                report.attempts,
                report.notifications.sent(),
                report.notifications.dry_runs(),
                report.notifications.failed()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Secret Santa run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = exit_code_for(e.severity());
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn exit_code_for(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn exit_on_config_error(e: &SantaError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

fn display_config_summary(config: &SantaConfig, args: &CliArgs) {
    println!("📋 Configuration Summary:");
    println!("  Participants: {}", config.participants.len());
    println!(
        "  Exclusion rules: {}",
        config.exclusions.values().map(Vec::len).sum::<usize>()
    );
    println!("  Max attempts: {}", config.max_attempts());
    println!("  Dry run: {}", config.dry_run());
    println!("  Sender: {}", config.sender_address());
    if let Some(seed) = args.seed {
        println!("  Seed: {}", seed);
    }
}
