use anyhow::Context;
use clap::Parser;
use restaurant_directory::domain::ports::{ConfigProvider, Storage};
use restaurant_directory::utils::{logger, validation::Validate};
use restaurant_directory::{
    CacheRefreshWorker, CliConfig, DataHelper, DirectoryApp, LocalStorage, MemoryMap,
    MemoryNavigator, TomlConfig, UpdateOutcome,
};
use std::path::Path;
use std::sync::Arc;

struct Summary {
    outcome: UpdateOutcome,
    output_path: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting restaurant-directory");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file {}", path))?;
            run(&config).await
        }
        None => run(&cli).await,
    };

    match result {
        Ok(summary) => {
            println!("📁 Page written to: {}", summary.output_path);
            match summary.outcome {
                UpdateOutcome::Rendered(count) => {
                    println!("✅ Showing {} restaurants", count);
                }
                outcome => {
                    eprintln!("⚠️  No restaurants could be loaded ({:?})", outcome);
                    std::process::exit(2);
                }
            }
        }
        Err(e) => {
            tracing::error!("❌ Directory load failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: &C) -> restaurant_directory::Result<Summary> {
    config.validate()?;

    let source = Arc::new(DataHelper::from_config(
        config,
        LocalStorage::new(config.cache_dir()),
    )?);
    let worker = Arc::new(CacheRefreshWorker::new(
        Arc::clone(&source),
        config.refresh_interval_seconds(),
    ));

    let app: DirectoryApp<_, MemoryMap> =
        DirectoryApp::new(source, Arc::new(MemoryNavigator::new())).with_worker(worker.clone());

    app.init().await;
    app.on_page_ready().await;

    let selection = config.initial_selection();
    let controller = app.controller();
    if !controller.select_cuisine(&selection.cuisine).await {
        tracing::warn!("Cuisine '{}' is not offered; showing all", selection.cuisine);
    }
    if !controller.select_neighborhood(&selection.neighborhood).await {
        tracing::warn!(
            "Neighborhood '{}' is not offered; showing all",
            selection.neighborhood
        );
    }

    let outcome = app.on_map_ready().await;
    let html = controller.render_document().await;

    let output = Path::new(config.output_path());
    let dir = output
        .parent()
        .and_then(|p| p.to_str())
        .filter(|p| !p.is_empty())
        .unwrap_or(".");
    let file_name = output
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("index.html");
    LocalStorage::new(dir)
        .write_file(file_name, html.as_bytes())
        .await?;

    worker.unregister();

    Ok(Summary {
        outcome,
        output_path: config.output_path().to_string(),
    })
}
