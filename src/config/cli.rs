use crate::domain::model::FilterSelection;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_api_endpoint, validate_filter_value, validate_path, validate_seconds, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "restaurant-directory")]
#[command(about = "Browse restaurants by neighborhood and cuisine")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:1337/restaurants")]
    pub api_endpoint: String,

    #[arg(long, default_value = "./.cache")]
    pub cache_dir: String,

    #[arg(long, default_value = "./output/index.html")]
    pub output_path: String,

    #[arg(long, default_value = "/img")]
    pub image_base: String,

    #[arg(long, default_value = "all")]
    pub cuisine: String,

    #[arg(long, default_value = "all")]
    pub neighborhood: String,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Keep the offline cache warm by re-fetching on this interval")]
    pub refresh_interval_seconds: Option<u64>,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn cache_dir(&self) -> &str {
        &self.cache_dir
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn image_base(&self) -> &str {
        &self.image_base
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn refresh_interval_seconds(&self) -> Option<u64> {
        self.refresh_interval_seconds
    }

    fn initial_selection(&self) -> FilterSelection {
        FilterSelection::new(self.cuisine.clone(), self.neighborhood.clone())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_api_endpoint("api_endpoint", &self.api_endpoint)?;
        validate_path("cache_dir", &self.cache_dir)?;
        validate_path("output_path", &self.output_path)?;
        validate_seconds("timeout_seconds", self.timeout_seconds)?;
        if let Some(interval) = self.refresh_interval_seconds {
            validate_seconds("refresh_interval_seconds", interval)?;
        }
        validate_filter_value("cuisine", &self.cuisine)?;
        validate_filter_value("neighborhood", &self.neighborhood)?;
        Ok(())
    }
}
