use crate::domain::model::{FilterSelection, ALL};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_CACHE_DIR: &str = "./.cache";
const DEFAULT_OUTPUT_PATH: &str = "./output/index.html";
const DEFAULT_IMAGE_BASE: &str = "/img";

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub cache: Option<CacheConfig>,
    pub output: Option<OutputConfig>,
    pub worker: Option<WorkerConfig>,
    pub filters: Option<FiltersConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub image_base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    pub enabled: bool,
    pub refresh_interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    pub cuisine: Option<String>,
    pub neighborhood: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_ENDPOINT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn worker_enabled(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| w.enabled)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn cache_dir(&self) -> &str {
        self.cache
            .as_ref()
            .map(|c| c.directory.as_str())
            .unwrap_or(DEFAULT_CACHE_DIR)
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .map(|o| o.path.as_str())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn image_base(&self) -> &str {
        self.source
            .image_base
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_BASE)
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn refresh_interval_seconds(&self) -> Option<u64> {
        self.worker
            .as_ref()
            .filter(|w| w.enabled)
            .and_then(|w| w.refresh_interval_seconds)
    }

    fn initial_selection(&self) -> FilterSelection {
        let filters = self.filters.as_ref();
        FilterSelection::new(
            filters.and_then(|f| f.cuisine.clone()).unwrap_or_else(|| ALL.to_string()),
            filters
                .and_then(|f| f.neighborhood.clone())
                .unwrap_or_else(|| ALL.to_string()),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_api_endpoint("source.endpoint", &self.source.endpoint)?;
        validation::validate_seconds("source.timeout_seconds", self.timeout_seconds())?;
        validation::validate_path("cache.directory", self.cache_dir())?;
        validation::validate_path("output.path", self.output_path())?;

        if self.worker_enabled() {
            let interval = self
                .worker
                .as_ref()
                .and_then(|w| w.refresh_interval_seconds)
                .ok_or_else(|| DirectoryError::MissingConfigError {
                    field: "worker.refresh_interval_seconds".to_string(),
                })?;
            validation::validate_seconds("worker.refresh_interval_seconds", interval)?;
        }

        Ok(())
    }
}
