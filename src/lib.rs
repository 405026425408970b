pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(test)]
mod testing;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{
    cache::RestaurantCache,
    helper::DataHelper,
    http::ApiClient,
    map::{MemoryMap, MemoryNavigator},
    storage::LocalStorage,
    worker::CacheRefreshWorker,
};
pub use crate::core::{
    bootstrap::DirectoryApp,
    controller::{DirectoryController, UpdateOutcome},
};
pub use crate::utils::error::{DirectoryError, Result};
