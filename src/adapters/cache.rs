use crate::domain::model::Restaurant;
use crate::domain::ports::Storage;
use crate::utils::error::{DirectoryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CACHE_KEY: &str = "restaurants.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRestaurants {
    pub fetched_at: DateTime<Utc>,
    pub restaurants: Vec<Restaurant>,
}

impl CachedRestaurants {
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.fetched_at
    }
}

/// Offline copy of the last successful restaurants fetch.
#[derive(Debug, Clone)]
pub struct RestaurantCache<S: Storage> {
    storage: S,
}

impl<S: Storage> RestaurantCache<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn init(&self) -> Result<()> {
        match self.load().await? {
            Some(snapshot) => tracing::info!(
                "Restaurant cache ready: {} restaurants, {}s old",
                snapshot.restaurants.len(),
                snapshot.age().num_seconds()
            ),
            None => tracing::info!("Restaurant cache ready (empty)"),
        }
        Ok(())
    }

    /// Returns `None` when nothing has been cached yet.
    pub async fn load(&self) -> Result<Option<CachedRestaurants>> {
        match self.storage.read_file(CACHE_KEY).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(DirectoryError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn store(&self, restaurants: &[Restaurant]) -> Result<()> {
        let snapshot = CachedRestaurants {
            fetched_at: Utc::now(),
            restaurants: restaurants.to_vec(),
        };
        let data = serde_json::to_vec(&snapshot)?;
        self.storage.write_file(CACHE_KEY, &data).await?;
        tracing::debug!("Cached {} restaurants", restaurants.len());
        Ok(())
    }
}
