//! Configuration module for Trackfy.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Simulation, Storage, and Display.

mod display_config;
mod simulation_config;
mod storage_config;

pub use display_config::DisplayEnvConfig;
pub use simulation_config::SimulationEnvConfig;
pub use storage_config::{StorageEnvConfig, StoreKind};

use crate::application::{DailyCache, MasterListBuilder, RevenueTargets};
use crate::domain::repositories::KeyValueStore;
use crate::domain::sales::SalesSynthesizer;
use crate::infrastructure::{FileStore, InMemoryStore};
use anyhow::{Context, Result};
use tracing::info;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub simulation: SimulationEnvConfig,
    pub storage: StorageEnvConfig,
    pub display: DisplayEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let simulation = SimulationEnvConfig::from_env();
        let storage = StorageEnvConfig::from_env().context("Failed to load storage config")?;
        let display = DisplayEnvConfig::from_env().context("Failed to load display config")?;

        Ok(Self {
            simulation,
            storage,
            display,
        })
    }

    pub fn targets(&self) -> RevenueTargets {
        RevenueTargets {
            monthly: self.simulation.monthly_target,
            annual: self.simulation.annual_target,
        }
    }

    /// Opens the configured day-bucket store
    pub fn create_store(&self) -> Result<Box<dyn KeyValueStore>> {
        match self.storage.kind {
            StoreKind::Memory => {
                info!("Using in-memory sales store; nothing will be persisted");
                Ok(Box::new(InMemoryStore::new()))
            }
            StoreKind::File => {
                let dir = match &self.storage.dir {
                    Some(dir) => dir.clone(),
                    None => FileStore::default_dir()?,
                };
                let store = FileStore::open(&dir)
                    .with_context(|| format!("Failed to open sales store at {:?}", dir))?;
                info!("Using sales store at {:?}", store.dir());
                Ok(Box::new(store))
            }
        }
    }

    /// Wires a master list builder over `store` with the configured target and prefix
    pub fn create_builder<S: KeyValueStore>(&self, store: S) -> MasterListBuilder<S> {
        MasterListBuilder::new(
            DailyCache::new(store, self.storage.key_prefix.clone()),
            SalesSynthesizer::default(),
            self.simulation.daily_target,
        )
    }
}
