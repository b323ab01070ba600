pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::JsonFileStore;
pub use crate::app::service::{AdminSession, AdvisoryService, DeletionOutcome, FarmerSession};
pub use crate::config::TomlConfig;
pub use crate::core::engine::RecommendationEngine;
pub use crate::domain::model::{
    AdditionalSuggestions, CropGuide, GeoPoint, Observation, RecommendationBundle, SoilType,
    Submission, WaterLevelBand,
};
pub use crate::utils::error::{AdvisorError, Result};
