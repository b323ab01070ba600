pub mod engine;
pub mod reference_data;
pub mod report;
pub mod table;

pub use crate::domain::model::{
    AdditionalSuggestions, CropGuide, CropName, RecommendationBundle, SoilType, WaterLevelBand,
};
pub use crate::domain::ports::{ConfigProvider, RecordStore};
pub use crate::utils::error::Result;
