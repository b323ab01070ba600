use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type CropName = &'static str;

/// Broad agronomic soil category. The label is the exact key used by the
/// reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoilType {
    BlackSoil,
    LateriteSoil,
    AlluvialSoil,
    RedSoil,
    MarshyPeatySoil,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::BlackSoil,
        SoilType::LateriteSoil,
        SoilType::AlluvialSoil,
        SoilType::RedSoil,
        SoilType::MarshyPeatySoil,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SoilType::BlackSoil => "Black Soil",
            SoilType::LateriteSoil => "Laterite Soil",
            SoilType::AlluvialSoil => "Alluvial Soil",
            SoilType::RedSoil => "Red Soil",
            SoilType::MarshyPeatySoil => "Marshy and Peaty Soil",
        }
    }

    /// Exact, case-sensitive match against [`SoilType::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|soil| soil.label() == label)
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Depth-to-water-table band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WaterLevelBand {
    Low,
    Moderate,
    High,
    Waterlogged,
}

impl WaterLevelBand {
    pub const ALL: [WaterLevelBand; 4] = [
        WaterLevelBand::Low,
        WaterLevelBand::Moderate,
        WaterLevelBand::High,
        WaterLevelBand::Waterlogged,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            WaterLevelBand::Low => "Low (Below 2m)",
            WaterLevelBand::Moderate => "Moderate (2m - 5m)",
            WaterLevelBand::High => "High (Above 5m)",
            WaterLevelBand::Waterlogged => "Waterlogged Area",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.label() == label)
    }
}

impl fmt::Display for WaterLevelBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cultivation guide for one crop. All fields are display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropGuide {
    pub season: &'static str,
    pub icon: &'static str,
    pub timing: &'static str,
    pub soil_prep: &'static str,
    pub water_need: &'static str,
    pub care_instructions: &'static str,
}

impl CropGuide {
    pub fn fields(&self) -> [(&'static str, &'static str); 6] {
        [
            ("season", self.season),
            ("icon", self.icon),
            ("timing", self.timing),
            ("soil_prep", self.soil_prep),
            ("water_need", self.water_need),
            ("care_instructions", self.care_instructions),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdditionalSuggestions {
    pub rotation: &'static str,
    pub intercropping: &'static str,
    pub irrigation: &'static str,
}

/// Everything the advisory page needs for one farmer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationBundle {
    pub recommended_crops: &'static [CropName],
    pub crop_guide: &'static CropGuide,
    pub additional_suggestions: AdditionalSuggestions,
}

impl RecommendationBundle {
    pub fn has_recommendations(&self) -> bool {
        !self.recommended_crops.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Farm records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: u64,
    pub name: String,
    pub mobile: String,
    pub password_digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: u64,
    pub username: String,
    pub password_digest: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate_range("latitude", latitude, -90.0, 90.0)?;
        validate_range("longitude", longitude, -180.0, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// One row of farmer data. Feedback messages share this shape with only
/// `farmer_name` and `feedback` filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub farmer_name: String,
    #[serde(default)]
    pub soil_type: String,
    #[serde(default)]
    pub water_level: String,
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub farm_address: String,
    pub location: Option<GeoPoint>,
    pub created_at: Option<NaiveDateTime>,
    pub feedback: Option<String>,
    pub recommendation: Option<String>,
}

impl Submission {
    pub fn has_crop(&self) -> bool {
        !self.crop.is_empty()
    }

    pub fn has_feedback(&self) -> bool {
        self.feedback.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// What a farmer enters on the data-entry form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observation {
    pub soil_type: String,
    pub water_level: String,
    pub crop: String,
    pub farm_address: String,
    pub location: Option<GeoPoint>,
}

/// Administrator account created at start-up from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

/// A submission as shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardEntry {
    pub submission: Submission,
    pub farmer_registration_id: Option<u64>,
    pub formatted_date: String,
    pub formatted_time: String,
}
