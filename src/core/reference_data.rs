//! Advisory reference tables.
//!
//! Static, read-only agronomic data keyed by the exact soil / water-level
//! labels captured on the data-entry form. Nothing here changes at runtime.

use crate::core::table::FallbackTable;
use crate::domain::model::{CropGuide, CropName, SoilType, WaterLevelBand};

/// The complete set of tables the engine queries.
#[derive(Debug)]
pub struct AdvisoryTables {
    /// soil → water level → crops in display order
    pub suitability: FallbackTable<FallbackTable<&'static [CropName]>>,
    pub guides: FallbackTable<CropGuide>,
    pub rotation: FallbackTable<&'static str>,
    pub intercropping: FallbackTable<&'static str>,
    pub irrigation: FallbackTable<&'static str>,
}

pub static STANDARD_TABLES: AdvisoryTables = AdvisoryTables {
    suitability: FallbackTable::new(SUITABILITY, FallbackTable::new(&[], NO_CROPS)),
    guides: FallbackTable::new(CROP_GUIDES, PLACEHOLDER_GUIDE),
    rotation: FallbackTable::new(ROTATION, GENERIC_ROTATION),
    intercropping: FallbackTable::new(INTERCROPPING, GENERIC_INTERCROPPING),
    irrigation: FallbackTable::new(IRRIGATION, GENERIC_IRRIGATION),
};

// ============================================================================
// KEYS
// ============================================================================

const BLACK: &str = SoilType::BlackSoil.label();
const LATERITE: &str = SoilType::LateriteSoil.label();
const ALLUVIAL: &str = SoilType::AlluvialSoil.label();
const RED: &str = SoilType::RedSoil.label();
const MARSHY: &str = SoilType::MarshyPeatySoil.label();

const LOW: &str = WaterLevelBand::Low.label();
const MODERATE: &str = WaterLevelBand::Moderate.label();
const HIGH: &str = WaterLevelBand::High.label();
const WATERLOGGED: &str = WaterLevelBand::Waterlogged.label();

// ============================================================================
// CROP SUITABILITY
// ============================================================================

const NO_CROPS: &[CropName] = &[];

const BLACK_SOIL_CROPS: &[(&str, &[CropName])] = &[
    (LOW, &["Cotton", "Groundnut", "Jowar (Sorghum)", "Soybean"]),
    (
        MODERATE,
        &["Cotton", "Soybean", "Jowar (Sorghum)", "Wheat", "Sunflower"],
    ),
    (HIGH, &["Sugarcane", "Rice", "Turmeric", "Banana"]),
    (WATERLOGGED, &["Rice", "Sugarcane"]),
];

const LATERITE_SOIL_CROPS: &[(&str, &[CropName])] = &[
    (LOW, &["Cashew", "Groundnut", "Bajra (Pearl Millet)"]),
    (MODERATE, &["Cashew", "Sugarcane", "Turmeric", "Mango"]),
    (HIGH, &["Rice", "Sugarcane", "Banana"]),
    (WATERLOGGED, &["Rice"]),
];

const ALLUVIAL_SOIL_CROPS: &[(&str, &[CropName])] = &[
    (LOW, &["Wheat", "Gram (Chana)", "Barley", "Mustard"]),
    (MODERATE, &["Wheat", "Rice", "Sugarcane", "Cotton", "Maize"]),
    (HIGH, &["Rice", "Sugarcane", "Banana", "Turmeric"]),
    (WATERLOGGED, &["Rice", "Jute"]),
];

const RED_SOIL_CROPS: &[(&str, &[CropName])] = &[
    (
        LOW,
        &["Groundnut", "Bajra (Pearl Millet)", "Ragi", "Gram (Chana)"],
    ),
    (MODERATE, &["Groundnut", "Jowar (Sorghum)", "Cotton", "Maize"]),
    (HIGH, &["Rice", "Sugarcane"]),
    (WATERLOGGED, &["Rice"]),
];

const MARSHY_SOIL_CROPS: &[(&str, &[CropName])] = &[
    (LOW, &["Rice", "Jute", "Sugarcane"]),
    (MODERATE, &["Rice", "Sugarcane", "Banana"]),
    (HIGH, &["Rice", "Sugarcane", "Aquaculture"]),
    (WATERLOGGED, &["Rice", "Aquaculture", "Jute"]),
];

const SUITABILITY: &[(&str, FallbackTable<&[CropName]>)] = &[
    (BLACK, FallbackTable::new(BLACK_SOIL_CROPS, NO_CROPS)),
    (LATERITE, FallbackTable::new(LATERITE_SOIL_CROPS, NO_CROPS)),
    (ALLUVIAL, FallbackTable::new(ALLUVIAL_SOIL_CROPS, NO_CROPS)),
    (RED, FallbackTable::new(RED_SOIL_CROPS, NO_CROPS)),
    (MARSHY, FallbackTable::new(MARSHY_SOIL_CROPS, NO_CROPS)),
];

// ============================================================================
// CROP GUIDES
// ============================================================================

pub const PLACEHOLDER_GUIDE: CropGuide = CropGuide {
    season: "Information not available",
    icon: "🌱",
    timing: "Seasonal information not available for this crop.",
    soil_prep: "Soil preparation details not available.",
    water_need: "Water management information not available.",
    care_instructions: "Crop care instructions not available.",
};

const CROP_GUIDES: &[(&str, CropGuide)] = &[
    (
        "Rice",
        CropGuide {
            season: "Kharif (June-October)",
            icon: "🌾",
            timing: "Sow: June-July, Harvest: October-November. Best time for sowing is with onset of monsoon.",
            soil_prep: "Clayey loam with good water retention. pH: 5.5-6.5. Requires puddling for better growth.",
            water_need: "Requires standing water (5-10cm depth). Ideal for high water level areas. Total water requirement: 1200-1500mm.",
            care_instructions: "Transplant 25-30 day old seedlings. Control weeds, manage water levels, watch for blast and stem borer.",
        },
    ),
    (
        "Wheat",
        CropGuide {
            season: "Rabi (November-March)",
            icon: "🌾",
            timing: "Sow: November-December, Harvest: March-April. Ideal temperature: 20-25°C during growing period.",
            soil_prep: "Well-drained loamy soil. pH: 6.0-7.5. Avoid waterlogged conditions.",
            water_need: "Moderate water requirements (4-6 irrigations). Critical stages: crown root, tillering, flowering.",
            care_instructions: "Seed rate: 100-125 kg/ha. Fertilizer: N:P:K - 120:60:40 kg/ha. Control rust and aphids.",
        },
    ),
    (
        "Cotton",
        CropGuide {
            season: "Kharif (June-December)",
            icon: "🧵",
            timing: "Sow: June-July, Harvest: December-January. Requires warm temperature (25-35°C).",
            soil_prep: "Black soil preferred, well-drained. pH: 6.0-8.0. Good for water moderate areas.",
            water_need: "Moderate water requirements. Drought tolerant but needs irrigation during flowering and boll formation.",
            care_instructions: "Regular weeding, pest control for bollworms. Spacing: 60-90 cm between plants.",
        },
    ),
    (
        "Sugarcane",
        CropGuide {
            season: "Year-round (12-18 months)",
            icon: "🎋",
            timing: "Plant: February-March or October-November. Harvest: After 12-18 months.",
            soil_prep: "Deep, well-drained loamy soil. pH: 6.5-7.5. Requires good organic matter.",
            water_need: "High water requirements. Needs regular irrigation. Total water: 1500-2500mm.",
            care_instructions: "Planting: 3-budded setts. Fertilizer: 200-300 kg N/ha. Control red rot and borers.",
        },
    ),
    (
        "Groundnut",
        CropGuide {
            season: "Kharif (June-September)",
            icon: "🥜",
            timing: "Sow: June-July, Harvest: September-October. Requires warm climate.",
            soil_prep: "Well-drained sandy loam. pH: 6.0-7.0. Avoid heavy soils.",
            water_need: "Low to moderate water needs. Sensitive to waterlogging.",
            care_instructions: "Seed rate: 100-120 kg/ha. Inoculate with Rhizobium. Control leaf spot and root rot.",
        },
    ),
];

// ============================================================================
// ROTATION / INTERCROPPING / IRRIGATION
// ============================================================================

pub const GENERIC_ROTATION: &str =
    "Include legume crops in your rotation cycle to maintain soil health and fertility.";

const ROTATION: &[(&str, &str)] = &[
    (
        BLACK,
        "Rotate cotton with legumes like soybean or pigeon pea to improve soil nitrogen and break pest cycles.",
    ),
    (
        RED,
        "Rotate millets with pulses like green gram or black gram. Include oilseeds in rotation.",
    ),
    (
        ALLUVIAL,
        "Rice-wheat rotation or add legumes in rotation. Include mustard or maize for diversification.",
    ),
    (
        LATERITE,
        "Include groundnut and pulses in rotation with cashew. Practice mixed cropping with legumes.",
    ),
    (
        MARSHY,
        "Rice-fish rotation or include jute. Practice integrated farming system.",
    ),
];

pub const GENERIC_INTERCROPPING: &str =
    "Consider intercropping with compatible crops for better land utilization and risk management.";

const INTERCROPPING: &[(&str, &str)] = &[
    (BLACK, "Cotton with groundnut or soybean. Sorghum with pigeon pea."),
    (RED, "Pearl millet with cluster bean. Groundnut with pearl millet."),
    (ALLUVIAL, "Wheat with chickpea. Rice with fish culture."),
    (
        LATERITE,
        "Cashew with pineapple or legumes. Coconut with pepper or cocoa.",
    ),
    (MARSHY, "Rice with fish or prawns. Include aquatic plants."),
];

pub const GENERIC_IRRIGATION: &str =
    "Optimize irrigation based on crop requirements and soil moisture conditions.";

const IRRIGATION: &[(&str, &str)] = &[
    (
        LOW,
        "Use drip irrigation and mulching to conserve water. Grow drought-resistant crops and practice rainwater harvesting.",
    ),
    (
        MODERATE,
        "Schedule irrigation based on crop growth stages. Use sprinkler irrigation for efficient water use.",
    ),
    (
        HIGH,
        "Ensure proper drainage to prevent waterlogging. Practice controlled irrigation and grow water-loving crops.",
    ),
    (
        WATERLOGGED,
        "Install drainage systems. Grow aquatic crops or practice integrated fish farming with crops.",
    ),
];
