use crate::core::reference_data::{AdvisoryTables, STANDARD_TABLES};
use crate::domain::model::{
    AdditionalSuggestions, CropGuide, CropName, RecommendationBundle,
};

/// Rule-based crop advisor.
///
/// Every lookup is total: unknown soil types, water levels or crop names fall
/// back to an empty crop list, generic advice or the placeholder guide. The
/// engine only holds a reference to static tables, so it is `Copy` and can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine {
    tables: &'static AdvisoryTables,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(&STANDARD_TABLES)
    }
}

impl RecommendationEngine {
    pub const fn new(tables: &'static AdvisoryTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'static AdvisoryTables {
        self.tables
    }

    /// Suitable crops in display order; empty when either key is unknown.
    pub fn recommend_crops(&self, soil_type: &str, water_level: &str) -> &'static [CropName] {
        let tables: &'static AdvisoryTables = self.tables;
        let crops = *tables
            .suitability
            .get_or_default(soil_type)
            .get_or_default(water_level);

        if crops.is_empty() {
            tracing::debug!(
                "No crop suggestions for soil '{}' / water level '{}'",
                soil_type,
                water_level
            );
        }
        crops
    }

    pub fn crop_guide(&self, crop_name: &str) -> &'static CropGuide {
        let tables: &'static AdvisoryTables = self.tables;
        if !tables.guides.contains_key(crop_name) {
            tracing::debug!("No cultivation guide for '{}', using placeholder", crop_name);
        }
        tables.guides.get_or_default(crop_name)
    }

    /// Rotation and intercropping advice depend only on the soil, irrigation
    /// advice only on the water level.
    pub fn additional_suggestions(
        &self,
        soil_type: &str,
        water_level: &str,
    ) -> AdditionalSuggestions {
        let tables: &'static AdvisoryTables = self.tables;
        AdditionalSuggestions {
            rotation: tables.rotation.get_or_default(soil_type),
            intercropping: tables.intercropping.get_or_default(soil_type),
            irrigation: tables.irrigation.get_or_default(water_level),
        }
    }

    pub fn build_bundle(
        &self,
        soil_type: &str,
        water_level: &str,
        selected_crop: &str,
    ) -> RecommendationBundle {
        RecommendationBundle {
            recommended_crops: self.recommend_crops(soil_type, water_level),
            crop_guide: self.crop_guide(selected_crop),
            additional_suggestions: self.additional_suggestions(soil_type, water_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::FallbackTable;

    const LOAM_CROPS: &[(&str, &[CropName])] = &[("Wet", &["Taro"])];
    const TINY_SUITABILITY: &[(&str, FallbackTable<&[CropName]>)] =
        &[("Loam", FallbackTable::new(LOAM_CROPS, &[]))];

    static TINY_TABLES: AdvisoryTables = AdvisoryTables {
        suitability: FallbackTable::new(TINY_SUITABILITY, FallbackTable::new(&[], &[])),
        guides: FallbackTable::new(&[], crate::core::reference_data::PLACEHOLDER_GUIDE),
        rotation: FallbackTable::new(&[("Loam", "rotate taro")], "rotate"),
        intercropping: FallbackTable::new(&[], "intercrop"),
        irrigation: FallbackTable::new(&[("Wet", "drain")], "irrigate"),
    };

    #[test]
    fn test_engine_reads_the_tables_it_was_given() {
        let engine = RecommendationEngine::new(&TINY_TABLES);

        assert_eq!(engine.recommend_crops("Loam", "Wet"), &["Taro"]);
        assert!(engine.recommend_crops("Loam", "Dry").is_empty());
        assert!(engine.recommend_crops("Black Soil", "Low (Below 2m)").is_empty());

        let advice = engine.additional_suggestions("Loam", "Dry");
        assert_eq!(advice.rotation, "rotate taro");
        assert_eq!(advice.intercropping, "intercrop");
        assert_eq!(advice.irrigation, "irrigate");
    }

    #[test]
    fn test_default_engine_uses_standard_tables() {
        let engine = RecommendationEngine::default();
        assert!(std::ptr::eq(engine.tables(), &STANDARD_TABLES));
        assert_eq!(
            engine.recommend_crops("Laterite Soil", "Waterlogged Area"),
            &["Rice"]
        );
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecommendationEngine>();
    }
}
