//! Plain-text views for the CLI.

use crate::core::engine::RecommendationEngine;
use crate::core::report::{CategoryCount, FarmReport};
use crate::domain::model::{
    DashboardEntry, Farmer, RecommendationBundle, SoilType, Submission, WaterLevelBand,
};

pub const NO_SUGGESTIONS: &str = "No specific recommendations; see general guidance below.";

pub fn render_bundle(
    soil_type: &str,
    water_level: &str,
    selected_crop: &str,
    bundle: &RecommendationBundle,
) -> String {
    let mut lines = vec![
        format!("Soil: {}  |  Water level: {}", soil_type, water_level),
        String::new(),
        "Recommended crops:".to_string(),
    ];
    if bundle.has_recommendations() {
        lines.extend(
            bundle
                .recommended_crops
                .iter()
                .enumerate()
                .map(|(rank, crop)| format!("  {}. {}", rank + 1, crop)),
        );
    } else {
        lines.push(format!("  {}", NO_SUGGESTIONS));
    }

    let guide = bundle.crop_guide;
    let advice = &bundle.additional_suggestions;
    lines.extend([
        String::new(),
        format!("{} {} guide", guide.icon, selected_crop),
        format!("  Season:     {}", guide.season),
        format!("  Timing:     {}", guide.timing),
        format!("  Soil prep:  {}", guide.soil_prep),
        format!("  Water:      {}", guide.water_need),
        format!("  Care:       {}", guide.care_instructions),
        String::new(),
        format!("Crop rotation:  {}", advice.rotation),
        format!("Intercropping:  {}", advice.intercropping),
        format!("Irrigation:     {}", advice.irrigation),
    ]);
    lines.join("\n")
}

fn section<T: std::fmt::Display>(title: &str, items: impl IntoIterator<Item = T>) -> String {
    let mut out = format!("{}:", title);
    for item in items {
        out.push_str(&format!("\n  {}", item));
    }
    out
}

pub fn render_catalog(engine: &RecommendationEngine) -> String {
    [
        section("Soil types", SoilType::ALL),
        section("Water levels", WaterLevelBand::ALL),
        section("Crops with cultivation guides", engine.tables().guides.keys()),
    ]
    .join("\n")
}

pub fn render_dashboard(entries: &[DashboardEntry]) -> String {
    if entries.is_empty() {
        return "No submissions yet.".to_string();
    }

    let mut lines = Vec::new();
    for entry in entries {
        let s = &entry.submission;
        let registration = entry
            .farmer_registration_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "#{} {} (farmer {}) {} {} | {} | {} | {}",
            s.id,
            s.farmer_name,
            registration,
            entry.formatted_date,
            entry.formatted_time,
            s.soil_type,
            s.water_level,
            s.crop
        ));
        if !s.farm_address.is_empty() {
            lines.push(format!("    Address: {}", s.farm_address));
        }
        if let Some(location) = s.location {
            lines.push(format!(
                "    Location: {:.4}, {:.4}",
                location.latitude, location.longitude
            ));
        }
        if let Some(recommendation) = &s.recommendation {
            lines.push(format!("    Recommendation: {}", recommendation));
        }
    }
    lines.join("\n")
}

pub fn render_farmers(farmers: &[Farmer]) -> String {
    if farmers.is_empty() {
        return "No registered farmers.".to_string();
    }
    farmers
        .iter()
        .map(|f| format!("#{} {} ({})", f.id, f.name, f.mobile))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_feedback(rows: &[Submission]) -> String {
    if rows.is_empty() {
        return "No feedback yet.".to_string();
    }
    rows.iter()
        .map(|s| format!("{}: {}", s.farmer_name, s.feedback.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_counts(title: &str, counts: &[CategoryCount]) -> String {
    if counts.is_empty() {
        return section(title, ["(none)"]);
    }
    section(
        title,
        counts
            .iter()
            .map(|row| format!("{:<24} {}", row.label, row.count)),
    )
}

pub fn render_report(report: &FarmReport) -> String {
    [
        render_counts("Soil types", &report.soil),
        render_counts("Crops", &report.crop),
        render_counts("Water levels", &report.water),
    ]
    .join("\n")
}
