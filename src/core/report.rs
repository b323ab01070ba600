use crate::domain::model::Submission;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Submission counts grouped by soil type, crop and water level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FarmReport {
    pub soil: Vec<CategoryCount>,
    pub crop: Vec<CategoryCount>,
    pub water: Vec<CategoryCount>,
}

fn count_by<'a>(
    submissions: &'a [Submission],
    key: impl Fn(&'a Submission) -> &'a str,
) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for submission in submissions {
        let label = key(submission);
        if !label.is_empty() {
            *counts.entry(label).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// Empty values are skipped, so feedback-only rows never show up. Groups are
/// ordered by label.
pub fn build_report(submissions: &[Submission]) -> FarmReport {
    FarmReport {
        soil: count_by(submissions, |s| s.soil_type.as_str()),
        crop: count_by(submissions, |s| s.crop.as_str()),
        water: count_by(submissions, |s| s.water_level.as_str()),
    }
}

impl FarmReport {
    pub fn is_empty(&self) -> bool {
        self.soil.is_empty() && self.crop.is_empty() && self.water.is_empty()
    }

    /// Writes `soil_report.csv`, `crop_report.csv` and `water_report.csv`
    /// into `dir`, creating it if needed.
    pub fn write_csv<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let groups = [
            ("soil_report.csv", "soil_type", &self.soil),
            ("crop_report.csv", "crop", &self.crop),
            ("water_report.csv", "water_level", &self.water),
        ];

        let mut written = Vec::with_capacity(groups.len());
        for (filename, header, rows) in groups {
            let path = dir.join(filename);
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record([header, "count"])?;
            for row in rows.iter() {
                writer.write_record([row.label.as_str(), row.count.to_string().as_str()])?;
            }
            writer.flush()?;
            tracing::debug!("Wrote {} rows to {}", rows.len(), path.display());
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(soil: &str, water: &str, crop: &str) -> Submission {
        Submission {
            id: 0,
            farmer_name: "Test".to_string(),
            soil_type: soil.to_string(),
            water_level: water.to_string(),
            crop: crop.to_string(),
            farm_address: String::new(),
            location: None,
            created_at: None,
            feedback: None,
            recommendation: None,
        }
    }

    #[test]
    fn test_counts_skip_empty_values() {
        let rows = vec![
            submission("Red Soil", "Low (Below 2m)", "Ragi"),
            submission("Black Soil", "Low (Below 2m)", "Cotton"),
            submission("Red Soil", "High (Above 5m)", "Rice"),
            submission("", "", ""),
        ];

        let report = build_report(&rows);

        assert_eq!(
            report.soil,
            vec![
                CategoryCount { label: "Black Soil".to_string(), count: 1 },
                CategoryCount { label: "Red Soil".to_string(), count: 2 },
            ]
        );
        assert_eq!(report.crop.len(), 3);
        assert_eq!(report.water[1].label, "Low (Below 2m)");
        assert_eq!(report.water[1].count, 2);
    }

    #[test]
    fn test_empty_input_gives_empty_report() {
        assert!(build_report(&[]).is_empty());
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = build_report(&[submission("Red Soil", "Low (Below 2m)", "Ragi")]);

        let paths = report.write_csv(dir.path()).unwrap();
        assert_eq!(paths.len(), 3);

        let soil_csv = std::fs::read_to_string(dir.path().join("soil_report.csv")).unwrap();
        assert_eq!(soil_csv, "soil_type,count\nRed Soil,1\n");
    }
}
