use agri_advisor::domain::model::AdminSeed;
use agri_advisor::{AdvisorError, AdvisoryService, GeoPoint, JsonFileStore, Observation};
use anyhow::Result;
use tempfile::TempDir;

fn observation(soil: &str, water: &str, crop: &str) -> Observation {
    Observation {
        soil_type: soil.to_string(),
        water_level: water.to_string(),
        crop: crop.to_string(),
        ..Default::default()
    }
}

async fn service_with_admin() -> Result<AdvisoryService<JsonFileStore>> {
    let service = AdvisoryService::new(JsonFileStore::in_memory());
    service
        .seed_admins(&[AdminSeed {
            username: "admin".to_string(),
            password: "admin-pw".to_string(),
        }])
        .await?;
    Ok(service)
}

/// 農民提交資料後立即取得建議
#[tokio::test]
async fn test_submit_then_suggestion() -> Result<()> {
    let service = service_with_admin().await?;
    service.register_farmer("Ravi", "9876543210", "pw").await?;
    let session = service.login_farmer("Ravi", "pw").await?;

    let mut obs = observation("Black Soil", "Low (Below 2m)", "Cotton");
    obs.farm_address = "Sample Farm, Maharashtra".to_string();
    obs.location = Some(GeoPoint::new(19.7515, 75.7139)?);

    let (submission, bundle) = service.submit_observation(&session, obs).await?;
    assert_eq!(submission.id, 1);
    assert_eq!(submission.farmer_name, "Ravi");
    assert!(submission.created_at.is_some());
    assert_eq!(
        bundle.recommended_crops,
        &["Cotton", "Groundnut", "Jowar (Sorghum)", "Soybean"]
    );
    assert_eq!(bundle.crop_guide.season, "Kharif (June-December)");

    service
        .submit_observation(&session, observation("Red Soil", "High (Above 5m)", "Rice"))
        .await?;
    let (latest, bundle) = service.suggestion_for(&session).await?;
    assert_eq!(latest.crop, "Rice");
    assert_eq!(bundle.recommended_crops, &["Rice", "Sugarcane"]);

    Ok(())
}

#[tokio::test]
async fn test_suggestion_without_submission_is_not_found() -> Result<()> {
    let service = service_with_admin().await?;
    service.register_farmer("Meena", "9000000001", "pw").await?;
    let session = service.login_farmer("Meena", "pw").await?;

    let err = service.suggestion_for(&session).await.unwrap_err();
    assert!(matches!(err, AdvisorError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_unknown_labels_are_stored_and_fall_back() -> Result<()> {
    let service = service_with_admin().await?;
    service.register_farmer("Ravi", "9876543210", "pw").await?;
    let session = service.login_farmer("Ravi", "pw").await?;

    let (_, bundle) = service
        .submit_observation(&session, observation("Volcanic Soil", "Low (Below 2m)", "Coffee"))
        .await?;
    assert!(!bundle.has_recommendations());
    assert_eq!(bundle.crop_guide.season, "Information not available");
    assert!(bundle
        .additional_suggestions
        .irrigation
        .starts_with("Use drip irrigation"));
    Ok(())
}

#[tokio::test]
async fn test_blank_fields_are_rejected() -> Result<()> {
    let service = service_with_admin().await?;
    service.register_farmer("Ravi", "9876543210", "pw").await?;
    let session = service.login_farmer("Ravi", "pw").await?;

    let err = service
        .submit_observation(&session, observation("Black Soil", "", "Cotton"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::ValidationError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_credentials() -> Result<()> {
    let service = service_with_admin().await?;
    service.register_farmer("Ravi", "9876543210", "pw").await?;

    assert!(matches!(
        service.login_farmer("Ravi", "wrong").await,
        Err(AdvisorError::InvalidCredentials)
    ));
    assert!(matches!(
        service.login_admin("admin", "nope").await,
        Err(AdvisorError::InvalidCredentials)
    ));
    assert_eq!(service.login_admin("admin", "admin-pw").await?.username(), "admin");

    let err = service
        .register_farmer("Other", "9876543210", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.user_friendly_message(), "Mobile number already registered!");

    let err = service.register_admin("admin", "x").await.unwrap_err();
    assert!(matches!(err, AdvisorError::DuplicateUsername { .. }));

    // seeding again does not duplicate
    let created = service
        .seed_admins(&[AdminSeed {
            username: "admin".to_string(),
            password: "admin-pw".to_string(),
        }])
        .await?;
    assert_eq!(created, 0);
    Ok(())
}

#[tokio::test]
async fn test_admin_dashboard_feedback_and_recommendations() -> Result<()> {
    let service = service_with_admin().await?;
    let admin = service.login_admin("admin", "admin-pw").await?;

    let ravi = service.register_farmer("Ravi", "9876543210", "pw").await?;
    let session = service.login_farmer("Ravi", "pw").await?;
    service
        .submit_observation(&session, observation("Black Soil", "Low (Below 2m)", "Cotton"))
        .await?;
    service
        .submit_feedback(Some("Ravi"), Some("ravi@example.com"), "Very helpful")
        .await?;
    service.submit_feedback(None, None, "Nice site").await?;
    service
        .submit_observation(&session, observation("Red Soil", "Low (Below 2m)", "Ragi"))
        .await?;

    let dashboard = service.dashboard(&admin).await?;
    assert_eq!(dashboard.len(), 2);
    assert_eq!(dashboard[0].submission.crop, "Ragi");
    assert_eq!(dashboard[1].submission.crop, "Cotton");
    assert_eq!(dashboard[0].farmer_registration_id, Some(ravi.id));
    assert_ne!(dashboard[0].formatted_date, "N/A");

    let feedback = service.feedback(&admin).await?;
    let senders: Vec<_> = feedback.iter().map(|f| f.farmer_name.as_str()).collect();
    assert_eq!(senders, vec!["Guest User", "Ravi (ravi@example.com)"]);

    let newest = dashboard[0].submission.id;
    let updated = service
        .send_recommendations(
            &admin,
            &[
                (newest, "Add compost before sowing".to_string()),
                (999, "ignored".to_string()),
                (1, "   ".to_string()),
            ],
        )
        .await?;
    assert_eq!(updated, 1);

    let (latest, _) = service.suggestion_for(&session).await?;
    assert_eq!(
        latest.recommendation.as_deref(),
        Some("Add compost before sowing")
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_farmer_cascades_and_restarts_ids() -> Result<()> {
    let service = service_with_admin().await?;
    let admin = service.login_admin("admin", "admin-pw").await?;

    let ravi = service.register_farmer("Ravi", "9876543210", "pw").await?;
    let session = service.login_farmer("Ravi", "pw").await?;
    for crop in ["Cotton", "Soybean"] {
        service
            .submit_observation(&session, observation("Black Soil", "Low (Below 2m)", crop))
            .await?;
    }

    let outcome = service.delete_farmer(&admin, ravi.id).await?;
    assert_eq!(outcome.removed_submissions, 2);
    assert!(outcome.counter_restarted);
    assert!(service.dashboard(&admin).await?.is_empty());

    let again = service.register_farmer("Meena", "9000000001", "pw").await?;
    assert_eq!(again.id, 1);

    let err = service.delete_farmer(&admin, 42).await.unwrap_err();
    assert!(matches!(err, AdvisorError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_delete_submission_messages() -> Result<()> {
    let service = service_with_admin().await?;
    let admin = service.login_admin("admin", "admin-pw").await?;
    service.register_farmer("Ravi", "9876543210", "pw").await?;
    let session = service.login_farmer("Ravi", "pw").await?;

    let (first, _) = service
        .submit_observation(&session, observation("Red Soil", "Low (Below 2m)", "Ragi"))
        .await?;
    let (second, _) = service
        .submit_observation(&session, observation("Red Soil", "Low (Below 2m)", "Ragi"))
        .await?;

    let outcome = service.delete_submission(&admin, first.id).await?;
    assert!(!outcome.counter_restarted);
    assert!(outcome
        .submission_message()
        .starts_with("Submission from Ravi (ID: 1) deleted successfully!"));

    let outcome = service.delete_submission(&admin, second.id).await?;
    assert!(outcome.counter_restarted);
    Ok(())
}

#[tokio::test]
async fn test_report_counts_and_csv_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_file = temp_dir.path().join("agri.json");

    let service = AdvisoryService::new(JsonFileStore::open(&data_file).await?);
    service.register_admin("admin", "admin-pw").await?;
    let admin = service.login_admin("admin", "admin-pw").await?;
    service.register_farmer("Ravi", "9876543210", "pw").await?;
    let session = service.login_farmer("Ravi", "pw").await?;

    for (soil, water, crop) in [
        ("Black Soil", "Low (Below 2m)", "Cotton"),
        ("Black Soil", "High (Above 5m)", "Rice"),
        ("Alluvial Soil", "High (Above 5m)", "Rice"),
    ] {
        service
            .submit_observation(&session, observation(soil, water, crop))
            .await?;
    }
    service.submit_feedback(None, None, "thanks").await?;

    let report = service.report(&admin).await?;
    let crops: Vec<_> = report
        .crop
        .iter()
        .map(|c| (c.label.as_str(), c.count))
        .collect();
    assert_eq!(crops, vec![("Cotton", 1), ("Rice", 2)]);
    assert_eq!(report.soil.len(), 2);

    let report_dir = temp_dir.path().join("reports");
    report.write_csv(&report_dir)?;
    let water_csv = std::fs::read_to_string(report_dir.join("water_report.csv"))?;
    assert_eq!(
        water_csv,
        "water_level,count\nHigh (Above 5m),2\nLow (Below 2m),1\n"
    );

    // records persisted to the data file
    let reopened = AdvisoryService::new(JsonFileStore::open(&data_file).await?);
    let admin = reopened.login_admin("admin", "admin-pw").await?;
    assert_eq!(reopened.dashboard(&admin).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_reset_ids_continues_after_highest_live_id() -> Result<()> {
    let service = service_with_admin().await?;
    let admin = service.login_admin("admin", "admin-pw").await?;
    service.register_farmer("Ravi", "9876543210", "pw").await?;
    let meena = service.register_farmer("Meena", "9000000001", "pw").await?;
    let session = service.login_farmer("Ravi", "pw").await?;
    for crop in ["Cotton", "Soybean", "Groundnut"] {
        service
            .submit_observation(&session, observation("Black Soil", "Low (Below 2m)", crop))
            .await?;
    }

    service.delete_farmer(&admin, meena.id).await?;
    service.delete_submission(&admin, 3).await?;
    service.reset_ids(&admin).await?;

    let again = service.register_farmer("Asha", "9000000002", "pw").await?;
    assert_eq!(again.id, 2);
    let (next, _) = service
        .submit_observation(&session, observation("Red Soil", "Low (Below 2m)", "Ragi"))
        .await?;
    assert_eq!(next.id, 3);
    Ok(())
}

#[tokio::test]
async fn test_delete_missing_submission_is_not_found() -> Result<()> {
    let service = service_with_admin().await?;
    let admin = service.login_admin("admin", "admin-pw").await?;

    let err = service.delete_submission(&admin, 7).await.unwrap_err();
    assert!(matches!(
        err,
        AdvisorError::NotFound {
            entity: "submission",
            ..
        }
    ));
    Ok(())
}

#[tokio::test]
async fn test_shared_name_links_to_lowest_farmer_id() -> Result<()> {
    let service = service_with_admin().await?;
    let admin = service.login_admin("admin", "admin-pw").await?;
    let first = service.register_farmer("Ravi", "9876543210", "pw").await?;
    let second = service.register_farmer("Ravi", "9876543211", "other").await?;

    assert_eq!(service.login_farmer("Ravi", "pw").await?.farmer_id(), first.id);
    let session = service.login_farmer("Ravi", "other").await?;
    assert_eq!(session.farmer_id(), second.id);

    service
        .submit_observation(&session, observation("Red Soil", "Low (Below 2m)", "Ragi"))
        .await?;
    let dashboard = service.dashboard(&admin).await?;
    assert_eq!(dashboard[0].farmer_registration_id, Some(first.id));
    Ok(())
}
