use agri_advisor::app::render;
use agri_advisor::config::{AdminLogin, CliConfig, Command, FarmerLogin};
use agri_advisor::core::ConfigProvider;
use agri_advisor::utils::error::{AdvisorError, ErrorSeverity};
use agri_advisor::utils::{logger, validation::Validate};
use agri_advisor::{
    AdminSession, AdvisoryService, FarmerSession, GeoPoint, JsonFileStore, Observation,
    RecommendationBundle, RecommendationEngine, Result, TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let outcome = match cli.config.clone() {
        Some(path) => match load_file_config(&cli, &path) {
            Ok(config) => {
                logger::init_logger(config.log_format(), cli.verbose, config.log_level());
                tracing::info!("📁 Loaded configuration from: {}", path);
                run(&cli, &config).await
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => {
            logger::init_cli_logger(cli.verbose);
            match cli.validate() {
                Ok(()) => run(&cli, &cli).await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

/// Loads the TOML file and applies command-line overrides.
fn load_file_config(cli: &CliConfig, path: &str) -> Result<TomlConfig> {
    let mut config = TomlConfig::from_file(path)?;
    if let Some(data_file) = &cli.data_file {
        config.storage.data_file = data_file.clone();
    }
    config.validate()?;
    Ok(config)
}

fn print_bundle(
    soil: &str,
    water: &str,
    crop: &str,
    bundle: &RecommendationBundle,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(bundle)?);
    } else {
        println!("{}", render::render_bundle(soil, water, crop, bundle));
    }
    Ok(())
}

async fn farmer_login(
    service: &AdvisoryService<JsonFileStore>,
    login: &FarmerLogin,
) -> Result<FarmerSession> {
    service.login_farmer(&login.name, &login.password).await
}

async fn admin_login(
    service: &AdvisoryService<JsonFileStore>,
    login: &AdminLogin,
) -> Result<AdminSession> {
    service.login_admin(&login.username, &login.password).await
}

async fn run<C: ConfigProvider>(cli: &CliConfig, config: &C) -> Result<()> {
    let engine = RecommendationEngine::default();

    // engine-only commands never touch the data file
    if !cli.needs_store() {
        if let Command::Recommend {
            soil,
            water,
            crop,
            json,
        } = &cli.command
        {
            let bundle = engine.build_bundle(soil, water, crop);
            return print_bundle(soil, water, crop, &bundle, *json);
        }
        println!("{}", render::render_catalog(&engine));
        return Ok(());
    }

    tracing::debug!("Opening data file {}", config.data_file());
    let store = JsonFileStore::open(config.data_file()).await?;
    let service = AdvisoryService::with_engine(store, engine);
    service.seed_admins(config.seed_admins()).await?;

    match &cli.command {
        Command::Recommend { .. } | Command::Catalog => {}
        Command::RegisterFarmer {
            name,
            mobile,
            password,
        } => {
            let farmer = service.register_farmer(name, mobile, password).await?;
            println!(
                "✅ Registration successful! Farmer ID {}. Please log in.",
                farmer.id
            );
        }
        Command::RegisterAdmin { username, password } => {
            service.register_admin(username, password).await?;
            println!("✅ Admin registered successfully!");
        }
        Command::Submit {
            farmer,
            soil,
            water,
            crop,
            address,
            lat,
            lon,
            json,
        } => {
            let session = farmer_login(&service, farmer).await?;
            let location = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(GeoPoint::new(*lat, *lon)?),
                _ => None,
            };
            let observation = Observation {
                soil_type: soil.clone(),
                water_level: water.clone(),
                crop: crop.clone(),
                farm_address: address.clone(),
                location,
            };
            let (submission, bundle) = service.submit_observation(&session, observation).await?;
            if !json {
                println!("✅ Data submitted successfully! (ID: {})\n", submission.id);
            }
            print_bundle(
                &submission.soil_type,
                &submission.water_level,
                &submission.crop,
                &bundle,
                *json,
            )?;
        }
        Command::Suggestion { farmer, json } => {
            let session = farmer_login(&service, farmer).await?;
            let (submission, bundle) = service.suggestion_for(&session).await?;
            print_bundle(
                &submission.soil_type,
                &submission.water_level,
                &submission.crop,
                &bundle,
                *json,
            )?;
            if let Some(recommendation) = &submission.recommendation {
                println!("\nAdvisor recommendation: {}", recommendation);
            }
        }
        Command::Feedback { name, email, text } => {
            service
                .submit_feedback(name.as_deref(), email.as_deref(), text)
                .await?;
            println!("✅ Feedback received successfully!");
        }
        Command::Dashboard { admin } => {
            let session = admin_login(&service, admin).await?;
            let entries = service.dashboard(&session).await?;
            println!("{}", render::render_dashboard(&entries));
        }
        Command::Farmers { admin } => {
            let session = admin_login(&service, admin).await?;
            let farmers = service.list_farmers(&session).await?;
            println!("{}", render::render_farmers(&farmers));
        }
        Command::FeedbackList { admin } => {
            let session = admin_login(&service, admin).await?;
            let rows = service.feedback(&session).await?;
            println!("{}", render::render_feedback(&rows));
        }
        Command::RecommendTo { admin, id, text } => {
            let session = admin_login(&service, admin).await?;
            if text.trim().is_empty() {
                return Err(AdvisorError::validation("recommendation text is required"));
            }
            let updated = service
                .send_recommendations(&session, &[(*id, text.clone())])
                .await?;
            if updated == 0 {
                return Err(AdvisorError::not_found("submission", id));
            }
            println!("✅ Recommendation saved for submission {}", id);
        }
        Command::DeleteSubmission { admin, id } => {
            let session = admin_login(&service, admin).await?;
            let outcome = service.delete_submission(&session, *id).await?;
            println!("✅ {}", outcome.submission_message());
        }
        Command::DeleteFarmer { admin, id } => {
            let session = admin_login(&service, admin).await?;
            let outcome = service.delete_farmer(&session, *id).await?;
            println!("✅ {}", outcome.farmer_message());
        }
        Command::ResetIds { admin } => {
            let session = admin_login(&service, admin).await?;
            service.reset_ids(&session).await?;
            println!(
                "✅ Auto-increment counters reset successfully! New records will start from ID 1."
            );
        }
        Command::Report { admin, csv_dir } => {
            let session = admin_login(&service, admin).await?;
            let report = service.report(&session).await?;
            println!("{}", render::render_report(&report));

            if let Some(dir) = csv_dir.as_deref().or(config.report_dir()) {
                let paths = report.write_csv(dir)?;
                tracing::info!("📁 Wrote {} report files to {}", paths.len(), dir);
                println!("📁 Report CSV files saved to: {}", dir);
            }
        }
    }

    Ok(())
}
