use crate::core::engine::RecommendationEngine;
use crate::core::report::{build_report, FarmReport};
use crate::domain::model::{
    Admin, AdminSeed, DashboardEntry, Farmer, Observation, RecommendationBundle, Submission,
};
use crate::domain::ports::RecordStore;
use crate::utils::credentials::{password_digest, verify_password};
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::require_input;
use chrono::{Local, NaiveDateTime, Timelike};

const GUEST_NAME: &str = "Guest User";

/// Proof of a successful farmer login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmerSession {
    farmer_id: u64,
    name: String,
}

impl FarmerSession {
    pub fn farmer_id(&self) -> u64 {
        self.farmer_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Proof of a successful admin login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    username: String,
}

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub id: u64,
    pub name: String,
    pub removed_submissions: usize,
    /// The table became empty, so the next id is 1 again.
    pub counter_restarted: bool,
}

impl DeletionOutcome {
    pub fn farmer_message(&self) -> String {
        let mut message = if self.removed_submissions > 0 {
            format!(
                "Farmer {} (ID: {}) and their {} submission(s) deleted successfully!",
                self.name, self.id, self.removed_submissions
            )
        } else {
            format!("Farmer {} (ID: {}) deleted successfully!", self.name, self.id)
        };
        message.push_str(if self.counter_restarted {
            " Auto-increment reset to start from 1."
        } else {
            " ID will be reused for new registrations."
        });
        message
    }

    pub fn submission_message(&self) -> String {
        let mut message = format!(
            "Submission from {} (ID: {}) deleted successfully!",
            self.name, self.id
        );
        message.push_str(if self.counter_restarted {
            " Auto-increment reset to start from 1."
        } else {
            " ID will be reused for new submissions."
        });
        message
    }
}

fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

fn format_timestamp(created_at: Option<NaiveDateTime>) -> (String, String) {
    match created_at {
        Some(ts) => (
            ts.format("%d %b %Y").to_string(),
            ts.format("%I:%M %p").to_string(),
        ),
        None => ("N/A".to_string(), String::new()),
    }
}

/// Farmer- and admin-facing operations over a [`RecordStore`].
///
/// Admin operations take an [`AdminSession`], farmer operations a
/// [`FarmerSession`]; both can only be obtained by logging in.
pub struct AdvisoryService<S: RecordStore> {
    store: S,
    engine: RecommendationEngine,
}

impl<S: RecordStore> AdvisoryService<S> {
    pub fn new(store: S) -> Self {
        Self::with_engine(store, RecommendationEngine::default())
    }

    pub fn with_engine(store: S, engine: RecommendationEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> RecommendationEngine {
        self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates any configured admins that do not exist yet.
    pub async fn seed_admins(&self, seeds: &[AdminSeed]) -> Result<usize> {
        let mut created = 0;
        for seed in seeds {
            if self.store.find_admin(&seed.username).await?.is_some() {
                continue;
            }
            self.register_admin(&seed.username, &seed.password).await?;
            created += 1;
        }
        if created > 0 {
            tracing::info!("Seeded {} admin account(s)", created);
        }
        Ok(created)
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    pub async fn register_farmer(&self, name: &str, mobile: &str, password: &str) -> Result<Farmer> {
        require_input("name", name)?;
        require_input("mobile", mobile)?;
        require_input("password", password)?;

        let farmer = self
            .store
            .insert_farmer(name, mobile, &password_digest(name, password))
            .await?;
        tracing::info!("Registered farmer {} (ID: {})", farmer.name, farmer.id);
        Ok(farmer)
    }

    pub async fn register_admin(&self, username: &str, password: &str) -> Result<Admin> {
        require_input("username", username)?;
        require_input("password", password)?;

        let admin = self
            .store
            .insert_admin(username, &password_digest(username, password))
            .await?;
        tracing::info!("Registered admin {}", admin.username);
        Ok(admin)
    }

    pub async fn login_farmer(&self, name: &str, password: &str) -> Result<FarmerSession> {
        let farmers = self.store.list_farmers().await?;
        let farmer = farmers
            .into_iter()
            .find(|f| f.name == name && verify_password(name, password, &f.password_digest))
            .ok_or_else(|| {
                tracing::warn!("Failed farmer login for '{}'", name);
                AdvisorError::InvalidCredentials
            })?;

        Ok(FarmerSession {
            farmer_id: farmer.id,
            name: farmer.name,
        })
    }

    pub async fn login_admin(&self, username: &str, password: &str) -> Result<AdminSession> {
        match self.store.find_admin(username).await? {
            Some(admin) if verify_password(username, password, &admin.password_digest) => {
                Ok(AdminSession {
                    username: admin.username,
                })
            }
            _ => {
                tracing::warn!("Failed admin login for '{}'", username);
                Err(AdvisorError::InvalidCredentials)
            }
        }
    }

    // ------------------------------------------------------------------
    // Farmer
    // ------------------------------------------------------------------

    /// Stores the observation and returns the advice for it.
    pub async fn submit_observation(
        &self,
        session: &FarmerSession,
        observation: Observation,
    ) -> Result<(Submission, RecommendationBundle)> {
        require_input("soil type", &observation.soil_type)?;
        require_input("water level", &observation.water_level)?;
        require_input("crop", &observation.crop)?;

        let submission = self
            .store
            .insert_submission(Submission {
                id: 0,
                farmer_name: session.name.clone(),
                soil_type: observation.soil_type,
                water_level: observation.water_level,
                crop: observation.crop,
                farm_address: observation.farm_address,
                location: observation.location,
                created_at: Some(now()),
                feedback: None,
                recommendation: None,
            })
            .await?;
        tracing::info!(
            "Stored submission {} from {} ({} / {} / {})",
            submission.id,
            submission.farmer_name,
            submission.soil_type,
            submission.water_level,
            submission.crop
        );

        let bundle = self.bundle_for(&submission);
        Ok((submission, bundle))
    }

    /// Advice for the farmer's most recent submission.
    pub async fn suggestion_for(
        &self,
        session: &FarmerSession,
    ) -> Result<(Submission, RecommendationBundle)> {
        let latest = self
            .store
            .list_submissions()
            .await?
            .into_iter()
            .rev()
            .find(|s| s.farmer_name == session.name && !s.soil_type.is_empty() && s.has_crop())
            .ok_or_else(|| AdvisorError::not_found("submission", &session.name))?;

        let bundle = self.bundle_for(&latest);
        Ok((latest, bundle))
    }

    fn bundle_for(&self, submission: &Submission) -> RecommendationBundle {
        self.engine.build_bundle(
            &submission.soil_type,
            &submission.water_level,
            &submission.crop,
        )
    }

    /// Anyone may leave feedback; a missing name is recorded as a guest.
    pub async fn submit_feedback(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        text: &str,
    ) -> Result<Submission> {
        require_input("feedback", text)?;

        let name = name.filter(|n| !n.trim().is_empty()).unwrap_or(GUEST_NAME);
        let sender = match email.filter(|e| !e.trim().is_empty()) {
            Some(email) => format!("{} ({})", name, email),
            None => name.to_string(),
        };

        let row = self
            .store
            .insert_submission(Submission {
                id: 0,
                farmer_name: sender,
                soil_type: String::new(),
                water_level: String::new(),
                crop: String::new(),
                farm_address: String::new(),
                location: None,
                created_at: Some(now()),
                feedback: Some(text.to_string()),
                recommendation: None,
            })
            .await?;
        tracing::info!("Feedback received from {}", row.farmer_name);
        Ok(row)
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    /// Crop submissions, newest first.
    pub async fn dashboard(&self, _admin: &AdminSession) -> Result<Vec<DashboardEntry>> {
        let farmers = self.store.list_farmers().await?;
        let submissions = self.store.list_submissions().await?;

        let entries = submissions
            .into_iter()
            .rev()
            .filter(Submission::has_crop)
            .map(|submission| {
                let farmer_registration_id = farmers
                    .iter()
                    .filter(|f| f.name == submission.farmer_name)
                    .map(|f| f.id)
                    .min();
                let (formatted_date, formatted_time) = format_timestamp(submission.created_at);
                DashboardEntry {
                    submission,
                    farmer_registration_id,
                    formatted_date,
                    formatted_time,
                }
            })
            .collect();
        Ok(entries)
    }

    pub async fn list_farmers(&self, _admin: &AdminSession) -> Result<Vec<Farmer>> {
        self.store.list_farmers().await
    }

    /// Feedback messages, newest first.
    pub async fn feedback(&self, _admin: &AdminSession) -> Result<Vec<Submission>> {
        let rows = self.store.list_submissions().await?;
        Ok(rows.into_iter().rev().filter(Submission::has_feedback).collect())
    }

    /// Attaches recommendation text to submissions. Blank texts are skipped
    /// and unknown ids are logged and ignored. Returns how many were updated.
    pub async fn send_recommendations(
        &self,
        admin: &AdminSession,
        recommendations: &[(u64, String)],
    ) -> Result<usize> {
        let mut updated = 0;
        for (id, text) in recommendations {
            if text.trim().is_empty() {
                continue;
            }
            if self.store.set_recommendation(*id, text).await? {
                updated += 1;
            } else {
                tracing::warn!("No submission with ID {} to recommend to", id);
            }
        }
        tracing::info!("{} sent {} recommendation(s)", admin.username, updated);
        Ok(updated)
    }

    pub async fn delete_submission(
        &self,
        admin: &AdminSession,
        id: u64,
    ) -> Result<DeletionOutcome> {
        let removed = self
            .store
            .delete_submission(id)
            .await?
            .ok_or_else(|| AdvisorError::not_found("submission", id))?;
        let remaining = self.store.list_submissions().await?.len();

        let outcome = DeletionOutcome {
            id,
            name: removed.farmer_name,
            removed_submissions: 1,
            counter_restarted: remaining == 0,
        };
        tracing::info!("{}: {}", admin.username, outcome.submission_message());
        Ok(outcome)
    }

    /// Removes the farmer and every submission filed under their name.
    pub async fn delete_farmer(&self, admin: &AdminSession, id: u64) -> Result<DeletionOutcome> {
        let (farmer, removed_submissions) = self
            .store
            .delete_farmer(id)
            .await?
            .ok_or_else(|| AdvisorError::not_found("farmer", id))?;
        let remaining = self.store.list_farmers().await?.len();

        let outcome = DeletionOutcome {
            id,
            name: farmer.name,
            removed_submissions,
            counter_restarted: remaining == 0,
        };
        tracing::info!("{}: {}", admin.username, outcome.farmer_message());
        Ok(outcome)
    }

    pub async fn reset_ids(&self, admin: &AdminSession) -> Result<()> {
        self.store.reset_counters().await?;
        tracing::info!("{} reset the farmer and submission id counters", admin.username);
        Ok(())
    }

    pub async fn report(&self, _admin: &AdminSession) -> Result<FarmReport> {
        let rows = self.store.list_submissions().await?;
        let report = build_report(&rows);
        tracing::debug!(
            "Report: {} soil types, {} crops, {} water levels",
            report.soil.len(),
            report.crop.len(),
            report.water.len()
        );
        Ok(report)
    }
}
