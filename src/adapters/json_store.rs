use crate::domain::model::{Admin, Farmer, Submission};
use crate::domain::ports::RecordStore;
use crate::utils::error::{AdvisorError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
struct Counters {
    farmers: u64,
    admins: u64,
    submissions: u64,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    farmers: Vec<Farmer>,
    #[serde(default)]
    admins: Vec<Admin>,
    #[serde(default)]
    submissions: Vec<Submission>,
    #[serde(default)]
    counters: Counters,
}

/// Never hands out an id at or below one already in use, even if the
/// counter was reset while rows remain.
fn next_id(counter: &mut u64, existing_max: Option<u64>) -> u64 {
    let id = (*counter).max(existing_max.unwrap_or(0)) + 1;
    *counter = id;
    id
}

/// Record store kept in memory and written through to a JSON file after
/// every change. Without a path it is purely in-memory.
#[derive(Debug)]
pub struct JsonFileStore {
    path: Option<PathBuf>,
    state: RwLock<StoreState>,
}

impl JsonFileStore {
    /// Loads `path` if it exists; a missing file starts an empty store.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let state: StoreState = serde_json::from_slice(&bytes)?;
                tracing::debug!(
                    "Loaded {} farmers, {} admins, {} submissions from {}",
                    state.farmers.len(),
                    state.admins.len(),
                    state.submissions.len(),
                    path.display()
                );
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No data file at {}, starting empty", path.display());
                StoreState::default()
            }
            Err(e) => return Err(AdvisorError::IoError(e)),
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn persist(&self, state: &StoreState) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // write-then-rename so a crash never leaves a half-written file
        let data = serde_json::to_vec_pretty(state)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &data).await?;
        tokio::fs::rename(&tmp, path).await?;

        tracing::debug!("Persisted {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Replaces the live state with `next` once it is on disk. A failed write
    /// leaves the live state untouched.
    async fn commit(&self, live: &mut StoreState, next: StoreState) -> Result<()> {
        self.persist(&next).await?;
        *live = next;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn insert_farmer(
        &self,
        name: &str,
        mobile: &str,
        password_digest: &str,
    ) -> Result<Farmer> {
        let mut state = self.state.write().await;
        if state.farmers.iter().any(|f| f.mobile == mobile) {
            return Err(AdvisorError::DuplicateMobile {
                mobile: mobile.to_string(),
            });
        }

        let mut next = state.clone();
        let max = next.farmers.iter().map(|f| f.id).max();
        let farmer = Farmer {
            id: next_id(&mut next.counters.farmers, max),
            name: name.to_string(),
            mobile: mobile.to_string(),
            password_digest: password_digest.to_string(),
        };
        next.farmers.push(farmer.clone());
        self.commit(&mut state, next).await?;
        Ok(farmer)
    }

    async fn list_farmers(&self) -> Result<Vec<Farmer>> {
        Ok(self.state.read().await.farmers.clone())
    }

    async fn delete_farmer(&self, id: u64) -> Result<Option<(Farmer, usize)>> {
        let mut state = self.state.write().await;
        let Some(index) = state.farmers.iter().position(|f| f.id == id) else {
            return Ok(None);
        };

        let mut next = state.clone();
        let removed = next.farmers.remove(index);
        let before = next.submissions.len();
        next.submissions.retain(|s| s.farmer_name != removed.name);
        let removed_submissions = before - next.submissions.len();

        if next.farmers.is_empty() {
            next.counters.farmers = 0;
        }
        if removed_submissions > 0 && next.submissions.is_empty() {
            next.counters.submissions = 0;
        }
        self.commit(&mut state, next).await?;
        Ok(Some((removed, removed_submissions)))
    }

    async fn insert_admin(&self, username: &str, password_digest: &str) -> Result<Admin> {
        let mut state = self.state.write().await;
        if state.admins.iter().any(|a| a.username == username) {
            return Err(AdvisorError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        let mut next = state.clone();
        let max = next.admins.iter().map(|a| a.id).max();
        let admin = Admin {
            id: next_id(&mut next.counters.admins, max),
            username: username.to_string(),
            password_digest: password_digest.to_string(),
        };
        next.admins.push(admin.clone());
        self.commit(&mut state, next).await?;
        Ok(admin)
    }

    async fn find_admin(&self, username: &str) -> Result<Option<Admin>> {
        let state = self.state.read().await;
        Ok(state.admins.iter().find(|a| a.username == username).cloned())
    }

    async fn insert_submission(&self, mut submission: Submission) -> Result<Submission> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let max = next.submissions.iter().map(|s| s.id).max();
        submission.id = next_id(&mut next.counters.submissions, max);
        next.submissions.push(submission.clone());
        self.commit(&mut state, next).await?;
        Ok(submission)
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let mut rows = self.state.read().await.submissions.clone();
        rows.sort_by_key(|s| s.id);
        Ok(rows)
    }

    async fn delete_submission(&self, id: u64) -> Result<Option<Submission>> {
        let mut state = self.state.write().await;
        let Some(index) = state.submissions.iter().position(|s| s.id == id) else {
            return Ok(None);
        };

        let mut next = state.clone();
        let removed = next.submissions.remove(index);
        if next.submissions.is_empty() {
            next.counters.submissions = 0;
        }
        self.commit(&mut state, next).await?;
        Ok(Some(removed))
    }

    async fn set_recommendation(&self, id: u64, recommendation: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        let Some(index) = state.submissions.iter().position(|s| s.id == id) else {
            return Ok(false);
        };

        let mut next = state.clone();
        next.submissions[index].recommendation = Some(recommendation.to_string());
        self.commit(&mut state, next).await?;
        Ok(true)
    }

    async fn reset_counters(&self) -> Result<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        next.counters.farmers = 0;
        next.counters.submissions = 0;
        self.commit(&mut state, next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(name: &str) -> Submission {
        Submission {
            id: 0,
            farmer_name: name.to_string(),
            soil_type: "Black Soil".to_string(),
            water_level: "Low (Below 2m)".to_string(),
            crop: "Cotton".to_string(),
            farm_address: String::new(),
            location: None,
            created_at: None,
            feedback: None,
            recommendation: None,
        }
    }

    #[tokio::test]
    async fn test_ids_restart_once_table_is_emptied() {
        let store = JsonFileStore::in_memory();

        let first = store.insert_submission(row("A")).await.unwrap();
        let second = store.insert_submission(row("B")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        // deleting the newest row does not let its id be handed out again
        store.delete_submission(2).await.unwrap();
        assert_eq!(store.insert_submission(row("C")).await.unwrap().id, 3);

        store.delete_submission(1).await.unwrap();
        store.delete_submission(3).await.unwrap();
        assert_eq!(store.insert_submission(row("D")).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_reset_counters_never_reuses_live_ids() {
        let store = JsonFileStore::in_memory();
        for name in ["A", "B", "C"] {
            store.insert_submission(row(name)).await.unwrap();
        }
        store.delete_submission(3).await.unwrap();
        store.reset_counters().await.unwrap();

        assert_eq!(store.insert_submission(row("D")).await.unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_duplicate_mobile_is_rejected() {
        let store = JsonFileStore::in_memory();
        store.insert_farmer("Ravi", "9876543210", "d1").await.unwrap();

        let err = store
            .insert_farmer("Meena", "9876543210", "d2")
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::DuplicateMobile { .. }));
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("agri.json");

        {
            let store = JsonFileStore::open(&path).await.unwrap();
            store.insert_admin("admin", "digest").await.unwrap();
            store.insert_submission(row("Ravi")).await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert!(reopened.find_admin("admin").await.unwrap().is_some());
        assert_eq!(reopened.list_submissions().await.unwrap().len(), 1);
        assert_eq!(reopened.insert_submission(row("Meena")).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agri.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        // a directory in the way of the temp file makes the write fail
        let blocker = dir.path().join("agri.json.tmp");
        std::fs::create_dir(&blocker).unwrap();
        let err = store
            .insert_farmer("Ravi", "9876543210", "d1")
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::IoError(_)));
        assert!(store.list_farmers().await.unwrap().is_empty());

        std::fs::remove_dir(&blocker).unwrap();
        let farmer = store.insert_farmer("Ravi", "9876543210", "d1").await.unwrap();
        assert_eq!(farmer.id, 1);
        assert_eq!(store.list_farmers().await.unwrap().len(), 1);

        std::fs::create_dir(&blocker).unwrap();
        store.insert_submission(row("Ravi")).await.unwrap_err();
        store.delete_farmer(1).await.unwrap_err();
        assert_eq!(store.list_farmers().await.unwrap().len(), 1);
        assert!(store.list_submissions().await.unwrap().is_empty());

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.list_farmers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_farmer_removes_their_submissions() {
        let store = JsonFileStore::in_memory();
        let ravi = store.insert_farmer("Ravi", "9876543210", "d1").await.unwrap();
        store.insert_farmer("Meena", "9000000001", "d2").await.unwrap();
        for name in ["Ravi", "Meena", "Ravi"] {
            store.insert_submission(row(name)).await.unwrap();
        }

        let (farmer, removed) = store.delete_farmer(ravi.id).await.unwrap().unwrap();
        assert_eq!(farmer.name, "Ravi");
        assert_eq!(removed, 2);

        let rest = store.list_submissions().await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].farmer_name, "Meena");
        assert!(store.delete_farmer(ravi.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agri.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = JsonFileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, AdvisorError::SerializationError(_)));
    }
}
