use crate::domain::model::{Admin, AdminSeed, Farmer, Submission};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn data_file(&self) -> &str;
    fn seed_admins(&self) -> &[AdminSeed];
    fn report_dir(&self) -> Option<&str>;
}

/// Persistent farmer, admin and submission records.
///
/// Ids are assigned by the store. Each table keeps a counter that only moves
/// forward while rows exist and restarts from 1 once the table is emptied by
/// a delete, or when [`RecordStore::reset_counters`] is called.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fails with `DuplicateMobile` when the mobile number is taken.
    async fn insert_farmer(&self, name: &str, mobile: &str, password_digest: &str)
        -> Result<Farmer>;
    async fn list_farmers(&self) -> Result<Vec<Farmer>>;
    /// Removes the farmer together with every submission filed under their
    /// name, returning the farmer and the number of submissions removed.
    async fn delete_farmer(&self, id: u64) -> Result<Option<(Farmer, usize)>>;

    /// Fails with `DuplicateUsername` when the username is taken.
    async fn insert_admin(&self, username: &str, password_digest: &str) -> Result<Admin>;
    async fn find_admin(&self, username: &str) -> Result<Option<Admin>>;

    /// Stores `submission` under a fresh id; the incoming `id` is ignored.
    async fn insert_submission(&self, submission: Submission) -> Result<Submission>;
    /// All rows in ascending id order.
    async fn list_submissions(&self) -> Result<Vec<Submission>>;
    async fn delete_submission(&self, id: u64) -> Result<Option<Submission>>;
    /// Returns false when no submission has that id.
    async fn set_recommendation(&self, id: u64, recommendation: &str) -> Result<bool>;

    async fn reset_counters(&self) -> Result<()>;
}
