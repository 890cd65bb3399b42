use super::entities::Record;
use super::error::Result;

/// RepositoryProvider provides full functionality of the records repository.
///
pub trait RepositoryProvider: Send + Sync + Clone {
    async fn migrate(&self) -> Result<()>;
    async fn insert_record(&self, message: &str) -> Result<()>;
    async fn count_records(&self) -> Result<i64>;
    async fn recent_records(&self, limit: i64) -> Result<Vec<Record>>;
    async fn close(&self);
}
