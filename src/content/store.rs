use crate::content::{
    About, ContactMessage, Education, Experience, Interest, MessageStatus, NewContactMessage,
    PortfolioRecord, Project, RecordKind, Skill, SpokenLanguage,
};
use crate::error::StoreError;
use async_trait::async_trait;

/// Reads and writes over the portfolio records.
///
/// Lists are ordered by `display_order` (unset last), then `id`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// The single About section, if one has been written.
    async fn about(&self) -> Result<Option<About>, StoreError>;

    async fn projects(&self) -> Result<Vec<Project>, StoreError>;

    async fn skills(&self) -> Result<Vec<Skill>, StoreError>;

    async fn experiences(&self) -> Result<Vec<Experience>, StoreError>;

    async fn education(&self) -> Result<Vec<Education>, StoreError>;

    async fn languages(&self) -> Result<Vec<SpokenLanguage>, StoreError>;

    async fn interests(&self) -> Result<Vec<Interest>, StoreError>;

    /// Insert a record under a fresh id. Any id on `record` is ignored.
    async fn create(&self, record: PortfolioRecord) -> Result<PortfolioRecord, StoreError>;

    /// Replace the record of `record`'s kind with the given id.
    /// `None` if no such record exists.
    async fn update(
        &self,
        id: i64,
        record: PortfolioRecord,
    ) -> Result<Option<PortfolioRecord>, StoreError>;

    /// Delete one record. Returns `false` if it did not exist.
    async fn delete(&self, kind: RecordKind, id: i64) -> Result<bool, StoreError>;

    async fn count(&self, kind: RecordKind) -> Result<i64, StoreError>;

    async fn save_message(&self, message: NewContactMessage)
        -> Result<ContactMessage, StoreError>;

    /// Messages, newest first, optionally filtered by status.
    async fn messages(
        &self,
        status: Option<MessageStatus>,
    ) -> Result<Vec<ContactMessage>, StoreError>;

    /// Mark a message read. `None` if it does not exist.
    async fn mark_message_read(&self, id: i64) -> Result<Option<ContactMessage>, StoreError>;

    async fn delete_message(&self, id: i64) -> Result<bool, StoreError>;
}
