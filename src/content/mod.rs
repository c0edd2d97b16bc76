//! Portfolio records and the stores that produce them.

mod memory;
mod models;
mod postgres;
mod store;
mod validation;

pub use memory::{MemoryContentStore, PortfolioSnapshot};
pub use models::{
    About, ContactMessage, DashboardStats, Education, Experience, Interest, MessageStatus,
    NewContactMessage, PortfolioRecord, Project, RecordKind, Skill, SpokenLanguage,
};
pub use postgres::PgContentStore;
pub use store::ContentStore;
pub use validation::{validate_contact_message, validate_record};
