use crate::content::{
    About, ContactMessage, ContentStore, Education, Experience, Interest, MessageStatus,
    NewContactMessage, PortfolioRecord, Project, RecordKind, Skill, SpokenLanguage,
};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// Initial contents for a [`MemoryContentStore`].
#[derive(Debug, Clone, Default)]
pub struct PortfolioSnapshot {
    pub about: Option<About>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub languages: Vec<SpokenLanguage>,
    pub interests: Vec<Interest>,
    pub messages: Vec<ContactMessage>,
}

/// In-process portfolio records with the same ordering and deletion
/// semantics as the PostgreSQL store.
#[derive(Default)]
pub struct MemoryContentStore {
    data: RwLock<PortfolioSnapshot>,
}

impl MemoryContentStore {
    pub fn new(snapshot: PortfolioSnapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
        }
    }
}

/// Sort key: display order (unset last), then id.
fn order_key(display_order: Option<i32>, id: Option<i64>) -> (bool, i32, i64) {
    (
        display_order.is_none(),
        display_order.unwrap_or_default(),
        id.unwrap_or_default(),
    )
}

fn sorted<T: Clone>(items: &[T], key: impl Fn(&T) -> (bool, i32, i64)) -> Vec<T> {
    let mut items = items.to_vec();
    items.sort_by_key(|item| key(item));
    items
}

/// Records addressed by a store-assigned id.
trait Keyed: Clone {
    fn id_mut(&mut self) -> &mut Option<i64>;
}

macro_rules! keyed {
    ($($ty:ty),+ $(,)?) => {
        $(impl Keyed for $ty {
            fn id_mut(&mut self) -> &mut Option<i64> {
                &mut self.id
            }
        })+
    };
}

keyed!(About, Project, Skill, Experience, Education, SpokenLanguage, Interest);

/// Append `item` under the next free id.
fn push_new<T: Keyed>(items: &mut Vec<T>, mut item: T) -> T {
    let next = items.iter_mut().filter_map(|i| *i.id_mut()).max().unwrap_or(0) + 1;
    *item.id_mut() = Some(next);
    items.push(item.clone());
    item
}

/// Overwrite the item with `id`, keeping that id.
fn replace_by_id<T: Keyed>(items: &mut [T], id: i64, mut item: T) -> Option<T> {
    let index = items.iter_mut().position(|i| *i.id_mut() == Some(id))?;
    *item.id_mut() = Some(id);
    items[index] = item.clone();
    Some(item)
}

fn remove_by_id<T>(items: &mut Vec<T>, id: i64, item_id: impl Fn(&T) -> Option<i64>) -> bool {
    let before = items.len();
    items.retain(|item| item_id(item) != Some(id));
    items.len() != before
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn about(&self) -> Result<Option<About>, StoreError> {
        Ok(self.data.read().await.about.clone())
    }

    async fn projects(&self) -> Result<Vec<Project>, StoreError> {
        let data = self.data.read().await;
        Ok(sorted(&data.projects, |p| order_key(p.display_order, p.id)))
    }

    async fn skills(&self) -> Result<Vec<Skill>, StoreError> {
        let data = self.data.read().await;
        Ok(sorted(&data.skills, |s| order_key(s.display_order, s.id)))
    }

    async fn experiences(&self) -> Result<Vec<Experience>, StoreError> {
        let data = self.data.read().await;
        Ok(sorted(&data.experiences, |e| order_key(e.display_order, e.id)))
    }

    async fn education(&self) -> Result<Vec<Education>, StoreError> {
        let data = self.data.read().await;
        Ok(sorted(&data.education, |e| order_key(e.display_order, e.id)))
    }

    async fn languages(&self) -> Result<Vec<SpokenLanguage>, StoreError> {
        let data = self.data.read().await;
        Ok(sorted(&data.languages, |l| order_key(l.display_order, l.id)))
    }

    async fn interests(&self) -> Result<Vec<Interest>, StoreError> {
        let data = self.data.read().await;
        Ok(sorted(&data.interests, |i| order_key(i.display_order, i.id)))
    }

    /// The memory store holds at most one About; creating another replaces it.
    async fn create(&self, record: PortfolioRecord) -> Result<PortfolioRecord, StoreError> {
        let mut data = self.data.write().await;
        let created = match record {
            PortfolioRecord::About(mut about) => {
                let next = data.about.as_ref().and_then(|a| a.id).unwrap_or(0) + 1;
                about.id = Some(next);
                data.about = Some(about.clone());
                PortfolioRecord::About(about)
            }
            PortfolioRecord::Project(mut project) => {
                let now = Utc::now();
                project.created_at = Some(now);
                project.updated_at = Some(now);
                PortfolioRecord::Project(push_new(&mut data.projects, project))
            }
            PortfolioRecord::Skill(skill) => PortfolioRecord::Skill(push_new(&mut data.skills, skill)),
            PortfolioRecord::Experience(experience) => {
                PortfolioRecord::Experience(push_new(&mut data.experiences, experience))
            }
            PortfolioRecord::Education(education) => {
                PortfolioRecord::Education(push_new(&mut data.education, education))
            }
            PortfolioRecord::Language(language) => {
                PortfolioRecord::Language(push_new(&mut data.languages, language))
            }
            PortfolioRecord::Interest(interest) => {
                PortfolioRecord::Interest(push_new(&mut data.interests, interest))
            }
        };
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        record: PortfolioRecord,
    ) -> Result<Option<PortfolioRecord>, StoreError> {
        let mut data = self.data.write().await;
        let updated = match record {
            PortfolioRecord::About(mut about) => match data.about.as_mut() {
                Some(current) if current.id == Some(id) => {
                    about.id = Some(id);
                    *current = about.clone();
                    Some(PortfolioRecord::About(about))
                }
                _ => None,
            },
            PortfolioRecord::Project(mut project) => {
                project.created_at = data
                    .projects
                    .iter()
                    .find(|p| p.id == Some(id))
                    .and_then(|p| p.created_at);
                project.updated_at = Some(Utc::now());
                replace_by_id(&mut data.projects, id, project).map(PortfolioRecord::Project)
            }
            PortfolioRecord::Skill(skill) => {
                replace_by_id(&mut data.skills, id, skill).map(PortfolioRecord::Skill)
            }
            PortfolioRecord::Experience(experience) => {
                replace_by_id(&mut data.experiences, id, experience).map(PortfolioRecord::Experience)
            }
            PortfolioRecord::Education(education) => {
                replace_by_id(&mut data.education, id, education).map(PortfolioRecord::Education)
            }
            PortfolioRecord::Language(language) => {
                replace_by_id(&mut data.languages, id, language).map(PortfolioRecord::Language)
            }
            PortfolioRecord::Interest(interest) => {
                replace_by_id(&mut data.interests, id, interest).map(PortfolioRecord::Interest)
            }
        };
        Ok(updated)
    }

    async fn delete(&self, kind: RecordKind, id: i64) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        let removed = match kind {
            RecordKind::About => {
                let matches = data.about.as_ref().and_then(|a| a.id) == Some(id);
                if matches {
                    data.about = None;
                }
                matches
            }
            RecordKind::Project => remove_by_id(&mut data.projects, id, |p| p.id),
            RecordKind::Skill => remove_by_id(&mut data.skills, id, |s| s.id),
            RecordKind::Experience => remove_by_id(&mut data.experiences, id, |e| e.id),
            RecordKind::Education => remove_by_id(&mut data.education, id, |e| e.id),
            RecordKind::Language => remove_by_id(&mut data.languages, id, |l| l.id),
            RecordKind::Interest => remove_by_id(&mut data.interests, id, |i| i.id),
        };
        Ok(removed)
    }

    async fn count(&self, kind: RecordKind) -> Result<i64, StoreError> {
        let data = self.data.read().await;
        let count = match kind {
            RecordKind::About => usize::from(data.about.is_some()),
            RecordKind::Project => data.projects.len(),
            RecordKind::Skill => data.skills.len(),
            RecordKind::Experience => data.experiences.len(),
            RecordKind::Education => data.education.len(),
            RecordKind::Language => data.languages.len(),
            RecordKind::Interest => data.interests.len(),
        };
        Ok(count as i64)
    }

    async fn save_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, StoreError> {
        let mut data = self.data.write().await;
        let id = data.messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;

        let saved = ContactMessage {
            id,
            name: message.name.trim().to_string(),
            email: message.email.trim().to_string(),
            subject: message.subject.trim().to_string(),
            message: message.message.trim().to_string(),
            status: MessageStatus::Unread,
            created_at: Utc::now(),
            read_at: None,
        };
        data.messages.push(saved.clone());
        Ok(saved)
    }

    async fn messages(
        &self,
        status: Option<MessageStatus>,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        let data = self.data.read().await;
        let mut messages: Vec<ContactMessage> = data
            .messages
            .iter()
            .filter(|m| status.map_or(true, |s| m.status == s))
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(messages)
    }

    async fn mark_message_read(&self, id: i64) -> Result<Option<ContactMessage>, StoreError> {
        let mut data = self.data.write().await;
        let updated = data.messages.iter_mut().find(|m| m.id == id).map(|m| {
            m.status = MessageStatus::Read;
            m.read_at = Some(Utc::now());
            m.clone()
        });
        Ok(updated)
    }

    async fn delete_message(&self, id: i64) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        let before = data.messages.len();
        data.messages.retain(|m| m.id != id);
        Ok(data.messages.len() != before)
    }
}
