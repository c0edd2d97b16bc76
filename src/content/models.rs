//! Portfolio record types as served by the API.

use crate::translatable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of portfolio records that carry translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    About,
    Project,
    Skill,
    Experience,
    Education,
    Language,
    Interest,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::About,
        RecordKind::Project,
        RecordKind::Skill,
        RecordKind::Experience,
        RecordKind::Education,
        RecordKind::Language,
        RecordKind::Interest,
    ];

    /// Kinds stored as ordered lists; About is a singleton.
    pub const COLLECTIONS: [RecordKind; 6] = [
        RecordKind::Project,
        RecordKind::Skill,
        RecordKind::Experience,
        RecordKind::Education,
        RecordKind::Language,
        RecordKind::Interest,
    ];

    /// Record-type tag used as the translation key.
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::About => "About",
            RecordKind::Project => "Project",
            RecordKind::Skill => "Skill",
            RecordKind::Experience => "Experience",
            RecordKind::Education => "Education",
            RecordKind::Language => "Language",
            RecordKind::Interest => "Interest",
        }
    }

    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::About => "about",
            RecordKind::Project => "projects",
            RecordKind::Skill => "skills",
            RecordKind::Experience => "experiences",
            RecordKind::Education => "education",
            RecordKind::Language => "languages",
            RecordKind::Interest => "interests",
        }
    }

    /// Parse a record-type tag (e.g. "Project").
    pub fn from_tag(tag: &str) -> Option<RecordKind> {
        RecordKind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub id: Option<i64>,
    pub name: String,
    pub title: String,
    pub description: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub resume_url: Option<String>,
    pub profile_image_url: Option<String>,
}

translatable!(About, id: id, {
    name => "name",
    title => "title",
    description => "description",
    location => "location",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Vec<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub display_order: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

translatable!(Project, id: id, {
    title => "title",
    description => "description",
    category => "category",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: Option<i64>,
    pub name: String,
    pub category: Option<String>,
    pub proficiency_level: Option<i32>,
    pub icon_url: Option<String>,
    pub display_order: Option<i32>,
}

translatable!(Skill, id: id, {
    name => "name",
    category => "category",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: Option<i64>,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub current: bool,
    pub display_order: Option<i32>,
}

translatable!(Experience, id: id, {
    company => "company",
    position => "position",
    location => "location",
    description => "description",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: Option<i64>,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub grade: Option<String>,
    pub display_order: Option<i32>,
}

translatable!(Education, id: id, {
    institution => "institution",
    degree => "degree",
    field_of_study => "fieldOfStudy",
    location => "location",
    description => "description",
});

/// A language the portfolio owner speaks (not a content language).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct SpokenLanguage {
    pub id: Option<i64>,
    pub name: String,
    pub proficiency: String,
    pub proficiency_percentage: Option<i32>,
    pub display_order: Option<i32>,
}

// proficiency is not an allowlisted attribute
translatable!(SpokenLanguage, id: id, {
    name => "name",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Interest {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}

translatable!(Interest, id: id, {
    name => "name",
    description => "description",
});

/// Any portfolio record, as written through the admin API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PortfolioRecord {
    About(About),
    Project(Project),
    Skill(Skill),
    Experience(Experience),
    Education(Education),
    Language(SpokenLanguage),
    Interest(Interest),
}

impl PortfolioRecord {
    /// Decode a JSON body as a record of the given kind.
    pub fn from_json(kind: RecordKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            RecordKind::About => PortfolioRecord::About(serde_json::from_value(value)?),
            RecordKind::Project => PortfolioRecord::Project(serde_json::from_value(value)?),
            RecordKind::Skill => PortfolioRecord::Skill(serde_json::from_value(value)?),
            RecordKind::Experience => PortfolioRecord::Experience(serde_json::from_value(value)?),
            RecordKind::Education => PortfolioRecord::Education(serde_json::from_value(value)?),
            RecordKind::Language => PortfolioRecord::Language(serde_json::from_value(value)?),
            RecordKind::Interest => PortfolioRecord::Interest(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            PortfolioRecord::About(_) => RecordKind::About,
            PortfolioRecord::Project(_) => RecordKind::Project,
            PortfolioRecord::Skill(_) => RecordKind::Skill,
            PortfolioRecord::Experience(_) => RecordKind::Experience,
            PortfolioRecord::Education(_) => RecordKind::Education,
            PortfolioRecord::Language(_) => RecordKind::Language,
            PortfolioRecord::Interest(_) => RecordKind::Interest,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            PortfolioRecord::About(r) => r.id,
            PortfolioRecord::Project(r) => r.id,
            PortfolioRecord::Skill(r) => r.id,
            PortfolioRecord::Experience(r) => r.id,
            PortfolioRecord::Education(r) => r.id,
            PortfolioRecord::Language(r) => r.id,
            PortfolioRecord::Interest(r) => r.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageStatus {
    Unread,
    Read,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Unread => "UNREAD",
            MessageStatus::Read => "READ",
        }
    }
}

impl FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UNREAD" => Ok(MessageStatus::Unread),
            "READ" => Ok(MessageStatus::Read),
            other => Err(format!("Unknown message status: '{}'", other)),
        }
    }
}

/// A message submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Contact form payload. Missing fields decode as empty and fail validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: i64,
    pub total_skills: i64,
    pub total_experiences: i64,
    pub total_education: i64,
    pub total_languages: i64,
    pub total_interests: i64,
    pub total_messages: i64,
    pub unread_messages: i64,
    pub read_messages: i64,
    pub total_translations: i64,
    pub recent_messages: Vec<ContactMessage>,
}
