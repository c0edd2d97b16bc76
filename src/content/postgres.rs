use crate::content::{
    About, ContactMessage, ContentStore, Education, Experience, Interest, MessageStatus,
    NewContactMessage, PortfolioRecord, Project, RecordKind, Skill, SpokenLanguage,
};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

const MESSAGE_COLUMNS: &str = "id, name, email, subject, message, status, created_at, read_at";

type RecordQuery<'q, T> = QueryAs<'q, Postgres, T, PgArguments>;

/// Writable columns per kind, in bind order. `id` and `created_at` are
/// assigned by the database.
fn writable_columns(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::About => &[
            "name",
            "title",
            "description",
            "email",
            "phone",
            "location",
            "linkedin_url",
            "github_url",
            "twitter_url",
            "resume_url",
            "profile_image_url",
        ],
        RecordKind::Project => &[
            "title",
            "description",
            "image_url",
            "demo_url",
            "github_url",
            "technologies",
            "category",
            "featured",
            "display_order",
            "updated_at",
        ],
        RecordKind::Skill => &[
            "name",
            "category",
            "proficiency_level",
            "icon_url",
            "display_order",
        ],
        RecordKind::Experience => &[
            "company",
            "position",
            "location",
            "start_date",
            "end_date",
            "description",
            "current",
            "display_order",
        ],
        RecordKind::Education => &[
            "institution",
            "degree",
            "field_of_study",
            "location",
            "start_date",
            "end_date",
            "description",
            "grade",
            "display_order",
        ],
        RecordKind::Language => &["name", "proficiency", "proficiency_percentage", "display_order"],
        RecordKind::Interest => &["name", "description", "icon", "display_order"],
    }
}

fn insert_sql(kind: RecordKind) -> String {
    let columns = writable_columns(kind);
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        kind.table(),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// The id is bound after the writable columns.
fn update_sql(kind: RecordKind) -> String {
    let columns = writable_columns(kind);
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING *",
        kind.table(),
        assignments.join(", "),
        columns.len() + 1
    )
}

fn bind_about<'q>(query: RecordQuery<'q, About>, r: &'q About) -> RecordQuery<'q, About> {
    query
        .bind(&r.name)
        .bind(&r.title)
        .bind(&r.description)
        .bind(&r.email)
        .bind(&r.phone)
        .bind(&r.location)
        .bind(&r.linkedin_url)
        .bind(&r.github_url)
        .bind(&r.twitter_url)
        .bind(&r.resume_url)
        .bind(&r.profile_image_url)
}

fn bind_project<'q>(query: RecordQuery<'q, Project>, r: &'q Project) -> RecordQuery<'q, Project> {
    query
        .bind(&r.title)
        .bind(&r.description)
        .bind(&r.image_url)
        .bind(&r.demo_url)
        .bind(&r.github_url)
        .bind(&r.technologies)
        .bind(&r.category)
        .bind(r.featured)
        .bind(r.display_order)
        .bind(Utc::now())
}

fn bind_skill<'q>(query: RecordQuery<'q, Skill>, r: &'q Skill) -> RecordQuery<'q, Skill> {
    query
        .bind(&r.name)
        .bind(&r.category)
        .bind(r.proficiency_level)
        .bind(&r.icon_url)
        .bind(r.display_order)
}

fn bind_experience<'q>(
    query: RecordQuery<'q, Experience>,
    r: &'q Experience,
) -> RecordQuery<'q, Experience> {
    query
        .bind(&r.company)
        .bind(&r.position)
        .bind(&r.location)
        .bind(&r.start_date)
        .bind(&r.end_date)
        .bind(&r.description)
        .bind(r.current)
        .bind(r.display_order)
}

fn bind_education<'q>(
    query: RecordQuery<'q, Education>,
    r: &'q Education,
) -> RecordQuery<'q, Education> {
    query
        .bind(&r.institution)
        .bind(&r.degree)
        .bind(&r.field_of_study)
        .bind(&r.location)
        .bind(&r.start_date)
        .bind(&r.end_date)
        .bind(&r.description)
        .bind(&r.grade)
        .bind(r.display_order)
}

fn bind_language<'q>(
    query: RecordQuery<'q, SpokenLanguage>,
    r: &'q SpokenLanguage,
) -> RecordQuery<'q, SpokenLanguage> {
    query
        .bind(&r.name)
        .bind(&r.proficiency)
        .bind(r.proficiency_percentage)
        .bind(r.display_order)
}

fn bind_interest<'q>(
    query: RecordQuery<'q, Interest>,
    r: &'q Interest,
) -> RecordQuery<'q, Interest> {
    query
        .bind(&r.name)
        .bind(&r.description)
        .bind(&r.icon)
        .bind(r.display_order)
}

/// PostgreSQL-backed portfolio records.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list<T>(&self, kind: RecordKind) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let rows = sqlx::query_as::<_, T>(&format!(
            "SELECT * FROM {} ORDER BY display_order ASC NULLS LAST, id ASC",
            kind.table()
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[derive(sqlx::FromRow)]
struct ContactMessageRow {
    id: i64,
    name: String,
    email: String,
    subject: String,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

impl TryFrom<ContactMessageRow> for ContactMessage {
    type Error = StoreError;

    fn try_from(row: ContactMessageRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<MessageStatus>()
            .map_err(StoreError::CorruptRow)?;

        Ok(ContactMessage {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            status,
            created_at: row.created_at,
            read_at: row.read_at,
        })
    }
}

fn into_messages(rows: Vec<ContactMessageRow>) -> Result<Vec<ContactMessage>, StoreError> {
    rows.into_iter().map(ContactMessage::try_from).collect()
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn about(&self) -> Result<Option<About>, StoreError> {
        let row = sqlx::query_as::<_, About>("SELECT * FROM about ORDER BY id ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn projects(&self) -> Result<Vec<Project>, StoreError> {
        self.list(RecordKind::Project).await
    }

    async fn skills(&self) -> Result<Vec<Skill>, StoreError> {
        self.list(RecordKind::Skill).await
    }

    async fn experiences(&self) -> Result<Vec<Experience>, StoreError> {
        self.list(RecordKind::Experience).await
    }

    async fn education(&self) -> Result<Vec<Education>, StoreError> {
        self.list(RecordKind::Education).await
    }

    async fn languages(&self) -> Result<Vec<SpokenLanguage>, StoreError> {
        self.list(RecordKind::Language).await
    }

    async fn interests(&self) -> Result<Vec<Interest>, StoreError> {
        self.list(RecordKind::Interest).await
    }

    async fn create(&self, record: PortfolioRecord) -> Result<PortfolioRecord, StoreError> {
        let sql = insert_sql(record.kind());
        let pool = &self.pool;

        let created = match &record {
            PortfolioRecord::About(r) => {
                PortfolioRecord::About(bind_about(sqlx::query_as(&sql), r).fetch_one(pool).await?)
            }
            PortfolioRecord::Project(r) => PortfolioRecord::Project(
                bind_project(sqlx::query_as(&sql), r).fetch_one(pool).await?,
            ),
            PortfolioRecord::Skill(r) => {
                PortfolioRecord::Skill(bind_skill(sqlx::query_as(&sql), r).fetch_one(pool).await?)
            }
            PortfolioRecord::Experience(r) => PortfolioRecord::Experience(
                bind_experience(sqlx::query_as(&sql), r).fetch_one(pool).await?,
            ),
            PortfolioRecord::Education(r) => PortfolioRecord::Education(
                bind_education(sqlx::query_as(&sql), r).fetch_one(pool).await?,
            ),
            PortfolioRecord::Language(r) => PortfolioRecord::Language(
                bind_language(sqlx::query_as(&sql), r).fetch_one(pool).await?,
            ),
            PortfolioRecord::Interest(r) => PortfolioRecord::Interest(
                bind_interest(sqlx::query_as(&sql), r).fetch_one(pool).await?,
            ),
        };
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        record: PortfolioRecord,
    ) -> Result<Option<PortfolioRecord>, StoreError> {
        let sql = update_sql(record.kind());
        let pool = &self.pool;

        let updated = match &record {
            PortfolioRecord::About(r) => bind_about(sqlx::query_as(&sql), r)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(PortfolioRecord::About),
            PortfolioRecord::Project(r) => bind_project(sqlx::query_as(&sql), r)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(PortfolioRecord::Project),
            PortfolioRecord::Skill(r) => bind_skill(sqlx::query_as(&sql), r)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(PortfolioRecord::Skill),
            PortfolioRecord::Experience(r) => bind_experience(sqlx::query_as(&sql), r)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(PortfolioRecord::Experience),
            PortfolioRecord::Education(r) => bind_education(sqlx::query_as(&sql), r)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(PortfolioRecord::Education),
            PortfolioRecord::Language(r) => bind_language(sqlx::query_as(&sql), r)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(PortfolioRecord::Language),
            PortfolioRecord::Interest(r) => bind_interest(sqlx::query_as(&sql), r)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(PortfolioRecord::Interest),
        };
        Ok(updated)
    }

    async fn delete(&self, kind: RecordKind, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, kind: RecordKind) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", kind.table()))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn save_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, StoreError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "INSERT INTO contact_messages (name, email, subject, message, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(message.name.trim())
        .bind(message.email.trim())
        .bind(message.subject.trim())
        .bind(message.message.trim())
        .bind(MessageStatus::Unread.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        ContactMessage::try_from(row)
    }

    async fn messages(
        &self,
        status: Option<MessageStatus>,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        let rows = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        into_messages(rows)
    }

    async fn mark_message_read(&self, id: i64) -> Result<Option<ContactMessage>, StoreError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "UPDATE contact_messages SET status = $1, read_at = $2
             WHERE id = $3
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(MessageStatus::Read.as_str())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContactMessage::try_from).transpose()
    }

    async fn delete_message(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
