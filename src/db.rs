use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Schema bootstrap, applied in order. Every statement is idempotent.
const SCHEMA: &[(&str, &str)] = &[
    (
        "translations",
        "CREATE TABLE IF NOT EXISTS translations (
            id BIGSERIAL PRIMARY KEY,
            entity_type VARCHAR(50) NOT NULL,
            entity_id BIGINT NOT NULL,
            field_name VARCHAR(100) NOT NULL,
            language VARCHAR(5) NOT NULL,
            value TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    ),
    (
        "translations unique index",
        "CREATE UNIQUE INDEX IF NOT EXISTS translations_entity_field_language_idx
            ON translations (entity_type, entity_id, field_name, language)",
    ),
    (
        "about",
        "CREATE TABLE IF NOT EXISTS about (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(50),
            location VARCHAR(255),
            linkedin_url VARCHAR(500),
            github_url VARCHAR(500),
            twitter_url VARCHAR(500),
            resume_url VARCHAR(500),
            profile_image_url VARCHAR(500)
        )",
    ),
    (
        "projects",
        "CREATE TABLE IF NOT EXISTS projects (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL,
            image_url VARCHAR(500),
            demo_url VARCHAR(500),
            github_url VARCHAR(500),
            technologies TEXT[] NOT NULL DEFAULT '{}',
            category VARCHAR(100),
            featured BOOLEAN NOT NULL DEFAULT FALSE,
            display_order INTEGER,
            created_at TIMESTAMPTZ DEFAULT NOW(),
            updated_at TIMESTAMPTZ DEFAULT NOW()
        )",
    ),
    (
        "skills",
        "CREATE TABLE IF NOT EXISTS skills (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            category VARCHAR(100),
            proficiency_level INTEGER,
            icon_url VARCHAR(500),
            display_order INTEGER
        )",
    ),
    (
        "experiences",
        "CREATE TABLE IF NOT EXISTS experiences (
            id BIGSERIAL PRIMARY KEY,
            company VARCHAR(255) NOT NULL,
            position VARCHAR(255) NOT NULL,
            location VARCHAR(255),
            start_date VARCHAR(50) NOT NULL,
            end_date VARCHAR(50),
            description TEXT,
            current BOOLEAN NOT NULL DEFAULT FALSE,
            display_order INTEGER
        )",
    ),
    (
        "education",
        "CREATE TABLE IF NOT EXISTS education (
            id BIGSERIAL PRIMARY KEY,
            institution VARCHAR(255) NOT NULL,
            degree VARCHAR(255) NOT NULL,
            field_of_study VARCHAR(255),
            location VARCHAR(255),
            start_date VARCHAR(50) NOT NULL,
            end_date VARCHAR(50),
            description TEXT,
            grade VARCHAR(50),
            display_order INTEGER
        )",
    ),
    (
        "languages",
        "CREATE TABLE IF NOT EXISTS languages (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            proficiency VARCHAR(50) NOT NULL,
            proficiency_percentage INTEGER,
            display_order INTEGER
        )",
    ),
    (
        "interests",
        "CREATE TABLE IF NOT EXISTS interests (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description TEXT,
            icon VARCHAR(100),
            display_order INTEGER
        )",
    ),
    (
        "contact_messages",
        "CREATE TABLE IF NOT EXISTS contact_messages (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(255) NOT NULL,
            subject VARCHAR(200) NOT NULL,
            message TEXT NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'UNREAD',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            read_at TIMESTAMPTZ
        )",
    ),
];

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    /// Create any missing tables and indexes
    pub async fn migrate(&self) -> Result<()> {
        for (name, statement) in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to create {}", name))?;
        }
        info!("Database schema ready ({} statements)", SCHEMA.len());
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
