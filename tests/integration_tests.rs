//! Integration tests for the portfolio backend
//!
//! These tests drive the full HTTP router in-process over the in-memory
//! stores, so no PostgreSQL connection is required.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use portfolio_backend::api::{router, AppState};
use portfolio_backend::content::{
    About, MemoryContentStore, PortfolioSnapshot, Project, Skill,
};
use portfolio_backend::error::StoreError;
use portfolio_backend::translation::{
    MemoryTranslationStore, TranslationKey, TranslationRecord, TranslationStore, Upserted,
};

const ADMIN_KEY: &str = "test-admin-key";

// ==================== Test Helpers ====================

fn project(id: i64, title: &str, description: &str, category: &str) -> Project {
    Project {
        id: Some(id),
        title: title.to_string(),
        description: description.to_string(),
        image_url: None,
        demo_url: None,
        github_url: Some(format!("https://github.com/example/{}", id)),
        technologies: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        category: Some(category.to_string()),
        featured: id == 1,
        display_order: Some(id as i32),
        created_at: None,
        updated_at: None,
    }
}

fn snapshot() -> PortfolioSnapshot {
    PortfolioSnapshot {
        about: Some(About {
            id: Some(1),
            name: "Jean Dupont".to_string(),
            title: "Développeur logiciel".to_string(),
            description: "Passionné par les systèmes distribués".to_string(),
            email: "jean@example.com".to_string(),
            phone: None,
            location: Some("Paris".to_string()),
            linkedin_url: None,
            github_url: None,
            twitter_url: None,
            resume_url: None,
            profile_image_url: None,
        }),
        projects: vec![
            project(1, "Moteur de recherche", "Un moteur rapide", "Backend"),
            project(2, "Tableau de bord", "Visualisation de données", "Frontend"),
        ],
        skills: vec![Skill {
            id: Some(1),
            name: "Bases de données".to_string(),
            category: Some("Outils".to_string()),
            proficiency_level: Some(80),
            icon_url: None,
            display_order: Some(1),
        }],
        ..Default::default()
    }
}

fn app_with(translations: Arc<dyn TranslationStore>, snapshot: PortfolioSnapshot) -> Router {
    let state = AppState::new(
        Arc::new(MemoryContentStore::new(snapshot)),
        translations,
        Some(ADMIN_KEY.to_string()),
    );
    router(state)
}

fn app() -> (Router, Arc<MemoryTranslationStore>) {
    let store = Arc::new(MemoryTranslationStore::default());
    (app_with(store.clone(), snapshot()), store)
}

fn get(uri: &str, language: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(language) = language {
        builder = builder.header(header::ACCEPT_LANGUAGE, language);
    }
    builder.body(Body::empty()).unwrap()
}

fn admin(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_KEY));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn seed(store: &MemoryTranslationStore, record_type: &str, id: i64, field: &str, value: &str) {
    store
        .upsert(&TranslationKey::new(record_type, id, field, "en"), value)
        .await
        .unwrap();
}

/// A translation store that is always unreachable.
struct DownStore;

#[async_trait]
impl TranslationStore for DownStore {
    async fn find_field(
        &self,
        _key: &TranslationKey,
    ) -> Result<Option<TranslationRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn find_for_record(
        &self,
        _record_type: &str,
        _record_id: i64,
        _language: Option<&str>,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn upsert(&self, _key: &TranslationKey, _value: &str) -> Result<Upserted, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn delete_for_record(
        &self,
        _record_type: &str,
        _record_id: i64,
    ) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

// ==================== Public Overlay Tests ====================

#[tokio::test]
async fn test_project_list_overlays_only_translated_project() {
    let (app, store) = app();
    seed(&store, "Project", 1, "title", "Search engine").await;
    seed(&store, "Project", 1, "description", "A fast engine").await;

    let (status, body) = send(&app, get("/api/v1/projects", Some("en"))).await;
    assert_eq!(status, StatusCode::OK);

    let projects = body.as_array().unwrap();
    assert_eq!(projects.len(), 2);

    assert_eq!(projects[0]["title"], "Search engine");
    assert_eq!(projects[0]["description"], "A fast engine");
    assert_eq!(projects[0]["category"], "Backend");
    assert_eq!(projects[0]["technologies"], json!(["Rust", "PostgreSQL"]));

    assert_eq!(projects[1]["title"], "Tableau de bord");
    assert_eq!(projects[1]["description"], "Visualisation de données");
    assert_eq!(projects[1]["category"], "Frontend");
}

#[tokio::test]
async fn test_default_language_is_served_untouched() {
    let (app, store) = app();
    seed(&store, "Project", 1, "title", "Search engine").await;

    for language in [None, Some("fr-FR"), Some("de"), Some("")] {
        let (status, body) = send(&app, get("/api/v1/projects", language)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Moteur de recherche", "language {:?}", language);
    }
}

#[tokio::test]
async fn test_content_language_header_echoes_resolved_language() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(get("/api/v1/skills", Some("en-US,fr;q=0.8")))
        .await
        .unwrap();
    assert_eq!(response.headers()[header::CONTENT_LANGUAGE], "en");

    let response = app.oneshot(get("/api/v1/skills", Some("xx"))).await.unwrap();
    assert_eq!(response.headers()[header::CONTENT_LANGUAGE], "fr");
}

#[tokio::test]
async fn test_about_overlay_and_absence() {
    let (app, store) = app();
    seed(&store, "About", 1, "title", "Software developer").await;

    let (status, body) = send(&app, get("/api/v1/about", Some("en"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Software developer");
    assert_eq!(body["location"], "Paris");

    let empty = app_with(
        Arc::new(MemoryTranslationStore::default()),
        PortfolioSnapshot::default(),
    );
    let (status, _) = send(&empty, get("/api/v1/about", Some("en"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_translation_outage_degrades_to_default_language() {
    let app = app_with(Arc::new(DownStore), snapshot());

    let (status, body) = send(&app, get("/api/v1/projects", Some("en"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Moteur de recherche");
    assert_eq!(body[1]["title"], "Tableau de bord");
}

// ==================== Contact Tests ====================

#[tokio::test]
async fn test_contact_message_is_created() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "subject": "Hello",
                "message": "I enjoyed your portfolio a lot."
            })
            .to_string(),
        ))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "UNREAD");

    let (_, messages) = send(&app, admin(Method::GET, "/api/v1/admin/messages?status=unread", None)).await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_contact_message_is_rejected() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "name": "J", "email": "nope", "subject": "Hi there", "message": "Too short" })
                .to_string(),
        ))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["validationErrors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "message"]);
}

#[tokio::test]
async fn test_contact_message_with_missing_field_is_validation_error() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "name": "Jane Doe", "email": "jane@example.com", "subject": "Hello" })
                .to_string(),
        ))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["validationErrors"][0]["field"], "message");
    assert_eq!(body["validationErrors"][0]["message"], "Message is required");
}

#[tokio::test]
async fn test_malformed_contact_body_is_json_bad_request() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bad request");
}

// ==================== Admin Auth Tests ====================

#[tokio::test]
async fn test_admin_requires_api_key() {
    let (app, _) = app();

    let (status, _) = send(&app, get("/api/v1/admin/dashboard/stats", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/v1/admin/dashboard/stats")
        .header(header::AUTHORIZATION, "Bearer wrong-key")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_admin_closed_without_configured_key() {
    let state = AppState::new(
        Arc::new(MemoryContentStore::new(snapshot())),
        Arc::new(MemoryTranslationStore::default()),
        None,
    );
    let app = router(state);

    let (status, _) = send(&app, admin(Method::GET, "/api/v1/admin/dashboard/stats", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let (app, store) = app();
    seed(&store, "Project", 1, "title", "Search engine").await;

    let (status, body) = send(&app, admin(Method::GET, "/api/v1/admin/dashboard/stats", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalProjects"], 2);
    assert_eq!(body["totalSkills"], 1);
    assert_eq!(body["totalTranslations"], 1);
    assert_eq!(body["totalMessages"], 0);
}

// ==================== Admin Translation Tests ====================

#[tokio::test]
async fn test_admin_upsert_then_public_read() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        admin(
            Method::PUT,
            "/api/v1/admin/translations/Project/2/en",
            Some(json!({ "title": "Dashboard", "description": "Data visualisation" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        admin(
            Method::PUT,
            "/api/v1/admin/translations/Project/2/en/title",
            Some(json!({ "value": "Analytics dashboard" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "Analytics dashboard");

    let (_, fields) = send(
        &app,
        admin(Method::GET, "/api/v1/admin/translations/Project/2/en", None),
    )
    .await;
    assert_eq!(
        fields,
        json!({ "description": "Data visualisation", "title": "Analytics dashboard" })
    );

    let (_, projects) = send(&app, get("/api/v1/projects", Some("en"))).await;
    assert_eq!(projects[1]["title"], "Analytics dashboard");
    assert_eq!(projects[0]["title"], "Moteur de recherche");
}

#[tokio::test]
async fn test_admin_rejects_default_language_writes() {
    let (app, store) = app();

    let (status, _) = send(
        &app,
        admin(
            Method::PUT,
            "/api/v1/admin/translations/Project/1/fr/title",
            Some(json!({ "value": "Titre" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_admin_rejects_unknown_record_type() {
    let (app, _) = app();

    let (status, _) = send(
        &app,
        admin(Method::GET, "/api/v1/admin/translations/Widget/1", None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_write_failure_surfaces_as_server_error() {
    let app = app_with(Arc::new(DownStore), snapshot());

    let (status, body) = send(
        &app,
        admin(
            Method::PUT,
            "/api/v1/admin/translations/Project/1/en/title",
            Some(json!({ "value": "Search engine" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
}

#[tokio::test]
async fn test_translation_listing_and_deletion() {
    let (app, store) = app();
    seed(&store, "Skill", 1, "name", "Databases").await;
    seed(&store, "Skill", 1, "category", "Tools").await;

    let (_, rows) = send(
        &app,
        admin(Method::GET, "/api/v1/admin/translations/Skill/1", None),
    )
    .await;
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["recordType"], "Skill");

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            admin(Method::DELETE, "/api/v1/admin/translations/Skill/1", None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_translation_metrics_track_overlays() {
    let (app, store) = app();
    seed(&store, "Project", 1, "title", "Search engine").await;

    send(&app, get("/api/v1/projects", Some("en"))).await;

    let (status, report) = send(
        &app,
        admin(Method::GET, "/api/v1/admin/translations/metrics", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["lookups"], 2);
    assert_eq!(report["fieldsOverlaid"], 1);
}

// ==================== Admin Content Tests ====================

#[tokio::test]
async fn test_created_project_is_translated_on_public_read() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        admin(
            Method::POST,
            "/api/v1/admin/projects",
            Some(json!({
                "title": "Messagerie",
                "description": "Une messagerie chiffrée de bout en bout",
                "technologies": ["Rust"],
                "displayOrder": 3
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(id, 3);

    let (status, _) = send(
        &app,
        admin(
            Method::PUT,
            &format!("/api/v1/admin/translations/Project/{}/en/title", id),
            Some(json!({ "value": "Messenger" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, public) = send(&app, get("/api/v1/projects", Some("en"))).await;
    assert_eq!(public[2]["title"], "Messenger");
    assert_eq!(public[2]["description"], "Une messagerie chiffrée de bout en bout");

    let (status, listed) = send(&app, admin(Method::GET, "/api/v1/admin/projects", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 3);
    assert_eq!(listed[2]["title"], "Messagerie");
}

#[tokio::test]
async fn test_updating_project_replaces_fields() {
    let (app, _) = app();
    let body = json!({
        "title": "Tableau de bord v2",
        "description": "Visualisation de données en temps réel",
        "displayOrder": 2
    });

    let (status, updated) = send(
        &app,
        admin(Method::PUT, "/api/v1/admin/projects/2", Some(body.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 2);
    assert_eq!(updated["title"], "Tableau de bord v2");

    let (_, public) = send(&app, get("/api/v1/projects", None)).await;
    assert_eq!(public[1]["title"], "Tableau de bord v2");

    let (status, _) = send(
        &app,
        admin(Method::PUT, "/api/v1/admin/projects/42", Some(body)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_record_is_rejected_and_not_stored() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        admin(
            Method::POST,
            "/api/v1/admin/skills",
            Some(json!({ "proficiencyLevel": 120 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["validationErrors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "proficiencyLevel"]);

    let (_, skills) = send(&app, admin(Method::GET, "/api/v1/admin/skills", None)).await;
    assert_eq!(skills.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_about_is_replaced_then_recreated() {
    let (app, _) = app();
    let about = json!({
        "name": "Jean Dupont",
        "title": "Ingénieur logiciel",
        "description": "Passionné par les systèmes distribués",
        "email": "jean@example.com"
    });

    let (status, saved) = send(
        &app,
        admin(Method::PUT, "/api/v1/admin/about", Some(about.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["id"], 1);

    let (_, public) = send(&app, get("/api/v1/about", None)).await;
    assert_eq!(public["title"], "Ingénieur logiciel");

    let (status, _) = send(&app, admin(Method::DELETE, "/api/v1/admin/about/1", None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, admin(Method::GET, "/api/v1/admin/about", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, recreated) = send(&app, admin(Method::PUT, "/api/v1/admin/about", Some(about))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(recreated["id"].is_i64());
}

#[tokio::test]
async fn test_non_numeric_id_is_json_bad_request() {
    let (app, _) = app();

    for (method, uri) in [
        (Method::PUT, "/api/v1/admin/messages/abc/read"),
        (Method::DELETE, "/api/v1/admin/projects/abc"),
        (Method::GET, "/api/v1/admin/translations/Project/abc"),
    ] {
        let (status, body) = send(&app, admin(method, uri, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["status"], 400, "{}", uri);
    }
}

// ==================== Admin Record Deletion Tests ====================

#[tokio::test]
async fn test_deleting_record_cascades_to_translations() {
    let (app, store) = app();
    seed(&store, "Project", 1, "title", "Search engine").await;
    seed(&store, "Project", 1, "description", "A fast engine").await;
    seed(&store, "Project", 2, "title", "Dashboard").await;

    let (status, _) = send(&app, admin(Method::DELETE, "/api/v1/admin/projects/1", None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(store
        .find_for_record("Project", 1, None)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(store.count().await.unwrap(), 1);

    let (_, projects) = send(&app, get("/api/v1/projects", Some("en"))).await;
    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(projects[0]["title"], "Dashboard");

    let (status, _) = send(&app, admin(Method::DELETE, "/api/v1/admin/projects/1", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_message_read_and_delete() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "subject": "Hello",
                "message": "I enjoyed your portfolio a lot."
            })
            .to_string(),
        ))
        .unwrap();
    let (_, saved) = send(&app, request).await;
    let id = saved["id"].as_i64().unwrap();

    let (status, read) = send(
        &app,
        admin(Method::PUT, &format!("/api/v1/admin/messages/{}/read", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["status"], "READ");

    let (status, _) = send(
        &app,
        admin(Method::GET, "/api/v1/admin/messages?status=bogus", None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        admin(Method::DELETE, &format!("/api/v1/admin/messages/{}", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        admin(Method::PUT, &format!("/api/v1/admin/messages/{}/read", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ==================== Health Tests ====================

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");

    let down = app_with(Arc::new(DownStore), snapshot());
    let (status, body) = send(&down, get("/health", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "DOWN");
}
