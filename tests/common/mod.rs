#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use linkcut::api::handlers::{health_handler, redirect_handler};
use linkcut::api::middleware::auth;
use linkcut::application::services::LinkService;
use linkcut::config::Config;
use linkcut::domain::click_event::ClickEvent;
use linkcut::domain::entities::{Link, NewLink};
use linkcut::domain::repositories::{LinkQuery, LinkRepository, SortField, SortOrder};
use linkcut::error::AppError;
use linkcut::state::AppState;

pub const TEST_TOKEN: &str = "test-admin-token";
pub const TEST_DOMAIN: &str = "s.test";

/// In-memory [`LinkRepository`] with the same observable semantics as the
/// PostgreSQL implementation: atomic uniqueness on insert, atomic click
/// increments, and the full filter/sort/paginate contract.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seeds a link with explicit timestamps, bypassing the service layer.
    pub fn seed(&self, code: &str, url: &str, is_custom: bool, age: Duration, clicks: i64) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let at = Utc::now() - age;
        self.links.lock().unwrap().push(Link {
            id,
            short_code: code.to_string(),
            original_url: url.to_string(),
            is_custom,
            click_count: clicks,
            created_at: at,
            updated_at: at,
        });
    }

    pub fn click_count(&self, code: &str) -> Option<i64> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_code == code)
            .map(|l| l.click_count)
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_code == code)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.short_code }),
            ));
        }

        let now = Utc::now();
        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            short_code: new_link.short_code,
            original_url: new_link.original_url,
            is_custom: new_link.is_custom,
            click_count: 0,
            created_at: now,
            updated_at: now,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get(code))
    }

    async fn update_url(&self, code: &str, original_url: &str) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        let link = links
            .iter_mut()
            .find(|l| l.short_code == code)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        link.original_url = original_url.to_string();
        link.updated_at = Utc::now();
        Ok(link.clone())
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        let mut links = self.links.lock().unwrap();

        let link = links
            .iter_mut()
            .find(|l| l.short_code == code)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        link.click_count += 1;
        Ok(())
    }

    async fn remove(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.short_code != code);
        Ok(links.len() < before)
    }

    async fn list(&self, query: &LinkQuery) -> Result<(Vec<Link>, i64), AppError> {
        let links = self.links.lock().unwrap();

        let needle = query.search.as_deref().map(|s| s.to_lowercase());
        let mut filtered: Vec<Link> = links
            .iter()
            .filter(|l| {
                if query.custom_only && !l.is_custom {
                    return false;
                }
                match &needle {
                    None => true,
                    Some(n) => {
                        l.original_url.to_lowercase().contains(n)
                            || l.short_code.to_lowercase().contains(n)
                    }
                }
            })
            .cloned()
            .collect();

        filtered.sort_by(|a, b| {
            let ord = match query.sort {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortField::ClickCount => a.click_count.cmp(&b.click_count),
                SortField::ShortCode => a.short_code.cmp(&b.short_code),
            };
            let ord = match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            };
            ord.then(a.id.cmp(&b.id))
        });

        let total = filtered.len() as i64;
        let items = filtered
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();

        Ok((items, total))
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        domain: TEST_DOMAIN.to_string(),
        admin_token: TEST_TOKEN.to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        click_queue_capacity: 100,
        db_max_connections: 1,
        db_connect_timeout: 1,
    }
}

/// Builds a service over the given repository, returning the click queue
/// receiver so tests can drive or observe the worker side.
pub fn create_test_service(
    repo: Arc<InMemoryLinkRepository>,
) -> (Arc<LinkService>, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let service = Arc::new(LinkService::new(repo, tx));
    (service, rx)
}

pub fn create_test_state(
    repo: Arc<InMemoryLinkRepository>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let service = Arc::new(LinkService::new(repo, tx.clone()));
    let state = AppState::new(service, tx, Arc::new(test_config()));
    (state, rx)
}

/// Full application router wired like production, minus the outermost
/// trailing-slash normalization.
pub fn test_router(state: AppState) -> Router {
    let api_router = linkcut::api::routes::protected_routes().route_layer(
        axum::middleware::from_fn_with_state(state.clone(), auth::layer),
    );

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
}

/// Polls until the link's click count reaches `expected` or a timeout hits.
pub async fn wait_for_clicks(repo: &InMemoryLinkRepository, code: &str, expected: i64) {
    for _ in 0..400 {
        if repo.click_count(code) == Some(expected) {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!(
        "link '{}' never reached {} clicks (got {:?})",
        code,
        expected,
        repo.click_count(code)
    );
}
