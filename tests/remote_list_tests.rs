//! Tests of the remote list client against a live server
//!
//! Each test binds a real TCP listener on an ephemeral port and drives it
//! with `ListClient` / `PagedList` over HTTP.

use async_trait::async_trait;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::{Json, Router, routing::get};
use std::collections::HashMap;
use labdesk::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;

// =============================================================================
// Fixtures
// =============================================================================

fn paper(title: &str, month: u32) -> Paper {
    Paper {
        id: Uuid::new_v4(),
        title: title.to_string(),
        journal: "Journal of Lab Studies".to_string(),
        authors: vec!["Kim Minsu".to_string()],
        published_on: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
        citations: 0,
        impact_factor: None,
        author_role: None,
        owner_id: None,
    }
}

/// Paper store that can be told to fail, and that answers its first list
/// call slowly
#[derive(Clone)]
struct ControlledService {
    inner: InMemoryRecordService<Paper>,
    failing: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
    first_call_delay: Duration,
}

impl ControlledService {
    fn new(records: Vec<Paper>, first_call_delay: Duration) -> Self {
        Self {
            inner: InMemoryRecordService::with_records(records),
            failing: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
            first_call_delay,
        }
    }
}

#[async_trait]
impl RecordService<Paper> for ControlledService {
    async fn create(&self, record: Paper) -> Result<Paper> {
        self.inner.create(record).await
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Paper>> {
        self.inner.get(id).await
    }

    async fn list(&self) -> Result<Vec<Paper>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(self.first_call_delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("store offline");
        }
        self.inner.list().await
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Paper>> {
        self.inner.delete(id).await
    }
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

async fn spawn_papers(service: ControlledService) -> String {
    let app = ServerBuilder::new()
        .register_collection::<NewPaper>(service)
        .expect("Failed to register papers")
        .build()
        .expect("Failed to build app");
    spawn(app).await
}

/// List route whose answer depends on `q`: "older" answers after 100 ms,
/// "newer" after 300 ms, "fail" answers 500 at once, anything else at once.
async fn scripted(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PageResponse<Paper>>, StatusCode> {
    let q = params.get("q").cloned().unwrap_or_default();
    match q.as_str() {
        "older" => tokio::time::sleep(Duration::from_millis(100)).await,
        "newer" => tokio::time::sleep(Duration::from_millis(300)).await,
        "fail" => return Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => {}
    }

    let title = if q.is_empty() { "initial".to_string() } else { q };
    Ok(Json(PageResponse {
        data: vec![paper(&title, 1)],
        pagination: PaginationMeta::new(0, 10, 1),
    }))
}

fn searching(list: &PagedList<Paper>, text: &str) -> ListRequest {
    let mut request = list.request().clone();
    request.query = ListQuery::search(text);
    request
}

fn context(base_url: &str) -> ApiContext {
    ApiContext::new(base_url, Arc::new(StaticToken::none()))
}

fn titles(papers: &[Paper]) -> Vec<&str> {
    papers.iter().map(|p| p.title.as_str()).collect()
}

// =============================================================================
// ListClient
// =============================================================================

#[tokio::test]
async fn test_fetch_first_page() {
    let records = (1..=12).map(|m| paper(&format!("P{:02}", m), m)).collect();
    let base = spawn_papers(ControlledService::new(records, Duration::ZERO)).await;

    let request = ListRequest::new(5);
    let page = ListClient::fetch_page::<Paper>(&context(&base), &request)
        .await
        .unwrap();

    assert_eq!(page.pagination.page, 0);
    assert_eq!(page.pagination.total, 12);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(titles(&page.data), vec!["P12", "P11", "P10", "P09", "P08"]);
}

#[tokio::test]
async fn test_one_based_page_maps_to_zero_based_wire_page() {
    let records = (1..=12).map(|m| paper(&format!("P{:02}", m), m)).collect();
    let base = spawn_papers(ControlledService::new(records, Duration::ZERO)).await;

    let mut request = ListRequest::new(5);
    request.cursor.set_page(3);
    request.query.direction = SortDirection::Asc;

    let page = ListClient::fetch_page::<Paper>(&context(&base), &request)
        .await
        .unwrap();

    assert_eq!(page.pagination.page, 2);
    assert_eq!(titles(&page.data), vec!["P11", "P12"]);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    async fn guarded(headers: HeaderMap) -> Result<Json<PageResponse<Paper>>, StatusCode> {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some("Bearer s3cret");
        if !authorized {
            return Err(StatusCode::UNAUTHORIZED);
        }
        Ok(Json(PageResponse {
            data: vec![],
            pagination: PaginationMeta::empty(10),
        }))
    }

    let base = spawn(Router::new().route("/papers", get(guarded))).await;
    let request = ListRequest::new(10);

    let anonymous = ListClient::fetch_page::<Paper>(&context(&base), &request).await;
    let err = anonymous.unwrap_err();
    assert_eq!(err.error_code(), "REMOTE_STATUS_ERROR");
    assert!(err.to_string().contains("401"));

    let tokens = SharedToken::new();
    tokens.set(Some("s3cret".to_string())).unwrap();
    let ctx = ApiContext::new(base.as_str(), Arc::new(tokens));
    let page = ListClient::fetch_page::<Paper>(&ctx, &request).await.unwrap();
    assert_eq!(page.pagination.total, 0);
}

#[tokio::test]
async fn test_undecodable_body() {
    let app = Router::new().route("/papers", get(|| async { "not json" }));
    let base = spawn(app).await;

    let err = ListClient::fetch_page::<Paper>(&context(&base), &ListRequest::new(10))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "REMOTE_DECODE_ERROR");
}

// =============================================================================
// PagedList
// =============================================================================

#[tokio::test]
async fn test_refresh_and_search() {
    let records = vec![paper("Graph models", 1), paper("Optics", 2)];
    let base = spawn_papers(ControlledService::new(records, Duration::ZERO)).await;

    let mut list: PagedList<Paper> = PagedList::new(context(&base), 10);
    assert!(list.refresh().await.unwrap());
    assert_eq!(titles(&list.items()), vec!["Optics", "Graph models"]);

    list.set_text("GRAPH");
    assert!(list.refresh().await.unwrap());
    assert_eq!(titles(&list.items()), vec!["Graph models"]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_page() {
    let service = ControlledService::new(vec![paper("Optics", 2)], Duration::ZERO);
    let failing = service.failing.clone();
    let base = spawn_papers(service).await;

    let list: PagedList<Paper> = PagedList::new(context(&base), 10);
    list.refresh().await.unwrap();

    failing.store(true, Ordering::SeqCst);
    let err = list.refresh().await.unwrap_err();
    assert_eq!(err.error_code(), "REMOTE_STATUS_ERROR");

    assert_eq!(titles(&list.items()), vec!["Optics"]);
}

#[tokio::test]
async fn test_superseded_reply_is_discarded() {
    let records = vec![paper("Alpha", 1), paper("Beta", 2)];
    let base = spawn_papers(ControlledService::new(records, Duration::from_millis(300))).await;

    let list: PagedList<Paper> = PagedList::new(context(&base), 10);

    let mut older = list.request().clone();
    older.query = ListQuery::search("alpha");
    let mut newer = list.request().clone();
    newer.query = ListQuery::search("beta");

    // The older request is issued first but answered last
    let (older_applied, newer_applied) = tokio::join!(list.fetch(older), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        list.fetch(newer).await
    });

    assert!(newer_applied.unwrap());
    assert!(!older_applied.unwrap());
    assert_eq!(titles(&list.items()), vec!["Beta"]);
}

#[tokio::test]
async fn test_superseded_reply_arriving_first_is_discarded() {
    let base = spawn(Router::new().route("/papers", get(scripted))).await;
    let list: PagedList<Paper> = PagedList::new(context(&base), 10);

    let older = searching(&list, "older");
    let newer = searching(&list, "newer");

    // "older" answers at ~100 ms while "newer" (issued at ~20 ms) is still out
    let (older_applied, newer_applied, midway) = tokio::join!(
        list.fetch(older),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            list.fetch(newer).await
        },
        async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            list.items()
        }
    );

    assert!(midway.is_empty());
    assert!(!older_applied.unwrap());
    assert!(newer_applied.unwrap());
    assert_eq!(titles(&list.items()), vec!["newer"]);
}

#[tokio::test]
async fn test_superseded_reply_is_discarded_when_newer_fetch_fails() {
    let base = spawn(Router::new().route("/papers", get(scripted))).await;
    let list: PagedList<Paper> = PagedList::new(context(&base), 10);
    assert!(list.refresh().await.unwrap());

    let older = searching(&list, "older");
    let newer = searching(&list, "fail");

    let (older_applied, newer_applied) = tokio::join!(list.fetch(older), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        list.fetch(newer).await
    });

    assert_eq!(newer_applied.unwrap_err().error_code(), "REMOTE_STATUS_ERROR");
    assert!(!older_applied.unwrap());
    assert_eq!(titles(&list.items()), vec!["initial"]);
}
