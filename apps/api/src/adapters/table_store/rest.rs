use async_trait::async_trait;
use cafepass_types::WaitlistKind;
use reqwest::{Client, StatusCode, header::CONTENT_RANGE};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{
    domain::entities::waitlist_entry::WaitlistRow,
    use_cases::waitlist::{StoreError, TableStore},
};

/// Hosted table API speaking the PostgREST dialect (`/rest/v1/{table}`).
#[derive(Clone)]
pub struct RestTableStore {
    client: Client,
    base_url: Url,
    api_key: SecretString,
}

impl RestTableStore {
    /// `base_url` must be able to carry a path (checked when config is loaded).
    pub fn new(client: Client, base_url: Url, api_key: SecretString) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn table_url(&self, kind: WaitlistKind) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["rest", "v1", kind.table_name()]);
        }
        url
    }

    fn request(&self, method: reqwest::Method, kind: WaitlistKind) -> reqwest::RequestBuilder {
        let key = self.api_key.expose_secret();
        self.client
            .request(method, self.table_url(kind))
            .header("apikey", key)
            .bearer_auth(key)
    }
}

/// Error body returned by PostgREST.
#[derive(Deserialize)]
struct RestErrorBody {
    message: Option<String>,
}

#[async_trait]
impl TableStore for RestTableStore {
    async fn insert(&self, row: &WaitlistRow) -> Result<(), StoreError> {
        let resp = self
            .request(reqwest::Method::POST, row.kind())
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body: Option<RestErrorBody> = resp.json().await.ok();
        match body.and_then(|b| b.message) {
            Some(message) => Err(StoreError::Rejected { message }),
            None => Err(StoreError::MalformedResponse(format!(
                "HTTP {status} without an error message"
            ))),
        }
    }

    async fn count(&self, kind: WaitlistKind) -> Result<u64, StoreError> {
        let resp = self
            .request(reqwest::Method::HEAD, kind)
            .query(&[("select", "*")])
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = resp.status();
        if !(status.is_success() || status == StatusCode::PARTIAL_CONTENT) {
            return Err(StoreError::MalformedResponse(format!(
                "count query answered HTTP {status}"
            )));
        }

        resp.headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| StoreError::MalformedResponse("missing Content-Range total".into()))
    }
}

/// Total from a `Content-Range` value such as `0-24/3573` or `*/42`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::{HeaderMap, StatusCode as AxumStatus},
        response::IntoResponse,
        routing::post,
    };
    use cafepass_types::FormState;
    use chrono::Utc;

    use super::*;

    #[test]
    fn content_range_totals() {
        assert_eq!(parse_content_range_total("*/42"), Some(42));
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn table_url_keeps_base_path() {
        let store = RestTableStore::new(
            Client::new(),
            Url::parse("https://proxy.example.com/supabase/").unwrap(),
            SecretString::new("key".into()),
        );
        assert_eq!(
            store.table_url(WaitlistKind::Partner).as_str(),
            "https://proxy.example.com/supabase/rest/v1/partners_waitlist"
        );

        let store = RestTableStore::new(
            Client::new(),
            Url::parse("https://abc.supabase.co").unwrap(),
            SecretString::new("key".into()),
        );
        assert_eq!(
            store.table_url(WaitlistKind::User).as_str(),
            "https://abc.supabase.co/rest/v1/users_waitlist"
        );
    }

    /// What the fake table API saw.
    #[derive(Default)]
    struct Recorded {
        inserts: Vec<(String, serde_json::Value, Option<String>)>,
    }

    #[derive(Clone)]
    struct FakeApi {
        recorded: Arc<Mutex<Recorded>>,
        reject_with: Option<serde_json::Value>,
    }

    async fn fake_insert(
        State(api): State<FakeApi>,
        Path(table): Path<String>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> axum::response::Response {
        let apikey = headers
            .get("apikey")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        api.recorded.lock().unwrap().inserts.push((table, body, apikey));

        match &api.reject_with {
            Some(err) => (AxumStatus::CONFLICT, Json(err.clone())).into_response(),
            None => AxumStatus::CREATED.into_response(),
        }
    }

    async fn fake_count(Path(table): Path<String>) -> axum::response::Response {
        if table == "partners_waitlist" {
            return AxumStatus::INTERNAL_SERVER_ERROR.into_response();
        }
        (AxumStatus::OK, [("content-range", "*/17")]).into_response()
    }

    async fn spawn_fake_api(reject_with: Option<serde_json::Value>) -> (Url, FakeApi) {
        let api = FakeApi {
            recorded: Arc::new(Mutex::new(Recorded::default())),
            reject_with,
        };
        let app = Router::new()
            .route("/rest/v1/{table}", post(fake_insert).head(fake_count))
            .with_state(api.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (Url::parse(&format!("http://{addr}")).unwrap(), api)
    }

    fn store_for(url: Url) -> RestTableStore {
        RestTableStore::new(Client::new(), url, SecretString::new("anon-key".into()))
    }

    #[tokio::test]
    async fn insert_posts_row_array_with_key() {
        let (url, api) = spawn_fake_api(None).await;
        let store = store_for(url);

        let form = FormState::partner("owner@beanleaf.ca", "  Bean & Leaf  ");
        let row = WaitlistRow::from_form(WaitlistKind::Partner, &form, Utc::now());
        store.insert(&row).await.unwrap();

        let recorded = api.recorded.lock().unwrap();
        assert_eq!(recorded.inserts.len(), 1);
        let (table, body, apikey) = &recorded.inserts[0];
        assert_eq!(table, "partners_waitlist");
        assert_eq!(apikey.as_deref(), Some("anon-key"));
        assert_eq!(body[0]["cafe"], "Bean & Leaf");
        assert_eq!(body[0]["email"], "owner@beanleaf.ca");
        assert!(body[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn insert_error_carries_store_message() {
        let (url, _api) = spawn_fake_api(Some(serde_json::json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"users_waitlist_email_key\""
        })))
        .await;
        let store = store_for(url);

        let row = WaitlistRow::from_form(
            WaitlistKind::User,
            &FormState::user("sam@example.com", None),
            Utc::now(),
        );
        let err = store.insert(&row).await.unwrap_err();

        assert!(matches!(err, StoreError::Rejected { .. }));
        assert!(err.reported_message().unwrap().starts_with("duplicate key value"));
    }

    #[tokio::test]
    async fn insert_error_without_message_is_malformed() {
        let (url, _api) = spawn_fake_api(Some(serde_json::json!({ "hint": null }))).await;
        let store = store_for(url);

        let row = WaitlistRow::from_form(
            WaitlistKind::User,
            &FormState::user("sam@example.com", None),
            Utc::now(),
        );
        let err = store.insert(&row).await.unwrap_err();

        assert!(matches!(err, StoreError::MalformedResponse(_)));
        assert_eq!(err.reported_message(), None);
    }

    #[tokio::test]
    async fn count_reads_content_range() {
        let (url, _api) = spawn_fake_api(None).await;
        let store = store_for(url);

        assert_eq!(store.count(WaitlistKind::User).await.unwrap(), 17);
        assert!(store.count(WaitlistKind::Partner).await.is_err());
    }

    #[tokio::test]
    async fn unreachable_store_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = store_for(Url::parse(&format!("http://{addr}")).unwrap());
        let err = store.count(WaitlistKind::User).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }
}
