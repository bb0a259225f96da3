//! In-process stand-in for the transcription API, used by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const JOB_ID: &str = "job-5551";
pub const UPLOAD_URL: &str = "https://cdn.example.test/upload/5551";

/// What the fake server answers.
pub struct Script {
    pub upload_status: StatusCode,
    pub create_status: StatusCode,
    pub language_code: Option<&'static str>,
    /// Successive bodies for `GET /transcript/{id}`. The last one repeats.
    pub polls: Vec<Value>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            upload_status: StatusCode::OK,
            create_status: StatusCode::OK,
            language_code: Some("en_us"),
            polls: vec![completed("hello from the fake api")],
        }
    }
}

#[derive(Default)]
pub struct Recorded {
    pub uploaded: Mutex<Vec<u8>>,
    pub auth_headers: Mutex<Vec<String>>,
    pub created_audio_url: Mutex<Option<String>>,
    pub uploads: AtomicUsize,
    pub creates: AtomicUsize,
    pub polls: AtomicUsize,
}

impl Recorded {
    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

struct FakeState {
    upload_status: StatusCode,
    create_status: StatusCode,
    language_code: Option<&'static str>,
    polls: Mutex<VecDeque<Value>>,
    recorded: Arc<Recorded>,
}

pub struct FakeApi {
    pub base_url: String,
    pub recorded: Arc<Recorded>,
}

impl FakeApi {
    pub async fn start(script: Script) -> Self {
        let recorded = Arc::new(Recorded::default());
        let state = Arc::new(FakeState {
            upload_status: script.upload_status,
            create_status: script.create_status,
            language_code: script.language_code,
            polls: Mutex::new(script.polls.into()),
            recorded: recorded.clone(),
        });

        let app = Router::new()
            .route("/v2/upload", post(upload))
            .route("/v2/transcript", post(create))
            .route("/v2/transcript/{id}", get(poll))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v2"),
            recorded,
        }
    }
}

pub fn status(status: &str) -> Value {
    json!({ "id": JOB_ID, "status": status, "text": null })
}

pub fn completed(text: &str) -> Value {
    json!({
        "id": JOB_ID,
        "status": "completed",
        "text": text,
        "language_code": "en_us",
        "confidence": 0.97
    })
}

/// A finished job whose body carries no `language_code`.
pub fn completed_without_language(text: &str) -> Value {
    json!({ "id": JOB_ID, "status": "completed", "text": text })
}

pub fn failed(message: &str) -> Value {
    json!({ "id": JOB_ID, "status": "error", "error": message })
}

fn record_auth(state: &FakeState, headers: &HeaderMap) {
    let value = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.recorded.auth_headers.lock().unwrap().push(value);
}

async fn upload(State(state): State<Arc<FakeState>>, headers: HeaderMap, body: Bytes) -> Response {
    record_auth(&state, &headers);
    state.recorded.uploads.fetch_add(1, Ordering::SeqCst);
    state.recorded.uploaded.lock().unwrap().extend_from_slice(&body);

    if state.upload_status == StatusCode::OK {
        Json(json!({ "upload_url": UPLOAD_URL })).into_response()
    } else {
        (state.upload_status, r#"{"error":"Authentication error, API token missing/invalid"}"#)
            .into_response()
    }
}

async fn create(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_auth(&state, &headers);
    state.recorded.creates.fetch_add(1, Ordering::SeqCst);
    let audio_url = body["audio_url"].as_str().map(str::to_string);
    *state.recorded.created_audio_url.lock().unwrap() = audio_url.clone();

    if state.create_status != StatusCode::OK {
        return (state.create_status, r#"{"error":"Authentication error, API token missing/invalid"}"#)
            .into_response();
    }

    Json(json!({
        "id": JOB_ID,
        "status": "queued",
        "audio_url": audio_url,
        "language_code": state.language_code,
        "text": null
    }))
    .into_response()
}

async fn poll(
    State(state): State<Arc<FakeState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record_auth(&state, &headers);
    state.recorded.polls.fetch_add(1, Ordering::SeqCst);

    if id != JOB_ID {
        return (StatusCode::NOT_FOUND, r#"{"error":"Transcript lookup error"}"#).into_response();
    }

    let mut polls = state.polls.lock().unwrap();
    let next = if polls.len() > 1 {
        polls.pop_front()
    } else {
        polls.front().cloned()
    };
    Json(next.unwrap_or_else(|| status("processing"))).into_response()
}
