//! Shared test fixtures: an in-process sink that records what it receives.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use url::Url;

use crate::relay::AUTH_HEADER;

/// A request as seen by [`MockSink`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub auth_token: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
    delay: Duration,
}

/// Sink stand-in answering every `POST /` with a fixed status.
pub struct MockSink {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockSink {
    pub async fn start(status: u16) -> Self {
        Self::start_delayed(status, Duration::ZERO).await
    }

    /// Like [`MockSink::start`], but sleeps `delay` before answering.
    pub async fn start_delayed(status: u16, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: Arc::clone(&requests),
            status: StatusCode::from_u16(status).unwrap(),
            delay,
        };

        let app = Router::new()
            .route("/", post(record))
            .layer(DefaultBodyLimit::disable())
            .with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        content_type: header(CONTENT_TYPE.as_str()),
        auth_token: header(AUTH_HEADER),
        body: body.to_vec(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    state.status
}

/// A local address with nothing listening on it.
pub async fn closed_port_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub async fn closed_port_url() -> Url {
    Url::parse(&format!("http://{}/", closed_port_addr().await)).unwrap()
}
