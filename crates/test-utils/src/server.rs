//! Local WMS endpoint for exercising the feature-info client.
//!
//! Every request to the WMS path gets the same canned answer. The method and
//! URI of each request are recorded so tests can assert on the query string
//! and on the number of calls made.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Path the server answers on, shaped like the real WMS endpoint.
pub const WMS_PATH: &str = "/geo/alo/wms";

/// What the server answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with `application/json`.
    Json(String),
    /// Arbitrary status and content type.
    Raw {
        status: u16,
        content_type: &'static str,
        body: String,
    },
    /// Accept the request, then never answer.
    Stall,
}

struct ServerState {
    response: MockResponse,
    requests: Mutex<Vec<String>>,
}

/// A local server bound to an ephemeral port. Shut down on drop.
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(response: MockResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");

        let state = Arc::new(ServerState {
            response,
            requests: Mutex::new(Vec::new()),
        });
        let app = create_router(state.clone());

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Endpoint URL of the WMS path.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, WMS_PATH)
    }

    /// Requests received so far, e.g. `GET /geo/alo/wms?service=WMS&...`.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(WMS_PATH, get(wms_handler))
        .layer(Extension(state))
}

async fn wms_handler(
    Extension(state): Extension<Arc<ServerState>>,
    method: Method,
    uri: Uri,
) -> Response {
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(format!("{} {}", method, uri));

    match &state.response {
        MockResponse::Json(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        MockResponse::Raw {
            status,
            content_type,
            body,
        } => (
            StatusCode::from_u16(*status).expect("valid status code"),
            [(header::CONTENT_TYPE, *content_type)],
            body.clone(),
        )
            .into_response(),
        MockResponse::Stall => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
    }
}
