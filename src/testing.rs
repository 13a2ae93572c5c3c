//! In-process mock of the unit's local API.

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{
        Arc,
        Mutex,
        PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::client::{Client, Scheme};

/// Scripted response of a data endpoint.
#[derive(Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Self { status: StatusCode::OK, body: body.to_owned() }
    }

    pub const fn status(status: StatusCode) -> Self {
        Self { status, body: String::new() }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_owned();
        self
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

/// Requests received by one data endpoint.
#[derive(Default)]
struct Endpoint {
    replies: Mutex<VecDeque<Reply>>,
    queries: Mutex<Vec<Option<String>>>,
    cookies: Mutex<Vec<Option<String>>>,
}

impl Endpoint {
    fn handle(&self, uri: &Uri, headers: &HeaderMap) -> Reply {
        lock(&self.queries).push(uri.query().map(ToOwned::to_owned));
        lock(&self.cookies).push(
            headers
                .get(header::COOKIE)
                .and_then(|value| value.to_str().ok())
                .map(ToOwned::to_owned),
        );
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Reply::status(StatusCode::NOT_FOUND).with_body("no scripted reply"))
    }
}

struct MockState {
    login_status: StatusCode,
    login_redirects: bool,
    n_logins: AtomicUsize,
    authorizations: Mutex<Vec<String>>,
    inventory: Endpoint,
    production: Endpoint,
}

pub struct MockEnvoy {
    address: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

#[bon::bon]
impl MockEnvoy {
    /// Serve the mock on a random local port.
    ///
    /// Each successful login issues a new session cookie: `sessionId=1`, `sessionId=2`, and so on.
    /// A login with a non-success status issues no cookie. With `login_redirects`, a successful
    /// login sets the cookie on a `302 Found` to `/home`.
    #[builder(finish_fn = start)]
    pub async fn new(
        #[builder(default = StatusCode::OK)] login_status: StatusCode,
        #[builder(default)] login_redirects: bool,
    ) -> std::io::Result<Self> {
        let state = Arc::new(MockState {
            login_status,
            login_redirects,
            n_logins: AtomicUsize::new(0),
            authorizations: Mutex::default(),
            inventory: Endpoint::default(),
            production: Endpoint::default(),
        });
        let router = Router::new()
            .route("/auth/check_jwt", get(check_jwt))
            .route("/inventory.json", get(inventory))
            .route("/production.json", get(production))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        Ok(Self { address, state, handle })
    }
}

impl MockEnvoy {
    pub const COOKIE: &'static str = "sessionId";

    pub const fn address(&self) -> SocketAddr {
        self.address
    }

    pub async fn start() -> std::io::Result<Self> {
        Self::builder().start().await
    }

    pub fn client(&self) -> Client {
        Client::with_http(self.address.to_string(), Scheme::Http, reqwest::Client::new())
    }

    pub fn reply_inventory(&self, reply: Reply) {
        lock(&self.state.inventory.replies).push_back(reply);
    }

    pub fn reply_production(&self, reply: Reply) {
        lock(&self.state.production.replies).push_back(reply);
    }

    pub fn n_logins(&self) -> usize {
        self.state.n_logins.load(Ordering::SeqCst)
    }

    pub fn authorizations(&self) -> Vec<String> {
        lock(&self.state.authorizations).clone()
    }

    pub fn inventory_queries(&self) -> Vec<Option<String>> {
        lock(&self.state.inventory.queries).clone()
    }

    pub fn inventory_cookies(&self) -> Vec<Option<String>> {
        lock(&self.state.inventory.cookies).clone()
    }

    pub fn production_queries(&self) -> Vec<Option<String>> {
        lock(&self.state.production.queries).clone()
    }
}

impl Drop for MockEnvoy {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn check_jwt(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    let n_logins = state.n_logins.fetch_add(1, Ordering::SeqCst) + 1;
    if let Some(authorization) =
        headers.get(header::AUTHORIZATION).and_then(|value| value.to_str().ok())
    {
        lock(&state.authorizations).push(authorization.to_owned());
    }
    if state.login_status.is_success() && state.login_redirects {
        let cookie = format!("{}={n_logins}; Path=/; HttpOnly", MockEnvoy::COOKIE);
        (StatusCode::FOUND, [(header::SET_COOKIE, cookie), (header::LOCATION, "/home".to_owned())])
            .into_response()
    } else if state.login_status.is_success() {
        let cookie = format!("{}={n_logins}; Path=/; HttpOnly", MockEnvoy::COOKIE);
        (state.login_status, [(header::SET_COOKIE, cookie)], "<!DOCTYPE html><h2>Valid token.</h2>")
            .into_response()
    } else {
        (state.login_status, "<!DOCTYPE html><h2>Invalid token.</h2>").into_response()
    }
}

async fn inventory(State(state): State<Arc<MockState>>, uri: Uri, headers: HeaderMap) -> Reply {
    state.inventory.handle(&uri, &headers)
}

async fn production(State(state): State<Arc<MockState>>, uri: Uri, headers: HeaderMap) -> Reply {
    state.production.handle(&uri, &headers)
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
