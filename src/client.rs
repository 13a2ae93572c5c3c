use std::{fmt::Formatter, sync::Arc, time::Duration};

use reqwest::{
    Response,
    StatusCode,
    cookie::{CookieStore, Jar},
    header::{COOKIE, SET_COOKIE},
    redirect,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    models::{Inventory, Production},
    prelude::*,
};

/// Wire scheme of the unit's local API.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Scheme {
    Http,

    /// Firmware 7 and newer serve HTTPS only, usually with a self-signed certificate.
    #[default]
    Https,
}

impl Scheme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client of the local Envoy API.
///
/// The client keeps a session: bearer token, logged-in flag, and a cookie jar. Every operation
/// takes `&mut self`, so a single client cannot be shared between concurrent tasks. Wrap it in a
/// mutex or create one client per task.
pub struct Client {
    address: String,
    scheme: Scheme,
    http: reqwest::Client,
    token: String,
    is_logged_in: bool,
    cookies: Option<Arc<Jar>>,
}

#[bon::bon]
impl Client {
    /// Build a client with its own HTTP transport.
    ///
    /// `address` is `host` or `host:port` and is not validated until the first request.
    ///
    /// The transport does not follow redirects, so that a session cookie set by a redirecting
    /// login response still reaches the cookie jar.
    #[builder]
    pub fn new(
        #[builder(into)] address: String,
        #[builder(default)] scheme: Scheme,

        // Accept any server certificate, including the unit's self-signed one.
        #[builder(default)]
        insecure_skip_verify: bool,

        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent("envoy").redirect(redirect::Policy::none());
        if insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true).danger_accept_invalid_hostnames(true);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http(address, scheme, builder.build()?))
    }
}

impl Client {
    /// Build a client on top of a caller-supplied HTTP transport.
    ///
    /// Use it to share a connection pool, set custom timeouts, or go through a proxy.
    ///
    /// If the transport follows redirects, cookies set on intermediate `3xx` responses of the
    /// login are lost. Build it with [`redirect::Policy::none`] to keep them.
    #[must_use]
    pub fn with_http(address: impl Into<String>, scheme: Scheme, http: reqwest::Client) -> Self {
        Self {
            address: address.into(),
            scheme,
            http,
            token: String::new(),
            is_logged_in: false,
            cookies: None,
        }
    }

    /// Set the bearer token for the following [`Client::login`].
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    /// Exchange the bearer token for a session cookie.
    ///
    /// This is a no-op if the client is already logged in. The session is not checked against
    /// the server.
    ///
    /// The client is marked as logged in even if the unit rejects the token: a rejected session
    /// shows up as `401` on the next request, which triggers one more login attempt.
    #[instrument(skip_all, fields(address = %self.address))]
    pub async fn login(&mut self) -> Result {
        if self.is_logged_in && self.cookies.is_some() {
            info!("already logged in, skipping");
            return Ok(());
        }

        let url = self.url("/auth/check_jwt")?;
        let jar = Arc::clone(self.cookies.get_or_insert_with(Arc::default));
        debug!(%url, "logging in…");
        let response = self.http.get(url.clone()).bearer_auth(&self.token).send().await?;
        let status = response.status();
        jar.set_cookies(&mut response.headers().get_all(SET_COOKIE).iter(), &url);
        if !status.is_success() && !status.is_redirection() {
            warn!(%status, "the unit did not accept the token");
        }

        self.is_logged_in = true;
        Ok(())
    }

    /// List the parts registered with the unit, including the deleted ones.
    #[instrument(skip_all, fields(address = %self.address))]
    pub async fn inventory(&mut self) -> Result<Vec<Inventory>> {
        self.get("/inventory.json?deleted=1").await
    }

    /// Fetch the current production and consumption readings.
    #[instrument(skip_all, fields(address = %self.address))]
    pub async fn production(&mut self) -> Result<Production> {
        self.get("/production.json?details=1").await
    }

    /// `GET` the path and decode the JSON body.
    ///
    /// Logs in and repeats the request once if the unit responds with `401`, or if the client
    /// has not logged in yet.
    async fn get<R: DeserializeOwned>(&mut self, path: &str) -> Result<R> {
        let url = self.url(path)?;

        let mut has_relogged_in = false;
        let response = loop {
            let response = self.send(&url).await?;
            let status = response.status();
            debug!(%url, %status, is_logged_in = self.is_logged_in, "received");
            if !has_relogged_in && (status == StatusCode::UNAUTHORIZED || !self.is_logged_in) {
                drop(response);
                self.is_logged_in = false;
                self.login().await?;
                has_relogged_in = true;
                continue;
            }
            break response;
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::NotOk { status });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(&self, url: &Url) -> Result<Response> {
        let mut request = self.http.get(url.clone());
        if let Some(cookies) = self.cookies.as_ref().and_then(|jar| jar.cookies(url)) {
            request = request.header(COOKIE, cookies);
        }
        Ok(request.send().await?)
    }

    fn url(&self, path: &str) -> Result<Url> {
        let url = format!("{}://{}{path}", self.scheme, self.address);
        Url::parse(&url).map_err(|source| Error::InvalidUrl { url, source })
    }
}
