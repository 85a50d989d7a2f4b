//! HTTP client for the customer API
//!
//! Every request goes through [`ApiClient`], which resolves paths against the
//! configured base URL and attaches the current session token as a bearer
//! credential right before the request is sent.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::auth::SessionStore;
use crate::config::ClientOptions;
use crate::error::{Error, Result};

/// Error body sent by the API alongside non-success statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

/// The single request pipeline shared by every API operation
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client for `options.api_url` with a JSON content-type default
    pub fn new(options: &ClientOptions, session: Arc<dyn SessionStore>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }

        Self::with_client(builder.build()?, &options.api_url, session)
    }

    /// Create a client around an already configured `reqwest::Client`
    pub fn with_client(client: Client, base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("{} cannot be used as a base URL", base_url)));
        }

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    /// Create a GET request
    pub fn get(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, Method::GET, path)
    }

    /// Create a POST request
    pub fn post(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, Method::POST, path)
    }

    /// Create a DELETE request
    pub fn delete(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, Method::DELETE, path)
    }

    /// Attach the bearer token when a session exists; leave the request
    /// untouched otherwise
    fn intercept(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Helper for building and executing a single API request
pub struct FetchBuilder<'a> {
    api: &'a ApiClient,
    method: Method,
    path: String,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    fn new(api: &'a ApiClient, method: Method, path: &str) -> Self {
        Self {
            api,
            method,
            path: path.to_string(),
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a query parameter to the request
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    fn build(&self) -> Result<RequestBuilder> {
        let mut url = self.api.endpoint(&self.path)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.api.client.request(self.method.clone(), url);
        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(self.api.intercept(req))
    }

    async fn send(&self) -> Result<Response> {
        let req = self.build()?;
        tracing::debug!("{} {}", self.method, self.path);

        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::debug!("{} {} failed with {}: {}", self.method, self.path, status, text);
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.error);

        if status == reqwest::StatusCode::CONFLICT {
            Err(Error::Conflict { message })
        } else {
            Err(Error::Api { status, message })
        }
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.send().await?;
        Ok(response.json::<T>().await?)
    }

    /// Execute the request, ignoring any response body
    pub async fn execute_empty(&self) -> Result<()> {
        self.send().await?;
        Ok(())
    }
}
