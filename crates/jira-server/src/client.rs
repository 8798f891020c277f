//! Shared HTTP plumbing for the entity services
//!
//! Every call is a single request with a fixed timeout. There is no retry:
//! a network failure, timeout or non-success status is returned as-is.

use crate::connection::ServerConnection;
use crate::{Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, trace};

/// Per-request timeout for every Jira call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one Jira Server instance
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    connection: ServerConnection,
    base_url: String,
}

impl JiraClient {
    /// Create a client for the given connection
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(connection: ServerConnection) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = connection.base_url();

        Ok(Self {
            http,
            connection,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to `/rest/api/2`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(AUTHORIZATION, self.connection.authorization_header())
    }

    /// GET a JSON document
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!(path = %path, "GET");

        let mut request = self
            .request(Method::GET, path)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let body = read_body(response, "GET", path).await?;
        decode(&body, path)
    }

    /// POST a JSON body and decode the JSON answer
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// PUT a JSON body and decode the JSON answer
    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let method_name = method.to_string();
        debug!(method = %method_name, path = %path, "sending request");

        // .json() sets Content-Type: application/json
        let response = self.request(method, path).json(body).send().await?;
        let body = read_body(response, &method_name, path).await?;
        decode(&body, path)
    }

    /// DELETE an item; any success status is accepted
    pub(crate) async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<()> {
        debug!(path = %path, "DELETE");

        let mut request = self.request(Method::DELETE, path);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        read_body(response, "DELETE", path).await?;
        Ok(())
    }
}

async fn read_body(response: Response, method: &str, path: &str) -> Result<String> {
    let status = response.status();
    debug!(method = %method, path = %path, status = %status, "response received");

    let body = response.text().await?;
    trace!(body = %body, "response body");

    match status {
        s if s.is_success() => Ok(body),
        StatusCode::UNAUTHORIZED => Err(Error::Auth(format!(
            "{} {} returned HTTP {}",
            method, path, status
        ))),
        status => Err(Error::Status {
            method: method.to_string(),
            path: path.to_string(),
            status: status.as_u16(),
            body,
        }),
    }
}

fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| Error::Decode {
        context: context.to_string(),
        source,
    })
}
