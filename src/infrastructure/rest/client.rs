//! Blocking HTTP client shared by the REST API adapters

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::domain::ports::{RemoteError, RemoteResult};

const API_PREFIX: &str = "api/2.0";

/// Error code the platform returns for objects that do not exist
const RESOURCE_DOES_NOT_EXIST: &str = "RESOURCE_DOES_NOT_EXIST";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(host: &str, token: Option<&str>, timeout: Duration) -> RemoteResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stackctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: host.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(endpoint));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub fn get(&self, endpoint: &str, query: &[(&str, String)]) -> RemoteResult<Value> {
        send(self.request(Method::GET, endpoint).query(query))
    }

    pub fn post(&self, endpoint: &str, body: &Value) -> RemoteResult<Value> {
        send(self.request(Method::POST, endpoint).json(body))
    }
}

fn send(req: RequestBuilder) -> RemoteResult<Value> {
    let resp = req
        .send()
        .map_err(|e| RemoteError::Transport(e.to_string()))?;
    let status = resp.status().as_u16();
    let body = resp.text().unwrap_or_default();
    interpret_response(status, &body)
}

/// Map a raw HTTP response onto the remote error taxonomy.
///
/// Successful responses with an empty body become an empty JSON object.
pub fn interpret_response(status: u16, body: &str) -> RemoteResult<Value> {
    if (200..300).contains(&status) {
        if body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        return serde_json::from_str(body).map_err(|e| {
            RemoteError::Transport(format!("invalid JSON in response: {}", e))
        });
    }

    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error_code = parsed
        .as_ref()
        .and_then(|v| v.get("error_code"))
        .and_then(Value::as_str);
    if status == 404 || error_code == Some(RESOURCE_DOES_NOT_EXIST) {
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .unwrap_or(body)
            .to_string();
        return Err(RemoteError::NotFound(message));
    }
    Err(RemoteError::Http {
        status,
        body: body.to_string(),
    })
}
