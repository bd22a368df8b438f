use std::time::Duration;

use anyhow::Context;
use checkout_types::ports::GatewayError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Clone)]
pub struct TransportBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// JSON request/response plumbing shared by the service clients.
#[derive(Clone, Debug)]
pub struct Transport {
    base: Url,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl Transport {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<TransportBuilder> {
        let mut base = Url::parse(base_url).context("invalid base url")?;
        if base.cannot_be_a_base() {
            anyhow::bail!("base url cannot carry a path: {base_url}");
        }
        // Relative joins must stay under the base path (e.g. `/api/`).
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(TransportBuilder {
            base,
            headers,
            timeout: None,
            client: None,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Network(format!("invalid base url {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, GatewayError> {
        Ok(self.client.request(method, self.endpoint(segments)?))
    }

    /// Sends `req` and decodes a JSON body from a successful response.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let res = self.execute(req).await?;
        let status = res.status();
        res.json::<T>().await.map_err(|e| {
            tracing::warn!(%status, error = %e, "undecodable response body");
            GatewayError::Service {
                status: status.as_u16(),
                message: None,
            }
        })
    }

    /// Sends `req`, turning transport failures and non-2xx responses into
    /// [`GatewayError`]s.
    pub(crate) async fn execute(&self, req: RequestBuilder) -> Result<Response, GatewayError> {
        let request = req
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        tracing::debug!(method = %request.method(), url = %request.url(), "request");

        let res = self
            .client
            .execute(request)
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let status = res.status();
        tracing::debug!(%status, "response");
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        Err(GatewayError::Service {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

impl TransportBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Uses `client` as is; headers and timeout set on this builder are ignored.
    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<Transport> {
        if let Some(client) = self.client {
            return Ok(Transport {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder().default_headers(self.headers);
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().context("failed to build http client")?;
        Ok(Transport {
            base: self.base,
            client,
        })
    }
}
