// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Public request entry points

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;

use super::dispatch::{send_request, PreparedRequest};
use super::options::{Body, Credentials, Data, FormData, RequestOptions, Target};
use super::response::Response;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::transport::{ReqwestTransport, Transport};

/// How an entry point picks the method
#[derive(Debug, Clone)]
enum MethodRule {
    /// Always this method
    Fixed(Method),
    /// Caller's method, else this one
    Default(Method),
    /// Caller's method, else left to the orchestrator
    Keep,
}

/// HTTP client holding the base URL and the transport
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("config", &self.config).finish()
    }
}

impl Client {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client backed by a [`ReqwestTransport`]
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(&config.transport)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Get client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a `GET`; flat `data` fields become the query string
    pub async fn get(&self, url: impl Into<Target>, options: RequestOptions) -> Result<Response> {
        self.dispatch(url.into(), options, MethodRule::Fixed(Method::GET), false)
            .await
    }

    /// Send a `POST`
    pub async fn post(&self, url: impl Into<Target>, options: RequestOptions) -> Result<Response> {
        self.dispatch(url.into(), options, MethodRule::Fixed(Method::POST), false)
            .await
    }

    /// Send with the caller's method (`GET` when unset)
    pub async fn send(&self, url: impl Into<Target>, options: RequestOptions) -> Result<Response> {
        self.dispatch(url.into(), options, MethodRule::Keep, false).await
    }

    /// Send flat `data` fields as `multipart/form-data` (`POST` when unset)
    pub async fn send_form_data(
        &self,
        url: impl Into<Target>,
        options: RequestOptions,
    ) -> Result<Response> {
        self.dispatch(url.into(), options, MethodRule::Default(Method::POST), true)
            .await
    }

    async fn dispatch(
        &self,
        target: Target,
        options: RequestOptions,
        rule: MethodRule,
        as_form: bool,
    ) -> Result<Response> {
        let request = self.prepare(target, options, rule, as_form)?;
        send_request(self.transport.as_ref(), request).await
    }

    /// Validate options and build a fresh request
    fn prepare(
        &self,
        target: Target,
        options: RequestOptions,
        rule: MethodRule,
        as_form: bool,
    ) -> Result<PreparedRequest> {
        let RequestOptions {
            url,
            base,
            method,
            headers,
            data,
            body,
            json,
            response_type,
            username,
            password,
            on_upload_progress,
        } = options;

        let url = match target {
            Target::Url(path) => {
                let base = base
                    .or_else(|| self.config.base_url.clone())
                    .unwrap_or_default();
                format!("{}{}", base, path)
            }
            Target::Prebuilt => url.unwrap_or_default(),
        };
        if url.is_empty() {
            return Err(Error::config("request URL is empty"));
        }

        let method = match rule {
            MethodRule::Fixed(m) => Some(m),
            MethodRule::Default(m) => Some(method.unwrap_or(m)),
            MethodRule::Keep => method,
        };

        for (name, value) in headers.iter() {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::invalid_header(name, e.to_string()))?;
            HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
        }

        let credentials = match (username, password) {
            (Some(username), password) => Some(Credentials { username, password }),
            (None, Some(_)) => return Err(Error::config("password given without username")),
            (None, None) => None,
        };

        let data = match data {
            Some(Data::Fields(fields)) if as_form => {
                Some(Data::Body(Body::Form(FormData::from_fields(&fields))))
            }
            other => other,
        };

        Ok(PreparedRequest {
            method,
            url,
            headers,
            data,
            body,
            json,
            response_type,
            credentials,
            on_upload_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockReply, MockTransport};
    use serde_json::json;

    fn client_with(base_url: Option<&str>) -> (Client, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let mut config = ClientConfig::new();
        config.base_url = base_url.map(str::to_string);
        (Client::with_transport(config, transport.clone()), transport)
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new().unwrap();
        assert!(client.config().base_url.is_none());
    }

    #[tokio::test]
    async fn test_base_url_resolution() {
        let (client, transport) = client_with(Some("https://api.example.com"));

        client.get("/a", RequestOptions::new()).await.unwrap();
        client
            .get("/b", RequestOptions::new().base("https://other.example.com"))
            .await
            .unwrap();
        client
            .get(
                Target::Prebuilt,
                RequestOptions::new().url("https://raw.example.com/c"),
            )
            .await
            .unwrap();

        let urls: Vec<_> = transport.calls().into_iter().map(|c| c.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.example.com/a",
                "https://other.example.com/b",
                "https://raw.example.com/c",
            ]
        );
    }

    #[tokio::test]
    async fn test_method_rules() {
        let (client, transport) = client_with(None);
        let put = || RequestOptions::new().method(Method::PUT);

        client.get("/g", put()).await.unwrap();
        client.post("/p", put()).await.unwrap();
        client.send("/s", put()).await.unwrap();
        client.send("/s", RequestOptions::new()).await.unwrap();
        client.send_form_data("/f", put()).await.unwrap();
        client.send_form_data("/f", RequestOptions::new()).await.unwrap();

        let methods: Vec<_> = transport.calls().into_iter().map(|c| c.method).collect();
        assert_eq!(
            methods,
            vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::GET,
                Method::PUT,
                Method::POST
            ]
        );
    }

    #[tokio::test]
    async fn test_send_form_data_builds_form() {
        let (client, transport) = client_with(None);
        let options = RequestOptions::new()
            .fields_from(&json!({"name": "a", "count": 2}))
            .unwrap();
        client.send_form_data("/upload", options).await.unwrap();

        let mut expected = FormData::new();
        expected.append("name", "a");
        expected.append("count", "2");
        assert_eq!(transport.last_call().unwrap().body, Some(Body::Form(expected)));
    }

    #[tokio::test]
    async fn test_send_form_data_passes_opaque_data() {
        let (client, transport) = client_with(None);
        let options = RequestOptions::new().data(Data::Body(Body::from("raw")));
        client.send_form_data("/upload", options).await.unwrap();
        assert_eq!(transport.last_call().unwrap().body, Some(Body::from("raw")));
    }

    #[tokio::test]
    async fn test_credentials() {
        let (client, transport) = client_with(None);
        client
            .get("/private", RequestOptions::new().credentials("user", "pw"))
            .await
            .unwrap();
        assert_eq!(
            transport.last_call().unwrap().credentials,
            Some(Credentials {
                username: "user".into(),
                password: Some("pw".into()),
            })
        );

        let err = client
            .get("/private", RequestOptions::new().password("pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_rejects_before_sending() {
        let (client, transport) = client_with(None);

        let err = client
            .get("/x", RequestOptions::new().header("bad name", "v"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { .. }));

        let err = client
            .get(Target::Prebuilt, RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_status_error_carries_response() {
        let (client, transport) = client_with(None);
        transport.push(
            MockReply::status(500)
                .header("Content-Type", "application/json")
                .body(r#"{"error":"boom"}"#),
        );

        let err = client.get("/fail", RequestOptions::new()).await.unwrap_err();
        let response = err.response().unwrap();
        assert_eq!(response.status_code, 500);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.text().as_deref(), Some(r#"{"error":"boom"}"#));
    }
}
