// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Process-wide default client
//!
//! [`configure`] may run once, before the first request. Requests made
//! without it use a client built from [`ClientConfig::default`].

use std::sync::OnceLock;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{Client, RequestOptions, Response, Target};

static DEFAULT_CLIENT: OnceLock<Client> = OnceLock::new();

/// Install the process-wide client
///
/// Fails if a client is already installed, including one created lazily
/// by an earlier request.
pub fn configure(config: ClientConfig) -> Result<()> {
    install(Client::with_config(config)?)
}

/// Install an already-built client as the process-wide default
pub fn install(client: Client) -> Result<()> {
    DEFAULT_CLIENT
        .set(client)
        .map_err(|_| Error::config("default client already configured"))
}

/// Get the process-wide client, creating a default one if needed
pub fn default_client() -> Result<&'static Client> {
    if let Some(client) = DEFAULT_CLIENT.get() {
        return Ok(client);
    }
    let client = Client::new()?;
    Ok(DEFAULT_CLIENT.get_or_init(|| client))
}

/// [`Client::get`] on the process-wide client
pub async fn get(url: impl Into<Target>, options: RequestOptions) -> Result<Response> {
    default_client()?.get(url, options).await
}

/// [`Client::post`] on the process-wide client
pub async fn post(url: impl Into<Target>, options: RequestOptions) -> Result<Response> {
    default_client()?.post(url, options).await
}

/// [`Client::send`] on the process-wide client
pub async fn send(url: impl Into<Target>, options: RequestOptions) -> Result<Response> {
    default_client()?.send(url, options).await
}

/// [`Client::send_form_data`] on the process-wide client
pub async fn send_form_data(url: impl Into<Target>, options: RequestOptions) -> Result<Response> {
    default_client()?.send_form_data(url, options).await
}
