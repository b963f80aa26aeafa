//! HTTP Remote Store
//!
//! [`RemoteStore`] implementation over a JSON REST service using reqwest:
//! `POST /expenses` assigns an id, `PUT`/`DELETE /expenses/{id}` acknowledge
//! with no payload, `GET /expenses` returns the full ledger.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::model::{Expense, ExpenseDraft};
use crate::remote::RemoteStore;

// == Wire DTOs ==
/// Reply body for `POST /expenses`.
#[derive(Debug, Deserialize)]
struct CreateReply {
    /// The remote-assigned expense id
    id: String,
}

// == HTTP Remote Store ==
/// Talks to the remote expense store over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: Client,
    base_url: String,
}

impl HttpRemoteStore {
    // == Constructor ==
    /// Builds a store client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// == Error Classification ==
/// Maps a non-success HTTP status to a store error.
fn classify_status(status: StatusCode, id: Option<&str>) -> StoreError {
    if status == StatusCode::NOT_FOUND {
        StoreError::NotFound(id.unwrap_or("<unassigned>").to_string())
    } else {
        StoreError::Server(format!("unexpected status {status}"))
    }
}

/// Maps a reqwest error to a store error.
///
/// Transport failures (connect, timeout) are `Network`; a body that fails to
/// decode means the server answered with something unusable, so `Server`.
fn classify_transport(err: reqwest::Error) -> StoreError {
    if err.is_decode() {
        StoreError::Server(err.to_string())
    } else {
        StoreError::Network(err.to_string())
    }
}

fn check_status(response: Response, id: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(classify_status(status, id))
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn create(&self, draft: &ExpenseDraft) -> Result<String> {
        let url = self.url("/expenses");
        debug!(%url, "creating expense remotely");

        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(classify_transport)?;

        let reply: CreateReply = check_status(response, None)?
            .json()
            .await
            .map_err(classify_transport)?;

        Ok(reply.id)
    }

    async fn update(&self, id: &str, draft: &ExpenseDraft) -> Result<()> {
        let url = self.url(&format!("/expenses/{id}"));
        debug!(%url, "updating expense remotely");

        let response = self
            .client
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(classify_transport)?;

        check_status(response, Some(id))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/expenses/{id}"));
        debug!(%url, "deleting expense remotely");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(classify_transport)?;

        check_status(response, Some(id))?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Expense>> {
        let url = self.url("/expenses");
        debug!(%url, "fetching remote ledger");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport)?;

        let mut expenses: Vec<Expense> = check_status(response, None)?
            .json()
            .await
            .map_err(classify_transport)?;

        // Display order: newest first
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }
}
