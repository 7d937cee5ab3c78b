//! Minimal AT Protocol client: log in, create one post.

pub mod models;

use chrono::{SecondsFormat, Utc};
use reqwest::Response;

use crate::config::Credentials;
use crate::error::{AppError, Result};
use crate::facet::LinkFacet;
use crate::scraper::CLIENT;
use models::{
    CreateRecordRequest, CreateSessionRequest, Facet, POST_COLLECTION, PostRecord, PublishedPost,
    Session, XrpcError,
};

pub struct BlueskyClient {
    service_url: String,
}

impl BlueskyClient {
    pub fn new(service_url: &str) -> Self {
        BlueskyClient {
            service_url: service_url.trim_end_matches('/').to_string(),
        }
    }

    fn xrpc_url(&self, nsid: &str) -> String {
        format!("{}/xrpc/{}", self.service_url, nsid)
    }

    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let body = CreateSessionRequest {
            identifier: &credentials.handle,
            password: &credentials.password,
        };

        let res = CLIENT
            .post(self.xrpc_url("com.atproto.server.createSession"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::PublishError(format!("Login request failed: {}", e)))?;

        let session: Session = read_json(res, "Login").await?;
        ::log::info!("Logged in as {}", session.handle);
        Ok(session)
    }

    pub async fn publish(
        &self,
        session: &Session,
        text: &str,
        facets: &[LinkFacet],
    ) -> Result<PublishedPost> {
        let body = CreateRecordRequest {
            repo: &session.did,
            collection: POST_COLLECTION,
            record: PostRecord {
                record_type: POST_COLLECTION,
                text,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                facets: facets.iter().map(Facet::from).collect(),
            },
        };

        let res = CLIENT
            .post(self.xrpc_url("com.atproto.repo.createRecord"))
            .bearer_auth(&session.access_jwt)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::PublishError(format!("Post request failed: {}", e)))?;

        read_json(res, "Post").await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(res: Response, what: &str) -> Result<T> {
    let status = res.status();
    if !status.is_success() {
        let detail: XrpcError = res.json().await.unwrap_or_default();
        let reason = match (detail.error, detail.message) {
            (Some(error), Some(message)) => format!("{}: {}", error, message),
            (Some(text), None) | (None, Some(text)) => text,
            (None, None) => "no details".to_string(),
        };
        return Err(AppError::PublishError(format!("{} failed with {}: {}", what, status, reason)));
    }

    res.json()
        .await
        .map_err(|e| AppError::PublishError(format!("Invalid {} response: {}", what.to_lowercase(), e)))
}
