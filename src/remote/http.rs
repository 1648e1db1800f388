use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;
use tracing::error;
use tracing::warn;

use super::VoteService;
use crate::utils::ScopedTimer;
use crate::ApiConfig;
use crate::AuthContext;
use crate::Error;
use crate::RemoteError;
use crate::Result;
use crate::TargetRef;
use crate::VoteDirection;

#[derive(Debug, Serialize)]
struct CastVoteBody {
    #[serde(rename = "type")]
    direction: VoteDirection,
}

/// REST adapter for the Q&A backend's vote endpoints
///
/// - cast: `POST {base}/{collection}/{id}/vote` with `{"type": "upvote" | "downvote"}`
/// - remove: `DELETE {base}/{collection}/{id}/vote`
///
/// Every request carries `Authorization: Bearer <token>` when the session has one.
pub struct HttpVoteService<A: AuthContext> {
    client: Client,
    api: ApiConfig,
    auth: Arc<A>,
}

impl<A: AuthContext> HttpVoteService<A> {
    pub fn new(
        api: ApiConfig,
        auth: Arc<A>,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(api.connect_timeout())
            .timeout(api.request_timeout())
            .user_agent(api.user_agent.clone())
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self { client, api, auth })
    }

    fn authorize(
        &self,
        request: RequestBuilder,
    ) -> RequestBuilder {
        match self.auth.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn classify(
        &self,
        err: reqwest::Error,
    ) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout(self.api.request_timeout())
        } else {
            err.into()
        }
    }

    /// Sends `request` and maps the response status.
    ///
    /// `absent_ok` turns a 404 into success, so deleting a vote that does not
    /// exist stays idempotent.
    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        absent_ok: bool,
    ) -> std::result::Result<(), RemoteError> {
        let _timer = ScopedTimer::new(operation);

        let response = self.authorize(request).send().await.map_err(|e| {
            error!("[:HttpVoteService:{}] send failed: {:?}", operation, e);
            self.classify(e)
        })?;

        let status = response.status();
        debug!("[:HttpVoteService:{}] status: {}", operation, status);

        if status.is_success() {
            return Ok(());
        }
        if absent_ok && status == StatusCode::NOT_FOUND {
            debug!("[:HttpVoteService:{}] no vote to remove", operation);
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("[:HttpVoteService:{}] credentials refused", operation);
            return Err(RemoteError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let message = response.text().await.unwrap_or_default();
        warn!(
            "[:HttpVoteService:{}] rejected with {}: {}",
            operation, status, message
        );
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl<A: AuthContext> VoteService for HttpVoteService<A> {
    async fn cast_vote(
        &self,
        target: TargetRef,
        direction: VoteDirection,
    ) -> std::result::Result<(), RemoteError> {
        let url = self.api.vote_url(target.kind, target.id);
        let request = self.client.post(url).json(&CastVoteBody { direction });
        self.send("cast_vote", request, false).await
    }

    async fn remove_vote(
        &self,
        target: TargetRef,
    ) -> std::result::Result<(), RemoteError> {
        let url = self.api.vote_url(target.kind, target.id);
        let request = self.client.delete(url);
        self.send("remove_vote", request, true).await
    }
}
