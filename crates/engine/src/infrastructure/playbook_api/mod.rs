//! REST client for the remote playbook API.

pub mod wire;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;

use playbook_domain::{Play, Playbook, PlaybookId};

use crate::infrastructure::config::PlaybookApiConfig;
use crate::infrastructure::ports::{ApiError, PlaybookApiPort, PlaybookSnapshot};

use self::wire::{PlayDto, PlaybookDto, PlaybooksResponse};

/// Client for the remote playbook API.
#[derive(Clone)]
pub struct ReqwestPlaybookApi {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ReqwestPlaybookApi {
    pub fn new(config: &PlaybookApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        }
    }

    /// Create client from environment variables. See [`PlaybookApiConfig::from_env`].
    pub fn from_env() -> Self {
        Self::new(&PlaybookApiConfig::from_env())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> Result<(), ApiError> {
        let response = self
            .request(method, path)
            .json(body)
            .send()
            .await
            .map_err(ApiError::request_failed)?;

        check_status(response).await?;
        Ok(())
    }
}

impl Default for ReqwestPlaybookApi {
    fn default() -> Self {
        Self::new(&PlaybookApiConfig::default())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .map_err(ApiError::request_failed)?;
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl PlaybookApiPort for ReqwestPlaybookApi {
    async fn fetch_playbooks(&self) -> Result<PlaybookSnapshot, ApiError> {
        let response = self
            .request(Method::GET, "/playbooks")
            .send()
            .await
            .map_err(ApiError::request_failed)?;

        let body: PlaybooksResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(ApiError::invalid_response)?;

        wire::snapshot_from_wire(body).map_err(ApiError::invalid_response)
    }

    async fn create_playbook(&self, playbook: &Playbook) -> Result<(), ApiError> {
        self.send_json(Method::POST, "/playbooks", &PlaybookDto::from(playbook))
            .await
    }

    async fn update_playbook(&self, playbook: &Playbook) -> Result<(), ApiError> {
        let path = format!("/playbooks/{}", playbook.id());
        self.send_json(Method::PUT, &path, &PlaybookDto::from(playbook))
            .await
    }

    async fn create_play(&self, playbook_id: &PlaybookId, play: &Play) -> Result<(), ApiError> {
        let path = format!("/playbooks/{}/plays", playbook_id);
        self.send_json(Method::POST, &path, &PlayDto::from(play)).await
    }

    async fn update_play(&self, playbook_id: &PlaybookId, play: &Play) -> Result<(), ApiError> {
        let path = format!("/playbooks/{}/plays/{}", playbook_id, play.id());
        self.send_json(Method::PUT, &path, &PlayDto::from(play)).await
    }
}
