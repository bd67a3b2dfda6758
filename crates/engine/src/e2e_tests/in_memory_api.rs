//! In-memory stand-in for the remote playbook API.

use async_trait::async_trait;
use tokio::sync::Mutex;

use playbook_domain::{Play, Playbook, PlaybookId};

use crate::infrastructure::playbook_api::wire::{self, PlayDto, PlaybookDto, PlaybooksResponse};
use crate::infrastructure::ports::{ApiError, PlaybookApiPort, PlaybookSnapshot};

/// Keeps the remote state as serialized JSON, like a real backend would.
#[derive(Default)]
pub struct InMemoryPlaybookApi {
    state: Mutex<PlaybooksResponse>,
}

impl InMemoryPlaybookApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(tags: &[&str]) -> Self {
        Self {
            state: Mutex::new(PlaybooksResponse {
                playbooks: vec![],
                available_tags: tags.iter().map(|t| t.to_string()).collect(),
            }),
        }
    }

    /// Raw JSON body `GET /playbooks` would return right now.
    pub async fn body(&self) -> String {
        serde_json::to_string(&*self.state.lock().await).unwrap()
    }

    fn playbook_dto<'a>(
        state: &'a mut PlaybooksResponse,
        id: &PlaybookId,
    ) -> Result<&'a mut PlaybookDto, ApiError> {
        state
            .playbooks
            .iter_mut()
            .find(|p| p.id == id.as_str())
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: format!("playbook {} not found", id),
            })
    }
}

#[async_trait]
impl PlaybookApiPort for InMemoryPlaybookApi {
    async fn fetch_playbooks(&self) -> Result<PlaybookSnapshot, ApiError> {
        let body = self.body().await;
        let response: PlaybooksResponse =
            serde_json::from_str(&body).map_err(ApiError::invalid_response)?;
        wire::snapshot_from_wire(response).map_err(ApiError::invalid_response)
    }

    async fn create_playbook(&self, playbook: &Playbook) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        state.playbooks.push(PlaybookDto::from(playbook));
        Ok(())
    }

    async fn update_playbook(&self, playbook: &Playbook) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        let stored = Self::playbook_dto(&mut state, playbook.id())?;
        let incoming = PlaybookDto::from(playbook);
        stored.name = incoming.name;
        stored.description = incoming.description;
        stored.updated_at = incoming.updated_at;
        Ok(())
    }

    async fn create_play(&self, playbook_id: &PlaybookId, play: &Play) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        let dto = PlayDto::from(play);
        for tag in &dto.tags {
            if !state.available_tags.contains(tag) {
                state.available_tags.push(tag.clone());
            }
        }
        Self::playbook_dto(&mut state, playbook_id)?.plays.push(dto);
        Ok(())
    }

    async fn update_play(&self, playbook_id: &PlaybookId, play: &Play) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        let dto = PlayDto::from(play);
        let playbook = Self::playbook_dto(&mut state, playbook_id)?;
        let stored = playbook
            .plays
            .iter_mut()
            .find(|p| p.id == dto.id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: format!("play {} not found", dto.id),
            })?;
        *stored = dto;
        Ok(())
    }
}
