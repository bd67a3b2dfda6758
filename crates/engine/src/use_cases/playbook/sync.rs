//! Synchronization with the remote playbook API.

use super::{PlaybookError, PlaybookSession};
use crate::infrastructure::ports::ApiError;
use crate::stores::{ChangeKind, PendingChange};

impl PlaybookSession {
    /// Replace the collection with the remote state.
    ///
    /// On failure the collection and pending log are cleared, the failure is
    /// recorded on the store, and the transport error is returned.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_playbooks(&mut self) -> Result<usize, PlaybookError> {
        match self.api.fetch_playbooks().await {
            Ok(snapshot) => {
                let count = snapshot.playbooks.len();
                self.store.load(snapshot, self.clock.now());
                tracing::info!(
                    playbooks = count,
                    tags = self.store.tags().len(),
                    "Loaded playbooks"
                );
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch playbooks");
                self.store.fail(e.to_string(), self.clock.now());
                Err(e.into())
            }
        }
    }

    /// Write every pending change through the remote API, in the order the
    /// changes were made.
    ///
    /// Stops at the first failure; that change and everything after it stay
    /// pending. Returns the number of changes written.
    #[tracing::instrument(skip(self), fields(pending = self.store.pending_changes().len()))]
    pub async fn commit_changes(&mut self) -> Result<usize, PlaybookError> {
        let pending = self.store.pending_changes().to_vec();
        let mut written = 0;

        for change in pending {
            if let Err(e) = self.write_change(&change).await {
                tracing::error!(error = %e, change = ?change, "Failed to commit change");
                return Err(e.into());
            }
            self.store.complete_change(&change);
            written += 1;
        }

        tracing::info!(written, "Committed pending changes");
        Ok(written)
    }

    async fn write_change(&self, change: &PendingChange) -> Result<(), ApiError> {
        match change {
            PendingChange::Playbook { playbook_id, kind } => {
                let Some(playbook) = self.store.get_playbook(playbook_id) else {
                    tracing::warn!(playbook_id = %playbook_id, "Pending playbook no longer loaded");
                    return Ok(());
                };
                match kind {
                    ChangeKind::Created => self.api.create_playbook(playbook).await,
                    ChangeKind::Updated => self.api.update_playbook(playbook).await,
                }
            }
            PendingChange::Play {
                playbook_id,
                play_id,
                kind,
            } => {
                let Some(play) = self
                    .store
                    .get_playbook(playbook_id)
                    .and_then(|p| p.play(play_id))
                else {
                    tracing::warn!(play_id = %play_id, "Pending play no longer loaded");
                    return Ok(());
                };
                match kind {
                    ChangeKind::Created => self.api.create_play(playbook_id, play).await,
                    ChangeKind::Updated => self.api.update_play(playbook_id, play).await,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockPlaybookApiPort, PlaybookSnapshot};
    use crate::stores::SyncState;
    use crate::use_cases::playbook::test_support::{coach, offline_session, session_with, t0};
    use crate::use_cases::playbook::{
        CreatePlayInput, CreatePlaybookInput, UpdatePlayInput, UpdatePlaybookInput,
    };
    use mockall::predicate::*;
    use playbook_domain::{NewPlay, Play, PlayCategory, PlayName, Playbook, PlaybookName, TeamId};

    fn remote_playbook() -> Playbook {
        let mut playbook = Playbook::new(
            PlaybookName::new("Remote").unwrap(),
            TeamId::parse("team-9").unwrap(),
            t0(),
        );
        let play = Play::new(
            NewPlay::new(PlayName::new("Low block").unwrap(), PlayCategory::Defense)
                .with_tags(["compact"].into_iter().collect()),
            &coach(),
            t0(),
        );
        playbook.add_play(play, t0()).unwrap();
        playbook
    }

    mod fetch {
        use super::*;

        #[tokio::test]
        async fn success_replaces_collection_and_merges_tags() {
            let mut api = MockPlaybookApiPort::new();
            api.expect_fetch_playbooks().times(1).returning(|| {
                Ok(PlaybookSnapshot {
                    playbooks: vec![remote_playbook()],
                    available_tags: vec!["press".into()],
                })
            });
            let mut session = session_with(api);
            session
                .create_playbook(
                    CreatePlaybookInput {
                        name: "Local".into(),
                        team_id: "team-1".into(),
                        ..Default::default()
                    },
                    &coach(),
                )
                .unwrap();

            let loaded = session.fetch_playbooks().await.unwrap();

            assert_eq!(loaded, 1);
            let store = session.store();
            assert_eq!(store.playbooks()[0].name().as_str(), "Remote");
            assert_eq!(store.available_tags(), vec!["compact", "press"]);
            assert!(!store.has_pending_changes());
            assert_eq!(store.sync_state(), &SyncState::Loaded { at: t0() });
        }

        #[tokio::test]
        async fn tags_created_in_the_session_survive_a_refetch() {
            let mut api = MockPlaybookApiPort::new();
            api.expect_fetch_playbooks().times(1).returning(|| {
                Ok(PlaybookSnapshot {
                    playbooks: vec![remote_playbook()],
                    available_tags: vec![],
                })
            });
            let mut session = session_with(api);
            let playbook = session
                .create_playbook(
                    CreatePlaybookInput {
                        name: "Local".into(),
                        team_id: "team-1".into(),
                        ..Default::default()
                    },
                    &coach(),
                )
                .unwrap();
            session
                .create_play(
                    playbook.id(),
                    CreatePlayInput {
                        name: "Corner A".into(),
                        category: "CORNER_KICKS".into(),
                        tags: vec!["set-piece".into()],
                        ..Default::default()
                    },
                    &coach(),
                )
                .unwrap();

            session.fetch_playbooks().await.unwrap();

            let store = session.store();
            assert!(store.plays_by_tag("set-piece").is_empty());
            assert_eq!(store.available_tags(), vec!["compact", "set-piece"]);
        }

        #[tokio::test]
        async fn failure_clears_state_and_reports_error() {
            let mut api = MockPlaybookApiPort::new();
            api.expect_fetch_playbooks().returning(|| {
                Err(ApiError::Status {
                    status: 503,
                    body: "unavailable".into(),
                })
            });
            let mut session = session_with(api);
            session
                .create_playbook(
                    CreatePlaybookInput {
                        name: "Local".into(),
                        team_id: "team-1".into(),
                        ..Default::default()
                    },
                    &coach(),
                )
                .unwrap();

            let result = session.fetch_playbooks().await;

            assert!(matches!(
                result,
                Err(PlaybookError::Transport(ApiError::Status { status: 503, .. }))
            ));
            let store = session.store();
            assert!(store.playbooks().is_empty());
            assert!(!store.has_pending_changes());
            assert!(store.error().unwrap().contains("503"));
        }
    }

    mod commit {
        use super::*;

        #[tokio::test]
        async fn nothing_pending_writes_nothing() {
            let mut session = offline_session();
            assert_eq!(session.commit_changes().await.unwrap(), 0);
        }

        #[tokio::test]
        async fn writes_in_order_and_drains_log() {
            let mut api = MockPlaybookApiPort::new();
            let mut seq = mockall::Sequence::new();
            api.expect_create_playbook()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
            api.expect_create_play()
                .times(1)
                .in_sequence(&mut seq)
                .withf(|_, play| play.name().as_str() == "Corner A" && play.is_published())
                .returning(|_, _| Ok(()));

            let mut session = session_with(api);
            let playbook = session
                .create_playbook(
                    CreatePlaybookInput {
                        name: "Varsity".into(),
                        team_id: "team-1".into(),
                        ..Default::default()
                    },
                    &coach(),
                )
                .unwrap();
            let play = session
                .create_play(
                    playbook.id(),
                    CreatePlayInput {
                        name: "Corner A".into(),
                        category: "CORNER_KICKS".into(),
                        ..Default::default()
                    },
                    &coach(),
                )
                .unwrap();
            // Edits after creation ride along with the pending create
            session
                .update_play(
                    play.id(),
                    UpdatePlayInput {
                        is_published: Some(true),
                        ..Default::default()
                    },
                )
                .unwrap();

            let written = session.commit_changes().await.unwrap();

            assert_eq!(written, 2);
            assert!(!session.store().has_pending_changes());
        }

        #[tokio::test]
        async fn failure_keeps_remaining_changes() {
            let mut api = MockPlaybookApiPort::new();
            api.expect_fetch_playbooks().returning(|| {
                Ok(PlaybookSnapshot {
                    playbooks: vec![remote_playbook()],
                    available_tags: vec![],
                })
            });
            api.expect_update_playbook().times(1).returning(|_| Ok(()));
            api.expect_update_play()
                .times(1)
                .returning(|_, _| Err(ApiError::request_failed("connection reset")));

            let mut session = session_with(api);
            session.fetch_playbooks().await.unwrap();
            let playbook_id = session.store().playbooks()[0].id().clone();
            let play_id = session.store().playbooks()[0].plays()[0].id().clone();

            session
                .update_playbook(
                    &playbook_id,
                    UpdatePlaybookInput {
                        name: Some("Remote B".into()),
                        ..Default::default()
                    },
                )
                .unwrap();
            session
                .update_play(
                    &play_id,
                    UpdatePlayInput {
                        name: Some("Mid block".into()),
                        ..Default::default()
                    },
                )
                .unwrap();

            let result = session.commit_changes().await;

            assert!(matches!(
                result,
                Err(PlaybookError::Transport(ApiError::RequestFailed(_)))
            ));
            assert_eq!(
                session.store().pending_changes(),
                &[PendingChange::Play {
                    playbook_id,
                    play_id,
                    kind: ChangeKind::Updated,
                }]
            );
        }

        #[tokio::test]
        async fn passes_owning_playbook_id() {
            let mut api = MockPlaybookApiPort::new();
            let remote = remote_playbook();
            let remote_id = remote.id().clone();
            api.expect_fetch_playbooks().returning(move || {
                Ok(PlaybookSnapshot {
                    playbooks: vec![remote.clone()],
                    available_tags: vec![],
                })
            });
            api.expect_update_play()
                .with(eq(remote_id.clone()), always())
                .times(1)
                .returning(|_, _| Ok(()));

            let mut session = session_with(api);
            session.fetch_playbooks().await.unwrap();
            let play_id = session.store().playbooks()[0].plays()[0].id().clone();
            session
                .update_play(
                    &play_id,
                    UpdatePlayInput {
                        tags: Some(vec!["compact".into(), "counter".into()]),
                        ..Default::default()
                    },
                )
                .unwrap();

            assert_eq!(session.commit_changes().await.unwrap(), 1);
        }
    }
}
