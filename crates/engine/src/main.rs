//! Playbook Engine - diagnostics entry point.
//!
//! Fetches the remote playbook collection once and logs what it found.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playbook_engine::infrastructure::{
    clock::SystemClock, config::PlaybookApiConfig, playbook_api::ReqwestPlaybookApi,
};
use playbook_engine::stores::current_version;
use playbook_engine::PlaybookSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playbook_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PlaybookApiConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        authenticated = config.auth_token.is_some(),
        "Starting Playbook Engine diagnostics"
    );

    let api = Arc::new(ReqwestPlaybookApi::new(&config));
    let mut session = PlaybookSession::new(api, Arc::new(SystemClock::new()));

    session
        .fetch_playbooks()
        .await
        .with_context(|| format!("Failed to fetch playbooks from {}", config.base_url))?;

    let store = session.store();
    for playbook in store.playbooks() {
        tracing::info!(
            playbook_id = %playbook.id(),
            name = %playbook.name(),
            team_id = %playbook.team_id(),
            plays = playbook.plays().len(),
            "Playbook"
        );
        for play in playbook.plays() {
            let current = current_version(play);
            tracing::debug!(
                play_id = %play.id(),
                name = %play.name(),
                category = play.category().label(),
                versions = play.versions().len(),
                current_version = ?current.map(|v| v.name().as_str()),
                views = current.map_or(0, |v| v.views().len()),
                "Play"
            );
        }
    }
    tracing::info!(
        playbooks = store.playbooks().len(),
        tags = ?store.available_tags(),
        "Diagnostics complete"
    );

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
