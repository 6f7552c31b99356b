//! Composition root: content, repository and session from configuration.
use std::sync::Arc;

use anyhow::{Context, Result};
use encounter_content::ContentFactory;
use encounter_runtime::{
    BestiaryOracleImpl, EncounterSession, FileSnapshotRepository, RuntimeConfig,
};

pub fn open_session(config: &RuntimeConfig) -> Result<EncounterSession> {
    let factory = match &config.content_data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::debug!("Loading content from {}", factory.data_dir().display());

    let bestiary: BestiaryOracleImpl = factory.load_bestiary()?.into_iter().collect();
    let roster = factory.load_roster()?;
    tracing::info!(
        monsters = bestiary.len(),
        characters = roster.len(),
        "Content loaded"
    );

    let mut session = EncounterSession::new(Arc::new(bestiary));
    if config.enable_persistence {
        let repository = FileSnapshotRepository::new(config.save_dir(), config.session_id())
            .context("failed to open save directory")?;
        tracing::info!("Save file: {}", repository.path().display());
        session = session.with_repository(Arc::new(repository));
    }

    // The roster file is the source of truth for characters.
    if session.characters()? != roster {
        session.set_characters(roster)?;
    }

    Ok(session)
}
