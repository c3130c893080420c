use std::collections::HashMap;

use analysis::baseline::BaselineChange;
use analysis::season::{self, PlayerIdentity};

use crate::config::{RunMode, RunOptions};
use crate::error::RunError;
use crate::source::{self, StatSource};
use crate::steam_api::ProfileInfo;
use crate::storage::FileStorage;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: Vec<String>,
    pub created: usize,
    pub patched: usize,
    pub baseline_written: bool,
    pub leaderboard: common::Leaderboard,
}

/// Performs one batch over the whole roster.
///
/// Players without stats are skipped. The baseline is written only when it
/// changed, the leaderboard is always replaced.
#[tracing::instrument(skip_all, fields(mode = ?options.mode, schema = %options.schema, formula = %options.formula))]
pub async fn run(
    source: &dyn StatSource,
    storage: &FileStorage,
    options: &RunOptions,
) -> Result<RunSummary, RunError> {
    let roster = storage
        .load_roster()?
        .ok_or_else(|| RunError::MissingRoster(storage.players_path().to_owned()))?;
    if roster.is_empty() {
        return Err(RunError::EmptyRoster(storage.players_path().to_owned()));
    }

    let mut store = storage.load_baseline()?;
    if options.mode == RunMode::ResetSeason {
        tracing::warn!("Resetting the season");
        store.reset();
    }

    let profiles = if options.fetch_profiles {
        load_profiles(source, &roster).await
    } else {
        HashMap::new()
    };

    let mut skipped = Vec::new();
    let mut created = 0;
    let mut patched = 0;
    let mut seasons = Vec::with_capacity(roster.len());

    for entry in roster {
        let mut player = PlayerIdentity::new(entry.steamid, entry.nickname);
        if let Some(profile) = profiles.get(&player.steam_id) {
            player = player.with_profile(profile.personaname.clone(), profile.avatarfull.clone());
        }

        tracing::info!(name = %player.name, nickname = %player.nickname, "Processing");

        let snapshot = match source::fetch_snapshot(source, &player.steam_id, options.schema).await {
            Some(s) => s,
            None => {
                tracing::warn!(nickname = %player.nickname, "No data, skipping player");
                skipped.push(player.nickname);
                continue;
            }
        };

        let (season, change) = season::process(
            &mut store,
            player,
            options.schema,
            &snapshot,
            &options.formula,
        );
        match change {
            BaselineChange::Unchanged => {}
            BaselineChange::Created => created += 1,
            BaselineChange::Patched(_) => patched += 1,
        }

        seasons.push(season);
    }

    let baseline_written = store.persist(|records| storage.save_baseline(records))?;

    let processed = seasons.len();
    let leaderboard = analysis::ranking::assemble(
        seasons,
        timestamp(),
        options.mode != RunMode::ResetSeason,
    );
    storage.save_leaderboard(&leaderboard)?;

    Ok(RunSummary {
        processed,
        skipped,
        created,
        patched,
        baseline_written,
        leaderboard,
    })
}

async fn load_profiles(
    source: &dyn StatSource,
    roster: &[common::RosterEntry],
) -> HashMap<String, ProfileInfo> {
    tracing::info!("Updating profile names and avatars");

    let ids: Vec<&str> = roster.iter().map(|e| e.steamid.as_str()).collect();
    match source.fetch_profiles(&ids).await {
        Ok(profiles) => profiles
            .into_iter()
            .map(|p| (p.steamid.clone(), p))
            .collect(),
        Err(e) => {
            tracing::warn!("Fetching profiles: {}", e);
            HashMap::new()
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%d.%m.%Y %H:%M").to_string()
}
