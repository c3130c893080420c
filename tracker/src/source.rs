use analysis::counters::{CounterSchema, RawStat, Snapshot};

use crate::steam_api::{self, ApiError, ProfileInfo};

/// Where lifetime stats and profiles come from.
#[async_trait::async_trait]
pub trait StatSource: Send + Sync {
    async fn fetch_stats(&self, steam_id: &str) -> Result<Vec<RawStat>, ApiError>;

    async fn fetch_profiles(&self, steam_ids: &[&str]) -> Result<Vec<ProfileInfo>, ApiError>;
}

#[async_trait::async_trait]
impl StatSource for steam_api::Client {
    async fn fetch_stats(&self, steam_id: &str) -> Result<Vec<RawStat>, ApiError> {
        self.user_stats(steam_id).await
    }

    async fn fetch_profiles(&self, steam_ids: &[&str]) -> Result<Vec<ProfileInfo>, ApiError> {
        self.player_summaries(steam_ids).await
    }
}

/// Current counters of a player, or `None` when the source has nothing usable.
#[tracing::instrument(skip(source))]
pub async fn fetch_snapshot(
    source: &dyn StatSource,
    steam_id: &str,
    schema: CounterSchema,
) -> Option<Snapshot> {
    match source.fetch_stats(steam_id).await {
        Ok(stats) if stats.is_empty() => {
            tracing::warn!(steam_id, "Source returned an empty stat list");
            None
        }
        Ok(stats) => Some(Snapshot::extract(&stats, schema)),
        Err(e) => {
            tracing::warn!(steam_id, "Fetching stats: {}", e);
            None
        }
    }
}
