use std::path::PathBuf;

use analysis::counters::CounterSchema;
use analysis::score::ScoreFormula;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Normal,
    /// Drops every baseline before processing, starting a new season.
    ResetSeason,
}

/// Everything a single run needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: RunMode,
    pub schema: CounterSchema,
    pub formula: ScoreFormula,
    pub fetch_profiles: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Normal,
            schema: CounterSchema::V2,
            formula: ScoreFormula::RateNormalized,
            fetch_profiles: true,
        }
    }
}

/// Computes the season leaderboard from the Steam stats of a fixed roster.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// JSON object mapping nicknames to steam ids
    #[arg(long, default_value = "scripts/players.json")]
    pub players: PathBuf,

    /// Start-of-season snapshot, created when missing
    #[arg(long, default_value = "scripts/baseline.json")]
    pub baseline: PathBuf,

    /// Leaderboard consumed by the front-end
    #[arg(long, default_value = "src/data.json")]
    pub output: PathBuf,

    #[arg(long, env = "STEAM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value = crate::steam_api::DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Counter set to track (v1, v2)
    #[arg(long, default_value_t = CounterSchema::V2)]
    pub schema: CounterSchema,

    /// Score formula (rate-normalized, absolute-volume)
    #[arg(long, default_value_t = ScoreFormula::RateNormalized)]
    pub formula: ScoreFormula,

    /// Discard all baselines and start a new season with this run
    #[arg(long)]
    pub reset_season: bool,

    /// Keep roster nicknames instead of looking up profile names and avatars
    #[arg(long)]
    pub skip_profiles: bool,

    /// Timeout of a single request to the stats API
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Include per-player debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            mode: if self.reset_season {
                RunMode::ResetSeason
            } else {
                RunMode::Normal
            },
            schema: self.schema,
            formula: self.formula,
            fetch_profiles: !self.skip_profiles,
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
