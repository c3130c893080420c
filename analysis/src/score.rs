//! Formulas turning a [`SeasonDelta`] into the single value the leaderboard is
//! ordered by.

use crate::counters::ParseError;
use crate::season::{round_to, SeasonDelta};

pub trait Scoring {
    fn score(&self, season: &SeasonDelta) -> f64;
}

/// Per-round efficiency. Players below [`RateNormalized::MIN_ROUNDS`] score
/// 0.0, qualified players never score below [`RateNormalized::FLOOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateNormalized;

impl RateNormalized {
    pub const MIN_ROUNDS: u64 = 5;
    pub const FLOOR: f64 = 0.1;
}

impl Scoring for RateNormalized {
    fn score(&self, season: &SeasonDelta) -> f64 {
        let rounds = season.stat("rounds");
        if rounds < Self::MIN_ROUNDS {
            return 0.0;
        }

        let raw = season.stat("mvps") as f64 * 3.0 + season.stat("damage") as f64 / 100.0
            + season.stat("headshots") as f64 * 0.2
            - season.stat("deaths") as f64 * 1.0;

        let normalized = raw / rounds as f64 * 100.0;
        if normalized < 0.0 {
            return Self::FLOOR;
        }

        round_to(normalized, 1)
    }
}

/// Raw season volume, no minimum and no floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbsoluteVolume;

impl Scoring for AbsoluteVolume {
    fn score(&self, season: &SeasonDelta) -> f64 {
        let score = season.stat("kills") as f64 * 1.0
            + season.stat("mvps") as f64 * 3.0
            + season.stat("wins") as f64 * 5.0
            + season.stat("damage") as f64 / 100.0
            + season.stat("headshots") as f64 * 0.2
            - season.stat("deaths") as f64 * 0.5;

        round_to(score, 1)
    }
}

/// The configured formula of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreFormula {
    #[default]
    RateNormalized,
    AbsoluteVolume,
}

impl Scoring for ScoreFormula {
    fn score(&self, season: &SeasonDelta) -> f64 {
        match self {
            Self::RateNormalized => RateNormalized.score(season),
            Self::AbsoluteVolume => AbsoluteVolume.score(season),
        }
    }
}

impl std::fmt::Display for ScoreFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateNormalized => write!(f, "rate-normalized"),
            Self::AbsoluteVolume => write!(f, "absolute-volume"),
        }
    }
}

impl std::str::FromStr for ScoreFormula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rate-normalized" | "v2" => Ok(Self::RateNormalized),
            "absolute-volume" | "v1" => Ok(Self::AbsoluteVolume),
            _ => Err(ParseError {
                kind: "score formula",
                value: s.to_owned(),
                expected: "rate-normalized, absolute-volume",
            }),
        }
    }
}
