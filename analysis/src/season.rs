//! Season-to-date values of a player: current cumulative counters minus the
//! baseline, plus the derived favorites and ratios.

use crate::baseline::{BaselineChange, BaselineRecord, BaselineStore};
use crate::counters::{self, CounterSchema, CounterSet, Snapshot, WeaponCounterSet};
use crate::score::Scoring;

/// Marker used for a favorite weapon or map that does not exist.
pub const NONE_LABEL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub steam_id: String,
    pub nickname: String,
    /// Display label, the fetched profile name when available.
    pub name: String,
    pub avatar: String,
}

impl PlayerIdentity {
    pub fn new<S, N>(steam_id: S, nickname: N) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        let nickname = nickname.into();
        Self {
            steam_id: steam_id.into(),
            name: nickname.clone(),
            nickname,
            avatar: String::new(),
        }
    }

    pub fn with_profile<N, A>(mut self, name: N, avatar: A) -> Self
    where
        N: Into<String>,
        A: Into<String>,
    {
        self.name = name.into();
        self.avatar = avatar.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteWeapon {
    None,
    Weapon { id: String, kills: u64 },
}

impl FavoriteWeapon {
    pub fn label(&self) -> String {
        match self {
            Self::None => NONE_LABEL.to_owned(),
            Self::Weapon { id, .. } => id.to_uppercase(),
        }
    }

    pub fn kills(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::Weapon { kills, .. } => *kills,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteMap {
    None,
    Map { id: String, wins: u64 },
}

impl FavoriteMap {
    /// `de_dust2` is shown as `Dust2`.
    pub fn label(&self) -> String {
        match self {
            Self::None => NONE_LABEL.to_owned(),
            Self::Map { id, .. } => {
                let short = id.strip_prefix("de_").unwrap_or(id);
                let mut chars = short.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonDelta {
    pub player: PlayerIdentity,
    /// Every counter of the schema, clamped at 0.
    pub stats: CounterSet,
    /// Season kills per weapon, clamped at 0.
    pub weapons: WeaponCounterSet,
    pub fav_weapon: FavoriteWeapon,
    pub fav_map: FavoriteMap,
    pub kda: f64,
    pub hs_rate: f64,
    pub accuracy: f64,
    pub score: f64,
}

impl SeasonDelta {
    /// Computes the season values of `player`. The score is left at 0 until a
    /// formula is applied with [`SeasonDelta::scored`].
    pub fn compute(
        player: PlayerIdentity,
        schema: CounterSchema,
        current: &Snapshot,
        baseline: &BaselineRecord,
    ) -> Self {
        let stats: CounterSet = schema
            .counter_keys()
            .into_iter()
            .map(|key| {
                let now = current.counters.get(&key).copied().unwrap_or(0);
                let delta = now.saturating_sub(baseline.stat(&key));
                (key, delta)
            })
            .collect();

        let weapons: WeaponCounterSet = counters::WEAPONS
            .iter()
            .map(|weapon| {
                let now = current.weapons.get(*weapon).copied().unwrap_or(0);
                let delta = now.saturating_sub(baseline.weapon_kills(weapon));
                (weapon.to_string(), delta)
            })
            .collect();

        let fav_weapon = favorite_weapon(&weapons);
        let fav_map = if schema.tracks_maps() {
            favorite_map(&stats)
        } else {
            FavoriteMap::None
        };

        let kills = stats.get("kills").copied().unwrap_or(0);
        let deaths = stats.get("deaths").copied().unwrap_or(0);
        let headshots = stats.get("headshots").copied().unwrap_or(0);
        let shots_fired = stats.get("shots_fired").copied().unwrap_or(0);
        let shots_hit = stats.get("shots_hit").copied().unwrap_or(0);

        tracing::debug!(steam_id = %player.steam_id, ?stats, "Computed season delta");

        Self {
            player,
            stats,
            weapons,
            fav_weapon,
            fav_map,
            kda: kda(kills, deaths),
            hs_rate: percentage(headshots, kills),
            accuracy: percentage(shots_hit, shots_fired),
            score: 0.0,
        }
    }

    pub fn scored<S>(mut self, scoring: &S) -> Self
    where
        S: Scoring + ?Sized,
    {
        self.score = scoring.score(&self);
        self
    }

    pub fn stat(&self, key: &str) -> u64 {
        self.stats.get(key).copied().unwrap_or(0)
    }
}

/// Runs one fetched player through the baseline and the delta computation.
pub fn process<S>(
    store: &mut BaselineStore,
    player: PlayerIdentity,
    schema: CounterSchema,
    current: &Snapshot,
    scoring: &S,
) -> (SeasonDelta, BaselineChange)
where
    S: Scoring + ?Sized,
{
    let (baseline, change) = store.ensure_record(&player.steam_id, schema, current);
    let season = SeasonDelta::compute(player, schema, current, baseline).scored(scoring);

    (season, change)
}

/// The weapon with the most season kills. Ties keep the weapon listed first.
pub fn favorite_weapon(season_kills: &WeaponCounterSet) -> FavoriteWeapon {
    let mut favorite = FavoriteWeapon::None;
    let mut max_kills = 0;

    for weapon in counters::WEAPONS {
        let kills = season_kills.get(weapon).copied().unwrap_or(0);
        if kills > max_kills {
            max_kills = kills;
            favorite = FavoriteWeapon::Weapon {
                id: weapon.to_owned(),
                kills,
            };
        }
    }

    favorite
}

/// The map with the most season wins. Ties keep the map listed first.
pub fn favorite_map(season_stats: &CounterSet) -> FavoriteMap {
    let mut favorite = FavoriteMap::None;
    let mut max_wins = 0;

    for map in counters::MAPS {
        let wins = season_stats
            .get(&counters::map_win_key(map))
            .copied()
            .unwrap_or(0);
        if wins > max_wins {
            max_wins = wins;
            favorite = FavoriteMap::Map {
                id: map.to_owned(),
                wins,
            };
        }
    }

    favorite
}

/// Kills per death, or plain kills for a deathless season.
pub fn kda(kills: u64, deaths: u64) -> f64 {
    if deaths == 0 {
        return kills as f64;
    }

    round_to(kills as f64 / deaths as f64, 2)
}

/// `part / whole` in percent, rounded to one decimal. 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    round_to(part as f64 / whole as f64 * 100.0, 1)
}

/// Rounds to `decimals` places, exact halves going to the even neighbour.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
