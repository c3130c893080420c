use crate::counters::{self, CounterSchema};
use crate::season::SeasonDelta;

/// Orders by score, highest first. Equal scores keep their processing order.
pub fn rank(mut players: Vec<SeasonDelta>) -> Vec<SeasonDelta> {
    players.sort_by(|a, b| b.score.total_cmp(&a.score));
    players
}

/// Ranks `players` and wraps them into the published leaderboard.
pub fn assemble(
    players: Vec<SeasonDelta>,
    last_updated: String,
    season_active: bool,
) -> common::Leaderboard {
    let players = rank(players)
        .into_iter()
        .map(into_player_season)
        .collect();

    common::Leaderboard {
        meta: common::Meta {
            last_updated,
            season_active,
        },
        players,
    }
}

/// Counters and weapons are published in declaration order, per-map wins
/// only feed the favorite map.
fn into_player_season(season: SeasonDelta) -> common::PlayerSeason {
    let stats = CounterSchema::V2
        .counter_keys()
        .into_iter()
        .filter(|key| !counters::is_map_win_key(key))
        .filter_map(|key| {
            let value = season.stats.get(&key).copied()?;
            Some((key, value))
        })
        .collect();
    let weapons = counters::WEAPONS
        .iter()
        .map(|weapon| (weapon.to_string(), season.weapons.get(*weapon).copied().unwrap_or(0)))
        .collect();

    common::PlayerSeason {
        name: season.player.name,
        nickname: season.player.nickname,
        avatar: season.player.avatar,
        stats,
        weapons,
        fav_weapon: season.fav_weapon.label(),
        fav_weapon_kills: season.fav_weapon.kills(),
        fav_map: season.fav_map.label(),
        kda: season.kda,
        hs_rate: season.hs_rate,
        accuracy: season.accuracy,
        score: season.score,
    }
}
