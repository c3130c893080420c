use std::collections::BTreeMap;

use analysis::baseline::{BaselineChange, BaselineRecord, BaselineStore};
use analysis::counters::{self, CounterSchema, RawStat, Snapshot};
use analysis::score::ScoreFormula;
use analysis::season::{self, FavoriteMap, FavoriteWeapon, PlayerIdentity, SeasonDelta};
use pretty_assertions::assert_eq;

fn snapshot(schema: CounterSchema, stats: &[(&str, u64)]) -> Snapshot {
    let raw: Vec<_> = stats.iter().map(|(n, v)| RawStat::new(*n, *v)).collect();
    Snapshot::extract(&raw, schema)
}

fn player() -> PlayerIdentity {
    PlayerIdentity::new("76561198000000001", "excel")
}

fn weapon_kills(kills: &[(&str, u64)]) -> BTreeMap<String, u64> {
    kills.iter().map(|(w, k)| (w.to_string(), *k)).collect()
}

#[test]
fn delta_against_baseline() {
    let baseline = BaselineRecord::from_snapshot(&snapshot(
        CounterSchema::V2,
        &[
            ("total_kills", 100),
            ("total_deaths", 80),
            ("total_kills_headshot", 40),
            ("total_rounds_played", 300),
        ],
    ));
    let current = snapshot(
        CounterSchema::V2,
        &[
            ("total_kills", 130),
            ("total_deaths", 90),
            ("total_kills_headshot", 52),
            ("total_rounds_played", 340),
            ("total_shots_fired", 400),
            ("total_shots_hit", 90),
        ],
    );

    let season = SeasonDelta::compute(player(), CounterSchema::V2, &current, &baseline);

    assert_eq!(30, season.stat("kills"));
    assert_eq!(10, season.stat("deaths"));
    assert_eq!(12, season.stat("headshots"));
    assert_eq!(40, season.stat("rounds"));
    assert_eq!(3.0, season.kda);
    assert_eq!(40.0, season.hs_rate);
    assert_eq!(22.5, season.accuracy);
    assert_eq!(0.0, season.score);
}

#[test]
fn negative_deltas_clamp_to_zero() {
    let baseline = BaselineRecord::from_snapshot(&snapshot(
        CounterSchema::V2,
        &[("total_kills", 500), ("total_deaths", 10), ("total_kills_awp", 90)],
    ));
    let current = snapshot(
        CounterSchema::V2,
        &[("total_kills", 20), ("total_deaths", 15), ("total_kills_awp", 3)],
    );

    let season = SeasonDelta::compute(player(), CounterSchema::V2, &current, &baseline);

    assert!(season.stats.values().all(|v| *v < u64::MAX / 2));
    assert_eq!(0, season.stat("kills"));
    assert_eq!(5, season.stat("deaths"));
    assert_eq!(Some(&0), season.weapons.get("awp"));
    assert_eq!(FavoriteWeapon::None, season.fav_weapon);
    assert_eq!(0.0, season.kda);
}

#[test]
fn favorite_weapon_prefers_most_kills() {
    let kills = weapon_kills(&[("glock", 3), ("ak47", 12), ("awp", 7)]);

    let favorite = season::favorite_weapon(&kills);

    assert_eq!(
        FavoriteWeapon::Weapon {
            id: "ak47".to_owned(),
            kills: 12
        },
        favorite
    );
    assert_eq!("AK47", favorite.label());
    assert_eq!(12, favorite.kills());
}

#[test]
fn favorite_weapon_tie_keeps_first_listed() {
    // awp comes before ak47 in the weapon list
    let kills = weapon_kills(&[("ak47", 8), ("awp", 8)]);

    assert_eq!(
        FavoriteWeapon::Weapon {
            id: "awp".to_owned(),
            kills: 8
        },
        season::favorite_weapon(&kills)
    );
}

#[test]
fn favorite_weapon_none_without_kills() {
    let kills = weapon_kills(&[("knife", 0), ("ak47", 0)]);

    let favorite = season::favorite_weapon(&kills);

    assert_eq!(FavoriteWeapon::None, favorite);
    assert_eq!("-", favorite.label());
    assert_eq!(0, favorite.kills());
    assert_eq!(FavoriteWeapon::None, season::favorite_weapon(&BTreeMap::new()));
}

#[test]
fn favorite_map() {
    let stats: BTreeMap<String, u64> = [
        (counters::map_win_key("de_dust2"), 2),
        (counters::map_win_key("inferno"), 5),
        (counters::map_win_key("anubis"), 5),
    ]
    .into_iter()
    .collect();

    let favorite = season::favorite_map(&stats);

    assert_eq!(
        FavoriteMap::Map {
            id: "inferno".to_owned(),
            wins: 5
        },
        favorite
    );
    assert_eq!("Inferno", favorite.label());
}

#[test]
fn favorite_map_labels() {
    let dust2 = FavoriteMap::Map {
        id: "de_dust2".to_owned(),
        wins: 1,
    };

    assert_eq!("Dust2", dust2.label());
    assert_eq!("-", FavoriteMap::None.label());
}

#[test]
fn favorite_map_requires_a_win() {
    let stats: BTreeMap<String, u64> = counters::MAPS
        .iter()
        .map(|m| (counters::map_win_key(m), 0))
        .collect();

    assert_eq!(FavoriteMap::None, season::favorite_map(&stats));
}

#[test]
fn v1_has_no_favorite_map() {
    let baseline = BaselineRecord::default();
    let current = snapshot(CounterSchema::V1, &[("total_wins_map_nuke", 4)]);

    let season = SeasonDelta::compute(player(), CounterSchema::V1, &current, &baseline);

    assert_eq!(FavoriteMap::None, season.fav_map);
}

#[test]
fn ratio_edge_cases() {
    assert_eq!(7.0, season::kda(7, 0));
    assert_eq!(0.0, season::kda(0, 0));
    assert_eq!(0.67, season::kda(2, 3));
    assert_eq!(1.33, season::kda(4, 3));
    // Halves go to the even neighbour
    assert_eq!(0.12, season::kda(1, 8));
    assert_eq!(0.38, season::kda(3, 8));

    assert_eq!(0.0, season::percentage(5, 0));
    assert_eq!(33.3, season::percentage(1, 3));
    assert_eq!(66.7, season::percentage(2, 3));
    assert_eq!(12.5, season::percentage(1, 8));
    assert_eq!(0.2, season::round_to(0.25, 1));
}

#[test]
fn process_is_idempotent() {
    let current = snapshot(
        CounterSchema::V2,
        &[
            ("total_kills", 40),
            ("total_rounds_played", 30),
            ("total_kills_m4a1", 11),
        ],
    );
    let mut store = BaselineStore::new();

    let (first, first_change) = season::process(
        &mut store,
        player(),
        CounterSchema::V2,
        &current,
        &ScoreFormula::AbsoluteVolume,
    );
    let records_after_first = store.records().clone();
    store.persist(|_| Ok::<_, ()>(())).unwrap();

    let (second, second_change) = season::process(
        &mut store,
        player(),
        CounterSchema::V2,
        &current,
        &ScoreFormula::AbsoluteVolume,
    );

    assert_eq!(BaselineChange::Created, first_change);
    assert_eq!(BaselineChange::Unchanged, second_change);
    assert_eq!(first, second);
    assert_eq!(&records_after_first, store.records());
    assert!(!store.is_dirty());
}

#[test]
fn backfilled_counter_starts_at_zero() {
    let mut store = BaselineStore::new();
    let v1 = snapshot(CounterSchema::V1, &[("total_kills", 10)]);
    season::process(&mut store, player(), CounterSchema::V1, &v1, &ScoreFormula::RateNormalized);

    let v2 = snapshot(
        CounterSchema::V2,
        &[
            ("total_kills", 25),
            ("total_defused_bombs", 6),
            ("total_money_earned", 120000),
        ],
    );
    let (season, change) = season::process(
        &mut store,
        player(),
        CounterSchema::V2,
        &v2,
        &ScoreFormula::RateNormalized,
    );

    assert!(matches!(change, BaselineChange::Patched(_)));
    assert_eq!(15, season.stat("kills"));
    assert_eq!(0, season.stat("bombs_defused"));
    assert_eq!(0, season.stat("money_earned"));
    assert_eq!(6, store.get(&player().steam_id).unwrap().stat("bombs_defused"));
}

#[test]
fn reset_season_is_all_zero() {
    let mut store = BaselineStore::new();
    let old = snapshot(CounterSchema::V2, &[("total_kills", 10), ("total_kills_awp", 2)]);
    season::process(&mut store, player(), CounterSchema::V2, &old, &ScoreFormula::RateNormalized);

    store.reset();

    let current = snapshot(
        CounterSchema::V2,
        &[
            ("total_kills", 900),
            ("total_rounds_played", 2000),
            ("total_kills_awp", 120),
            ("total_wins_map_mirage", 30),
        ],
    );
    let (season, change) = season::process(
        &mut store,
        player(),
        CounterSchema::V2,
        &current,
        &ScoreFormula::RateNormalized,
    );

    assert_eq!(BaselineChange::Created, change);
    assert!(season.stats.values().all(|v| *v == 0));
    assert!(season.weapons.values().all(|v| *v == 0));
    assert_eq!("-", season.fav_weapon.label());
    assert_eq!("-", season.fav_map.label());
    assert_eq!(0.0, season.score);
}
