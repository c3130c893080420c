//! Named counters as reported by the stats source, and the extraction of a
//! flat [`Snapshot`] out of the raw `(name, value)` list.

use std::collections::BTreeMap;

/// Counter key to cumulative value.
pub type CounterSet = BTreeMap<String, u64>;

/// Weapon identifier to cumulative kill count.
pub type WeaponCounterSet = BTreeMap<String, u64>;

/// Counters present since the first schema. Key to source field name.
pub static CORE_COUNTERS: phf::OrderedMap<&'static str, &'static str> = phf::phf_ordered_map! {
    "kills" => "total_kills",
    "deaths" => "total_deaths",
    "wins" => "total_matches_won",
    "mvps" => "total_mvps",
    "damage" => "total_damage_done",
    "headshots" => "total_kills_headshot",
    "shots_fired" => "total_shots_fired",
    "shots_hit" => "total_shots_hit",
    "rounds" => "total_rounds_played",
};

/// Counters added with [`CounterSchema::V2`].
pub static EXTENDED_COUNTERS: phf::OrderedMap<&'static str, &'static str> = phf::phf_ordered_map! {
    "bombs_planted" => "total_planted_bombs",
    "bombs_defused" => "total_defused_bombs",
    "knife_kills" => "total_kills_knife",
    "blind_kills" => "total_kills_enemy_blinded",
    "money_earned" => "total_money_earned",
    "broken_windows" => "total_broken_windows",
};

/// Weapon identifiers in the order used for favorite selection.
pub const WEAPONS: [&str; 33] = [
    "knife",
    "hegrenade",
    "glock",
    "deagle",
    "elite",
    "fiveseven",
    "xm1014",
    "mac10",
    "ump45",
    "p90",
    "awp",
    "ak47",
    "aug",
    "famas",
    "g3sg1",
    "m249",
    "hkp2000",
    "p250",
    "sg556",
    "scar20",
    "ssg08",
    "mp7",
    "mp9",
    "nova",
    "negev",
    "sawedoff",
    "bizon",
    "tec9",
    "mag7",
    "m4a1",
    "galilar",
    "molotov",
    "taser",
];

/// Maps tracked by a per-map win counter, in the order used for favorite selection.
pub const MAPS: [&str; 8] = [
    "de_dust2", "mirage", "inferno", "nuke", "vertigo", "ancient", "anubis", "overpass",
];

const MAP_WIN_PREFIX: &str = "wins_";

/// Counter key holding the season wins on `map`.
pub fn map_win_key(map: &str) -> String {
    format!("{}{}", MAP_WIN_PREFIX, map)
}

pub fn is_map_win_key(key: &str) -> bool {
    key.starts_with(MAP_WIN_PREFIX)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?}, expected one of {expected}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// The set of counters a run tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterSchema {
    V1,
    #[default]
    V2,
}

impl CounterSchema {
    /// Every counter key of this schema, in declaration order.
    pub fn counter_keys(&self) -> Vec<String> {
        self.counter_fields().into_iter().map(|(key, _)| key).collect()
    }

    pub fn tracks_maps(&self) -> bool {
        matches!(self, Self::V2)
    }

    fn counter_fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = CORE_COUNTERS
            .entries()
            .map(|(key, field)| (key.to_string(), field.to_string()))
            .collect();

        if let Self::V2 = self {
            fields.extend(
                EXTENDED_COUNTERS
                    .entries()
                    .map(|(key, field)| (key.to_string(), field.to_string())),
            );
            fields.extend(
                MAPS.iter()
                    .map(|map| (map_win_key(map), format!("total_wins_map_{}", map))),
            );
        }

        fields
    }
}

impl std::fmt::Display for CounterSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

impl std::str::FromStr for CounterSchema {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            _ => Err(ParseError {
                kind: "counter schema",
                value: s.to_owned(),
                expected: "v1, v2",
            }),
        }
    }
}

/// A single entry of the source's unordered stat list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawStat {
    pub name: String,
    /// Values that are not a non-negative count read as 0.
    #[serde(default, deserialize_with = "lenient_count")]
    pub value: u64,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct CountVisitor;

    impl<'de> serde::de::Visitor<'de> for CountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "a counter value")
        }

        fn visit_u64<E>(self, v: u64) -> Result<u64, E>
        where
            E: serde::de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<u64, E>
        where
            E: serde::de::Error,
        {
            Ok(u64::try_from(v).unwrap_or(0))
        }

        fn visit_f64<E>(self, v: f64) -> Result<u64, E>
        where
            E: serde::de::Error,
        {
            if v.is_finite() && v >= 0.0 {
                Ok(v as u64)
            } else {
                Ok(0)
            }
        }

        fn visit_str<E>(self, v: &str) -> Result<u64, E>
        where
            E: serde::de::Error,
        {
            Ok(v.trim().parse().unwrap_or(0))
        }

        fn visit_bool<E>(self, _: bool) -> Result<u64, E>
        where
            E: serde::de::Error,
        {
            Ok(0)
        }

        fn visit_unit<E>(self) -> Result<u64, E>
        where
            E: serde::de::Error,
        {
            Ok(0)
        }

        fn visit_none<E>(self) -> Result<u64, E>
        where
            E: serde::de::Error,
        {
            Ok(0)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<u64, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<u64, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
            Ok(0)
        }

        fn visit_map<A>(self, mut map: A) -> Result<u64, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            while map
                .next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?
                .is_some()
            {}
            Ok(0)
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

impl RawStat {
    pub fn new<S>(name: S, value: u64) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Looks up `name`, treating an absent stat as 0.
pub fn stat_value(stats: &[RawStat], name: &str) -> u64 {
    stats
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.value)
        .unwrap_or(0)
}

/// Cumulative values of one player at the time of the fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub counters: CounterSet,
    pub weapons: WeaponCounterSet,
}

impl Snapshot {
    pub fn extract(stats: &[RawStat], schema: CounterSchema) -> Self {
        let counters = schema
            .counter_fields()
            .into_iter()
            .map(|(key, field)| {
                let value = stat_value(stats, &field);
                (key, value)
            })
            .collect();

        let weapons = WEAPONS
            .iter()
            .map(|weapon| {
                let value = stat_value(stats, &format!("total_kills_{}", weapon));
                (weapon.to_string(), value)
            })
            .collect();

        Self { counters, weapons }
    }
}
