/// The published leaderboard, replaced wholesale on every run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Leaderboard {
    pub meta: Meta,
    pub players: Vec<PlayerSeason>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Meta {
    pub last_updated: String,
    pub season_active: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerSeason {
    pub name: String,
    pub nickname: String,
    pub avatar: String,
    #[serde(flatten)]
    pub stats: CounterValues,
    pub weapons: CounterValues,
    pub fav_weapon: String,
    pub fav_weapon_kills: u64,
    pub fav_map: String,
    pub kda: f64,
    pub hs_rate: f64,
    pub accuracy: f64,
    pub score: f64,
}

/// One entry of the player roster, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RosterEntry {
    pub nickname: String,
    pub steamid: String,
}

/// Counter values that keep their insertion order when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterValues(Vec<(String, u64)>);

impl CounterValues {
    pub fn get(&self, key: &str) -> Option<&u64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &u64> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sets `key`, keeping its position if it already exists.
    pub fn insert(&mut self, key: String, value: u64) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }
}

impl FromIterator<(String, u64)> for CounterValues {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut values = Self::default();
        for (key, value) in iter {
            values.insert(key, value);
        }
        values
    }
}

impl serde::Serialize for CounterValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for CounterValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CounterValuesVisitor;

        impl<'de> serde::de::Visitor<'de> for CounterValuesVisitor {
            type Value = CounterValues;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "a map of counter values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut values = CounterValues::default();
                while let Some((key, value)) = map.next_entry::<String, u64>()? {
                    values.insert(key, value);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(CounterValuesVisitor)
    }
}
