use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://api.steampowered.com";

/// Counter-Strike 2 keeps the app id of CS:GO.
pub const CS2_APP_ID: &str = "730";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("sending request: {0}")]
    Http(reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("response contains no stats")]
    MissingStats,
}

/// The request url carries the api key, so it is dropped from the error.
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}

pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Response<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct UserStatsResponse {
    playerstats: Option<PlayerStats>,
}

#[derive(Debug, Deserialize)]
struct PlayerStats {
    stats: Option<Vec<analysis::counters::RawStat>>,
}

#[derive(Debug, Deserialize)]
struct ProfileInfoResponse {
    #[serde(default)]
    players: Vec<ProfileInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileInfo {
    pub steamid: String,
    pub personaname: String,
    #[serde(default)]
    pub avatarfull: String,
}

impl Client {
    pub fn new<IS, BS>(api_key: IS, base_url: BS, timeout: std::time::Duration) -> Result<Self, ApiError>
    where
        IS: Into<String>,
        BS: Into<String>,
    {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Fetches a JSON document from `path`, relative to the configured base url.
    pub async fn get_raw<T>(&self, path: &str, args: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let response = self
            .http
            .get(url)
            .query(&[("key", &self.api_key)])
            .query(args)
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), path, "Request failed");
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json::<T>().await?)
    }

    /// Like [`Client::get_raw`] for endpoints wrapping their payload in `response`.
    pub async fn get<T>(&self, path: &str, args: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.get_raw::<Response<T>>(path, args)
            .await
            .map(|r| r.response)
    }

    /// Lifetime game stats of one player.
    #[tracing::instrument(skip(self))]
    pub async fn user_stats(&self, steam_id: &str) -> Result<Vec<analysis::counters::RawStat>, ApiError> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
            .to_string();

        let response: UserStatsResponse = self
            .get_raw(
                "ISteamUserStats/GetUserStatsForGame/v0002/",
                &[
                    ("appid", CS2_APP_ID),
                    ("steamid", steam_id),
                    ("_", timestamp.as_str()),
                ],
            )
            .await?;

        response
            .playerstats
            .and_then(|p| p.stats)
            .ok_or(ApiError::MissingStats)
    }

    /// Profile names and avatars, in a single request for all ids.
    #[tracing::instrument(skip(self, steam_ids), fields(count = steam_ids.len()))]
    pub async fn player_summaries(&self, steam_ids: &[&str]) -> Result<Vec<ProfileInfo>, ApiError> {
        if steam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = steam_ids.join(",");
        let response: ProfileInfoResponse = self
            .get("ISteamUser/GetPlayerSummaries/v2/", &[("steamids", ids.as_str())])
            .await?;

        Ok(response.players)
    }
}
