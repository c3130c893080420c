//! JSON files read and written by a run: the roster, the baseline and the
//! published leaderboard.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use analysis::baseline::{BaselineRecord, BaselineStore};

use crate::error::StorageError;

pub struct FileStorage {
    players: PathBuf,
    baseline: PathBuf,
    output: PathBuf,
}

impl FileStorage {
    pub fn new<P, B, O>(players: P, baseline: B, output: O) -> Self
    where
        P: Into<PathBuf>,
        B: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        Self {
            players: players.into(),
            baseline: baseline.into(),
            output: output.into(),
        }
    }

    pub fn players_path(&self) -> &Path {
        &self.players
    }

    pub fn baseline_path(&self) -> &Path {
        &self.baseline
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// The roster in file order. `Ok(None)` when the file does not exist.
    pub fn load_roster(&self) -> Result<Option<Vec<common::RosterEntry>>, StorageError> {
        let roster: serde_json::Map<String, serde_json::Value> = match read_json(&self.players)? {
            Some(r) => r,
            None => return Ok(None),
        };

        roster
            .into_iter()
            .map(|(nickname, id)| {
                let steamid = match id {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    other => {
                        return Err(StorageError::InvalidRoster {
                            path: self.players.clone(),
                            reason: format!("steam id of {:?} is not a string: {}", nickname, other),
                        })
                    }
                };

                Ok(common::RosterEntry { nickname, steamid })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// A missing baseline file is a cold start and yields an empty store.
    pub fn load_baseline(&self) -> Result<BaselineStore, StorageError> {
        let records: Option<BTreeMap<String, BaselineRecord>> = read_json(&self.baseline)?;

        match records {
            Some(records) => {
                tracing::info!(records = records.len(), "Loaded baseline");
                Ok(BaselineStore::from_records(records))
            }
            None => {
                tracing::info!(path = %self.baseline.display(), "No baseline yet, starting empty");
                Ok(BaselineStore::new())
            }
        }
    }

    pub fn save_baseline(&self, records: &BTreeMap<String, BaselineRecord>) -> Result<(), StorageError> {
        write_json(&self.baseline, records)?;
        tracing::info!(path = %self.baseline.display(), "Baseline updated");
        Ok(())
    }

    pub fn load_leaderboard(&self) -> Result<Option<common::Leaderboard>, StorageError> {
        read_json(&self.output)
    }

    pub fn save_leaderboard(&self, leaderboard: &common::Leaderboard) -> Result<(), StorageError> {
        write_json(&self.output, leaderboard)?;
        tracing::info!(path = %self.output.display(), players = leaderboard.players.len(), "Leaderboard written");
        Ok(())
    }
}

fn read_json<T>(path: &Path) -> Result<Option<T>, StorageError>
where
    T: serde::de::DeserializeOwned,
{
    let content = match std::fs::read(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StorageError::Io {
                path: path.to_owned(),
                source: e,
            })
        }
    };

    serde_json::from_slice(&content)
        .map(Some)
        .map_err(|e| StorageError::Json {
            path: path.to_owned(),
            source: e,
        })
}

/// Writes next to `path` first and renames into place, so readers never see a
/// partially written file.
fn write_json<T>(path: &Path, value: &T) -> Result<(), StorageError>
where
    T: serde::Serialize,
{
    let io_err = |e| StorageError::Io {
        path: path.to_owned(),
        source: e,
    };

    let mut content = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut content, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| StorageError::Json {
            path: path.to_owned(),
            source: e,
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    std::fs::write(&tmp_path, &content).map_err(io_err)?;
    std::fs::rename(&tmp_path, path).map_err(io_err)?;

    Ok(())
}
