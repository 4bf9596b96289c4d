use crate::config::RatingConfig;
use crate::error::{DataError, RatingError};
use crate::systems::{EventInfo, MatchRecord, PlayerRecord, Tournament};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn sixty() -> u32 {
    60
}

/// Represents one event as submitted for rating.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentFile {
    /// A human-readable title for the event.
    #[serde(default)]
    pub name: String,
    pub date: NaiveDate,
    #[serde(default = "sixty")]
    pub time_control_minutes: u32,
    #[serde(default)]
    pub time_control_increment_seconds: u32,
    /// Each player's cumulative record before the event.
    pub players: Vec<PlayerRecord>,
    /// The games, each with two players and the winner or `null` for a draw.
    pub results: Vec<MatchRecord>,
}

impl TournamentFile {
    /// Players without a reference date are aged as of the event.
    pub fn from_file(source: impl AsRef<Path>) -> Result<Self, DataError> {
        let source = source.as_ref();
        let contents = std::fs::read_to_string(source)?;
        let mut tournament: Self = json5::from_str(&contents)?;
        for player in &mut tournament.players {
            player.reference_date.get_or_insert(tournament.date);
        }
        tracing::info!(
            "Read {:?}: {} players and {} games",
            source,
            tournament.players.len(),
            tournament.results.len()
        );
        Ok(tournament)
    }

    pub fn info(&self) -> EventInfo {
        EventInfo {
            date: self.date,
            time_control_minutes: self.time_control_minutes,
            time_control_increment_seconds: self.time_control_increment_seconds,
        }
    }

    pub fn into_tournament(self, config: &RatingConfig) -> Result<Tournament, RatingError> {
        Tournament::new(self.info(), self.players, &self.results, config)
    }
}

fn write_to_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), DataError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn write_to_csv<T: Serialize>(values: &[T], path: &Path) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path)?;
    values.iter().try_for_each(|val| writer.serialize(val))?;
    writer.flush()?;
    Ok(())
}

/// Writes the values as JSON or CSV, depending on the file extension.
pub fn write_slice_to_file<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> Result<(), DataError> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => write_to_json(values, path)?,
        Some("csv") => write_to_csv(values, path)?,
        _ => return Err(DataError::Extension(path.to_path_buf())),
    };
    tracing::info!("Successfully wrote to {:?}", path);
    Ok(())
}
