use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Policy constants of the USCF rating procedure. The defaults are those of the
/// published system; a JSON5 file only needs to list the ones it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Tolerance on the special rating objective.
    pub epsilon: f64,
    /// No rating ever drops below this.
    pub absolute_floor: f64,
    /// Upper limit of the floor earned from wins, draws and completed events.
    pub newcomer_floor_cap: f64,
    /// The constant B in the bonus threshold B * sqrt(max(games, 4)).
    pub bonus_threshold: f64,
    /// Special ratings are capped here.
    pub special_rating_cap: f64,
    /// Largest rating change allowed in an individual match.
    pub match_max_change: f64,
    /// Largest rating gap for which an individual match is rated.
    pub match_max_gap: f64,
    /// A rating is established once more than this many games have been played.
    pub established_games: u32,
    /// Players with at most this many games get the special rating formula.
    pub special_new_games: u32,
    /// Rating given to unrated players whose age is unknown.
    pub adult_rating: f64,
    /// Highest floor an established player can earn.
    pub max_established_floor: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-7,
            absolute_floor: 100.,
            newcomer_floor_cap: 150.,
            bonus_threshold: 14.,
            special_rating_cap: 2700.,
            match_max_change: 50.,
            match_max_gap: 400.,
            established_games: 25,
            special_new_games: 8,
            adult_rating: 1300.,
            max_established_floor: 2500.,
        }
    }
}

impl RatingConfig {
    pub fn from_file(source: impl AsRef<Path>) -> Result<Self, DataError> {
        // json5 tolerates comments and trailing commas in hand-edited configs
        let params_json = std::fs::read_to_string(source)?;
        Ok(json5::from_str(&params_json)?)
    }
}
