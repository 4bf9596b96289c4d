use crate::config::RatingConfig;
use crate::error::RatingError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type PlayerId = String;

/// A player's cumulative history as supplied by the caller before an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    /// `None` for players who have never been rated.
    pub rating: Option<f64>,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub tournaments_played: u32,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    /// Number of prior events in which the player completed at least three games.
    #[serde(default)]
    pub floor_events: u32,
}

impl PlayerRecord {
    pub fn new(id: impl Into<PlayerId>, rating: Option<f64>, games: u32, wins: u32, losses: u32) -> Self {
        Self {
            id: id.into(),
            rating,
            games_played: games,
            wins,
            losses,
            tournaments_played: 0,
            birth_date: None,
            reference_date: None,
            floor_events: 0,
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate, reference_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self.reference_date = Some(reference_date);
        self
    }
}

/// Which rating formula applies to a player, in order of precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingType {
    SpecialNew,
    SpecialOnlyWins,
    SpecialOnlyLosses,
    Standard,
}

impl RatingType {
    pub fn is_special(self) -> bool {
        self != RatingType::Standard
    }
}

/// A `PlayerRecord` together with the classification derived from it.
#[derive(Clone, Debug)]
pub struct PlayerProfile {
    pub record: PlayerRecord,
    pub initialized_rating: f64,
    pub established: bool,
    pub effective_games: f64,
    pub rating_type: RatingType,
}

impl PlayerProfile {
    pub fn new(record: PlayerRecord, config: &RatingConfig) -> Result<Self, RatingError> {
        if record.wins + record.losses > record.games_played {
            return Err(RatingError::InconsistentRecord {
                player: record.id,
                games: record.games_played,
                wins: record.wins,
                losses: record.losses,
            });
        }
        let initialized_rating = match record.rating {
            Some(rating) => rating,
            None => age_based_rating(record.birth_date, record.reference_date, config),
        };
        let established = record.games_played > config.established_games;
        let effective_games = effective_games(initialized_rating, record.games_played);
        let rating_type = if record.games_played <= config.special_new_games {
            RatingType::SpecialNew
        } else if record.wins == record.games_played {
            RatingType::SpecialOnlyWins
        } else if record.losses == record.games_played {
            RatingType::SpecialOnlyLosses
        } else {
            RatingType::Standard
        };
        Ok(Self {
            record,
            initialized_rating,
            established,
            effective_games,
            rating_type,
        })
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn draws(&self) -> u32 {
        self.record.games_played - self.record.wins - self.record.losses
    }
}

/// Age in years, or `None` when either date is missing.
pub fn age_in_years(birth_date: Option<NaiveDate>, reference_date: Option<NaiveDate>) -> Option<f64> {
    let days = (reference_date? - birth_date?).num_days();
    Some(days as f64 / 365.25)
}

// Unrated players of unknown age are assumed to be adults.
fn age_based_rating(
    birth_date: Option<NaiveDate>,
    reference_date: Option<NaiveDate>,
    config: &RatingConfig,
) -> f64 {
    match age_in_years(birth_date, reference_date) {
        Some(age) if age < 2. => 100.,
        Some(age) if age <= 26. => 50. * age,
        _ => config.adult_rating,
    }
}

/// The reliability of a rating, expressed as a number of games.
pub fn effective_games(initialized_rating: f64, games_played: u32) -> f64 {
    let n = if initialized_rating <= 2355. {
        let gap = 2569. - initialized_rating;
        50. / (0.662 + 0.00000739 * gap * gap).sqrt()
    } else {
        50.
    };
    n.min(f64::from(games_played))
}
