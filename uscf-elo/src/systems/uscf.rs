//! USCF system details: http://www.glicko.net/ratings/rating.system.pdf

use super::floor::{floor_events_after, rating_floor};
use super::special::SpecialRating;
use super::standard::StandardRating;
use super::validity::check_validity;
use super::{
    EventInfo, MatchRecord, PlayerId, PlayerRecord, PlayerTournament, RatingFormula, RatingType,
    Tournament,
};
use crate::config::RatingConfig;
use crate::error::RatingError;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A player's outcome of one rated event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatedResult {
    pub player_id: PlayerId,
    pub tournament_date: NaiveDate,
    pub tournament_number: u32,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub rating: f64,
    pub rating_type: RatingType,
    pub floor_events: u32,
}

impl RatedResult {
    /// The player's cumulative record after this event, for the caller to store.
    pub fn updated_record(&self, previous: &PlayerRecord) -> PlayerRecord {
        let rating = if self.games == 0 {
            previous.rating
        } else {
            Some(self.rating)
        };
        PlayerRecord {
            id: previous.id.clone(),
            rating,
            games_played: previous.games_played + self.games,
            wins: previous.wins + self.wins,
            losses: previous.losses + self.losses,
            tournaments_played: self.tournament_number,
            birth_date: previous.birth_date,
            reference_date: previous.reference_date,
            floor_events: self.floor_events,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UscfSystem {
    pub config: RatingConfig,
}

impl UscfSystem {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }

    pub fn tournament(
        &self,
        info: EventInfo,
        players: impl IntoIterator<Item = PlayerRecord>,
        matches: &[MatchRecord],
    ) -> Result<Tournament, RatingError> {
        Tournament::new(info, players, matches, &self.config)
    }

    /// Rates every player of the event against the pre-event ratings of their
    /// opponents. Returns `Ok(None)` if the event does not count for ratings.
    pub fn rate_tournament(
        &self,
        tournament: &Tournament,
    ) -> Result<Option<Vec<RatedResult>>, RatingError> {
        if let Err(reason) = check_validity(&tournament.roster, &self.config) {
            tracing::warn!(
                "Ignoring tournament of {} because it is unratable: {:?}",
                tournament.info.date,
                reason
            );
            return Ok(None);
        }

        let individual_match = tournament.is_individual_match();
        let standard = StandardRating {
            total_time_control: tournament.info.total_time_control(),
            bonus: !individual_match,
            bonus_threshold: self.config.bonus_threshold,
        };
        let special = SpecialRating {
            epsilon: self.config.epsilon,
            cap: self.config.special_rating_cap,
        };
        let estimated_ratings = tournament.estimated_ratings(&self.config);

        // The roster is never modified here, so players can be rated independently
        let results = (0..tournament.roster.len())
            .into_par_iter()
            .map(|player| {
                let event = PlayerTournament::new(player, tournament, &estimated_ratings);
                let formula: &dyn RatingFormula =
                    if individual_match || event.profile.rating_type == RatingType::Standard {
                        &standard
                    } else {
                        &special
                    };
                let rating = self.bounded_rating(&event, formula, individual_match)?;
                Ok(RatedResult {
                    player_id: event.profile.record.id.clone(),
                    tournament_date: tournament.info.date,
                    tournament_number: event.tournament_number,
                    games: event.stats.num_games(),
                    wins: event.stats.wins,
                    draws: event.stats.draws,
                    losses: event.stats.losses,
                    rating,
                    rating_type: event.profile.rating_type,
                    floor_events: floor_events_after(&event),
                })
            })
            .collect::<Result<Vec<_>, RatingError>>()?;
        tracing::info!(
            "Rated {} players in the tournament of {}",
            results.len(),
            tournament.info.date
        );
        Ok(Some(results))
    }

    fn bounded_rating(
        &self,
        event: &PlayerTournament,
        formula: &dyn RatingFormula,
        individual_match: bool,
    ) -> Result<f64, RatingError> {
        if event.stats.games.is_empty() {
            return Ok(event.rating);
        }
        let raw = formula.rate(event)?;
        let bounded = if individual_match {
            let max_change = self.config.match_max_change;
            raw.clamp(event.rating - max_change, event.rating + max_change)
        } else {
            raw.max(rating_floor(event, &self.config))
        };
        tracing::debug!(
            "{} ({:?}, {:?}): {} -> {} bounded to {}",
            event.profile.id(),
            event.profile.rating_type,
            formula,
            event.rating,
            raw,
            bounded
        );
        Ok(bounded)
    }
}
