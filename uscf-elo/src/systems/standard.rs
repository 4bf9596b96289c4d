use super::{PlayerTournament, RatingFormula};
use crate::error::RatingError;
use crate::numerical::standard_winning_expectancy;

/// The closed-form update for players with an ordinary, mixed record.
#[derive(Debug)]
pub struct StandardRating {
    pub total_time_control: u32,
    /// Individual matches are rated without the bonus.
    pub bonus: bool,
    pub bonus_threshold: f64,
}

impl StandardRating {
    pub fn k_factor(&self, rating: f64, effective_games: f64, games: u32) -> f64 {
        let denominator = effective_games + f64::from(games);
        // Strong players get a smaller K in events with a 30 to 65 minute time control
        if (30..=65).contains(&self.total_time_control) && rating > 2200. {
            if rating < 2500. {
                800. * (6.5 - 0.0025 * rating) / denominator
            } else {
                200. / denominator
            }
        } else {
            800. / denominator
        }
    }

    pub fn bonus_eligible(event: &PlayerTournament) -> bool {
        event.stats.num_games() >= 3 && event.stats.max_games_against_one_opponent() <= 2
    }
}

impl RatingFormula for StandardRating {
    fn rate(&self, event: &PlayerTournament) -> Result<f64, RatingError> {
        let games = event.stats.num_games();
        let expected: f64 = event
            .opponents
            .iter()
            .map(|o| standard_winning_expectancy(event.rating, o.initialized_rating))
            .sum();
        let k = self.k_factor(event.rating, event.profile.effective_games, games);
        let change = k * (event.stats.score - expected);
        let bonus = if self.bonus && Self::bonus_eligible(event) {
            let threshold = self.bonus_threshold * f64::from(games.max(4)).sqrt();
            (change - threshold).max(0.)
        } else {
            0.
        };
        Ok(event.rating + change + bonus)
    }
}
