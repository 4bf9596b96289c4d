//! The special rating formula, used for players with few games or a one-sided record.
//! Its equation is piecewise linear in the unknown rating, so instead of a generic
//! solver we walk the breakpoints and interpolate exactly within a linear segment.

use super::{PlayerTournament, RatingFormula, RatingType};
use crate::error::RatingError;
use crate::numerical::{PROVISIONAL_HALF_WIDTH, provisional_winning_expectancy, secant_root};
use superslice::Ext;

/// Working state for one player's special rating.
#[derive(Clone, Debug)]
pub struct SpecialRatingContext {
    pub base_rating: f64,
    pub effective_games: f64,
    pub score: f64,
    pub opponent_ratings: Vec<f64>,
    pub adjusted_rating: f64,
    pub adjusted_score: f64,
    /// Sorted and deduplicated points where the objective changes slope.
    pub breakpoints: Vec<f64>,
}

impl SpecialRatingContext {
    pub fn new(
        rating_type: RatingType,
        base_rating: f64,
        effective_games: f64,
        score: f64,
        opponent_ratings: Vec<f64>,
    ) -> Self {
        // A one-sided record is treated as having faced opponents 400 points away
        let (adjusted_rating, adjusted_score) = match rating_type {
            RatingType::SpecialOnlyWins => (base_rating - 400., score + effective_games),
            RatingType::SpecialOnlyLosses => (base_rating + 400., score),
            RatingType::SpecialNew | RatingType::Standard => {
                (base_rating, score + effective_games / 2.)
            }
        };
        let mut breakpoints: Vec<f64> = opponent_ratings
            .iter()
            .chain(std::iter::once(&adjusted_rating))
            .flat_map(|&r| [r - PROVISIONAL_HALF_WIDTH, r + PROVISIONAL_HALF_WIDTH])
            .collect();
        breakpoints.sort_by(f64::total_cmp);
        breakpoints.dedup();
        Self {
            base_rating,
            effective_games,
            score,
            opponent_ratings,
            adjusted_rating,
            adjusted_score,
            breakpoints,
        }
    }

    pub fn from_event(event: &PlayerTournament) -> Self {
        Self::new(
            event.profile.rating_type,
            event.rating,
            event.profile.effective_games,
            event.stats.score,
            event.opponents.iter().map(|o| o.estimated_rating).collect(),
        )
    }

    fn num_games(&self) -> f64 {
        self.opponent_ratings.len() as f64
    }

    /// Expected minus adjusted score at the candidate rating; nondecreasing in `rating`.
    pub fn objective(&self, rating: f64) -> f64 {
        let sum_pwe: f64 = self
            .opponent_ratings
            .iter()
            .map(|&foe| provisional_winning_expectancy(rating, foe))
            .sum();
        self.effective_games * provisional_winning_expectancy(rating, self.adjusted_rating)
            + sum_pwe
            - self.adjusted_score
    }

    pub fn initial_estimate(&self) -> f64 {
        let games = self.num_games();
        let sum_opponents: f64 = self.opponent_ratings.iter().sum();
        (self.effective_games * self.adjusted_rating
            + sum_opponents
            + 400. * (2. * self.score - games))
            / (self.effective_games + games)
    }

    /// Largest breakpoint strictly below `rating`.
    pub fn breakpoint_below(&self, rating: f64) -> Option<f64> {
        let idx = self.breakpoints.lower_bound_by(|z| z.total_cmp(&rating));
        idx.checked_sub(1).map(|i| self.breakpoints[i])
    }

    /// Smallest breakpoint strictly above `rating`.
    pub fn breakpoint_above(&self, rating: f64) -> Option<f64> {
        let idx = self.breakpoints.upper_bound_by(|z| z.total_cmp(&rating));
        self.breakpoints.get(idx).copied()
    }

    // Each step either lands on a breakpoint or interpolates within a linear segment,
    // so a walk longer than this means the objective is not behaving.
    fn max_steps(&self) -> usize {
        2 * self.breakpoints.len() + 4
    }

    /// Moves the estimate down while the objective is too high.
    pub fn descend(&self, mut m: f64, mut f_m: f64, epsilon: f64) -> Result<(f64, f64), RatingError> {
        for _ in 0..self.max_steps() {
            if f_m <= epsilon {
                return Ok((m, f_m));
            }
            let za = self
                .breakpoint_below(m)
                .ok_or(RatingError::Unbracketed { estimate: m })?;
            let f_za = self.objective(za);
            if (f_m - f_za).abs() < epsilon {
                (m, f_m) = (za, f_za);
                continue;
            }
            let m_star = secant_root((m, f_m), (za, f_za));
            if m_star < za {
                (m, f_m) = (za, f_za);
            } else if m_star < m {
                (m, f_m) = (m_star, self.objective(m_star));
            } else {
                return Ok((m, f_m));
            }
        }
        tracing::warn!("Special rating descent stopped early @ {}: f={}", m, f_m);
        Ok((m, f_m))
    }

    /// Moves the estimate up while the objective is too low.
    pub fn ascend(&self, mut m: f64, mut f_m: f64, epsilon: f64) -> Result<(f64, f64), RatingError> {
        for _ in 0..self.max_steps() {
            if f_m >= -epsilon {
                return Ok((m, f_m));
            }
            let zb = self
                .breakpoint_above(m)
                .ok_or(RatingError::Unbracketed { estimate: m })?;
            let f_zb = self.objective(zb);
            if (f_zb - f_m).abs() < epsilon {
                (m, f_m) = (zb, f_zb);
                continue;
            }
            let m_star = secant_root((m, f_m), (zb, f_zb));
            if m_star > zb {
                (m, f_m) = (zb, f_zb);
            } else if m_star > m {
                (m, f_m) = (m_star, self.objective(m_star));
            } else {
                return Ok((m, f_m));
            }
        }
        tracing::warn!("Special rating ascent stopped early @ {}: f={}", m, f_m);
        Ok((m, f_m))
    }

    /// A root far from every opponent only solves the equation because the objective
    /// is flat there; in that case fall back towards the player's own rating.
    pub fn isolate(&self, m: f64, f_m: f64, epsilon: f64) -> Result<f64, RatingError> {
        if f_m.abs() > epsilon {
            return Ok(m);
        }
        let near = |rating: f64| (m - rating).abs() <= PROVISIONAL_HALF_WIDTH;
        let p = self.opponent_ratings.iter().filter(|&&o| near(o)).count()
            + usize::from(near(self.adjusted_rating));
        if p > 0 {
            return Ok(m);
        }
        let unbracketed = RatingError::Unbracketed { estimate: m };
        let za = self.breakpoint_below(m).ok_or(unbracketed.clone())?;
        let zb = self.breakpoint_above(m).ok_or(unbracketed.clone())?;
        let r = self.base_rating;
        if za <= r && r <= zb {
            Ok(r)
        } else if r < za {
            Ok(za)
        } else if r > zb {
            Ok(zb)
        } else {
            Err(unbracketed)
        }
    }

    /// The root of the objective, before any cap is applied.
    pub fn solve(&self, epsilon: f64) -> Result<f64, RatingError> {
        let m = self.initial_estimate();
        let f_m = self.objective(m);
        let (m, f_m) = self.descend(m, f_m, epsilon)?;
        let (m, f_m) = self.ascend(m, f_m, epsilon)?;
        self.isolate(m, f_m, epsilon)
    }
}

#[derive(Debug)]
pub struct SpecialRating {
    pub epsilon: f64,
    pub cap: f64,
}

impl RatingFormula for SpecialRating {
    fn rate(&self, event: &PlayerTournament) -> Result<f64, RatingError> {
        let context = SpecialRatingContext::from_event(event);
        Ok(context.solve(self.epsilon)?.min(self.cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_matches;
    use quickcheck_macros::quickcheck;

    const EPS: f64 = 1e-7;

    fn sample() -> SpecialRatingContext {
        let opponents = vec![1300., 1250., 1200., 1200., 1250., 1300.];
        SpecialRatingContext::new(RatingType::SpecialNew, 1200., 10., 3., opponents)
    }

    #[test]
    fn adjusted_inputs_depend_on_rating_type() {
        let opponents = vec![1300., 1250., 1200.];
        for (rating_type, rating, score) in [
            (RatingType::SpecialNew, 1200., 8.),
            (RatingType::SpecialOnlyWins, 800., 13.),
            (RatingType::SpecialOnlyLosses, 1600., 3.),
        ] {
            let context = SpecialRatingContext::new(rating_type, 1200., 10., 3., opponents.clone());
            assert_eq!(context.adjusted_rating, rating);
            assert_eq!(context.adjusted_score, score);
        }
    }

    #[test]
    fn breakpoints_are_sorted_and_unique() {
        assert_eq!(
            sample().breakpoints,
            vec![800., 850., 900., 1600., 1650., 1700.]
        );
    }

    #[test]
    fn objective_and_first_estimate() {
        let context = sample();
        assert_eq!(context.objective(1200.), -0.375);
        assert_eq!(context.initial_estimate(), 1218.75);
    }

    #[test]
    fn breakpoint_neighbours_are_strict() {
        let context = sample();
        assert_eq!(context.breakpoint_below(850.), Some(800.));
        assert_eq!(context.breakpoint_above(850.), Some(900.));
        assert_eq!(context.breakpoint_below(1000.), Some(900.));
        assert_eq!(context.breakpoint_above(1000.), Some(1600.));
        assert_eq!(context.breakpoint_below(800.), None);
        assert_eq!(context.breakpoint_above(1700.), None);
    }

    #[test]
    fn first_estimate_can_already_be_the_root() {
        let solved = sample().solve(EPS).unwrap();
        assert!((solved - 1218.75).abs() < 1e-9);
    }

    #[test]
    fn descends_when_the_estimate_is_too_high() {
        let context =
            SpecialRatingContext::new(RatingType::SpecialNew, 1000., 3., 0.5, vec![1350., 2000., 1200.]);
        let m = context.initial_estimate();
        assert_eq!(m, 1125.);
        assert!((context.objective(m) - 0.59375).abs() < 1e-12);
        let (m, f_m) = context.descend(m, context.objective(m), EPS).unwrap();
        assert!((m - 1030.).abs() < 1e-9);
        assert!(f_m.abs() <= EPS);
        assert!((context.solve(EPS).unwrap() - 1030.).abs() < 1e-9);
    }

    #[test]
    fn ascends_when_the_estimate_is_too_low() {
        let context = SpecialRatingContext::new(
            RatingType::SpecialNew,
            1500.,
            5.,
            3.5,
            vec![1200., 1900., 1450., 1800.],
        );
        let m = context.initial_estimate();
        assert!(context.objective(m) < -EPS);
        assert!((context.solve(EPS).unwrap() - 1681.25).abs() < 1e-9);
    }

    #[test]
    fn flat_root_is_pulled_towards_own_rating() {
        // Two wins over much stronger players leave a plateau between 1400 and 1600
        let context =
            SpecialRatingContext::new(RatingType::SpecialNew, 1000., 4., 2., vec![2000., 2000.]);
        let m = context.initial_estimate();
        assert!(context.objective(m).abs() <= EPS);
        assert_eq!(context.solve(EPS).unwrap(), 1400.);
    }

    #[test]
    fn one_sided_histories() {
        let opponents = vec![1300., 1250., 1100.];
        let wins = SpecialRatingContext::new(RatingType::SpecialOnlyWins, 1200., 9., 1.5, opponents.clone());
        assert!((wins.solve(EPS).unwrap() - 1216.6666666666667).abs() < 1e-6);
        let losses = SpecialRatingContext::new(RatingType::SpecialOnlyLosses, 1200., 9., 0., opponents);
        assert!((losses.solve(EPS).unwrap() - 700.).abs() < 1e-6);
    }

    #[test]
    fn nan_rating_cannot_be_isolated() {
        let context =
            SpecialRatingContext::new(RatingType::SpecialNew, f64::NAN, 4., 2., vec![2000., 2000.]);
        assert_matches!(context.isolate(1500., 0., EPS), Err(RatingError::Unbracketed { .. }));
    }

    #[quickcheck]
    fn solution_zeroes_the_objective(games: Vec<(u8, u8)>, effective_games: u8, kind: u8) -> bool {
        if games.is_empty() {
            return true;
        }
        let rating_type = match kind % 3 {
            0 => RatingType::SpecialNew,
            1 => RatingType::SpecialOnlyWins,
            _ => RatingType::SpecialOnlyLosses,
        };
        let opponents: Vec<f64> = games.iter().map(|&(r, _)| 800. + 10. * f64::from(r)).collect();
        let score: f64 = games.iter().map(|&(_, o)| f64::from(o % 3) * 0.5).sum();
        let context = SpecialRatingContext::new(
            rating_type,
            1500.,
            f64::from(effective_games % 30),
            score,
            opponents,
        );
        match context.solve(EPS) {
            Ok(rating) => context.objective(rating).abs() <= 1e-6,
            Err(_) => false,
        }
    }
}
