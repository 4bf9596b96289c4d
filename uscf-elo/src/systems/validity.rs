use super::{PlayerProfile, Roster};
use crate::config::RatingConfig;

/// Why an event does not count for ratings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unratable {
    TooFewPlayers,
    /// Individual matches need two established players.
    NotEstablished,
    /// Individual matches need players within `match_max_gap` of each other.
    RatingGap,
}

/// Decides whether an event is rated at all. Events with three or more players always
/// are; a two-player event is an individual match with stricter requirements.
pub fn check_validity(roster: &Roster, config: &RatingConfig) -> Result<(), Unratable> {
    match roster.len() {
        0 | 1 => Err(Unratable::TooFewPlayers),
        2 => check_individual_match(roster.get(0), roster.get(1), config),
        _ => Ok(()),
    }
}

pub fn is_valid(roster: &Roster, config: &RatingConfig) -> bool {
    check_validity(roster, config).is_ok()
}

fn check_individual_match(
    first: &PlayerProfile,
    second: &PlayerProfile,
    config: &RatingConfig,
) -> Result<(), Unratable> {
    if !first.established || !second.established {
        Err(Unratable::NotEstablished)
    } else if (first.initialized_rating - second.initialized_rating).abs() > config.match_max_gap {
        Err(Unratable::RatingGap)
    } else {
        Ok(())
    }
}
