use super::PlayerTournament;
use crate::config::RatingConfig;

/// Events with at least this many games count towards the floor.
pub const FLOOR_EVENT_GAMES: u32 = 3;

/// The player's count of floor-qualifying events, including this one.
pub fn floor_events_after(event: &PlayerTournament) -> u32 {
    let prior = event.profile.record.floor_events;
    if event.stats.num_games() >= FLOOR_EVENT_GAMES {
        prior + 1
    } else {
        prior
    }
}

/// The lowest rating the player can leave this event with.
pub fn rating_floor(event: &PlayerTournament, config: &RatingConfig) -> f64 {
    if event.rating >= 1200. && event.profile.established {
        // Two hundred below the player's rating, rounded down to a multiple of a hundred
        let floor = ((event.rating - 200.) / 100.).floor() * 100.;
        return floor.min(config.max_established_floor);
    }
    let wins = event.profile.record.wins + event.stats.wins;
    let draws = event.profile.draws() + event.stats.draws;
    let earned = f64::from(4 * wins + 2 * draws + floor_events_after(event));
    (config.absolute_floor + earned).min(config.newcomer_floor_cap)
}
