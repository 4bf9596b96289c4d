mod common;
mod floor;
mod special;
mod standard;
mod uscf;
mod validity;

pub use common::{
    EventInfo, Game, MatchRecord, MatchStatistics, OpponentRating, PlayerId, PlayerProfile,
    PlayerRecord, PlayerTournament, RatingFormula, RatingType, Roster, Tournament,
    TournamentResultSet, age_in_years, effective_games,
};
pub use floor::{FLOOR_EVENT_GAMES, floor_events_after, rating_floor};
pub use special::{SpecialRating, SpecialRatingContext};
pub use standard::StandardRating;
pub use uscf::{RatedResult, UscfSystem};
pub use validity::{Unratable, check_validity, is_valid};
