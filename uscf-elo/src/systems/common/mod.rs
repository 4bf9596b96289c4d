mod player;

use crate::config::RatingConfig;
use crate::error::RatingError;
use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
pub use player::{PlayerId, PlayerProfile, PlayerRecord, RatingType, age_in_years, effective_games};

fn sixty() -> u32 {
    60
}

/// Date and time control of a rated event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    pub date: NaiveDate,
    #[serde(default = "sixty")]
    pub time_control_minutes: u32,
    #[serde(default)]
    pub time_control_increment_seconds: u32,
}

impl EventInfo {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            time_control_minutes: sixty(),
            time_control_increment_seconds: 0,
        }
    }

    /// Base minutes plus increment seconds, the quantity the K-factor schedule is keyed on.
    pub fn total_time_control(&self) -> u32 {
        self.time_control_minutes + self.time_control_increment_seconds
    }
}

/// The participants of one event, indexed by their position in the input.
#[derive(Clone, Debug)]
pub struct Roster {
    players: Vec<PlayerProfile>,
    index: HashMap<PlayerId, usize>,
}

impl Roster {
    pub fn new(
        records: impl IntoIterator<Item = PlayerRecord>,
        config: &RatingConfig,
    ) -> Result<Self, RatingError> {
        let mut players = vec![];
        let mut index = HashMap::new();
        for record in records {
            if index.insert(record.id.clone(), players.len()).is_some() {
                return Err(RatingError::DuplicatePlayer { player: record.id });
            }
            players.push(PlayerProfile::new(record, config)?);
        }
        Ok(Self { players, index })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, player: usize) -> &PlayerProfile {
        &self.players[player]
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayerProfile> {
        self.players.iter()
    }

    fn lookup(&self, id: &str) -> Result<usize, RatingError> {
        self.position(id).ok_or_else(|| RatingError::UnknownPlayer {
            player: id.to_owned(),
        })
    }
}

/// One game as reported by the organizer: the two participants and the winner, or
/// `None` for a draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub players: (PlayerId, PlayerId),
    pub winner: Option<PlayerId>,
}

impl MatchRecord {
    pub fn win(winner: impl Into<PlayerId>, loser: impl Into<PlayerId>) -> Self {
        let winner = winner.into();
        Self {
            players: (winner.clone(), loser.into()),
            winner: Some(winner),
        }
    }

    pub fn draw(a: impl Into<PlayerId>, b: impl Into<PlayerId>) -> Self {
        Self {
            players: (a.into(), b.into()),
            winner: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ResolvedMatch {
    players: (usize, usize),
    winner: Option<usize>,
}

impl ResolvedMatch {
    // (opponent, score) from the point of view of `player`, if they took part
    fn view(&self, player: usize) -> Option<(usize, f64)> {
        let opponent = match self.players {
            (a, b) if a == player => b,
            (a, b) if b == player => a,
            _ => return None,
        };
        let score = match self.winner {
            Some(winner) if winner == player => 1.,
            Some(_) => 0.,
            None => 0.5,
        };
        Some((opponent, score))
    }
}

/// The games of one event, checked against the roster.
#[derive(Clone, Debug)]
pub struct TournamentResultSet {
    matches: Vec<ResolvedMatch>,
}

impl TournamentResultSet {
    pub fn new(records: &[MatchRecord], roster: &Roster) -> Result<Self, RatingError> {
        let matches = records
            .iter()
            .map(|record| {
                let (a, b) = &record.players;
                if a == b {
                    return Err(RatingError::SelfPairing { player: a.clone() });
                }
                let players = (roster.lookup(a)?, roster.lookup(b)?);
                let winner = match &record.winner {
                    Some(w) if w == a => Some(players.0),
                    Some(w) if w == b => Some(players.1),
                    Some(w) => return Err(RatingError::UnknownWinner { winner: w.clone() }),
                    None => None,
                };
                Ok(ResolvedMatch { players, winner })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { matches })
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Game {
    pub opponent: usize,
    pub score: f64,
}

/// A single player's games in one event. Always recomputed, never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchStatistics {
    pub games: Vec<Game>,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub score: f64,
}

impl MatchStatistics {
    pub fn resolve(player: usize, results: &TournamentResultSet) -> Self {
        let mut stats = Self::default();
        for (opponent, score) in results.matches.iter().filter_map(|m| m.view(player)) {
            if score == 1. {
                stats.wins += 1;
            } else if score == 0.5 {
                stats.draws += 1;
            } else {
                stats.losses += 1;
            }
            stats.score += score;
            stats.games.push(Game { opponent, score });
        }
        stats
    }

    pub fn num_games(&self) -> u32 {
        self.games.len() as u32
    }

    pub fn opponents(&self) -> impl Iterator<Item = usize> + '_ {
        self.games.iter().map(|game| game.opponent)
    }

    pub fn max_games_against_one_opponent(&self) -> usize {
        self.opponents().counts().into_values().max().unwrap_or(0)
    }

    /// Blend of a newcomer's nominal rating with their performance in this event.
    pub fn estimated_rating(&self, initialized_rating: f64, roster: &Roster, absolute_floor: f64) -> f64 {
        let games = f64::from(self.num_games());
        let sum_opponents: f64 = self
            .opponents()
            .map(|opponent| roster.get(opponent).initialized_rating)
            .sum();
        let perf = initialized_rating + sum_opponents + 400. * (2. * self.score - games);
        absolute_floor.max(perf / (1. + games))
    }
}

/// A fully checked event, ready to be rated.
#[derive(Clone, Debug)]
pub struct Tournament {
    pub info: EventInfo,
    pub roster: Roster,
    pub results: TournamentResultSet,
}

impl Tournament {
    pub fn new(
        info: EventInfo,
        players: impl IntoIterator<Item = PlayerRecord>,
        matches: &[MatchRecord],
        config: &RatingConfig,
    ) -> Result<Self, RatingError> {
        let roster = Roster::new(players, config)?;
        let results = TournamentResultSet::new(matches, &roster)?;
        Ok(Self {
            info,
            roster,
            results,
        })
    }

    /// An individual match is an event between exactly two players.
    pub fn is_individual_match(&self) -> bool {
        self.roster.len() == 2
    }

    /// Pre-event rating of every player as used within this event: the initialized
    /// rating, except for players without any rated games, whose estimate also
    /// reflects this event's results.
    pub fn estimated_ratings(&self, config: &RatingConfig) -> Vec<f64> {
        self.roster
            .iter()
            .enumerate()
            .map(|(i, player)| {
                if player.record.games_played == 0 {
                    MatchStatistics::resolve(i, &self.results).estimated_rating(
                        player.initialized_rating,
                        &self.roster,
                        config.absolute_floor,
                    )
                } else {
                    player.initialized_rating
                }
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpponentRating {
    pub player: usize,
    pub initialized_rating: f64,
    pub estimated_rating: f64,
}

/// One player's participation in a tournament: who they are, the rating they
/// enter with and the games they played, with each game's opponent.
#[derive(Clone, Debug)]
pub struct PlayerTournament<'a> {
    pub profile: &'a PlayerProfile,
    /// Pre-event rating as used within this event.
    pub rating: f64,
    pub stats: MatchStatistics,
    pub opponents: Vec<OpponentRating>,
    pub tournament_number: u32,
}

impl<'a> PlayerTournament<'a> {
    pub fn new(player: usize, tournament: &'a Tournament, estimated_ratings: &[f64]) -> Self {
        let profile = tournament.roster.get(player);
        let stats = MatchStatistics::resolve(player, &tournament.results);
        let opponents = stats
            .opponents()
            .map(|opponent| OpponentRating {
                player: opponent,
                initialized_rating: tournament.roster.get(opponent).initialized_rating,
                estimated_rating: estimated_ratings[opponent],
            })
            .collect();
        Self {
            profile,
            rating: estimated_ratings[player],
            stats,
            opponents,
            tournament_number: profile.record.tournaments_played + 1,
        }
    }
}

/// A formula producing a player's unbounded post-event rating.
pub trait RatingFormula: std::fmt::Debug {
    fn rate(&self, event: &PlayerTournament) -> Result<f64, RatingError>;
}
