use crate::systems::{PlayerId, RatedResult, RatingType, Tournament};
use serde::{Deserialize, Serialize};

const RATING_TYPES: [RatingType; 4] = [
    RatingType::SpecialNew,
    RatingType::SpecialOnlyWins,
    RatingType::SpecialOnlyLosses,
    RatingType::Standard,
];

pub struct TournamentSummary {
    /// Mean change among previously rated players who played a game.
    pub mean_change: Option<f64>,
    pub type_count: Vec<(RatingType, usize)>,
    pub unrated_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub rank: usize,
    pub player_id: PlayerId,
    pub previous_rating: Option<f64>,
    pub rating: i32,
    /// Unset for players without a prior rating.
    pub change: Option<i32>,
    pub rating_type: RatingType,
    pub games: u32,
    pub score: f64,
}

/// Pairs each result with the player's rating before the event, sorted from highest to lowest.
pub fn make_standings(
    tournament: &Tournament,
    results: &[RatedResult],
) -> (TournamentSummary, Vec<PlayerSummary>) {
    let mut standings: Vec<PlayerSummary> = tournament
        .roster
        .iter()
        .zip(results)
        .map(|(profile, result)| {
            let previous_rating = profile.record.rating;
            PlayerSummary {
                rank: 0,
                player_id: result.player_id.clone(),
                previous_rating,
                rating: result.rating.round() as i32,
                change: previous_rating.map(|r| (result.rating - r).round() as i32),
                rating_type: result.rating_type,
                games: result.games,
                score: f64::from(result.wins) + 0.5 * f64::from(result.draws),
            }
        })
        .collect();
    standings.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.player_id.cmp(&b.player_id)));
    for (rank, data) in standings.iter_mut().enumerate() {
        data.rank = rank + 1;
    }

    let changes: Vec<f64> = tournament
        .roster
        .iter()
        .zip(results)
        .filter(|(_, result)| result.games > 0)
        .filter_map(|(profile, result)| profile.record.rating.map(|r| result.rating - r))
        .collect();
    let mean_change = if changes.is_empty() {
        None
    } else {
        Some(changes.iter().sum::<f64>() / changes.len() as f64)
    };
    let type_count = RATING_TYPES
        .iter()
        .map(|&ty| (ty, results.iter().filter(|r| r.rating_type == ty).count()))
        .collect();
    let unrated_count = tournament
        .roster
        .iter()
        .filter(|p| p.record.rating.is_none())
        .count();

    let summary = TournamentSummary {
        mean_change,
        type_count,
        unrated_count,
    };
    (summary, standings)
}

pub fn print_summary(tournament: &Tournament, results: &[RatedResult]) -> Vec<PlayerSummary> {
    let (summary, standings) = make_standings(tournament, results);

    tracing::info!(
        "Rated {} players ({} previously unrated) in {} games",
        results.len(),
        summary.unrated_count,
        tournament.results.len()
    );
    if let Some(mean_change) = summary.mean_change {
        tracing::info!("Mean rating change = {:.2}", mean_change);
    }
    for (rating_type, count) in &summary.type_count {
        tracing::info!("{:?} x{:4}", rating_type, count);
    }
    for data in &standings {
        tracing::info!(
            "{:3} {:<20} {:5} ({:+})",
            data.rank,
            data.player_id,
            data.rating,
            data.change.unwrap_or(0)
        );
    }
    standings
}
