use thiserror::Error;

/// Reasons a tournament cannot be rated at all. An unratable tournament
/// (one that fails the validity check) is not an error and never shows up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatingError {
    #[error("match references {player}, who is not on the roster")]
    UnknownPlayer { player: String },
    #[error("{player} is paired against themselves")]
    SelfPairing { player: String },
    #[error("winner {winner} did not play in the match")]
    UnknownWinner { winner: String },
    #[error("{player} appears more than once on the roster")]
    DuplicatePlayer { player: String },
    #[error("{player} has {wins} wins and {losses} losses in only {games} games")]
    InconsistentRecord {
        player: String,
        games: u32,
        wins: u32,
        losses: u32,
    },
    #[error("special rating estimate {estimate} cannot be bracketed by breakpoints")]
    Unbracketed { estimate: f64 },
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON5: {0}")]
    Json5(#[from] json5::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid or missing filename extension: {0:?}")]
    Extension(std::path::PathBuf),
}
