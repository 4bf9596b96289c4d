//! US Chess Federation rating updates for over-the-board tournaments.
//! System details: http://www.glicko.net/ratings/rating.system.pdf

pub mod config;
pub mod data_processing;
pub mod error;
pub mod numerical;
pub mod summary;
pub mod systems;
