use uscf_elo::config::RatingConfig;
use uscf_elo::data_processing::{TournamentFile, write_slice_to_file};
use uscf_elo::summary::print_summary;
use uscf_elo::systems::UscfSystem;

/// Rates one tournament file and optionally writes the results to .csv or .json
fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        tracing::error!(
            "Usage: {} tournament_file [config_file] [output_file]",
            args[0]
        );
        return;
    }

    let config = match args.get(2) {
        Some(config_file) => match RatingConfig::from_file(config_file) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!("Could not load {}: {}", config_file, err);
                return;
            }
        },
        None => RatingConfig::default(),
    };
    let file = match TournamentFile::from_file(&args[1]) {
        Ok(file) => file,
        Err(err) => {
            tracing::error!("Could not load {}: {}", args[1], err);
            return;
        }
    };
    let name = file.name.clone();
    let system = UscfSystem::new(config);
    let tournament = match file.into_tournament(&system.config) {
        Ok(tournament) => tournament,
        Err(err) => {
            tracing::error!("Malformed tournament {:?}: {}", name, err);
            return;
        }
    };

    let results = match system.rate_tournament(&tournament) {
        Ok(Some(results)) => results,
        Ok(None) => {
            tracing::info!("{:?} does not count for ratings", name);
            return;
        }
        Err(err) => {
            tracing::error!("Failed to rate {:?}: {}", name, err);
            return;
        }
    };
    print_summary(&tournament, &results);

    if let Some(output_file) = args.get(3) {
        if let Err(err) = write_slice_to_file(&results, output_file) {
            tracing::error!("Could not write {}: {}", output_file, err);
        }
    }
}
