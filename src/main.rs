use clap::Parser;
use college_recommender::catalog::JsonCatalog;
use college_recommender::cli::{Cli, Command};
use college_recommender::config::RecommenderConfig;
use college_recommender::database::Database;
use college_recommender::error::{exit_code, parse_user_id, Result};
use college_recommender::recommender::Recommender;
use log::{error, info};

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    let cli = Cli::parse();
    let mut config = RecommenderConfig::from_env();
    if let Some(path) = cli.catalog.clone() {
        config.catalog_path = path;
    }
    if let Some(path) = cli.database.clone() {
        config.database_path = path;
    }

    let code = match run(cli.command, &config) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn open_database(config: &RecommenderConfig) -> Result<Database> {
    Ok(Database::new(&config.database_path.to_string_lossy())?)
}

fn run(command: Command, config: &RecommenderConfig) -> Result<()> {
    match command {
        Command::Recommend {
            user_id,
            top_n,
            scores,
        } => {
            let user_id = parse_user_id(user_id.as_deref())?;
            let top_n = top_n.unwrap_or(config.top_n);
            let recommender = Recommender::new(
                JsonCatalog::new(&config.catalog_path),
                open_database(config)?,
                config.options(),
            );

            // The engine would degrade an unreadable catalog to an empty list;
            // at the command line that is reported instead.
            let output = if scores {
                serde_json::to_string_pretty(&recommender.try_recommend_scored(user_id, top_n)?)
            } else {
                serde_json::to_string_pretty(&recommender.try_recommend(user_id, top_n)?)
            }?;
            println!("{}", output);
        }
        Command::Record { user_id, queries } => {
            let user_id = parse_user_id(user_id.as_deref())?;
            let mut db = open_database(config)?;
            let stored = db.record_searches(user_id, &queries)?;
            info!("Stored {} searches for user {}", stored, user_id);
        }
        Command::History { user_id, limit } => {
            let user_id = parse_user_id(user_id.as_deref())?;
            let db = open_database(config)?;
            for record in db.get_user_history(user_id, limit)? {
                let searched_at = record.searched_at.as_deref().unwrap_or("-");
                println!("{}\t{}", searched_at, record.search_query);
            }
        }
        Command::ClearHistory { user_id } => {
            let user_id = parse_user_id(user_id.as_deref())?;
            let db = open_database(config)?;
            let removed = db.clear_history_for_user(user_id)?;
            info!("Removed {} searches for user {}", removed, user_id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use college_recommender::error::RecommendError;

    fn recommend(user_id: Option<&str>) -> Command {
        Command::Recommend {
            user_id: user_id.map(str::to_string),
            top_n: None,
            scores: false,
        }
    }

    #[test]
    fn unreadable_catalog_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = RecommenderConfig {
            catalog_path: dir.path().join("missing.json"),
            database_path: dir.path().join("history.db"),
            ..RecommenderConfig::default()
        };
        Database::new(&config.database_path.to_string_lossy())
            .unwrap()
            .insert_search(1, "computer science boston")
            .unwrap();

        let err = run(recommend(Some("1")), &config).unwrap_err();
        assert!(matches!(err, RecommendError::DataUnavailable { .. }));
        assert_eq!(err.exit_code(), exit_code::DATA_UNAVAILABLE);
    }

    #[test]
    fn bad_user_id_fails_before_opening_the_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = RecommenderConfig {
            catalog_path: dir.path().join("missing.json"),
            database_path: dir.path().join("no-such-dir").join("history.db"),
            ..RecommenderConfig::default()
        };

        for user_id in [None, Some("abc")] {
            let err = run(recommend(user_id), &config).unwrap_err();
            assert!(matches!(err, RecommendError::ClientInput(_)));
            assert_eq!(err.exit_code(), exit_code::INVALID_ARGUMENTS);
        }
        assert!(!config.database_path.exists());
    }
}
