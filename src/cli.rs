use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "college-recommender")]
#[command(about = "Recommend colleges from a user's search history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// College catalog (JSON array); overrides RECOMMENDER_CATALOG
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Search history database; overrides RECOMMENDER_DATABASE
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print ranked recommendations for a user as JSON
    Recommend {
        /// Numeric user identifier
        #[arg(long, short = 'u')]
        user_id: Option<String>,

        /// Number of colleges to return; overrides RECOMMENDER_TOP_N
        #[arg(long, short = 'n')]
        top_n: Option<usize>,

        /// Include the similarity score of each college
        #[arg(long)]
        scores: bool,
    },

    /// Append search queries to a user's history
    Record {
        #[arg(long, short = 'u')]
        user_id: Option<String>,

        /// Queries to store, oldest first
        #[arg(required = true)]
        queries: Vec<String>,
    },

    /// Print a user's stored search history, most recent first
    History {
        #[arg(long, short = 'u')]
        user_id: Option<String>,

        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// Delete a user's stored search history
    ClearHistory {
        #[arg(long, short = 'u')]
        user_id: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_accepts_missing_user_id_for_later_validation() {
        let cli = Cli::try_parse_from(["college-recommender", "recommend"]).unwrap();
        match cli.command {
            Command::Recommend { user_id, top_n, scores } => {
                assert!(user_id.is_none());
                assert!(top_n.is_none());
                assert!(!scores);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_paths_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "college-recommender",
            "record",
            "-u",
            "4",
            "nursing in ohio",
            "--database",
            "/tmp/h.db",
        ])
        .unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/h.db")));
        match cli.command {
            Command::Record { user_id, queries } => {
                assert_eq!(user_id.as_deref(), Some("4"));
                assert_eq!(queries, vec!["nursing in ohio"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
