use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("PUMPZ_GIT_HASH");
    const COMMIT_DATE: &str = env!("PUMPZ_COMMIT_DATE");
    const IS_RELEASE: &str = env!("PUMPZ_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "pumpz", bin_name = "pumpz", version = get_version())]
#[command(about = "Search, sort, page through and edit pump records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Pump dataset (JSON array); defaults to the configured data file
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Directory holding config.json
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of the pump table
    #[command(alias = "ls")]
    List {
        /// Search name, type and area (case-insensitive)
        #[arg(short, long)]
        query: Option<String>,

        /// Column to sort by (e.g. name, flowRate)
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page number (out of range values are clamped)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Rows per page (must be one of the configured page sizes)
        #[arg(short = 'n', long)]
        page_size: Option<usize>,
    },

    /// Interactive session: search, sort, page and edit from stdin
    #[command(alias = "sh")]
    Shell,

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, page-sizes, default-page-size)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_flags() {
        let cli = Cli::try_parse_from([
            "pumpz", "list", "-q", "pump", "-s", "name", "--desc", "-p", "-2", "-n", "5",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List {
                query,
                sort,
                desc,
                page,
                page_size,
            }) => {
                assert_eq!(query.as_deref(), Some("pump"));
                assert_eq!(sort.as_deref(), Some("name"));
                assert!(desc);
                assert_eq!(page, -2);
                assert_eq!(page_size, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn desc_requires_sort() {
        assert!(Cli::try_parse_from(["pumpz", "list", "--desc"]).is_err());
    }

    #[test]
    fn global_data_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["pumpz", "shell", "--data", "p.json"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("p.json")));
        assert!(matches!(cli.command, Some(Commands::Shell)));
    }
}
