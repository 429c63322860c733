//! CLI entry point for the `catalog` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use record_catalog::cli::commands;
use record_catalog::{CatalogConfig, CatalogError, RecordBuilder, RecordOrder, SortDirection, SortKey};

#[derive(Parser)]
#[command(
    name = "catalog",
    about = "Record catalog CLI: indexed lookups, autocomplete and recommendations over a record library"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// JSON file with catalog settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new empty library file
    Create {
        /// Path to the library file to create
        file: PathBuf,
    },
    /// Add a record, replacing any record with the same ID
    Add {
        /// Path to the library file
        file: PathBuf,
        /// Record ID
        id: u64,
        /// Title
        title: String,
        /// Creator name
        #[arg(long, default_value = "")]
        creator: String,
        /// Collection name
        #[arg(long, default_value = "")]
        collection: String,
        /// Release year
        #[arg(long, default_value = "0")]
        year: i32,
        /// Duration in seconds
        #[arg(long, default_value = "0")]
        duration: u32,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Initial play count
        #[arg(long, default_value = "0")]
        plays: u64,
        /// Media file location
        #[arg(long, default_value = "")]
        path: String,
    },
    /// Remove a record by ID
    Remove {
        /// Path to the library file
        file: PathBuf,
        /// Record ID
        id: u64,
    },
    /// Get a record by ID
    Get {
        /// Path to the library file
        file: PathBuf,
        /// Record ID
        id: u64,
    },
    /// Find a record by exact title
    Find {
        /// Path to the library file
        file: PathBuf,
        /// Title
        title: String,
    },
    /// Substring search over title, creator and collection
    Search {
        /// Path to the library file
        file: PathBuf,
        /// Text to look for
        query: String,
    },
    /// Complete a title prefix
    Complete {
        /// Path to the library file
        file: PathBuf,
        /// Title prefix
        prefix: String,
    },
    /// Recommend records related to a record
    Recommend {
        /// Path to the library file
        file: PathBuf,
        /// Record ID
        id: u64,
        /// Maximum recommendations (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rank records and show the first few
    Top {
        /// Path to the library file
        file: PathBuf,
        /// Sort key: plays, year, duration, title, id
        #[arg(long, default_value = "plays")]
        by: String,
        /// Rank smallest first instead of largest first
        #[arg(long)]
        ascending: bool,
        /// Number of records to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Count one play of a record
    Play {
        /// Path to the library file
        file: PathBuf,
        /// Record ID
        id: u64,
    },
    /// List all records
    List {
        /// Path to the library file
        file: PathBuf,
        /// Sort key: plays, year, duration, title, id (default: id)
        #[arg(long)]
        sort: Option<String>,
        /// Sort largest first
        #[arg(long)]
        descending: bool,
    },
    /// Index and graph statistics
    Stats {
        /// Path to the library file
        file: PathBuf,
    },
}

fn exit_code(e: &CatalogError) -> i32 {
    match e {
        CatalogError::Io(_) => 1,
        CatalogError::Json(_) => 2,
        CatalogError::InvalidInput(_) => 3,
        CatalogError::RecordNotFound(_) | CatalogError::TitleNotFound(_) => 4,
        CatalogError::CapacityExceeded { .. } | CatalogError::InvariantViolation(_) => 5,
    }
}

fn fail(e: CatalogError) -> ! {
    eprintln!("Error: {}", e);
    process::exit(exit_code(&e));
}

fn parse_key(name: &str) -> SortKey {
    match SortKey::from_name(name) {
        Some(key) => key,
        None => fail(CatalogError::InvalidInput(format!(
            "unknown sort key: {}",
            name
        ))),
    }
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    if cli.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let config = match &cli.config {
        Some(path) => CatalogConfig::from_json_file(path).unwrap_or_else(|e| fail(e)),
        None => CatalogConfig::default(),
    };

    let result = match cli.command {
        Commands::Create { file } => commands::cmd_create(&file),
        Commands::Add {
            file,
            id,
            title,
            creator,
            collection,
            year,
            duration,
            tags,
            plays,
            path,
        } => {
            let tags: Vec<String> = tags
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default();
            let record = RecordBuilder::new(id, title)
                .creator(creator)
                .collection(collection)
                .year(year)
                .duration_secs(duration)
                .tags(tags)
                .play_count(plays)
                .file_path(path)
                .build();
            commands::cmd_add(&file, &config, record, json)
        }
        Commands::Remove { file, id } => commands::cmd_remove(&file, &config, id, json),
        Commands::Get { file, id } => commands::cmd_get(&file, &config, id, json),
        Commands::Find { file, title } => commands::cmd_find(&file, &config, &title, json),
        Commands::Search { file, query } => commands::cmd_search(&file, &config, &query, json),
        Commands::Complete { file, prefix } => {
            commands::cmd_complete(&file, &config, &prefix, json)
        }
        Commands::Recommend { file, id, limit } => {
            commands::cmd_recommend(&file, &config, id, limit, json)
        }
        Commands::Top {
            file,
            by,
            ascending,
            limit,
        } => {
            let direction = if ascending {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            let order = RecordOrder::new(parse_key(&by), direction);
            commands::cmd_top(&file, &config, order, limit, json)
        }
        Commands::Play { file, id } => commands::cmd_play(&file, &config, id, json),
        Commands::List {
            file,
            sort,
            descending,
        } => {
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let order = sort.map(|name| RecordOrder::new(parse_key(&name), direction));
            commands::cmd_list(&file, &config, order, json)
        }
        Commands::Stats { file } => commands::cmd_stats(&file, &config, json),
    };

    if let Err(e) = result {
        fail(e);
    }
}
