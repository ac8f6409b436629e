use clap::Parser;
use rink_travel::error::AppError;
use rink_travel::export::ExportFormat;
use rink_travel::geo::{Franchise, GeoTable};
use rink_travel::logging;
use rink_travel::nhl::{StatsClient, DEFAULT_BASE_URL};
use rink_travel::pipeline::{self, RunConfig, RunReport};
use rink_travel::season::Season;
use rink_travel::travel::OffsetPolicy;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// rink-travel: NHL game history with travel context
///
/// Fetches a team's regular-season games and adds, for every game, the
/// distance traveled to the venue, the time-zone shift from home, and the
/// rest days since the previous game. One JSON and one CSV file per season.
///
/// Examples:
///   rink-travel --season 2023-2024
///   rink-travel --team "Boston Bruins" --from 2010 --to 2023
///   rink-travel --team "Montreal Canadiens" --latest --format csv
///   rink-travel --input raw_games.json --out-dir out
///   rink-travel --list-teams
#[derive(Parser)]
#[command(name = "rink-travel", version, about, long_about = None)]
struct Cli {
    /// Full franchise name of the tracked team.
    #[arg(long, short = 't', default_value = "Vancouver Canucks", value_parser = parse_team)]
    team: Franchise,

    /// One season (YYYY-YYYY). May be repeated.
    #[arg(long, short = 's', value_parser = parse_season)]
    season: Vec<Season>,

    /// First season by start year (inclusive).
    #[arg(long)]
    from: Option<i32>,

    /// Last season by start year (inclusive). Defaults to --from.
    #[arg(long)]
    to: Option<i32>,

    /// Process the most recent season the stats API lists.
    #[arg(long)]
    latest: bool,

    /// Enrich a local JSON array of raw game records instead of fetching.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output directory.
    #[arg(long, short = 'o', default_value = ".")]
    out_dir: PathBuf,

    /// Output format: "json", "csv" or "both".
    #[arg(long, default_value = "both", value_parser = parse_format)]
    format: ExportFormat,

    /// Which instant UTC offsets are evaluated at: "game-date" (DST-aware,
    /// per game) or "now" (the moment of the run).
    #[arg(long, default_value = "game-date", value_parser = parse_policy)]
    tz_policy: OffsetPolicy,

    /// Pause between season requests, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Offline mode: team directory from the local cache only.
    #[arg(long)]
    offline: bool,

    /// Print the built-in team location table as JSON and exit.
    #[arg(long)]
    list_teams: bool,

    /// Stats API base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Debug-level logging.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_team(s: &str) -> Result<Franchise, String> {
    Franchise::from_name(s).ok_or_else(|| AppError::UnknownFranchise(s.to_string()).to_string())
}

fn parse_season(s: &str) -> Result<Season, String> {
    s.parse()
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    match s.to_lowercase().as_str() {
        "json" => Ok(ExportFormat::Json),
        "csv" => Ok(ExportFormat::Csv),
        "both" | "all" => Ok(ExportFormat::Both),
        _ => Err(format!("Unknown format '{}'. Use 'json', 'csv' or 'both'.", s)),
    }
}

fn parse_policy(s: &str) -> Result<OffsetPolicy, String> {
    match s.to_lowercase().as_str() {
        "game-date" | "gamedate" | "date" => Ok(OffsetPolicy::GameDate),
        "now" => Ok(OffsetPolicy::Now),
        _ => Err(format!("Unknown tz policy '{}'. Use 'game-date' or 'now'.", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let table = GeoTable::builtin();

    if cli.list_teams {
        match serde_json::to_string_pretty(&table.team_list()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match execute(&cli, &table) {
        Ok(report) => {
            for s in &report.completed {
                info!(season = %s.season, games = s.games, files = s.files.len(), "season done");
            }
            if !report.is_success() {
                for (season, reason) in &report.failed {
                    eprintln!("Error: season {}: {}", season, reason);
                }
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: &Cli, table: &GeoTable) -> Result<RunReport, AppError> {
    let mut config = RunConfig::new(cli.team, Vec::new());
    config.out_dir = cli.out_dir.clone();
    config.format = cli.format;
    config.policy = cli.tz_policy;
    config.delay = Duration::from_millis(cli.delay_ms);
    config.offline = cli.offline;
    config.base_url = cli.base_url.clone();

    if let Some(input) = &cli.input {
        if !cli.season.is_empty() || cli.from.is_some() || cli.latest {
            warn!("season selection is ignored with --input");
        }
        return pipeline::run_from_file(input, &config, table);
    }

    config.seasons = resolve_seasons(cli)?;
    pipeline::run(&config, table)
}

fn resolve_seasons(cli: &Cli) -> Result<Vec<Season>, AppError> {
    let mut seasons = cli.season.clone();

    match (cli.from, cli.to) {
        (Some(from), to) => {
            let to = to.unwrap_or(from);
            if from > to {
                return Err(AppError::config_error(format!(
                    "--from ({}) must not exceed --to ({})",
                    from, to
                )));
            }
            let range = Season::range(from, to).ok_or_else(|| {
                AppError::config_error(format!(
                    "seasons {}..={} are outside the supported calendar",
                    from, to
                ))
            })?;
            seasons.extend(range);
        }
        (None, Some(_)) => return Err(AppError::config_error("--to requires --from")),
        (None, None) => {}
    }

    if cli.latest {
        let client = StatsClient::new(cli.base_url.clone());
        seasons.push(client.latest_season()?);
    }

    if seasons.is_empty() {
        return Err(AppError::config_error(
            "no season selected. Use --season, --from/--to, --latest or --input",
        ));
    }

    seasons.sort();
    seasons.dedup();
    Ok(seasons)
}
