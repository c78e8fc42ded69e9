//! Command-line host for the Dugout core.
//!
//! # Responsibility
//! - Resolve configuration and logging, open the configured database.
//! - Expose register/submit/profile/leaderboard flows for local use.
//!
//! The caller's user id is passed explicitly with `--user`; sign-in itself
//! happens outside this tool.

use clap::{Args, Parser, Subcommand};
use dugout_core::db::open_db;
use dugout_core::{
    format_rate, init_logging, load_config, AtBatOutcome, DugoutConfig, FixedIdentity,
    LoggingConfig, PlayerProfile, RankedEntry, SessionTotals, SortKey, SqliteCareerRepository,
    StatsService, UserId,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "dugout", version, about = "Batting stats log and leaderboard")]
struct Cli {
    /// Optional TOML config file; `DUGOUT_*` env vars override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints core linkage info.
    Ping,
    /// Creates an empty career record for a user id.
    Register {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        name: String,
    },
    /// Adds one game's at-bats to a user's record.
    Submit(SubmitArgs),
    /// Shows one user's record and rate stats.
    Profile {
        #[arg(long)]
        user: UserId,
    },
    /// Prints the ranking.
    Leaderboard {
        /// Counter or metric name (`rbi`, `homurun`, `avg`, `ops`, ...).
        #[arg(long, default_value = "rbi")]
        by: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Args)]
struct SubmitArgs {
    #[arg(long)]
    user: UserId,
    /// Game date, `YYYY-MM-DD`.
    #[arg(long)]
    date: String,
    /// Outcome code (1-10) or name; repeat once per plate appearance.
    #[arg(long = "at-bat")]
    at_bats: Vec<String>,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    rbi: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    stolen_base: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    caught_stealing: i64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Command::Ping = cli.command {
        println!("dugout_core ping={}", dugout_core::ping());
        println!("dugout_core version={}", dugout_core::core_version());
        return Ok(());
    }

    let config = load_config(cli.config.as_deref()).map_err(|err| err.to_string())?;
    start_logging(&config)?;
    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let repo = SqliteCareerRepository::try_new(&conn).map_err(|err| err.to_string())?;

    match cli.command {
        Command::Ping => Ok(()),
        Command::Register { user, name } => {
            let service = StatsService::new(repo, FixedIdentity::signed_in(user));
            let profile = service.register(&name).map_err(|err| err.to_string())?;
            print_profile(&profile);
            Ok(())
        }
        Command::Submit(args) => {
            let session = build_session(&args)?;
            print_session(&session);
            let service = StatsService::new(repo, FixedIdentity::signed_in(args.user));
            let profile = service
                .submit_session(&session)
                .map_err(|err| err.to_string())?;
            print_profile(&profile);
            Ok(())
        }
        Command::Profile { user } => {
            let service = StatsService::new(repo, FixedIdentity::signed_in(user));
            let profile = service.profile().map_err(|err| err.to_string())?;
            print_profile(&profile);
            Ok(())
        }
        Command::Leaderboard { by, limit } => {
            let key = SortKey::parse(&by).ok_or_else(|| format!("unknown sort key `{by}`"))?;
            let service = StatsService::new(repo, FixedIdentity::signed_out());
            let entries = service
                .leaderboard(key, limit.or(Some(config.ranking_limit)))
                .map_err(|err| err.to_string())?;
            print_leaderboard(key, &entries);
            Ok(())
        }
    }
}

fn start_logging(config: &DugoutConfig) -> Result<(), String> {
    match &config.log_dir {
        Some(dir) => init_logging(&LoggingConfig::new(&config.log_level, dir)?),
        None => Ok(()),
    }
}

fn build_session(args: &SubmitArgs) -> Result<SessionTotals, String> {
    let mut session = SessionTotals::new(args.date.as_str()).map_err(|err| err.to_string())?;
    for raw in &args.at_bats {
        let outcome = AtBatOutcome::parse(raw).map_err(|err| err.to_string())?;
        session = session.with_outcome(outcome);
    }
    session
        .with_rbi(args.rbi)
        .and_then(|session| session.with_stolen_base(args.stolen_base))
        .and_then(|session| session.with_caught_stealing(args.caught_stealing))
        .map_err(|err| err.to_string())
}

fn print_session(session: &SessionTotals) {
    let labels = session
        .at_bat_events()
        .iter()
        .map(|event| event.outcome.label())
        .collect::<Vec<_>>();
    println!("{}: {}", session.date(), labels.join(" "));
}

fn print_profile(profile: &PlayerProfile) {
    let record = &profile.record;
    let metrics = &profile.metrics;
    println!("{} ({})", record.username, record.id);
    let outcome_columns = [
        (AtBatOutcome::Double, record.double),
        (AtBatOutcome::Triple, record.triple),
        (AtBatOutcome::HomeRun, record.homurun),
        (AtBatOutcome::Walk, record.four_ball),
        (AtBatOutcome::HitByPitch, record.dead_ball),
        (AtBatOutcome::SacrificeBunt, record.sacrifice),
        (AtBatOutcome::SacrificeFly, record.sacrifice_fly),
        (AtBatOutcome::Strikeout, record.k),
    ]
    .iter()
    .map(|(outcome, value)| format!("{} {value}", outcome.label()))
    .collect::<Vec<_>>()
    .join("  ");
    println!(
        "G {}  AB {}  H {}  {outcome_columns}  RBI {}  SB {}  CS {}",
        record.games,
        record.atbat,
        metrics.hits,
        record.rbi,
        record.stolen_base,
        record.caught_stealing
    );
    println!(
        "AVG {}  OBP {}  SLG {}  OPS {}",
        format_rate(metrics.batting_average),
        format_rate(metrics.on_base_percentage),
        format_rate(metrics.slugging_percentage),
        format_rate(metrics.ops)
    );
}

fn print_leaderboard(key: SortKey, entries: &[RankedEntry]) {
    println!("ranking by {key}");
    for entry in entries {
        println!(
            "#{:<3} {:<32} AVG {}  OBP {}  OPS {}  {} {}  RBI {}",
            entry.position,
            entry.record.username,
            format_rate(entry.metrics.batting_average),
            format_rate(entry.metrics.on_base_percentage),
            format_rate(entry.metrics.ops),
            AtBatOutcome::HomeRun.label(),
            entry.record.homurun,
            entry.record.rbi
        );
    }
}
