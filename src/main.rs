use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ssc_stats::api::{build_router, state::AppState};
use ssc_stats::config::AppConfig;
use ssc_stats::dashboard::Dashboard;
use ssc_stats::fetch::{ApiClient, StatsSource};
use ssc_stats::roster::Roster;

#[derive(Parser)]
#[command(name = "ssc-stats")]
#[command(about = "Stroven Super Cup statistics dashboard")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./ssc-stats.toml")]
    config: PathBuf,

    /// Backend base URL (overrides config and SSC_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print views as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Players ranked by rating
    Leaderboard,

    /// Every player with their profile
    Competitors,

    /// One player's page
    Player {
        /// Player handle
        handle: String,
    },

    /// Five-match form table
    Form,

    /// Current and best streaks
    Streaks,

    /// Head-to-head rivalries
    Rivalries {
        /// Minimum meetings (default from config)
        #[arg(long)]
        min_matches: Option<u32>,
    },

    /// Performance radar metrics
    Radar,

    /// When matches get played
    Frequency,

    /// Recent rating trajectory
    EloTrend {
        /// Rating history rows to include (default from config)
        #[arg(long)]
        window: Option<usize>,
    },

    /// Super Cup title holders
    Champions,

    /// Start the API server
    Serve {
        /// Bind address (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (default from config)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .with_env_overrides()
        .with_api_url(cli.api_url.clone());
    config.validate()?;
    Ok(config)
}

fn load_roster(config: &AppConfig) -> Roster {
    match &config.roster_path {
        Some(path) => Roster::from_file(path).unwrap_or_else(|e| {
            tracing::warn!("Using bundled roster, {} unusable: {}", path.display(), e);
            Roster::bundled()
        }),
        None => Roster::bundled(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&level, cli.json_logs);

    tracing::debug!("Starting ssc-stats v{}", env!("CARGO_PKG_VERSION"));

    let client = Arc::new(ApiClient::new(config.api.client_config())?);
    let roster = Arc::new(load_roster(&config));
    let mut dashboard = Dashboard::new(client.as_ref(), roster.as_ref(), config.display.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let source: Arc<dyn StatsSource> = client.clone();
            let state = AppState::new(source, roster.clone(), &config);

            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{} (backend {})", addr, config.api.base_url);
            axum::serve(listener, app).await?;
        }
        Commands::Leaderboard => {
            let rows = dashboard.leaderboard().await;
            if cli.json {
                return print_json(&rows);
            }
            println!(
                "{:>3}  {:<16} {:>7}  {:<12} {:>4} {:>4} {:>4} {:>4} {:>6}",
                "#", "Player", "ELO", "Rank", "P", "W", "L", "D", "Win%"
            );
            for row in &rows {
                println!(
                    "{:>3}  {:<16} {:>7.0}  {:<12} {:>4} {:>4} {:>4} {:>4} {:>5.1}%",
                    row.position,
                    row.player.name_or_handle(),
                    row.player.elo,
                    row.rank.to_string(),
                    row.player.played,
                    row.player.wins,
                    row.player.losses,
                    row.draws,
                    row.win_pct
                );
            }
        }
        Commands::Competitors => {
            let cards = dashboard.competitors().await;
            if cli.json {
                return print_json(&cards);
            }
            for card in &cards {
                println!(
                    "{} {} ({})",
                    card.profile.nationality,
                    card.player.name_or_handle(),
                    card.player.handle
                );
                println!("    {}", card.profile.description);
                println!(
                    "    {} | {} | ELO {:.0} | titles {}",
                    card.profile.playing_style, card.rank, card.player.elo, card.profile.ssc_wins
                );
            }
        }
        Commands::Player { handle } => {
            let Some(view) = dashboard.player_profile(&handle).await else {
                anyhow::bail!("Player not found: {}", handle);
            };
            if cli.json {
                return print_json(&view);
            }
            println!("{} ({})", view.player.name_or_handle(), view.player.handle);
            println!("  Rank:        {} (ELO {:.0})", view.rank, view.player.elo);
            if let Some(peak) = view.all_time_high {
                println!("  Peak:        {:.0}", peak);
            }
            println!("  Record:      {} ({:.1}%)", view.record, view.record.win_rate());
            println!(
                "  Recent:      {} ({:.1}%)",
                view.recent_record, view.recent_win_rate
            );
            println!(
                "  Streak:      {} {} ({})",
                view.streak.current_streak,
                view.streak.streak_type,
                view.streak.intensity()
            );
            println!(
                "  Best/worst:  {}W / {}L",
                view.streak.best_win_streak, view.streak.worst_loss_streak
            );
            match &view.form {
                Some(form) => {
                    let results: Vec<String> =
                        form.last5_matches.iter().map(|r| r.to_string()).collect();
                    println!(
                        "  Form:        {} {} ({})",
                        results.join(""),
                        form.form,
                        form.rating()
                    );
                }
                None => println!("  Form:        not enough matches"),
            }
            if !view.head_to_head.is_empty() {
                println!("\n  Head to head (recent matches):");
                for h2h in &view.head_to_head {
                    println!(
                        "    vs {:<14} {}-{}-{}  avg GD {:+.2}",
                        h2h.player2,
                        h2h.player1_wins,
                        h2h.draws,
                        h2h.player2_wins,
                        h2h.avg_goal_difference
                    );
                }
            }
            if !view.recent.is_empty() {
                println!("\n  Recent:");
                for m in &view.recent {
                    println!(
                        "    {}  {} {} {}",
                        m.played_at.format("%Y-%m-%d %H:%M"),
                        m.p1,
                        m.score,
                        m.p2
                    );
                }
            }
        }
        Commands::Form => {
            let rows = dashboard.form_rows().await;
            if cli.json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                println!("No players with enough matches");
            }
            for row in &rows {
                let results: Vec<String> =
                    row.form.last5_matches.iter().map(|r| r.to_string()).collect();
                println!(
                    "{:<16} {}  {:>3}  {}",
                    row.form.player,
                    results.join(" "),
                    row.form.form,
                    row.rating
                );
            }
        }
        Commands::Streaks => {
            let rows = dashboard.streaks().await;
            if cli.json {
                return print_json(&rows);
            }
            println!(
                "{:<16} {:>8} {:<5} {:>5} {:>6}  {}",
                "Player", "Current", "Type", "Best", "Worst", "Status"
            );
            for row in &rows {
                println!(
                    "{:<16} {:>8} {:<5} {:>5} {:>6}  {}",
                    row.streak.player,
                    row.streak.current_streak,
                    row.streak.streak_type.to_string(),
                    row.streak.best_win_streak,
                    row.streak.worst_loss_streak,
                    row.intensity
                );
            }
        }
        Commands::Rivalries { min_matches } => {
            let rows = dashboard.rivalries(min_matches).await;
            if cli.json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                println!("No rivalries yet");
            }
            for row in &rows {
                let r = &row.rivalry;
                println!(
                    "{} vs {}: {}-{}-{} over {} ({}), avg GD {:+.2}",
                    r.player1,
                    r.player2,
                    r.player1_wins,
                    r.draws,
                    r.player2_wins,
                    r.total_matches,
                    row.intensity,
                    r.avg_goal_difference
                );
            }
        }
        Commands::Radar => {
            let radar = dashboard.radar().await;
            if cli.json {
                return print_json(&radar);
            }
            if radar.metrics.is_empty() {
                println!("Not enough players for the radar");
                return Ok(());
            }
            let handles: Vec<&String> = radar.colors.keys().collect();
            print!("{:<14}", "Metric");
            for handle in &handles {
                print!(" {:>10}", handle);
            }
            println!(" {:>8}", "Average");
            for metric in &radar.metrics {
                print!("{:<14}", metric.metric.label());
                for handle in &handles {
                    print!(" {:>10}", metric.score(handle).unwrap_or(0));
                }
                println!(" {:>8}", metric.average);
            }
        }
        Commands::Frequency => {
            let Some(frequency) = dashboard.match_frequency().await else {
                if cli.json {
                    return print_json(&serde_json::Value::Null);
                }
                println!("Not enough matches for frequency stats");
                return Ok(());
            };
            if cli.json {
                return print_json(&frequency);
            }
            println!("{} matches\n\nBy hour (UTC):", frequency.total);
            for bucket in &frequency.by_hour {
                println!("  {:>5}  {:>4}", bucket.label, bucket.matches);
            }
            println!("\nBy weekday:");
            for bucket in &frequency.by_weekday {
                println!("  {:<9}  {:>4}", bucket.day, bucket.matches);
            }
        }
        Commands::EloTrend { window } => {
            let Some(view) = dashboard.elo_trend(window).await else {
                if cli.json {
                    return print_json(&serde_json::Value::Null);
                }
                println!("Not enough rating history");
                return Ok(());
            };
            if cli.json {
                return print_json(&view);
            }
            print!("{:>6}", "Match");
            for handle in &view.trend.players {
                print!(" {:>10}", handle);
            }
            println!();
            for point in &view.trend.points {
                print!("{:>6}", point.match_number);
                for handle in &view.trend.players {
                    match point.rating(handle) {
                        Some(rating) => print!(" {:>10.0}", rating),
                        None => print!(" {:>10}", "-"),
                    }
                }
                println!();
            }
        }
        Commands::Champions => {
            let rows = dashboard.champions();
            if cli.json {
                return print_json(&rows);
            }
            for row in &rows {
                println!("{:<16} {}", row.handle, "🏆".repeat(row.championships as usize));
            }
        }
    }

    Ok(())
}
