use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use reel::banner::{BannerInfo, SessionStats, print_banner, print_session_summary};
use reel::commands::{self, CommandResult, SessionInfo};
use reel::config::Config;
use reel::consts::{DEFAULT_BASE_URL, DEFAULT_HISTORY_LIMIT, default_db_path, elide};
use reel::controller::{Controller, SubmitOutcome};
use reel::generator::http::HttpGenerator;
use reel::history::{History, HistoryEntry};
use reel::history::sqlite::SqliteHistory;
use reel::request::{Rejection, Status};
use reel::spinner::Spinner;

#[derive(Parser)]
#[command(name = "reel", version, about = "A topic in, a video out.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Generation service address (overrides the persisted one)
    #[arg(short, long)]
    base_url: Option<String>,

    /// SQLite database path for config and history (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<String>,

    /// Request timeout in seconds (unbounded when omitted)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Open each generated video in the system player
    #[arg(short, long, default_value_t = false)]
    open: bool,

    /// Generate one video and exit (non-interactive)
    #[arg(short, long)]
    run: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Persist the generation service address
    SetUrl { url: String },
    /// List past generations and exit
    History {
        /// How many entries to show
        #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db = match &cli.db {
        Some(db) => db.clone(),
        None => {
            let path = default_db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            path.to_string_lossy().into_owned()
        }
    };

    let config = Config::open(&db)?;

    // Handle subcommands
    if let Some(command) = &cli.command {
        match command {
            Command::SetUrl { url } => {
                config.set_base_url(url)?;
                println!("✓ service address set to {}", url.trim_end_matches('/'));
                return Ok(());
            }
            Command::History { limit } => {
                let history = SqliteHistory::new(&db)?;
                let entries = history.recent(*limit).await?;
                if entries.is_empty() {
                    println!("no generations yet.");
                } else {
                    for entry in entries {
                        println!("  {:<40} {}", elide(&entry.topic, 40), entry.video_url);
                    }
                }
                return Ok(());
            }
        }
    }

    // Flag > persisted config > default
    let base_url = match cli.base_url {
        Some(url) => url,
        None => config.base_url()?.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    };

    let generator = Arc::new(HttpGenerator::new(
        &base_url,
        cli.timeout.map(Duration::from_secs),
    )?);
    let controller = Controller::new(generator.clone());
    let history = SqliteHistory::new(&db)?;

    let db_label = if db == ":memory:" { "ephemeral" } else { &db };

    print_banner(&BannerInfo {
        base_url: generator.base_url(),
        db: db_label,
        timeout: cli.timeout,
    });

    let mut stats = SessionStats::default();
    let mut last_video: Option<String> = None;

    // Single topic mode
    if let Some(topic) = cli.run {
        generate(
            &controller,
            &generator,
            &history,
            &topic,
            cli.open,
            &mut stats,
            &mut last_video,
        )
        .await;
        print_session_summary(stats);
        return Ok(());
    }

    // REPL — async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nreel> ");
        io::stdout().flush()?;

        // Read next line, interruptible by Ctrl+C
        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let snapshot = controller.snapshot();
        let info = SessionInfo {
            base_url: generator.base_url(),
            db: db_label,
            stats,
            request: &snapshot,
            last_video: last_video.as_deref(),
        };

        match commands::handle_command(input, &info, &history).await {
            CommandResult::Handled => continue,
            CommandResult::Reset => {
                if controller.reset() {
                    println!("reset.");
                } else {
                    println!("a generation is in flight; it will run to completion.");
                }
                continue;
            }
            CommandResult::Quit => break,
            CommandResult::NotACommand => {}
        }

        // Everything else is a topic. No Ctrl+C race here: once Pending,
        // the request runs to resolution.
        generate(
            &controller,
            &generator,
            &history,
            input,
            cli.open,
            &mut stats,
            &mut last_video,
        )
        .await;
    }

    print_session_summary(stats);
    Ok(())
}

/// Submit one topic and render the resolution.
async fn generate(
    controller: &Controller,
    generator: &HttpGenerator,
    history: &dyn History,
    topic: &str,
    auto_open: bool,
    stats: &mut SessionStats,
    last_video: &mut Option<String>,
) {
    let spinner = Spinner::start(&format!("generating \"{}\"", elide(topic.trim(), 40)));

    match controller.submit(topic).await {
        SubmitOutcome::Rejected(Rejection::EmptyTopic) => {
            spinner.dismiss().await;
            println!("enter a topic first.");
        }
        SubmitOutcome::Rejected(Rejection::Outstanding) => {
            spinner.dismiss().await;
            println!("a generation is already in flight.");
        }
        SubmitOutcome::Finished(request) => match request.status() {
            Status::Succeeded { video_url } => {
                spinner.finish("✓", "video ready").await;
                let url = generator.absolute_url(video_url);
                println!("=> {}", url);

                if let Err(e) = history
                    .record(HistoryEntry {
                        topic: request.topic().to_string(),
                        video_url: video_url.clone(),
                    })
                    .await
                {
                    eprintln!("could not record history: {e:#}");
                }

                stats.generated += 1;
                if auto_open && let Err(e) = open::that(&url) {
                    eprintln!("could not open {url}: {e}");
                }
                *last_video = Some(url);
            }
            Status::Failed { message } => {
                spinner.finish("✗", message).await;
                stats.failed += 1;
            }
            // submit only returns terminal states
            Status::Idle | Status::Pending => spinner.dismiss().await,
        },
    }
}
