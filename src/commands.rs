//! Built-in REPL commands prefixed with `/`.
//!
//! Anything that isn't a command is treated as a topic and submitted for
//! generation. Sync commands live in a fn-pointer table; commands that
//! touch the history store are async and dispatched separately.

use crate::banner::SessionStats;
use crate::consts::{DEFAULT_HISTORY_LIMIT, elide};
use crate::history::History;
use crate::request::{GenerationRequest, Status};

/// Session info available to built-in commands.
pub struct SessionInfo<'a> {
    pub base_url: &'a str,
    pub db: &'a str,
    pub stats: SessionStats,
    pub request: &'a GenerationRequest,
    /// Absolute URL of the most recent successful generation, if any.
    pub last_video: Option<&'a str>,
}

/// Result of command handling.
pub enum CommandResult {
    /// Not a command — treat the input as a topic.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// `/reset` — caller should reset the controller.
    Reset,
    /// Exit the REPL.
    Quit,
}

/// A built-in command definition.
struct Command {
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    run: fn(&SessionInfo) -> CommandResult,
}

/// Async commands need separate handling since fn pointers can't be async.
struct AsyncCommand {
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
}

// --- Sync commands ---

const COMMANDS: &[Command] = &[
    Command {
        name: "/help",
        aliases: &["/h", "/?"],
        description: "show this help",
        run: cmd_help,
    },
    Command {
        name: "/status",
        aliases: &["/s"],
        description: "show the current request state",
        run: cmd_status,
    },
    Command {
        name: "/open",
        aliases: &[],
        description: "open the last generated video",
        run: cmd_open,
    },
    Command {
        name: "/reset",
        aliases: &[],
        description: "discard the current result or error",
        run: cmd_reset,
    },
    Command {
        name: "/quit",
        aliases: &["quit", "exit", "/exit"],
        description: "exit the REPL",
        run: cmd_quit,
    },
];

const ASYNC_COMMANDS: &[AsyncCommand] = &[
    AsyncCommand {
        name: "/history",
        aliases: &[],
        description: "list past generations",
    },
    AsyncCommand {
        name: "/clear",
        aliases: &[],
        description: "wipe the generation history",
    },
];

/// Try to handle input as a built-in command.
pub async fn handle_command(
    input: &str,
    info: &SessionInfo<'_>,
    history: &dyn History,
) -> CommandResult {
    let cmd = input.trim();

    for command in COMMANDS {
        if cmd == command.name || command.aliases.contains(&cmd) {
            return (command.run)(info);
        }
    }

    match cmd {
        "/history" => cmd_history(history).await,
        "/clear" => cmd_clear(history).await,
        _ => CommandResult::NotACommand,
    }
}

/// One-line description of where a request currently stands.
pub fn describe(request: &GenerationRequest) -> String {
    match request.status() {
        Status::Idle => "idle — enter a topic to generate a video".to_string(),
        Status::Pending => format!("generating \"{}\"…", request.topic()),
        Status::Succeeded { video_url } => {
            format!("\"{}\" → {}", request.topic(), video_url)
        }
        Status::Failed { message } => {
            format!("\"{}\" failed: {}", request.topic(), message)
        }
    }
}

fn cmd_help(_info: &SessionInfo) -> CommandResult {
    println!("commands:");
    for command in COMMANDS {
        let aliases = if command.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", command.aliases.join(", "))
        };
        println!("  {:<10}{} — {}", command.name, aliases, command.description);
    }
    for command in ASYNC_COMMANDS {
        let aliases = if command.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", command.aliases.join(", "))
        };
        println!("  {:<10}{} — {}", command.name, aliases, command.description);
    }
    println!("anything else is submitted as a topic.");
    CommandResult::Handled
}

fn cmd_status(info: &SessionInfo) -> CommandResult {
    println!("{}", describe(info.request));
    println!(
        "service {} | db {} | session: {} generated, {} failed",
        info.base_url, info.db, info.stats.generated, info.stats.failed
    );
    CommandResult::Handled
}

fn cmd_open(info: &SessionInfo) -> CommandResult {
    match info.last_video {
        Some(url) => {
            if let Err(e) = open::that(url) {
                eprintln!("could not open {url}: {e}");
            } else {
                println!("opening {url}");
            }
        }
        None => println!("nothing generated yet."),
    }
    CommandResult::Handled
}

fn cmd_reset(_info: &SessionInfo) -> CommandResult {
    CommandResult::Reset
}

fn cmd_quit(_info: &SessionInfo) -> CommandResult {
    CommandResult::Quit
}

async fn cmd_history(history: &dyn History) -> CommandResult {
    match history.recent(DEFAULT_HISTORY_LIMIT).await {
        Ok(entries) if entries.is_empty() => println!("no generations yet."),
        Ok(entries) => {
            for entry in entries {
                println!("  {:<40} {}", elide(&entry.topic, 40), entry.video_url);
            }
        }
        Err(e) => eprintln!("could not read history: {e:#}"),
    }
    CommandResult::Handled
}

async fn cmd_clear(history: &dyn History) -> CommandResult {
    match history.clear().await {
        Ok(()) => println!("history cleared."),
        Err(e) => eprintln!("could not clear history: {e:#}"),
    }
    CommandResult::Handled
}
