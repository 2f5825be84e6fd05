mod appsettings;
mod clock;
mod manager;
mod notify;
mod reminder_time;
mod scheduling;
mod storage;
mod telegram;
mod todo;

use std::sync::Arc;

use chrono_tz::Tz;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::clock::{Clock, SystemClock};
use crate::manager::TodoManager;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::telegram::TelegramNotifier;
use crate::todo::TodoId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = appsettings::get();
    let tz: Tz = settings
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {}", settings.timezone))?;
    log::info!("using timezone {tz}");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(tz));
    let notifier = create_notifier(settings).await;

    let manager = TodoManager::new(clock, notifier);
    let reminders = manager.start_reminders();

    println!("nudge, a todo list that reminds you. Type 'help' for commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        if !run_command(&manager, parse_command(&line)).await {
            break;
        }
    }

    reminders.shutdown().await;

    Ok(())
}

async fn create_notifier(settings: &appsettings::AppSettings) -> Arc<dyn Notifier> {
    if let Some(telegram) = &settings.telegram {
        match TelegramNotifier::connect(telegram).await {
            Ok(notifier) => return Arc::new(notifier),
            Err(error) => {
                log::warn!("telegram channel unavailable, falling back to terminal: {error}");
            }
        }
    }

    Arc::new(ConsoleNotifier)
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Add { text: &'a str, time24: Option<&'a str> },
    Done(TodoId),
    Remove(TodoId),
    List,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "add" => {
            let (text, time24) = split_time_suffix(rest);
            Command::Add { text, time24 }
        }
        "done" => match rest.parse() {
            Ok(id) => Command::Done(id),
            Err(_) => Command::Unknown(line),
        },
        "rm" => match rest.parse() {
            Ok(id) => Command::Remove(id),
            Err(_) => Command::Unknown(line),
        },
        "ls" => Command::List,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line),
    }
}

/// Splits a trailing `@HH:MM` marker off the todo text. An `@` whose suffix
/// does not look like a time stays part of the text.
fn split_time_suffix(rest: &str) -> (&str, Option<&str>) {
    if let Some((text, candidate)) = rest.rsplit_once('@') {
        let candidate = candidate.trim();
        if looks_like_time(candidate) {
            return (text.trim(), Some(candidate));
        }
    }

    (rest, None)
}

fn looks_like_time(s: &str) -> bool {
    !s.is_empty() && s.contains(':') && s.chars().all(|c| c.is_ascii_digit() || c == ':')
}

/// Returns false when the session should end.
async fn run_command(manager: &TodoManager, command: Command<'_>) -> bool {
    match command {
        Command::Add { text, time24 } => match manager.add(text, time24).await {
            Some(todo) => println!("{}. {} ({})", todo.id, todo.text, todo.time),
            None => println!("nothing to add, the text was empty"),
        },
        Command::Done(id) => match manager.toggle(id) {
            Some(todo) if todo.completed => println!("done: {}", todo.text),
            Some(todo) => println!("back in progress: {}", todo.text),
            None => println!("no todo with id {id}"),
        },
        Command::Remove(id) => {
            if manager.remove(id) {
                println!("removed");
            } else {
                println!("no todo with id {id}");
            }
        }
        Command::List => {
            let todos = manager.todos();
            if todos.is_empty() {
                println!("nothing to do");
            }
            for todo in todos {
                let marker = if todo.completed { "x" } else { " " };
                println!("{}. [{marker}] {} ({})", todo.id, todo.text, todo.time);
            }
        }
        Command::Help => print_help(),
        Command::Empty => {}
        Command::Unknown(line) => println!("did not understand '{line}', type 'help'"),
        Command::Quit => return false,
    }

    true
}

fn print_help() {
    println!("add <text> [@HH:MM]   add a todo, reminded at the given 24h time");
    println!("done <id>             toggle a todo finished/unfinished");
    println!("rm <id>               delete a todo");
    println!("ls                    list todos");
    println!("quit                  leave (reminders stop with the session)");
}
