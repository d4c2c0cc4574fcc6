//! Interactive shell.
//!
//! Lines starting with `/` are commands; anything else is a prompt that is
//! generated in the background, so several prompts can be in flight at once.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::{Mutex, watch};

use tape_application::{Notice, StudioUseCase, submit_shared};
use tape_core::chat::{ChatListSnapshot, DeleteOutcome};
use tape_core::state::SUPPORTED_MODELS;

use crate::render::{self, Palette};

const FRAME: Duration = Duration::from_millis(33);

const COMMANDS: &[(&str, &str)] = &[
    ("/new", "Start a new chat"),
    ("/chats", "List chats"),
    ("/switch", "<n|id> Switch to a chat"),
    ("/rename", "<name> Rename the current chat"),
    ("/delete", "[n|id] Delete a chat (default: current)"),
    ("/signup", "<name> <email> <password> Create an account"),
    ("/signin", "<email> <password> Sign in"),
    ("/signout", "Sign out"),
    ("/whoami", "Show the signed-in user"),
    ("/theme", "Toggle light/dark theme"),
    ("/model", "[id] Show or select the model"),
    ("/scene", "Show the objects in the scene"),
    ("/history", "Show the current chat"),
    ("/help", "Show this help"),
];

/// Completion, hints and highlighting for slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Empty,
    Command { name: &'a str, args: Vec<&'a str> },
    Prompt(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return Input::Quit;
    }
    if trimmed.starts_with('/') {
        let mut parts = trimmed.split_whitespace();
        let name = parts.next().unwrap_or(trimmed);
        return Input::Command {
            name,
            args: parts.collect(),
        };
    }
    Input::Prompt(trimmed)
}

/// Resolves a 1-based list position or a chat id.
fn resolve_chat(studio: &StudioUseCase, arg: &str) -> Option<String> {
    let chats = studio.chats();
    if let Ok(n) = arg.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|index| chats.get(index))
            .map(|chat| chat.id.clone());
    }
    chats
        .iter()
        .find(|chat| chat.id == arg || chat.id.starts_with(arg))
        .map(|chat| chat.id.clone())
}

/// Runs the shell until `quit` or end of input.
pub async fn run(studio: Arc<Mutex<StudioUseCase>>) -> Result<()> {
    let ticker = spawn_ticker(studio.clone());
    let chat_updates = studio.lock().await.subscribe_chats();
    let sidebar = spawn_sidebar(studio.clone(), chat_updates.clone());

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    {
        let mut guard = studio.lock().await;
        let palette = Palette::for_theme(guard.preferences().theme);
        println!("{}", "=== Tape ===".bright_magenta().bold());
        println!(
            "{}",
            palette.muted("Describe an object to generate it, '/help' for commands, 'quit' to exit.")
        );
        if let Some(notice) = guard.first_run_notice() {
            render::notice(&notice);
            guard.acknowledge_first_run_notice().await?;
        }
        println!();
    }

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let input = parse_input(&line);
                if input != Input::Empty {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match input {
                    Input::Empty => continue,
                    Input::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Input::Prompt(prompt) => {
                        println!("{}", "Generating...".bright_black());
                        let studio = studio.clone();
                        let prompt = prompt.to_string();
                        tokio::spawn(async move {
                            match submit_shared(&studio, &prompt).await {
                                Ok(notice) => render::notice(&notice),
                                Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                            }
                        });
                    }
                    Input::Command { name, args } => {
                        let mut guard = studio.lock().await;
                        if let Err(e) = run_command(&mut guard, name, &args, &chat_updates).await {
                            eprintln!("{}", format!("Error: {}", e).red());
                        }
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    ticker.abort();
    sidebar.abort();
    Ok(())
}

fn spawn_ticker(studio: Arc<Mutex<StudioUseCase>>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let started = Instant::now();
        let mut interval = tokio::time::interval(FRAME);
        loop {
            interval.tick().await;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            studio.lock().await.tick(elapsed_ms);
        }
    })
}

/// Waits for the next chat list change. `None` once the store is gone.
async fn next_chat_list(
    updates: &mut watch::Receiver<ChatListSnapshot>,
) -> Option<ChatListSnapshot> {
    updates.changed().await.ok()?;
    Some(updates.borrow_and_update().clone())
}

/// Re-renders the chat list after every chat store mutation.
fn spawn_sidebar(
    studio: Arc<Mutex<StudioUseCase>>,
    mut updates: watch::Receiver<ChatListSnapshot>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(snapshot) = next_chat_list(&mut updates).await {
            let theme = studio.lock().await.preferences().theme;
            render::chat_list(&Palette::for_theme(theme), &snapshot);
        }
    })
}

async fn run_command(
    studio: &mut StudioUseCase,
    name: &str,
    args: &[&str],
    chat_updates: &watch::Receiver<ChatListSnapshot>,
) -> Result<()> {
    let palette = Palette::for_theme(studio.preferences().theme);

    match name {
        "/new" => {
            studio.new_chat().await?;
            render::notice(&Notice::info("Started a new chat"));
        }
        "/chats" => render::chat_list(&palette, &chat_updates.borrow()),
        "/switch" => {
            let Some(id) = args.first().and_then(|arg| resolve_chat(studio, arg)) else {
                render::notice(&Notice::warning("Usage: /switch <n|id>"));
                return Ok(());
            };
            let shown = studio.switch_chat(&id).await?;
            println!(
                "{}",
                palette.muted(&format!(
                    "Switched to '{}'{}",
                    studio.current_chat().name,
                    if shown { " (object restored)" } else { "" }
                ))
            );
        }
        "/rename" => {
            let id = studio.current_chat().id.clone();
            studio.rename_chat(&id, &args.join(" ")).await?;
            println!(
                "{}",
                palette.muted(&format!("Renamed to '{}'", studio.current_chat().name))
            );
        }
        "/delete" => {
            let id = match args.first() {
                Some(arg) => resolve_chat(studio, arg),
                None => Some(studio.current_chat().id.clone()),
            };
            let Some(id) = id else {
                render::notice(&Notice::warning("No such chat"));
                return Ok(());
            };
            let text = match studio.delete_chat(&id).await? {
                DeleteOutcome::Removed => "Chat deleted".to_string(),
                DeleteOutcome::SwitchedTo(_) => {
                    format!("Chat deleted, now in '{}'", studio.current_chat().name)
                }
                DeleteOutcome::Recreated(_) => "Chat deleted, started a new one".to_string(),
            };
            render::notice(&Notice::info(text));
        }
        "/signup" => {
            if args.len() < 3 {
                render::notice(&Notice::warning("Usage: /signup <name> <email> <password>"));
                return Ok(());
            }
            let (name, credentials) = args.split_at(args.len() - 2);
            let notice = studio
                .sign_up(&name.join(" "), credentials[0], credentials[1])
                .await;
            render::notice(&notice);
        }
        "/signin" => {
            let [email, password] = args else {
                render::notice(&Notice::warning("Usage: /signin <email> <password>"));
                return Ok(());
            };
            let notice = studio.sign_in(email, password).await;
            render::notice(&notice);
        }
        "/signout" => render::notice(&studio.sign_out().await),
        "/whoami" => render::user(&palette, studio.current_user()),
        "/theme" => {
            let theme = studio.toggle_theme().await?;
            let palette = Palette::for_theme(theme);
            println!("{}", palette.accent(&format!("Theme: {}", theme)));
        }
        "/model" => match args.first() {
            Some(model) => render::notice(&studio.select_model(model).await?),
            None => {
                for model in SUPPORTED_MODELS {
                    let marker = if *model == studio.preferences().model {
                        "*"
                    } else {
                        " "
                    };
                    println!("{} {}", palette.accent(marker), palette.text(model));
                }
            }
        },
        "/scene" => render::scene(&palette, studio.scene()),
        "/history" => render::history(&palette, studio.current_chat()),
        "/help" => {
            for (command, help) in COMMANDS {
                println!("{:>10} {}", palette.accent(command), palette.muted(help));
            }
            println!("{:>10} {}", palette.accent("quit"), palette.muted("Exit"));
        }
        other => render::notice(&Notice::warning(format!("Unknown command {}", other))),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input(" quit "), Input::Quit);
        assert_eq!(parse_input("red cube"), Input::Prompt("red cube"));
        assert_eq!(
            parse_input("/rename  My   chat"),
            Input::Command {
                name: "/rename",
                args: vec!["My", "chat"]
            }
        );
    }

    #[test]
    fn test_helper_hints_command_suffix() {
        let helper = CliHelper::new();
        let history = rustyline::history::DefaultHistory::new();
        let ctx = Context::new(&history);
        assert_eq!(helper.hint("/sw", 3, &ctx), Some("itch".to_string()));
        assert_eq!(helper.hint("red", 3, &ctx), None);
    }

    #[tokio::test]
    async fn test_chat_list_follows_store_mutations() {
        let storage = Arc::new(tape_infrastructure::MemoryLocalStorage::new());
        let mut studio = tape_application::bootstrap(Default::default(), storage)
            .await
            .unwrap();
        let mut updates = studio.subscribe_chats();

        let id = studio.new_chat().await.unwrap();
        let snapshot = next_chat_list(&mut updates).await.unwrap();
        assert_eq!(snapshot.chats.len(), 2);
        assert_eq!(snapshot.current_id, id);

        studio.rename_chat(&id, "Robots").await.unwrap();
        let snapshot = next_chat_list(&mut updates).await.unwrap();
        assert_eq!(snapshot.chats[0].name, "Robots");

        drop(studio);
        assert_eq!(next_chat_list(&mut updates).await, None);
    }
}
