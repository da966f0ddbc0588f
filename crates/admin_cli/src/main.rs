use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, EngineError};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "expense_tracker_admin")]
#[command(about = "Admin utilities for the expense tracker (users, demo data)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./expense_tracker.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Entries(Entries),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register a user, prompting for the password.
    Register(UserRegisterArgs),
}

#[derive(Args, Debug)]
struct UserRegisterArgs {
    #[arg(long)]
    username: String,
}

#[derive(Args, Debug)]
struct Entries {
    #[command(subcommand)]
    command: EntriesCommand,
}

#[derive(Subcommand, Debug)]
enum EntriesCommand {
    /// Store random entries for a user.
    Seed(EntriesSeedArgs),
    /// Delete every entry of every user.
    Clear,
}

#[derive(Args, Debug)]
struct EntriesSeedArgs {
    /// Owner of the generated entries.
    #[arg(long)]
    user: String,
    #[arg(long, default_value_t = 10)]
    count: u32,
}

/// Keeps the terminal in raw mode until dropped.
struct RawTerminal;

impl RawTerminal {
    fn new() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Print `message` on a fresh line of stderr.
fn notice(message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut err = std::io::stderr();
    execute!(
        err,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(message),
        Print("\r\n")
    )?;
    Ok(())
}

/// Read a line from the terminal without echoing it.
fn read_hidden(label: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawTerminal::new()?;
    let mut err = std::io::stderr();
    execute!(err, cursor::MoveToColumn(0), Print(label))?;

    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => break,
            KeyCode::Esc => return Err("cancelled".into()),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err("interrupted".into());
            }
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => secret.push(ch),
            _ => {}
        }
    }

    execute!(err, Print("\r\n"))?;
    err.flush()?;
    Ok(secret)
}

/// Ask for a new password and its confirmation, three attempts at most.
fn ask_new_password() -> Result<String, Box<dyn Error + Send + Sync>> {
    for _ in 0..3 {
        let password = read_hidden("Password: ")?;
        if password.trim().is_empty() {
            notice("Password must not be blank.")?;
            continue;
        }
        if read_hidden("Confirm password: ")? == password {
            return Ok(password);
        }
        notice("Passwords do not match. Try again.")?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Register(args),
        }) => {
            if !engine.username_available(&args.username).await? {
                eprintln!("user already exists: {}", args.username);
                std::process::exit(1);
            }

            let password = ask_new_password()?;
            match engine.register_user(&args.username, &password).await {
                Ok(user) => println!("registered user: {} ({})", user.username, user.id),
                Err(EngineError::ExistingKey(name)) => {
                    eprintln!("user already exists: {name}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Entries(Entries {
            command: EntriesCommand::Seed(args),
        }) => {
            let user = match engine.user_by_username(&args.user).await {
                Ok(user) => user,
                Err(EngineError::KeyNotFound(_)) => {
                    eprintln!("user not found: {}", args.user);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };

            for _ in 0..args.count {
                let entry = engine.create_random_entry(user.id).await?;
                println!("{entry}");
            }
            println!("seeded {} entries for {}", args.count, user.username);
        }
        Command::Entries(Entries {
            command: EntriesCommand::Clear,
        }) => {
            let deleted = engine.clear_entries().await?;
            println!("deleted {deleted} entries");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_seed_with_default_count() {
        let cli = Cli::try_parse_from(["expense_tracker_admin", "entries", "seed", "--user", "alice"])
            .unwrap();
        match cli.command {
            Command::Entries(Entries {
                command: EntriesCommand::Seed(args),
            }) => {
                assert_eq!(args.user, "alice");
                assert_eq!(args.count, 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
