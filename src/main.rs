use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use serde::Serialize;
use std::path::PathBuf;

use twilight::types::EntryInclude;
use twilight::{Config, TokenStore, Twilight};

#[derive(Parser, Debug)]
#[command(name = "twilight")]
#[command(about = "Command-line client for the Twilight mood journal")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/twilight/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Use the built-in demo backend instead of a server
  #[arg(long)]
  mock: bool,

  /// API base URL, overriding the config file
  #[arg(long)]
  base_url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Log in with username and password and save the token
  Login { username: String, password: String },
  /// Forget the saved token
  Logout,
  /// List journal entries, newest first
  Moods,
  /// List goals
  Goals,
  /// Show overall statistics
  Stats,
  /// Show the current and best streak
  Streak,
  /// GET any endpoint and print the JSON response
  Get { endpoint: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let mut config = Config::load(args.config.as_deref())?;
  if args.mock {
    config.api.mock = true;
  }
  if let Some(base_url) = args.base_url {
    config.api.base_url = Some(base_url);
  }

  let _guard = twilight::logging::init(&config.log.level, config.log.file.as_deref())?;

  let store = TokenStore::default_location();
  if config.token.is_none() {
    if let Some(store) = &store {
      config.token = store.load()?;
    }
  }

  let twilight = Twilight::new(config.build_client()?);

  match args.command {
    Command::Login { username, password } => {
      let auth = twilight.auth().login(&username, &password).await?;
      let store = store.ok_or_else(|| eyre!("No data directory to save the token in"))?;
      store.save(&auth.token)?;
      println!("Logged in, token saved to {}", store.path().display());
    }
    Command::Logout => {
      if let Some(store) = store {
        store.clear()?;
      }
      twilight.clear_auth_token();
      println!("Logged out");
    }
    Command::Moods => {
      let entries = twilight
        .moods()
        .entries(&[EntryInclude::Selections, EntryInclude::Media])
        .await?;
      print_json(&entries)?;
    }
    Command::Goals => print_json(&twilight.goals().goals().await?)?,
    Command::Stats => print_json(&twilight.statistics().statistics().await?)?,
    Command::Streak => print_json(&twilight.statistics().current_streak().await?)?,
    Command::Get { endpoint } => {
      let value: serde_json::Value = twilight.client().get(&endpoint).await?;
      print_json(&value)?;
    }
  }

  Ok(())
}
