#[macro_use]
extern crate log;
extern crate mulligan;

use clap::{Parser, Subcommand};
use mulligan::store::TABLES;
use mulligan::{Config, Error, Store};

/// Manage and query the mulligan simulator result store
#[derive(Parser, Debug)]
#[command(name = "mulligan_db", version)]
struct Args {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create the tables
  Init {
    /// Drop existing tables first
    #[arg(long)]
    force: bool,
  },
  /// Show connection and table status
  Status,
  /// Exit with status 1 unless every table exists
  Check,
  /// Drop all tables
  Drop,
  /// List recent runs, newest first
  ListRuns {
    #[arg(short, long, default_value_t = 10)]
    limit: usize,
  },
  /// Show a run and its hands
  ShowRun { id: String },
  /// Show the tally for a run
  Stats { id: String },
  /// Delete a run and everything recorded with it
  DeleteRun { id: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let _ = env_logger::try_init();
  let args = Args::parse();
  let config = Config::from_env();
  info!("Using result store @ {:?}", config.database_path);
  let store = Store::open(&config.database_path)?;

  match args.command {
    Command::Init { force } => {
      store.init(force)?;
      println!("Database initialized @ {}", config.database_path.display());
    }
    Command::Status => {
      store.ping()?;
      println!("Database: {}", config.database_path.display());
      let status = store.schema_status()?;
      for table in TABLES.iter() {
        let mark = if status.missing.iter().any(|t| t == table) {
          "missing"
        } else {
          "ok"
        };
        println!("  {:<20} {}", table, mark);
      }
      if status.is_ready() {
        println!("All tables present");
      } else {
        println!("Missing tables, run `mulligan_db init`");
      }
    }
    Command::Check => {
      if !store.schema_status()?.is_ready() {
        println!("Database is not ready");
        std::process::exit(1);
      }
      println!("Database is ready");
    }
    Command::Drop => {
      store.drop_schema()?;
      println!("All tables dropped");
    }
    Command::ListRuns { limit } => {
      let runs = store.list_runs(limit)?;
      if runs.is_empty() {
        println!("No simulation runs found");
        return Ok(());
      }
      println!(
        "{:<36}  {:<26}  {:<30}  {:>5}  {}",
        "ID", "CREATED", "DECK", "HANDS", "USER"
      );
      for run in runs {
        println!(
          "{:<36}  {:<26}  {:<30}  {:>5}  {}",
          run.id,
          run.created_at,
          run.deck_name,
          run.total_hands,
          run.user_name.unwrap_or_default()
        );
      }
    }
    Command::ShowRun { id } => match store.get_run(&id)? {
      Some(detail) => {
        let run = &detail.summary;
        println!("Run: {}", run.id);
        println!("Created: {}", run.created_at);
        println!("Deck: {} ({})", run.deck_name, run.deck_source);
        println!("Hands: {}", run.total_hands);
        if let Some(user) = &run.user_name {
          println!("User: {}", user);
        }
        if let Some(notes) = &run.notes {
          println!("Notes: {}", notes);
        }
        println!("\nDeck list:");
        for card in &detail.deck_cards {
          println!("  {} {}", card.count, card.name);
        }
        println!("\nHands:");
        for hand in &detail.hands {
          println!(
            "  #{:<3} seed {:<7} {:<4} mulligan #{} ({} cards) {}",
            hand.hand_number,
            hand.seed,
            hand.play_or_draw,
            hand.mulligan_number,
            hand.cards_in_hand,
            hand.user_decision.as_str().to_uppercase()
          );
          println!("       {}", hand.cards.join(", "));
          if let Some(bottom) = &hand.cards_to_keep {
            println!("       bottom: {}", bottom.join(", "));
          }
        }
      }
      None => println!("{}", Error::RunNotFound(id)),
    },
    Command::Stats { id } => match store.get_stats(&id)? {
      Some(tally) => println!("{}", tally),
      None => println!("{}", Error::RunNotFound(id)),
    },
    Command::DeleteRun { id } => {
      if store.delete_run(&id)? {
        println!("Deleted simulation run {}", id);
      } else {
        println!("{}", Error::RunNotFound(id));
      }
    }
  }
  Ok(())
}
