#[macro_use]
extern crate log;
extern crate mulligan;

use clap::Parser;
use mulligan::operator::Console;
use mulligan::{Config, Error, Session, Store, Tiered};
use std::path::PathBuf;

/// Deal opening hands from a deck list and record keep/mulligan decisions
#[derive(Parser, Debug)]
#[command(name = "mulligan_simulator", version)]
struct Args {
  /// URL returning a plain text deck list (deck site pages are not parsed)
  #[arg(short, long, conflicts_with = "file")]
  url: Option<String>,

  /// Path to a deck list file
  #[arg(short, long)]
  file: Option<PathBuf>,

  /// Number of hands to simulate
  #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
  hands: u32,

  /// Write the results as JSON to this path
  #[arg(short, long)]
  save: Option<PathBuf>,

  /// Name stored with the run (defaults to "Deck YYYY-MM-DD HH:MM")
  #[arg(long)]
  deck_name: Option<String>,

  /// Do not save the run to the result store
  #[arg(long)]
  no_db: bool,

  /// User name stored with the run
  #[arg(long)]
  user: Option<String>,

  /// Notes stored with the run
  #[arg(long)]
  notes: Option<String>,

  /// Seed for a reproducible sequence of hands
  #[arg(long)]
  seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let _ = env_logger::try_init();
  let args = Args::parse();

  let deck_name = args
    .deck_name
    .clone()
    .unwrap_or_else(|| chrono::Local::now().format("Deck %Y-%m-%d %H:%M").to_string());

  let session = match (&args.url, &args.file) {
    (Some(url), _) => {
      info!("Loading deck list @ {}", url);
      Session::from_url(url, &deck_name)?
    }
    (None, Some(path)) => {
      info!("Loading deck list @ {:?}", path);
      Session::from_file(path, &deck_name)?
    }
    (None, None) => {
      eprintln!("Error: provide a deck list with --url or --file");
      return Ok(());
    }
  };
  let mut session = match args.seed {
    Some(seed) => session.with_seed(seed),
    None => session,
  };

  println!("Deck: {}", session.deck_name);
  println!("Source: {}", session.deck_source);
  println!("Cards: {}", session.deck.len());
  println!("Simulating {} hands", args.hands);

  let mut console = Console::stdio();
  match session.run(args.hands as usize, &Tiered, &mut console) {
    Ok(_) => {}
    Err(Error::InputClosed) => {
      warn!("Input closed after {} hands", session.results().len());
    }
    Err(e) => return Err(e.into()),
  }

  println!();
  println!("{}", "=".repeat(50));
  println!("SIMULATION SUMMARY");
  println!("{}", "=".repeat(50));
  println!("{}", session.tally());

  let mut store = if args.no_db {
    info!("Skipping result store (--no-db)");
    None
  } else {
    let config = Config::from_env();
    match Store::open(&config.database_path) {
      Ok(store) => Some(store),
      Err(e) => {
        warn!("Could not open result store {:?}: {}", config.database_path, e);
        eprintln!("Warning: results were not saved to the database: {}", e);
        None
      }
    }
  };
  let finished = session.finish(
    store.as_mut(),
    args.save.as_deref(),
    args.user.as_deref(),
    args.notes.as_deref(),
  );
  match finished.run {
    Some(Ok(id)) => println!("\nRun saved (id {})", id),
    Some(Err(e)) => eprintln!("Warning: results were not saved to the database: {}", e),
    None => {}
  }
  if let (Some(path), Some(export)) = (&args.save, finished.export) {
    match export {
      Ok(()) => println!("\nResults saved to {}", path.display()),
      Err(e) => eprintln!("Warning: could not write {}: {}", path.display(), e),
    }
  }

  Ok(())
}
