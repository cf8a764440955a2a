//! # Deck lists
//!
//! Parses plain text deck lists (the format exported by MTG Arena, MTGO and
//! most deck building sites) into a `Deck` of named card counts.
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
  pub cards: Vec<DeckCard>,
  pub card_count: usize,
}

/// DeckCard is a single deck list entry: a card name and how many copies the deck runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
  pub name: String,
  pub count: usize,
}

#[derive(Debug, Clone)]
pub struct DeckBuilder {
  pub cards: BTreeMap<String, usize>,
}

impl DeckBuilder {
  pub fn new() -> Self {
    Self {
      cards: BTreeMap::new(),
    }
  }

  pub fn insert_count(mut self, name: &str, count: usize) -> Self {
    let total_count = self.cards.entry(name.to_string()).or_insert(0);
    *total_count += count;
    Self { cards: self.cards }
  }

  pub fn build(self) -> Deck {
    let mut deck = Deck::new();
    let mut count = 0;
    // BTreeMap iteration keeps deck.cards sorted by name
    for (name, v) in self.cards {
      if v == 0 {
        continue;
      }
      deck.cards.push(DeckCard { name, count: v });
      count += v;
    }
    deck.card_count = count;
    deck
  }
}

impl Default for DeckBuilder {
  fn default() -> Self {
    Self::new()
  }
}

#[derive(Debug)]
pub struct DeckcodeError(pub String);

impl Deck {
  pub fn new() -> Self {
    Self {
      cards: Vec::with_capacity(20),
      card_count: 0,
    }
  }

  /// Returns every card name repeated by its count, in deck order
  pub fn flatten(&self) -> Vec<&str> {
    let mut result = Vec::with_capacity(self.card_count);
    for card_count in &self.cards {
      for _ in 0..card_count.count {
        result.push(card_count.name.as_str());
      }
    }
    result
  }

  pub fn card_count_from_name(&self, name: &str) -> Option<&DeckCard> {
    let name_lowercase = name.to_lowercase();
    self
      .cards
      .iter()
      .find(|cc| cc.name.to_lowercase() == name_lowercase)
  }

  pub fn len(&self) -> usize {
    self.card_count
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Reads and parses a deck list file. A missing file reads as an empty deck list.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let list = match std::fs::read_to_string(path) {
      Ok(list) => list,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        warn!("Deck list file {:?} does not exist", path);
        return Err(Error::EmptyDecklist);
      }
      Err(e) => return Err(e.into()),
    };
    Ok(Self::from_list(&list)?)
  }

  /// Downloads a deck list from `url` and parses the response body.
  /// The response must be a plain text deck list, not a deck site page.
  pub fn from_url(url: &str) -> Result<Self> {
    info!("Fetching {}", url);
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    Ok(Self::from_list(&body)?)
  }

  pub fn from_list(list: &str) -> std::result::Result<Self, DeckcodeError> {
    lazy_static! {
        static ref DECK_LINE_REGEX: Regex =
            Regex::new(r"^\s*(?P<amount>\d+)[xX]?\s+(?P<name>[^\(#\n\r]+?)(?:\s*\((?P<set>\w+)\)(?:\s+(?P<setnum>\S+))?)?\s*(?:#.*)?$")
                .expect("Failed to compile DECK_LINE_REGEX regex");
    }
    let mut builder = DeckBuilder::new();
    let mut seen_card = false;
    for line in list.trim().lines() {
      let trimmed = line.trim();
      let trimmed_lower = trimmed.to_lowercase();
      // An empty line divides the main board cards from the side board cards
      if trimmed.is_empty() {
        if seen_card {
          break;
        }
        continue;
      }
      // Ignore reserved words
      if trimmed_lower == "deck" || trimmed_lower == "commander" {
        continue;
      }
      if trimmed_lower == "sideboard" || trimmed_lower == "maybeboard" {
        break;
      }
      // Ignore line comments
      if trimmed.starts_with('#') || trimmed.starts_with("//") {
        continue;
      }
      let caps = DECK_LINE_REGEX
        .captures(trimmed)
        .ok_or_else(|| DeckcodeError(format!("Cannot regex capture deck list line: {}", line)))?;
      let amount = caps["amount"].parse::<usize>().map_err(|_| {
        DeckcodeError(format!(
          "Cannot parse usize card amount from deck list line: {}",
          line
        ))
      })?;
      let name = caps["name"].trim();
      if name.is_empty() {
        return Err(DeckcodeError(format!(
          "Cannot parse card name from deck list line: {}",
          line
        )));
      }
      builder = builder.insert_count(name, amount);
      seen_card = true;
    }
    Ok(builder.build())
  }
}

impl Default for Deck {
  fn default() -> Self {
    Self::new()
  }
}

#[macro_export]
macro_rules! decklist {
  ($list:expr) => {
    $crate::deck::Deck::from_list($list).unwrap_or_else(|_| panic!("Bad deck list"))
  };
}

#[cfg(test)]
mod tests {
  use crate::deck::*;

  #[test]
  fn burn_deck_80() {
    let code = "
4 Lightning Bolt
4 Goblin Guide
4 Monastery Swiftspear
4 Eidolon of the Great Revel
4 Lava Spike
4 Rift Bolt
4 Searing Blaze
4 Skullcrack
4 Lightning Helix
4 Boros Charm
4 Path to Exile
4 Arid Mesa
4 Scalding Tarn
4 Sacred Foundry
4 Mountain
4 Plains
4 Inspiring Vantage
4 Sunbaked Canyon
4 Fiery Islet
4 Horizon Canopy
";
    let deck = decklist!(code);
    assert_eq!(deck.len(), 80);
    assert_eq!(deck.cards.len(), 20);
    let flat = deck.flatten();
    assert_eq!(flat.len(), 80);
    assert_eq!(flat.iter().filter(|n| **n == "Lightning Bolt").count(), 4);
    assert_eq!(flat.iter().filter(|n| **n == "Mountain").count(), 4);
  }

  #[test]
  fn good_deckcode_with_sets() {
    let code = "
        4 Legion's Landing (XLN) 22
        4 Adanto Vanguard (XLN) 1
        2 Mountain (XLN) 272
        12 Plains (XLN) 263
        3 Find // Finality (GRN) 225
        ";
    let deck = decklist!(code);
    assert_eq!(deck.len(), 25);
    let card = deck.card_count_from_name("find // finality").unwrap();
    assert_eq!(card.name, "Find // Finality");
    assert_eq!(card.count, 3);
    assert_eq!(deck.card_count_from_name("Plains").unwrap().count, 12);
  }

  #[test]
  fn comments_and_reserved_words() {
    let code = "
        Deck
        # This is a comment
        4x Lightning Bolt
        // Lands
        20 Mountain # basics
        ";
    let deck = decklist!(code);
    assert_eq!(deck.len(), 24);
    assert_eq!(deck.card_count_from_name("Lightning Bolt").unwrap().count, 4);
  }

  #[test]
  fn sideboard_is_ignored() {
    let code = "
        4 Lightning Bolt
        4 Mountain

        3 Skullcrack
        2 Path to Exile
        ";
    let deck = decklist!(code);
    assert_eq!(deck.len(), 8);
    assert!(deck.card_count_from_name("Skullcrack").is_none());

    let code = "
        4 Lightning Bolt
        Sideboard
        3 Skullcrack
        ";
    let deck = decklist!(code);
    assert_eq!(deck.len(), 4);
  }

  #[test]
  fn duplicate_lines_merge() {
    let deck = decklist!("2 Opt\n2 Opt\n1 Island");
    assert_eq!(deck.cards.len(), 2);
    assert_eq!(deck.card_count_from_name("Opt").unwrap().count, 4);
    assert_eq!(deck.len(), 5);
  }

  #[test]
  fn good_deckcode_with_0_0() {
    let deck = decklist!("0 Island\n4 Opt");
    assert_eq!(deck.len(), 4);
    assert_eq!(deck.cards.len(), 1);
  }

  #[test]
  fn empty_and_whitespace_lists_are_empty() {
    assert!(decklist!("").is_empty());
    assert!(decklist!("   \n\t\n  ").is_empty());
    assert!(decklist!("# only a comment").is_empty());
  }

  #[test]
  #[should_panic]
  fn bad_deckcode_0() {
    // Missing the card amount
    let _deck = decklist!("Lightning Bolt");
  }

  #[test]
  fn missing_file_is_an_empty_decklist() {
    let dir = tempfile::tempdir().unwrap();
    let res = Deck::from_file(dir.path().join("nope.txt"));
    assert!(matches!(res, Err(Error::EmptyDecklist)));
  }

  #[test]
  fn from_file_reads_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("burn.txt");
    std::fs::write(&path, "4 Lightning Bolt\n4 Mountain\n").unwrap();
    let deck = Deck::from_file(&path).unwrap();
    assert_eq!(deck.len(), 8);
    assert_eq!(deck.card_count_from_name("mountain").map(|c| c.count), Some(4));
  }
}
