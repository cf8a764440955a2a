#[macro_use]
extern crate criterion;
#[macro_use]
extern crate mulligan;

use criterion::Criterion;
use mulligan::hand::Hand;
use mulligan::mulligan::Tiered;

fn criterion_function(c: &mut Criterion) {
  let deck = decklist!(
    "
4 Lightning Bolt
4 Goblin Guide
4 Monastery Swiftspear
4 Eidolon of the Great Revel
4 Lava Spike
4 Rift Bolt
4 Skullcrack
4 Lightning Helix
4 Boros Charm
4 Arid Mesa
4 Sacred Foundry
4 Inspiring Vantage
8 Mountain
"
  );
  c.bench_function_over_inputs(
    "draw_hand",
    move |b, hands| {
      let tokens = deck.flatten();
      b.iter(|| {
        (1..=**hands as u32)
          .map(|seed| Hand::from_seed(&Tiered, &tokens, seed).land_count())
          .sum::<usize>()
      })
    },
    &[100, 1000],
  );
}

criterion_group!(benches, criterion_function);
criterion_main!(benches);
