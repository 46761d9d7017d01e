use std::env;
use std::time::Instant;

use rand::Rng;

use lst::{Handle, Lst};

/// A record with a priority and the intrusive slot `Lst` needs. `slot` must
/// start at `-1` (the "never inserted" sentinel) before the first insert.
#[derive(Debug, Clone)]
struct Item {
  priority: i64,
  slot: i64,
}

impl Item {
  fn new(priority: i64) -> Self {
    Item { priority, slot: -1 }
  }
}

impl Handle for Item {
  fn slot(&self) -> i64 {
    self.slot
  }

  fn set_slot(&mut self, slot: i64) {
    self.slot = slot;
  }
}

fn main() {
  let args: Vec<String> = env::args().collect();
  let n: usize = if args.len() >= 2 {
    args[1].parse().expect("invalid element count")
  } else {
    100_000
  };

  let mut rng = rand::thread_rng();
  let items: Vec<Item> = (0..n).map(|_| Item::new(rng.gen_range(0..1_000_000_000))).collect();

  let mut queue: Lst<Item, _> = Lst::new(|a: &Item, b: &Item| a.priority.cmp(&b.priority));

  let insert_start = Instant::now();
  for item in items {
    queue.insert(item).expect("insert");
  }
  println!(
    "INSERTED {} ITEMS IN {:?}",
    queue.num_elements(),
    Instant::now() - insert_start
  );

  let pop_start = Instant::now();
  let mut prev: Option<i64> = None;
  let mut popped = 0usize;
  while let Some(item) = queue.pop() {
    if let Some(p) = prev {
      assert!(p <= item.priority, "pop returned elements out of order!");
    }
    prev = Some(item.priority);
    popped += 1;
  }
  println!("POPPED {} ITEMS IN SORTED ORDER IN {:?}", popped, Instant::now() - pop_start);
}
