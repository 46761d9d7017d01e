use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{Handle, Lst};

mod boundary;

/// A minimal handle-carrying element used throughout these tests: an `i64`
/// key plus the slot field `Lst` needs. `slot` starts at `-1`, the sentinel
/// for "not resident in any queue".
#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
  key: i64,
  slot: i64,
}

impl Record {
  fn new(key: i64) -> Self {
    Record { key, slot: -1 }
  }
}

impl Handle for Record {
  fn slot(&self) -> i64 {
    self.slot
  }

  fn set_slot(&mut self, slot: i64) {
    self.slot = slot;
  }
}

fn by_key(a: &Record, b: &Record) -> Ordering {
  a.key.cmp(&b.key)
}

type RecordLst = Lst<Record, fn(&Record, &Record) -> Ordering, SmallRng>;

/// A deterministically-seeded queue, so a failing property test prints a
/// seed that reproduces it instead of a one-off flake.
fn seeded_lst(seed: u64) -> RecordLst {
  Lst::with_rng(by_key as fn(&Record, &Record) -> Ordering, SmallRng::seed_from_u64(seed))
}

fn seeded_lst_with_capacity(seed: u64, capacity: usize) -> RecordLst {
  let mut lst = seeded_lst(seed);
  while lst.capacity() < capacity {
    // with_rng always starts at the default initial capacity; grow it by
    // forcing inserts up to (and past) the target, then draining, so tests
    // that want a specific starting capacity don't need a dedicated
    // constructor just for this.
    lst.insert(Record::new(lst.capacity() as i64)).unwrap();
  }
  while lst.num_elements() > 0 {
    lst.pop();
  }
  lst
}

fn drain_all(lst: &mut RecordLst) -> Vec<Record> {
  let mut out = Vec::with_capacity(lst.num_elements());
  while let Some(r) = lst.pop() {
    out.push(r);
  }
  out
}

fn is_sorted_by_key(records: &[Record]) -> bool {
  records.windows(2).all(|w| w[0].key <= w[1].key)
}
