use rand::Rng;

use super::{drain_all, is_sorted_by_key, seeded_lst, Record};

/// B1: `pop` and `peek` on an empty LST return `None` without touching
/// `num_elements`.
#[test]
fn empty_queue_pops_and_peeks_to_none() {
  let mut lst = seeded_lst(10);
  assert!(lst.peek().is_none());
  assert!(lst.pop().is_none());
  assert_eq!(lst.num_elements(), 0);
}

/// B2: an insertion that forces `expand` preserves every element and every
/// element's handle, verified by enumerating afterward.
#[test]
fn expand_preserves_elements_and_handles() {
  let mut lst = seeded_lst(11);
  let initial_capacity = lst.capacity();
  for i in 0..initial_capacity as i64 {
    lst.insert(Record::new(i)).unwrap();
  }
  assert_eq!(lst.capacity(), initial_capacity);
  lst.insert(Record::new(initial_capacity as i64)).unwrap();
  assert!(lst.capacity() > initial_capacity);
  assert_eq!(lst.num_elements(), initial_capacity + 1);

  let mask = lst.capacity() as i64 - 1;
  for record in lst.iter() {
    assert_eq!(record.slot(), record.slot() & mask);
  }

  let popped = drain_all(&mut lst);
  assert_eq!(popped.len(), initial_capacity + 1);
  assert!(is_sorted_by_key(&popped));
}

/// B3: after removing every element, the queue reports empty and a fresh
/// insert still succeeds (the pivot stack and `idx` have been reset to a
/// sane baseline).
#[test]
fn fully_drained_queue_is_reusable() {
  let mut lst = seeded_lst(12);
  for i in 0..64i64 {
    lst.insert(Record::new(i)).unwrap();
  }
  drain_all(&mut lst);
  assert_eq!(lst.num_elements(), 0);
  assert!(lst.peek().is_none());

  for i in 0..64i64 {
    lst.insert(Record::new(i)).unwrap();
  }
  let popped = drain_all(&mut lst);
  assert_eq!(popped.len(), 64);
  assert!(is_sorted_by_key(&popped));
}

/// B4: insert a full capacity's worth, pop half, insert that half back plus
/// more, forcing a circular-adjacency reshuffle on the next `expand`. All
/// elements must stay retrievable in sorted order.
#[test]
fn capacity_boundary_reshuffle_keeps_order() {
  let mut rng = rand::thread_rng();
  let mut lst = seeded_lst(13);
  let capacity = lst.capacity();

  for _ in 0..capacity {
    lst.insert(Record::new(rng.gen_range(0..1_000_000_000))).unwrap();
  }
  for _ in 0..capacity / 2 {
    lst.pop();
  }
  for _ in 0..capacity {
    lst.insert(Record::new(rng.gen_range(0..1_000_000_000))).unwrap();
  }
  assert!(lst.capacity() > capacity);

  let popped = drain_all(&mut lst);
  assert_eq!(popped.len(), capacity / 2 + capacity);
  assert!(is_sorted_by_key(&popped));
}
