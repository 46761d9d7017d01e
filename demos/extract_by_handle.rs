use rand::seq::SliceRandom;
use rand::Rng;

use lst::{Handle, Lst};

/// A task with a deadline (the priority) and the slot `Lst` needs to find it
/// again without a linear scan.
#[derive(Debug, Clone)]
struct Task {
  id: u32,
  deadline: i64,
  slot: i64,
}

impl Task {
  fn new(id: u32, deadline: i64) -> Self {
    Task { id, deadline, slot: -1 }
  }
}

impl Handle for Task {
  fn slot(&self) -> i64 {
    self.slot
  }

  fn set_slot(&mut self, slot: i64) {
    self.slot = slot;
  }
}

/// Models cancelling a subset of scheduled tasks before they come due: insert
/// everything, pull a handful back out by handle (as if their owners
/// cancelled them), then drain the rest in deadline order.
fn main() {
  let mut rng = rand::thread_rng();
  let tasks: Vec<Task> = (0..2_000u32)
    .map(|id| Task::new(id, rng.gen_range(0..1_000_000)))
    .collect();
  let total = tasks.len();

  let mut queue: Lst<Task, _> = Lst::new(|a: &Task, b: &Task| a.deadline.cmp(&b.deadline));
  for task in tasks {
    queue.insert(task).expect("insert");
  }

  // `insert` stamps each resident element's slot in place but hands nothing
  // back, so a single pass over the queue is how a caller recovers working
  // handles for later `extract` calls.
  let mut handles: Vec<Task> = queue.iter().cloned().collect();
  handles.shuffle(&mut rng);
  let (cancelled, remaining) = handles.split_at(handles.len() / 10);

  for handle in cancelled {
    queue.extract(handle).expect("handle should still be resident");
  }
  println!("CANCELLED {} OF {} TASKS BY HANDLE", cancelled.len(), total);

  let mut prev_deadline: Option<i64> = None;
  let mut drained = 0usize;
  while let Some(task) = queue.pop() {
    if let Some(p) = prev_deadline {
      assert!(p <= task.deadline, "pop returned tasks out of deadline order!");
    }
    prev_deadline = Some(task.deadline);
    drained += 1;
  }
  println!("DRAINED REMAINING {} TASKS IN DEADLINE ORDER", drained);
  assert_eq!(drained, remaining.len());
}
