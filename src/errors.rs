use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  OutOfMemory,
  AlreadyResident,
  NotResident,
  Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LstError {
  pub kind: ErrorKind,
  pub message: String,
}

impl LstError {
  pub fn new<S: AsRef<str>>(kind: ErrorKind, message: S) -> Self {
    LstError {
      kind,
      message: message.as_ref().to_string(),
    }
  }

  pub fn out_of_memory<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::OutOfMemory, message)
  }

  pub fn not_resident<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::NotResident, message)
  }

  pub fn empty<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::Empty, message)
  }
}

impl Display for LstError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "lst {:?} error: {}",
      self.kind,
      &self.message
    )
  }
}

impl Error for LstError {}

pub type LstResult<T> = Result<T, LstError>;

/// Returned by [`Lst::insert`](crate::Lst::insert) on failure. Unlike
/// [`LstError`], this carries the rejected value back to the caller —
/// insertion is the one operation where the value the caller handed in would
/// otherwise be lost, since the value is moved into the call.
#[derive(Debug)]
pub struct InsertError<T> {
  pub value: T,
  pub kind: ErrorKind,
}

impl<T> InsertError<T> {
  pub(crate) fn new(value: T, kind: ErrorKind) -> Self {
    InsertError { value, kind }
  }
}

impl<T: fmt::Debug> Display for InsertError<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "lst {:?} error: value not inserted", self.kind)
  }
}

impl<T: fmt::Debug> Error for InsertError<T> {}
