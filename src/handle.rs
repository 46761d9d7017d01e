/// An intrusive back-reference from a user record to its current slot inside
/// an [`Lst`](crate::Lst).
///
/// The original C implementation this crate is modeled on stores the slot
/// index inside each record at a caller-declared byte offset; the LST reads
/// and writes that field directly rather than doing an external lookup. In
/// Rust that projection is expressed as a trait instead of an offset, which
/// is why every element type stored in an [`Lst`](crate::Lst) must implement
/// `Handle`.
///
/// # The `-1` sentinel
///
/// A fresh record that has never been inserted (or one that was just popped
/// or extracted) must report a negative slot, conventionally `-1`. `Lst`
/// treats any nonnegative slot as "already resident in some `Lst`" and
/// rejects a second `insert` of such a value outright — there is no
/// identity check against what's physically stored, only this field. Reusing
/// a record across two different `Lst`s, or inserting it twice without first
/// letting it come back out via `pop`/`extract`, is a logic error the trait
/// contract rules out by construction.
pub trait Handle {
    /// The record's current physical slot, or a negative number if it is not
    /// resident in any `Lst`.
    fn slot(&self) -> i64;

    /// Overwrite the record's slot. Called by `Lst` alone; user code should
    /// never need to call this directly except to initialize a fresh record
    /// to `-1` before its first `insert`.
    fn set_slot(&mut self, slot: i64);
}
