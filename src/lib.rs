//! Lazy, cursor-based query pipelines over in-memory sequences.
//!
//! A [`Pipeline`] is built from a source ([`from_slice`], [`from_seq`], or a
//! raw buffer via [`from_raw_parts`]), extended with stages (`filter`, `map`,
//! `flat_map`, `take`, `skip`, casts), and drained by a terminal operation
//! (`to_vec`, `for_each`, `any`, `all`, `first`, ...). Composition is free:
//! building a chain calls none of the supplied closures, allocates no
//! intermediate collections, and touches the source only once a terminal
//! starts pulling.
//!
//! ```
//! use cursory::from_slice;
//!
//! let words = ["xxx", "a", "bb"];
//! let lengths = from_slice(&words)
//!     .map(|w| w.len())
//!     .filter(|&len| len > 1)
//!     .to_vec();
//! assert_eq!(lengths, vec![3, 2]);
//! ```
//!
//! # Cursors
//!
//! Every source and every stage implements [`Cursor`], a pull protocol with
//! two operations: [`advance`](Cursor::advance) moves to the next element and
//! reports whether one exists, [`current`](Cursor::current) reads the element
//! at the current position. A stage wraps exactly one upstream cursor and is
//! itself a cursor, so chains of any depth stay a single object with no
//! buffering between stages.
//!
//! Elements flow by value. A pipeline rooted at a borrowed source has
//! `Item = &T`, so borrowed elements pass through `filter`, `take`, and
//! `skip` without being copied; `map` is the point where owned values enter
//! the chain.
//!
//! # Single pass, move only
//!
//! A pipeline enumerates its source once. Every chaining method and every
//! terminal operation takes the pipeline by value, so a consumed pipeline
//! cannot be touched again; there is no runtime "already used" flag because
//! ownership makes one unnecessary.
//!
//! # Concurrency and aliasing
//!
//! Pulling is synchronous and single-threaded. `advance` takes `&mut self`,
//! so two threads cannot pull one chain at the same time, and a pipeline
//! over a borrowed source keeps the source borrowed until it is dropped, so
//! the source cannot be mutated mid-iteration. Both rules are enforced by
//! the compiler rather than documented as caller obligations.
//!
//! # Errors
//!
//! [`first`](Pipeline::first) reports an empty sequence and the checked cast
//! reports an impossible conversion through [`Error`]; both surface at the
//! terminal call. Misusing the cursor protocol itself (reading `current`
//! without a successful `advance`) is a bug in the calling code and panics.

mod error;
mod pipeline;
mod slice;
mod sources;
mod stage;

pub use crate::error::{Error, Result};
pub use crate::pipeline::{IntoIter, Pipeline};
pub use crate::slice::{from_raw_parts, from_slice, SliceCursor};
pub use crate::sources::{
    empty, from_fn, from_seq, once, once_with, Empty, FromFn, Once, OnceWith, Seq,
};
pub use crate::stage::{Cast, Filter, FlatMap, Map, Skip, Take, TryCast};

/// A pull-based, single-pass cursor over a sequence of elements.
///
/// The protocol is two calls wide. [`advance`](Cursor::advance) moves the
/// cursor to the next element; [`current`](Cursor::current) reads the element
/// it landed on. A freshly created cursor sits before the first element, so
/// the first `advance` positions it there; nothing can be read until
/// `advance` has returned `true`.
///
/// Implementations must uphold two invariants:
///
/// - **Exhaustion is permanent.** Once `advance` has returned `false`, every
///   later call returns `false`.
/// - **One pull per step.** A stage calls upstream `advance` and `current`
///   at most once per upstream position; no element is re-read or skipped by
///   the machinery itself.
pub trait Cursor {
    /// The type of element this cursor yields.
    type Item;

    /// Moves to the next element.
    ///
    /// Returns `true` if an element is now available through `current`, and
    /// `false` once the sequence is exhausted. Exhaustion is permanent.
    fn advance(&mut self) -> bool;

    /// Returns the element at the current position.
    ///
    /// Valid only after a `true`-returning [`advance`](Cursor::advance), and
    /// at most once per such `advance`: cursors over owned storage move the
    /// element out. Sources whose elements are references tolerate repeated
    /// reads of one position and document it.
    ///
    /// # Panics
    ///
    /// Panics if no element is available: before the first `advance`, after
    /// `advance` returned `false`, or when re-reading a position whose
    /// element was already moved out.
    fn current(&mut self) -> Self::Item;

    /// Advisory bounds on the number of elements left, as
    /// `(lower, Some(upper))` or `(lower, None)` when no upper bound is
    /// known. Used to preallocate in [`Pipeline::to_vec`]; never trusted for
    /// correctness. The default of `(0, None)` is always valid.
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }

    /// Advances and, if an element is available, reads it.
    ///
    /// This is the sanctioned coupling of the two protocol calls, and the
    /// loop shape every terminal operation uses:
    ///
    /// ```
    /// use cursory::{from_seq, Cursor};
    ///
    /// let mut readings = from_seq(vec![12, 7, 31]).into_cursor();
    /// while let Some(reading) = readings.next() {
    ///     println!("reading: {reading}");
    /// }
    /// ```
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            Some(self.current())
        } else {
            None
        }
    }
}
