//! The pipeline driver.
//!
//! A [`Pipeline`] wraps a [`Cursor`] and offers two kinds of methods:
//! chaining methods, which wrap the cursor in a stage and return a new
//! pipeline, and terminal methods, which drive the chain and produce a
//! value. Every method takes `self`, so a pipeline describes exactly one
//! pass: chaining consumes the old handle and terminals consume the
//! pipeline outright.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::stage::{Cast, Filter, FlatMap, Map, Skip, Take, TryCast};
use crate::Cursor;

/// A lazy query over a sequence.
///
/// Nothing is computed while a pipeline is being built. Stages run only when
/// a terminal pulls, and only as far as that terminal needs: `first` on a
/// million-element chain evaluates one element, and `take(0)` evaluates
/// none.
///
/// Pipelines start at the entry points: [`from_seq`](crate::from_seq),
/// [`from_slice`](crate::from_slice),
/// [`from_raw_parts`](crate::from_raw_parts), [`empty`](crate::empty),
/// [`once`](crate::once), [`once_with`](crate::once_with) and
/// [`from_fn`](crate::from_fn).
#[derive(Debug)]
pub struct Pipeline<C> {
    cursor: C,
}

impl<C: Cursor> Pipeline<C> {
    /// Wraps a cursor in a pipeline.
    ///
    /// The entry points cover the common sources; `new` is the door for
    /// hand-written [`Cursor`] implementations.
    pub fn new(cursor: C) -> Pipeline<C> {
        Pipeline { cursor }
    }

    /// Unwraps the pipeline, returning the underlying cursor.
    ///
    /// Useful for driving the chain by hand with [`Cursor::advance`] and
    /// [`Cursor::current`].
    #[inline]
    pub fn into_cursor(self) -> C {
        self.cursor
    }

    /// Keeps only the elements satisfying `predicate`.
    ///
    /// The predicate inspects each candidate by reference; rejected elements
    /// are dropped without ever reaching downstream stages.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Pipeline<Filter<C, P>>
    where
        P: FnMut(&C::Item) -> bool,
    {
        Pipeline::new(Filter::new(self.cursor, predicate))
    }

    /// Transforms each element with `transform`.
    #[inline]
    pub fn map<F, U>(self, transform: F) -> Pipeline<Map<C, F>>
    where
        F: FnMut(C::Item) -> U,
    {
        Pipeline::new(Map::new(self.cursor, transform))
    }

    /// Maps each element to a sequence and flattens the results.
    ///
    /// Sub-sequences are drained in order, each one fully before the next
    /// outer element is touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursory::from_seq;
    ///
    /// let words = from_seq(vec!["lazy", "query"])
    ///     .flat_map(|word| word.chars().collect::<Vec<_>>())
    ///     .to_vec();
    ///
    /// assert_eq!(words.len(), 9);
    /// ```
    #[inline]
    pub fn flat_map<F, S>(self, transform: F) -> Pipeline<FlatMap<C, S, F>>
    where
        S: IntoIterator,
        F: FnMut(C::Item) -> S,
    {
        Pipeline::new(FlatMap::new(self.cursor, transform))
    }

    /// Passes through at most `count` elements.
    ///
    /// Upstream is advanced past exactly as many elements as are taken;
    /// `take(0)` never pulls at all.
    #[inline]
    pub fn take(self, count: usize) -> Pipeline<Take<C>> {
        Pipeline::new(Take::new(self.cursor, count))
    }

    /// Discards the first `count` elements.
    ///
    /// The prefix is consumed on the first pull and exactly once. Skipping
    /// past the end of the sequence yields an empty pipeline.
    #[inline]
    pub fn skip(self, count: usize) -> Pipeline<Skip<C>> {
        Pipeline::new(Skip::new(self.cursor, count))
    }

    /// Converts each element to `U` through its `Into` impl.
    ///
    /// The conversion is proven at compile time, so this stage cannot fail
    /// at run time. For conversions that can fail, see
    /// [`try_cast`](Pipeline::try_cast).
    #[inline]
    pub fn cast<U>(self) -> Pipeline<Cast<C, U>>
    where
        C::Item: Into<U>,
    {
        Pipeline::new(Cast::new(self.cursor))
    }

    /// Attempts to convert each element to `U` through its `TryInto` impl.
    ///
    /// Each element becomes a `Result<U, Error>`; a value `U` cannot
    /// represent becomes [`Error::InvalidCast`]. Drain the results with the
    /// fallible terminals [`try_to_vec`](Pipeline::try_to_vec),
    /// [`try_first`](Pipeline::try_first) and
    /// [`try_for_each`](Pipeline::try_for_each).
    #[inline]
    pub fn try_cast<U>(self) -> Pipeline<TryCast<C, U>>
    where
        C::Item: TryInto<U>,
    {
        Pipeline::new(TryCast::new(self.cursor))
    }

    /// Drives the pipeline to exhaustion, calling `f` on each element.
    pub fn for_each<F>(mut self, mut f: F)
    where
        F: FnMut(C::Item),
    {
        while self.cursor.advance() {
            f(self.cursor.current());
        }
    }

    /// Drives the pipeline to exhaustion, collecting the elements in order.
    pub fn to_vec(mut self) -> Vec<C::Item> {
        let mut out = Vec::with_capacity(self.cursor.size_hint().0);
        while self.cursor.advance() {
            out.push(self.cursor.current());
        }
        out
    }

    /// Drives the pipeline to exhaustion, collecting the distinct elements.
    ///
    /// Duplicates collapse per the element ordering. For hash sets or other
    /// collections, see [`collect_into`](Pipeline::collect_into).
    pub fn to_set(mut self) -> BTreeSet<C::Item>
    where
        C::Item: Ord,
    {
        let mut out = BTreeSet::new();
        while self.cursor.advance() {
            out.insert(self.cursor.current());
        }
        out
    }

    /// Drives the pipeline to exhaustion, appending the elements to `sink`.
    ///
    /// Works with any [`Extend`] collection and reuses the sink's existing
    /// allocation.
    pub fn collect_into<E>(self, sink: &mut E)
    where
        E: Extend<C::Item>,
    {
        sink.extend(self);
    }

    /// Counts the remaining elements.
    ///
    /// Elements are advanced past, never read, so counting does not require
    /// them to be usable values.
    pub fn count(mut self) -> usize {
        let mut n = 0;
        while self.cursor.advance() {
            n += 1;
        }
        n
    }

    /// Returns whether the pipeline has any element at all.
    ///
    /// Pulls at most once and never reads the element. To test elements
    /// against a condition, see [`any`](Pipeline::any).
    pub fn has_any(mut self) -> bool {
        self.cursor.advance()
    }

    /// Returns whether any element satisfies `predicate`.
    ///
    /// Short-circuits at the first match.
    pub fn any<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(C::Item) -> bool,
    {
        while self.cursor.advance() {
            if predicate(self.cursor.current()) {
                return true;
            }
        }
        false
    }

    /// Returns whether every element satisfies `predicate`.
    ///
    /// Short-circuits at the first counterexample; vacuously true on an
    /// empty pipeline.
    pub fn all<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(C::Item) -> bool,
    {
        while self.cursor.advance() {
            if !predicate(self.cursor.current()) {
                return false;
            }
        }
        true
    }

    /// Returns the first element.
    ///
    /// Exactly one element is evaluated, no matter how long the chain is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if the pipeline yields nothing.
    pub fn first(mut self) -> Result<C::Item> {
        self.cursor.next().ok_or(Error::EmptySequence)
    }

    /// Returns the first element, or `default` if the pipeline is empty.
    ///
    /// `default` is built eagerly; if constructing it is expensive, use
    /// [`first_or_else`](Pipeline::first_or_else).
    pub fn first_or(mut self, default: C::Item) -> C::Item {
        self.cursor.next().unwrap_or(default)
    }

    /// Returns the first element, or computes one from `default` if the
    /// pipeline is empty.
    ///
    /// `default` runs only in the empty case, so exactly one value is ever
    /// constructed.
    pub fn first_or_else<F>(mut self, default: F) -> C::Item
    where
        F: FnOnce() -> C::Item,
    {
        self.cursor.next().unwrap_or_else(default)
    }

    /// Returns the first element, or `Default::default()` if the pipeline
    /// is empty.
    pub fn first_or_default(mut self) -> C::Item
    where
        C::Item: Default,
    {
        self.cursor.next().unwrap_or_default()
    }
}

impl<C, U> Pipeline<C>
where
    C: Cursor<Item = Result<U>>,
{
    /// Drives a fallible pipeline to exhaustion, collecting the successful
    /// elements in order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; later elements are left
    /// unevaluated.
    pub fn try_to_vec(mut self) -> Result<Vec<U>> {
        let mut out = Vec::with_capacity(self.cursor.size_hint().0);
        while self.cursor.advance() {
            out.push(self.cursor.current()?);
        }
        Ok(out)
    }

    /// Returns the first element of a fallible pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if the pipeline yields nothing, or
    /// the first element's error if it failed to convert.
    pub fn try_first(mut self) -> Result<U> {
        self.cursor.next().ok_or(Error::EmptySequence)?
    }

    /// Drives a fallible pipeline to exhaustion, calling `f` on each
    /// successful element.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; `f` is not called for it or
    /// anything after it.
    pub fn try_for_each<F>(mut self, mut f: F) -> Result<()>
    where
        F: FnMut(U),
    {
        while self.cursor.advance() {
            f(self.cursor.current()?);
        }
        Ok(())
    }
}

/// A std iterator draining a pipeline.
///
/// This struct is created by the [`IntoIterator`] impl on [`Pipeline`].
#[derive(Debug)]
pub struct IntoIter<C> {
    cursor: C,
}

impl<C: Cursor> Iterator for IntoIter<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<C::Item> {
        self.cursor.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<C: Cursor> IntoIterator for Pipeline<C> {
    type Item = C::Item;
    type IntoIter = IntoIter<C>;

    /// Adapts the pipeline to the std [`Iterator`] protocol, for use with
    /// `for` loops and iterator consumers.
    #[inline]
    fn into_iter(self) -> IntoIter<C> {
        IntoIter {
            cursor: self.cursor,
        }
    }
}
