//! Stage combinators.
//!
//! Each stage owns exactly one upstream [`Cursor`] (plus, for [`FlatMap`], at
//! most one inner cursor derived from the current outer element) and is
//! itself a cursor, so stages chain to any depth without materializing
//! anything in between. Construction stores state and nothing else; work
//! happens only when a terminal operation pulls.

use std::any::type_name;
use std::marker::PhantomData;

use crate::error::Error;
use crate::sources::Seq;
use crate::Cursor;

/// A cursor yielding the upstream elements that satisfy a predicate.
///
/// This struct is created by [`Pipeline::filter`](crate::Pipeline::filter).
pub struct Filter<C: Cursor, P> {
    upstream: C,
    predicate: P,
    // Accepted element, parked until `current` claims it.
    item: Option<C::Item>,
}

impl<C: Cursor, P> Filter<C, P> {
    pub(crate) fn new(upstream: C, predicate: P) -> Filter<C, P> {
        Filter {
            upstream,
            predicate,
            item: None,
        }
    }
}

impl<C, P> Cursor for Filter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        self.item = None;
        while self.upstream.advance() {
            let item = self.upstream.current();
            if (self.predicate)(&item) {
                self.item = Some(item);
                return true;
            }
        }
        false
    }

    #[inline]
    fn current(&mut self) -> C::Item {
        self.item
            .take()
            .expect("`current` called without a successful `advance`")
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

/// A cursor applying a transformation to each upstream element.
///
/// This struct is created by [`Pipeline::map`](crate::Pipeline::map). The
/// transformation runs at read time, once per element a terminal actually
/// consumes.
pub struct Map<C, F> {
    upstream: C,
    transform: F,
}

impl<C, F> Map<C, F> {
    pub(crate) fn new(upstream: C, transform: F) -> Map<C, F> {
        Map { upstream, transform }
    }
}

impl<C, F, U> Cursor for Map<C, F>
where
    C: Cursor,
    F: FnMut(C::Item) -> U,
{
    type Item = U;

    #[inline]
    fn advance(&mut self) -> bool {
        self.upstream.advance()
    }

    #[inline]
    fn current(&mut self) -> U {
        (self.transform)(self.upstream.current())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

/// A cursor flattening a sub-sequence out of each upstream element.
///
/// This struct is created by
/// [`Pipeline::flat_map`](crate::Pipeline::flat_map). Order is outer-major:
/// each materialized sub-sequence drains fully before the outer cursor moves
/// on, and an outer element whose sub-sequence is empty contributes nothing.
pub struct FlatMap<C, S: IntoIterator, F> {
    outer: C,
    transform: F,
    inner: Option<Seq<S::IntoIter>>,
}

impl<C, S: IntoIterator, F> FlatMap<C, S, F> {
    pub(crate) fn new(outer: C, transform: F) -> FlatMap<C, S, F> {
        FlatMap {
            outer,
            transform,
            inner: None,
        }
    }
}

impl<C, S, F> Cursor for FlatMap<C, S, F>
where
    C: Cursor,
    S: IntoIterator,
    F: FnMut(C::Item) -> S,
{
    type Item = S::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        if let Some(inner) = &mut self.inner {
            if inner.advance() {
                return true;
            }
        }
        while self.outer.advance() {
            let mut inner = Seq::new((self.transform)(self.outer.current()).into_iter());
            if inner.advance() {
                self.inner = Some(inner);
                return true;
            }
        }
        false
    }

    #[inline]
    fn current(&mut self) -> S::Item {
        self.inner
            .as_mut()
            .expect("`current` called without a successful `advance`")
            .current()
    }
}

/// A cursor yielding at most a fixed number of upstream elements.
///
/// This struct is created by [`Pipeline::take`](crate::Pipeline::take). Once
/// the budget reaches zero the upstream is never pulled again, so upstream is
/// advanced past exactly as many elements as are yielded.
#[derive(Debug)]
pub struct Take<C> {
    upstream: C,
    remaining: usize,
}

impl<C> Take<C> {
    pub(crate) fn new(upstream: C, count: usize) -> Take<C> {
        Take {
            upstream,
            remaining: count,
        }
    }
}

impl<C: Cursor> Cursor for Take<C> {
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.upstream.advance()
    }

    #[inline]
    fn current(&mut self) -> C::Item {
        self.upstream.current()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.upstream.size_hint();
        let upper = match upper {
            Some(upper) => upper.min(self.remaining),
            None => self.remaining,
        };
        (lower.min(self.remaining), Some(upper))
    }
}

/// A cursor dropping a fixed number of leading upstream elements.
///
/// This struct is created by [`Pipeline::skip`](crate::Pipeline::skip). The
/// prefix is consumed on the first `advance` and exactly once; skipped
/// elements are advanced past without ever being read.
#[derive(Debug)]
pub struct Skip<C> {
    upstream: C,
    remaining: usize,
}

impl<C> Skip<C> {
    pub(crate) fn new(upstream: C, count: usize) -> Skip<C> {
        Skip {
            upstream,
            remaining: count,
        }
    }
}

impl<C: Cursor> Cursor for Skip<C> {
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        while self.remaining > 0 {
            self.remaining -= 1;
            if !self.upstream.advance() {
                self.remaining = 0;
                return false;
            }
        }
        self.upstream.advance()
    }

    #[inline]
    fn current(&mut self) -> C::Item {
        self.upstream.current()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.upstream.size_hint();
        (
            lower.saturating_sub(self.remaining),
            upper.map(|upper| upper.saturating_sub(self.remaining)),
        )
    }
}

/// A cursor converting each upstream element into another type.
///
/// This struct is created by [`Pipeline::cast`](crate::Pipeline::cast). The
/// `Into` bound discharges the conversion at compile time, so the stage is
/// total.
#[derive(Debug)]
pub struct Cast<C, U> {
    upstream: C,
    _target: PhantomData<U>,
}

impl<C, U> Cast<C, U> {
    pub(crate) fn new(upstream: C) -> Cast<C, U> {
        Cast {
            upstream,
            _target: PhantomData,
        }
    }
}

impl<C, U> Cursor for Cast<C, U>
where
    C: Cursor,
    C::Item: Into<U>,
{
    type Item = U;

    #[inline]
    fn advance(&mut self) -> bool {
        self.upstream.advance()
    }

    #[inline]
    fn current(&mut self) -> U {
        self.upstream.current().into()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

/// A cursor attempting to convert each upstream element, yielding
/// `Result<U, Error>`.
///
/// This struct is created by [`Pipeline::try_cast`](crate::Pipeline::try_cast).
/// A value the target type cannot represent becomes
/// [`Error::InvalidCast`] naming both types; the error rides the chain as an
/// element until a fallible terminal returns it.
#[derive(Debug)]
pub struct TryCast<C, U> {
    upstream: C,
    _target: PhantomData<U>,
}

impl<C, U> TryCast<C, U> {
    pub(crate) fn new(upstream: C) -> TryCast<C, U> {
        TryCast {
            upstream,
            _target: PhantomData,
        }
    }
}

impl<C, U> Cursor for TryCast<C, U>
where
    C: Cursor,
    C::Item: TryInto<U>,
{
    type Item = Result<U, Error>;

    #[inline]
    fn advance(&mut self) -> bool {
        self.upstream.advance()
    }

    #[inline]
    fn current(&mut self) -> Result<U, Error> {
        self.upstream.current().try_into().map_err(|_| Error::InvalidCast {
            from: type_name::<C::Item>(),
            to: type_name::<U>(),
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}
