//! Entry points building pipelines from values.

use std::iter;
use std::marker::PhantomData;

use crate::pipeline::Pipeline;
use crate::Cursor;

/// Creates a pipeline over the elements of an ordinary sequence.
///
/// Anything `IntoIterator` works. An owned container gives up its elements
/// by value; a borrowed container yields references to the elements in
/// place.
///
/// ```
/// use cursory::from_seq;
///
/// let scores = vec![62, 94, 88];
/// let passing = from_seq(&scores).filter(|s| **s >= 75).count();
/// assert_eq!(passing, 2);
/// ```
#[inline]
pub fn from_seq<I>(seq: I) -> Pipeline<Seq<I::IntoIter>>
where
    I: IntoIterator,
{
    Pipeline::new(Seq::new(seq.into_iter()))
}

/// Creates a pipeline that yields no elements.
#[inline]
pub fn empty<T>() -> Pipeline<Empty<T>> {
    Pipeline::new(Empty {
        phantom: PhantomData,
    })
}

/// Creates a pipeline that pulls elements from a function call.
///
/// The generator is called once per pull until it returns `None`; after
/// that the pipeline stays exhausted and the generator is not called again.
#[inline]
pub fn from_fn<T, F: FnMut() -> Option<T>>(generator: F) -> Pipeline<FromFn<T, F>> {
    Pipeline::new(FromFn {
        generator,
        item: None,
        done: false,
    })
}

/// Creates a pipeline that yields exactly one element.
#[inline]
pub fn once<T>(item: T) -> Pipeline<Once<T>> {
    Pipeline::new(Once {
        first: true,
        item: Some(item),
    })
}

/// Creates a pipeline that yields exactly one element from a function call.
///
/// The function runs at the pull, not at construction, and only if the
/// element is actually pulled.
#[inline]
pub fn once_with<T, F: FnOnce() -> T>(make: F) -> Pipeline<OnceWith<T, F>> {
    Pipeline::new(OnceWith {
        make: Some(make),
        item: None,
    })
}

/// A cursor over the elements of an ordinary iterator.
///
/// This struct is created by [`from_seq`].
#[derive(Debug)]
pub struct Seq<I>
where
    I: Iterator,
{
    iter: iter::Fuse<I>,
    item: Option<I::Item>,
}

impl<I> Seq<I>
where
    I: Iterator,
{
    pub(crate) fn new(iter: I) -> Seq<I> {
        Seq {
            iter: iter.fuse(),
            item: None,
        }
    }
}

impl<I> Cursor for Seq<I>
where
    I: Iterator,
{
    type Item = I::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        self.item = self.iter.next();
        self.item.is_some()
    }

    #[inline]
    fn current(&mut self) -> I::Item {
        self.item
            .take()
            .expect("`current` called without a successful `advance`")
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// A cursor that yields no elements.
///
/// This struct is created by [`empty`].
#[derive(Debug)]
pub struct Empty<T> {
    phantom: PhantomData<T>,
}

impl<T> Cursor for Empty<T> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> bool {
        false
    }

    #[inline]
    fn current(&mut self) -> T {
        panic!("`current` called without a successful `advance`")
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(0))
    }
}

/// A cursor that pulls elements from a function call.
///
/// This struct is created by [`from_fn`].
#[derive(Debug)]
pub struct FromFn<T, F> {
    generator: F,
    item: Option<T>,
    done: bool,
}

impl<T, F: FnMut() -> Option<T>> Cursor for FromFn<T, F> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.item = (self.generator)();
        self.done = self.item.is_none();
        !self.done
    }

    #[inline]
    fn current(&mut self) -> T {
        self.item
            .take()
            .expect("`current` called without a successful `advance`")
    }
}

/// A cursor that yields exactly one element.
///
/// This struct is created by [`once`].
#[derive(Debug)]
pub struct Once<T> {
    first: bool,
    item: Option<T>,
}

impl<T> Cursor for Once<T> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.first {
            self.first = false;
            true
        } else {
            self.item = None;
            false
        }
    }

    #[inline]
    fn current(&mut self) -> T {
        self.item
            .take()
            .expect("`current` called without a successful `advance`")
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first as usize;
        (len, Some(len))
    }
}

/// A cursor that yields exactly one element from a function call.
///
/// This struct is created by [`once_with`].
#[derive(Debug)]
pub struct OnceWith<T, F> {
    make: Option<F>,
    item: Option<T>,
}

impl<T, F: FnOnce() -> T> Cursor for OnceWith<T, F> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> bool {
        self.item = self.make.take().map(|make| make());
        self.item.is_some()
    }

    #[inline]
    fn current(&mut self) -> T {
        self.item
            .take()
            .expect("`current` called without a successful `advance`")
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.make.is_some() as usize;
        (len, Some(len))
    }
}
