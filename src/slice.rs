use crate::pipeline::Pipeline;
use crate::Cursor;

/// Creates a pipeline over a borrowed slice.
///
/// Elements are yielded as `&T`, in place; nothing is cloned. The references
/// outlive the pipeline, so terminals like
/// [`first`](crate::Pipeline::first) and [`to_vec`](crate::Pipeline::to_vec)
/// hand back views into the original slice.
pub fn from_slice<T>(slice: &[T]) -> Pipeline<SliceCursor<'_, T>> {
    Pipeline::new(SliceCursor {
        remaining: slice,
        item: None,
    })
}

/// Creates a pipeline over `len` contiguous elements starting at `data`.
///
/// # Safety
///
/// `data` must be valid for reads of `len` initialized elements of `T` for
/// the caller-chosen lifetime of the pipeline, and the memory must not be
/// mutated while the pipeline or any reference it yielded is alive. The
/// same rules as [`std::slice::from_raw_parts`] apply.
pub unsafe fn from_raw_parts<'a, T>(data: *const T, len: usize) -> Pipeline<SliceCursor<'a, T>> {
    from_slice(std::slice::from_raw_parts(data, len))
}

/// A cursor over the elements of a slice.
///
/// This struct is created by the [`from_slice`] and [`from_raw_parts`]
/// functions. Elements are references, so reading the same position more
/// than once is permitted and hands out the same reference again.
#[derive(Debug)]
pub struct SliceCursor<'a, T> {
    remaining: &'a [T],
    item: Option<&'a T>,
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = &'a T;

    #[inline]
    fn advance(&mut self) -> bool {
        match self.remaining.split_first() {
            Some((head, tail)) => {
                self.remaining = tail;
                self.item = Some(head);
                true
            }
            None => {
                self.item = None;
                false
            }
        }
    }

    #[inline]
    fn current(&mut self) -> &'a T {
        self.item
            .expect("`current` called without a successful `advance`")
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), Some(self.remaining.len()))
    }
}

#[test]
fn test_from_slice() {
    let values = [4, 8, 15];
    let mut it = from_slice(&values).into_cursor();
    assert!(it.advance());
    assert!(std::ptr::eq(it.current(), &values[0]));
    assert!(it.advance());
    assert!(std::ptr::eq(it.current(), &values[1]));
    assert!(it.advance());
    assert!(std::ptr::eq(it.current(), &values[2]));
    assert!(!it.advance());
    assert!(!it.advance());
}

#[test]
fn test_repeated_reads_of_one_position() {
    let values = [5];
    let mut it = from_slice(&values).into_cursor();
    assert!(it.advance());
    assert!(std::ptr::eq(it.current(), it.current()));
    assert!(!it.advance());
}

#[test]
fn test_from_slice_empty() {
    let values: [i32; 0] = [];
    assert!(!from_slice(&values).has_any());
}

#[test]
fn test_from_slice_references_outlive_the_pipeline() {
    let values = vec![1, 2, 3];
    let refs = from_slice(&values).filter(|x| **x != 2).to_vec();
    assert_eq!(refs, [&1, &3]);
    assert!(std::ptr::eq(refs[0], &values[0]));
}

#[test]
fn test_from_raw_parts() {
    let values = vec![7, 11, 13];
    let total: i32 = unsafe { from_raw_parts(values.as_ptr(), values.len()) }
        .map(|x| *x)
        .into_iter()
        .sum();
    assert_eq!(total, 31);
}

#[test]
fn test_size_hint_shrinks_as_the_cursor_moves() {
    let values = [1, 2];
    let mut it = from_slice(&values).into_cursor();
    assert_eq!(it.size_hint(), (2, Some(2)));
    assert!(it.advance());
    assert_eq!(it.size_hint(), (1, Some(1)));
    assert!(it.advance());
    assert_eq!(it.size_hint(), (0, Some(0)));
}
