use std::cell::Cell;
use std::collections::{BTreeSet, HashSet};
use std::ptr;

use cursory::{empty, from_fn, from_seq, from_slice, once, once_with, Cursor, Error};

struct Ticket {
    id: u32,
}

struct Meters(f64);

struct Feet(f64);

impl From<Meters> for Feet {
    fn from(m: Meters) -> Feet {
        Feet(m.0 * 3.28084)
    }
}

struct Reading {
    sensor: &'static str,
    value: f64,
}

#[test]
fn building_a_chain_does_no_work() {
    let touched = Cell::new(0);
    let pipeline = from_seq(1..=1000)
        .map(|x| {
            touched.set(touched.get() + 1);
            x * 2
        })
        .filter(|x| x % 3 == 0)
        .take(10);
    assert_eq!(touched.get(), 0);
    drop(pipeline);
    assert_eq!(touched.get(), 0);
}

#[test]
fn first_evaluates_exactly_one_element() {
    let evaluated = Cell::new(0);
    let head = from_seq(1..=1_000_000)
        .map(|x| {
            evaluated.set(evaluated.get() + 1);
            x * x
        })
        .first();
    assert_eq!(head, Ok(1));
    assert_eq!(evaluated.get(), 1);
}

#[test]
fn take_pulls_upstream_exactly_its_budget() {
    let pulls = Cell::new(0);
    let taken = from_fn(|| {
        pulls.set(pulls.get() + 1);
        Some(pulls.get())
    })
    .take(3)
    .to_vec();
    assert_eq!(taken, [1, 2, 3]);
    assert_eq!(pulls.get(), 3);
}

#[test]
fn skip_discards_without_reading() {
    let read = Cell::new(0);
    let kept = from_seq(1..=5)
        .map(|x| {
            read.set(read.get() + 1);
            x
        })
        .skip(3)
        .to_vec();
    assert_eq!(kept, [4, 5]);
    assert_eq!(read.get(), 2);
}

#[test]
fn filter_then_map_over_borrowed_data() {
    let words = ["sphinx", "of", "black", "quartz"];
    let lengths = from_slice(&words)
        .filter(|w| w.len() > 2)
        .map(|w| w.len())
        .to_vec();
    assert_eq!(lengths, [6, 5, 6]);
}

#[test]
fn chained_filters_compose() {
    let kept = from_seq(1..=20)
        .filter(|x| x % 2 == 0)
        .filter(|x| x % 3 == 0)
        .to_vec();
    assert_eq!(kept, [6, 12, 18]);
}

#[test]
fn filter_observes_without_consuming() {
    let kept = from_seq(vec![String::from("keep"), String::from("drop-me")])
        .filter(|s| !s.contains('-'))
        .to_vec();
    assert_eq!(kept, ["keep"]);
}

#[test]
fn flat_map_concatenates_in_order() {
    let flat = from_seq(vec![vec![1, 2], vec![], vec![3, 4, 5]])
        .flat_map(|v| v)
        .to_vec();
    assert_eq!(flat, [1, 2, 3, 4, 5]);
}

#[test]
fn flat_map_over_borrowed_outer_elements() {
    let rows = vec![vec![1, 2], vec![3]];
    let total: i32 = from_seq(&rows)
        .flat_map(|row| row)
        .map(|x| *x)
        .into_iter()
        .sum();
    assert_eq!(total, 6);
}

#[test]
fn take_and_skip_partition_a_sequence() {
    let head = from_seq(0..10).take(4).to_vec();
    let tail = from_seq(0..10).skip(4).to_vec();
    assert_eq!(head, [0, 1, 2, 3]);
    assert_eq!(tail, [4, 5, 6, 7, 8, 9]);
}

#[test]
fn take_beyond_the_end_yields_everything() {
    assert_eq!(from_seq(vec![1, 2]).take(10).to_vec(), [1, 2]);
}

#[test]
fn skip_zero_changes_nothing() {
    assert_eq!(from_seq(vec![1, 2]).skip(0).to_vec(), [1, 2]);
}

#[test]
fn cast_widens_every_element() {
    let wide = from_seq(vec![1u8, 2, 3]).cast::<u32>().to_vec();
    assert_eq!(wide, [1u32, 2, 3]);
}

#[test]
fn cast_uses_user_conversions() {
    let feet = from_seq(vec![Meters(1.0), Meters(2.0)])
        .cast::<Feet>()
        .map(|f| f.0)
        .to_vec();
    assert!((feet[0] - 3.28084).abs() < 1e-9);
    assert!((feet[1] - 6.56168).abs() < 1e-9);
}

#[test]
fn try_cast_collects_when_every_element_fits() {
    let narrow = from_seq(vec![1i64, 2, 3]).try_cast::<i8>().try_to_vec();
    assert_eq!(narrow, Ok(vec![1i8, 2, 3]));
}

#[test]
fn try_cast_reports_the_first_offending_element() {
    let result = from_seq(vec![1i64, i64::MAX, 2])
        .try_cast::<i8>()
        .try_to_vec();
    assert_eq!(
        result,
        Err(Error::InvalidCast {
            from: "i64",
            to: "i8",
        })
    );
}

#[test]
fn try_for_each_stops_at_the_first_error() {
    let mut seen = Vec::new();
    let result = from_seq(vec![1i64, 2, i64::MAX, 4])
        .try_cast::<i32>()
        .try_for_each(|x| seen.push(x));
    assert_eq!(
        result,
        Err(Error::InvalidCast {
            from: "i64",
            to: "i32",
        })
    );
    assert_eq!(seen, [1, 2]);
}

#[test]
fn try_first_distinguishes_empty_from_failed() {
    assert_eq!(
        from_seq(Vec::<i64>::new()).try_cast::<i32>().try_first(),
        Err(Error::EmptySequence)
    );
    assert_eq!(
        from_seq(vec![i64::MAX]).try_cast::<i32>().try_first(),
        Err(Error::InvalidCast {
            from: "i64",
            to: "i32",
        })
    );
    assert_eq!(from_seq(vec![41i64]).try_cast::<i32>().try_first(), Ok(41));
}

#[test]
fn first_returns_the_head() {
    assert_eq!(from_seq(vec![9, 8, 7]).first(), Ok(9));
}

#[test]
fn first_on_an_empty_pipeline_is_an_error() {
    assert_eq!(empty::<i32>().first(), Err(Error::EmptySequence));
    assert_eq!(
        from_seq(vec![1, 2]).filter(|_| false).first(),
        Err(Error::EmptySequence)
    );
}

#[test]
fn first_or_family_falls_back_only_when_empty() {
    assert_eq!(from_seq(vec![10, 11]).first_or(5), 10);
    assert_eq!(empty::<i32>().first_or(5), 5);
    assert_eq!(empty::<i32>().first_or_else(|| 6), 6);
    assert_eq!(empty::<String>().first_or_default(), "");
}

#[test]
fn first_or_keeps_reference_identity() {
    let values = vec![10, 20, 30];
    let fallback = 0;
    let found = from_slice(&values).filter(|x| **x > 15).first_or(&fallback);
    assert!(ptr::eq(found, &values[1]));
    let missed = from_slice(&values).filter(|x| **x > 95).first_or(&fallback);
    assert!(ptr::eq(missed, &fallback));
}

#[test]
fn fallback_construction_happens_at_most_once() {
    let built = Cell::new(0);
    let hit = from_seq(vec![5]).first_or_else(|| {
        built.set(built.get() + 1);
        0
    });
    assert_eq!(hit, 5);
    assert_eq!(built.get(), 0);

    let missed = from_seq(Vec::<i32>::new()).first_or_else(|| {
        built.set(built.get() + 1);
        0
    });
    assert_eq!(missed, 0);
    assert_eq!(built.get(), 1);
}

#[test]
fn any_short_circuits_at_the_first_match() {
    let evaluated = Cell::new(0);
    let found = from_seq(1..=100)
        .map(|x| {
            evaluated.set(evaluated.get() + 1);
            x
        })
        .any(|x| x >= 3);
    assert!(found);
    assert_eq!(evaluated.get(), 3);
}

#[test]
fn all_short_circuits_at_the_first_counterexample() {
    let evaluated = Cell::new(0);
    let ok = from_seq(1..=100)
        .map(|x| {
            evaluated.set(evaluated.get() + 1);
            x
        })
        .all(|x| x < 4);
    assert!(!ok);
    assert_eq!(evaluated.get(), 4);
}

#[test]
fn predicates_on_an_empty_pipeline() {
    assert!(empty::<i32>().all(|_| false));
    assert!(!empty::<i32>().any(|_| true));
}

#[test]
fn any_and_all_over_short_words() {
    assert!(from_seq(vec!["a", "bb"]).any(|w| w.len() > 1));
    assert!(!from_seq(vec!["a", "bb"]).all(|w| w.len() > 1));
}

#[test]
fn has_any_matches_emptiness() {
    assert!(from_seq(vec![1]).has_any());
    assert!(!from_seq(Vec::<i32>::new()).has_any());
    assert!(!empty::<String>().has_any());
}

#[test]
fn count_after_stages() {
    assert_eq!(from_seq(1..=10).filter(|x| x % 2 == 1).count(), 5);
    assert_eq!(empty::<u8>().count(), 0);
}

#[test]
fn to_set_deduplicates_in_order() {
    let distinct = from_seq(vec![3, 1, 3, 2, 1]).to_set();
    assert_eq!(distinct, BTreeSet::from([1, 2, 3]));
    assert_eq!(distinct.into_iter().collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn collect_into_fills_a_hash_set() {
    let mut sink = HashSet::new();
    from_seq(vec![2, 2, 7, 7, 7]).collect_into(&mut sink);
    assert_eq!(sink, HashSet::from([2, 7]));
}

#[test]
fn for_each_visits_in_order() {
    let mut log = Vec::new();
    from_seq(vec!["a", "b", "c"]).for_each(|s| log.push(s));
    assert_eq!(log, ["a", "b", "c"]);
}

#[test]
fn collect_into_appends_to_an_existing_collection() {
    let mut sink = vec![0];
    from_seq(vec![1, 2]).collect_into(&mut sink);
    from_seq(vec![3]).collect_into(&mut sink);
    assert_eq!(sink, [0, 1, 2, 3]);
}

#[test]
fn pipelines_drive_std_iterator_consumers() {
    let sum: i32 = from_seq(vec![1, 2, 3, 4])
        .filter(|x| x % 2 == 0)
        .into_iter()
        .sum();
    assert_eq!(sum, 6);
    assert_eq!(from_seq(vec![3, 9, 2]).into_iter().max(), Some(9));
}

#[test]
fn elements_move_through_without_clone() {
    let tickets = vec![Ticket { id: 1 }, Ticket { id: 2 }, Ticket { id: 3 }];
    let ids = from_seq(tickets)
        .filter(|t| t.id != 2)
        .map(|t| t.id)
        .to_vec();
    assert_eq!(ids, [1, 3]);
}

#[test]
fn exhaustion_is_permanent_through_every_stage() {
    let mut it = from_seq(vec![1, 2, 3, 4])
        .filter(|x| x % 2 == 0)
        .map(|x| x * 10)
        .take(5)
        .skip(1)
        .into_cursor();
    assert!(it.advance());
    assert_eq!(it.current(), 40);
    for _ in 0..3 {
        assert!(!it.advance());
    }
}

#[test]
fn sources_beyond_vec_and_slice() {
    let deque: std::collections::VecDeque<i32> = (1..=3).collect();
    assert_eq!(from_seq(deque).to_vec(), [1, 2, 3]);
    assert_eq!(from_seq("xyz".chars()).first_or('?'), 'x');
    assert_eq!(from_seq("".chars()).first_or('?'), '?');
}

#[test]
fn single_element_sources_feed_chains() {
    assert_eq!(once(21).map(|x| x * 2).to_vec(), [42]);
    assert_eq!(once_with(|| String::from("hi")).first(), Ok(String::from("hi")));
    let mut n = 0;
    let squares = from_fn(move || {
        n += 1;
        if n <= 4 {
            Some(n * n)
        } else {
            None
        }
    })
    .to_vec();
    assert_eq!(squares, [1, 4, 9, 16]);
}

#[test]
fn errors_render_readable_messages() {
    assert_eq!(
        Error::EmptySequence.to_string(),
        "sequence contains no elements"
    );
    let err = from_seq(vec![i64::MAX])
        .try_cast::<i32>()
        .try_first()
        .unwrap_err();
    assert_eq!(err.to_string(), "cannot cast `i64` to `i32`");
}

#[test]
fn realistic_query_over_records() {
    let readings = vec![
        Reading { sensor: "a", value: 0.3 },
        Reading { sensor: "b", value: 9.1 },
        Reading { sensor: "a", value: 4.8 },
        Reading { sensor: "c", value: 7.2 },
        Reading { sensor: "b", value: 5.5 },
    ];
    let loud: Vec<&'static str> = from_seq(&readings)
        .filter(|r| r.value > 4.0)
        .map(|r| r.sensor)
        .skip(1)
        .take(2)
        .to_vec();
    assert_eq!(loud, ["a", "c"]);
}
