//! Drives the exported C functions the way a C caller would.

use std::ffi::c_void;

use dynarr_ffi::array::{
    dynarr_append, dynarr_capacity_get, dynarr_create, dynarr_free, dynarr_get, dynarr_len,
    dynarr_len_get, dynarr_pop, dynarr_set,
};
use dynarr_ffi::DynarrStatus;

const OK: i32 = DynarrStatus::Ok as i32;

fn ptr<T>(v: &T) -> *const c_void {
    (v as *const T).cast()
}

fn ptr_mut<T>(v: &mut T) -> *mut c_void {
    (v as *mut T).cast()
}

#[test]
fn exercise_scenario_over_the_c_abi() {
    let mut h = 0u64;
    assert_eq!(dynarr_create(std::mem::size_of::<i32>(), &mut h), OK);
    assert_eq!(dynarr_len(h), 0);

    for v in [10i32, 20, 30, 40] {
        assert_eq!(dynarr_append(h, ptr(&v)), OK);
    }
    let mut out = 0i32;
    assert_eq!(
        dynarr_get(h, 4, ptr_mut(&mut out)),
        DynarrStatus::OutOfBounds as i32
    );
    assert_eq!(dynarr_len(h), 4);

    assert_eq!(dynarr_set(h, 2, ptr(&50i32)), OK);
    assert_eq!(dynarr_pop(h), OK);
    let mut len = 0usize;
    assert_eq!(dynarr_len_get(h, &mut len), OK);
    assert_eq!(len, 3);
    for (i, expected) in [10, 20, 50].into_iter().enumerate() {
        assert_eq!(dynarr_get(h, i, ptr_mut(&mut out)), OK);
        assert_eq!(out, expected);
    }

    for i in 0..124i32 {
        assert_eq!(dynarr_append(h, ptr(&i)), OK);
    }
    assert_eq!(dynarr_len(h), 127);
    for _ in 0..96 {
        assert_eq!(dynarr_pop(h), OK);
    }
    assert_eq!(dynarr_len(h), 31);
    let mut cap = 0usize;
    assert_eq!(dynarr_capacity_get(h, &mut cap), OK);
    assert_eq!(cap, 64);

    assert_eq!(dynarr_free(h), OK);
    assert_eq!(dynarr_free(h), DynarrStatus::InvalidHandle as i32);
}

#[test]
fn zero_and_garbage_handles_are_invalid() {
    for h in [0u64, u64::MAX, 0xdead_beef] {
        assert_eq!(dynarr_pop(h), DynarrStatus::InvalidHandle as i32);
        assert_eq!(dynarr_len(h), 0);
        assert_eq!(dynarr_free(h), DynarrStatus::InvalidHandle as i32);
    }
}

#[test]
fn wide_elements_copy_whole_structs() {
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Point {
        x: f64,
        y: f64,
        tag: u32,
    }

    let mut h = 0u64;
    assert_eq!(dynarr_create(std::mem::size_of::<Point>(), &mut h), OK);
    for i in 0..10u32 {
        let p = Point {
            x: f64::from(i),
            y: -f64::from(i),
            tag: i * 7,
        };
        assert_eq!(dynarr_append(h, ptr(&p)), OK);
    }
    let mut out = Point::default();
    assert_eq!(dynarr_get(h, 6, ptr_mut(&mut out)), OK);
    assert_eq!(
        out,
        Point {
            x: 6.0,
            y: -6.0,
            tag: 42
        }
    );
    assert_eq!(dynarr_free(h), OK);
}

#[test]
fn handles_stay_distinct_across_threads() {
    let handles: Vec<u64> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..4)
            .map(|t| {
                s.spawn(move || {
                    let mut h = 0u64;
                    assert_eq!(dynarr_create(8, &mut h), OK);
                    for i in 0..50u64 {
                        assert_eq!(dynarr_append(h, ptr(&(t * 100 + i))), OK);
                    }
                    h
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for (t, &h) in handles.iter().enumerate() {
        assert_eq!(dynarr_len(h), 50);
        let mut out = 0u64;
        assert_eq!(dynarr_get(h, 49, ptr_mut(&mut out)), OK);
        assert_eq!(out, t as u64 * 100 + 49);
        assert_eq!(dynarr_free(h), OK);
    }
}
