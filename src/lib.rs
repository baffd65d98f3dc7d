#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

extern crate alloc;

mod tree;
pub use tree::{Handle, InvariantViolation, Iter, Keys, RbTree, Values};

mod map;
pub use map::{FloatMap, Map};
