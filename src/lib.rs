//! A fixed-capacity bitmap over 32-bit blocks, written in Rust.
//! `no_std` with `alloc`, no `unsafe`.
//!
//! [`BitMap`] is the main struct in this library. Its capacity is chosen at
//! runtime and never changes afterwards. Every bit operation is bounds-checked
//! and reports a [`BitMapError`] instead of panicking.
//!
//! # Examples
//! ```
//! use block_bitmap::{block_count, render, BitMap};
//!
//! let mut bitmap = BitMap::new(25);
//! assert_eq!(bitmap.block_count(), block_count(25));
//! bitmap.set(0).unwrap();
//! bitmap.invert_row(5, 3).unwrap();
//! assert_eq!(
//!     render(&bitmap, 5),
//!     "1 0 0 0 0\n0 0 0 0 0\n1 1 1 1 1\n0 0 0 0 0\n0 0 0 0 0\n"
//! );
//! ```
//!
//! # Features
//!
//! - `#![no_std]` compatible, needs only `alloc`
//! - Bit-level operations returning `Result`: `set`, `clear`, `test`,
//!   `toggle`
//! - Grid operations on a row-major overlay with a per-call column count:
//!   `invert_column`, `invert_row`
//! - Whole-map and range inversion: `invert_all`, `invert_range`
//! - Padding bits past the capacity are never touched
//! - Text rendering through [`Grid`] / [`render`]
//! - An interactive exerciser ([`Session`]) driving the `block_bitmap`
//!   binary

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod bitmap;
mod command;
mod error;
mod render;

pub use bitmap::{BLOCK_BITS, BitMap, BitMapIter, block_count};
pub use command::{CommandError, Op, Reply, Request, Session, Status};
pub use error::{BitMapError, Region};
pub use render::{Grid, render};
