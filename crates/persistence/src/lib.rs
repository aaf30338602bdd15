// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for shiftdesk.
//!
//! Records are kept in a single document holding staff, shifts, requests,
//! the activity log and identifier counters. Two repositories share that
//! document shape:
//!
//! - [`InMemoryRepository`] keeps it in memory (tests, throwaway runs)
//! - [`JsonFileRepository`] rewrites it as a JSON file on every mutation
//!
//! Repositories store what the core hands them. They never decide whether
//! a change is allowed.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod document;
mod error;
mod json_file;
mod memory;
mod repository;

#[cfg(test)]
mod tests;

pub use document::{IdCounters, SchedulingDocument};
pub use error::PersistenceError;
pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use repository::{IdKind, SchedulingRepository};
