// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! Notification fan-out.
//!
//! The dispatcher turns the events of a successful transition into
//! per-recipient notifications. Each notification goes to the recipient's
//! bounded store and to the ephemeral toast channel. Neither step can fail
//! the transition that produced the event.

mod dispatcher;
mod store;
mod toast;

#[cfg(test)]
mod tests;

pub use dispatcher::{Dispatcher, describe_window};
pub use store::{DEFAULT_NOTIFICATION_LIMIT, NotificationSink, NotificationStore};
pub use toast::{DEFAULT_TOAST_TTL, Toast, ToastChannel, ToastReceiver};
