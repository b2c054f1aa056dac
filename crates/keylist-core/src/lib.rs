//! Core systems for keylist.
//!
//! This crate provides the plumbing shared by the keylist model types:
//!
//! - [`Signal`]: change notification transport
//! - [`logging`]: `tracing` targets, span names and a timing guard
//!
//! # Example
//!
//! ```
//! use keylist_core::Signal;
//!
//! let sorted = Signal::<&'static str>::new();
//! let view = sorted.connect(|attribute| println!("re-sorted by {attribute}"));
//!
//! sorted.emit("age");
//! sorted.disconnect(view).unwrap();
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::SignalError;
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
