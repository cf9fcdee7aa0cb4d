//! Thread-safe fixed-capacity byte queue.
//!
//! [`Queue`] moves bytes between producer and consumer threads in one
//! process. It is a ring buffer behind a mutex, with a condition variable
//! that lets consumers sleep until data arrives.
//!
//! # Semantics
//!
//! - Producers never block. [`Queue::put`] writes what fits and reports how
//!   much; a short write is the full-queue signal, not an error.
//! - Consumers block. [`Queue::get`] waits until at least one byte is
//!   available, [`Queue::get_with_timeout`] waits up to a deadline, and
//!   [`Queue::try_get`] does not wait at all.
//! - Bytes come out in the order they went in.
//!
//! ```
//! use giztoy_queue::Queue;
//! use std::thread;
//!
//! let q = Queue::new(16).unwrap();
//! let producer_q = q.clone();
//!
//! let producer = thread::spawn(move || {
//!     let mut sent = 0;
//!     while sent < 3 {
//!         sent += producer_q.put(&b"abc"[sent..]).unwrap();
//!     }
//! });
//!
//! let mut out = [0u8; 3];
//! let mut got = 0;
//! while got < 3 {
//!     got += q.get(&mut out[got..]).unwrap();
//! }
//! producer.join().unwrap();
//! assert_eq!(&out, b"abc");
//! ```
//!
//! # Timeouts
//!
//! ```
//! use giztoy_queue::Queue;
//! use std::time::Duration;
//!
//! let q = Queue::new(4).unwrap();
//! let mut out = [0u8; 4];
//!
//! // Zero timeout never waits
//! assert_eq!(q.get_with_timeout(&mut out, Duration::ZERO).unwrap(), 0);
//!
//! // A real timeout reports expiry as an error distinct from bad input
//! let err = q.get_with_timeout(&mut out, Duration::from_millis(5)).unwrap_err();
//! assert!(err.is_timeout());
//! ```
//!
//! # Teardown
//!
//! Dropping the last handle releases the queue. [`Queue::destroy`] does the
//! same explicitly and reports [`QueueError::Busy`] when other handles are
//! still live.

mod config;
mod error;
mod queue;
mod ring;

pub use config::*;
pub use error::{QueueError, Result};
pub use queue::Queue;
