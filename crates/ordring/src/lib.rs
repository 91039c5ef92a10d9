//! ordring - Bounded Ordered Channel
//!
//! A fixed-capacity circular buffer shared between one producer thread and
//! one consumer thread. The producer may only append elements that are
//! strictly greater than the last one it appended (under a caller-supplied
//! comparator), so the buffer always holds an increasing run.
//!
//! # Key Features
//!
//! - Blocking backpressure both ways: `insert` waits while full, `get` waits while empty
//! - Out-of-order elements are rejected and handed back, never silently dropped
//! - Elements move in and out by value; no aliasing between threads
//! - Fallible construction (allocation failure is an error, not an abort)
//!
//! # Example
//!
//! ```
//! use ordring::{Config, OrderedChannel};
//! use std::thread;
//!
//! let (producer, consumer) = OrderedChannel::<u32>::with_natural_order(Config::new(4, false))
//!     .unwrap()
//!     .split();
//!
//! thread::spawn(move || {
//!     for v in [1, 5, 3, 8] {
//!         if let Err(rejected) = producer.insert(v) {
//!             println!("dropped {}", rejected.into_inner());
//!         }
//!     }
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(consumer.get(), 1);
//! assert_eq!(consumer.get(), 5);
//! assert_eq!(consumer.get(), 8);
//! assert_eq!(consumer.try_get(), None);
//! ```

mod channel;
mod comparator;
mod config;
mod error;
mod invariants;
mod metrics;
mod ring;
mod sync;

pub use channel::{Consumer, OrderedChannel, Producer};
pub use comparator::{Comparator, NaturalOrder};
pub use config::{Config, INSTRUMENTED_CONFIG, SMALL_CONFIG};
pub use error::{ChannelError, Rejected};
pub use metrics::MetricsSnapshot;
