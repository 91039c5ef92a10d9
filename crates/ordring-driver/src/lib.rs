//! Producer/consumer driver for the ordring channel.
//!
//! Spawns one producer thread feeding random values into an
//! [`ordring::OrderedChannel`] and one consumer thread draining it, each
//! pausing a random interval between operations, until a [`StopFlag`] is set.
//!
//! # Example
//!
//! ```
//! use ordring_driver::{run, DriverConfig, StopFlag};
//! use std::thread;
//! use std::time::Duration;
//!
//! let stop = StopFlag::new();
//! let timer = {
//!     let stop = stop.clone();
//!     thread::spawn(move || {
//!         thread::sleep(Duration::from_millis(50));
//!         stop.stop();
//!     })
//! };
//!
//! let report = run(&DriverConfig::no_delay(), &stop, |_| {}).unwrap();
//! timer.join().unwrap();
//! assert_eq!(report.received + report.left_in_buffer, report.accepted);
//! ```

mod config;
mod driver;
mod error;
mod sink;
mod stop;

pub use config::DriverConfig;
pub use driver::{run, RunReport};
pub use error::DriverError;
pub use sink::write_value;
pub use stop::StopFlag;
