//! # snowgen
//!
//! Snowflake-style 64-bit id generation.
//!
//! Each generator instance is assigned a (datacenter, worker) pair out of
//! band and mints ids that are:
//! - Unique across instances with distinct pairs
//! - Strictly increasing per instance
//! - Time-sortable (41-bit millisecond timestamp since a custom epoch)
//!
//! ```text
//! | 0 | 41 bits timestamp delta | 5 bits datacenter | 5 bits worker | 12 bits sequence |
//! ```
//!
//! ```
//! use snowgen::Generator;
//!
//! let generator = Generator::new(1, 1).unwrap();
//! let id = generator.next_id().unwrap();
//! let info = generator.parse(id).unwrap();
//! assert_eq!((info.datacenter_id, info.worker_id), (1, 1));
//! ```

#![forbid(unsafe_code)]

pub mod codec;
mod config;
mod error;
mod generator;
mod metrics;
mod parser;

#[cfg(test)]
pub mod tests;

pub use codec::IdParts;
pub use config::{
    BackwardPolicy, ConfigError, GeneratorConfig, GeneratorConfigBuilder, DEFAULT_EPOCH_DATETIME,
    DEFAULT_EPOCH_MS, MAX_BATCH_SIZE_LIMIT, MAX_EPOCH_MS,
};
pub use error::{BatchError, InvalidIdReason, SnowflakeError};
pub use generator::time::unix_time_ms;
pub use generator::{ClockSource, Generator, ManualClock, SystemClock};
pub use metrics::MetricsSnapshot;
pub use parser::{IdInfo, IdParser};
