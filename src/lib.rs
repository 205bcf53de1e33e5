//! Satzone - infer the probable UTC offset of a Bitcoin address owner
//!
//! Builds an hour-of-day activity histogram from transaction timestamps,
//! cross-correlates it with a nighttime inactivity template at every
//! whole-hour offset in [-12, 12], and picks the best-supported offset.
//! The inference core is pure and synchronous; fetching transactions lives
//! in [`provider`].

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod histogram;
pub mod inference;
pub mod input;
pub mod json_output;
pub mod likelihood;
pub mod provider;
pub mod selector;
pub mod template;
pub mod text_output;

pub use error::InferenceError;
pub use histogram::{ActivityHistogram, TransactionTimestamp};
pub use inference::{infer_from_histogram, infer_time_zone_offset, TimeZoneInference};
pub use likelihood::{CandidateOffset, OffsetScore, PosteriorDistribution};
