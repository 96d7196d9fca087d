//! autograde-delivery — Collector delivery channel.
//!
//! Implements the `ReportTransport` trait over HTTP and wraps it in a
//! parameterized retry policy so a transient collector outage does not lose
//! a grading run's score.

pub mod collector;
pub mod error;
pub mod mock;
pub mod retry;

pub use collector::HttpCollector;
pub use error::DeliveryError;
pub use retry::{deliver_with_retry, RetryPolicy};
