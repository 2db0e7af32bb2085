//! # ScanKit Queue
//!
//! The submission side of ScanKit: scan beans, status events and the
//! [`Submitter`] interface scans are queued through, plus an in-process
//! loopback broker for tests and offline tooling.
//!
//! Real beamline deployments put a message broker behind [`Submitter`]; this
//! crate deliberately owns no transport, only the contract and the beans
//! that flow across it.

pub mod bean;
pub mod submitter;

pub use bean::{estimate_points, ScanBean, ScanEvent, Status};
pub use submitter::{InProcessQueue, Submitter};
