//! Load-test profile for an ownCloud OCIS deployment.
//!
//! The goose harness owns scheduling, concurrency, and statistics; this crate
//! supplies the probe table, the response-classification rules, and the
//! post-run verdict that gates the process exit code. The classification and
//! verdict logic lives in plain modules so it can be tested without
//! generating any load.

pub mod models;
pub mod report;
pub mod scenario;
