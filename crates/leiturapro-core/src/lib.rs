//! leiturapro-core: classroom records, statistics, and the AI advisor.
//!
//! This crate holds the in-memory entity store (classes, students,
//! assessments), the statistics derived from it, view routing, and the
//! adapter that turns records into generative-model requests. Model backends
//! live in `leiturapro-providers`.

pub mod advisor;
pub mod classroom;
pub mod error;
pub mod model;
pub mod report;
pub mod roster;
pub mod router;
pub mod sample;
pub mod statistics;
pub mod store;
pub mod traits;
