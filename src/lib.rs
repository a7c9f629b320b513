//! # Taxi Trip Report
//!
//! A batch report over the NYC yellow and green taxi trip datasets, built on Apache DataFusion.
//!
//! The report loads both trip datasets and the zone lookup table ([`sources`]), resolves
//! pickup and drop-off zones and drops implausible trips ([`transformers`], chained by a
//! [`pipeline::Pipeline`]), computes its statistics ([`analysis`]) and prints and charts
//! them ([`render`]). [`report::run`] wires these stages together.

pub mod analysis;
pub mod exceptions;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod schema;
pub mod settings;
pub mod sources;
pub mod transformers;
