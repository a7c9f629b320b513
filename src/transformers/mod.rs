//! # Trip Preparation Steps
//!
//! The submodules contain the transformers that turn a raw trip dataset into the cleaned,
//! zone-enriched dataset every aggregation reads.

pub mod cleaning;
pub mod enrichment;
