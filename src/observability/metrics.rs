//! Metrics collection.
//!
//! # Metrics
//! - `dynamic_routing_decisions_total` (counter): routing decisions by
//!   `outcome` (resolved, pass_through, not_matched, invalid_pattern,
//!   invalid_path, invalid_template)
//!
//! No exporter is installed by this crate; without a recorder the calls
//! are no-ops.

pub const DECISIONS_TOTAL: &str = "dynamic_routing_decisions_total";

/// Record one routing decision.
pub fn record_decision(outcome: &'static str) {
    metrics::counter!(DECISIONS_TOTAL, "outcome" => outcome).increment(1);
}
