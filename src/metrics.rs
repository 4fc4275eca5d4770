// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter_vec_with_registry, register_int_gauge_vec_with_registry, Encoder,
    IntCounterVec, IntGaugeVec, Registry, TextEncoder,
};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Engagement write operations by kind (`like`, `favorite`, `follow`,
/// `unfollow`, `comment`, `comment_delete`, `comment_like`, `review`) and
/// outcome (`ok`, `rejected`). Failures propagate as errors and are visible
/// in the request traces instead.
pub static ENGAGEMENT_OPS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec_with_registry!(
        "engagement_operations_total",
        "Engagement write operations processed",
        &["op", "outcome"],
        REGISTRY.clone()
    )
    .expect("metric registration")
});

/// Counter rows healed by the background reconciler, per table.
pub static RECONCILED_ROWS: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec_with_registry!(
        "reconciled_counter_rows",
        "Rows whose denormalized counters were corrected in the last reconciliation pass",
        &["table"],
        REGISTRY.clone()
    )
    .expect("metric registration")
});

pub fn record_op(op: &str, outcome: &str) {
    ENGAGEMENT_OPS.with_label_values(&[op, outcome]).inc();
}

/// Render the registry in the Prometheus text exposition format.
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_are_counted_per_label() {
        let before = ENGAGEMENT_OPS.with_label_values(&["like", "ok"]).get();
        record_op("like", "ok");
        assert_eq!(
            ENGAGEMENT_OPS.with_label_values(&["like", "ok"]).get(),
            before + 1
        );
    }

    #[test]
    fn gather_renders_registered_metrics() {
        record_op("follow", "ok");
        let output = gather();
        assert!(output.contains("engagement_operations_total"));
    }
}
