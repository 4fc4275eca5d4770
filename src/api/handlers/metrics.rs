// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::response::IntoResponse;

use crate::metrics;

/// Prometheus text exposition endpoint.
pub async fn get_metrics() -> impl IntoResponse {
    metrics::gather()
}
