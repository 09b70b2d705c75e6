// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, Duration, TimeZone, Utc};
use ran::config::Config;
use ran::db::ActivityStore;
use ran::routes::create_router;
use ran::AppState;
use std::sync::Arc;

/// Create an empty in-memory store.
#[allow(dead_code)]
pub async fn test_store() -> ActivityStore {
    ActivityStore::in_memory()
        .await
        .expect("Failed to create in-memory store")
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let store = test_store().await;

    let state = Arc::new(AppState { config, store });

    (create_router(state.clone()), state)
}

/// Start time used by generated recordings.
#[allow(dead_code)]
pub fn run_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 14, 7, 15, 0).unwrap()
}

/// Build a GPX document for a run heading north along the prime meridian.
///
/// Points are `step` degrees of latitude apart (0.001 is about 111 m) and
/// `interval` seconds apart.
#[allow(dead_code)]
pub fn gpx_run(name: Option<&str>, points: usize, step: f64, interval: i64) -> Vec<u8> {
    let start = run_start();
    let mut gpx = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="ran-tests" xmlns="http://www.topografix.com/GPX/1/1">
  <metadata>
"#,
    );
    if let Some(name) = name {
        gpx.push_str(&format!("    <name>{}</name>\n", name));
    }
    gpx.push_str(&format!(
        "    <time>{}</time>\n  </metadata>\n  <trk>\n    <trkseg>\n",
        start.format("%Y-%m-%dT%H:%M:%SZ")
    ));
    for i in 0..points {
        let time = start + Duration::seconds(i as i64 * interval);
        gpx.push_str(&format!(
            "      <trkpt lat=\"{:.6}\" lon=\"0.0\"><ele>{:.1}</ele><time>{}</time></trkpt>\n",
            i as f64 * step,
            20.0 + (i % 7) as f64,
            time.format("%Y-%m-%dT%H:%M:%SZ")
        ));
    }
    gpx.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
    gpx.into_bytes()
}
