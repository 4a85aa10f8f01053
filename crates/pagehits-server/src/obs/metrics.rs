//! Minimal metrics registry for the API.
//!
//! Counter and histogram vectors with dynamic labels backed by `DashMap`.
//! Label sets are flattened into sorted key vectors and rows are rendered in
//! sorted order, so the exposition output is deterministic. Durations are
//! accumulated as integer microseconds and converted to seconds on render.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} {kind}");
}

fn micros_as_secs(micros: u64) -> f64 {
    micros as f64 / 1_000_000.0
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for a label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "counter");
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (label_str(r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (labels, val) in rows {
            let _ = writeln!(out, "{name}{{{labels}}} {val}");
        }
    }
}

// Bucket upper bounds in microseconds: 5ms .. 10s.
const BUCKETS_MICROS: [u64; 14] = [
    5_000, 10_000, 25_000, 50_000, 75_000, 100_000, 250_000, 500_000, 750_000, 1_000_000,
    2_500_000, 5_000_000, 7_500_000, 10_000_000,
];

struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

impl Default for AtomicHistogram {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations for a label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "histogram");
        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };
            let labels = label_str(&key);
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{labels},")
            };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let n = hist.buckets[i].load(Ordering::Relaxed);
                let le = micros_as_secs(le);
                let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"{le}\"}} {n}");
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {count}");

            let sum = micros_as_secs(hist.sum_micros.load(Ordering::Relaxed));
            let _ = writeln!(out, "{name}_sum{{{labels}}} {sum}");
            let _ = writeln!(out, "{name}_count{{{labels}}} {count}");
        }
    }
}

#[derive(Default)]
pub struct ApiMetrics {
    /// Labels: method, endpoint.
    pub requests: CounterVec,
    /// Labels: endpoint.
    pub request_duration: HistogramVec,
    /// Labels: page_name.
    pub page_hits: CounterVec,
}

impl ApiMetrics {
    /// Render every family. `pages` is sampled by the caller at scrape time.
    pub fn render(&self, pages: usize) -> String {
        let mut out = String::new();
        self.requests
            .render("api_requests_total", "Total API requests", &mut out);
        self.request_duration.render(
            "api_request_duration_seconds",
            "API request duration",
            &mut out,
        );
        self.page_hits
            .render("page_hits_total", "Total hits per page", &mut out);

        header(&mut out, "pagehits_pages", "Pages currently registered", "gauge");
        let _ = writeln!(out, "pagehits_pages {pages}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_families_still_render_headers() {
        let out = ApiMetrics::default().render(0);
        assert!(out.contains("# TYPE api_requests_total counter"));
        assert!(out.contains("# TYPE api_request_duration_seconds histogram"));
        assert!(out.contains("# TYPE page_hits_total counter"));
        assert!(out.contains("pagehits_pages 0"));
    }

    #[test]
    fn counter_labels_are_order_insensitive() {
        let c = CounterVec::default();
        c.inc(&[("method", "GET"), ("endpoint", "api")]);
        c.inc(&[("endpoint", "api"), ("method", "GET")]);
        assert_eq!(c.get(&[("method", "GET"), ("endpoint", "api")]), 2);

        let mut out = String::new();
        c.render("x_total", "x", &mut out);
        assert!(out.contains("x_total{endpoint=\"api\",method=\"GET\"} 2"));
    }

    #[test]
    fn label_values_are_escaped() {
        let c = CounterVec::default();
        c.inc(&[("page_name", "say \"hi\"\n")]);
        let mut out = String::new();
        c.render("p_total", "p", &mut out);
        assert!(out.contains(r#"p_total{page_name="say \"hi\"\n"} 1"#));
    }

    #[test]
    fn histogram_buckets_are_cumulative() {
        let h = HistogramVec::default();
        h.observe(&[("endpoint", "api")], Duration::from_millis(3));
        h.observe(&[("endpoint", "api")], Duration::from_millis(60));
        h.observe(&[("endpoint", "api")], Duration::from_secs(30));
        assert_eq!(h.count(&[("endpoint", "api")]), 3);

        let mut out = String::new();
        h.render("d_seconds", "d", &mut out);
        assert!(out.contains("d_seconds_bucket{endpoint=\"api\",le=\"0.005\"} 1"));
        assert!(out.contains("d_seconds_bucket{endpoint=\"api\",le=\"0.075\"} 2"));
        assert!(out.contains("d_seconds_bucket{endpoint=\"api\",le=\"10\"} 2"));
        assert!(out.contains("d_seconds_bucket{endpoint=\"api\",le=\"+Inf\"} 3"));
        assert!(out.contains("d_seconds_count{endpoint=\"api\"} 3"));
    }
}
