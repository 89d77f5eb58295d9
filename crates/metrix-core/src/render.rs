//! Text exposition renderer (format version 0.0.4).

use std::fmt::Write;

use crate::catalog::{MetricDef, MetricKind};
use crate::error::Result;
use crate::registry::MetricsRegistry;
use crate::store::{AtomicF64, SeriesStore};

/// Content type for the rendered body.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Format a sample value. Integral values print without a fraction.
pub fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

pub(crate) fn render(registry: &MetricsRegistry) -> Result<String> {
    let mut out = String::new();
    for def in registry.catalog.snapshot()? {
        let _ = writeln!(out, "# HELP {} {}", def.name, escape_help(&def.help));
        let _ = writeln!(out, "# TYPE {} {}", def.name, def.kind.as_str());
        match def.kind {
            MetricKind::Counter => render_scalar(&registry.counters, &def, &mut out),
            MetricKind::Gauge => render_scalar(&registry.gauges, &def, &mut out),
            MetricKind::Histogram => render_histogram(registry, &def, &mut out),
        }
    }
    Ok(out)
}

fn render_scalar(store: &SeriesStore<AtomicF64>, def: &MetricDef, out: &mut String) {
    for series in store.snapshot(&def.name) {
        let _ = writeln!(
            out,
            "{}{} {}",
            def.name,
            series.labels.render(),
            fmt_value(series.value.load())
        );
    }
}

fn render_histogram(registry: &MetricsRegistry, def: &MetricDef, out: &mut String) {
    for series in registry.histograms.snapshot(&def.name) {
        let snap = series.value.snapshot();
        let labels = series.labels.render();

        let mut cumulative = 0u64;
        for (i, count) in snap.buckets.iter().enumerate() {
            cumulative += count;
            let le = match def.buckets.get(i) {
                Some(b) => fmt_value(*b),
                None => "+Inf".to_string(),
            };
            let _ = writeln!(
                out,
                "{}_bucket{} {}",
                def.name,
                series.labels.render_with(Some(("le", le.as_str()))),
                cumulative
            );
        }
        let _ = writeln!(out, "{}_sum{} {}", def.name, labels, fmt_value(snap.sum));
        let _ = writeln!(out, "{}_count{} {}", def.name, labels, snap.count);
    }
}
