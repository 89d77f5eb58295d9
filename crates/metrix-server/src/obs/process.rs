//! Process-level gauges appended after the registry output.

use std::fmt::Write;
use std::time::Duration;

use metrix_core::render::fmt_value;

/// Resident and virtual memory of this process in bytes, keyed by type.
/// Empty where `/proc/self/status` is unavailable.
pub fn memory_usage() -> Vec<(&'static str, u64)> {
    #[cfg(target_os = "linux")]
    {
        match std::fs::read_to_string("/proc/self/status") {
            Ok(status) => parse_status(&status),
            Err(_) => Vec::new(),
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        Vec::new()
    }
}

/// Parse `VmRSS`, `VmSize`, and `VmData` (reported in kB) from a
/// `/proc/<pid>/status` document.
pub fn parse_status(status: &str) -> Vec<(&'static str, u64)> {
    const FIELDS: [(&str, &str); 3] = [("VmRSS:", "rss"), ("VmSize:", "virtual"), ("VmData:", "data")];

    let mut out = Vec::new();
    for (prefix, kind) in FIELDS {
        let kb = status
            .lines()
            .find_map(|l| l.strip_prefix(prefix))
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|n| n.parse::<u64>().ok());
        if let Some(kb) = kb {
            out.push((kind, kb * 1024));
        }
    }
    out
}

pub fn render(uptime: Duration, out: &mut String) {
    let _ = writeln!(out, "# HELP process_uptime_seconds Process uptime in seconds");
    let _ = writeln!(out, "# TYPE process_uptime_seconds gauge");
    let _ = writeln!(out, "process_uptime_seconds {}", fmt_value(uptime.as_secs_f64()));

    let memory = memory_usage();
    if memory.is_empty() {
        return;
    }
    let _ = writeln!(out, "# HELP process_memory_bytes Process memory usage in bytes");
    let _ = writeln!(out, "# TYPE process_memory_bytes gauge");
    for (kind, bytes) in memory {
        let _ = writeln!(out, "process_memory_bytes{{type=\"{}\"}} {}", kind, bytes);
    }
}
