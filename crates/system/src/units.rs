const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Bytes to (binary) gigabytes.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

/// Byte delta over `secs` seconds as KB/s.  Zero when no time has passed.
pub fn rate_kb_per_sec(bytes: u64, secs: f64) -> f64 {
    if secs <= 0.0 {
        return 0.0;
    }
    bytes as f64 / KIB / secs
}

/// Resident memory as shown in the process table, e.g. `"180 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.0} MB", bytes as f64 / MIB)
}

/// `part / whole` as a percentage; zero for an empty whole.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}
