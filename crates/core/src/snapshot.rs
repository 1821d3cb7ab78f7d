use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One full metrics reading, as produced by a collector or the simulator
/// and as served by the `/api/stats` endpoint.
///
/// Every top-level section is optional: an absent section means "leave the
/// corresponding readout and series untouched this tick".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<UsageReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<UsageReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processes: Option<Vec<ProcessEntry>>,
    /// Collection instant in epoch milliseconds. Informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuReading {
    /// Average usage across all cores (0.0 – 100.0).
    pub usage: f64,
}

/// Capacity-style reading shared by memory and disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageReading {
    /// Total capacity in GB.
    pub total: f64,
    /// Used capacity in GB.
    pub used: f64,
    pub percent: f64,
}

/// Network throughput in KB/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkReading {
    pub download: f64,
    pub upload: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub hostname: Option<String>,
    pub os: Option<String>,
    /// Boot instant in epoch milliseconds (not a duration).
    pub uptime: Option<f64>,
}

impl SystemInfo {
    /// The instant the host booted, if reported and representable.
    pub fn boot_instant(&self) -> Option<DateTime<Utc>> {
        let ms = self.uptime?;
        if !ms.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(ms as i64)
    }

    /// Time elapsed between boot and `now`; zero if the boot instant lies
    /// in the future.
    pub fn uptime_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let elapsed = now.signed_duration_since(self.boot_instant()?);
        Some(elapsed.max(TimeDelta::zero()))
    }
}

/// One row of the top-processes table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: i64,
    pub name: String,
    /// CPU share, pre-formatted by the producer (e.g. `"12.3"`).
    pub cpu: String,
    /// Resident memory, pre-formatted by the producer (e.g. `"180 MB"`).
    pub memory: String,
}

/// A numeric snapshot field that can be plotted as a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "cpu.usage")]
    CpuUsage,
    #[serde(rename = "memory.percent")]
    MemoryPercent,
    #[serde(rename = "disk.percent")]
    DiskPercent,
    #[serde(rename = "network.download")]
    NetworkDownload,
    #[serde(rename = "network.upload")]
    NetworkUpload,
}

impl Metric {
    /// Read this metric from `snapshot`; `None` when its section is absent.
    ///
    /// CPU usage is plotted at the one-decimal precision the readout shows.
    pub fn read(self, snapshot: &Snapshot) -> Option<f64> {
        match self {
            Metric::CpuUsage => snapshot.cpu.map(|c| round1(c.usage)),
            Metric::MemoryPercent => snapshot.memory.map(|m| m.percent),
            Metric::DiskPercent => snapshot.disk.map(|d| d.percent),
            Metric::NetworkDownload => snapshot.network.map(|n| n.download),
            Metric::NetworkUpload => snapshot.network.map(|n| n.upload),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_snapshot_leaves_sections_absent() {
        let snap: Snapshot =
            serde_json::from_str(r#"{"cpu":{"usage":42.5},"network":{"download":1.0,"upload":2.0}}"#)
                .unwrap();
        assert_eq!(snap.cpu, Some(CpuReading { usage: 42.5 }));
        assert!(snap.memory.is_none());
        assert!(snap.processes.is_none());
        assert_eq!(Metric::NetworkUpload.read(&snap), Some(2.0));
        assert_eq!(Metric::DiskPercent.read(&snap), None);
    }

    #[test]
    fn full_snapshot_from_endpoint_payload() {
        let raw = r#"{
            "cpu": {"usage": 12.0},
            "memory": {"total": 16, "used": 9.6, "percent": 60.0, "free": 6.4},
            "disk": {"total": 500, "used": 250, "percent": 50},
            "network": {"download": 300, "upload": 120},
            "system": {"hostname": "demo", "os": "Linux 6.1", "platform": "linux", "uptime": 1700000000000},
            "processes": [{"pid": 1, "name": "init", "cpu": "0.1", "memory": "12 MB"}],
            "timestamp": 1700000123456
        }"#;
        let snap: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.memory.unwrap().total, 16.0);
        assert_eq!(snap.processes.as_ref().unwrap()[0].name, "init");
        assert_eq!(snap.system.unwrap().hostname.as_deref(), Some("demo"));
    }

    #[test]
    fn malformed_section_is_rejected() {
        let res = serde_json::from_str::<Snapshot>(r#"{"memory":{"total":16}}"#);
        assert!(res.is_err());
    }

    #[test]
    fn cpu_metric_is_rounded_to_one_decimal() {
        let snap = Snapshot {
            cpu: Some(CpuReading { usage: 37.46 }),
            ..Snapshot::default()
        };
        assert_eq!(Metric::CpuUsage.read(&snap), Some(37.5));
    }

    #[test]
    fn metric_names_match_snapshot_paths() {
        let m: Metric = serde_json::from_str(r#""network.download""#).unwrap();
        assert_eq!(m, Metric::NetworkDownload);
    }

    #[test]
    fn uptime_is_measured_from_boot_instant() {
        let now = DateTime::from_timestamp_millis(1_000_000_000_000).unwrap();
        let info = SystemInfo {
            uptime: Some((1_000_000_000_000i64 - 90 * 60 * 1000) as f64),
            ..SystemInfo::default()
        };
        assert_eq!(info.uptime_at(now), Some(TimeDelta::minutes(90)));
    }

    #[test]
    fn boot_in_the_future_clamps_to_zero() {
        let now = DateTime::from_timestamp_millis(1_000).unwrap();
        let info = SystemInfo { uptime: Some(5_000.0), ..SystemInfo::default() };
        assert_eq!(info.uptime_at(now), Some(TimeDelta::zero()));
    }
}
