use crate::Collect;
use dash_core::{FetchFailed, Result, Snapshot};
use std::time::Duration;

/// Polls a JSON snapshot endpoint over HTTP.
pub struct RemoteSource {
    endpoint: String,
    timeout:  Duration,
}

impl RemoteSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self { endpoint: endpoint.into(), timeout }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Collect for RemoteSource {
    fn collect(&self) -> Result<Snapshot> {
        // Non-2xx statuses surface as `ureq::Error::Status`.
        let response = ureq::get(&self.endpoint)
            .timeout(self.timeout)
            .call()
            .map_err(|e| FetchFailed::new(format!("{}: {e}", self.endpoint)))?;

        let body = response
            .into_string()
            .map_err(|e| FetchFailed::new(format!("reading response body: {e}")))?;

        parse_snapshot(&body)
    }

    fn label(&self) -> &'static str {
        "remote"
    }
}

/// Decode an endpoint payload.
pub fn parse_snapshot(body: &str) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(body)
        .map_err(|e| FetchFailed::new(format!("malformed snapshot: {e}")))?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::DashError;

    #[test]
    fn parses_partial_payload() {
        let snap = parse_snapshot(r#"{"network":{"download":512,"upload":64}}"#).unwrap();
        assert_eq!(snap.network.unwrap().download, 512.0);
        assert!(snap.cpu.is_none());
    }

    #[test]
    fn garbage_is_a_fetch_failure() {
        let err = parse_snapshot("<html>502</html>").unwrap_err();
        assert!(matches!(err, DashError::Fetch(f) if f.message.starts_with("malformed snapshot")));
    }

    #[test]
    fn unreachable_endpoint_is_a_fetch_failure() {
        // Port 9 (discard) on loopback is closed in test environments.
        let source = RemoteSource::new("http://127.0.0.1:9/api/stats", Duration::from_millis(200));
        let err = source.collect().unwrap_err();
        assert!(matches!(err, DashError::Fetch(_)));
    }
}
