//! Version probe over the search cluster's HTTP root endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};
use vbind_core::Version;

use crate::error::{ProbeError, ProbeResult};
use crate::probe::VersionProbe;

/// Root document returned by `GET /` on a search node.
#[derive(Debug, Deserialize)]
struct RootDocument {
    version: VersionInfo,
}

#[derive(Debug, Deserialize)]
struct VersionInfo {
    number: String,
}

/// Extract the version from a node's root document.
///
/// The document looks like `{"version": {"number": "7.10.2", ...}, ...}`;
/// every other field is ignored.
///
/// # Errors
///
/// Returns [`ProbeError::InvalidResponse`] if the body is not such a
/// document and [`ProbeError::InvalidVersion`] if the number does not parse.
pub fn parse_root_response(host: &str, body: &str) -> ProbeResult<Version> {
    let document: RootDocument =
        serde_json::from_str(body).map_err(|e| ProbeError::InvalidResponse {
            host: host.to_string(),
            reason: e.to_string(),
        })?;
    Ok(Version::parse(&document.version.number)?)
}

/// Asks each configured host for its version, in order.
///
/// The first host that answers with a usable document wins. Hosts that fail
/// are logged and skipped.
#[derive(Debug, Clone)]
pub struct HttpVersionProbe {
    client: Client,
    hosts: Vec<Url>,
}

impl HttpVersionProbe {
    /// Create a probe for `hosts` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `hosts` is empty, a host is not an `http(s)` URL,
    /// or the HTTP client cannot be built.
    pub fn new<I, S>(hosts: I, timeout: Duration) -> ProbeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(hosts, client)
    }

    /// Create a probe using a preconfigured HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if `hosts` is empty or a host is not an `http(s)` URL.
    pub fn with_client<I, S>(hosts: I, client: Client) -> ProbeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|host| parse_host(host.as_ref()))
            .collect::<ProbeResult<Vec<_>>>()?;
        if hosts.is_empty() {
            return Err(ProbeError::NoHosts);
        }
        Ok(Self { client, hosts })
    }

    /// The hosts probed, in order.
    #[must_use]
    pub fn hosts(&self) -> &[Url] {
        &self.hosts
    }

    async fn probe_host(&self, host: &Url) -> ProbeResult<Version> {
        let response = self.client.get(host.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status {
                host: host.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        parse_root_response(host.as_str(), &body)
    }
}

fn parse_host(host: &str) -> ProbeResult<Url> {
    let url = Url::parse(host.trim()).map_err(|e| ProbeError::InvalidHost {
        host: host.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProbeError::InvalidHost {
            host: host.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

#[async_trait]
impl VersionProbe for HttpVersionProbe {
    fn name(&self) -> &'static str {
        "http"
    }

    /// Ask each host in turn.
    ///
    /// If no host yields a version, a host that answered with an unusable
    /// document takes precedence: its typed error is returned as is. Only
    /// when every failure was a transport failure is the result
    /// [`ProbeError::Unreachable`].
    async fn probe(&self) -> ProbeResult<Version> {
        let mut last_transport = None;
        let mut last_invalid = None;
        for host in &self.hosts {
            match self.probe_host(host).await {
                Ok(version) => {
                    debug!(host = %host, version = %version, "search host answered");
                    return Ok(version);
                },
                Err(e) if e.is_retryable() => {
                    warn!(host = %host, error = %e, "search host unavailable");
                    last_transport = Some(e);
                },
                Err(e) => {
                    warn!(host = %host, error = %e, "search host reported no usable version");
                    last_invalid = Some(e);
                },
            }
        }
        if let Some(invalid) = last_invalid {
            return Err(invalid);
        }
        Err(ProbeError::Unreachable {
            attempted: self.hosts.len(),
            last: last_transport.map_or_else(|| "no hosts".to_string(), |e| e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_7_10: &str = r#"{
        "name": "node-1",
        "cluster_name": "graylog",
        "version": {
            "number": "7.10.2",
            "build_flavor": "oss",
            "lucene_version": "8.7.0"
        },
        "tagline": "You Know, for Search"
    }"#;

    #[test]
    fn test_parse_root_response() {
        let version = parse_root_response("http://es:9200/", ROOT_7_10).unwrap();
        assert_eq!(version, Version::new(7, 10, 2));

        let snapshot = r#"{"version": {"number": "8.0.0-SNAPSHOT"}}"#;
        assert_eq!(
            parse_root_response("h", snapshot).unwrap(),
            Version::major(8)
        );
    }

    #[test]
    fn test_parse_root_response_rejects_bad_documents() {
        assert!(matches!(
            parse_root_response("h", "<html>gateway timeout</html>"),
            Err(ProbeError::InvalidResponse { .. })
        ));
        assert!(matches!(
            parse_root_response("h", r#"{"name": "node-1"}"#),
            Err(ProbeError::InvalidResponse { .. })
        ));
        assert!(matches!(
            parse_root_response("h", r#"{"version": {"number": "next"}}"#),
            Err(ProbeError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_host_validation() {
        assert!(matches!(
            HttpVersionProbe::new(Vec::<String>::new(), Duration::from_secs(1)),
            Err(ProbeError::NoHosts)
        ));
        assert!(matches!(
            HttpVersionProbe::new(["es-node:9200"], Duration::from_secs(1)),
            Err(ProbeError::InvalidHost { .. })
        ));
        assert!(matches!(
            HttpVersionProbe::new(["ftp://es:21"], Duration::from_secs(1)),
            Err(ProbeError::InvalidHost { .. })
        ));

        let probe =
            HttpVersionProbe::new(["http://es-1:9200", " https://es-2:9200 "], Duration::from_secs(1))
                .unwrap();
        let hosts: Vec<&str> = probe.hosts().iter().map(Url::as_str).collect();
        assert_eq!(hosts, vec!["http://es-1:9200/", "https://es-2:9200/"]);
        assert_eq!(probe.name(), "http");
    }

    #[tokio::test]
    async fn test_unreachable_hosts() {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        // Port 9 on loopback is the discard service and is not expected to listen.
        let probe = HttpVersionProbe::with_client(["http://127.0.0.1:9/"], client).unwrap();

        let err = probe.probe().await.unwrap_err();
        assert!(matches!(err, ProbeError::Unreachable { attempted: 1, .. }));
        assert!(err.is_retryable());
    }
}
