use anyhow::{bail, Context};
use std::fmt;

const URL_SCHEMES: [&str; 3] = ["redis://", "rediss://", "redis+unix://"];

#[derive(Clone)]
pub struct ConnectionSettings {
    /// `host:port` or a full redis url
    pub server: String,
}

impl ConnectionSettings {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
        }
    }

    pub fn url(&self) -> Result<String, anyhow::Error> {
        let server = self.server.trim();
        if server.is_empty() {
            bail!("No server specified")
        }

        if URL_SCHEMES.iter().any(|scheme| server.starts_with(scheme)) {
            return Ok(server.to_owned());
        }

        Ok(format!("redis://{server}"))
    }

    /// Server with url credentials and query parameters masked, safe for logs.
    pub fn redacted(&self) -> String {
        let server = self.server.trim();
        let (scheme, rest) = match server.split_once("://") {
            Some((scheme, rest)) => (format!("{scheme}://"), rest),
            None => (String::new(), server),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, _)) => (rest, "?***"),
            None => (rest, ""),
        };

        let authority_end = rest.find('/').unwrap_or(rest.len());
        let rest = match rest[..authority_end].rfind('@') {
            Some(at) => format!("***{}", &rest[at..]),
            None => rest.to_owned(),
        };

        format!("{scheme}{rest}{query}")
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("server", &self.redacted())
            .finish()
    }
}

impl TryFrom<&ConnectionSettings> for redis::Client {
    type Error = anyhow::Error;

    fn try_from(value: &ConnectionSettings) -> Result<Self, Self::Error> {
        let url = value.url()?;
        let client = redis::Client::open(url.as_str())
            .with_context(|| format!("While creating redis client for {}", value.redacted()))?;

        Ok(client)
    }
}
