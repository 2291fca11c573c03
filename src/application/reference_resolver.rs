//! Externally visible URLs for stored objects
//!
//! The base URL is inferred per request, in order of precedence:
//!
//! 1. the configured public base URL (trailing slashes trimmed)
//! 2. `X-Forwarded-Proto` / `X-Forwarded-Host`, first value of each list
//! 3. the `Host` header
//! 4. `http://localhost:<port>`

use crate::application::dto::ObjectReference;

/// Origin-related request headers, already extracted from the transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    pub forwarded_proto: Option<String>,
    pub forwarded_host: Option<String>,
    pub host: Option<String>,
}

impl RequestOrigin {
    pub fn with_forwarded(mut self, proto: Option<&str>, host: Option<&str>) -> Self {
        self.forwarded_proto = proto.map(str::to_string);
        self.forwarded_host = host.map(str::to_string);
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    public_base_url: Option<String>,
    port: u16,
}

impl ReferenceResolver {
    pub fn new(public_base_url: Option<&str>, port: u16) -> Self {
        let public_base_url = public_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self {
            public_base_url,
            port,
        }
    }

    /// Base URL (scheme + authority, no trailing slash) for this request
    pub fn base_url(&self, origin: &RequestOrigin) -> String {
        if let Some(base) = &self.public_base_url {
            return base.clone();
        }

        let forwarded_proto = first_value(origin.forwarded_proto.as_deref());
        let forwarded_host = first_value(origin.forwarded_host.as_deref());
        let host = first_value(origin.host.as_deref());

        match (forwarded_proto, forwarded_host, host) {
            (proto, Some(fwd_host), _) => format!("{}://{}", proto.unwrap_or("http"), fwd_host),
            (Some(proto), None, Some(host)) => format!("{}://{}", proto, host),
            (None, None, Some(host)) => format!("http://{}", host),
            _ => format!("http://localhost:{}", self.port),
        }
    }

    pub fn resolve(&self, origin: &RequestOrigin, relative_path: &str) -> ObjectReference {
        ObjectReference {
            path: relative_path.to_string(),
            url: format!("{}{}", self.base_url(origin), relative_path),
        }
    }
}

/// First entry of a comma-separated proxy header, trimmed; `None` if blank
fn first_value(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
