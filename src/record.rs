use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// One socket as reported by the host's connection-listing utility.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub proto: String,
    pub local: Endpoint,
    pub remote: Endpoint,
    pub state: Option<String>,
    pub pid: Option<u32>,
    pub process_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Endpoint {
    pub address: Option<IpAddr>,
    pub port: Option<u16>,
}

impl Endpoint {
    /// Parses `addr:port` as printed by netstat or ss.
    ///
    /// Accepts `127.0.0.1:22`, `[::1]:22`, `:::22`, `0.0.0.0:*`, `*:*` and
    /// `127.0.0.53%lo:53`. A `*` on either side becomes `None`.
    pub fn parse(raw: &str) -> Option<Endpoint> {
        let (host, port) = if let Some(rest) = raw.strip_prefix('[') {
            let (host, tail) = rest.split_once(']')?;
            (host, tail.strip_prefix(':')?)
        } else {
            raw.rsplit_once(':')?
        };

        let host = host.split('%').next().unwrap_or(host);
        let address: Option<IpAddr> = match host {
            "" | "*" => None,
            h => Some(h.parse().ok()?),
        };
        let port: Option<u16> = match port {
            "*" => None,
            p => Some(p.parse().ok()?),
        };

        Some(Endpoint { address, port })
    }
}
