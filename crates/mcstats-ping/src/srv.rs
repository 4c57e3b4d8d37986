//! SRV record lookup for the game server address.
//!
//! Servers are commonly published as a hostname whose `_minecraft._tcp`
//! SRV record names the real host and port. IP literals skip the lookup.
//! A missing record or a failed lookup leaves the configured
//! `address:port`, which is then resolved (A/AAAA) when connecting.

use std::cmp::Reverse;
use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::error::ResolveError;
use tracing::debug;

/// Service and protocol labels prepended to the server hostname.
pub const SRV_SERVICE: &str = "_minecraft._tcp";

/// One SRV record answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvTarget {
    /// Lower is preferred.
    pub priority: u16,
    /// Among equal priorities, higher is preferred.
    pub weight: u16,
    /// Target hostname, without the trailing dot.
    pub host: String,
    /// Target port.
    pub port: u16,
}

/// Host and port to connect to for `address:port`.
pub async fn resolve(address: &str, port: u16) -> (String, u16) {
    if address.parse::<IpAddr>().is_ok() {
        return (address.to_owned(), port);
    }

    match lookup(address).await.map(select) {
        Ok(Some(target)) => {
            debug!(
                address,
                host = target.host,
                port = target.port,
                "Using SRV record"
            );
            (target.host, target.port)
        }
        Ok(None) => (address.to_owned(), port),
        Err(e) => {
            debug!(address, error = %e, "No SRV record, connecting directly");
            (address.to_owned(), port)
        }
    }
}

/// Pick the preferred record: lowest priority, then highest weight.
pub fn select(records: Vec<SrvTarget>) -> Option<SrvTarget> {
    records
        .into_iter()
        .min_by_key(|target| (target.priority, Reverse(target.weight)))
}

async fn lookup(address: &str) -> Result<Vec<SrvTarget>, ResolveError> {
    let resolver = TokioAsyncResolver::tokio_from_system_conf()?;
    // Fully qualified, so search domains are not tried.
    let name = format!("{SRV_SERVICE}.{}.", address.trim_end_matches('.'));
    let answer = resolver.srv_lookup(name.as_str()).await?;

    Ok(answer
        .iter()
        .map(|srv| SrvTarget {
            priority: srv.priority(),
            weight: srv.weight(),
            host: srv.target().to_utf8().trim_end_matches('.').to_owned(),
            port: srv.port(),
        })
        .collect())
}
