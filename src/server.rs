//! Inspection of nginx `server` sections.
//!
//! Picks the `server` block that terminates TLS and extracts the domain list certbot should
//! issue for. Two layouts are understood: a single section listening on 443 (optionally also on
//! 80), or one plain section paired with one HTTPS section carrying the same `server_name`s.
use crate::error::Error;
use crate::node::Node;
use lazy_static::lazy_static;
use regex::Regex;

const HTTPS_PORT: &str = "443";

lazy_static! {
    static ref PORT_PATTERN: Regex = Regex::new(r"\d+").unwrap();
}

/// The ports named by the `listen` directives of `server`, in source order.
///
/// The port is the first run of digits in the address following its last `:`, so
/// `listen [::]:443 ssl;` and `listen 127.0.0.1:8080;` yield `443` and `8080`. Directives
/// without a numeric port, such as unix sockets, are skipped.
#[must_use]
pub fn listen_ports(server: &Node) -> Vec<String> {
    server
        .query("listen", &[])
        .filter_map(|listen| {
            let address = listen.args().first()?;
            let port = address.rsplit(':').next().unwrap_or(address);
            PORT_PATTERN.find(port).map(|m| m.as_str().to_string())
        })
        .collect()
}

/// The arguments of the first `server_name` directive of `server`, comma separated.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `server` has no `server_name` directive.
pub fn server_names(server: &Node) -> Result<String, Error> {
    Ok(server.query_first("server_name", &[])?.args().join(","))
}

fn listens_on_https(server: &Node) -> bool {
    listen_ports(server).iter().any(|port| port == HTTPS_PORT)
}

/// Choose the domains to request a certificate for from the top-level `server` sections of
/// `root`.
///
/// With two sections the first one listening on 443 is the HTTPS one. Both must carry the same
/// `server_name` list unless `allow_mismatch` is set, in which case the HTTPS section wins.
///
/// # Errors
///
/// Returns [`Error::NoServers`] or [`Error::TooManyServers`] when there are not one or two
/// sections, [`Error::NoListenPorts`] when a lone section has no port,
/// [`Error::MissingHttpsPort`] when no section listens on 443,
/// [`Error::ServerNameMismatch`] when paired sections disagree, and [`Error::NotFound`] when a
/// section has no `server_name`.
pub fn select_domains(root: &Node, allow_mismatch: bool) -> Result<String, Error> {
    let servers: Vec<&Node> = root.query("server", &[]).collect();
    match servers.as_slice() {
        [] => Err(Error::NoServers),
        [server] => {
            tracing::info!("found a single server section, expecting 443 or 80/443");
            let ports = listen_ports(server);
            if ports.is_empty() {
                return Err(Error::NoListenPorts);
            }
            tracing::info!("found {} listen port(s)", ports.len());
            if !ports.iter().any(|port| port == HTTPS_PORT) {
                return Err(Error::MissingHttpsPort);
            }
            server_names(server)
        }
        [first, second] => {
            tracing::info!("found two server sections, checking which one serves 443");
            let (secure, other) = if listens_on_https(first) {
                (first, second)
            } else if listens_on_https(second) {
                (second, first)
            } else {
                return Err(Error::MissingHttpsPort);
            };
            let secure = server_names(secure)?;
            let other = server_names(other)?;
            if secure != other {
                if !allow_mismatch {
                    return Err(Error::ServerNameMismatch { secure, other });
                }
                tracing::warn!("server_name lists differ, using the 443 section: {secure}");
            }
            Ok(secure)
        }
        _ => Err(Error::TooManyServers(servers.len())),
    }
}
