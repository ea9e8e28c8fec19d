//! ngxcert
//!
//! Parses an nginx configuration into a tree of directives and drives [certbot] in webroot mode
//! for the domains served by its HTTPS `server` section.
//!
//! The parser is deliberately small: directives are whitespace separated tokens terminated by
//! `;`, or opening a `{ ... }` block. Comments, quoting and `include` are not understood.
//!
//! ```
//! let root = ngxcert::loads("server { listen 443 ssl; server_name example.com; }")?;
//! let server = root.query_first("server", &[])?;
//! assert_eq!(server.query("listen", &["443"]).count(), 1);
//! # Ok::<(), ngxcert::error::Error>(())
//! ```
//!
//! [certbot]: https://certbot.eff.org
//!
#![warn(clippy::pedantic)]

pub mod certbot;
pub mod config;
pub mod error;
pub mod node;
pub mod parser;
pub mod server;

pub use certbot::CertbotCommand;
pub use config::Config;
pub use error::Error;
pub use node::Node;
pub use parser::{loads, loads_strict};
