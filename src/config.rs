use crate::certbot::CertbotCommand;
use crate::error::Error;
use clap::Parser;
use std::path::PathBuf;

/// Request or renew a certificate for the domains served over HTTPS by an nginx config.
#[derive(Parser, Debug, Clone)]
#[command(name = "ngxcert", version)]
pub struct Config {
    /// Certbot certificate name to update (`--cert-name`, see `certbot certificates`).
    pub cert_name: String,

    /// Webroot path serving `/.well-known/acme-challenge`.
    pub webroot: String,

    /// Path to the nginx config. Domains are read from its `server` sections.
    pub nginx_config: PathBuf,

    /// Use the 443 section's domains even when the paired 80 section lists different ones.
    #[arg(short = 'p', long)]
    pub allow_port_mismatch: bool,

    /// Ask certbot for a dry run instead of a real certificate change.
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Only print the certbot command that would run.
    #[arg(short = 's', long)]
    pub script_dry_run: bool,

    /// Reject configs with unbalanced braces or unterminated statements.
    #[arg(long)]
    pub strict: bool,

    /// Print the parsed config back as text and exit.
    #[arg(long, conflicts_with = "json")]
    pub dump: bool,

    /// Print the parsed config as JSON and exit.
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Read the nginx config named by [`Config::nginx_config`] into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be read.
    pub fn read_nginx_config(&self) -> Result<String, Error> {
        Ok(std::fs::read_to_string(&self.nginx_config)?)
    }

    #[must_use]
    pub fn certbot_command(&self, domains: String) -> CertbotCommand {
        CertbotCommand {
            cert_name: self.cert_name.clone(),
            webroot: self.webroot.clone(),
            domains,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let config = Config::try_parse_from([
            "ngxcert",
            "-d",
            "-p",
            "example",
            "/var/www/html",
            "/etc/nginx/sites-enabled/example",
        ])
        .unwrap();
        assert_eq!(config.cert_name, "example");
        assert!(config.dry_run);
        assert!(config.allow_port_mismatch);
        assert!(!config.script_dry_run);
        assert!(!config.strict);

        let cmd = config.certbot_command("example.com".to_string());
        assert!(cmd.dry_run);
        assert_eq!(cmd.webroot, "/var/www/html");
    }

    #[test]
    fn requires_positionals() {
        assert!(Config::try_parse_from(["ngxcert", "example"]).is_err());
    }

    #[test]
    fn dump_conflicts_with_json() {
        assert!(Config::try_parse_from(["ngxcert", "a", "b", "c", "--dump", "--json"]).is_err());
    }
}
