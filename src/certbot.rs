//! Invocation of the external `certbot` client.
use crate::error::Error;
use std::fmt;
use tokio::process::Command;
use tokio::signal;

const CERTBOT: &str = "certbot";

/// A `certbot certonly` run in webroot mode for a set of domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertbotCommand {
    pub cert_name: String,
    pub webroot: String,
    /// Comma separated, as accepted by `-d`.
    pub domains: String,
    /// Pass `--dry-run`, asking certbot to test against the staging server without saving.
    pub dry_run: bool,
}

impl CertbotCommand {
    #[must_use]
    pub fn args(&self) -> Vec<&str> {
        let mut args = vec!["certonly"];
        if self.dry_run {
            args.push("--dry-run");
        }
        args.extend([
            "--cert-name",
            self.cert_name.as_str(),
            "--webroot",
            "-w",
            self.webroot.as_str(),
            "-d",
            self.domains.as_str(),
        ]);
        args
    }

    /// Run certbot, waiting for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if certbot can't be started, [`Error::CertbotFailed`] if it exits
    /// unsuccessfully and [`Error::Interrupted`] if a Ctrl-C arrives first.
    pub async fn run(&self) -> Result<(), Error> {
        tracing::info!("running: {self}");
        let mut child = Command::new(CERTBOT)
            .args(self.args())
            .kill_on_drop(true)
            .spawn()?;

        tokio::select! {
            status = child.wait() => {
                let status = status?;
                if status.success() {
                    tracing::info!("certbot finished");
                    Ok(())
                } else {
                    Err(Error::CertbotFailed(status.code()))
                }
            }
            _ = signal::ctrl_c() => {
                tracing::info!("quitting from signal");
                Err(Error::Interrupted)
            }
        }
    }
}

impl fmt::Display for CertbotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CERTBOT} {}", self.args().join(" "))
    }
}
