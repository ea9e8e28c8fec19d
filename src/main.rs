use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use ngxcert::{server, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BANNER: &str = r"
  ngxcert: nginx -> certbot
";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let config = Config::parse();
    let text = config.read_nginx_config()?;
    tracing::debug!("loaded nginx config from {}", config.nginx_config.display());

    let root = if config.strict {
        ngxcert::loads_strict(&text)?
    } else {
        ngxcert::loads(&text)?
    };

    if config.dump {
        println!("{root}");
        return Ok(());
    }
    if config.json {
        println!("{}", serde_json::to_string_pretty(&root)?);
        return Ok(());
    }

    if std::io::stdout().is_terminal() {
        println!("{BANNER}");
    }

    let domains = server::select_domains(&root, config.allow_port_mismatch)?;
    tracing::info!("domains on the 443 section: {domains}");
    let command = config.certbot_command(domains);

    if config.script_dry_run {
        tracing::info!("script dry run, not executing certbot");
        println!("{command}");
    } else {
        command.run().await?;
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ngxcert=info".into()),
        )
        .init();
}
