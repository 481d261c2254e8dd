use anyhow::Context;
use colored::Colorize;
use postboard_server::{PostboardConfig, PostboardServer};
use postboard_types::hashtag;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Tags(args) => cmd_tags(args, &cli.format),
        Command::Config(args) => cmd_config(args, &cli.format),
    }
}

/// Load the configuration file, if any, and apply flag overrides.
fn resolve_config(source: ConfigSource) -> anyhow::Result<PostboardConfig> {
    let mut config = match &source.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            PostboardConfig::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => PostboardConfig::default(),
    };
    if let Some(bind) = source.bind {
        config.server.bind_addr = bind;
    }
    if let Some(url) = source.public_url {
        config.server.public_base_url = url;
    }
    if let Some(dir) = source.blob_dir {
        config.blobs.dir = Some(dir);
    }
    debug!(
        bind = %config.server.bind_addr,
        public_url = %config.server.public_base_url,
        blob_dir = ?config.blobs.dir,
        "config resolved"
    );
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(args.source)?;
    let blobs = match &config.blobs.dir {
        Some(dir) => dir.display().to_string(),
        None => "memory".into(),
    };
    println!(
        "{} Postboard on {} (blobs: {})",
        "▶".green().bold(),
        config.server.bind_addr.to_string().bold(),
        blobs.cyan()
    );

    let server = PostboardServer::new(config).context("starting post service")?;
    let runtime = tokio::runtime::Runtime::new().context("building tokio runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_tags(args: TagsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let tags = hashtag::extract_and_dedupe(&args.text.join(" "));
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&tags)?),
        OutputFormat::Text if tags.is_empty() => println!("{}", "no hashtags".dimmed()),
        OutputFormat::Text => {
            for tag in &tags {
                println!("{}", format!("#{tag}").yellow());
            }
        }
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = resolve_config(args.source)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => print!("{}", toml::to_string_pretty(&config)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let path = dir.join("board.toml");
        std::fs::write(&path, "[server]\nbind_addr = \"127.0.0.1:9000\"\n[ledger]\nmax_posts = 5\n").unwrap();

        let config = resolve_config(ConfigSource {
            config: Some(path),
            bind: Some("0.0.0.0:7000".parse().unwrap()),
            blob_dir: Some(dir.join("blobs")),
            public_url: None,
        })
        .unwrap();
        assert_eq!(config.server.bind_addr.port(), 7000);
        assert_eq!(config.ledger.max_posts, Some(5));
        assert_eq!(config.blobs.dir, Some(dir.join("blobs")));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = resolve_config(ConfigSource {
            config: Some("/definitely/not/here.toml".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("here.toml"));
    }

    #[test]
    fn defaults_without_file() {
        let config = resolve_config(ConfigSource::default()).unwrap();
        assert_eq!(config, PostboardConfig::default());
    }
}
