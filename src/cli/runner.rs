//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::http::HttpClient;
use crate::playlist::{Playlist, PlaylistInfo};
use futures::TryStreamExt;
use serde_json::json;
use std::io::Write;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        self.run_to(&mut std::io::stdout()).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_to(&self, out: &mut dyn Write) -> Result<()> {
        let config = self.load_config()?;
        let client =
            HttpClient::with_config(config.http_config()).context("Invalid HTTP settings")?;

        match &self.cli.command {
            Commands::Info { url } => {
                let playlist = Playlist::with_config(url, &client, config)?;
                let info = playlist.info().await?;
                self.write_info(out, &info)
            }
            Commands::Videos { url, until } => {
                let playlist = Playlist::with_config(url, &client, config.clone())?;
                self.write_videos(out, &playlist, &config, until.as_deref())
                    .await
            }
            Commands::Count { url } => {
                let playlist = Playlist::with_config(url, &client, config)?;
                let length = playlist.length().await?;
                match self.cli.format {
                    OutputFormat::Json => writeln!(out, "{}", json!({ "count": length }))?,
                    OutputFormat::Pretty => writeln!(out, "{length}")?,
                }
                Ok(())
            }
        }
    }

    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => {
                debug!(path = %path.display(), "Loading client config");
                ClientConfig::from_file(path)
                    .with_context(|| format!("Invalid config '{}'", path.display()))
            }
            None => Ok(ClientConfig::default()),
        }
    }

    fn write_info(&self, out: &mut dyn Write, info: &PlaylistInfo) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string(info)?)?;
            }
            OutputFormat::Pretty => {
                writeln!(out, "Title:        {}", info.title)?;
                writeln!(out, "URL:          {}", info.url)?;
                if !info.description.is_empty() {
                    writeln!(out, "Description:  {}", info.description)?;
                }
                writeln!(out, "Videos:       {}", info.length)?;
                writeln!(out, "Views:        {}", info.views)?;
                if let Some(owner) = &info.owner {
                    writeln!(out, "Owner:        {owner}")?;
                }
                if let Some(owner_url) = &info.owner_url {
                    writeln!(out, "Owner URL:    {owner_url}")?;
                }
                if let Some(date) = info.last_updated {
                    writeln!(out, "Last updated: {date}")?;
                }
            }
        }
        Ok(())
    }

    /// Print each page as soon as it arrives
    async fn write_videos(
        &self,
        out: &mut dyn Write,
        playlist: &Playlist<'_>,
        config: &ClientConfig,
        until: Option<&str>,
    ) -> Result<()> {
        let mut batches = playlist.paginate(until).await?;
        let mut page = 0usize;

        while let Some(batch) = batches.try_next().await? {
            page += 1;
            let urls: Vec<String> = batch
                .iter()
                .map(|link| format!("{}{link}", config.base()))
                .collect();

            match self.cli.format {
                OutputFormat::Json => {
                    writeln!(out, "{}", json!({ "page": page, "videos": urls }))?;
                }
                OutputFormat::Pretty => {
                    for url in &urls {
                        writeln!(out, "{url}")?;
                    }
                }
            }
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<script>ytcfg.set({"INNERTUBE_API_KEY": "k"});</script>
<script>var ytInitialData = {
  "contents": {"twoColumnBrowseResultsRenderer": {"tabs": [{"tabRenderer": {"content":
    {"sectionListRenderer": {"contents": [{"itemSectionRenderer": {"contents": [
      {"playlistVideoListRenderer": {"contents": [
        {"playlistVideoRenderer": {"videoId": "a"}},
        {"playlistVideoRenderer": {"videoId": "b"}}
      ]}}
    ]}}]}}}}]}},
  "sidebar": {"playlistSidebarRenderer": {"items": [{"playlistSidebarPrimaryInfoRenderer": {
    "title": {"runs": [{"text": "CLI"}]},
    "stats": [{"runs": [{"text": "2"}, {"text": " videos"}]}, {"simpleText": "1,000 views"}]
  }}]}}
};</script>"#;

    async fn run_with_server(args: &[&str]) -> String {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlist"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(config_file, "base_url: {}", server.uri()).unwrap();

        let config_path = config_file.path().to_string_lossy().to_string();
        let mut argv = vec!["tubelist", "-C", config_path.as_str()];
        argv.extend_from_slice(args);
        let runner = Runner::new(Cli::try_parse_from(argv).unwrap());

        let mut out = Vec::new();
        runner.run_to(&mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_count_command() {
        let output = run_with_server(&["count", "https://www.youtube.com/playlist?list=PL1"]).await;
        assert_eq!(output, "2\n");
    }

    #[tokio::test]
    async fn test_count_command_json() {
        let output = run_with_server(&[
            "count",
            "https://www.youtube.com/playlist?list=PL1",
            "--format",
            "json",
        ])
        .await;
        assert_eq!(output, "{\"count\":2}\n");
    }

    #[tokio::test]
    async fn test_info_command() {
        let output = run_with_server(&["info", "https://www.youtube.com/playlist?list=PL1"]).await;
        assert!(output.contains("Title:        CLI"));
        assert!(output.contains("Videos:       2"));
        assert!(output.contains("Views:        1000"));
        assert!(!output.contains("Owner"));
    }

    #[tokio::test]
    async fn test_videos_command_until() {
        let output = run_with_server(&[
            "videos",
            "https://www.youtube.com/playlist?list=PL1",
            "--until",
            "b",
        ])
        .await;
        assert_eq!(output.lines().count(), 1);
        assert!(output.trim_end().ends_with("/watch?v=a"));
    }

    #[tokio::test]
    async fn test_invalid_header_in_config() {
        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(config_file, "headers:\n  \"Bad Header\": x").unwrap();

        let config_path = config_file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "tubelist",
            "-C",
            config_path.as_str(),
            "count",
            "https://www.youtube.com/playlist?list=PL1",
        ])
        .unwrap();
        let mut out = Vec::new();
        let err = Runner::new(cli).run_to(&mut out).await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid HTTP settings: Configuration error"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let cli = Cli::try_parse_from([
            "tubelist",
            "-C",
            "/nonexistent/tubelist.yaml",
            "count",
            "https://www.youtube.com/playlist?list=PL1",
        ])
        .unwrap();
        let mut out = Vec::new();
        let err = Runner::new(cli).run_to(&mut out).await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));
    }
}
