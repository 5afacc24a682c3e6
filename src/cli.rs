// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{converter_from_config, DocumentConverter, LocalImageStore};
use crate::environment::EnvironmentConfig;
use crate::image_validator::ImageValidator;
use crate::normalizer::{FieldErrors, Normalizer, RawSubmission};
use crate::render::{render_by_id, wrap_document, DocumentMetadata};
use crate::types::ResumeRecord;
use crate::utils::get_file_extension;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "resume-builder")]
#[command(about = "Build a resume from a short form and export it as PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the web server (default)
    Serve,
    /// Render a resume record file to HTML or PDF
    Render {
        /// Record in YAML or JSON
        #[arg(long)]
        input: PathBuf,
        /// Template id: 1 (classic) or 2 (modern)
        #[arg(long, default_value_t = 1)]
        template: u8,
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Pdf,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Render {
            input,
            template,
            format,
            output,
        } => render_file(&input, template, format, &output).await,
    }
}

async fn serve() -> Result<()> {
    let port = std::env::var("ROCKET_PORT")
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT environment variable not set"))?
        .parse::<u16>()
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
    info!("Parsed port: {}", port);

    let config = EnvironmentConfig::load()?;
    let converter = converter_from_config(&config.converter)?;

    info!("Server: http://0.0.0.0:{}", port);
    start_web_server(config, converter, port).await
}

async fn render_file(
    input: &Path,
    template: u8,
    format: OutputFormat,
    output: &Path,
) -> Result<()> {
    let record = load_record(input)?;

    let body = render_by_id(&record, template, None)?;
    let metadata = DocumentMetadata::for_record(&record);
    let markup = wrap_document(&body, &metadata);

    let bytes = match format {
        OutputFormat::Html => markup.into_bytes(),
        OutputFormat::Pdf => {
            let config = EnvironmentConfig::load()?;
            let converter = converter_from_config(&config.converter)?;
            converter.convert(&markup, &metadata).await?
        }
    };

    tokio::fs::write(output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Rendered {} with template {} to {} ({} bytes)",
        input.display(),
        template,
        output.display(),
        bytes.len()
    );
    Ok(())
}

/// Read a record from disk and hold it to the same rules as a form submission
pub fn load_record(path: &Path) -> Result<ResumeRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let extension = get_file_extension(&path.to_string_lossy());
    let record: ResumeRecord = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        _ => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
    };

    // No picture upload here, so the store is never written to
    let store = LocalImageStore::new(PathBuf::from("uploads"));
    let normalizer = Normalizer::new(ImageValidator::default(), &store);

    normalizer
        .normalize(
            &RawSubmission::from_record(&record),
            record.profile_picture.as_deref(),
        )
        .map_err(|errors| {
            anyhow::anyhow!("Invalid record {}: {}", path.display(), describe(&errors))
        })
}

fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECORD_YAML: &str = r#"
name: Ada Lovelace
email: ada@example.com
phone: "+44 20 7946 0000"
education:
  school: University of London
  degree: Mathematics
  year: "1835"
work:
  company: Analytical Engine Ltd
  position: Programmer
  years: "1842-1843"
skills: Mathematics, Algorithms
"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "resume-builder",
            "render",
            "--input",
            "ada.yaml",
            "--template",
            "2",
            "--format",
            "pdf",
            "--output",
            "ada.pdf",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Render {
                template, format, ..
            }) => {
                assert_eq!(template, 2);
                assert_eq!(format, OutputFormat::Pdf);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::try_parse_from(["resume-builder"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_load_yaml_record() {
        let file = write_temp(".yaml", RECORD_YAML);
        let record = load_record(file.path()).unwrap();
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.address, "");
        assert_eq!(record.skills_list(), vec!["Mathematics", "Algorithms"]);
    }

    #[test]
    fn test_load_rejects_invalid_record() {
        let file = write_temp(".yaml", &RECORD_YAML.replace("ada@example.com", "not-an-email"));
        let err = load_record(file.path()).unwrap_err();
        assert!(err
            .to_string()
            .contains("email: Please enter a valid email address."));
    }

    #[tokio::test]
    async fn test_render_html_file() {
        let input = write_temp(".yaml", RECORD_YAML);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("ada.html");

        render_file(input.path(), 2, OutputFormat::Html, &output)
            .await
            .unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("<title>Resume - Ada Lovelace</title>"));
        assert!(html.contains("resume-template-2"));
    }

    #[tokio::test]
    async fn test_render_unknown_template_fails() {
        let input = write_temp(".yaml", RECORD_YAML);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("ada.html");

        let err = render_file(input.path(), 3, OutputFormat::Html, &output)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown template id 3"));
        assert!(!output.exists());
    }
}
