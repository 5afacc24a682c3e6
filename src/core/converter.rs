// src/core/converter.rs
//! HTML to PDF conversion through an external program or HTTP service

use reqwest::multipart::{Form, Part};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info, trace};

use crate::environment::{ConverterConfig, ConverterKind};
use crate::error::ConversionError;
use crate::render::DocumentMetadata;

const CONVERT_HTML_ENDPOINT: &str = "/forms/chromium/convert/html";

#[rocket::async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(
        &self,
        markup: &str,
        metadata: &DocumentMetadata,
    ) -> Result<Vec<u8>, ConversionError>;
}

pub fn converter_from_config(
    config: &ConverterConfig,
) -> Result<Arc<dyn DocumentConverter>, ConversionError> {
    let converter: Arc<dyn DocumentConverter> = match config.kind {
        ConverterKind::Command => Arc::new(
            CommandConverter::new(config.program.clone(), config.timeout_seconds)
                .with_args(config.args.clone()),
        ),
        ConverterKind::Service => Arc::new(ServiceConverter::new(
            config.service_url.clone(),
            config.timeout_seconds,
        )?),
    };
    Ok(converter)
}

/// Runs e.g. `wkhtmltopdf --quiet --title <title> - -`
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
    timeout_seconds: u64,
}

impl CommandConverter {
    pub fn new(program: String, timeout_seconds: u64) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout_seconds,
        }
    }

    /// Leading arguments, e.g. a wrapper like `xvfb-run -a wkhtmltopdf`
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

#[rocket::async_trait]
impl DocumentConverter for CommandConverter {
    async fn convert(
        &self,
        markup: &str,
        metadata: &DocumentMetadata,
    ) -> Result<Vec<u8>, ConversionError> {
        info!("Converting document with {}", self.program);

        let spawn_error = |source| ConversionError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("--quiet")
            .arg("--title")
            .arg(&metadata.title)
            .arg("-")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin while collecting stdout, both under the timeout
        let mut stdin = child.stdin.take();
        let feed_stdin = async move {
            if let Some(stdin) = stdin.as_mut() {
                stdin.write_all(markup.as_bytes()).await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let run = async move { tokio::join!(feed_stdin, child.wait_with_output()) };
        let (fed, output) = tokio::time::timeout(Duration::from_secs(self.timeout_seconds), run)
            .await
            .map_err(|_| {
                error!("{} timed out after {}s", self.program, self.timeout_seconds);
                ConversionError::Timeout(self.timeout_seconds)
            })?;
        let output = output.map_err(spawn_error)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("{} failed: {}", self.program, stderr);
            return Err(ConversionError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        fed.map_err(spawn_error)?;

        if output.stdout.is_empty() {
            return Err(ConversionError::EmptyOutput);
        }

        trace!("Converter produced {} bytes", output.stdout.len());
        Ok(output.stdout)
    }
}

/// Posts the document to a Gotenberg-compatible conversion service
pub struct ServiceConverter {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceConverter {
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self, ConversionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[rocket::async_trait]
impl DocumentConverter for ServiceConverter {
    async fn convert(
        &self,
        markup: &str,
        metadata: &DocumentMetadata,
    ) -> Result<Vec<u8>, ConversionError> {
        let url = format!("{}{}", self.base_url, CONVERT_HTML_ENDPOINT);

        let metadata_json = serde_json::json!({
            "Title": metadata.title,
            "Author": metadata.author,
            "Creator": metadata.creator,
        });

        let form = Form::new()
            .part(
                "files",
                Part::text(markup.to_string())
                    .file_name("index.html")
                    .mime_str("text/html")?,
            )
            .text("metadata", metadata_json.to_string());

        info!("Calling conversion service: {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Conversion service error response: {}", body);
            return Err(ConversionError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ConversionError::EmptyOutput);
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> DocumentMetadata {
        DocumentMetadata {
            title: "Resume - Test".to_string(),
            author: "Test".to_string(),
            creator: "Resume Builder".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let converter = CommandConverter::new("definitely-not-a-real-converter".to_string(), 5);
        let err = converter.convert("<p>x</p>", &metadata()).await.unwrap_err();
        assert!(matches!(err, ConversionError::Spawn { .. }));
    }

    fn shell(script: &str, timeout_seconds: u64) -> CommandConverter {
        CommandConverter::new("sh".to_string(), timeout_seconds)
            .with_args(vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn test_failing_program_reports_status() {
        let converter = shell("echo 'render failed' >&2; exit 3", 5);
        let err = converter.convert("<p>x</p>", &metadata()).await.unwrap_err();
        match err {
            ConversionError::Failed { status, stderr } => {
                assert!(status.contains('3'), "{status}");
                assert_eq!(stderr, "render failed");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stdout_is_returned() {
        let converter = shell("cat", 5);
        let pdf = converter.convert("<p>x</p>", &metadata()).await.unwrap();
        assert_eq!(pdf, b"<p>x</p>");
    }

    #[tokio::test]
    async fn test_timeout_covers_stalled_input() {
        // Never reads stdin, so a large document fills the pipe
        let converter = shell("exec sleep 30", 1);
        let markup = "x".repeat(4 * 1024 * 1024);

        let started = std::time::Instant::now();
        let err = converter.convert(&markup, &metadata()).await.unwrap_err();
        assert!(matches!(err, ConversionError::Timeout(1)), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_empty_output_is_rejected() {
        let converter = shell("cat > /dev/null", 5);
        let err = converter.convert("<p>x</p>", &metadata()).await.unwrap_err();
        assert!(matches!(err, ConversionError::EmptyOutput));
    }

    #[test]
    fn test_service_url_is_normalized() {
        let converter = ServiceConverter::new("http://localhost:3000/".to_string(), 5).unwrap();
        assert_eq!(converter.base_url, "http://localhost:3000");
    }
}
