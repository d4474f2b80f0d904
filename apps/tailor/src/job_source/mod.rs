//! Job-description sources: direct text, a file, standard input, or a job-posting page.

pub mod workday;

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tracing::info;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    Text(String),
    File(PathBuf),
    Url(String),
    Stdin,
}

impl JobSource {
    /// Resolves the source to non-empty job-description text.
    ///
    /// `scrape_timeout` is the page-load budget for `Url` sources.
    pub async fn resolve(self, scrape_timeout: Duration) -> Result<String, AppError> {
        let text = match self {
            JobSource::Text(text) => text,
            JobSource::File(path) => {
                if !path.is_file() {
                    return Err(AppError::SourceFileMissing(path));
                }
                tokio::fs::read_to_string(&path).await?
            }
            JobSource::Url(url) => workday::scrape_job_description(&url, scrape_timeout).await?,
            JobSource::Stdin => {
                eprintln!("Paste the job description, then press Ctrl-D:");
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                text
            }
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(AppError::EmptyJobDescription);
        }
        info!("Job description: {} characters", text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BUDGET: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_text_source_is_trimmed() {
        let text = JobSource::Text("  Senior Rust Engineer\n".to_string())
            .resolve(BUDGET)
            .await
            .unwrap();
        assert_eq!(text, "Senior Rust Engineer");
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let err = JobSource::Text(" \n ".to_string())
            .resolve(BUDGET)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyJobDescription));
    }

    #[tokio::test]
    async fn test_file_source_reads_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "We need Kubernetes experience.").unwrap();
        let text = JobSource::File(file.path().to_path_buf())
            .resolve(BUDGET)
            .await
            .unwrap();
        assert_eq!(text, "We need Kubernetes experience.");
    }

    #[tokio::test]
    async fn test_missing_file_is_source_file_missing() {
        let err = JobSource::File(PathBuf::from("/no/such/job.txt"))
            .resolve(BUDGET)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SourceFileMissing(_)));
    }

    #[tokio::test]
    async fn test_foreign_url_fails_before_any_request() {
        let err = JobSource::Url("https://jobs.example.com/posting/1".to_string())
            .resolve(BUDGET)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SourceUrlInvalid(_)));
    }
}
