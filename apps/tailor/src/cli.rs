//! CLI argument definitions using clap

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueHint};

use crate::errors::AppError;
use crate::job_source::JobSource;
use crate::models::SectionKind;

/// Rewrite the Experience, Education and Technical Skills sections of a LaTeX résumé
/// for a specific job description.
#[derive(Parser, Debug)]
#[command(name = "tailor")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("job").args(["job_description", "job_file", "job_url"])))]
pub struct Cli {
    /// Résumé source (.tex)
    #[arg(value_hint = ValueHint::FilePath)]
    pub resume: PathBuf,

    /// Job description text
    #[arg(long)]
    pub job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub job_file: Option<PathBuf>,

    /// Scrape the job description from a Workday posting
    #[arg(long, value_hint = ValueHint::Url)]
    pub job_url: Option<String>,

    /// Output path (default: $TAILOR_OUTPUT or updated_resume.tex)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Bullet points per experience entry (default: $TAILOR_BULLET_TARGET or 6)
    #[arg(long)]
    pub bullets: Option<usize>,

    /// Sections to rewrite: experience, education, skills
    #[arg(long, value_delimiter = ',')]
    pub sections: Vec<SectionKind>,

    /// Print the extracted records as JSON and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Where the job description comes from; stdin when no flag was given.
    pub fn job_source(&self) -> JobSource {
        if let Some(text) = &self.job_description {
            JobSource::Text(text.clone())
        } else if let Some(path) = &self.job_file {
            JobSource::File(path.clone())
        } else if let Some(url) = &self.job_url {
            JobSource::Url(url.clone())
        } else {
            JobSource::Stdin
        }
    }

    /// Selected sections; all of them when `--sections` was not given.
    pub fn selected_sections(&self) -> BTreeSet<SectionKind> {
        if self.sections.is_empty() {
            SectionKind::ALL.into_iter().collect()
        } else {
            self.sections.iter().copied().collect()
        }
    }

    /// `--bullets` over the configured default.
    pub fn bullet_target(&self, configured: usize) -> Result<usize, AppError> {
        match self.bullets {
            Some(0) => Err(AppError::Config(
                "--bullets must be at least 1".to_string(),
            )),
            Some(n) => Ok(n),
            None => Ok(configured),
        }
    }
}
