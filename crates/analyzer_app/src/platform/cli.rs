use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use analyzer_engine::{AnalyzerSettings, DEFAULT_ENDPOINT};
use analyzer_logging::LogDestination;
use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "analyzer_app",
    version,
    about = "Match a résumé PDF against a job description using the remote analysis service"
)]
pub struct Cli {
    /// Résumé to upload (PDF, at most 5 MB)
    #[arg(long)]
    pub resume: PathBuf,

    /// Job description text
    #[arg(
        long,
        conflicts_with = "job_description_file",
        required_unless_present = "job_description_file"
    )]
    pub job_description: Option<String>,

    /// Read the job description from a file, or `-` for stdin
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    /// Full URL of the analysis endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Log debug output
    #[arg(long)]
    pub verbose: bool,

    /// Also write logs to ./analyzer.log
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    pub fn settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            endpoint: self.endpoint.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(self.timeout),
            ..AnalyzerSettings::default()
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_file {
            LogDestination::both_default()
        } else {
            LogDestination::Terminal
        }
    }

    pub fn read_job_description(&self) -> Result<String> {
        self.read_job_description_from(io::stdin())
    }

    /// Like [`Cli::read_job_description`], with `-` reading from `stdin`.
    pub fn read_job_description_from(&self, mut stdin: impl Read) -> Result<String> {
        if let Some(text) = &self.job_description {
            return Ok(text.clone());
        }
        match self.job_description_file.as_deref() {
            Some(path) if path == Path::new("-") => {
                let mut text = String::new();
                stdin
                    .read_to_string(&mut text)
                    .context("reading job description from stdin")?;
                Ok(text)
            }
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("reading job description from {}", path.display())),
            None => Ok(String::new()),
        }
    }
}
