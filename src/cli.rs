// src/cli.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use crate::core::{AppConfig, ServiceClient};
use crate::types::job::JobSearch;
use crate::types::resume::ResumeFile;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Job application tracker: gateway and backend service client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Bearer token forwarded to the backend services
    #[arg(long, env = "JOBTRACK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the dashboard gateway
    Serve,
    /// Show the resolved backend service URLs
    Services,
    /// List the applications of a user
    Applications { user_id: i64 },
    /// Show the profile of the authenticated user
    Profile,
    /// Score a resume against a job description
    AtsScore {
        #[arg(long)]
        resume: PathBuf,
        /// Job description text, or @path to read it from a file
        #[arg(long)]
        job_description: String,
    },
    /// Upload a resume for parsing
    UploadResume {
        path: PathBuf,
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Search job listings
    Jobs {
        query: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = AppConfig::load()?;

    match cli.command {
        Command::Serve => start_web_server(config).await,
        command => {
            let client = ServiceClient::from_config(&config)?.with_bearer_token(cli.token);
            run_client_command(command, &client).await
        }
    }
}

async fn run_client_command(command: Command, client: &ServiceClient) -> Result<()> {
    match command {
        Command::Serve => {
            anyhow::bail!("serve does not run against a single client");
        }

        Command::Services => {
            for (name, url) in client.registry().entries() {
                println!("{:<30} {}", name.key(), url);
            }
        }

        Command::Applications { user_id } => {
            let applications = client.fetch_applications(user_id).await?;
            info!("Fetched {} applications for user {}", applications.len(), user_id);
            print_json(&applications)?;
        }

        Command::Profile => {
            let profile = client.fetch_profile().await?;
            print_json(&profile)?;
        }

        Command::AtsScore {
            resume,
            job_description,
        } => {
            let job_description = read_text_argument(&job_description).await?;
            if job_description.trim().is_empty() {
                anyhow::bail!("Job description is empty");
            }
            let resume = ResumeFile::from_path(&resume).await?;
            match client.check_ats_score(&resume, job_description.trim()).await {
                Ok(result) => print_json(&result)?,
                Err(e) => {
                    error!("ATS score check failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Command::UploadResume { path, user_id } => {
            let resume = ResumeFile::from_path(&path).await?;
            let stored = client.upload_resume(&resume, user_id).await?;
            print_json(&stored)?;
        }

        Command::Jobs {
            query,
            location,
            limit,
        } => {
            let jobs = client
                .search_jobs(&JobSearch {
                    query,
                    location,
                    limit,
                })
                .await?;
            print_json(&jobs)?;
        }
    }

    Ok(())
}

/// `@path` reads the value from a file, anything else is taken literally.
async fn read_text_argument(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(Path::new(path))
            .await
            .with_context(|| format!("Failed to read {}", path)),
        None => Ok(value.to_string()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ats_score_arguments() {
        let cli = Cli::parse_from([
            "jobtrack",
            "ats-score",
            "--resume",
            "cv.pdf",
            "--job-description",
            "@jd.txt",
        ]);
        match cli.command {
            Command::AtsScore {
                resume,
                job_description,
            } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(job_description, "@jd.txt");
            }
            _ => panic!("expected ats-score"),
        }
    }

    #[test]
    fn json_logs_flag_is_global() {
        let cli = Cli::parse_from(["jobtrack", "services", "--json-logs"]);
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Command::Services));
    }

    #[tokio::test]
    async fn literal_text_argument_is_kept() {
        let text = read_text_argument("Rust engineer").await.unwrap();
        assert_eq!(text, "Rust engineer");
    }

    #[tokio::test]
    async fn at_prefix_reads_a_file() {
        let path = std::env::temp_dir().join(format!("jd-{}.txt", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "Backend role").await.unwrap();

        let text = read_text_argument(&format!("@{}", path.display()))
            .await
            .unwrap();
        assert_eq!(text, "Backend role");

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
