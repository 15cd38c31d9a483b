//! CLI runner - executes commands

use crate::case_management::{
    AddCommentOptions, CaseManagementV1, CaseManagementV1Options, DownloadFileOptions,
    GetCaseOptions, GetCasesOptions, ResolutionCode, StatusPayload, UpdateCaseStatusOptions,
};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Result, ResultExt};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command against a service configured externally
    pub async fn run(&self) -> Result<()> {
        let mut options = CaseManagementV1Options::default();
        if let Some(url) = &self.cli.url {
            options = options.url(url.clone());
        }
        let service = CaseManagementV1::from_external_config(options)?;
        self.run_with(&service).await
    }

    /// Run the CLI command against the given service
    pub async fn run_with(&self, service: &CaseManagementV1) -> Result<()> {
        match &self.cli.command {
            Commands::List {
                status,
                search,
                sort,
                fields,
                limit,
                all,
            } => {
                let mut options = GetCasesOptions::new()
                    .status(status.iter().cloned())
                    .fields(fields.iter().cloned());
                options.search.clone_from(search);
                options.sort.clone_from(sort);
                options.limit = *limit;

                if *all {
                    let cases = service.get_cases_pager(&options)?.get_all().await?;
                    info!("Fetched {} cases", cases.len());
                    self.output(&cases)
                } else {
                    let list = service.get_cases(&options).await?.into_result();
                    self.output(&list)
                }
            }
            Commands::Get {
                case_number,
                fields,
            } => {
                let options = GetCaseOptions::new(case_number).fields(fields.iter().cloned());
                let case = service.get_case(&options).await?.into_result();
                self.output(&case)
            }
            Commands::Comment { case_number, text } => {
                let options = AddCommentOptions::new(case_number, text);
                let comment = service.add_comment(&options).await?.into_result();
                self.output(&comment)
            }
            Commands::Resolve {
                case_number,
                code,
                comment,
            } => {
                let code = ResolutionCode::try_from(*code)?;
                let payload = StatusPayload::resolve(code, comment.clone());
                self.update_status(service, case_number, payload).await
            }
            Commands::Unresolve {
                case_number,
                comment,
            } => {
                let payload = StatusPayload::unresolve(comment);
                self.update_status(service, case_number, payload).await
            }
            Commands::Accept {
                case_number,
                comment,
            } => {
                let payload = StatusPayload::accept(comment.clone());
                self.update_status(service, case_number, payload).await
            }
            Commands::Download {
                case_number,
                file_id,
                output,
            } => {
                let options = DownloadFileOptions::new(case_number, file_id);
                let data = service.download_file(&options).await?.into_result();
                write_file(output, &data)?;
                info!("Wrote {} bytes to {}", data.len(), output.display());
                Ok(())
            }
        }
    }

    async fn update_status(
        &self,
        service: &CaseManagementV1,
        case_number: &str,
        payload: StatusPayload,
    ) -> Result<()> {
        let options = UpdateCaseStatusOptions::new(case_number, payload);
        let case = service.update_case_status(&options).await?.into_result();
        self.output(&case)
    }

    /// Print a value in the selected format
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}
