pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::analytics::ReportExportFormat;
use crate::services::digest_service::DigestService;
use crate::services::export_service::{render, ExportService};
use crate::services::settings_service::SettingsService;
use crate::services::snapshot_service::load_snapshot;
use crate::services::team_overview_service::TeamOverviewService;

const DEFAULT_SETTINGS_FILE: &str = "teamhub.yaml";
const USAGE: &str =
    "usage: teamhub-app <snapshot.json> [settings.yaml] [--format json|markdown|csv] [--now RFC3339]";

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub snapshot_path: PathBuf,
    pub settings_path: PathBuf,
    pub format: ReportExportFormat,
    pub now: Option<DateTime<Utc>>,
}

impl RunOptions {
    pub fn parse<I, S>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut positional = Vec::new();
        let mut format = ReportExportFormat::default();
        let mut now = None;

        let mut iter = args.into_iter().map(Into::into);
        while let Some(arg) = iter.next() {
            if arg == "--format" {
                let value = iter
                    .next()
                    .ok_or_else(|| AppError::validation("--format needs a value"))?;
                format =
                    ReportExportFormat::try_from(value.as_str()).map_err(AppError::validation)?;
            } else if arg == "--now" {
                let value = iter
                    .next()
                    .ok_or_else(|| AppError::validation("--now needs a value"))?;
                now = Some(
                    models::task::parse_task_datetime(&value).map_err(AppError::validation)?,
                );
            } else if arg.starts_with("--") {
                return Err(AppError::validation(format!("unknown option {arg}\n{USAGE}")));
            } else {
                positional.push(arg);
            }
        }

        let mut positional = positional.into_iter();
        let snapshot_path = positional
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| AppError::validation(USAGE))?;
        let settings_path = positional
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

        Ok(Self {
            snapshot_path,
            settings_path,
            format,
            now,
        })
    }
}

pub fn run() {
    if let Err(error) = try_run(std::env::args().skip(1)) {
        eprintln!("teamhub-app failed: {error}");
        std::process::exit(1);
    }
}

fn try_run(args: impl Iterator<Item = String>) -> AppResult<()> {
    let options = RunOptions::parse(args)?;

    let settings_service = SettingsService::new(&options.settings_path);
    let settings = settings_service.get()?;

    crate::utils::logger::init_logging(Path::new(&settings.log_dir), &settings.log_directives)?;

    let now = options.now.unwrap_or_else(Utc::now);
    let snapshot = load_snapshot(&options.snapshot_path)?;

    let overview =
        TeamOverviewService::new(settings.workload_thresholds()).build_overview(&snapshot, &now);

    println!("{}", render(&overview, options.format)?);

    let export = ExportService::new(&settings.reports_dir).export(&overview, options.format, &now)?;
    info!(target: "app::export", path = %export.file_path, "report exported");

    let digest = DigestService::from_settings(&settings)?;
    if digest.is_configured() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        if let Err(err) = runtime.block_on(digest.publish(&overview)) {
            warn!(target: "app::notify", error = %err, "digest publication skipped");
        }
    }

    Ok(())
}
