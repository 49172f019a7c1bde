use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, ValueEnum};
use cop_backoffice::dashboard::{DashboardEvent, DashboardSnapshot, DashboardState};
use cop_backoffice::error::AppError;
use cop_backoffice::export::{export_document, export_workbook, ExportError};
use cop_backoffice::import::RosterImporter;
use cop_backoffice::store::EventStore;

use crate::infra::InMemoryCenter;

#[derive(Args, Debug)]
pub(crate) struct DashboardReportArgs {
    /// Roster CSV merged into the seeded events before aggregation
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Output form of the report
    #[arg(long, value_enum, default_value = "text")]
    pub(crate) format: ReportFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportFormat {
    Text,
    Json,
    Workbook,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the export-before-aggregation refusal demonstration
    #[arg(long)]
    pub(crate) skip_gate_demo: bool,
}

pub(crate) fn run_dashboard_report(args: DashboardReportArgs) -> Result<(), AppError> {
    let center = InMemoryCenter::seeded();
    if let Some(path) = args.roster_csv {
        let events = RosterImporter::from_path(path)?;
        let imported = center.add_events(events)?;
        println!("{imported} événement(s) importé(s) depuis le roster\n");
    }

    let state = aggregate(&center)?;

    match args.format {
        ReportFormat::Text => {
            let document = export_document(&state)?;
            println!("{}", document.render_text());
        }
        ReportFormat::Json => {
            let report = state.report().ok_or(ExportError::NotReady)?;
            let rendered = serde_json::to_string_pretty(&report.metrics)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
            println!("{rendered}");
        }
        ReportFormat::Workbook => {
            let workbook = export_workbook(&state)?;
            println!("{}", workbook.title);
            for sheet in &workbook.sheets {
                println!("\n--- {} ---", sheet.name);
                print!("{}", sheet.to_csv().map_err(AppError::Export)?);
            }
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let center = InMemoryCenter::seeded();

    if !args.skip_gate_demo {
        // Exports must refuse to run until an aggregation pass completes.
        if let Err(err) = export_workbook(&DashboardState::Idle) {
            println!("Tentative d'export avant agrégation: {err}\n");
        }
    }

    println!("Actualisation du tableau de bord...\n");
    let state = aggregate(&center)?;

    let document = export_document(&state)?;
    println!("{}", document.render_text());

    let workbook = export_workbook(&state)?;
    println!("Classeur « {} »: {} feuilles", workbook.title, workbook.sheets.len());
    for sheet in &workbook.sheets {
        println!("  - {} ({} lignes)", sheet.name, sheet.rows.len());
    }

    Ok(())
}

fn aggregate(center: &InMemoryCenter) -> Result<DashboardState, AppError> {
    let state = DashboardState::Idle.apply(DashboardEvent::RefreshRequested { at: Utc::now() });
    let snapshot = DashboardSnapshot::load(center, center, center, center, center)?;
    Ok(state.apply(DashboardEvent::CollectionsResolved {
        snapshot,
        at: Utc::now(),
    }))
}
