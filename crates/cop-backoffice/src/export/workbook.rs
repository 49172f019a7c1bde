use std::collections::HashMap;

use serde::Serialize;

use crate::dashboard::metrics::unknown_pole_label;
use crate::dashboard::DashboardReport;
use crate::domain::{volet_label_for_code, Demand, Enterprise, Event};

/// Structured multi-sheet workbook model. Binary packaging (xlsx, ods) is a
/// downstream rendering concern; each sheet serializes itself to CSV.
#[derive(Debug, Clone, Serialize)]
pub struct Workbook {
    pub title: String,
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn to_csv(&self) -> Result<String, super::ExportError> {
        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

pub(crate) fn build(report: &DashboardReport) -> Workbook {
    Workbook {
        title: format!(
            "Rapport employabilité COP ({})",
            report.generated_at.format("%Y-%m-%d")
        ),
        sheets: vec![
            summary_sheet(report),
            events_sheet(report),
            enterprises_sheet(&report.snapshot.enterprises),
            demands_sheet(&report.snapshot.demands),
            volet_sheet(report),
            pole_sheet(report),
        ],
    }
}

fn summary_sheet(report: &DashboardReport) -> Sheet {
    let metrics = &report.metrics;
    let kpis = [
        ("Événements", metrics.events.total_events.to_string()),
        ("Bénéficiaires", metrics.events.total_beneficiaries.to_string()),
        ("Candidats", metrics.events.total_candidates.to_string()),
        ("Candidats retenus", metrics.events.total_retained.to_string()),
        (
            "Taux de conversion (%)",
            format_rate(metrics.events.conversion_rate),
        ),
        ("Entreprises", metrics.enterprises.total_enterprises.to_string()),
        ("Prospects", metrics.enterprises.prospects.to_string()),
        ("Partenaires", metrics.enterprises.partners.to_string()),
        ("Visites", metrics.enterprises.total_visits.to_string()),
        (
            "Visites planifiées",
            metrics.enterprises.planned_visits.to_string(),
        ),
        ("Demandes", metrics.demands.total_demands.to_string()),
        ("Demandes actives", metrics.demands.active_demands.to_string()),
        ("Profils demandés", metrics.demands.total_profiles.to_string()),
    ];

    let mut sheet = Sheet::new("Synthèse");
    sheet.push_row(["Indicateur", "Valeur"]);
    for (label, value) in kpis {
        sheet.push_row([label.to_string(), value]);
    }
    sheet
}

fn events_sheet(report: &DashboardReport) -> Sheet {
    let pole_names: HashMap<&str, &str> = report
        .snapshot
        .poles
        .iter()
        .map(|pole| (pole.id.as_str(), pole.name.as_str()))
        .collect();

    let mut sheet = Sheet::new("Événements");
    sheet.push_row([
        "Identifiant",
        "Intitulé",
        "Date",
        "Lieu",
        "Statut",
        "Volet",
        "Pôle",
        "Bénéficiaires",
        "Candidats",
        "Retenus",
    ]);
    for event in &report.snapshot.events {
        sheet.push_row([
            event.id.clone(),
            text_or_empty(event.title.as_deref()),
            event
                .start_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            text_or_empty(event.location.as_deref()),
            event
                .status
                .map(|status| status.label().to_string())
                .unwrap_or_default(),
            event
                .volet
                .map(|volet| volet.label().to_string())
                .unwrap_or_default(),
            pole_cell(event, &pole_names),
            count_cell(event.beneficiary_count),
            count_cell(event.candidate_count),
            count_cell(event.retained_candidate_count),
        ]);
    }
    sheet
}

fn enterprises_sheet(enterprises: &[Enterprise]) -> Sheet {
    let mut sheet = Sheet::new("Entreprises");
    sheet.push_row([
        "Identifiant",
        "Nom",
        "Secteur",
        "Statut",
        "Partenaire prioritaire",
    ]);
    for enterprise in enterprises {
        sheet.push_row([
            enterprise.id.clone(),
            text_or_empty(enterprise.name.as_deref()),
            text_or_empty(enterprise.sector.as_deref()),
            enterprise
                .status
                .map(|status| status.label().to_string())
                .unwrap_or_default(),
            if enterprise.preferred_partner { "Oui" } else { "Non" }.to_string(),
        ]);
    }
    sheet
}

fn demands_sheet(demands: &[Demand]) -> Sheet {
    let mut sheet = Sheet::new("Demandes");
    sheet.push_row(["Identifiant", "Entreprise", "Statut", "Profils demandés"]);
    for demand in demands {
        sheet.push_row([
            demand.id.clone(),
            text_or_empty(demand.enterprise_name.as_deref()),
            demand
                .status
                .map(|status| status.label().to_string())
                .unwrap_or_default(),
            demand.requested_profiles.join(", "),
        ]);
    }
    sheet
}

fn volet_sheet(report: &DashboardReport) -> Sheet {
    let mut sheet = Sheet::new("Par volet");
    sheet.push_row(["Volet", "Libellé", "Événements"]);
    for (code, count) in &report.metrics.events.events_by_volet {
        sheet.push_row([
            code.clone(),
            volet_label_for_code(code).to_string(),
            count.to_string(),
        ]);
    }
    sheet
}

fn pole_sheet(report: &DashboardReport) -> Sheet {
    let metrics = &report.metrics.events;
    let mut sheet = Sheet::new("Par pôle");
    sheet.push_row(["Pôle", "Événements", "Taux de conversion (%)"]);
    for (pole, count) in &metrics.events_by_pole {
        let rate = metrics
            .conversion_rate_by_pole
            .get(pole)
            .copied()
            .unwrap_or(0.0);
        sheet.push_row([pole.clone(), count.to_string(), format_rate(rate)]);
    }
    sheet
}

fn pole_cell(event: &Event, pole_names: &HashMap<&str, &str>) -> String {
    match event.pole_id.as_deref() {
        Some(pole_id) => pole_names
            .get(pole_id)
            .map(|name| (*name).to_string())
            .unwrap_or_else(|| unknown_pole_label(pole_id)),
        None => String::new(),
    }
}

fn count_cell(value: Option<u32>) -> String {
    value.unwrap_or(0).to_string()
}

fn text_or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

pub(crate) fn format_rate(rate: f64) -> String {
    format!("{rate:.2}")
}
