use std::fmt::Write as _;

use serde::Serialize;

use super::workbook::format_rate;
use crate::dashboard::DashboardReport;
use crate::domain::volet_label_for_code;

/// Paginated report model: cover, executive summary, breakdowns, raw
/// tables, closing. Rendering to slides or PDF happens downstream; the
/// plain-text rendering below backs the CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: String,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    KpiBox { label: String, value: String },
    BarRow { label: String, count: u64, share_pct: f64 },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
}

impl ReportDocument {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", self.subtitle);
        for page in &self.pages {
            let _ = writeln!(out, "\n=== {} ===", page.title);
            for block in &page.blocks {
                match block {
                    Block::Paragraph { text } => {
                        let _ = writeln!(out, "{text}");
                    }
                    Block::KpiBox { label, value } => {
                        let _ = writeln!(out, "  [{label}: {value}]");
                    }
                    Block::BarRow {
                        label,
                        count,
                        share_pct,
                    } => {
                        let width = (share_pct / 5.0).round() as usize;
                        let _ = writeln!(
                            out,
                            "  {label:<32} {bar:<20} {count} ({share_pct:.1}%)",
                            bar = "#".repeat(width.min(20)),
                        );
                    }
                    Block::Table { headers, rows } => {
                        let _ = writeln!(out, "  {}", headers.join(" | "));
                        for row in rows {
                            let _ = writeln!(out, "  {}", row.join(" | "));
                        }
                    }
                }
            }
        }
        out
    }
}

pub(crate) fn build(report: &DashboardReport) -> ReportDocument {
    ReportDocument {
        title: "Rapport d'employabilité".to_string(),
        subtitle: format!(
            "Centre d'orientation professionnelle, généré le {}",
            report.generated_at.format("%Y-%m-%d")
        ),
        pages: vec![
            cover_page(report),
            summary_page(report),
            volet_page(report),
            pole_page(report),
            enterprise_page(report),
            demand_page(report),
            closing_page(),
        ],
    }
}

fn cover_page(report: &DashboardReport) -> Page {
    Page {
        title: "Couverture".to_string(),
        blocks: vec![Block::Paragraph {
            text: format!(
                "Synthèse des activités d'employabilité: {} événements, {} entreprises, {} demandes.",
                report.metrics.events.total_events,
                report.metrics.enterprises.total_enterprises,
                report.metrics.demands.total_demands,
            ),
        }],
    }
}

fn summary_page(report: &DashboardReport) -> Page {
    let metrics = &report.metrics;
    Page {
        title: "Résumé exécutif".to_string(),
        blocks: vec![
            Block::KpiBox {
                label: "Événements".to_string(),
                value: metrics.events.total_events.to_string(),
            },
            Block::KpiBox {
                label: "Bénéficiaires".to_string(),
                value: metrics.events.total_beneficiaries.to_string(),
            },
            Block::KpiBox {
                label: "Taux de conversion".to_string(),
                value: format!("{} %", format_rate(metrics.events.conversion_rate)),
            },
            Block::KpiBox {
                label: "Partenaires".to_string(),
                value: metrics.enterprises.partners.to_string(),
            },
            Block::KpiBox {
                label: "Demandes actives".to_string(),
                value: metrics.demands.active_demands.to_string(),
            },
        ],
    }
}

fn volet_page(report: &DashboardReport) -> Page {
    let metrics = &report.metrics.events;
    let total = metrics.total_events.max(1);
    let blocks = metrics
        .events_by_volet
        .iter()
        .map(|(code, count)| Block::BarRow {
            label: volet_label_for_code(code).to_string(),
            count: *count,
            share_pct: *count as f64 / total as f64 * 100.0,
        })
        .collect();
    Page {
        title: "Répartition par volet".to_string(),
        blocks,
    }
}

fn pole_page(report: &DashboardReport) -> Page {
    let metrics = &report.metrics.events;
    let rows = metrics
        .events_by_pole
        .iter()
        .map(|(pole, count)| {
            let rate = metrics
                .conversion_rate_by_pole
                .get(pole)
                .copied()
                .unwrap_or(0.0);
            vec![pole.clone(), count.to_string(), format_rate(rate)]
        })
        .collect();
    Page {
        title: "Répartition par pôle".to_string(),
        blocks: vec![Block::Table {
            headers: vec![
                "Pôle".to_string(),
                "Événements".to_string(),
                "Taux de conversion (%)".to_string(),
            ],
            rows,
        }],
    }
}

fn enterprise_page(report: &DashboardReport) -> Page {
    let metrics = &report.metrics.enterprises;
    let mut blocks = vec![
        Block::KpiBox {
            label: "Prospects".to_string(),
            value: metrics.prospects.to_string(),
        },
        Block::KpiBox {
            label: "Partenaires".to_string(),
            value: metrics.partners.to_string(),
        },
        Block::KpiBox {
            label: "Visites".to_string(),
            value: metrics.total_visits.to_string(),
        },
    ];
    let total = metrics.total_enterprises.max(1);
    blocks.extend(metrics.sectors.iter().map(|(sector, count)| Block::BarRow {
        label: sector.clone(),
        count: *count,
        share_pct: *count as f64 / total as f64 * 100.0,
    }));
    Page {
        title: "Entreprises".to_string(),
        blocks,
    }
}

fn demand_page(report: &DashboardReport) -> Page {
    let metrics = &report.metrics.demands;
    let rows = metrics
        .top_enterprises
        .iter()
        .map(|entry| vec![entry.name.clone(), entry.demands.to_string()])
        .collect();
    Page {
        title: "Demandes des entreprises".to_string(),
        blocks: vec![
            Block::KpiBox {
                label: "Demandes".to_string(),
                value: metrics.total_demands.to_string(),
            },
            Block::KpiBox {
                label: "Profils demandés".to_string(),
                value: metrics.total_profiles.to_string(),
            },
            Block::Table {
                headers: vec!["Entreprise".to_string(), "Demandes".to_string()],
                rows,
            },
        ],
    }
}

fn closing_page() -> Page {
    Page {
        title: "Conclusion".to_string(),
        blocks: vec![Block::Paragraph {
            text: "Document généré automatiquement par le back-office du COP.".to_string(),
        }],
    }
}
