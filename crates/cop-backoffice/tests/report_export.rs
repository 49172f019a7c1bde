use chrono::{DateTime, Utc};
use cop_backoffice::dashboard::{DashboardEvent, DashboardSnapshot, DashboardState};
use cop_backoffice::domain::{
    volet_label_for_code, Demand, DemandStatus, Enterprise, EnterpriseStatus, Event, Pole,
    VisitStats, Volet,
};
use cop_backoffice::export::{export_document, export_workbook, Block, ExportError};

fn generated_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000, 0).expect("valid timestamp")
}

fn sample_snapshot() -> DashboardSnapshot {
    let mut forum = Event::with_id("evt-1");
    forum.title = Some("Forum des métiers".to_string());
    forum.volet = Some(Volet::AssistanceCarriere);
    forum.pole_id = Some("pole-digital".to_string());
    forum.candidate_count = Some(40);
    forum.retained_candidate_count = Some(12);

    let mut atelier = Event::with_id("evt-2");
    atelier.title = Some("Atelier CV".to_string());
    atelier.pole_id = Some("pole-fantome".to_string());

    DashboardSnapshot {
        events: vec![forum, atelier],
        enterprises: vec![Enterprise {
            id: "ent-1".to_string(),
            name: Some("Acme".to_string()),
            sector: Some("Tech".to_string()),
            status: Some(EnterpriseStatus::Partner),
            preferred_partner: true,
        }],
        demands: vec![Demand {
            id: "dem-1".to_string(),
            enterprise_name: Some("Acme".to_string()),
            status: Some(DemandStatus::Pending),
            requested_profiles: vec!["Développeur".to_string()],
        }],
        poles: vec![Pole {
            id: "pole-digital".to_string(),
            name: "Digital".to_string(),
        }],
        visit_stats: VisitStats {
            total_visits: 5,
            planned_visits: 2,
            priority_enterprises: 1,
        },
    }
}

fn ready_state() -> DashboardState {
    DashboardState::Idle.apply(DashboardEvent::CollectionsResolved {
        snapshot: sample_snapshot(),
        at: generated_at(),
    })
}

#[test]
fn export_refuses_before_aggregation_completes() {
    for state in [
        DashboardState::Idle,
        DashboardState::Idle.apply(DashboardEvent::RefreshRequested { at: generated_at() }),
        DashboardState::Idle.apply(DashboardEvent::FetchFailed {
            reason: "store unavailable".to_string(),
        }),
    ] {
        assert!(matches!(
            export_workbook(&state),
            Err(ExportError::NotReady)
        ));
        assert!(matches!(
            export_document(&state),
            Err(ExportError::NotReady)
        ));
    }
}

#[test]
fn workbook_carries_the_fixed_sheet_layout() {
    let workbook = export_workbook(&ready_state()).expect("ready state exports");
    let names: Vec<&str> = workbook
        .sheets
        .iter()
        .map(|sheet| sheet.name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "Synthèse",
            "Événements",
            "Entreprises",
            "Demandes",
            "Par volet",
            "Par pôle",
        ]
    );
}

#[test]
fn summary_sheet_reflects_computed_kpis() {
    let workbook = export_workbook(&ready_state()).expect("ready state exports");
    let summary = &workbook.sheets[0];
    assert!(summary
        .rows
        .iter()
        .any(|row| row[0] == "Candidats" && row[1] == "40"));
    assert!(summary
        .rows
        .iter()
        .any(|row| row[0] == "Taux de conversion (%)" && row[1] == "30.00"));
    assert!(summary
        .rows
        .iter()
        .any(|row| row[0] == "Visites" && row[1] == "5"));
}

#[test]
fn events_sheet_flags_unresolved_pole_references() {
    let workbook = export_workbook(&ready_state()).expect("ready state exports");
    let events = &workbook.sheets[1];
    assert!(events
        .rows
        .iter()
        .any(|row| row.iter().any(|cell| cell.contains("pole-fantome")
            && cell.contains("à corriger"))));
}

#[test]
fn sheets_serialize_to_csv() {
    let workbook = export_workbook(&ready_state()).expect("ready state exports");
    let csv = workbook.sheets[0].to_csv().expect("csv serialization");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Indicateur,Valeur"));
    assert!(csv.contains("Événements,2"));
}

#[test]
fn document_has_cover_summary_breakdowns_and_closing() {
    let document = export_document(&ready_state()).expect("ready state exports");
    let titles: Vec<&str> = document
        .pages
        .iter()
        .map(|page| page.title.as_str())
        .collect();
    assert_eq!(titles.first(), Some(&"Couverture"));
    assert_eq!(titles.last(), Some(&"Conclusion"));
    assert!(titles.contains(&"Résumé exécutif"));
    assert!(titles.contains(&"Répartition par volet"));
    assert!(titles.contains(&"Répartition par pôle"));

    let summary = &document.pages[1];
    assert!(summary
        .blocks
        .iter()
        .any(|block| matches!(block, Block::KpiBox { label, value }
            if label == "Taux de conversion" && value == "30.00 %")));

    let rendered = document.render_text();
    assert!(rendered.contains("Résumé exécutif"));
    assert!(rendered.contains(volet_label_for_code("assistance_carriere")));
}

#[test]
fn label_dictionary_echoes_unknown_codes() {
    assert_eq!(volet_label_for_code("assistance_carriere"), "Assistance carrière");
    assert_eq!(volet_label_for_code("volet_mystere"), "volet_mystere");
}
