use cop_backoffice::dashboard::{
    compute_demand_metrics, compute_enterprise_metrics, compute_event_metrics, EventMetrics,
};
use cop_backoffice::domain::{
    Demand, DemandStatus, Enterprise, EnterpriseStatus, Event, Pole, VisitStats, Volet,
};

fn event(id: &str) -> Event {
    Event::with_id(id)
}

fn pole(id: &str, name: &str) -> Pole {
    Pole {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn enterprise(id: &str, sector: Option<&str>, status: Option<EnterpriseStatus>) -> Enterprise {
    Enterprise {
        id: id.to_string(),
        name: Some(format!("Entreprise {id}")),
        sector: sector.map(str::to_string),
        status,
        preferred_partner: false,
    }
}

fn demand(id: &str, enterprise_name: Option<&str>, status: Option<DemandStatus>) -> Demand {
    Demand {
        id: id.to_string(),
        enterprise_name: enterprise_name.map(str::to_string),
        status,
        requested_profiles: Vec::new(),
    }
}

#[test]
fn empty_event_collection_yields_all_zero_metrics() {
    let poles = vec![pole("A", "Digital")];
    let metrics = compute_event_metrics(&[], &poles);

    assert_eq!(metrics, EventMetrics::default());
    assert_eq!(metrics.total_events, 0);
    assert_eq!(metrics.conversion_rate, 0.0);
    assert!(metrics.events_by_volet.is_empty());
    assert!(metrics.events_by_pole.is_empty());
    assert!(metrics.conversion_rate_by_pole.is_empty());
}

#[test]
fn conversion_rate_stays_within_bounds_and_rounds() {
    let mut first = event("evt-1");
    first.candidate_count = Some(3);
    first.retained_candidate_count = Some(1);

    let metrics = compute_event_metrics(&[first], &[]);
    assert_eq!(metrics.conversion_rate, 33.33);
    assert!(metrics.conversion_rate >= 0.0 && metrics.conversion_rate <= 100.0);

    let mut zero = event("evt-2");
    zero.candidate_count = Some(0);
    zero.retained_candidate_count = Some(0);
    let metrics = compute_event_metrics(&[zero], &[]);
    assert_eq!(metrics.conversion_rate, 0.0);
}

#[test]
fn retained_above_candidates_falls_back_to_zero_rate() {
    // Upstream never enforces retained <= candidates; the rate must not
    // leave [0, 100] on such records, globally or per pole.
    let mut malformed = event("evt-1");
    malformed.pole_id = Some("A".to_string());
    malformed.candidate_count = Some(2);
    malformed.retained_candidate_count = Some(5);

    let metrics = compute_event_metrics(&[malformed], &[pole("A", "Digital")]);
    assert_eq!(metrics.conversion_rate, 0.0);
    assert_eq!(metrics.conversion_rate_by_pole.get("Digital"), Some(&0.0));
    // The raw counts still flow into the totals untouched.
    assert_eq!(metrics.total_candidates, 2);
    assert_eq!(metrics.total_retained, 5);
}

#[test]
fn aggregation_is_idempotent_over_identical_input() {
    let mut a = event("evt-1");
    a.volet = Some(Volet::AssistanceCarriere);
    a.pole_id = Some("A".to_string());
    a.candidate_count = Some(7);
    a.retained_candidate_count = Some(3);
    let mut b = event("evt-2");
    b.pole_id = Some("missing".to_string());

    let events = vec![a, b];
    let poles = vec![pole("A", "Digital")];

    let first = compute_event_metrics(&events, &poles);
    let second = compute_event_metrics(&events, &poles);
    assert_eq!(first, second);
}

#[test]
fn missing_volet_lands_in_non_defini_and_counts_sum_to_total() {
    let mut tagged = event("evt-1");
    tagged.volet = Some(Volet::AccompagnementProjets);
    let untagged = event("evt-2");

    let metrics = compute_event_metrics(&[tagged, untagged], &[]);
    assert_eq!(metrics.events_by_volet.get("accompagnement_projets"), Some(&1));
    assert_eq!(metrics.events_by_volet.get("non_defini"), Some(&1));

    let bucket_total: u64 = metrics.events_by_volet.values().sum();
    assert_eq!(bucket_total, metrics.total_events);
}

#[test]
fn unresolved_pole_id_is_flagged_not_dropped() {
    let mut orphan = event("evt-1");
    orphan.pole_id = Some("ghost-42".to_string());
    orphan.candidate_count = Some(4);
    orphan.retained_candidate_count = Some(1);

    let metrics = compute_event_metrics(&[orphan], &[pole("A", "Digital")]);
    assert_eq!(metrics.events_by_pole.len(), 1);
    let (label, count) = metrics.events_by_pole.iter().next().expect("one pole entry");
    assert!(label.contains("ghost-42"), "raw id must stay visible: {label}");
    assert!(label.contains("à corriger"));
    assert_eq!(*count, 1);
}

#[test]
fn event_without_pole_feeds_totals_but_not_pole_breakdown() {
    let mut grouped = event("evt-1");
    grouped.pole_id = Some("A".to_string());
    grouped.candidate_count = Some(5);
    let mut ungrouped = event("evt-2");
    ungrouped.candidate_count = Some(9);

    let metrics = compute_event_metrics(&[grouped, ungrouped], &[pole("A", "Digital")]);
    assert_eq!(metrics.total_events, 2);
    assert_eq!(metrics.total_candidates, 14);
    assert_eq!(metrics.events_by_pole.get("Digital"), Some(&1));
    assert_eq!(metrics.events_by_pole.len(), 1);
    assert_eq!(metrics.conversion_rate_by_pole.len(), 1);
}

#[test]
fn three_event_reference_scenario() {
    let mut first = event("evt-1");
    first.candidate_count = Some(10);
    first.retained_candidate_count = Some(5);
    first.volet = Some(Volet::AssistanceCarriere);
    first.pole_id = Some("A".to_string());

    let mut second = event("evt-2");
    second.candidate_count = Some(0);
    second.retained_candidate_count = Some(0);
    second.pole_id = Some("A".to_string());

    let mut third = event("evt-3");
    third.candidate_count = Some(20);
    third.retained_candidate_count = Some(10);
    third.volet = Some(Volet::AssistanceCarriere);

    let metrics = compute_event_metrics(&[first, second, third], &[pole("A", "Digital")]);

    assert_eq!(metrics.total_events, 3);
    assert_eq!(metrics.total_candidates, 30);
    assert_eq!(metrics.total_retained, 15);
    assert_eq!(metrics.conversion_rate, 50.0);
    assert_eq!(metrics.events_by_volet.get("assistance_carriere"), Some(&2));
    assert_eq!(metrics.events_by_volet.get("non_defini"), Some(&1));
    assert_eq!(metrics.events_by_pole.get("Digital"), Some(&2));
    // Pole "Digital" sees 10 candidates and 5 retained from the two
    // grouped events; the third event stays out of the breakdown.
    assert_eq!(metrics.conversion_rate_by_pole.get("Digital"), Some(&50.0));
}

#[test]
fn missing_numeric_fields_degrade_to_zero() {
    let bare = event("evt-1");
    let metrics = compute_event_metrics(&[bare], &[]);
    assert_eq!(metrics.total_events, 1);
    assert_eq!(metrics.total_beneficiaries, 0);
    assert_eq!(metrics.total_candidates, 0);
    assert_eq!(metrics.total_retained, 0);
    assert_eq!(metrics.conversion_rate, 0.0);
}

#[test]
fn enterprise_reference_scenario() {
    let enterprises = vec![
        enterprise("ent-1", Some("Tech"), Some(EnterpriseStatus::Prospect)),
        enterprise("ent-2", Some("Tech"), Some(EnterpriseStatus::Partner)),
        enterprise("ent-3", Some("Finance"), Some(EnterpriseStatus::Partner)),
    ];
    let metrics = compute_enterprise_metrics(&enterprises, &VisitStats::default());

    assert_eq!(metrics.total_enterprises, 3);
    assert_eq!(metrics.prospects, 1);
    assert_eq!(metrics.partners, 2);
    assert_eq!(metrics.sectors.get("Tech"), Some(&2));
    assert_eq!(metrics.sectors.get("Finance"), Some(&1));
}

#[test]
fn missing_sector_buckets_under_non_defini() {
    let enterprises = vec![
        enterprise("ent-1", None, None),
        enterprise("ent-2", Some("  "), None),
    ];
    let metrics = compute_enterprise_metrics(&enterprises, &VisitStats::default());
    assert_eq!(metrics.sectors.get("Non défini"), Some(&2));
}

#[test]
fn visit_stats_pass_through_untouched() {
    let visits = VisitStats {
        total_visits: 48,
        planned_visits: 6,
        priority_enterprises: 11,
    };
    let metrics = compute_enterprise_metrics(&[], &visits);
    assert_eq!(metrics.total_visits, 48);
    assert_eq!(metrics.planned_visits, 6);
    assert_eq!(metrics.priority_enterprises, 11);
}

#[test]
fn demand_reference_scenario_ranks_top_enterprises() {
    let demands = vec![
        demand("dem-1", Some("Acme"), Some(DemandStatus::Pending)),
        demand("dem-2", Some("Acme"), Some(DemandStatus::Fulfilled)),
        demand("dem-3", Some("Beta"), Some(DemandStatus::InProgress)),
    ];
    let metrics = compute_demand_metrics(&demands);

    assert_eq!(metrics.total_demands, 3);
    assert_eq!(metrics.active_demands, 2);
    assert_eq!(metrics.top_enterprises.len(), 2);
    assert_eq!(metrics.top_enterprises[0].name, "Acme");
    assert_eq!(metrics.top_enterprises[0].demands, 2);
    assert_eq!(metrics.top_enterprises[1].name, "Beta");
    assert_eq!(metrics.top_enterprises[1].demands, 1);
}

#[test]
fn top_enterprises_ties_break_alphabetically_and_cap_at_five() {
    let names = ["Zeta", "Alpha", "Mu", "Beta", "Nu", "Kappa"];
    let demands: Vec<Demand> = names
        .iter()
        .enumerate()
        .map(|(i, name)| demand(&format!("dem-{i}"), Some(name), None))
        .collect();

    let metrics = compute_demand_metrics(&demands);
    assert_eq!(metrics.top_enterprises.len(), 5);
    let ranked: Vec<&str> = metrics
        .top_enterprises
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(ranked, ["Alpha", "Beta", "Kappa", "Mu", "Nu"]);
}

#[test]
fn nameless_demands_group_under_inconnue_and_profiles_sum() {
    let mut with_profiles = demand("dem-1", None, None);
    with_profiles.requested_profiles =
        vec!["Développeur".to_string(), "Technicien".to_string()];
    let blank = demand("dem-2", Some("   "), None);

    let metrics = compute_demand_metrics(&[with_profiles, blank]);
    assert_eq!(metrics.total_profiles, 2);
    assert_eq!(metrics.top_enterprises.len(), 1);
    assert_eq!(metrics.top_enterprises[0].name, "Inconnue");
    assert_eq!(metrics.top_enterprises[0].demands, 2);
}
