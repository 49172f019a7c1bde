use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{Demand, Enterprise, EnterpriseStatus, Event, Pole, VisitStats};

/// Bucket key for events carrying no volet. A defined fallback, not an
/// error: the record still counts toward every total.
pub const VOLET_NON_DEFINI: &str = "non_defini";

/// Bucket label for enterprises without a sector.
pub const SECTOR_NON_DEFINI: &str = "Non défini";

/// Group label for demands whose enterprise name is absent.
pub const ENTERPRISE_INCONNUE: &str = "Inconnue";

/// KPI summary over the event collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMetrics {
    pub total_events: u64,
    pub total_beneficiaries: u64,
    pub total_candidates: u64,
    pub total_retained: u64,
    pub conversion_rate: f64,
    pub events_by_volet: BTreeMap<String, u64>,
    pub events_by_pole: BTreeMap<String, u64>,
    pub conversion_rate_by_pole: BTreeMap<String, f64>,
}

/// KPI summary over the enterprise collection plus pass-through visit
/// aggregates supplied upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnterpriseMetrics {
    pub total_enterprises: u64,
    pub prospects: u64,
    pub partners: u64,
    pub sectors: BTreeMap<String, u64>,
    pub total_visits: u64,
    pub planned_visits: u64,
    pub priority_enterprises: u64,
}

/// KPI summary over the demand collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandMetrics {
    pub total_demands: u64,
    pub active_demands: u64,
    pub total_profiles: u64,
    pub top_enterprises: Vec<TopEnterprise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEnterprise {
    pub name: String,
    pub demands: u64,
}

#[derive(Default)]
struct PoleCounter {
    events: u64,
    candidates: u64,
    retained: u64,
}

/// Aggregate the event collection into totals, per-volet counts, and
/// per-pole counts with conversion rates.
///
/// Total over arbitrary input: missing numeric fields count as zero,
/// missing volets land in the [`VOLET_NON_DEFINI`] bucket, and an event
/// without a pole id stays out of the per-pole maps while still feeding
/// every global total. A pole id absent from `poles` is kept under a
/// placeholder label embedding the raw id so operators see the bad
/// reference instead of losing the event.
pub fn compute_event_metrics(events: &[Event], poles: &[Pole]) -> EventMetrics {
    let pole_names: HashMap<&str, &str> = poles
        .iter()
        .map(|pole| (pole.id.as_str(), pole.name.as_str()))
        .collect();

    let mut metrics = EventMetrics::default();
    let mut pole_counters: BTreeMap<String, PoleCounter> = BTreeMap::new();

    for event in events {
        let beneficiaries = u64::from(event.beneficiary_count.unwrap_or(0));
        let candidates = u64::from(event.candidate_count.unwrap_or(0));
        let retained = u64::from(event.retained_candidate_count.unwrap_or(0));

        metrics.total_events += 1;
        metrics.total_beneficiaries += beneficiaries;
        metrics.total_candidates += candidates;
        metrics.total_retained += retained;

        let volet_key = match event.volet {
            Some(volet) => volet.code().to_string(),
            None => VOLET_NON_DEFINI.to_string(),
        };
        *metrics.events_by_volet.entry(volet_key).or_insert(0) += 1;

        // Events without a pole are excluded from the per-pole breakdown
        // only; they already contributed to the global totals above.
        if let Some(pole_id) = event.pole_id.as_deref() {
            let label = match pole_names.get(pole_id) {
                Some(name) => (*name).to_string(),
                None => unknown_pole_label(pole_id),
            };
            let counter = pole_counters.entry(label).or_default();
            counter.events += 1;
            counter.candidates += candidates;
            counter.retained += retained;
        }
    }

    metrics.conversion_rate = percentage(metrics.total_retained, metrics.total_candidates);

    for (label, counter) in pole_counters {
        metrics.events_by_pole.insert(label.clone(), counter.events);
        metrics
            .conversion_rate_by_pole
            .insert(label, percentage(counter.retained, counter.candidates));
    }

    metrics
}

/// Aggregate the enterprise collection; `visits` is an opaque upstream
/// aggregate copied through unchanged.
pub fn compute_enterprise_metrics(
    enterprises: &[Enterprise],
    visits: &VisitStats,
) -> EnterpriseMetrics {
    let mut metrics = EnterpriseMetrics {
        total_visits: visits.total_visits,
        planned_visits: visits.planned_visits,
        priority_enterprises: visits.priority_enterprises,
        ..EnterpriseMetrics::default()
    };

    for enterprise in enterprises {
        metrics.total_enterprises += 1;
        match enterprise.status {
            Some(EnterpriseStatus::Prospect) => metrics.prospects += 1,
            Some(EnterpriseStatus::Partner) => metrics.partners += 1,
            None => {}
        }

        let sector = enterprise
            .sector
            .as_deref()
            .map(str::trim)
            .filter(|sector| !sector.is_empty())
            .unwrap_or(SECTOR_NON_DEFINI);
        *metrics.sectors.entry(sector.to_string()).or_insert(0) += 1;
    }

    metrics
}

/// Aggregate the demand collection, ranking the five enterprises with the
/// most demands. Ties are broken by name ascending so the ranking is
/// deterministic across runs.
pub fn compute_demand_metrics(demands: &[Demand]) -> DemandMetrics {
    let mut metrics = DemandMetrics::default();
    let mut by_enterprise: BTreeMap<String, u64> = BTreeMap::new();

    for demand in demands {
        metrics.total_demands += 1;
        if demand.status.is_some_and(|status| status.is_active()) {
            metrics.active_demands += 1;
        }
        metrics.total_profiles += demand.requested_profiles.len() as u64;

        let name = demand
            .enterprise_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ENTERPRISE_INCONNUE);
        *by_enterprise.entry(name.to_string()).or_insert(0) += 1;
    }

    let mut ranked: Vec<TopEnterprise> = by_enterprise
        .into_iter()
        .map(|(name, demands)| TopEnterprise { name, demands })
        .collect();
    // BTreeMap iteration is name-ordered, so a stable sort on the count
    // alone leaves equal counts alphabetical.
    ranked.sort_by(|a, b| b.demands.cmp(&a.demands));
    ranked.truncate(5);
    metrics.top_enterprises = ranked;

    metrics
}

/// Operator-visible flag for an event referencing a pole missing from the
/// lookup. The raw id stays in the label so the record can be corrected.
pub fn unknown_pole_label(pole_id: &str) -> String {
    format!("Pôle inconnu ({pole_id}) [à corriger]")
}

// Malformed records may report more retained candidates than candidates;
// the ratio is not enforced upstream, so such input falls back to 0 and
// the rate stays within [0, 100].
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 || part > whole {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
