use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use cop_backoffice::dashboard::DashboardState;
use cop_backoffice::domain::{
    Demand, DemandStatus, Enterprise, EnterpriseStatus, Event, EventStatus, Pole, VisitStats,
    Volet,
};
use cop_backoffice::store::{
    DemandStore, EnterpriseStore, EventStore, PoleStore, StoreError, VisitStatsSource,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dashboard: Arc<Mutex<DashboardState>>,
    pub(crate) center: Arc<InMemoryCenter>,
    pub(crate) loading_timeout: chrono::Duration,
}

/// In-memory stand-in for the hosted record tables, satisfying every store
/// trait so the routes and CLI can run without the external backend.
#[derive(Default)]
pub(crate) struct InMemoryCenter {
    events: Mutex<Vec<Event>>,
    enterprises: Mutex<Vec<Enterprise>>,
    demands: Mutex<Vec<Demand>>,
    poles: Mutex<Vec<Pole>>,
    visits: Mutex<VisitStats>,
}

impl InMemoryCenter {
    /// Representative center data for demos and local runs.
    pub(crate) fn seeded() -> Self {
        let center = Self::default();

        {
            let mut poles = center.poles.lock().expect("pole mutex poisoned");
            poles.push(Pole {
                id: "pole-digital".to_string(),
                name: "Digital".to_string(),
            });
            poles.push(Pole {
                id: "pole-industrie".to_string(),
                name: "Industrie".to_string(),
            });
        }

        {
            let mut events = center.events.lock().expect("event mutex poisoned");
            events.push(seed_event(
                "evt-001",
                "Forum des métiers du numérique",
                Some((2026, 3, 14)),
                Some(Volet::AssistanceCarriere),
                Some("pole-digital"),
                Some(EventStatus::Done),
                (Some(120), Some(40), Some(12)),
            ));
            events.push(seed_event(
                "evt-002",
                "Atelier CV et entretien",
                Some((2026, 4, 2)),
                Some(Volet::InformationCommunication),
                Some("pole-digital"),
                Some(EventStatus::Done),
                (Some(25), Some(25), Some(9)),
            ));
            events.push(seed_event(
                "evt-003",
                "Visite d'usine partenaires",
                Some((2026, 5, 20)),
                Some(Volet::AssistanceFiliere),
                Some("pole-industrie"),
                Some(EventStatus::Planned),
                (Some(30), None, None),
            ));
            events.push(seed_event(
                "evt-004",
                "Session d'information rentrée",
                None,
                None,
                None,
                Some(EventStatus::Ongoing),
                (Some(60), Some(0), Some(0)),
            ));
        }

        {
            let mut enterprises = center
                .enterprises
                .lock()
                .expect("enterprise mutex poisoned");
            enterprises.push(seed_enterprise(
                "ent-001",
                "Acme Systèmes",
                Some("Tech"),
                Some(EnterpriseStatus::Partner),
                true,
            ));
            enterprises.push(seed_enterprise(
                "ent-002",
                "Béta Industrie",
                Some("Industrie"),
                Some(EnterpriseStatus::Partner),
                false,
            ));
            enterprises.push(seed_enterprise(
                "ent-003",
                "Gamma Conseil",
                None,
                Some(EnterpriseStatus::Prospect),
                false,
            ));
        }

        {
            let mut demands = center.demands.lock().expect("demand mutex poisoned");
            demands.push(seed_demand(
                "dem-001",
                Some("Acme Systèmes"),
                Some(DemandStatus::Pending),
                &["Développeur web", "Technicien réseau"],
            ));
            demands.push(seed_demand(
                "dem-002",
                Some("Acme Systèmes"),
                Some(DemandStatus::InProgress),
                &["Chef de projet"],
            ));
            demands.push(seed_demand(
                "dem-003",
                Some("Béta Industrie"),
                Some(DemandStatus::Fulfilled),
                &["Soudeur"],
            ));
            demands.push(seed_demand("dem-004", None, None, &[]));
        }

        *center.visits.lock().expect("visit mutex poisoned") = VisitStats {
            total_visits: 18,
            planned_visits: 4,
            priority_enterprises: 2,
        };

        center
    }
}

impl EventStore for InMemoryCenter {
    fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.events.lock().expect("event mutex poisoned").clone())
    }

    fn add_events(&self, mut new_events: Vec<Event>) -> Result<usize, StoreError> {
        let mut events = self.events.lock().expect("event mutex poisoned");
        let added = new_events.len();
        events.append(&mut new_events);
        Ok(added)
    }
}

impl EnterpriseStore for InMemoryCenter {
    fn list_enterprises(&self) -> Result<Vec<Enterprise>, StoreError> {
        Ok(self
            .enterprises
            .lock()
            .expect("enterprise mutex poisoned")
            .clone())
    }
}

impl DemandStore for InMemoryCenter {
    fn list_demands(&self) -> Result<Vec<Demand>, StoreError> {
        Ok(self.demands.lock().expect("demand mutex poisoned").clone())
    }
}

impl PoleStore for InMemoryCenter {
    fn list_poles(&self) -> Result<Vec<Pole>, StoreError> {
        Ok(self.poles.lock().expect("pole mutex poisoned").clone())
    }
}

impl VisitStatsSource for InMemoryCenter {
    fn visit_stats(&self) -> Result<VisitStats, StoreError> {
        Ok(*self.visits.lock().expect("visit mutex poisoned"))
    }
}

fn seed_event(
    id: &str,
    title: &str,
    date: Option<(i32, u32, u32)>,
    volet: Option<Volet>,
    pole_id: Option<&str>,
    status: Option<EventStatus>,
    counts: (Option<u32>, Option<u32>, Option<u32>),
) -> Event {
    let mut event = Event::with_id(id);
    event.title = Some(title.to_string());
    event.start_date = date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
    event.volet = volet;
    event.pole_id = pole_id.map(str::to_string);
    event.status = status;
    event.beneficiary_count = counts.0;
    event.candidate_count = counts.1;
    event.retained_candidate_count = counts.2;
    event
}

fn seed_enterprise(
    id: &str,
    name: &str,
    sector: Option<&str>,
    status: Option<EnterpriseStatus>,
    preferred: bool,
) -> Enterprise {
    Enterprise {
        id: id.to_string(),
        name: Some(name.to_string()),
        sector: sector.map(str::to_string),
        status,
        preferred_partner: preferred,
    }
}

fn seed_demand(
    id: &str,
    enterprise_name: Option<&str>,
    status: Option<DemandStatus>,
    profiles: &[&str],
) -> Demand {
    Demand {
        id: id.to_string(),
        enterprise_name: enterprise_name.map(str::to_string),
        status,
        requested_profiles: profiles.iter().map(|p| (*p).to_string()).collect(),
    }
}
