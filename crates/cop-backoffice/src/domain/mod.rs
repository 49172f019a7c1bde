use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Programmatic focus area of an event ("volet" in center terminology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Volet {
    InformationCommunication,
    AccompagnementProjets,
    AssistanceCarriere,
    AssistanceFiliere,
}

impl Volet {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::InformationCommunication,
            Self::AccompagnementProjets,
            Self::AssistanceCarriere,
            Self::AssistanceFiliere,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::InformationCommunication => "information_communication",
            Self::AccompagnementProjets => "accompagnement_projets",
            Self::AssistanceCarriere => "assistance_carriere",
            Self::AssistanceFiliere => "assistance_filiere",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InformationCommunication => "Information et communication",
            Self::AccompagnementProjets => "Accompagnement de projets",
            Self::AssistanceCarriere => "Assistance carrière",
            Self::AssistanceFiliere => "Assistance filière",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Planned,
    Ongoing,
    Done,
    Cancelled,
}

impl EventStatus {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Ongoing => "ongoing",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planifié",
            Self::Ongoing => "En cours",
            Self::Done => "Terminé",
            Self::Cancelled => "Annulé",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterpriseStatus {
    Prospect,
    Partner,
}

impl EnterpriseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prospect => "Prospect",
            Self::Partner => "Partenaire",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandStatus {
    Pending,
    InProgress,
    Fulfilled,
    Cancelled,
}

impl DemandStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::InProgress => "En cours",
            Self::Fulfilled => "Satisfaite",
            Self::Cancelled => "Annulée",
        }
    }

    /// A demand still being worked by the center.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

/// Total label dictionary over raw volet codes. Unknown codes are echoed
/// back unchanged so callers never have to handle a missing mapping.
pub fn volet_label_for_code(code: &str) -> &str {
    match code {
        "information_communication" => Volet::InformationCommunication.label(),
        "accompagnement_projets" => Volet::AccompagnementProjets.label(),
        "assistance_carriere" => Volet::AssistanceCarriere.label(),
        "assistance_filiere" => Volet::AssistanceFiliere.label(),
        "non_defini" => "Non défini",
        other => other,
    }
}

/// Total label dictionary over raw event status codes, same echo fallback.
pub fn event_status_label_for_code(code: &str) -> &str {
    match code {
        "planned" => EventStatus::Planned.label(),
        "ongoing" => EventStatus::Ongoing.label(),
        "done" => EventStatus::Done.label(),
        "cancelled" => EventStatus::Cancelled.label(),
        other => other,
    }
}

/// A workshop, forum, or information session run by the center.
///
/// Every field after the identifier is optional: records arrive from a
/// hosted table where any column may be null, and the aggregation engine
/// must tolerate any subset being absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    pub volet: Option<Volet>,
    pub pole_id: Option<String>,
    pub filiere_id: Option<String>,
    pub beneficiary_count: Option<u32>,
    pub candidate_count: Option<u32>,
    pub retained_candidate_count: Option<u32>,
}

impl Event {
    /// Bare record with only an identifier, used by importers that fill
    /// fields in as columns resolve.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            start_date: None,
            end_date: None,
            location: None,
            status: None,
            volet: None,
            pole_id: None,
            filiere_id: None,
            beneficiary_count: None,
            candidate_count: None,
            retained_candidate_count: None,
        }
    }
}

/// A company the center prospects or partners with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enterprise {
    pub id: String,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub status: Option<EnterpriseStatus>,
    #[serde(default)]
    pub preferred_partner: bool,
}

/// An inbound request from an enterprise for candidate profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub id: String,
    pub enterprise_name: Option<String>,
    pub status: Option<DemandStatus>,
    #[serde(default)]
    pub requested_profiles: Vec<String>,
}

/// Organizational grouping used to segment events and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pole {
    pub id: String,
    pub name: String,
}

/// Visit statistics aggregated upstream by the visit-tracking collaborator.
/// Passed through into enterprise metrics untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStats {
    pub total_visits: u64,
    pub planned_visits: u64,
    pub priority_enterprises: u64,
}
