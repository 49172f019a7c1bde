mod mapping;
mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use crate::domain::Event;

pub use mapping::RosterField;

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("no column resolved for required field '{}'", .0.name())]
    MissingColumn(RosterField),
}

/// Imports event rosters exported from the center's spreadsheets, using the
/// declarative column mapping in [`mapping`] to locate fields regardless of
/// header spelling.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Event>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Event>, RosterImportError> {
        parser::parse_events(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Volet;
    use std::io::Cursor;

    #[test]
    fn imports_roster_with_french_headers() {
        let csv = "\
Intitulé,Date de début,Lieu,Axe,Pôle,Nb candidats,Candidats retenus
Forum des métiers,14/03/2026,Tunis,Assistance Carrière,pole-digital,40,12
Atelier CV,2026-04-02,Sfax,Info / Com,,15,0
";
        let events = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");
        assert_eq!(events.len(), 2);

        let forum = &events[0];
        assert_eq!(forum.title.as_deref(), Some("Forum des métiers"));
        assert_eq!(forum.volet, Some(Volet::AssistanceCarriere));
        assert_eq!(forum.pole_id.as_deref(), Some("pole-digital"));
        assert_eq!(forum.candidate_count, Some(40));
        assert_eq!(forum.retained_candidate_count, Some(12));

        let atelier = &events[1];
        assert_eq!(atelier.volet, Some(Volet::InformationCommunication));
        assert_eq!(atelier.pole_id, None);
        assert_eq!(atelier.retained_candidate_count, Some(0));
    }

    #[test]
    fn unknown_volet_text_imports_without_volet() {
        let csv = "Titre,Volet\nSession spéciale,Atelier divers\n";
        let events = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].volet, None);
    }

    #[test]
    fn duplicate_title_and_date_rows_are_skipped() {
        let csv = "\
Titre,Date
Forum des métiers,2026-03-14
Forum des métiers,2026-03-14
Forum des métiers,2026-05-01
";
        let events = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn missing_title_column_is_an_error() {
        let csv = "Colonne1,Colonne2\nx,y\n";
        let err = RosterImporter::from_reader(Cursor::new(csv)).expect_err("must fail");
        assert!(matches!(err, RosterImportError::MissingColumn(RosterField::Title)));
    }

    #[test]
    fn blank_title_rows_are_ignored() {
        let csv = "Titre,Candidats\n,10\nForum,5\n";
        let events = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].candidate_count, Some(5));
    }
}
