use std::collections::BTreeMap;

use super::normalizer::normalize_text;

/// Logical columns of an event roster spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RosterField {
    Title,
    StartDate,
    Location,
    Volet,
    Pole,
    Beneficiaries,
    Candidates,
    Retained,
}

impl RosterField {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "intitulé",
            Self::StartDate => "date",
            Self::Location => "lieu",
            Self::Volet => "volet",
            Self::Pole => "pôle",
            Self::Beneficiaries => "bénéficiaires",
            Self::Candidates => "candidats",
            Self::Retained => "retenus",
        }
    }
}

/// Declarative column mapping: one ordered alias list per logical field,
/// plus the historical raw-letter position used by exports that ship
/// without headers. Extending the accepted spellings means adding an alias
/// here, not another fallback chain in the parser.
pub(crate) struct ColumnSpec {
    pub(crate) field: RosterField,
    pub(crate) aliases: &'static [&'static str],
    pub(crate) fallback_letter: Option<char>,
}

pub(crate) const COLUMN_SPECS: &[ColumnSpec] = &[
    ColumnSpec {
        field: RosterField::Title,
        aliases: &[
            "intitule",
            "titre",
            "evenement",
            "nom de l evenement",
            "atelier",
            "title",
        ],
        fallback_letter: Some('A'),
    },
    ColumnSpec {
        field: RosterField::StartDate,
        aliases: &["date", "date de debut", "date debut", "start date"],
        fallback_letter: Some('B'),
    },
    ColumnSpec {
        field: RosterField::Location,
        aliases: &["lieu", "localisation", "site", "location"],
        fallback_letter: None,
    },
    ColumnSpec {
        field: RosterField::Volet,
        aliases: &["volet", "axe", "thematique", "programme"],
        fallback_letter: Some('D'),
    },
    ColumnSpec {
        field: RosterField::Pole,
        aliases: &["pole", "departement", "service"],
        fallback_letter: None,
    },
    ColumnSpec {
        field: RosterField::Beneficiaries,
        aliases: &[
            "beneficiaires",
            "nombre de beneficiaires",
            "nb beneficiaires",
            "participants",
        ],
        fallback_letter: None,
    },
    ColumnSpec {
        field: RosterField::Candidates,
        aliases: &["candidats", "nombre de candidats", "nb candidats"],
        fallback_letter: None,
    },
    ColumnSpec {
        field: RosterField::Retained,
        aliases: &[
            "retenus",
            "candidats retenus",
            "nb retenus",
            "nombre de retenus",
        ],
        fallback_letter: None,
    },
];

/// Result of resolving a header row against [`COLUMN_SPECS`].
#[derive(Debug, Default)]
pub(crate) struct ColumnLayout {
    indices: BTreeMap<RosterField, usize>,
}

impl ColumnLayout {
    /// Single generic resolver over the declarative specs. First pass
    /// matches normalized headers against alias lists; a second pass gives
    /// still-unresolved fields their historical column letter. The letter
    /// only applies to headerless exports: the cell at that position must
    /// be the raw letter itself (or empty) and unclaimed by an alias.
    pub(crate) fn resolve(headers: &csv::StringRecord) -> Self {
        let normalized: Vec<String> = headers.iter().map(normalize_text).collect();
        let mut layout = Self::default();
        let mut claimed = vec![false; normalized.len()];

        for spec in COLUMN_SPECS {
            let found = normalized.iter().enumerate().find(|(index, header)| {
                !claimed[*index] && spec.aliases.iter().any(|alias| *header == *alias)
            });
            if let Some((index, _)) = found {
                claimed[index] = true;
                layout.indices.insert(spec.field, index);
            }
        }

        for spec in COLUMN_SPECS {
            if layout.indices.contains_key(&spec.field) {
                continue;
            }
            if let Some(letter) = spec.fallback_letter {
                let index = (letter as usize) - ('A' as usize);
                let expected = letter.to_ascii_lowercase();
                let positional = normalized.get(index).is_some_and(|header| {
                    header.is_empty() || (header.len() == 1 && header.starts_with(expected))
                });
                if positional && !claimed[index] {
                    claimed[index] = true;
                    layout.indices.insert(spec.field, index);
                }
            }
        }

        layout
    }

    pub(crate) fn index(&self, field: RosterField) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    /// Trimmed, non-empty cell for a logical field, if the column resolved.
    pub(crate) fn cell<'r>(
        &self,
        record: &'r csv::StringRecord,
        field: RosterField,
    ) -> Option<&'r str> {
        self.index(field)
            .and_then(|index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(values.to_vec())
    }

    #[test]
    fn resolves_accented_alias_variants() {
        let layout = ColumnLayout::resolve(&headers(&[
            "Intitulé",
            "Date de début",
            "Lieu",
            "Axe",
            "Pôle",
            "Nb bénéficiaires",
        ]));
        assert_eq!(layout.index(RosterField::Title), Some(0));
        assert_eq!(layout.index(RosterField::StartDate), Some(1));
        assert_eq!(layout.index(RosterField::Volet), Some(3));
        assert_eq!(layout.index(RosterField::Pole), Some(4));
        assert_eq!(layout.index(RosterField::Beneficiaries), Some(5));
        assert_eq!(layout.index(RosterField::Candidates), None);
    }

    #[test]
    fn falls_back_to_column_letters_for_headerless_exports() {
        let layout = ColumnLayout::resolve(&headers(&["A", "B", "C", "D"]));
        assert_eq!(layout.index(RosterField::Title), Some(0));
        assert_eq!(layout.index(RosterField::StartDate), Some(1));
        assert_eq!(layout.index(RosterField::Volet), Some(3));
        assert_eq!(layout.index(RosterField::Location), None);
    }

    #[test]
    fn aliases_resolve_regardless_of_position() {
        // Alias resolution is positional-independent: the title may sit in
        // any column without the letter fallback interfering.
        let layout = ColumnLayout::resolve(&headers(&["Volet", "Titre"]));
        assert_eq!(layout.index(RosterField::Volet), Some(0));
        assert_eq!(layout.index(RosterField::Title), Some(1));
    }
}
