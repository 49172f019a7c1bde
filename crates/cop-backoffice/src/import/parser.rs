use std::collections::HashSet;
use std::io::Read;

use chrono::NaiveDate;

use super::mapping::{ColumnLayout, RosterField};
use super::normalizer::normalize_volet;
use super::RosterImportError;
use crate::domain::Event;

/// Parse a roster CSV into event records. The title column must resolve;
/// every other field degrades to `None` when its column is missing or a
/// cell is empty. Rows repeating an already-seen title and date are
/// duplicates from re-exported sheets and are skipped.
pub(crate) fn parse_events<R: Read>(reader: R) -> Result<Vec<Event>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let layout = ColumnLayout::resolve(csv_reader.headers()?);
    if layout.index(RosterField::Title).is_none() {
        return Err(RosterImportError::MissingColumn(RosterField::Title));
    }

    let mut events = Vec::new();
    let mut seen: HashSet<(String, Option<NaiveDate>)> = HashSet::new();

    for record in csv_reader.records() {
        let record = record?;

        let Some(title) = layout.cell(&record, RosterField::Title) else {
            continue;
        };

        let start_date = layout
            .cell(&record, RosterField::StartDate)
            .and_then(parse_date);

        if !seen.insert((title.to_string(), start_date)) {
            continue;
        }

        let mut event = Event::with_id(format!("import-{:04}", events.len() + 1));
        event.title = Some(title.to_string());
        event.start_date = start_date;
        event.location = layout
            .cell(&record, RosterField::Location)
            .map(str::to_string);
        event.volet = layout
            .cell(&record, RosterField::Volet)
            .and_then(normalize_volet);
        event.pole_id = layout.cell(&record, RosterField::Pole).map(str::to_string);
        event.beneficiary_count = layout
            .cell(&record, RosterField::Beneficiaries)
            .and_then(parse_count);
        event.candidate_count = layout
            .cell(&record, RosterField::Candidates)
            .and_then(parse_count);
        event.retained_candidate_count = layout
            .cell(&record, RosterField::Retained)
            .and_then(parse_count);

        events.push(event);
    }

    Ok(events)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d/%m/%y"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_count(value: &str) -> Option<u32> {
    let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
    compact.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_french_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
        assert_eq!(parse_date("2026-03-14"), Some(expected));
        assert_eq!(parse_date("14/03/2026"), Some(expected));
        assert_eq!(parse_date("mars 2026"), None);
    }

    #[test]
    fn parses_counts_with_grouping_spaces() {
        assert_eq!(parse_count("1 250"), Some(1250));
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("n/a"), None);
    }
}
