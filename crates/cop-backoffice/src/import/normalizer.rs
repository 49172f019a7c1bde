use crate::domain::Volet;

/// Lowercase, strip French accents, and collapse separator runs so header
/// and cell variants ("Assistance Carrière", "assistance_carriere") compare
/// equal.
pub(crate) fn normalize_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    for lowered in value.chars().flat_map(char::to_lowercase) {
        let mapped: Option<&str> = match lowered {
            'à' | 'â' | 'ä' => Some("a"),
            'é' | 'è' | 'ê' | 'ë' => Some("e"),
            'î' | 'ï' => Some("i"),
            'ô' | 'ö' => Some("o"),
            'ù' | 'û' | 'ü' => Some("u"),
            'ç' => Some("c"),
            'œ' => Some("oe"),
            'a'..='z' | '0'..='9' => None,
            _ => {
                pending_space = true;
                continue;
            }
        };
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        match mapped {
            Some(text) => out.push_str(text),
            None => out.push(lowered),
        }
    }
    out
}

/// Map a free-text volet cell onto the closed enumeration. Unknown text is
/// not an error: the event is imported without a volet and lands in the
/// "non_defini" bucket downstream.
pub(crate) fn normalize_volet(raw: &str) -> Option<Volet> {
    let normalized = normalize_text(raw);
    if normalized.is_empty() {
        return None;
    }

    // Word-based matching: "accompagnement" must not trip the "com"
    // shorthand used for information/communication.
    let words: Vec<&str> = normalized.split(' ').collect();
    let any = |pred: fn(&str) -> bool| words.iter().copied().any(pred);

    if any(|word| word.starts_with("info") || word.starts_with("communic") || word == "com") {
        Some(Volet::InformationCommunication)
    } else if any(|word| word.starts_with("accompagnement") || word.starts_with("projet")) {
        Some(Volet::AccompagnementProjets)
    } else if any(|word| word.starts_with("carriere")) {
        Some(Volet::AssistanceCarriere)
    } else if any(|word| word.starts_with("filiere")) {
        Some(Volet::AssistanceFiliere)
    } else {
        None
    }
}
