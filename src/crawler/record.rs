//! Reaction record page parsing
//!
//! A record page carries its reaction SMILES in a `data-reaction-smiles`
//! attribute (usually on the "Smiles" button of a reaction pane). Detail
//! tables and definition lists may list further reactant and product SMILES.

use crate::reaction::{decompose, ReactionRecord};
use crate::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Selectors that locate the reaction string, in order of preference
const REACTION_MARKERS: &[(&str, Marker)] = &[
    (
        r#"div[id^="reaction-pane-"] button[data-reaction-smiles]"#,
        Marker::Attribute,
    ),
    ("[data-reaction-smiles]", Marker::Attribute),
    (".reaction-smiles", Marker::Text),
];

const REACTION_ATTRIBUTE: &str = "data-reaction-smiles";

#[derive(Debug, Clone, Copy)]
enum Marker {
    Attribute,
    Text,
}

/// Where a SMILES value found in a detail row belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SmilesRole {
    Input,
    Outcome,
}

/// Parses a reaction record page
///
/// # Returns
///
/// * `Ok(ReactionRecord)` - Tokens of the reaction string plus any SMILES
///   listed in detail tables
/// * `Err(ScrapeError::Parse)` - The page has no reaction string marker
/// * `Err(ScrapeError::Format)` - The reaction string is not `r>s>p`
///
/// # Example
///
/// ```
/// use crd_scraper::crawler::parse_record;
///
/// let html = r#"<div id="reaction-pane-0">
///     <button data-reaction-smiles="CC=O.O&gt;&gt;CC(O)O">Smiles</button>
/// </div>"#;
/// let record = parse_record(html, "https://example.com/id/1").unwrap();
/// assert_eq!(record.raw_inputs, vec!["CC=O", "O"]);
/// assert_eq!(record.outcomes, vec!["CC(O)O"]);
/// ```
pub fn parse_record(html: &str, url: &str) -> Result<ReactionRecord> {
    let document = Html::parse_document(html);

    let reaction = find_reaction_string(&document, url)?.ok_or_else(|| ScrapeError::Parse {
        url: url.to_string(),
        message: "reaction string marker not found".to_string(),
    })?;

    let mut record = ReactionRecord::from_decomposed(decompose(&reaction)?);

    for (role, value) in detail_smiles(&document, url)? {
        match role {
            SmilesRole::Input => record.push_input(value),
            SmilesRole::Outcome => record.push_outcome(value),
        }
    }

    Ok(record)
}

/// Compiles a CSS selector; a bad one is a parse error for the page at `url`
fn selector(css: &str, url: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse {
        url: url.to_string(),
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// Finds the first non-empty reaction string on the page
fn find_reaction_string(document: &Html, url: &str) -> Result<Option<String>> {
    for (css, marker) in REACTION_MARKERS {
        let selector = selector(css, url)?;
        let found = document.select(&selector).find_map(|element| {
            let value = match marker {
                Marker::Attribute => element.value().attr(REACTION_ATTRIBUTE)?.to_string(),
                Marker::Text => element.text().collect::<String>(),
            };
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        });
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}

/// Collects SMILES listed in `<table>` rows and `<dl>` entries
fn detail_smiles(document: &Html, url: &str) -> Result<Vec<(SmilesRole, String)>> {
    let row_selector = selector("table tr", url)?;
    let cell_selector = selector("th, td", url)?;
    let dl_selector = selector("dl", url)?;

    let mut found = Vec::new();

    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).take(2).collect();
        if let &[key, value] = cells.as_slice() {
            collect_entry(key, value, &mut found);
        }
    }

    for dl in document.select(&dl_selector) {
        let items: Vec<ElementRef> = dl.children().filter_map(ElementRef::wrap).collect();
        for pair in items.windows(2) {
            if pair[0].value().name() == "dt" && pair[1].value().name() == "dd" {
                collect_entry(pair[0], pair[1], &mut found);
            }
        }
    }

    Ok(found)
}

fn collect_entry(key: ElementRef, value: ElementRef, found: &mut Vec<(SmilesRole, String)>) {
    let key = key.text().collect::<Vec<_>>().join(" ").to_lowercase();
    let Some(role) = classify_key(&key) else {
        return;
    };

    for fragment in value.text().map(str::trim) {
        if !fragment.is_empty() && fragment != "SMILES" {
            found.push((role, fragment.to_string()));
        }
    }
}

fn classify_key(key: &str) -> Option<SmilesRole> {
    if !key.contains("smiles") {
        return None;
    }
    if key.contains("product") {
        Some(SmilesRole::Outcome)
    } else if key.contains("reactant") || key.contains("solvent") || key.contains("reagent") {
        Some(SmilesRole::Input)
    } else {
        None
    }
}
