//! Reaction string decomposition
//!
//! Reaction SMILES are written `reactants>solvents>products`, with the
//! components of each group separated by `.`.

use thiserror::Error;

/// Separator between the three reaction groups
pub const SEGMENT_SEPARATOR: char = '>';

/// Separator between components inside one group
pub const TOKEN_SEPARATOR: char = '.';

/// A reaction string did not have exactly three `>`-separated segments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected 3 segments separated by '>', found {segments} in {input:?}")]
pub struct FormatError {
    /// The offending reaction string
    pub input: String,
    /// Number of segments found
    pub segments: usize,
}

/// The three token groups of a reaction string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposed {
    pub reactants: Vec<String>,
    pub solvents: Vec<String>,
    pub products: Vec<String>,
}

/// Splits a reaction string into reactant, solvent and product tokens
///
/// Tokens are kept verbatim so that joining each group with `.` and the
/// groups with `>` gives back the input. An empty segment yields an empty
/// group, never a single empty token.
///
/// # Example
///
/// ```
/// use crd_scraper::reaction::decompose;
///
/// let parts = decompose("CC=O.O>>CC(O)O").unwrap();
/// assert_eq!(parts.reactants, vec!["CC=O", "O"]);
/// assert!(parts.solvents.is_empty());
/// assert_eq!(parts.products, vec!["CC(O)O"]);
/// ```
pub fn decompose(s: &str) -> Result<Decomposed, FormatError> {
    let segments: Vec<&str> = s.split(SEGMENT_SEPARATOR).collect();

    let &[reactants, solvents, products] = segments.as_slice() else {
        return Err(FormatError {
            input: s.to_string(),
            segments: segments.len(),
        });
    };

    Ok(Decomposed {
        reactants: split_tokens(reactants),
        solvents: split_tokens(solvents),
        products: split_tokens(products),
    })
}

fn split_tokens(segment: &str) -> Vec<String> {
    if segment.is_empty() {
        return Vec::new();
    }
    segment.split(TOKEN_SEPARATOR).map(str::to_string).collect()
}
