//! Reaction data model and reaction string handling
//!
//! A reaction record is the unit of output: the reactant/solvent tokens that
//! went into a reaction and the product tokens that came out of it.

mod decompose;

pub use decompose::{decompose, Decomposed, FormatError, SEGMENT_SEPARATOR, TOKEN_SEPARATOR};

use serde::{Deserialize, Serialize};

/// One scraped reaction entry
///
/// Serialized with exactly two fields, `raw_inputs` and `outcomes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    /// Reactant and solvent tokens, in extraction order
    pub raw_inputs: Vec<String>,

    /// Product tokens and outcome descriptions, in extraction order
    pub outcomes: Vec<String>,
}

impl ReactionRecord {
    /// Builds a record from a decomposed reaction string
    ///
    /// Reactants come before solvents in `raw_inputs`.
    pub fn from_decomposed(parts: Decomposed) -> Self {
        let Decomposed {
            mut reactants,
            solvents,
            products,
        } = parts;
        reactants.extend(solvents);

        Self {
            raw_inputs: reactants,
            outcomes: products,
        }
    }

    /// Appends an input token unless it is already present
    pub fn push_input(&mut self, token: impl Into<String>) {
        push_unique(&mut self.raw_inputs, token.into());
    }

    /// Appends an outcome token unless it is already present
    pub fn push_outcome(&mut self, token: impl Into<String>) {
        push_unique(&mut self.outcomes, token.into());
    }
}

fn push_unique(list: &mut Vec<String>, token: String) {
    if !token.is_empty() && !list.contains(&token) {
        list.push(token);
    }
}
