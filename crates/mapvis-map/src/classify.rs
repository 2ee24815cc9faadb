//! Relationship classification between protein and RNA identifiers.

use std::collections::BTreeSet;

use mapvis_model::{Cardinality, Classification, MapvisError, Operator, Result};

/// Splits a feature field into trimmed atomic identifiers.
///
/// An empty `delimiter` keeps the whole field as one identifier. Duplicates
/// are kept; see [`dedup_preserving_order`].
///
/// # Errors
///
/// Returns [`MapvisError::AmbiguousGroup`] when the field is blank or any
/// token between delimiters is blank (`"CD3E//CD3G"`).
pub fn split_identifiers(field: &str, delimiter: &str, context: &str) -> Result<Vec<String>> {
    if field.trim().is_empty() {
        return Err(MapvisError::ambiguous(context, "field is empty"));
    }
    let tokens: Vec<&str> = if delimiter.is_empty() {
        vec![field.trim()]
    } else {
        field.split(delimiter).map(str::trim).collect()
    };
    if let Some(position) = tokens.iter().position(|token| token.is_empty()) {
        return Err(MapvisError::ambiguous(
            context,
            format!("empty identifier at position {} in {field:?}", position + 1),
        ));
    }
    Ok(tokens.into_iter().map(str::to_string).collect())
}

/// Removes repeated identifiers, keeping each at its first position.
pub fn dedup_preserving_order<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Classifies one group's identifier lists.
///
/// | proteins | RNAs | cardinality    | consensus  | protein op | RNA op |
/// |----------|------|----------------|------------|------------|--------|
/// | 1        | 1    | `OneToOne`     | the RNA    | none       | none   |
/// | 1        | ≥2   | `OneToMany`    | the protein| none       | sum    |
/// | ≥2       | 1    | `ManyToOne`    | the RNA    | max        | none   |
/// | ≥2       | ≥2   | `ManyToMany`   | first RNA  | max        | sum    |
///
/// # Errors
///
/// Returns [`MapvisError::AmbiguousGroup`] if either list is empty.
pub fn classify(proteins: &[String], rnas: &[String]) -> Result<Classification> {
    let (Some(first_protein), Some(first_rna)) = (proteins.first(), rnas.first()) else {
        return Err(MapvisError::ambiguous(
            "classification",
            format!(
                "{} protein and {} RNA identifiers; both sides need at least one",
                proteins.len(),
                rnas.len()
            ),
        ));
    };
    let classification = match (proteins.len(), rnas.len()) {
        (1, 1) => Classification {
            cardinality: Cardinality::OneToOne,
            consensus: first_rna.clone(),
            protein_operator: Operator::None,
            rna_operator: Operator::None,
        },
        (1, _) => Classification {
            cardinality: Cardinality::OneToMany,
            consensus: first_protein.clone(),
            protein_operator: Operator::None,
            rna_operator: Operator::Sum,
        },
        (_, 1) => Classification {
            cardinality: Cardinality::ManyToOne,
            consensus: first_rna.clone(),
            protein_operator: Operator::Max,
            rna_operator: Operator::None,
        },
        _ => Classification {
            cardinality: Cardinality::ManyToMany,
            consensus: first_rna.clone(),
            protein_operator: Operator::Max,
            rna_operator: Operator::Sum,
        },
    };
    Ok(classification)
}
