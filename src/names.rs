//! Unique node identifiers for the generated graph.
//!
//! Display labels repeat freely across entities (every table has an `id`),
//! so graph nodes are keyed by a derived identifier instead. The scheme is
//! injective over (entity, attribute, ordinal): the zero-padded ordinal
//! separates same-named attributes even within one entity.

/// Derived graph-node identifier, e.g. `Student_id001`.
pub fn make_id(entity: &str, attribute: &str, position: usize) -> String {
    format!("{}_{}{:03}", entity, attribute, position)
}
