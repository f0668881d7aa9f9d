#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Records in source order; generation walks this in order.
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Entity(EntityRecord),
    Relation(RelationRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub name: String,
    /// Never empty; attribute 0 is the entity's own node
    /// (display name equals the entity name).
    pub attributes: Vec<AttributeRef>,
}

impl EntityRecord {
    /// Unique id of the entity's own graph node.
    pub fn node_id(&self) -> &str {
        &self.attributes[0].unique_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRef {
    pub display_name: String,
    pub unique_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationRecord {
    pub source: String,
    pub destination: String,
    pub label: String,
    /// One of `1 m n M N`; display only, case carries no meaning.
    pub source_cardinality: char,
    pub destination_cardinality: char,
}
