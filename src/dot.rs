//! Graphviz dot emitter.
//!
//! Walks a completed [`Schema`] in record order and streams one dot
//! fragment per record, so a failure mid-way leaves the fragments already
//! written in place. Relation endpoints resolve against an entity-name
//! index built over the whole schema before emission starts, which lets a
//! relation line precede the entities it names.

use std::collections::HashMap;
use std::io::Write;

use crate::ast::{EntityRecord, Record, RelationRecord, Schema};

#[derive(Debug, thiserror::Error)]
pub enum DotError {
    #[error("unknown entity in relationship {ordinal}: {}", .names.join(", "))]
    UnknownEntity { ordinal: usize, names: Vec<String> },
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}

const HEADER: &str = "graph main {\n    ranksep=0.75;\n    rankdir=TB;\n    layout=dot;\n    constraint=true;\n    ";

/// Emit the whole dot document for `schema` into `out`.
pub fn write_dot<W: Write>(schema: &Schema, mut out: W) -> Result<(), DotError> {
    // Entity name -> entity node id, first declaration wins.
    let mut index: HashMap<&str, &str> = HashMap::new();
    for record in &schema.records {
        if let Record::Entity(e) = record {
            index.entry(e.name.as_str()).or_insert_with(|| e.node_id());
        }
    }

    out.write_all(HEADER.as_bytes())?;

    let mut rel_index = 0;
    for record in &schema.records {
        match record {
            Record::Entity(e) => write_entity(&mut out, e)?,
            Record::Relation(r) => {
                write_relation(&mut out, r, rel_index, &index)?;
                rel_index += 1;
            }
        }
    }

    out.write_all(b"}")?;
    Ok(())
}

fn write_entity<W: Write>(out: &mut W, entity: &EntityRecord) -> Result<(), DotError> {
    write!(out, "\nsubgraph \"{}\" {{\nnode [shape=oval]\n", entity.name)?;
    write!(
        out,
        "\"{}\" [label=\"{}\",shape=box];\n",
        entity.node_id(),
        entity.name
    )?;
    for attr in &entity.attributes[1..] {
        write!(out, "\"{}\" [label=\"{}\"];\n", attr.unique_id, attr.display_name)?;
    }
    for attr in &entity.attributes[1..] {
        write!(out, "\"{}\" -- \"{}\";\n", entity.node_id(), attr.unique_id)?;
    }
    write!(out, "}}\n")?;
    Ok(())
}

fn write_relation<W: Write>(
    out: &mut W,
    rel: &RelationRecord,
    rel_index: usize,
    index: &HashMap<&str, &str>,
) -> Result<(), DotError> {
    let src = index.get(rel.source.as_str()).copied();
    let dst = index.get(rel.destination.as_str()).copied();

    let (Some(src), Some(dst)) = (src, dst) else {
        let mut names = Vec::new();
        if src.is_none() {
            names.push(rel.source.clone());
        }
        if dst.is_none() {
            names.push(rel.destination.clone());
        }
        return Err(DotError::UnknownEntity {
            ordinal: rel_index + 1,
            names,
        });
    };

    write!(out, "\nrel{} [label=\"{}\", shape=diamond];\n", rel_index, rel.label)?;
    write!(
        out,
        "\"{}\" -- rel{} [headport=n,headlabel={},labeldistance=2,color=red];\n",
        src, rel_index, rel.source_cardinality
    )?;
    write!(
        out,
        "rel{} -- \"{}\" [tailport=s,taillabel={},labeldistance=2,color=red];\n",
        rel_index, dst, rel.destination_cardinality
    )?;
    Ok(())
}
