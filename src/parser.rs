use crate::ast::{AttributeRef, EntityRecord, Record, RelationRecord, Schema};
use crate::lexer::{Classifier, LineKind, Splitter};
use crate::names;
use crate::symbols::SymbolTable;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Wrong syntax in file on line: {line}")]
    Syntax { line: usize },
    /// A line the classifier accepted as a relation split into fewer than
    /// four parts. The patterns guarantee the shape, so hitting this means
    /// classifier and splitter have diverged.
    #[error("internal: relation on line {line} did not split into four parts")]
    RelationShape { line: usize },
}

/// Recoverable condition noted during the build phase and reported by the
/// caller; compilation continues past it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Warning {
    #[error("duplicate variable \"{name}\" on line {line}; keeping the first value")]
    DuplicateVariable { name: String, line: usize },
}

/// Single-pass schema builder.
///
/// Walks the descriptor top to bottom, classifying each line and appending
/// records in source order. Variable declarations feed the symbol table as
/// they are seen, so a substitution only applies to lines below its
/// declaration. The first unrecognized line aborts the build.
pub struct Parser<'a> {
    source: &'a str,
    classifier: Classifier,
    symbols: SymbolTable,
    warnings: Vec<Warning>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            classifier: Classifier::new(),
            symbols: SymbolTable::new(),
            warnings: Vec::new(),
        }
    }

    pub fn parse(&mut self) -> Result<Schema, ParseError> {
        let mut records = Vec::new();
        for (idx, line) in self.source.lines().enumerate() {
            let line_no = idx + 1;
            match self.classifier.classify(line) {
                LineKind::Comment => continue,
                LineKind::Variable => self.variable_line(line, line_no),
                LineKind::Entity => records.push(Record::Entity(self.entity_line(line))),
                LineKind::Relation => {
                    records.push(Record::Relation(self.relation_line(line, line_no)?))
                }
                LineKind::Unrecognized => return Err(ParseError::Syntax { line: line_no }),
            }
        }
        Ok(Schema { records })
    }

    /// Warnings collected so far, in the order they were raised.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn variable_line(&mut self, line: &str, line_no: usize) {
        let mut sp = Splitter::new(line);
        if let (Some(name), Some(value)) = (sp.next(":"), sp.next(":")) {
            if !self.symbols.insert(name.clone(), value) {
                self.warnings
                    .push(Warning::DuplicateVariable { name, line: line_no });
            }
        }
    }

    fn entity_line(&mut self, line: &str) -> EntityRecord {
        let mut sp = Splitter::new(line);
        let mut name = String::new();
        let mut attributes = Vec::new();
        let mut position = 0;
        while let Some(tok) = sp.next("(,)") {
            let tok = self.symbols.substitute(tok);
            if position == 0 {
                // The entity name doubles as attribute 0, the entity's
                // own node in the output.
                name = tok.clone();
            }
            attributes.push(AttributeRef {
                unique_id: names::make_id(&name, &tok, position),
                display_name: tok,
            });
            position += 1;
        }
        EntityRecord { name, attributes }
    }

    fn relation_line(&mut self, line: &str, line_no: usize) -> Result<RelationRecord, ParseError> {
        let mut sp = Splitter::new(line);
        let mut parts = Vec::new();
        while let Some(tok) = sp.next(">,") {
            parts.push(self.symbols.substitute(tok));
        }
        let mut parts = parts.into_iter();
        let (Some(source), Some(destination), Some(label), Some(pair)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseError::RelationShape { line: line_no });
        };

        let mut cards = Splitter::new(&pair);
        let (Some(source_cardinality), Some(destination_cardinality)) = (
            cards.next(":").and_then(|t| t.chars().next()),
            cards.next(":").and_then(|t| t.chars().next()),
        ) else {
            return Err(ParseError::RelationShape { line: line_no });
        };

        Ok(RelationRecord {
            source,
            destination,
            label,
            source_cardinality,
            destination_cardinality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Schema {
        Parser::new(input).parse().unwrap()
    }

    #[test]
    fn test_parse_entity() {
        let schema = parse("Student(id,name)");
        assert_eq!(schema.records.len(), 1);
        let Record::Entity(e) = &schema.records[0] else {
            panic!("expected entity record");
        };
        assert_eq!(e.name, "Student");
        // Attribute 0 is the entity itself.
        assert_eq!(e.attributes.len(), 3);
        assert_eq!(e.attributes[0].display_name, "Student");
        assert_eq!(e.attributes[0].unique_id, "Student_Student000");
        assert_eq!(e.attributes[1].unique_id, "Student_id001");
        assert_eq!(e.attributes[2].unique_id, "Student_name002");
    }

    #[test]
    fn test_parse_relation() {
        let schema = parse("Student>Course,enrolled,m:n");
        let Record::Relation(r) = &schema.records[0] else {
            panic!("expected relation record");
        };
        assert_eq!(r.source, "Student");
        assert_eq!(r.destination, "Course");
        assert_eq!(r.label, "enrolled");
        assert_eq!(r.source_cardinality, 'm');
        assert_eq!(r.destination_cardinality, 'n');
    }

    #[test]
    fn test_parse_relation_padded_cardinality() {
        let schema = parse("A(x)\nB(y)\nA>B,owns,1 : N");
        let Record::Relation(r) = &schema.records[2] else {
            panic!("expected relation record");
        };
        assert_eq!(r.source_cardinality, '1');
        assert_eq!(r.destination_cardinality, 'N');
    }

    #[test]
    fn test_syntax_error_reports_line_number() {
        let err = Parser::new("Student(id,name)\nbad syntax here")
            .parse()
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 2 }));
    }

    #[test]
    fn test_comments_and_blanks_keep_line_numbers() {
        let err = Parser::new("# header\n\nStudent(id)\n???")
            .parse()
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 4 }));
    }

    #[test]
    fn test_variable_substitution_before_id_generation() {
        let schema = parse("x:hello\nTeam(x,name)");
        let Record::Entity(e) = &schema.records[0] else {
            panic!("expected entity record");
        };
        assert_eq!(e.attributes[1].display_name, "hello");
        assert_eq!(e.attributes[1].unique_id, "Team_hello001");
    }

    #[test]
    fn test_variable_substitutes_entity_name() {
        let schema = parse("t:Roster\nt(id)");
        let Record::Entity(e) = &schema.records[0] else {
            panic!("expected entity record");
        };
        assert_eq!(e.name, "Roster");
        assert_eq!(e.attributes[0].unique_id, "Roster_Roster000");
    }

    #[test]
    fn test_variable_substitutes_relation_endpoint() {
        let schema = parse("s:Student\nStudent(id)\nCourse(id)\ns>Course,takes,1:n");
        let Record::Relation(r) = &schema.records[2] else {
            panic!("expected relation record");
        };
        assert_eq!(r.source, "Student");
    }

    #[test]
    fn test_variables_are_not_hoisted() {
        // Declared after use: the token stays as written.
        let schema = parse("Team(x)\nx:hello");
        let Record::Entity(e) = &schema.records[0] else {
            panic!("expected entity record");
        };
        assert_eq!(e.attributes[1].display_name, "x");
    }

    #[test]
    fn test_duplicate_variable_warns_and_keeps_first() {
        let mut parser = Parser::new("x:hello\nx:world\nTeam(x)");
        let schema = parser.parse().unwrap();
        assert_eq!(
            parser.warnings(),
            &[Warning::DuplicateVariable {
                name: "x".into(),
                line: 2
            }]
        );
        let Record::Entity(e) = &schema.records[0] else {
            panic!("expected entity record");
        };
        assert_eq!(e.attributes[1].display_name, "hello");
    }

    #[test]
    fn test_records_keep_source_order() {
        let schema = parse("A(x)\nA>B,r,1:1\nB(y)");
        assert!(matches!(schema.records[0], Record::Entity(_)));
        assert!(matches!(schema.records[1], Record::Relation(_)));
        assert!(matches!(schema.records[2], Record::Entity(_)));
    }
}
