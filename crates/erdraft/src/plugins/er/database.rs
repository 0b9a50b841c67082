//! ER diagram database
//!
//! Stores entities and relations in declaration order.

use std::fmt;

use anyhow::Result;

use crate::core::Database;

/// Column constraint keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    NotNull,
    Unique,
    Default,
    Check,
    Index,
}

impl Constraint {
    pub fn keyword(self) -> &'static str {
        match self {
            Constraint::NotNull => "NOT NULL",
            Constraint::Unique => "UNIQUE",
            Constraint::Default => "DEFAULT",
            Constraint::Check => "CHECK",
            Constraint::Index => "INDEX",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One column of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: String,
    /// Parenthesized size as written, e.g. `"10,2"`
    pub size: Option<String>,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    /// First-encounter order, no duplicates
    pub constraints: Vec<Constraint>,
}

impl Field {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            size: None,
            is_primary_key: false,
            is_foreign_key: false,
            constraints: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn foreign_key(mut self) -> Self {
        self.is_foreign_key = true;
        self
    }

    /// Add a constraint unless it is already present
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.add_constraint(constraint);
        self
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
    }

    /// Row text shown in an entity box: `"{name}: {type}"` plus key markers
    pub fn display_text(&self, pk_marker: &str, fk_marker: &str) -> String {
        let mut text = format!("{}: {}", self.name, self.ty);
        if self.is_primary_key {
            text.push(' ');
            text.push_str(pk_marker);
        }
        if self.is_foreign_key {
            text.push(' ');
            text.push_str(fk_marker);
        }
        text
    }
}

/// A named table with ordered fields
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_primary_key)
    }
}

/// Multiplicity at one end of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Multiplicity {
    ExactlyOne,
    ZeroOrOne,
    ZeroOrMany,
    OneOrMany,
}

impl Multiplicity {
    pub const ALL: [Multiplicity; 4] = [
        Multiplicity::ExactlyOne,
        Multiplicity::ZeroOrOne,
        Multiplicity::ZeroOrMany,
        Multiplicity::OneOrMany,
    ];

    /// Every accepted cardinality token. Mirrored spellings are accepted on
    /// either side of the connector.
    pub const TOKENS: [(&'static str, Multiplicity); 7] = [
        ("||", Multiplicity::ExactlyOne),
        ("o|", Multiplicity::ZeroOrOne),
        ("|o", Multiplicity::ZeroOrOne),
        ("o{", Multiplicity::ZeroOrMany),
        ("}o", Multiplicity::ZeroOrMany),
        ("|{", Multiplicity::OneOrMany),
        ("}|", Multiplicity::OneOrMany),
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, m)| *m)
    }

    /// Spelling used left of the connector, next to `from`
    pub fn left_token(self) -> &'static str {
        match self {
            Multiplicity::ExactlyOne => "||",
            Multiplicity::ZeroOrOne => "|o",
            Multiplicity::ZeroOrMany => "}o",
            Multiplicity::OneOrMany => "}|",
        }
    }

    /// Spelling used right of the connector, next to `to`
    pub fn right_token(self) -> &'static str {
        match self {
            Multiplicity::ExactlyOne => "||",
            Multiplicity::ZeroOrOne => "o|",
            Multiplicity::ZeroOrMany => "o{",
            Multiplicity::OneOrMany => "|{",
        }
    }

    pub fn is_many(self) -> bool {
        matches!(self, Multiplicity::ZeroOrMany | Multiplicity::OneOrMany)
    }
}

/// Connector style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineStyle {
    /// Solid `--`
    #[default]
    Identifying,
    /// Dotted `..`
    NonIdentifying,
}

impl LineStyle {
    pub fn connector(self) -> &'static str {
        match self {
            LineStyle::Identifying => "--",
            LineStyle::NonIdentifying => "..",
        }
    }
}

/// Multiplicities at both ends plus the connector style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cardinality {
    pub from: Multiplicity,
    pub to: Multiplicity,
    pub line: LineStyle,
}

impl Cardinality {
    pub fn new(from: Multiplicity, to: Multiplicity, line: LineStyle) -> Self {
        Self { from, to, line }
    }

    /// Mermaid notation, e.g. `||--o{`
    pub fn notation(&self) -> String {
        format!(
            "{}{}{}",
            self.from.left_token(),
            self.line.connector(),
            self.to.right_token()
        )
    }
}

/// A relation between two entity names
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    pub from: String,
    pub to: String,
    pub cardinality: Cardinality,
    pub label: Option<String>,
}

impl Relation {
    pub fn new(from: impl Into<String>, to: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cardinality,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_self_relation(&self) -> bool {
        self.from == self.to
    }
}

/// Parsed ER diagram
///
/// Entities keep every declaration, duplicates included. Name lookups resolve
/// to the last declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Last declaration of `name`
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().rev().find(|e| e.name == name)
    }

    /// Index of the last declaration of `name`
    pub fn entity_index(&self, name: &str) -> Option<usize> {
        self.entities.iter().rposition(|e| e.name == name)
    }

    pub fn contains_entity(&self, name: &str) -> bool {
        self.entities.iter().any(|e| e.name == name)
    }

    /// Names linked to `name` by any relation, first-seen order, no duplicates.
    /// A self relation lists `name` itself.
    pub fn related_entities(&self, name: &str) -> Vec<&str> {
        let mut related: Vec<&str> = Vec::new();
        for relation in &self.relations {
            let other = if relation.from == name {
                relation.to.as_str()
            } else if relation.to == name {
                relation.from.as_str()
            } else {
                continue;
            };
            if !related.contains(&other) {
                related.push(other);
            }
        }
        related
    }

    /// Names declared more than once, in order of their second declaration
    pub fn duplicate_entity_names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut duplicates: Vec<&str> = Vec::new();
        for entity in &self.entities {
            let name = entity.name.as_str();
            if seen.contains(&name) {
                if !duplicates.contains(&name) {
                    duplicates.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        duplicates
    }

    /// Relations with at least one endpoint that names no declared entity
    pub fn dangling_relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations
            .iter()
            .filter(|r| !self.contains_entity(&r.from) || !self.contains_entity(&r.to))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }
}

impl Database for Graph {
    type Node = Entity;
    type Edge = Relation;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_entity(node);
        Ok(())
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_relation(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.entity(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.entities.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relations.iter()
    }

    fn clear(&mut self) {
        self.entities.clear();
        self.relations.clear();
    }

    fn node_count(&self) -> usize {
        self.entities.len()
    }

    fn edge_count(&self) -> usize {
        self.relations.len()
    }
}
