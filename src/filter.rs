//! Search predicates shared by every resource kind.
//!
//! A [`FilterSpec`] is built from the optional query parameters of a search
//! request. Each parameter that is present becomes one [`Condition`]; absent
//! parameters add nothing, so `is_private=false` filters for `false` instead
//! of being dropped. The in-memory store evaluates the filter directly with
//! [`FilterSpec::matches`], the document store translates it into SQL.

use serde_json::Value;

use crate::db::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive, unanchored substring match on a text field.
    Contains(String),
    /// Exact equality against the stored value.
    Equals(Value),
    /// Inclusive text range; either bound may be missing.
    Range { from: Option<String>, to: Option<String> },
    /// The sequence field holds this value.
    Member(String),
}

impl Predicate {
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Predicate::Contains(needle) => value
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
            Predicate::Equals(expected) => value == Some(expected),
            Predicate::Range { from, to } => value.and_then(Value::as_str).is_some_and(|s| {
                from.as_deref().map_or(true, |lo| s >= lo) && to.as_deref().map_or(true, |hi| s <= hi)
            }),
            Predicate::Member(item) => value
                .and_then(Value::as_array)
                .is_some_and(|items| items.iter().any(|v| v.as_str() == Some(item.as_str()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: &'static str,
    pub predicate: Predicate,
}

/// Conjunction of per-field conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    conditions: Vec<Condition>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, field: &'static str, predicate: Predicate) -> Self {
        self.conditions.push(Condition { field, predicate });
        self
    }

    pub fn contains(self, field: &'static str, value: Option<String>) -> Self {
        match value {
            Some(text) => self.with(field, Predicate::Contains(text)),
            None => self,
        }
    }

    pub fn equals<V: Into<Value>>(self, field: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(field, Predicate::Equals(v.into())),
            None => self,
        }
    }

    /// Both bounds land in one condition regardless of which one is given.
    pub fn range(self, field: &'static str, from: Option<String>, to: Option<String>) -> Self {
        if from.is_none() && to.is_none() {
            return self;
        }
        self.with(field, Predicate::Range { from, to })
    }

    pub fn member(self, field: &'static str, value: Option<String>) -> Self {
        match value {
            Some(item) => self.with(field, Predicate::Member(item)),
            None => self,
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions
            .iter()
            .all(|c| c.predicate.matches(doc.get(c.field)))
    }
}
