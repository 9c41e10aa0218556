use crate::{
    MAX_CHAIN_DEPTH,
    error::SchemaError,
    node::{ModelGraph, Property, Type, TypeId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the built-in record that models arrays.
pub const ARRAY_RECORD_NAME: &str = "Array";

///
/// Record
///
/// A named record with ordered properties. Entities are records that carry
/// entity metadata.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Record {
    pub name: String,

    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeId>,

    // element type for indexed records such as the built-in `Array`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer: Option<TypeId>,
}

impl Record {
    #[must_use]
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties,
            base: None,
            indexer: None,
        }
    }

    /// The built-in array shape: `Array` with an element indexer.
    #[must_use]
    pub fn array_of(element: TypeId) -> Self {
        Self {
            indexer: Some(element),
            ..Self::new(ARRAY_RECORD_NAME, Vec::new())
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Element type when this record is the built-in array shape.
    #[must_use]
    pub fn array_element(&self) -> Option<TypeId> {
        self.indexer
            .filter(|_| self.name == ARRAY_RECORD_NAME && self.properties.is_empty())
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl ModelGraph {
    /// Own properties followed by inherited ones, in declaration order.
    /// An inherited property shadowed by a more-derived one is skipped.
    pub fn record_properties<'a>(
        &'a self,
        record: &'a Record,
    ) -> Result<Vec<&'a Property>, SchemaError> {
        let mut props: Vec<&Property> = Vec::new();
        let mut seen = BTreeSet::new();
        let mut current = record;
        let mut depth = 0;

        loop {
            for prop in &current.properties {
                if props.iter().all(|p| p.name != prop.name) {
                    props.push(prop);
                }
            }

            let Some(base) = current.base else {
                break;
            };
            if !seen.insert(base) {
                return Err(SchemaError::RecordCycle {
                    record: record.name.clone(),
                });
            }
            depth += 1;
            if depth > MAX_CHAIN_DEPTH {
                return Err(SchemaError::ChainTooDeep {
                    name: record.name.clone(),
                    max: MAX_CHAIN_DEPTH,
                });
            }

            current = match self.get(base)? {
                Type::Record(node) => node,
                other => {
                    return Err(SchemaError::InvalidBase {
                        name: current.name.clone(),
                        base_kind: other.kind_name(),
                        expected: "record",
                    });
                }
            };
        }

        Ok(props)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Intrinsic;

    #[test]
    fn derived_properties_come_first_and_shadow() {
        let mut graph = ModelGraph::new();
        let s = graph.intrinsic(Intrinsic::String);
        let n = graph.intrinsic(Intrinsic::Int32);

        let base = graph.add(Record::new(
            "Base",
            vec![Property::required("id", s), Property::required("name", s)],
        ));
        let derived = Record::new(
            "Derived",
            vec![Property::required("name", n), Property::required("age", n)],
        )
        .with_base(base);

        let props = graph.record_properties(&derived).unwrap();
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["name", "age", "id"]);
        assert_eq!(props[0].ty, n, "derived property shadows the inherited one");
    }

    #[test]
    fn record_base_cycles_are_rejected() {
        let mut graph = ModelGraph::new();
        let a = graph.add(Record::new("A", vec![]).with_base(TypeId(1)));
        graph.add(Record::new("B", vec![]).with_base(a));

        let Type::Record(rec) = graph.get(a).unwrap() else {
            panic!("expected record");
        };
        assert!(matches!(
            graph.record_properties(rec),
            Err(SchemaError::RecordCycle { .. })
        ));
    }

    #[test]
    fn array_shape_is_detected() {
        let elem = TypeId(0);
        assert_eq!(Record::array_of(elem).array_element(), Some(elem));

        let mut named = Record::new(ARRAY_RECORD_NAME, vec![]);
        named.indexer = Some(elem);
        assert_eq!(named.array_element(), Some(elem));

        let mut map = Record::new("Record", vec![]);
        map.indexer = Some(elem);
        assert_eq!(map.array_element(), None);
    }
}
