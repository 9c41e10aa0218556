use crate::{
    error::SchemaError,
    node::{Literal, ModelGraph, TypeId},
};
use serde::{Deserialize, Serialize};

///
/// Union
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Union {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub variants: Vec<TypeId>,
}

impl Union {
    #[must_use]
    pub const fn anonymous(variants: Vec<TypeId>) -> Self {
        Self {
            name: None,
            variants,
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>, variants: Vec<TypeId>) -> Self {
        Self {
            name: Some(name.into()),
            variants,
        }
    }
}

impl ModelGraph {
    /// Literal values of a union whose variants are all string or numeric
    /// literals, in variant order. `None` for any other union.
    pub fn literal_union_values(&self, union: &Union) -> Result<Option<Vec<Literal>>, SchemaError> {
        if union.variants.is_empty() {
            return Ok(None);
        }

        let mut values = Vec::with_capacity(union.variants.len());
        for id in &union.variants {
            match self.get(*id)?.as_literal() {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }

        Ok(Some(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        node::{Number, Type},
        types::Intrinsic,
    };

    #[test]
    fn literal_unions_keep_variant_order() {
        let mut graph = ModelGraph::new();
        let b = graph.add(Type::StringLiteral { value: "b".into() });
        let a = graph.add(Type::StringLiteral { value: "a".into() });
        let one = graph.add(Type::NumericLiteral {
            value: Number::Int(1),
        });
        let union = Union::anonymous(vec![b, a, one]);

        assert_eq!(
            graph.literal_union_values(&union).unwrap(),
            Some(vec![
                Literal::Text("b".into()),
                Literal::Text("a".into()),
                Literal::Number(Number::Int(1)),
            ])
        );
    }

    #[test]
    fn mixed_unions_are_not_literal() {
        let mut graph = ModelGraph::new();
        let a = graph.add(Type::StringLiteral { value: "a".into() });
        let s = graph.intrinsic(Intrinsic::String);
        let union = Union::anonymous(vec![a, s]);

        assert_eq!(graph.literal_union_values(&union).unwrap(), None);
    }

    #[test]
    fn boolean_literals_do_not_make_a_literal_union() {
        let mut graph = ModelGraph::new();
        let t = graph.add(Type::BooleanLiteral { value: true });
        let union = Union::anonymous(vec![t]);

        assert_eq!(graph.literal_union_values(&union).unwrap(), None);
    }
}
