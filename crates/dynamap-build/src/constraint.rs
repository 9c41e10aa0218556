use crate::error::CompileError;
use dynamap_schema::{
    node::{Facets, Literal, ModelGraph, Number, Property, Type},
    types::{DateTimeKind, Intrinsic},
};

///
/// ConstraintSet
///
/// Normalized constraints of one property. Every slot holds the most
/// specific declaration found: property facets first, then each scalar of
/// the derivation chain from the leaf outward.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstraintSet {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub min_value: Option<Number>,
    pub max_value: Option<Number>,
    pub pattern: Option<String>,
    pub is_integer: bool,
    pub is_float: bool,
    pub date_time: Option<DateTimeKind>,

    /// Enum or literal-union values in declaration order. Informational; no
    /// validator check is derived from them.
    pub enum_values: Vec<Literal>,
}

impl ConstraintSet {
    #[must_use]
    pub const fn is_date_time(&self) -> bool {
        self.date_time.is_some()
    }

    /// True when at least one validator check would apply.
    #[must_use]
    pub const fn has_checks(&self) -> bool {
        self.min_length.is_some()
            || self.max_length.is_some()
            || self.min_value.is_some()
            || self.max_value.is_some()
            || self.pattern.is_some()
            || self.is_integer
            || self.is_float
            || self.date_time.is_some()
    }

    // fill slots that are still unset
    fn adopt(&mut self, facets: &Facets) {
        if self.min_length.is_none() {
            self.min_length = facets.min_length;
        }
        if self.max_length.is_none() {
            self.max_length = facets.max_length;
        }
        if self.min_value.is_none() {
            self.min_value = facets.min_value;
        }
        if self.max_value.is_none() {
            self.max_value = facets.max_value;
        }
        if self.pattern.is_none() {
            self.pattern.clone_from(&facets.pattern);
        }
    }

    fn classify(&mut self, intrinsic: Intrinsic) {
        self.is_integer |= intrinsic.is_integer();
        self.is_float |= intrinsic.is_float();

        if self.date_time.is_none() {
            self.date_time = intrinsic.date_time_kind();
        }
    }
}

/// Resolve the constraints that apply to `property`.
pub fn resolve_constraints(
    graph: &ModelGraph,
    property: &Property,
) -> Result<ConstraintSet, CompileError> {
    let mut set = ConstraintSet::default();
    set.adopt(&property.facets);

    match graph.get(property.ty)? {
        Type::Scalar(_) => {
            for scalar in graph.scalar_chain(property.ty)? {
                set.adopt(&scalar.facets);

                if let Some(intrinsic) = Intrinsic::from_name(&scalar.name) {
                    set.classify(intrinsic);
                }
            }

            // integer wins when the chain names both families
            if set.is_integer {
                set.is_float = false;
            }
        }
        Type::Enum(node) => set.enum_values = node.values(),
        Type::Union(node) => {
            if let Some(values) = graph.literal_union_values(node)? {
                set.enum_values = values;
            }
        }
        _ => {}
    }

    Ok(set)
}

///
/// TESTS
///
