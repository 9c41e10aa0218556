use crate::{descriptor::AttributeType, error::CompileError, serialize::{quote_str, render_key}};
use dynamap_schema::{
    MAX_CHAIN_DEPTH,
    node::{Enum, Literal, ModelGraph, Record, Type, TypeId},
    types::Intrinsic,
};

/// Map a model-graph type to its attribute type.
pub fn map_type(graph: &ModelGraph, id: TypeId) -> Result<AttributeType, CompileError> {
    Mapper::new(graph).map(id)
}

/// Render a model-graph type as a textual type expression, as carried by
/// custom attribute types.
pub fn type_expr(graph: &ModelGraph, id: TypeId) -> Result<String, CompileError> {
    Mapper::new(graph).expr(id)
}

///
/// Mapper
///
/// Recursive walk with the stack of records being expanded, so
/// self-referencing records fail instead of recursing forever.
///

struct Mapper<'a> {
    graph: &'a ModelGraph,
    records: Vec<TypeId>,
}

impl<'a> Mapper<'a> {
    const fn new(graph: &'a ModelGraph) -> Self {
        Self {
            graph,
            records: Vec::new(),
        }
    }

    fn map(&mut self, id: TypeId) -> Result<AttributeType, CompileError> {
        let graph = self.graph;

        match graph.get(id)? {
            Type::Scalar(_) => self.scalar(id),
            Type::Record(record) => match record.array_element() {
                Some(element) => self.array(element),
                None => self.record(id, record),
            },
            Type::Array(array) => self.array(array.element),
            Type::Enum(node) => Ok(AttributeType::Enum(enum_values(node)?)),
            Type::Union(node) => match graph.literal_union_values(node)? {
                Some(values) => Ok(AttributeType::Enum(values)),
                None => Ok(AttributeType::Custom(self.expr(id)?)),
            },
            other => Err(CompileError::unsupported_type(
                other.display_name(),
                format!("no attribute mapping for {} types", other.kind_name()),
            )),
        }
    }

    fn scalar(&self, id: TypeId) -> Result<AttributeType, CompileError> {
        let root = self.graph.scalar_root(id)?;

        match Intrinsic::from_name(&root.name) {
            Some(i) if i.is_binary() => Err(CompileError::unsupported_type(
                &root.name,
                "raw binary data has no attribute type",
            )),
            Some(i) if i.is_numeric() => Ok(AttributeType::Number),
            Some(i) if i.is_boolean() => Ok(AttributeType::Boolean),
            _ => Ok(AttributeType::String),
        }
    }

    fn array(&mut self, element: TypeId) -> Result<AttributeType, CompileError> {
        match self.graph.get(element)? {
            Type::Enum(node) => {
                let items = enum_values(node)?.iter().map(Literal::to_string).collect();

                Ok(AttributeType::Set(items))
            }
            _ => Ok(AttributeType::List(Box::new(self.map(element)?))),
        }
    }

    fn record(&mut self, id: TypeId, record: &Record) -> Result<AttributeType, CompileError> {
        self.enter(id, &record.name)?;

        let mut props = Vec::new();
        for prop in self.graph.record_properties(record)? {
            props.push((prop.name.clone(), self.map(prop.ty)?));
        }
        self.records.pop();

        Ok(AttributeType::Map(props))
    }

    fn enter(&mut self, id: TypeId, name: &str) -> Result<(), CompileError> {
        if self.records.contains(&id) {
            return Err(CompileError::unsupported_type(
                name,
                "record refers to itself",
            ));
        }
        if self.records.len() == MAX_CHAIN_DEPTH {
            return Err(CompileError::unsupported_type(
                name,
                format!("nesting exceeds the maximum depth of {MAX_CHAIN_DEPTH}"),
            ));
        }
        self.records.push(id);

        Ok(())
    }

    // textual type expressions

    fn expr(&mut self, id: TypeId) -> Result<String, CompileError> {
        let graph = self.graph;

        let text = match graph.get(id)? {
            Type::Scalar(_) => match self.scalar(id)? {
                AttributeType::Number => "number",
                AttributeType::Boolean => "boolean",
                _ => "string",
            }
            .to_string(),
            Type::Record(record) => match record.array_element() {
                Some(element) => self.array_expr(element)?,
                None => self.record_expr(id, record)?,
            },
            Type::Array(array) => self.array_expr(array.element)?,
            Type::Enum(node) => literal_union(&enum_values(node)?),
            Type::Union(node) => {
                if node.variants.is_empty() {
                    return Err(CompileError::unsupported_type(
                        node.name.as_deref().unwrap_or("union"),
                        "union has no variants",
                    ));
                }

                let mut variants = Vec::with_capacity(node.variants.len());
                for variant in &node.variants {
                    variants.push(self.expr(*variant)?);
                }
                variants.join(" | ")
            }
            Type::StringLiteral { value } => quote_str(value),
            Type::NumericLiteral { value } => value.to_string(),
            Type::BooleanLiteral { value } => value.to_string(),
            Type::Tuple { items } => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(self.expr(*item)?);
                }
                format!("[{}]", parts.join(", "))
            }
            Type::Null => "null".to_string(),
            Type::Unknown => "unknown".to_string(),
            other @ (Type::Void | Type::Never) => {
                return Err(CompileError::unsupported_type(
                    other.kind_name(),
                    "not representable in a type expression",
                ));
            }
        };

        Ok(text)
    }

    fn array_expr(&mut self, element: TypeId) -> Result<String, CompileError> {
        let inner = self.expr(element)?;

        if inner.contains(" | ") {
            Ok(format!("({inner})[]"))
        } else {
            Ok(format!("{inner}[]"))
        }
    }

    fn record_expr(&mut self, id: TypeId, record: &Record) -> Result<String, CompileError> {
        self.enter(id, &record.name)?;

        let mut members = Vec::new();
        for prop in self.graph.record_properties(record)? {
            let marker = if prop.optional { "?" } else { "" };
            members.push(format!(
                "{}{marker}: {}",
                render_key(&prop.name),
                self.expr(prop.ty)?
            ));
        }
        self.records.pop();

        if members.is_empty() {
            Ok("{}".to_string())
        } else {
            Ok(format!("{{ {}; }}", members.join("; ")))
        }
    }
}

fn enum_values(node: &Enum) -> Result<Vec<Literal>, CompileError> {
    if node.members.is_empty() {
        return Err(CompileError::unsupported_type(
            &node.name,
            "enum has no members",
        ));
    }

    Ok(node.values())
}

fn literal_union(values: &[Literal]) -> String {
    values
        .iter()
        .map(|value| match value {
            Literal::Text(s) => quote_str(s),
            Literal::Number(n) => n.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

///
/// TESTS
///
