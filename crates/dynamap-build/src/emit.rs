use crate::{
    descriptor::EntitySchema,
    error::CompileError,
    serialize::{quote_str, serialize_with_indent},
};
use dynamap_config_build::Config;

/// Import line for the custom attribute type.
#[must_use]
pub fn import_line(config: &Config) -> String {
    format!(
        "import {{ {} }} from {};",
        config.output.custom_type,
        quote_str(&config.output.import_module)
    )
}

/// One `const` binding of an entity schema literal.
pub fn entity_statement(schema: &EntitySchema, config: &Config) -> Result<String, CompileError> {
    let literal = serialize_with_indent(&schema.to_value(config), config.output.indent)
        .map_err(|e| CompileError::from(e).in_context(schema.name()))?;
    let export = if config.output.export { "export " } else { "" };

    Ok(format!("{export}const {} = {literal};", schema.name()))
}

/// Render the whole generated document. The import line is emitted only
/// when some attribute uses the custom type.
pub fn emit_document(schemas: &[EntitySchema], config: &Config) -> Result<String, CompileError> {
    let mut blocks = Vec::with_capacity(schemas.len() + 1);

    if schemas.iter().any(EntitySchema::uses_custom_type) {
        blocks.push(import_line(config));
    }
    for schema in schemas {
        blocks.push(entity_statement(schema, config)?);
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');

    Ok(out)
}

///
/// TESTS
///
