use crate::MAX_ENTITY_NAME_LEN;

/// Words that cannot be used as a generated binding name.
const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "import", "in", "instanceof", "let", "new", "null", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

/// True when `ident` can be written unquoted as a binding or property name.
#[must_use]
pub fn is_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Ensure an identifier is non-empty, well-formed and not a reserved word.
pub fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if !is_identifier(ident) {
        return Err(format!("'{ident}' is not a valid identifier"));
    }
    if RESERVED.contains(&ident) {
        return Err(format!("the word '{ident}' is reserved"));
    }

    Ok(())
}

/// Ensure entity names are valid identifiers within the maximum length.
pub fn validate_entity_name(name: &str) -> Result<(), String> {
    if name.len() > MAX_ENTITY_NAME_LEN {
        return Err(format!(
            "entity name '{name}' exceeds max length {MAX_ENTITY_NAME_LEN}"
        ));
    }

    validate_ident(name).map_err(|e| format!("entity name {e}"))
}
