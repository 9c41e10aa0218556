use dynamap_schema::{node::Number, validate::naming::is_identifier};
use std::fmt::Write;

///
/// Expr
///
/// Literal-expression syntax tree produced by the serializer.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    Str(String),
    Array(Vec<Self>),
    Object(ObjectLit),
    Raw(String),
}

impl Expr {
    /// Render as text. `indent == 0` yields a single line.
    #[must_use]
    pub fn render(&self, indent: usize) -> String {
        let mut out = String::new();
        write_expr(&mut out, self, indent, 0);

        out
    }

    const fn is_composite(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }
}

///
/// ObjectLit
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectLit {
    pub members: Vec<Member>,
}

impl ObjectLit {
    /// One-member fragment.
    #[must_use]
    pub fn single(key: impl Into<String>, value: Expr) -> Self {
        Self {
            members: vec![Member {
                key: key.into(),
                value,
            }],
        }
    }

    /// Concatenate the members of several fragments, preserving order.
    #[must_use]
    pub fn merge(fragments: impl IntoIterator<Item = Self>) -> Self {
        Self {
            members: fragments.into_iter().flat_map(|f| f.members).collect(),
        }
    }
}

///
/// Member
///

#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub key: String,
    pub value: Expr,
}

/// Double-quoted string literal with the minimal escapes needed to stay a
/// single valid token.
#[must_use]
pub fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                write!(out, "\\u{:04x}", u32::from(c)).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');

    out
}

/// Property name, bare when it is a plain identifier.
#[must_use]
pub fn render_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote_str(key)
    }
}

fn write_expr(out: &mut String, expr: &Expr, indent: usize, depth: usize) {
    match expr {
        Expr::Undefined => out.push_str("undefined"),
        Expr::Null => out.push_str("null"),
        Expr::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Expr::Number(n) => {
            write!(out, "{n}").ok();
        }
        Expr::Str(s) => out.push_str(&quote_str(s)),
        Expr::Raw(src) => out.push_str(src),
        Expr::Array(items) => write_array(out, items, indent, depth),
        Expr::Object(obj) => write_object(out, obj, indent, depth),
    }
}

fn write_array(out: &mut String, items: &[Expr], indent: usize, depth: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }

    // arrays of plain values stay on one line
    if indent == 0 || !items.iter().any(Expr::is_composite) {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_expr(out, item, 0, 0);
        }
        out.push(']');
        return;
    }

    out.push_str("[\n");
    for (i, item) in items.iter().enumerate() {
        pad(out, indent, depth + 1);
        write_expr(out, item, indent, depth + 1);
        if i + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    pad(out, indent, depth);
    out.push(']');
}

fn write_object(out: &mut String, obj: &ObjectLit, indent: usize, depth: usize) {
    if obj.members.is_empty() {
        out.push_str("{}");
        return;
    }

    if indent == 0 {
        out.push_str("{ ");
        for (i, member) in obj.members.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&render_key(&member.key));
            out.push_str(": ");
            write_expr(out, &member.value, 0, 0);
        }
        out.push_str(" }");
        return;
    }

    out.push_str("{\n");
    for (i, member) in obj.members.iter().enumerate() {
        pad(out, indent, depth + 1);
        out.push_str(&render_key(&member.key));
        out.push_str(": ");
        write_expr(out, &member.value, indent, depth + 1);
        if i + 1 < obj.members.len() {
            out.push(',');
        }
        out.push('\n');
    }
    pad(out, indent, depth);
    out.push('}');
}

fn pad(out: &mut String, indent: usize, depth: usize) {
    out.extend(std::iter::repeat_n(' ', indent * depth));
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(members: Vec<(&str, Expr)>) -> Expr {
        Expr::Object(ObjectLit::merge(
            members.into_iter().map(|(k, v)| ObjectLit::single(k, v)),
        ))
    }

    #[test]
    fn compact_rendering() {
        let expr = obj(vec![
            ("type", Expr::Str("set".into())),
            (
                "items",
                Expr::Array(vec![Expr::Str("LOW".into()), Expr::Str("HIGH".into())]),
            ),
            ("required", Expr::Bool(true)),
            ("nested", obj(vec![])),
        ]);

        assert_eq!(
            expr.render(0),
            r#"{ type: "set", items: ["LOW", "HIGH"], required: true, nested: {} }"#
        );
    }

    #[test]
    fn pretty_rendering_keeps_flat_arrays_inline() {
        let expr = obj(vec![
            (
                "pk",
                obj(vec![
                    ("field", Expr::Str("pk".into())),
                    ("composite", Expr::Array(vec![Expr::Str("id".into())])),
                ]),
            ),
            ("validate", Expr::Raw("(value) => true".into())),
        ]);

        let expected = "{\n  pk: {\n    field: \"pk\",\n    composite: [\"id\"]\n  },\n  validate: (value) => true\n}";
        assert_eq!(expr.render(2), expected);
    }

    #[test]
    fn pretty_rendering_breaks_arrays_of_objects() {
        let expr = Expr::Array(vec![obj(vec![("a", Expr::Null)])]);
        assert_eq!(expr.render(2), "[\n  {\n    a: null\n  }\n]");
    }

    #[test]
    fn keys_are_quoted_only_when_needed() {
        assert_eq!(render_key("gsi1pk"), "gsi1pk");
        assert_eq!(render_key("with-dash"), "\"with-dash\"");
        assert_eq!(render_key(""), "\"\"");
    }

    #[test]
    fn strings_escape_quotes_backslashes_and_controls() {
        assert_eq!(quote_str(r"a\d"), r#""a\\d""#);
        assert_eq!(quote_str("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(quote_str("line\nbreak"), r#""line\nbreak""#);
        assert_eq!(quote_str("\u{1}"), r#""\u0001""#);
    }
}
