//! Reader for the data subset of the emitted literal syntax.
//!
//! Accepts what [`serialize`](super::serialize) produces for predicate-free
//! values: objects with bare or quoted keys, arrays, double-quoted strings,
//! numbers, booleans, `null` and `undefined`. Code fragments are rejected.

use crate::serialize::{Record, Value};
use dynamap_schema::node::Number;
use thiserror::Error as ThisError;

///
/// ParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
}

/// Parse one literal expression; trailing input other than whitespace is an
/// error.
pub fn parse_literal(text: &str) -> Result<Value, ParseError> {
    let mut parser = Parser { text, pos: 0 };
    let value = parser.value()?;
    parser.skip_ws();

    if parser.pos < text.len() {
        return Err(parser.error("unexpected trailing input"));
    }

    Ok(value)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();

        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_ws();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        self.skip_ws();

        match self.peek() {
            Some('{') => self.object(),
            Some('[') => self.array(),
            Some('"') => self.string().map(Value::Text),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number().map(Value::Number),
            Some(c) if c.is_ascii_alphabetic() => match self.word().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" => Ok(Value::Null),
                "undefined" => Ok(Value::Undefined),
                other => Err(self.error(format!("unexpected identifier '{other}'"))),
            },
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn object(&mut self) -> Result<Value, ParseError> {
        self.expect('{')?;
        let mut record = Record::new();

        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }

            let key = match self.peek() {
                Some('"') => self.string()?,
                Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => self.word(),
                _ => return Err(self.error("expected property name")),
            };
            self.expect(':')?;
            let value = self.value()?;
            record.insert(key, value);

            self.skip_ws();
            match self.bump() {
                Some(',') => {}
                Some('}') => break,
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }

        Ok(Value::Record(record))
    }

    fn array(&mut self) -> Result<Value, ParseError> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_ws();
            if self.peek() == Some(']') {
                self.bump();
                break;
            }

            items.push(self.value()?);

            self.skip_ws();
            match self.bump() {
                Some(',') => {}
                Some(']') => break,
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }

        Ok(Value::List(items))
    }

    fn word(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            self.bump();
        }

        self.text[start..self.pos].to_string()
    }

    fn string(&mut self) -> Result<String, ParseError> {
        self.expect('"')?;
        let mut out = String::new();

        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn escape(&mut self) -> Result<char, ParseError> {
        match self.bump() {
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => {
                let end = self.pos + 4;
                let hex = self
                    .text
                    .get(self.pos..end)
                    .ok_or_else(|| self.error("truncated unicode escape"))?;
                let code = u32::from_str_radix(hex, 16)
                    .map_err(|_| self.error("invalid unicode escape"))?;
                self.pos = end;

                char::from_u32(code).ok_or_else(|| self.error("invalid unicode scalar"))
            }
            _ => Err(self.error("invalid escape sequence")),
        }
    }

    fn number(&mut self) -> Result<Number, ParseError> {
        let start = self.pos;
        let mut is_float = false;

        if self.peek() == Some('-') {
            self.bump();
        }
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' | 'e' | 'E' | '+' => is_float = true,
                '-' if is_float => {}
                _ => break,
            }
            self.bump();
        }

        let text = &self.text[start..self.pos];
        if !is_float && let Ok(n) = text.parse::<i64>() {
            return Ok(Number::Int(n));
        }

        text.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| self.error(format!("invalid number '{text}'")))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_emitted_object_syntax() {
        let value = parse_literal(
            r#"{ type: "set", items: ["LOW", "HIGH"], required: true, "odd-key": null, n: -2.5, u: undefined }"#,
        )
        .unwrap();

        let record = value.as_record().unwrap();
        assert_eq!(record.get("type"), Some(&Value::from("set")));
        assert_eq!(
            record.get("items"),
            Some(&Value::List(vec!["LOW".into(), "HIGH".into()]))
        );
        assert_eq!(record.get("odd-key"), Some(&Value::Null));
        assert_eq!(record.get("n"), Some(&Value::from(-2.5)));
        assert_eq!(record.get("u"), Some(&Value::Undefined));
    }

    #[test]
    fn integers_stay_integers() {
        assert_eq!(parse_literal("0").unwrap(), Value::from(0i64));
        assert_eq!(parse_literal("1e3").unwrap(), Value::from(1000.0));
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(
            parse_literal(r#""a\\d \"q\" A""#).unwrap(),
            Value::from(r#"a\d "q" A"#)
        );
    }

    #[test]
    fn code_fragments_are_rejected() {
        let err = parse_literal("{ validate: (value) => true }").unwrap_err();
        assert!(err.message.contains("unexpected character"), "{err}");
    }

    #[test]
    fn trailing_input_is_rejected() {
        assert!(parse_literal("[] []").is_err());
        assert!(parse_literal("{ a: 1 ").is_err());
    }
}
