//! Terms of N-Triples statements.

use std::fmt;

use ontology::xsd;


/// Subject or object of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Iri(String),
    Literal { lex: String, datatype: Option<&'static str> },
}

impl Term {

    pub fn iri<T>(iri: T) -> Term
        where T: Into<String>
    {
        Term::Iri(iri.into())
    }

    /// Creates a plain string literal.
    pub fn string<T>(lex: T) -> Term
        where T: Into<String>
    {
        Term::Literal { lex: lex.into(), datatype: None }
    }

    pub fn integer(value: u64) -> Term {
        Term::Literal { lex: value.to_string(), datatype: Some(xsd::INTEGER) }
    }

    pub fn double(value: f64) -> Term {
        Term::Literal { lex: float_lexical(value), datatype: Some(xsd::DOUBLE) }
    }

    pub fn float(value: f64) -> Term {
        Term::Literal { lex: float_lexical(value), datatype: Some(xsd::FLOAT) }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Term::Iri(ref iri) => write!(f, "{}", IriRef(iri)),
            Term::Literal { ref lex, datatype: None } => write_quoted(f, lex),
            Term::Literal { ref lex, datatype: Some(dt) } => {
                write_quoted(f, lex)?;
                write!(f, "^^{}", IriRef(dt))
            },
        }
    }
}

/// An IRI written in angle brackets.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IriRef<'a>(pub &'a str);

impl<'a> fmt::Display for IriRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("<")?;
        for c in self.0.chars() {
            match c {
                '\u{0}'..='\u{20}' | '%' | '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^'
                | '`' => {
                    let mut buf = [0; 4];
                    for byte in c.encode_utf8(&mut buf).bytes() {
                        write!(f, "%{:02X}", byte)?;
                    }
                },
                _ => write!(f, "{}", c)?,
            }
        }
        f.write_str(">")
    }
}

fn write_quoted(f: &mut fmt::Formatter, lex: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in lex.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

/// Formats a floating point value as a literal, always with a fractional part if finite.
fn float_lexical(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "INF".to_owned() } else { "-INF".to_owned() }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
