//! Parser for the textual query literal.
//!
//! Accepts quoted strings (`'...'` or `"..."`), signed integers, lists
//! `[a, b]` and tuples `(a, b)`. A parenthesised single value without a
//! trailing comma is that value, so `("jazz")` is a string while
//! `("jazz",)` is a one-element tuple.

/// Deepest list/tuple nesting accepted in a query.
pub const MAX_NESTING: usize = 128;

/// A parsed query literal before it is interpreted as keywords or dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(i64),
    List(Vec<Self>),
    Tuple(Vec<Self>),
}

/// Errors produced while parsing a query literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryParseError {
    /// The text ended in the middle of a value.
    #[error("Unexpected end of query")]
    UnexpectedEnd,

    /// A character that cannot start or continue a value.
    #[error("Unexpected character {found:?} at position {position}")]
    UnexpectedChar {
        /// The offending character.
        found: char,
        /// Character offset in the query text.
        position: usize,
    },

    /// A quoted string with no closing quote.
    #[error("Unterminated string starting at position {position}")]
    UnterminatedString {
        /// Character offset of the opening quote.
        position: usize,
    },

    /// An integer that does not fit in 64 bits.
    #[error("Invalid integer {text:?} at position {position}")]
    InvalidInteger {
        /// The digits as written.
        text: String,
        /// Character offset where the number starts.
        position: usize,
    },

    /// Lists and tuples nested deeper than [`MAX_NESTING`].
    #[error("Query nested too deeply at position {position}")]
    TooDeep {
        /// Character offset of the opening bracket over the limit.
        position: usize,
    },

    /// Extra text after a complete value.
    #[error("Unexpected trailing input at position {position}")]
    TrailingInput {
        /// Character offset of the first extra character.
        position: usize,
    },
}

/// Parses `input` as a single literal.
///
/// # Errors
///
/// Returns [`QueryParseError`] on any syntax error.
pub fn parse_literal(input: &str) -> Result<Literal, QueryParseError> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(QueryParseError::TrailingInput {
            position: parser.pos,
        });
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Result<Literal, QueryParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(QueryParseError::UnexpectedEnd),
            Some(quote @ ('\'' | '"')) => self.string(quote).map(Literal::Str),
            Some('[') => {
                let (items, _) = self.sequence(']')?;
                Ok(Literal::List(items))
            }
            Some('(') => {
                let (mut items, trailing_comma) = self.sequence(')')?;
                if items.len() == 1 && !trailing_comma {
                    return Ok(items.remove(0));
                }
                Ok(Literal::Tuple(items))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => self.integer(),
            Some(found) => Err(QueryParseError::UnexpectedChar {
                found,
                position: self.pos,
            }),
        }
    }

    /// Parses comma-separated values up to `close`. Returns the items and
    /// whether the last item was followed by a comma.
    fn sequence(&mut self, close: char) -> Result<(Vec<Literal>, bool), QueryParseError> {
        if self.depth == MAX_NESTING {
            return Err(QueryParseError::TooDeep { position: self.pos });
        }
        self.depth += 1;
        let result = self.items(close);
        self.depth -= 1;
        result
    }

    fn items(&mut self, close: char) -> Result<(Vec<Literal>, bool), QueryParseError> {
        self.pos += 1;
        let mut items = Vec::new();
        let mut trailing_comma = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(QueryParseError::UnexpectedEnd),
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok((items, trailing_comma));
                }
                Some(_) => {}
            }

            items.push(self.value()?);
            trailing_comma = false;

            self.skip_whitespace();
            match self.peek() {
                None => return Err(QueryParseError::UnexpectedEnd),
                Some(',') => {
                    self.pos += 1;
                    trailing_comma = true;
                }
                Some(c) if c == close => {}
                Some(found) => {
                    return Err(QueryParseError::UnexpectedChar {
                        found,
                        position: self.pos,
                    });
                }
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, QueryParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();

        loop {
            let Some(c) = self.peek() else {
                return Err(QueryParseError::UnterminatedString { position: start });
            };
            self.pos += 1;
            match c {
                c if c == quote => return Ok(out),
                '\\' => {
                    let Some(escaped) = self.peek() else {
                        return Err(QueryParseError::UnterminatedString { position: start });
                    };
                    self.pos += 1;
                    match escaped {
                        '\\' | '\'' | '"' => out.push(escaped),
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        // Unknown escapes are kept verbatim so regex classes
                        // like `\d` survive.
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                other => out.push(other),
            }
        }
    }

    fn integer(&mut self) -> Result<Literal, QueryParseError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.pos += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<i64>()
            .map(Literal::Int)
            .map_err(|_| QueryParseError::InvalidInteger {
                text,
                position: start,
            })
    }
}
