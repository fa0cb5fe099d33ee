//! Lexer for `@CsvSource` literals
//!
//! A literal such as `"5, Java, 15, false"` is split on a comma followed by any
//! amount of whitespace. Whitespace that does not follow a comma is part of the
//! field, so the first field keeps its leading whitespace and the last keeps its
//! trailing whitespace. Trailing empty fields are dropped and an empty literal is
//! a single empty field.

use logos::Logos;
use std::ops::Range;

/// CSV literal tokens
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// Comma plus the whitespace run after it
    #[regex(r",[ \t\n\x0B\x0C\r]*")]
    Separator,

    /// Everything up to the next comma
    #[regex(r"[^,]+")]
    Field,
}

/// Field text with its byte range in the literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvField<'input> {
    pub text: &'input str,
    pub span: Range<usize>,
}

/// Splits a CSV literal into fields
pub struct CsvLexer<'input> {
    lexer: logos::Lexer<'input, Token>,
    input: &'input str,
}

impl<'input> CsvLexer<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            lexer: Token::lexer(input),
            input,
        }
    }

    /// Consume the literal and return its fields in order
    pub fn fields(mut self) -> Vec<CsvField<'input>> {
        let input = self.input;
        if input.is_empty() {
            return vec![CsvField { text: "", span: 0..0 }];
        }

        let mut fields = Vec::new();
        let mut current = CsvField { text: "", span: 0..0 };

        while let Some(token) = self.lexer.next() {
            let span = self.lexer.span();
            match token {
                Ok(Token::Separator) => {
                    let next = CsvField {
                        text: "",
                        span: span.end..span.end,
                    };
                    fields.push(std::mem::replace(&mut current, next));
                }
                // Every byte matches one of the patterns; an error slice is kept as field text
                Ok(Token::Field) | Err(()) => {
                    current = CsvField {
                        text: &input[span.clone()],
                        span,
                    };
                }
            }
        }
        fields.push(current);

        while fields.last().is_some_and(|f| f.text.is_empty()) {
            fields.pop();
        }
        fields
    }
}

/// Field texts of a CSV literal
#[must_use]
pub fn split_fields(input: &str) -> Vec<&str> {
    CsvLexer::new(input)
        .fields()
        .into_iter()
        .map(|field| field.text)
        .collect()
}
