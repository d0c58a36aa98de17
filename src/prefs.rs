//! Reader for Mozilla preference files (prefs.js)
//!
//! Thunderbird 68 kept the Identity Chooser settings in the profile's
//! prefs.js, using the Mozilla preference syntax:
//!
//! ```text
//! user_pref("extensions.org.janek.IdentityChooser.extendButtonReply", false);
//! pref("mail.some.default", true);
//! ```
//!
//! This module tokenizes and parses that syntax far enough to answer legacy
//! preference lookups during migration: `user_pref`/`pref` statements with
//! boolean, integer, or string values, line and block comments, and the
//! common string escapes. Anything fancier (locked/sticky prefs, floats,
//! unicode escapes) is not needed for a TB68 profile read and is rejected
//! with a position-carrying error.
//!
//! # Example
//!
//! ```rust
//! use icopt::{parse_prefs, PrefValue};
//!
//! let content = r#"
//!     // migrated flag
//!     user_pref("extensions.org.janek.IdentityChooser.extendButtonReply", false);
//! "#;
//!
//! let prefs = parse_prefs(content)?;
//! let value = &prefs["extensions.org.janek.IdentityChooser.extendButtonReply"];
//! assert_eq!(value.as_bool(), Some(false));
//! # Ok::<(), icopt::Error>(())
//! ```

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

/// A preference value as it appears in prefs.js
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl PrefValue {
    /// Boolean view of the value, `None` for non-boolean prefs
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Parse prefs.js content into a key-to-value map
///
/// Later statements win over earlier ones for the same key, matching how
/// Mozilla applies the file top to bottom.
pub fn parse_prefs(content: &str) -> Result<HashMap<String, PrefValue>> {
    let mut parser = Parser::new(content);
    parser.parse()
}

/// Parse a prefs.js file directly from a file path
pub fn parse_prefs_file(path: &std::path::Path) -> Result<HashMap<String, PrefValue>> {
    let content = std::fs::read_to_string(path)?;
    parse_prefs(&content)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Identifier(String),
    String(String),
    Integer(i64),
    Boolean(bool),
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Eof,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn err(&self, message: impl Into<String>) -> Error {
        Error::Lexer {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        match c {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        c
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments()?;

        let c = match self.chars.peek() {
            Some(c) => *c,
            None => return Ok(Token::Eof),
        };

        match c {
            '(' => {
                self.bump();
                Ok(Token::LeftParen)
            }
            ')' => {
                self.bump();
                Ok(Token::RightParen)
            }
            ',' => {
                self.bump();
                Ok(Token::Comma)
            }
            ';' => {
                self.bump();
                Ok(Token::Semicolon)
            }
            '"' => self.lex_string(),
            '-' | '0'..='9' => self.lex_integer(),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.lex_identifier()),
            _ => Err(self.err(format!("Unexpected character: '{}'", c))),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            while matches!(self.chars.peek(), Some(' ' | '\t' | '\r' | '\n')) {
                self.bump();
            }

            if self.chars.peek() != Some(&'/') {
                return Ok(());
            }
            self.bump();
            match self.chars.peek() {
                Some('/') => {
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('*') => {
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.chars.peek() == Some(&'/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(self.err("Unterminated block comment")),
                        }
                    }
                }
                _ => return Err(self.err("Unexpected character: '/'")),
            }
        }
    }

    fn lex_string(&mut self) -> Result<Token> {
        self.bump(); // opening quote

        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(Token::String(value)),
                Some('\\') => match self.bump() {
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(c) => return Err(self.err(format!("Unsupported escape '\\{}'", c))),
                    None => return Err(self.err("Unterminated string")),
                },
                Some('\n') | None => return Err(self.err("Unterminated string")),
                Some(c) => value.push(c),
            }
        }
    }

    fn lex_integer(&mut self) -> Result<Token> {
        let mut text = String::new();
        if self.chars.peek() == Some(&'-') {
            text.push('-');
            self.bump();
        }
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text.parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| self.err(format!("Invalid integer '{}'", text)))
    }

    fn lex_identifier(&mut self) -> Token {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        match text.as_str() {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            _ => Token::Identifier(text),
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    pending_error: Option<Error>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let (current, pending_error) = match lexer.next_token() {
            Ok(token) => (token, None),
            Err(e) => (Token::Eof, Some(e)),
        };
        Parser {
            lexer,
            current,
            pending_error,
        }
    }

    fn err(&self, message: impl Into<String>) -> Error {
        Error::Parser {
            line: self.lexer.line,
            column: self.lexer.column,
            message: message.into(),
        }
    }

    fn parse(&mut self) -> Result<HashMap<String, PrefValue>> {
        let mut prefs = HashMap::new();

        loop {
            if let Some(e) = self.pending_error.take() {
                return Err(e);
            }
            if self.current == Token::Eof {
                return Ok(prefs);
            }
            let (key, value) = self.parse_statement()?;
            prefs.insert(key, value);
        }
    }

    /// One statement: ("user_pref" | "pref") "(" key "," value ")" ";"
    fn parse_statement(&mut self) -> Result<(String, PrefValue)> {
        match &self.current {
            Token::Identifier(name) if name == "user_pref" || name == "pref" => {
                self.advance()?;
            }
            Token::Identifier(name) => {
                return Err(self.err(format!(
                    "Unknown pref function '{}'. Expected user_pref or pref",
                    name
                )));
            }
            other => {
                return Err(self.err(format!("Expected pref function name, got {:?}", other)));
            }
        }

        self.expect(Token::LeftParen)?;
        let key = match std::mem::replace(&mut self.current, Token::Eof) {
            Token::String(s) => {
                self.advance()?;
                s
            }
            other => return Err(self.err(format!("Expected string key, got {:?}", other))),
        };
        self.expect(Token::Comma)?;
        let value = self.parse_value()?;
        self.expect(Token::RightParen)?;
        self.expect(Token::Semicolon)?;

        Ok((key, value))
    }

    fn parse_value(&mut self) -> Result<PrefValue> {
        let value = match std::mem::replace(&mut self.current, Token::Eof) {
            Token::Boolean(b) => PrefValue::Bool(b),
            Token::Integer(n) => PrefValue::Int(n),
            Token::String(s) => PrefValue::Str(s),
            other => return Err(self.err(format!("Expected value, got {:?}", other))),
        };
        self.advance()?;
        Ok(value)
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if self.current == expected {
            self.advance()
        } else {
            Err(self.err(format!("Expected {:?}, got {:?}", expected, self.current)))
        }
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }
}
