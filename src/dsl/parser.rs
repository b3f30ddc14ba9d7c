//! Parser for problem files.

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{Result, SylvesterError};
use crate::matrix::{Array, Element};

/// Parser for problem files.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire problem description.
    pub fn parse(&mut self) -> Result<ProblemAst> {
        let mut ast = ProblemAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match self.current.kind {
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let assignment = self.parse_assignment()?;
                    if ast.operand(&assignment.name).is_some() {
                        return Err(SylvesterError::DuplicateOperand {
                            name: assignment.name,
                            line: assignment.line,
                        });
                    }
                    ast.assignments.push(assignment);
                }
                _ => {
                    return Err(SylvesterError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(SylvesterError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    /// A statement must be followed by a newline or the end of input.
    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(SylvesterError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn parse_directive(&mut self, ast: &mut ProblemAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".tolerance" => {
                let tok = self.expect(TokenKind::Number)?;
                let value = tok.text.parse::<f64>().map_err(|_| {
                    SylvesterError::parse(line, format!("invalid tolerance: {}", tok.text))
                })?;
                ast.tolerance = Some(value);
            }
            _ => {
                return Err(SylvesterError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_assignment(&mut self) -> Result<Assignment> {
        let name_tok = self.expect(TokenKind::Identifier)?;
        let line = name_tok.line;
        let name = name_tok.text.to_uppercase();
        if !OPERAND_NAMES.contains(&name.as_str()) {
            return Err(SylvesterError::UnknownOperand {
                name: name_tok.text,
                line,
            });
        }

        self.expect(TokenKind::Equals)?;

        let value = match self.current.kind {
            TokenKind::OpenBracket => self.parse_bracketed(line)?,
            TokenKind::Number | TokenKind::Identifier => {
                let element = parse_element(&self.current.text);
                self.advance()?;
                Array::scalar(element)
            }
            _ => {
                return Err(SylvesterError::parse(
                    line,
                    format!("expected a value for {}, got {:?}", name, self.current.text),
                ));
            }
        };

        Ok(Assignment { name, value, line })
    }

    /// `[...]`: a flat sequence when it holds a single row and no `;`,
    /// otherwise a 2-D block with one row per `;` or line.
    fn parse_bracketed(&mut self, line: usize) -> Result<Array> {
        self.expect(TokenKind::OpenBracket)?;

        let mut rows: Vec<Vec<Element>> = Vec::new();
        let mut row: Vec<Element> = Vec::new();
        let mut saw_semicolon = false;

        loop {
            match self.current.kind {
                TokenKind::Number | TokenKind::Identifier => {
                    row.push(parse_element(&self.current.text));
                }
                TokenKind::Comma => {}
                TokenKind::Semicolon => {
                    saw_semicolon = true;
                    if !row.is_empty() {
                        rows.push(std::mem::take(&mut row));
                    }
                }
                TokenKind::Newline => {
                    if !row.is_empty() {
                        rows.push(std::mem::take(&mut row));
                    }
                }
                TokenKind::CloseBracket => {
                    self.advance()?;
                    break;
                }
                TokenKind::Eof => {
                    return Err(SylvesterError::parse(line, "unclosed '['"));
                }
                _ => {
                    return Err(SylvesterError::parse(
                        self.current.line,
                        format!("unexpected token in matrix: {:?}", self.current.text),
                    ));
                }
            }
            self.advance()?;
        }

        if !row.is_empty() {
            rows.push(row);
        }

        if !saw_semicolon && rows.len() <= 1 {
            return Ok(Array::flat(rows.pop().unwrap_or_default()));
        }

        Array::from_rows(rows).map_err(|e| SylvesterError::parse(line, e.to_string()))
    }
}

/// Interpret one entry. Anything that does not read as a real number
/// (including `nan` and `inf`) is kept as a symbol.
fn parse_element(text: &str) -> Element {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };
    match body.to_lowercase().as_str() {
        "nan" => return Element::Number(f64::NAN),
        "inf" | "infinity" => return Element::Number(sign * f64::INFINITY),
        _ => {}
    }
    let is_numeric_literal = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    match body.parse::<f64>() {
        Ok(v) if is_numeric_literal => Element::Number(sign * v),
        _ => Element::Symbol(text.to_string()),
    }
}
