//! Lexer (tokenizer) for problem files.

use crate::error::{Result, SylvesterError};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the problem format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// An identifier (operand name, or a non-numeric entry such as `nan` or `x`)
    Identifier,
    /// Something that starts like a number. May still fail to parse.
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Open bracket '['
    OpenBracket,
    /// Close bracket ']'
    CloseBracket,
    /// Row separator ';'
    Semicolon,
    /// Entry separator ','
    Comma,
    /// Equals sign '='
    Equals,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing problem file input.
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let (start_pos, ch) = match self.chars.peek().copied() {
            Some((pos, ch)) => (pos, ch),
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line: self.line,
                    column: self.column,
                });
            }
        };

        let line = self.line;
        let column = self.column;
        let token = |kind, text: String| Token {
            kind,
            text,
            line,
            column,
        };

        let single = match ch {
            '\n' => Some(TokenKind::Newline),
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            ';' => Some(TokenKind::Semicolon),
            ',' => Some(TokenKind::Comma),
            '=' => Some(TokenKind::Equals),
            _ => None,
        };
        if let Some(kind) = single {
            self.advance();
            return Ok(token(kind, ch.to_string()));
        }

        match ch {
            '.' if self.digit_follows(start_pos) => Ok(token(TokenKind::Number, self.read_number())),
            '.' => {
                self.advance();
                let text = self.read_word();
                if text.is_empty() {
                    return Err(SylvesterError::lexer(line, column, "expected directive name after '.'"));
                }
                Ok(token(TokenKind::Directive, format!(".{}", text)))
            }
            '-' | '+' => {
                self.advance();
                match self.chars.peek().copied() {
                    Some((_, c)) if c.is_alphabetic() => {
                        // Signed identifier, e.g. "-inf"
                        let word = self.read_word();
                        Ok(token(TokenKind::Identifier, format!("{}{}", ch, word)))
                    }
                    Some((pos, c)) if c.is_ascii_digit() || (c == '.' && self.digit_follows(pos)) => {
                        Ok(token(TokenKind::Number, format!("{}{}", ch, self.read_number())))
                    }
                    _ => Err(SylvesterError::lexer(
                        line,
                        column,
                        format!("dangling sign '{}'", ch),
                    )),
                }
            }
            '0'..='9' => Ok(token(TokenKind::Number, self.read_number())),
            _ if ch.is_alphabetic() || ch == '_' => Ok(token(TokenKind::Identifier, self.read_word())),
            _ => Err(SylvesterError::lexer(
                line,
                column,
                format!("unexpected character '{}'", ch),
            )),
        }
    }

    fn digit_follows(&self, pos: usize) -> bool {
        self.input[pos + 1..]
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit())
    }

    fn advance(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' {
                // Skip comment until end of line
                while let Some(&(_, c)) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_while(&mut self, text: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !pred(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
    }

    fn read_word(&mut self) -> String {
        let mut text = String::new();
        self.read_while(&mut text, |ch| ch.is_alphanumeric() || ch == '_');
        text
    }

    /// Read an unsigned number. Trailing letters stay attached, so "2x" is a
    /// single (unparseable) entry rather than two.
    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Integer part
        self.read_while(&mut text, |ch| ch.is_ascii_digit());

        // Decimal part
        if let Some(&(_, '.')) = self.chars.peek() {
            text.push('.');
            self.advance();
            self.read_while(&mut text, |ch| ch.is_ascii_digit());
        }

        // Exponent part
        if let Some(&(_, ch)) = self.chars.peek() {
            if ch == 'e' || ch == 'E' {
                text.push(ch);
                self.advance();
                if let Some(&(_, sign)) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                self.read_while(&mut text, |ch| ch.is_ascii_digit());
            }
        }

        self.read_while(&mut text, |ch| ch.is_alphanumeric() || ch == '_' || ch == '.');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            out.push(tok.kind);
            if tok.kind == TokenKind::Eof {
                return out;
            }
        }
    }

    #[test]
    fn test_lexer_assignment() {
        use TokenKind::*;
        assert_eq!(
            kinds("A = [1 2; 3, 4]"),
            vec![Identifier, Equals, OpenBracket, Number, Number, Semicolon, Number, Comma, Number, CloseBracket, Eof]
        );
    }

    #[test]
    fn test_lexer_numbers() {
        let mut lexer = Lexer::new("-1.5e-3 +2 .25 7x");
        let texts: Vec<String> = (0..4).map(|_| lexer.next_token().unwrap().text).collect();
        assert_eq!(texts, vec!["-1.5e-3", "+2", ".25", "7x"]);
    }

    #[test]
    fn test_lexer_signed_identifier() {
        let mut lexer = Lexer::new("-inf");
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "-inf");
    }

    #[test]
    fn test_lexer_directive_and_comment() {
        let mut lexer = Lexer::new("# header\n.tolerance 1e-12");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Directive);
        assert_eq!(tok.text, ".tolerance");
        assert_eq!(tok.line, 2);
    }

    #[test]
    fn test_lexer_rejects_stray_character() {
        let mut lexer = Lexer::new("A = $");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, SylvesterError::LexerError { line: 1, column: 5, .. }));
    }
}
