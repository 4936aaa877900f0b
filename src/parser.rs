//! Recursive descent parser for CSS stylesheets

use crate::ast::{AstNode, Position};
use crate::error::{PrefixerError, Result};
use crate::preprocessor::strip_disruptive_comments;
use crate::value_matcher::split_arguments;
use regex::Regex;

/// File name used in diagnostics when the caller gives none
pub const DEFAULT_FILENAME: &str = "<css input>";

pub struct Parser {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    filename: String,
    source: String,
    keyframes_regex: Regex,
    document_regex: Regex,
}

/// Parse `css`, reporting errors against `filename`
pub fn parse(css: &str, filename: Option<&str>) -> Result<AstNode> {
    Parser::new(css, filename.unwrap_or(DEFAULT_FILENAME)).parse()
}

impl Parser {
    pub fn new(css: &str, filename: &str) -> Self {
        Self {
            input: strip_disruptive_comments(css).chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            filename: filename.to_string(),
            source: css.to_string(),
            keyframes_regex: Regex::new(r"^(?i)(-[a-z]+-)?keyframes$").unwrap(),
            document_regex: Regex::new(r"^(?i)(-[a-z]+-)?document$").unwrap(),
        }
    }

    pub fn parse(&mut self) -> Result<AstNode> {
        let rules = self.parse_rule_list(true)?;
        Ok(AstNode::Stylesheet { rules })
    }

    /// Rules up to the closing `}` of the enclosing block, or to the end of
    /// input at the top level. The closing brace is left for the caller.
    fn parse_rule_list(&mut self, top_level: bool) -> Result<Vec<AstNode>> {
        let mut rules = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('}') if top_level => {
                    return Err(self.error_here("Unexpected '}'"));
                }
                Some('}') => break,
                Some(';') => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('*') => {
                    rules.push(self.parse_comment()?);
                }
                Some('@') => rules.push(self.parse_at_rule()?),
                Some(_) => rules.push(self.parse_qualified_rule()?),
            }
        }

        Ok(rules)
    }

    fn parse_at_rule(&mut self) -> Result<AstNode> {
        let start = self.current_position();
        self.advance(); // '@'
        let name = self.read_name();
        if name.is_empty() {
            return Err(self.error_at(start, "Expected at-rule name after '@'"));
        }
        let lower = name.to_ascii_lowercase();

        if let Some(caps) = self.keyframes_regex.captures(&lower) {
            let vendor_prefix = caps.get(1).map(|m| m.as_str().to_string());
            let name = self.read_prelude(&['{', ';', '}'])?;
            let open = self.expect_open("@keyframes")?;
            let frames = self.parse_keyframe_list()?;
            self.expect_close(open)?;
            return Ok(AstNode::Keyframes {
                name,
                vendor_prefix,
                frames,
            });
        }

        if let Some(caps) = self.document_regex.captures(&lower) {
            let vendor_prefix = caps.get(1).map(|m| m.as_str().to_string());
            let condition = self.read_prelude(&['{', ';', '}'])?;
            let open = self.expect_open("@document")?;
            let rules = self.parse_rule_list(false)?;
            self.expect_close(open)?;
            return Ok(AstNode::Document {
                condition,
                vendor_prefix,
                rules,
            });
        }

        match lower.as_str() {
            "media" | "supports" => {
                let prelude = self.read_prelude(&['{', ';', '}'])?;
                let open = self.expect_open(&format!("@{}", lower))?;
                let rules = self.parse_rule_list(false)?;
                self.expect_close(open)?;
                if lower == "media" {
                    Ok(AstNode::Media {
                        query: prelude,
                        rules,
                    })
                } else {
                    Ok(AstNode::Supports {
                        condition: prelude,
                        rules,
                    })
                }
            }
            "import" | "charset" | "namespace" => {
                let value = self.read_prelude(&[';', '{', '}'])?;
                if self.peek() != Some(';') {
                    return Err(self.error_here(&format!("Expected ';' after @{}", lower)));
                }
                self.advance();
                Ok(match lower.as_str() {
                    "import" => AstNode::Import { target: value },
                    "charset" => AstNode::Charset { value },
                    _ => AstNode::Namespace { value },
                })
            }
            "page" => {
                let prelude = self.read_prelude(&['{', ';', '}'])?;
                let open = self.expect_open("@page")?;
                let declarations = self.parse_declaration_list()?;
                self.expect_close(open)?;
                Ok(AstNode::Page {
                    selectors: split_selectors(&prelude),
                    declarations,
                })
            }
            _ => {
                // Other block at-rules (@font-face, @viewport, ...) hold plain
                // declarations, so they are kept as a rule selected by the prelude.
                let prelude = self.read_prelude(&['{', ';', '}'])?;
                if self.peek() != Some('{') {
                    return Err(self.error_at(start, &format!("Unsupported statement at-rule '@{}'", name)));
                }
                let open = self.expect_open(&format!("@{}", name))?;
                let declarations = self.parse_declaration_list()?;
                self.expect_close(open)?;
                let selector = if prelude.is_empty() {
                    format!("@{}", name)
                } else {
                    format!("@{} {}", name, prelude)
                };
                Ok(AstNode::Rule {
                    selectors: vec![selector],
                    declarations,
                })
            }
        }
    }

    fn parse_qualified_rule(&mut self) -> Result<AstNode> {
        let prelude = self.read_prelude(&['{', ';', '}'])?;
        if self.peek() != Some('{') {
            return Err(self.error_here(&format!("Expected '{{' after selector '{}'", prelude)));
        }
        let open = self.expect_open("selector")?;
        let declarations = self.parse_declaration_list()?;
        self.expect_close(open)?;

        Ok(AstNode::Rule {
            selectors: split_selectors(&prelude),
            declarations,
        })
    }

    fn parse_keyframe_list(&mut self) -> Result<Vec<AstNode>> {
        let mut frames = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some('}') => break,
                Some(';') => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('*') => {
                    frames.push(self.parse_comment()?);
                }
                Some(_) => {
                    let prelude = self.read_prelude(&['{', ';', '}'])?;
                    let open = self.expect_open("keyframe selector")?;
                    let declarations = self.parse_declaration_list()?;
                    self.expect_close(open)?;
                    frames.push(AstNode::Keyframe {
                        selectors: split_selectors(&prelude),
                        declarations,
                    });
                }
            }
        }

        Ok(frames)
    }

    fn parse_declaration_list(&mut self) -> Result<Vec<AstNode>> {
        let mut declarations = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some('}') => break,
                Some(';') => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('*') => {
                    declarations.push(self.parse_comment()?);
                }
                Some(_) => declarations.push(self.parse_declaration()?),
            }
        }

        Ok(declarations)
    }

    fn parse_declaration(&mut self) -> Result<AstNode> {
        let position = self.current_position();

        let mut property = String::new();
        while let Some(ch) = self.peek() {
            if ch == ':' || ch == ';' || ch == '{' || ch == '}' || ch.is_whitespace() {
                break;
            }
            property.push(self.advance());
        }
        if property.is_empty() {
            return Err(self.error_here("Expected property name"));
        }

        self.skip_whitespace();
        if self.peek() != Some(':') {
            return Err(self.error_here(&format!("Expected ':' after property '{}'", property)));
        }
        self.advance();

        let value = self.read_value()?;
        if self.peek() == Some(';') {
            self.advance();
        }

        Ok(AstNode::Declaration {
            property,
            value,
            position,
        })
    }

    fn parse_comment(&mut self) -> Result<AstNode> {
        let start = self.current_position();
        self.advance();
        self.advance();

        let mut text = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error_at(start, "Unterminated comment")),
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(AstNode::Comment { text });
                }
                Some(_) => text.push(self.advance()),
            }
        }
    }

    /// Value text up to `;` or `}` outside strings, comments and brackets
    fn read_value(&mut self) -> Result<String> {
        let mut value = String::new();
        let mut depth = 0usize;

        while let Some(ch) = self.peek() {
            match ch {
                ';' | '}' if depth == 0 => break,
                '(' | '[' | '{' => {
                    depth += 1;
                    value.push(self.advance());
                }
                ')' | ']' | '}' => {
                    depth = depth.saturating_sub(1);
                    value.push(self.advance());
                }
                '"' | '\'' => self.read_string(&mut value)?,
                '\\' => {
                    value.push(self.advance());
                    if !self.is_at_end() {
                        value.push(self.advance());
                    }
                }
                '/' if self.peek_next() == Some('*') => self.read_inline_comment(&mut value)?,
                _ => value.push(self.advance()),
            }
        }

        Ok(value.trim().to_string())
    }

    /// Text before the next `stops` character at bracket depth zero, trimmed
    fn read_prelude(&mut self, stops: &[char]) -> Result<String> {
        let mut prelude = String::new();
        let mut depth = 0usize;

        while let Some(ch) = self.peek() {
            if depth == 0 && stops.contains(&ch) {
                break;
            }
            match ch {
                '(' | '[' => {
                    depth += 1;
                    prelude.push(self.advance());
                }
                ')' | ']' => {
                    depth = depth.saturating_sub(1);
                    prelude.push(self.advance());
                }
                '"' | '\'' => self.read_string(&mut prelude)?,
                '\\' => {
                    prelude.push(self.advance());
                    if !self.is_at_end() {
                        prelude.push(self.advance());
                    }
                }
                '/' if self.peek_next() == Some('*') => self.read_inline_comment(&mut prelude)?,
                _ => prelude.push(self.advance()),
            }
        }

        Ok(prelude.trim().to_string())
    }

    /// Copy a quoted string, quotes included, into `out`
    fn read_string(&mut self, out: &mut String) -> Result<()> {
        let start = self.current_position();
        let quote = self.advance();
        out.push(quote);

        loop {
            match self.peek() {
                None => return Err(self.error_at(start, "Unterminated string")),
                Some('\\') => {
                    out.push(self.advance());
                    if !self.is_at_end() {
                        out.push(self.advance());
                    }
                }
                Some(ch) if ch == quote => {
                    out.push(self.advance());
                    return Ok(());
                }
                Some(_) => out.push(self.advance()),
            }
        }
    }

    /// Copy a comment that sits inside a value or prelude verbatim
    fn read_inline_comment(&mut self, out: &mut String) -> Result<()> {
        let start = self.current_position();
        out.push(self.advance());
        out.push(self.advance());

        loop {
            match self.peek() {
                None => return Err(self.error_at(start, "Unterminated comment")),
                Some('*') if self.peek_next() == Some('/') => {
                    out.push(self.advance());
                    out.push(self.advance());
                    return Ok(());
                }
                Some(_) => out.push(self.advance()),
            }
        }
    }

    fn read_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                name.push(self.advance());
            } else {
                break;
            }
        }
        name
    }

    fn expect_open(&mut self, context: &str) -> Result<Position> {
        let position = self.current_position();
        if self.peek() != Some('{') {
            return Err(self.error_here(&format!("Expected '{{' after {}", context)));
        }
        self.advance();
        Ok(position)
    }

    /// Unterminated blocks are reported where they were opened
    fn expect_close(&mut self, open: Position) -> Result<()> {
        if self.peek() == Some('}') {
            self.advance();
            Ok(())
        } else {
            Err(self.error_at(open, "Unterminated block, missing '}'"))
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn advance(&mut self) -> char {
        if self.position < self.input.len() {
            let ch = self.input[self.position];
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            ch
        } else {
            '\0'
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn error_here(&self, message: &str) -> PrefixerError {
        self.error_at(self.current_position(), message)
    }

    fn error_at(&self, position: Position, message: &str) -> PrefixerError {
        PrefixerError::parse(
            self.filename.clone(),
            position.line,
            position.column,
            message,
            self.source.clone(),
        )
    }
}

fn split_selectors(prelude: &str) -> Vec<String> {
    if prelude.is_empty() {
        return Vec::new();
    }
    split_arguments(prelude)
        .into_iter()
        .map(|selector| selector.trim().to_string())
        .collect()
}
