//! Indentation-aware lexer for emjay markup.
//!
//! The markup is line oriented: every non-blank line opens with an
//! indentation change ([`TokenKind::Indent`], [`TokenKind::Outdent`] or
//! [`TokenKind::Newline`]) followed by the tokens of its content. A few
//! constructs swallow the deeper lines that follow them whole: text blocks
//! (`p.`), comments, and attribute lists left open at the end of a line.
//!
//! Interpolation placeholders need no special handling here; they are
//! plain word characters and surface inside tag names, attribute names,
//! attribute values and text.

mod lex_error;
mod token;

#[cfg(test)]
mod tests;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind, TokenList};

use emjay_ir::{AttrValue, Span};
use tracing::trace;

/// Tag names that start control-flow or inclusion constructs.
const KEYWORDS: &[&str] = &[
    "append", "block", "case", "default", "doctype", "each", "else", "extends", "for", "if",
    "include", "mixin", "prepend", "unless", "when", "while", "yield",
];

/// Lex template text into a `TokenList`.
///
/// The text is expected to be indent-stripped already; a first line that
/// is itself indented yields a leading [`TokenKind::Indent`].
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let tokens = Lexer::new(source).run()?;
    trace!(count = tokens.len(), "lexed template");
    Ok(tokens)
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Indentation widths of the enclosing lines; the root level is 0.
    indents: Vec<usize>,
    tokens: TokenList,
}

/// One deeper line collected by a text block or comment.
struct NestedLine<'a> {
    text: &'a str,
    span: Span,
}

#[inline]
fn is_word(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[inline]
fn is_name_part(byte: u8) -> bool {
    is_word(byte) || byte == b'-'
}

#[inline]
fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_whitespace())
}

/// Width of the leading run of spaces and tabs.
fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ' || b == b'\t').count()
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            indents: vec![0],
            tokens: TokenList::new(),
        }
    }

    fn run(mut self) -> Result<TokenList, LexError> {
        let mut first = true;

        while self.pos < self.bytes.len() {
            let start = self.pos;
            let end = self.line_end(start);
            let line = &self.source[start..end];

            if is_blank(line) {
                self.pos = self.next_line_start(start);
                continue;
            }

            let indent = self.measure_indent(line, start)?;
            self.open_line(indent, start, first)?;
            first = false;

            self.pos = start + indent;
            self.lex_line(indent)?;
        }

        let end = Span::point(self.offset(self.bytes.len()));
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Outdent, end);
        }
        self.push(TokenKind::Eof, end);

        Ok(self.tokens)
    }

    // === Positions ===

    #[inline]
    fn offset(&self, pos: usize) -> u32 {
        u32::try_from(pos).unwrap_or(u32::MAX)
    }

    #[inline]
    fn span(&self, start: usize, end: usize) -> Span {
        Span::from_range(start..end)
    }

    #[inline]
    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token::new(kind, span));
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    /// End of the line containing `from`, excluding `\r\n` / `\n`.
    fn line_end(&self, from: usize) -> usize {
        let end = memchr::memchr(b'\n', &self.bytes[from..]).map_or(self.bytes.len(), |i| from + i);
        if end > from && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        }
    }

    /// Start of the line after the one containing `from`.
    fn next_line_start(&self, from: usize) -> usize {
        memchr::memchr(b'\n', &self.bytes[from..]).map_or(self.bytes.len(), |i| from + i + 1)
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(b'\n' | b'\r'))
    }

    /// Whether only whitespace remains on the current line.
    fn rest_is_blank(&self) -> bool {
        is_blank(&self.source[self.pos..self.line_end(self.pos)])
    }

    fn unexpected_character(&self) -> LexError {
        let found = self.source[self.pos..].chars().next().unwrap_or('\0');
        let end = self.pos + found.len_utf8();
        LexError::new(
            LexErrorKind::UnexpectedCharacter { found },
            self.span(self.pos, end),
        )
    }

    // === Indentation ===

    fn measure_indent(&self, line: &str, start: usize) -> Result<usize, LexError> {
        let width = indent_width(line);
        let leading = &line.as_bytes()[..width];
        if leading.contains(&b' ') && leading.contains(&b'\t') {
            return Err(LexError::new(
                LexErrorKind::MixedIndent,
                self.span(start, start + width),
            ));
        }
        Ok(width)
    }

    fn open_line(&mut self, indent: usize, start: usize, first: bool) -> Result<(), LexError> {
        let here = Span::point(self.offset(start + indent));
        let current = self.indents.last().copied().unwrap_or(0);

        if indent > current {
            self.indents.push(indent);
            self.push(TokenKind::Indent, here);
        } else if indent < current {
            while self.indents.last().is_some_and(|&level| level > indent) {
                self.indents.pop();
                self.push(TokenKind::Outdent, here);
            }
            if self.indents.last().copied().unwrap_or(0) != indent {
                return Err(LexError::new(
                    LexErrorKind::InconsistentIndent { found: indent },
                    self.span(start, start + indent),
                ));
            }
        } else if !first {
            self.push(TokenKind::Newline, here);
        }
        Ok(())
    }

    // === Lines ===

    fn lex_line(&mut self, indent: usize) -> Result<(), LexError> {
        let rest = &self.source[self.pos..];

        if rest.starts_with("//") {
            return self.lex_comment(indent);
        }
        if rest.starts_with("!=") {
            return Err(LexError::new(
                LexErrorKind::UnsupportedCode,
                self.span(self.pos, self.pos + 2),
            ));
        }

        match self.peek() {
            Some(b'|') => {
                self.lex_piped_text();
                Ok(())
            }
            Some(b'<') => {
                let end = self.line_end(self.pos);
                let text = self.source[self.pos..end].to_owned();
                self.push(TokenKind::Text(text), self.span(self.pos, end));
                self.pos = self.next_line_start(end);
                Ok(())
            }
            Some(b'-' | b'=') => Err(LexError::new(
                LexErrorKind::UnsupportedCode,
                self.span(self.pos, self.pos + 1),
            )),
            Some(b'+') => Err(LexError::new(
                LexErrorKind::UnsupportedConstruct {
                    construct: "+mixin",
                },
                self.span(self.pos, self.pos + 1),
            )),
            _ => self.lex_tag_line(indent),
        }
    }

    /// `| text`: one optional space after the pipe is not content.
    fn lex_piped_text(&mut self) {
        let pipe = self.pos;
        let end = self.line_end(pipe);
        let mut start = pipe + 1;
        if self.bytes.get(start) == Some(&b' ') && start < end {
            start += 1;
        }
        let text = self.source[start..end].to_owned();
        self.push(TokenKind::Text(text), self.span(pipe, end));
        self.pos = self.next_line_start(end);
    }

    fn lex_comment(&mut self, indent: usize) -> Result<(), LexError> {
        let start = self.pos;
        let buffered = !self.source[start..].starts_with("//-");
        let marker = if buffered { 2 } else { 3 };
        let end = self.line_end(start);

        let mut value = self.source[start + marker..end].trim_start().to_owned();
        self.pos = self.next_line_start(end);

        let nested = self.collect_nested(indent);
        let mut comment_end = end;
        for line in &nested {
            value.push('\n');
            value.push_str(line.text);
            comment_end = line.span.end as usize;
        }

        self.push(
            TokenKind::Comment { value, buffered },
            self.span(start, comment_end),
        );
        Ok(())
    }

    /// Collect the lines more deeply indented than `base`, stripped of
    /// their common indentation. Blank lines inside the run are kept as
    /// empty lines; trailing blank lines are dropped.
    fn collect_nested(&mut self, base: usize) -> Vec<NestedLine<'a>> {
        // (start, end, indent width or None for blank)
        let mut raw: Vec<(usize, usize, Option<usize>)> = Vec::new();
        let mut kept = 0;

        while self.pos < self.bytes.len() {
            let start = self.pos;
            let end = self.line_end(start);
            let line = &self.source[start..end];

            if is_blank(line) {
                raw.push((start, end, None));
            } else {
                let width = indent_width(line);
                if width <= base {
                    break;
                }
                raw.push((start, end, Some(width)));
                kept = raw.len();
            }
            self.pos = self.next_line_start(start);
        }
        raw.truncate(kept);

        let strip = raw.iter().filter_map(|&(_, _, width)| width).min().unwrap_or(0);
        raw.into_iter()
            .map(|(start, end, width)| match width {
                Some(_) => NestedLine {
                    text: &self.source[start + strip..end],
                    span: self.span(start + strip, end),
                },
                None => NestedLine {
                    text: "",
                    span: self.span(start, start),
                },
            })
            .collect()
    }

    // === Tags ===

    fn lex_tag_line(&mut self, indent: usize) -> Result<(), LexError> {
        loop {
            self.lex_tag_head()?;

            if self.at_line_end() {
                break;
            }

            match self.peek() {
                Some(b':') => {
                    self.push(TokenKind::Colon, self.span(self.pos, self.pos + 1));
                    self.pos += 1;
                    while self.peek() == Some(b' ') || self.peek() == Some(b'\t') {
                        self.pos += 1;
                    }
                    if self.at_line_end() {
                        return Err(LexError::new(
                            LexErrorKind::ExpectedTag,
                            Span::point(self.offset(self.pos)),
                        ));
                    }
                }
                Some(b'.') if self.peek_at(1).map_or(true, |b| b.is_ascii_whitespace()) => {
                    let dot = self.pos;
                    self.pos += 1;
                    if !self.rest_is_blank() {
                        self.pos = dot;
                        return Err(self.unexpected_character());
                    }
                    self.lex_text_block(dot, indent);
                    return Ok(());
                }
                Some(b' ') => {
                    let end = self.line_end(self.pos);
                    let text = &self.source[self.pos + 1..end];
                    if !is_blank(text) {
                        self.push(
                            TokenKind::Text(text.to_owned()),
                            self.span(self.pos + 1, end),
                        );
                    }
                    self.pos = end;
                    break;
                }
                Some(b'/') => {
                    // Self-closing marker; the renderer decides void-ness itself
                    self.pos += 1;
                    if !self.rest_is_blank() {
                        return Err(self.unexpected_character());
                    }
                    break;
                }
                Some(b'=') => {
                    return Err(LexError::new(
                        LexErrorKind::UnsupportedCode,
                        self.span(self.pos, self.pos + 1),
                    ));
                }
                Some(b'!') if self.peek_at(1) == Some(b'=') => {
                    return Err(LexError::new(
                        LexErrorKind::UnsupportedCode,
                        self.span(self.pos, self.pos + 2),
                    ));
                }
                Some(b'&') => {
                    return Err(LexError::new(
                        LexErrorKind::UnsupportedConstruct {
                            construct: "&attributes",
                        },
                        self.span(self.pos, self.line_end(self.pos)),
                    ));
                }
                _ => return Err(self.unexpected_character()),
            }
        }

        self.pos = self.next_line_start(self.pos);
        Ok(())
    }

    /// Tag name, then any run of `#id`, `.class` and `(attributes)`.
    fn lex_tag_head(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let mut seen = false;

        if self.peek().is_some_and(is_word) {
            let name = self.read_tag_name();
            if KEYWORDS.contains(&name) {
                return Err(LexError::new(
                    LexErrorKind::UnsupportedKeyword {
                        keyword: name.to_owned(),
                    },
                    self.span(start, self.pos),
                ));
            }
            self.push(TokenKind::Tag(name.to_owned()), self.span(start, self.pos));
            seen = true;
        }

        loop {
            match self.peek() {
                Some(b'#') if self.peek_at(1).is_some_and(is_name_part) => {
                    let (name, span) = self.read_shorthand();
                    self.push(TokenKind::Id(name), span);
                }
                Some(b'.') if self.peek_at(1).is_some_and(is_name_part) => {
                    let (name, span) = self.read_shorthand();
                    self.push(TokenKind::Class(name), span);
                }
                Some(b'(') if seen => self.lex_attributes()?,
                _ => break,
            }
            seen = true;
        }

        if seen {
            Ok(())
        } else {
            Err(LexError::new(
                LexErrorKind::ExpectedTag,
                Span::point(self.offset(start)),
            ))
        }
    }

    /// `\w([-:\w]*\w)?`
    fn read_tag_name(&mut self) -> &'a str {
        let start = self.pos;
        let mut end = start;
        while self
            .bytes
            .get(end)
            .is_some_and(|&b| is_name_part(b) || b == b':')
        {
            end += 1;
        }
        while end > start + 1 && matches!(self.bytes[end - 1], b'-' | b':') {
            end -= 1;
        }
        self.pos = end;
        &self.source[start..end]
    }

    /// `#name` or `.name`; the current byte is the sigil.
    fn read_shorthand(&mut self) -> (String, Span) {
        let sigil = self.pos;
        self.pos += 1;
        while self.peek().is_some_and(is_name_part) {
            self.pos += 1;
        }
        (
            self.source[sigil + 1..self.pos].to_owned(),
            self.span(sigil, self.pos),
        )
    }

    // === Attributes ===

    fn lex_attributes(&mut self) -> Result<(), LexError> {
        let open = self.pos;
        self.push(TokenKind::StartAttributes, self.span(open, open + 1));
        self.pos += 1;

        loop {
            while self
                .peek()
                .is_some_and(|b| b.is_ascii_whitespace() || b == b',')
            {
                self.pos += 1;
            }

            match self.peek() {
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedAttributes,
                        self.span(open, self.bytes.len()),
                    ));
                }
                Some(b')') => {
                    self.push(TokenKind::EndAttributes, self.span(self.pos, self.pos + 1));
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.lex_attribute()?,
            }
        }
    }

    fn lex_attribute(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let name = match self.peek() {
            Some(quote @ (b'\'' | b'"')) => {
                self.skip_string(quote)?;
                self.source[start + 1..self.pos - 1].to_owned()
            }
            _ => {
                while self.peek().is_some_and(|b| {
                    !(b.is_ascii_whitespace() || matches!(b, b',' | b')' | b'=' | b'('))
                        && !(b == b'!' && self.peek_at(1) == Some(b'='))
                }) {
                    self.pos += 1;
                }
                self.source[start..self.pos].to_owned()
            }
        };
        if self.pos == start {
            return Err(self.unexpected_character());
        }

        let after_name = self.pos;
        while self.peek() == Some(b' ') || self.peek() == Some(b'\t') {
            self.pos += 1;
        }
        let assigned = match (self.peek(), self.peek_at(1)) {
            (Some(b'='), _) => 1,
            (Some(b'!'), Some(b'=')) => 2,
            _ => 0,
        };
        if assigned == 0 {
            self.pos = after_name;
            self.push(
                TokenKind::Attribute {
                    name,
                    value: AttrValue::True,
                },
                self.span(start, after_name),
            );
            return Ok(());
        }
        self.pos += assigned;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }

        let value_start = self.pos;
        self.read_attribute_value()?;
        if self.pos == value_start {
            return Err(LexError::new(
                LexErrorKind::ExpectedAttributeValue,
                Span::point(self.offset(value_start)),
            ));
        }

        let value = self.source[value_start..self.pos].to_owned();
        self.push(
            TokenKind::Attribute {
                name,
                value: AttrValue::Expr(value),
            },
            self.span(start, self.pos),
        );
        Ok(())
    }

    /// Raw value text: runs to whitespace, `,` or `)` outside brackets
    /// and strings.
    fn read_attribute_value(&mut self) -> Result<(), LexError> {
        let mut depth = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b'\'' | b'"' | b'`' => {
                    self.skip_string(b)?;
                    continue;
                }
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                b',' if depth == 0 => break,
                _ if depth == 0 && b.is_ascii_whitespace() => break,
                _ => {}
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// Skip a quoted string starting at the current byte, honouring
    /// backslash escapes.
    fn skip_string(&mut self, quote: u8) -> Result<(), LexError> {
        let open = self.pos;
        self.pos += 1;
        while let Some(b) = self.peek() {
            if b == b'\\' {
                self.pos += 2;
                continue;
            }
            self.pos += 1;
            if b == quote {
                return Ok(());
            }
        }
        self.pos = self.bytes.len();
        Err(LexError::new(
            LexErrorKind::UnterminatedString,
            self.span(open, self.bytes.len()),
        ))
    }

    // === Text blocks ===

    /// `p.` followed by deeper lines: each line becomes a text token,
    /// separated by newlines.
    fn lex_text_block(&mut self, dot: usize, indent: usize) {
        self.push(TokenKind::StartPipelessText, self.span(dot, dot + 1));
        self.pos = self.next_line_start(dot);

        let lines = self.collect_nested(indent);
        let mut end = dot + 1;
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                self.push(TokenKind::Newline, Span::point(line.span.start));
            }
            if !line.text.is_empty() {
                self.push(TokenKind::Text(line.text.to_owned()), line.span);
            }
            end = line.span.end as usize;
        }

        self.push(TokenKind::EndPipelessText, Span::point(self.offset(end)));
    }
}
