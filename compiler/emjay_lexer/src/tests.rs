use pretty_assertions::assert_eq;

use super::*;
use TokenKind::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    match lex(source) {
        Ok(tokens) => tokens.kinds(),
        Err(err) => panic!("lex failed for {source:?}: {err}"),
    }
}

fn error(source: &str) -> LexError {
    match lex(source) {
        Ok(tokens) => panic!("expected an error for {source:?}, got {:?}", tokens.kinds()),
        Err(err) => err,
    }
}

fn tag(name: &str) -> TokenKind {
    Tag(name.to_owned())
}

fn text(value: &str) -> TokenKind {
    Text(value.to_owned())
}

fn attr(name: &str, value: &str) -> TokenKind {
    Attribute {
        name: name.to_owned(),
        value: AttrValue::Expr(value.to_owned()),
    }
}

fn flag(name: &str) -> TokenKind {
    Attribute {
        name: name.to_owned(),
        value: AttrValue::True,
    }
}

// === Tag heads ===

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![Eof]);
    assert_eq!(kinds("\n   \n"), vec![Eof]);
}

#[test]
fn test_single_tag() {
    assert_eq!(kinds("div"), vec![tag("div"), Eof]);
}

#[test]
fn test_tag_with_id_and_classes() {
    assert_eq!(
        kinds("a#main.big.red"),
        vec![
            tag("a"),
            Id("main".into()),
            Class("big".into()),
            Class("red".into()),
            Eof
        ]
    );
}

#[test]
fn test_shorthand_without_tag_name() {
    assert_eq!(
        kinds(".card#top"),
        vec![Class("card".into()), Id("top".into()), Eof]
    );
}

#[test]
fn test_tag_name_with_dashes_and_colons() {
    assert_eq!(kinds("my-element"), vec![tag("my-element"), Eof]);
    assert_eq!(kinds("svg:rect"), vec![tag("svg:rect"), Eof]);
}

#[test]
fn test_placeholder_as_tag_name() {
    assert_eq!(
        kinds("emjay_substitution0.box"),
        vec![tag("emjay_substitution0"), Class("box".into()), Eof]
    );
}

#[test]
fn test_self_closing_marker_is_ignored() {
    assert_eq!(kinds("img/"), vec![tag("img"), Eof]);
}

// === Attributes ===

#[test]
fn test_attributes() {
    assert_eq!(
        kinds("a(href='x' disabled)"),
        vec![
            tag("a"),
            StartAttributes,
            attr("href", "'x'"),
            flag("disabled"),
            EndAttributes,
            Eof
        ]
    );
}

#[test]
fn test_attributes_separated_by_commas() {
    assert_eq!(
        kinds("a(href='x', title=\"a, b\")"),
        vec![
            tag("a"),
            StartAttributes,
            attr("href", "'x'"),
            attr("title", "\"a, b\""),
            EndAttributes,
            Eof
        ]
    );
}

#[test]
fn test_attribute_value_with_brackets() {
    assert_eq!(
        kinds("div(style={a: 1, b: [2, 3]})"),
        vec![
            tag("div"),
            StartAttributes,
            attr("style", "{a: 1, b: [2, 3]}"),
            EndAttributes,
            Eof
        ]
    );
}

#[test]
fn test_attribute_value_with_escaped_quote() {
    assert_eq!(
        kinds(r"p(title='it\'s')"),
        vec![
            tag("p"),
            StartAttributes,
            attr("title", r"'it\'s'"),
            EndAttributes,
            Eof
        ]
    );
}

#[test]
fn test_unescaped_assignment() {
    assert_eq!(
        kinds("p(title!='x')"),
        vec![
            tag("p"),
            StartAttributes,
            attr("title", "'x'"),
            EndAttributes,
            Eof
        ]
    );
}

#[test]
fn test_quoted_attribute_name() {
    assert_eq!(
        kinds("div('(click)'='go')"),
        vec![
            tag("div"),
            StartAttributes,
            attr("(click)", "'go'"),
            EndAttributes,
            Eof
        ]
    );
}

#[test]
fn test_multiline_attributes() {
    let source = "input(\n  type='text'\n  name='q'\n)\np";
    assert_eq!(
        kinds(source),
        vec![
            tag("input"),
            StartAttributes,
            attr("type", "'text'"),
            attr("name", "'q'"),
            EndAttributes,
            Newline,
            tag("p"),
            Eof
        ]
    );
}

#[test]
fn test_placeholder_attributes() {
    assert_eq!(
        kinds("div(emjay_substitution0 id=emjay_substitution1)"),
        vec![
            tag("div"),
            StartAttributes,
            flag("emjay_substitution0"),
            attr("id", "emjay_substitution1"),
            EndAttributes,
            Eof
        ]
    );
}

#[test]
fn test_spaces_around_equals() {
    assert_eq!(
        kinds("a(href = 'x')"),
        vec![
            tag("a"),
            StartAttributes,
            attr("href", "'x'"),
            EndAttributes,
            Eof
        ]
    );
}

// === Text ===

#[test]
fn test_inline_text() {
    assert_eq!(kinds("p Hello world"), vec![tag("p"), text("Hello world"), Eof]);
}

#[test]
fn test_inline_text_keeps_extra_spaces() {
    assert_eq!(kinds("p  two"), vec![tag("p"), text(" two"), Eof]);
}

#[test]
fn test_inline_text_span() {
    let tokens = lex("p Hello").unwrap_or_default();
    assert_eq!(tokens[1].span, Span::new(2, 7));
}

#[test]
fn test_piped_text() {
    assert_eq!(
        kinds("p\n  | hello\n  | world"),
        vec![
            tag("p"),
            Indent,
            text("hello"),
            Newline,
            text("world"),
            Outdent,
            Eof
        ]
    );
}

#[test]
fn test_empty_pipe() {
    assert_eq!(kinds("|"), vec![text(""), Eof]);
}

#[test]
fn test_literal_html_line() {
    assert_eq!(kinds("<br>"), vec![text("<br>"), Eof]);
}

#[test]
fn test_text_block() {
    assert_eq!(
        kinds("p.\n  one\n\n    two\nspan"),
        vec![
            tag("p"),
            StartPipelessText,
            text("one"),
            Newline,
            Newline,
            text("  two"),
            EndPipelessText,
            Newline,
            tag("span"),
            Eof
        ]
    );
}

#[test]
fn test_text_block_without_lines() {
    assert_eq!(
        kinds("p."),
        vec![tag("p"), StartPipelessText, EndPipelessText, Eof]
    );
}

#[test]
fn test_text_block_after_attributes() {
    assert_eq!(
        kinds("script(type='x').\n  a < b"),
        vec![
            tag("script"),
            StartAttributes,
            attr("type", "'x'"),
            EndAttributes,
            StartPipelessText,
            text("a < b"),
            EndPipelessText,
            Eof
        ]
    );
}

// === Structure ===

#[test]
fn test_nesting() {
    assert_eq!(
        kinds("ul\n  li one\n  li two\np"),
        vec![
            tag("ul"),
            Indent,
            tag("li"),
            text("one"),
            Newline,
            tag("li"),
            text("two"),
            Outdent,
            tag("p"),
            Eof
        ]
    );
}

#[test]
fn test_multiple_outdents() {
    assert_eq!(
        kinds("a\n  b\n    c\nd"),
        vec![
            tag("a"),
            Indent,
            tag("b"),
            Indent,
            tag("c"),
            Outdent,
            Outdent,
            tag("d"),
            Eof
        ]
    );
}

#[test]
fn test_indents_closed_at_end() {
    assert_eq!(
        kinds("a\n  b\n    c"),
        vec![
            tag("a"),
            Indent,
            tag("b"),
            Indent,
            tag("c"),
            Outdent,
            Outdent,
            Eof
        ]
    );
}

#[test]
fn test_tab_indentation() {
    assert_eq!(
        kinds("a\n\tb"),
        vec![tag("a"), Indent, tag("b"), Outdent, Eof]
    );
}

#[test]
fn test_leading_indent() {
    assert_eq!(kinds("  div"), vec![Indent, tag("div"), Outdent, Eof]);
}

#[test]
fn test_crlf_line_endings() {
    assert_eq!(
        kinds("ul\r\n  li\r\n"),
        vec![tag("ul"), Indent, tag("li"), Outdent, Eof]
    );
}

#[test]
fn test_blank_lines_are_skipped() {
    assert_eq!(
        kinds("a\n\n   \nb"),
        vec![tag("a"), Newline, tag("b"), Eof]
    );
}

#[test]
fn test_block_expansion() {
    assert_eq!(
        kinds("li: a(href='/') Home"),
        vec![
            tag("li"),
            Colon,
            tag("a"),
            StartAttributes,
            attr("href", "'/'"),
            EndAttributes,
            text("Home"),
            Eof
        ]
    );
}

// === Comments ===

#[test]
fn test_buffered_comment() {
    assert_eq!(
        kinds("// note\np"),
        vec![
            Comment {
                value: "note".into(),
                buffered: true
            },
            Newline,
            tag("p"),
            Eof
        ]
    );
}

#[test]
fn test_unbuffered_comment_swallows_nested_lines() {
    assert_eq!(
        kinds("//- hidden\n  div\n    p\nspan"),
        vec![
            Comment {
                value: "hidden\ndiv\n  p".into(),
                buffered: false
            },
            Newline,
            tag("span"),
            Eof
        ]
    );
}

// === Errors ===

#[test]
fn test_mixed_indent() {
    let err = error("div\n \tp");
    assert_eq!(err.kind, LexErrorKind::MixedIndent);
    assert_eq!(err.span, Span::new(4, 6));
}

#[test]
fn test_inconsistent_indent() {
    let err = error("div\n    p\n  span");
    assert_eq!(err.kind, LexErrorKind::InconsistentIndent { found: 2 });
}

#[test]
fn test_attributes_need_a_tag() {
    assert_eq!(error("(a)").kind, LexErrorKind::ExpectedTag);
}

#[test]
fn test_expansion_needs_a_tag() {
    assert_eq!(error("p:").kind, LexErrorKind::ExpectedTag);
    assert_eq!(error("p: ").kind, LexErrorKind::ExpectedTag);
}

#[test]
fn test_unterminated_attributes() {
    assert_eq!(error("div(a").kind, LexErrorKind::UnterminatedAttributes);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(error("div(a='x)").kind, LexErrorKind::UnterminatedString);
}

#[test]
fn test_missing_attribute_value() {
    assert_eq!(error("div(a=)").kind, LexErrorKind::ExpectedAttributeValue);
}

#[test]
fn test_code_is_unsupported() {
    assert_eq!(error("- var x = 1").kind, LexErrorKind::UnsupportedCode);
    assert_eq!(error("= x").kind, LexErrorKind::UnsupportedCode);
    assert_eq!(error("!= x").kind, LexErrorKind::UnsupportedCode);
    assert_eq!(error("p= x").kind, LexErrorKind::UnsupportedCode);
    assert_eq!(error("p!= x").kind, LexErrorKind::UnsupportedCode);
}

#[test]
fn test_keywords_are_unsupported() {
    assert_eq!(
        error("if x").kind,
        LexErrorKind::UnsupportedKeyword {
            keyword: "if".into()
        }
    );
    assert_eq!(
        error("div\n  each item in items").kind,
        LexErrorKind::UnsupportedKeyword {
            keyword: "each".into()
        }
    );
}

#[test]
fn test_keyword_prefix_is_a_tag() {
    assert_eq!(kinds("iframe"), vec![tag("iframe"), Eof]);
}

#[test]
fn test_constructs_are_unsupported() {
    assert_eq!(
        error("div&attributes(x)").kind,
        LexErrorKind::UnsupportedConstruct {
            construct: "&attributes"
        }
    );
    assert_eq!(
        error("+item").kind,
        LexErrorKind::UnsupportedConstruct { construct: "+mixin" }
    );
}

#[test]
fn test_unexpected_character() {
    let err = error("div%");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter { found: '%' });
    assert_eq!(err.span, Span::new(3, 4));
}

#[test]
fn test_error_display() {
    assert_eq!(
        error("div(a").to_string(),
        "attribute list is never closed at 3..5"
    );
}
