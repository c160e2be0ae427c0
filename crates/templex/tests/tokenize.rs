#![expect(missing_docs)]

use templex::{
    Lexer, Mode, SourceLexer, TemplateTokenKind, TokenKind, ValidSymbols, resolve_mode, scan,
    tokenize,
};

/// A lexer over a character buffer that records every cursor operation.
#[derive(Default)]
struct Recording {
    chars: Vec<char>,
    pos: usize,
    marked: Option<usize>,
    calls: Vec<&'static str>,
}

impl Recording {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            ..Default::default()
        }
    }

    fn token(&self) -> String {
        self.chars[..self.marked.unwrap_or(self.pos)].iter().collect()
    }
}

impl Lexer for Recording {
    fn lookahead(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.calls.push("advance");
        self.pos = (self.pos + 1).min(self.chars.len());
    }

    fn skip(&mut self) {
        self.calls.push("skip");
        self.pos = (self.pos + 1).min(self.chars.len());
    }

    fn mark_end(&mut self) {
        self.calls.push("mark_end");
        self.marked = Some(self.pos);
    }
}

#[test]
fn ambiguous_call_touches_nothing() {
    for src in ["abc", "{x}", "\n  |x", " todo", "}"] {
        let mut lexer = Recording::new(src);
        let valid = ValidSymbols::SINGLELINE | ValidSymbols::MULTILINE;
        assert_eq!(scan(&mut lexer, valid), None);
        assert!(lexer.calls.is_empty(), "{src:?}: {:?}", lexer.calls);
    }
}

#[test]
fn custom_lexer_drives_the_scanner() {
    let mut lexer = Recording::new("a\\{b{");
    assert_eq!(
        scan(&mut lexer, ValidSymbols::SINGLELINE),
        Some(TokenKind::SinglelineContent)
    );
    assert_eq!(lexer.token(), "a\\{b");
    assert_eq!(lexer.lookahead(), Some('{'));
    assert_eq!(lexer.calls.last(), Some(&"mark_end"));
}

#[test]
fn lexer_eof_defaults_to_missing_lookahead() {
    let mut lexer = Recording::new("x");
    assert!(!lexer.eof());
    lexer.advance();
    assert!(lexer.eof());
}

#[test]
fn mode_is_public() {
    assert_eq!(resolve_mode(ValidSymbols::SINGLELINE, Some('a')), Mode::SingleLine);
    assert_eq!(
        resolve_mode(ValidSymbols::TEMPLATE_EXPR_END, Some('}')),
        Mode::ExprEnd
    );
}

#[test]
fn valid_symbols_from_host_table() {
    let mut table = [false; 11];
    table[usize::from(TokenKind::MultilineContent.index())] = true;
    table[usize::from(TokenKind::MultilineEnd.index())] = true;
    let valid = ValidSymbols::from_table(&table);
    assert_eq!(
        valid.kinds().collect::<Vec<_>>(),
        [TokenKind::MultilineContent, TokenKind::MultilineEnd]
    );
}

#[test]
fn source_lexer_walks_a_template() {
    let mut lexer = SourceLexer::new("one {two} three\"");
    let mut seen = Vec::new();
    let mut valid = ValidSymbols::SINGLELINE;
    while let Some(token) = lexer.scan(valid) {
        seen.push((token.kind, token.text.to_string()));
        valid = match token.kind {
            TokenKind::SinglelineEnd => break,
            TokenKind::SinglelineExprStart => {
                while lexer.rest().first() != Some(&b'}') {
                    lexer.bump();
                }
                ValidSymbols::TEMPLATE_EXPR_END
            }
            _ => ValidSymbols::SINGLELINE,
        };
    }
    assert_eq!(
        seen,
        [
            (TokenKind::SinglelineContent, "one ".to_string()),
            (TokenKind::SinglelineExprStart, "{".to_string()),
            (TokenKind::TemplateExprEnd, "}".to_string()),
            (TokenKind::SinglelineContent, " three".to_string()),
            (TokenKind::SinglelineEnd, "\"".to_string()),
        ]
    );
}

#[test]
fn whole_file() {
    use TemplateTokenKind::{Expression, Keyword, Scanned, Start};

    let src = r#"
class Greeter {
    String greet(String name) {
        // TODO handle empty names
        return $"Hello, {name}!";
    }

    String card(String name) {
        return $|Dear {name},
                |{{ for (Int i : 0 ..< 3) { $.add('*'); } }}
                ;
    }
}
"#;
    let tokens = tokenize(src).unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            Keyword,
            Scanned(TokenKind::KeywordFreeformText),
            Start { multiline: false },
            Scanned(TokenKind::SinglelineContent),
            Scanned(TokenKind::SinglelineExprStart),
            Expression,
            Scanned(TokenKind::TemplateExprEnd),
            Scanned(TokenKind::SinglelineContent),
            Scanned(TokenKind::SinglelineEnd),
            Start { multiline: true },
            Scanned(TokenKind::MultilineContent),
            Scanned(TokenKind::MultilineExprStart),
            Expression,
            Scanned(TokenKind::TemplateExprEnd),
            Scanned(TokenKind::MultilineContent),
            Scanned(TokenKind::MultilineStmtBlock),
            Scanned(TokenKind::MultilineEnd),
        ]
    );
    assert_eq!(tokens[1].text, "handle empty names");
    assert_eq!(
        tokens[15].text,
        "{{ for (Int i : 0 ..< 3) { $.add('*'); } }}"
    );
}
