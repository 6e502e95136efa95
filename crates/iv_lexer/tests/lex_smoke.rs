use std::io::Cursor;

use iv_lexer::{Lexer, Scanner, TokenStream};
use iv_syntax::TokenKind;

#[test]
fn lex_smoke_directive_script() {
    let src = ")origin 0\n)format `%.2f`\n)get \"lib.iv\"\niota 5\n";
    let result = Lexer::new(src).lex();
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let newlines = result
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Newline)
        .count();
    assert_eq!(newlines, 4);
    assert!(
        result
            .tokens
            .iter()
            .any(|t| t.kind == TokenKind::RawString && t.text == "`%.2f`")
    );
    for tok in &result.tokens {
        assert_eq!(tok.span.slice(src), tok.text);
    }
}

#[test]
fn scanner_and_lexer_agree_on_kinds() {
    let src = ")debug tokens 1\n? 6\n'x' \"y\"\n";
    let lexed: Vec<TokenKind> = Lexer::new(src).lex().tokens.iter().map(|t| t.kind).collect();
    let mut scanner = Scanner::new("agree", Cursor::new(src));
    let mut scanned = Vec::new();
    loop {
        let t = scanner.next();
        scanned.push(t.kind);
        if t.kind == TokenKind::Eof {
            break;
        }
    }
    assert_eq!(lexed, scanned);
}

#[test]
fn error_token_does_not_hide_later_lines() {
    let mut scanner = Scanner::new("mixed", Cursor::new("1\n\"oops\n3\n"));
    let mut kinds = Vec::new();
    while scanner.peek().kind != TokenKind::Eof {
        kinds.push(scanner.next().kind);
    }
    assert_eq!(
        kinds,
        vec![
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Error,
            TokenKind::Newline,
            TokenKind::Number,
            TokenKind::Newline,
        ]
    );
    assert_eq!(scanner.location().line, 3);
}
