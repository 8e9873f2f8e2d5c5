use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    Lexer::new(src).tokens().map(|t| t.kind).collect()
}

#[test]
fn token_counts() {
    for (src, count) in [
        ("HOGE", 1),
        ("HOGE<>", 2),
        ("HOGE<>HAGE", 3),
        ("HOGE<>HAGE<HIGE>", 4),
        ("<>HAGE<HIGE>", 3),
        ("<   >HAGE < HIGE >", 3),
    ] {
        assert_eq!(Lexer::new(src).tokens().count(), count, "{src:?}");
    }
}

#[test]
fn tokens_reconstruct_the_source_exactly() {
    for src in [
        "",
        "plain text",
        "a<quake>b</quake>c",
        "&lt;&#65;",
        "{name} says <wait=0.5>hi",
        "unterminated <tag",
        "broken &amp",
        "漢字<ruby=かんじ>漢字</ruby>",
    ] {
        let joined: String = Lexer::new(src)
            .tokens()
            .map(|t| t.span.as_str())
            .collect();
        assert_eq!(joined, src);
    }
}

#[test]
fn markup_kinds_match_their_delimiters() {
    assert_eq!(
        kinds("a<b>&lt;{v}"),
        [
            TokenKind::Text,
            TokenKind::Tag,
            TokenKind::Entity,
            TokenKind::Variable,
        ]
    );
}

#[test]
fn close_char_must_match_open_type() {
    // '>' does not close an entity; the entity runs to the ';' or EOF.
    let tokens: Vec<_> = Lexer::new("&gt>x;").tokens().collect();
    assert_eq!(tokens[0].kind, TokenKind::Entity);
    assert_eq!(tokens[0].span.as_str(), "&gt>x;");
}

#[test]
fn unterminated_markup_runs_to_end_of_input() {
    let tokens: Vec<_> = Lexer::new("ab<cd").tokens().collect();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::Tag);
    assert_eq!(tokens[1].span.as_str(), "<cd");
}

#[test]
fn no_empty_token_at_end_of_input() {
    let lexer = Lexer::new("ab<c>");
    assert!(lexer.tokens().all(|t| !t.span.is_empty()));
    assert_eq!(lexer.tokens().count(), 2);
}

#[test]
fn iteration_is_restartable() {
    let lexer = Lexer::new("a<b>c");
    let first: Vec<_> = lexer.tokens().map(|t| t.span.as_str()).collect();
    let second: Vec<_> = lexer.tokens().map(|t| t.span.as_str()).collect();
    assert_eq!(first, second);
}
