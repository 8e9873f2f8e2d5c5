use super::*;
use crate::foundation::span::Span;

fn parse(src: &str) -> TypeflowResult<Tag<'_>> {
    Tag::parse(Span::whole(src))
}

#[test]
fn simple_forms() {
    for (src, name, is_close, value) in [
        ("<tag>", "tag", false, None),
        ("<tag=1>", "tag", false, Some("1")),
        ("<tag=10>", "tag", false, Some("10")),
        ("<tag=100% >", "tag", false, Some("100%")),
        ("<tag=0 1 2>", "tag", false, Some("0 1 2")),
        ("</tag>", "tag", true, None),
    ] {
        let tag = parse(src).unwrap();
        assert_eq!(tag.name.as_str(), name, "{src:?}");
        assert_eq!(tag.is_close, is_close, "{src:?}");
        assert_eq!(tag.value.map(|v| v.as_str()), value, "{src:?}");
    }
}

#[test]
fn interior_whitespace_is_tolerated() {
    let tag = parse("<tag = 1 >").unwrap();
    assert_eq!(tag.name.as_str(), "tag");
    assert_eq!(tag.value.unwrap().as_str(), "1");

    let tag = parse("< / tag >").unwrap();
    assert!(tag.is_close);
    assert_eq!(tag.name.as_str(), "tag");
}

#[test]
fn value_keeps_internal_whitespace() {
    let tag = parse("<wait=0 1 2>").unwrap();
    assert_eq!(tag.value.unwrap().as_str(), "0 1 2");
}

#[test]
fn unterminated_tag_still_parses() {
    let tag = parse("<quake").unwrap();
    assert_eq!(tag.name.as_str(), "quake");
    assert!(!tag.is_close);
}

#[test]
fn nameless_tags_are_fatal() {
    assert!(parse("<>").is_err());
    assert!(parse("<   >").is_err());
    assert!(parse("</>").is_err());
    assert!(parse("<1234>").is_err());
}
