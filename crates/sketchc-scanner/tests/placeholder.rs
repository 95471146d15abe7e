use super::*;

#[test]
fn test_letters_round_trip() {
    for kind in [
        AtomKind::Block,
        AtomKind::Group,
        AtomKind::Index,
        AtomKind::Method,
        AtomKind::Class,
        AtomKind::InlineClass,
        AtomKind::Constructor,
        AtomKind::Function,
        AtomKind::InlineObject,
    ] {
        assert_eq!(AtomKind::from_letter(kind.letter()), Some(kind));
    }
    assert_eq!(AtomKind::from_letter('Z'), None);
}

#[test]
fn test_placeholder_formats() {
    assert_eq!(atom_placeholder(AtomKind::Group, 12), "\"B12\"");
    assert_eq!(literal_placeholder(3), "'3'");
    assert_eq!(transform_placeholder(0), "\"!0\"");
}

#[test]
fn test_parse_atom_placeholder() {
    assert_eq!(
        parse_atom_placeholder("\"B12\""),
        Some((AtomKind::Group, 12))
    );
    assert_eq!(parse_atom_placeholder("\"Z1\""), None);
    assert_eq!(parse_atom_placeholder("\"B\""), None);
    assert_eq!(parse_atom_placeholder("B12"), None);
}

#[test]
fn test_bracket_kinds() {
    assert_eq!(AtomKind::from_close(b'}'), Some(AtomKind::Block));
    assert_eq!(AtomKind::from_close(b')'), Some(AtomKind::Group));
    assert_eq!(AtomKind::from_close(b']'), Some(AtomKind::Index));
    assert!(AtomKind::Index.is_bracket());
    assert!(!AtomKind::Method.is_bracket());
}
