use super::*;

#[test]
fn test_key_value_pairs_in_order() {
    let extracted = extract_directives(
        "/* @pjs preload=\"bg.png,logo.png\"; crisp=true; */\nvoid setup() {}\n",
        true,
    );
    let directives = &extracted.directives;
    assert_eq!(directives.len(), 2);
    assert_eq!(directives.get("preload"), Some("bg.png,logo.png"));
    assert_eq!(directives.get("crisp"), Some("true"));
    let keys: Vec<&str> = directives.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, ["preload", "crisp"]);
}

#[test]
fn test_bare_key_is_true() {
    let extracted = extract_directives("/* @pjs pauseOnBlur; */", true);
    assert_eq!(extracted.directives.get("pauseOnBlur"), Some("true"));
    assert!(extracted.directives.is_set("pauseOnBlur"));
}

#[test]
fn test_false_value_is_not_set() {
    let extracted = extract_directives("/* @pjs crisp=false; */", true);
    assert!(!extracted.directives.is_set("crisp"));
    assert!(!extracted.directives.is_set("missing"));
}

#[test]
fn test_single_quotes_and_repeated_keys() {
    let extracted = extract_directives("/* @pjs font='a.ttf'; font='b.ttf'; */", true);
    assert_eq!(extracted.directives.len(), 2);
    assert_eq!(extracted.directives.get("font"), Some("b.ttf"), "last one wins");
}

#[test]
fn test_block_is_stripped_from_source() {
    let source = "/* @pjs crisp=true; */\nint x = 1;\n";
    let stripped = extract_directives(source, true);
    assert_eq!(stripped.source, "\nint x = 1;\n");

    let kept = extract_directives(source, false);
    assert_eq!(kept.source, source);
    assert_eq!(kept.directives.get("crisp"), Some("true"));
}

#[test]
fn test_plain_comments_are_not_directives() {
    let source = "/* just a comment */\n/** @param x */\nint x = 1;\n";
    let extracted = extract_directives(source, true);
    assert!(extracted.directives.is_empty());
    assert_eq!(extracted.source, source);
}

#[test]
fn test_multiline_block_with_stars() {
    let source = "/* @pjs\n * preload=\"a.png\";\n * globalKeyEvents=true;\n */\n";
    let extracted = extract_directives(source, true);
    assert_eq!(extracted.directives.get("globalKeyEvents"), Some("true"));
    assert_eq!(extracted.source, "\n");
}
