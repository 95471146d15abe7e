use super::*;
use sketchc_scanner::LiteralKind;

#[test]
fn test_blank_lines_collapse() {
    let mut diagnostics = DiagnosticBag::new();
    let out = finish("a;\n\n\n   \nb;\n", &LiteralTable::new(), &mut diagnostics);
    assert_eq!(out, "a;\n\nb;\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn test_markers_decoded() {
    let mut diagnostics = DiagnosticBag::new();
    let out = finish("var __x0024cost = 1;", &LiteralTable::new(), &mut diagnostics);
    assert_eq!(out, "var $cost = 1;");
}

#[test]
fn test_literals_reinjected() {
    let mut literals = LiteralTable::new();
    let text = literals.push("\"hello\"", LiteralKind::Str);
    let ch = literals.push("'a'", LiteralKind::Char);
    let mut diagnostics = DiagnosticBag::new();
    let out = finish(
        &format!("$p.println({text} + {ch});"),
        &literals,
        &mut diagnostics,
    );
    assert_eq!(out, "$p.println(\"hello\" + (new $p.Character('a')));");
}

#[test]
fn test_literal_contents_are_not_checked() {
    let mut literals = LiteralTable::new();
    let text = literals.push("\"A1\"", LiteralKind::Str);
    let mut diagnostics = DiagnosticBag::new();
    let out = finish(&format!("s = {text};"), &literals, &mut diagnostics);
    assert_eq!(out, "s = \"A1\";");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn test_leftover_placeholder_reported() {
    let mut diagnostics = DiagnosticBag::new();
    let out = finish("f(\"B12\");", &LiteralTable::new(), &mut diagnostics);
    assert_eq!(out, "f(\"B12\");", "the text is kept");
    let codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, [diagnostic_codes::UNEXPANDED_PLACEHOLDER]);
}
