use super::*;
use sketchc_common::{DiagnosticBag, HostMembers};
use sketchc_parser::parse;
use sketchc_scanner::{erase_generics, mask_source, split_to_atoms};

use crate::finish;

fn render(source: &str) -> String {
    let masked = mask_source(source);
    let erased = erase_generics(&masked.text);
    let mut atoms = split_to_atoms(&erased.text).expect("balanced");
    let mut parsed = parse(&mut atoms);
    sketchc_binder::resolve(&mut parsed.registry);
    let host = HostMembers::standard();
    let mut printer = Printer::new(&parsed.registry, &host);
    let text = printer.print_root(&parsed.root);
    finish(&text, &masked.literals, &mut DiagnosticBag::new())
}

#[test]
fn test_declaration_with_defaults() {
    let out = render("void setup() { int a = 1, b; String s; }");
    assert!(out.contains("var a = 1,b = 0;"), "{out}");
    assert!(out.contains("var s = null;"), "{out}");
}

#[test]
fn test_if_else_blocks() {
    let out = render("void draw() { if (x > 1) { y = 2; } else { y = 3; } }");
    assert!(
        out.contains("if (x > 1) {\ny = 2;\n} else {\ny = 3;\n}"),
        "{out}"
    );
}

#[test]
fn test_for_each_uses_object_iterator() {
    let out = render("void draw() { for (Ball b : balls) { b.move(); } }");
    assert!(
        out.contains(
            "for (var $it0 = new $p.ObjectIterator(balls), b = void(0); \
             $it0.hasNext() && ((b = $it0.next()) || true);) {\nb.move();\n}"
        ),
        "{out}"
    );
}

#[test]
fn test_for_each_iterators_are_numbered() {
    let out = render(
        "void draw() { for (Ball b : balls) { b.move(); } for (Ball c : balls) { c.move(); } }",
    );
    assert!(out.contains("var $it0 = new $p.ObjectIterator(balls), b = void(0)"), "{out}");
    assert!(out.contains("var $it1 = new $p.ObjectIterator(balls), c = void(0)"), "{out}");
}

#[test]
fn test_outer_iterator_is_numbered_before_its_container() {
    let out = render(
        "void draw() { for (Ball b : pick(function() { for (Ball c : balls) { c.move(); } \
         return balls; })) { b.move(); } }",
    );
    assert!(out.contains("for (var $it0 = new $p.ObjectIterator("), "{out}");
    assert!(out.contains(", b = void(0); $it0.hasNext()"), "{out}");
    assert!(out.contains("var $it1 = new $p.ObjectIterator(balls), c = void(0)"), "{out}");
}

#[test]
fn test_iterator_numbering_restarts_per_printer() {
    let source = "void draw() { for (Ball b : balls) { b.move(); } }";
    let first = render(source);
    let second = render(source);
    assert_eq!(first, second);
    assert!(!second.contains("$it1"), "{second}");
}

#[test]
fn test_counting_loop_declares_its_variable() {
    let out = render("void draw() { for (int i = 0; i < 10; i++) { point(i, i); } }");
    assert!(out.contains("for (var i = 0; i < 10; i++) {\n$p.point(i, i);\n}"), "{out}");
}

#[test]
fn test_for_in_loop() {
    let out = render("void draw() { for (String k in table) { println(k); } }");
    assert!(out.contains("for (var k in table) {\n$p.println(k);\n}"), "{out}");
}

#[test]
fn test_try_catch() {
    let out = render("void setup() { try { load(); } catch (Exception e) { println(e); } }");
    assert!(out.contains("try {\nload();\n} catch (e) {\n$p.println(e);\n}"), "{out}");
}

#[test]
fn test_switch_cases() {
    let out = render("void draw() { switch (mode) { case 1: fill(0); break; default: fill(255); } }");
    assert!(out.contains("switch (mode) {\ncase 1: $p.fill(0); break;"), "{out}");
    assert!(out.contains("default: $p.fill(255);"), "{out}");
}

#[test]
fn test_locals_shadow_host_names() {
    let out = render("void draw() { int width = 3; rect(0, 0, width, height); }");
    assert!(out.contains("$p.rect(0, 0, width, $p.height)"), "{out}");
}
