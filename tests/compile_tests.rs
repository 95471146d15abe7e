//! End-to-end compilation of whole sketches through the public API.

use sketchc::{CompileError, CompilerOptions, compile};

fn compile_ok(source: &str) -> String {
    let output = compile(source, &CompilerOptions::default()).expect("compiles");
    assert!(!output.has_errors(), "{:?}", output.diagnostics);
    output.code
}

#[test]
fn test_cake_sketch() {
    let code = compile_ok(
        "class Cake { int a = 0; boolean test(boolean ok){ return true; } static boolean test2(boolean ok){ return false; } }
void setup(){ Cake c = new Cake(); noLoop(); }
void draw(){ background(255); }
",
    );
    assert!(code.contains("$p.Cake = Cake;"), "{code}");
    assert!(code.contains("$p.addMethod($this_1, 'test', test$1, false);"), "{code}");
    assert!(code.contains("$p.addMethod(Cake, 'test2', test2$1, false);"), "{code}");
    assert!(code.contains("$p.setup = setup;"), "{code}");
    assert!(code.contains("$p.noLoop();"), "{code}");
    assert!(code.contains("$p.background(255);"), "{code}");
}

#[test]
fn test_base_classes_render_first() {
    let code = compile_ok("class C extends B { }\nclass B extends A { }\nclass A { }\n");
    let a = code.find("var A = ").expect("A rendered");
    let b = code.find("var B = ").expect("B rendered");
    let c = code.find("var C = ").expect("C rendered");
    assert!(a < b && b < c, "{code}");
}

#[test]
fn test_generics_and_comparisons() {
    let code = compile_ok(
        "ArrayList<PVector> points = new ArrayList<PVector>();\nboolean less(int a, int b) { return a < b; }\n",
    );
    assert!(code.contains("var points = new $p.ArrayList();"), "{code}");
    assert!(code.contains("return a < b;"), "{code}");
}

#[test]
fn test_casts_and_colors() {
    let code = compile_ok("void draw() {\n  int v = (int)random(10);\n  color c = #FFAA00;\n}\n");
    assert!(code.contains("var v = $p.__int_cast($p.random(10));"), "{code}");
    assert!(code.contains("var c = 0xFFFFAA00;"), "{code}");
}

#[test]
fn test_comments_and_strings() {
    let code = compile_ok(
        "// line comment\n/* block\n comment */\nString s = \"/* kept */ // kept\";\nchar k = 'x';\n",
    );
    assert!(!code.contains("line comment"), "{code}");
    assert!(!code.contains("block"), "{code}");
    assert!(code.contains("\"/* kept */ // kept\""), "{code}");
    assert!(code.contains("new $p.Character('x')"), "{code}");
}

#[test]
fn test_unbalanced_input_fails() {
    let result = compile("class A { void f() { }\n", &CompilerOptions::default());
    assert!(matches!(result, Err(CompileError::Scan(_))));
}

#[test]
fn test_directives_reach_the_caller() {
    let output = compile(
        "/* @pjs preload=\"a.png\"; */\nPImage img;\nvoid setup() { img = loadImage(\"a.png\"); }\n",
        &CompilerOptions::default(),
    )
    .expect("compiles");
    assert_eq!(output.directives.get("preload"), Some("a.png"));
    assert!(output.code.contains("img = $p.loadImage(\"a.png\");"), "{}", output.code);
}

#[test]
fn test_output_is_serializable() {
    let output = compile("/* @pjs crisp=true; */\nint x = 1;\n", &CompilerOptions::default())
        .expect("compiles");
    let json = serde_json::to_value(&output).expect("serializable");
    assert!(json["code"].as_str().is_some_and(|code| code.contains("var x = 1;")));
    assert_eq!(json["directives"][0]["key"], "crisp");
    assert_eq!(json["directives"][0]["value"], "true");
    assert!(json["diagnostics"].as_array().is_some_and(Vec::is_empty));
}
