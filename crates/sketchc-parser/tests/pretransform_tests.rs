use super::*;
use sketchc_scanner::{AtomTable, split_to_atoms};

/// Transform `source` as a single expression; returns the expanded text.
fn transform(source: &str) -> String {
    let mut atoms = split_to_atoms(source).expect("balanced");
    let top = atoms.top_level().to_string();
    let mut state = ParserState::new(&mut atoms);
    let expression = state.transform_expression(&top);
    assert!(
        state.diagnostics.is_empty(),
        "Unexpected diagnostics for {source:?}: {:?}",
        state.diagnostics
    );
    expression.text
}

fn pre_transform_only(atoms: &mut AtomTable) -> String {
    let top = atoms.top_level().to_string();
    let mut state = ParserState::new(atoms);
    state.pre_transform(&top)
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_sized_array_becomes_create_java_array() {
    assert_eq!(transform("new int[3]"), "$p.createJavaArray('int', [3])");
}

#[test]
fn test_unsized_dimensions_are_null() {
    assert_eq!(
        transform("new float[w][]"),
        "$p.createJavaArray('float', [w, null])"
    );
}

#[test]
fn test_array_initializer_drops_constructor() {
    assert_eq!(transform("new int[] {1, 2, 3}"), "[1, 2, 3]");
}

#[test]
fn test_nested_array_initializer() {
    assert_eq!(transform("{{1, 2}, {3}}"), "[[1, 2], [3]]");
}

#[test]
fn test_anonymous_class_is_moved_into_an_atom() {
    let mut atoms = split_to_atoms("r = new Runnable() { void run() { } }").expect("balanced");
    let before = atoms.len();
    let rewritten = pre_transform_only(&mut atoms);
    assert!(rewritten.starts_with("r = \"F"), "Got: {rewritten}");
    assert_eq!(atoms.len(), before + 1);
}

// =============================================================================
// Casts and conversions
// =============================================================================

#[test]
fn test_int_cast_becomes_call() {
    assert_eq!(transform("(int) values[i]").trim(), "__int_cast(values[i])");
}

#[test]
fn test_int_cast_stops_at_operator() {
    assert_eq!(transform("(int)x + 1"), "__int_cast(x) + 1");
}

#[test]
fn test_object_cast_is_removed() {
    assert_eq!(transform("(String) obj").trim(), "obj");
}

#[test]
fn test_array_type_cast_is_removed() {
    assert_eq!(transform("(float[]) data").trim(), "data");
}

#[test]
fn test_indexed_operand_is_not_an_array_cast() {
    // Only empty dimensions make `(Type[])` a cast; `(a[0])` is an element.
    assert_eq!(transform("(a[0]) b"), "(a[0]) b");
    assert_eq!(transform("(float[]) data").trim(), "data");
    assert_eq!(transform("(float[][]) grid").trim(), "grid");
}

#[test]
fn test_parenthesized_operand_is_not_a_cast() {
    assert_eq!(transform("(a) + b"), "(a) + b");
}

#[test]
fn test_call_arguments_are_not_a_cast() {
    assert_eq!(
        transform("list.get(i) instanceof Ball"),
        "__instanceof(list.get(i), Ball)"
    );
}

#[test]
fn test_primitive_conversion_calls() {
    assert_eq!(transform("int(s)"), "parseInt(s)");
    assert_eq!(transform("boolean(v)"), "parseBoolean(v)");
    assert_eq!(transform("float (x)"), "parseFloat(x)");
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_hex_color_gets_opaque_alpha() {
    assert_eq!(transform("#FFAA00"), "0xFFFFAA00");
}

#[test]
fn test_float_suffix_is_stripped() {
    assert_eq!(transform("3.0f * 2f"), "3.0 * 2");
}

#[test]
fn test_leading_zeros() {
    assert_eq!(transform("00.5"), "0.5");
    assert_eq!(transform("0010f"), "10");
    assert_eq!(transform("0010"), "0010");
    assert_eq!(transform("a + 0"), "a + 0");
}

#[test]
fn test_hex_literal_is_untouched() {
    assert_eq!(transform("0x00FF"), "0x00FF");
}

#[test]
fn test_modulo_gets_spaces() {
    assert_eq!(transform("a%b"), "a % b");
    assert_eq!(transform("a %= b"), "a %= b");
}

// =============================================================================
// Host names
// =============================================================================

#[test]
fn test_length_call_becomes_property() {
    assert_eq!(transform("name.length()"), "name.length");
}

#[test]
fn test_property_call_names_are_disambiguated() {
    assert_eq!(transform("frameRate"), "__frameRate");
    assert_eq!(
        transform("k = keyPressed && mousePressed"),
        "k = __keyPressed && __mousePressed"
    );
    assert_eq!(transform("frameRate(30)"), "frameRate(30)");
}

#[test]
fn test_pixels_sugar() {
    assert_eq!(transform("pixels[i] = c"), "pixels.setPixel(i,c)");
    assert_eq!(transform("x = pixels[i]"), "x = pixels.getPixel(i)");
    assert_eq!(transform("n = pixels.length"), "n = pixels.getLength()");
    assert_eq!(transform("pixels = other"), "pixels.set(other)");
    assert_eq!(transform("copy = pixels"), "copy = pixels.toArray()");
}

#[test]
fn test_pixel_comparison_is_a_read() {
    assert_eq!(transform("pixels[i] == c"), "pixels.getPixel(i) == c");
}

// =============================================================================
// Java method proxies and instanceof
// =============================================================================

#[test]
fn test_java_method_is_proxied() {
    assert_eq!(transform("s.equals(t)"), "__equals(s,t)");
    assert_eq!(transform("a.b.replace(x, y)"), "__replace(a.b,x, y)");
    assert_eq!(transform("s.hashCode()"), "__hashCode(s)");
}

#[test]
fn test_java_method_on_call_chain() {
    assert_eq!(
        transform("names.get(0).startsWith(p)"),
        "__startsWith(names.get(0),p)"
    );
}

#[test]
fn test_nested_java_methods() {
    assert_eq!(
        transform("a.equals(b.trim().split(c))"),
        "__equals(a,__split(b.trim(),c))"
    );
}

#[test]
fn test_longer_method_name_wins() {
    assert_eq!(transform("s.replaceAll(a, b)"), "__replaceAll(s,a, b)");
}

#[test]
fn test_instanceof() {
    assert_eq!(transform("shape instanceof Circle"), "__instanceof(shape, Circle)");
    assert_eq!(
        transform("ok = a && p.q instanceof geom.Shape"),
        "ok = a && __instanceof(p.q, geom.Shape)"
    );
}

// =============================================================================
// Constructor chaining
// =============================================================================

#[test]
fn test_super_and_this_calls() {
    assert_eq!(transform("super(x, y)"), "$superCstr(x, y)");
    assert_eq!(transform("super.draw()"), "$super.draw()");
    assert_eq!(transform("this(1)"), "$constr(1)");
    assert_eq!(transform("this.x"), "this.x");
}
