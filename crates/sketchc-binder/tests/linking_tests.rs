use super::*;
use sketchc_parser::{ClassRegistry, DeclaredClass};

fn declare(
    registry: &mut ClassRegistry,
    name: &str,
    kind: ClassKind,
    scope: Option<ClassId>,
    base: Option<&str>,
) -> ClassId {
    let mut class = DeclaredClass::new(name, kind, scope);
    class.base_name = base.map(str::to_string);
    registry.declare(class)
}

#[test]
fn test_children_and_named_children() {
    let mut registry = ClassRegistry::new();
    let outer = declare(&mut registry, "Outer", ClassKind::Class, None, None);
    let inner = declare(&mut registry, "Inner", ClassKind::Class, Some(outer), None);
    let anon = declare(&mut registry, "Runnable$class3", ClassKind::Inline, Some(outer), None);

    let mut binder = BinderState::new(&mut registry);
    binder.link();
    assert!(binder.diagnostics().is_empty());

    let outer_class = registry.get(outer).expect("declared");
    assert_eq!(outer_class.children, [inner, anon]);
    assert_eq!(outer_class.named_children.get("Inner"), Some(&inner));
    assert!(!outer_class.named_children.contains_key("Runnable$class3"));
}

#[test]
fn test_base_resolves_through_enclosing_scope_first() {
    let mut registry = ClassRegistry::new();
    let global_node = declare(&mut registry, "Node", ClassKind::Class, None, None);
    let tree = declare(&mut registry, "Tree", ClassKind::Class, None, None);
    let local_node = declare(&mut registry, "Node", ClassKind::Class, Some(tree), None);
    let leaf = declare(&mut registry, "Leaf", ClassKind::Class, Some(tree), Some("Node"));
    let other = declare(&mut registry, "Other", ClassKind::Class, None, Some("Node"));

    let mut binder = BinderState::new(&mut registry);
    binder.link();

    assert_eq!(registry.get(leaf).and_then(|c| c.base), Some(local_node));
    assert_eq!(registry.get(other).and_then(|c| c.base), Some(global_node));
    assert_eq!(registry.get(local_node).map(|c| c.derived.clone()), Some(vec![leaf]));
}

#[test]
fn test_dotted_name_walks_named_children() {
    let mut registry = ClassRegistry::new();
    let shapes = declare(&mut registry, "Shapes", ClassKind::Class, None, None);
    let circle = declare(&mut registry, "Circle", ClassKind::Class, Some(shapes), None);
    let ring = declare(&mut registry, "Ring", ClassKind::Class, None, Some("Shapes.Circle"));

    let mut binder = BinderState::new(&mut registry);
    binder.link();
    assert_eq!(registry.get(ring).and_then(|c| c.base), Some(circle));
}

#[test]
fn test_interfaces_keep_unresolved_slots() {
    let mut registry = ClassRegistry::new();
    let drawable = declare(&mut registry, "Drawable", ClassKind::Interface, None, None);
    let mut sprite = DeclaredClass::new("Sprite", ClassKind::Class, None);
    sprite.interface_names = vec!["Drawable".into(), "Comparable".into()];
    let sprite = registry.declare(sprite);

    let mut binder = BinderState::new(&mut registry);
    binder.link();
    let codes: Vec<u32> = binder.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [diagnostic_codes::UNRESOLVED_BASE]);

    let sprite = registry.get(sprite).expect("declared");
    assert_eq!(sprite.interfaces, [Some(drawable), None]);
    assert_eq!(registry.get(drawable).map(|c| c.derived.len()), Some(1));
}

#[test]
fn test_unresolved_base_is_a_message() {
    let mut registry = ClassRegistry::new();
    let ball = declare(&mut registry, "Ball", ClassKind::Class, None, Some("PVector"));

    let mut binder = BinderState::new(&mut registry);
    binder.link();
    let diagnostics = binder.into_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(!diagnostics[0].is_error());
    assert!(diagnostics[0].message_text.contains("'PVector' referenced by 'Ball'"));
    assert!(registry.get(ball).and_then(|c| c.base).is_none());
}
