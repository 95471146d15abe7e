//! Linking and weighting over registries built by the extractor.

use sketchc_binder::resolve;
use sketchc_parser::{ClassId, ClassRegistry, parse};
use sketchc_scanner::{erase_generics, mask_source, split_to_atoms};

fn registry_for(source: &str) -> ClassRegistry {
    let masked = mask_source(source);
    let erased = erase_generics(&masked.text);
    let mut atoms = split_to_atoms(&erased.text).expect("balanced");
    parse(&mut atoms).registry
}

fn id_of(registry: &ClassRegistry, name: &str) -> ClassId {
    registry
        .iter()
        .find(|(_, class)| class.name == name)
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("class {name} not declared"))
}

#[test]
fn test_three_level_hierarchy_renders_bases_first() {
    let mut registry = registry_for(
        "class Cupcake extends Cake { }\n\
         class Cake extends Dessert { }\n\
         class Dessert { }",
    );
    let diagnostics = resolve(&mut registry);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let weight = |name: &str| registry.weight(id_of(&registry, name));
    assert_eq!(weight("Cupcake"), 0);
    assert_eq!(weight("Cake"), 1);
    assert_eq!(weight("Dessert"), 2);
}

#[test]
fn test_inner_class_extends_sibling() {
    let mut registry = registry_for(
        "class Zoo {\n\
           class Animal { }\n\
           class Cat extends Animal { }\n\
         }",
    );
    resolve(&mut registry);
    let animal = id_of(&registry, "Animal");
    let cat = id_of(&registry, "Cat");
    let zoo = id_of(&registry, "Zoo");
    assert_eq!(registry.get(cat).and_then(|c| c.base), Some(animal));
    assert_eq!(registry.get(zoo).map(|c| c.children.clone()), Some(vec![animal, cat]));
    assert!(registry.weight(animal) > registry.weight(cat));
    assert!(registry.weight(zoo) > registry.weight(animal));
}

#[test]
fn test_anonymous_class_links_its_interface() {
    let mut registry = registry_for(
        "interface Action { void run(); }\n\
         Action a = new Action() { void run() { } };",
    );
    let diagnostics = resolve(&mut registry);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let action = id_of(&registry, "Action");
    let inline = id_of(&registry, "Action$class2");
    assert_eq!(registry.get(inline).map(|c| c.interfaces.clone()), Some(vec![Some(action)]));
    assert_eq!(registry.weight(action), 1);
}

#[test]
fn test_runtime_base_is_only_a_message() {
    let mut registry = registry_for("class Particle extends PVector { }");
    let diagnostics = resolve(&mut registry);
    assert_eq!(diagnostics.len(), 1);
    assert!(!diagnostics[0].is_error());
}
