use super::*;
use sketchc_parser::ast::Param;
use sketchc_parser::parse;
use sketchc_scanner::{erase_generics, mask_source, split_to_atoms};

fn params(names: &[&str], rest: Option<&str>) -> Params {
    Params {
        params: names
            .iter()
            .map(|name| Param {
                name: (*name).to_string(),
            })
            .collect(),
        rest: rest.map(|name| Param {
            name: name.to_string(),
        }),
    }
}

#[test]
fn test_empty_root() {
    let registry = ClassRegistry::new();
    let host = HostMembers::standard();
    let mut printer = Printer::new(&registry, &host);
    assert_eq!(
        printer.print_root(&Root::default()),
        "// this code was autogenerated from PJS\n(function($p) {\n\n\n})"
    );
}

#[test]
fn test_header_can_be_disabled() {
    let registry = ClassRegistry::new();
    let host = HostMembers::standard();
    let mut printer = Printer::new(&registry, &host).with_options(PrintOptions {
        autogenerated_header: false,
    });
    assert_eq!(printer.print_root(&Root::default()), "(function($p) {\n\n\n})");
}

#[test]
fn test_classes_precede_statements_heaviest_first() {
    let masked = mask_source("int n = 1;\nclass A extends B { }\nclass B { }\n");
    let erased = erase_generics(&masked.text);
    let mut atoms = split_to_atoms(&erased.text).expect("balanced");
    let mut parsed = parse(&mut atoms);
    sketchc_binder::resolve(&mut parsed.registry);

    let host = HostMembers::standard();
    let mut printer = Printer::new(&parsed.registry, &host);
    let out = printer.print_root(&parsed.root);

    let b = out.find("var B = ").expect("B rendered");
    let a = out.find("var A = ").expect("A rendered");
    let n = out.find("var n = 1").expect("statement rendered");
    assert!(b < a, "base before derived: {out}");
    assert!(a < n, "classes before statements: {out}");
}

#[test]
fn test_params_list_skips_rest() {
    assert_eq!(params_list(&params(&[], None)), "()");
    assert_eq!(params_list(&params(&["a", "b"], Some("rest"))), "(a, b)");
}

#[test]
fn test_rest_param_prologue() {
    let body = with_rest_param(&params(&["a"], Some("more")), "{\nf();\n}".to_string());
    assert_eq!(
        body,
        "{\nvar more = Array.prototype.slice.call(arguments, 1);\n\nf();\n}"
    );
    let plain = with_rest_param(&params(&["a"], None), "{\nf();\n}".to_string());
    assert_eq!(plain, "{\nf();\n}");
}

#[test]
fn test_iterator_ids_count_up() {
    let registry = ClassRegistry::new();
    let host = HostMembers::standard();
    let mut printer = Printer::new(&registry, &host);
    assert_eq!(printer.next_iterator_id(), "$it0");
    assert_eq!(printer.next_iterator_id(), "$it1");
}
