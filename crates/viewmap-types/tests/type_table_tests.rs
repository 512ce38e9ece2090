use super::*;

#[test]
fn test_new_table_holds_root_object() {
    let table = TypeTable::new();

    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("object"), Some(TypeId::OBJECT));
    assert!(table.is_class(TypeId::OBJECT));
    assert_eq!(table.get(TypeId::OBJECT).and_then(TypeNode::parent), None);
}

#[test]
fn test_class_defaults_to_object_parent() {
    let mut table = TypeTable::new();
    let animal = table.intern(TypeDecl::class("Animal")).expect("interned");

    assert_eq!(
        table.get(animal).and_then(TypeNode::parent),
        Some(TypeId::OBJECT)
    );
}

#[test]
fn test_interning_is_idempotent() {
    let mut table = TypeTable::new();
    let a = table.intern(TypeDecl::class("Animal")).expect("interned");
    let b = table.intern(TypeDecl::class("Animal")).expect("interned again");

    assert_eq!(a, b);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_conflicting_redeclaration_rejected() {
    let mut table = TypeTable::new();
    let animal = table.intern(TypeDecl::class("Animal")).expect("interned");
    table
        .intern(TypeDecl::class("Dog").extends(animal))
        .expect("interned");

    let err = table
        .intern(TypeDecl::class("Dog"))
        .expect_err("different parent");
    assert_eq!(
        err,
        TypeTableError::Conflict {
            name: "Dog".to_string()
        }
    );
}

#[test]
fn test_unknown_and_misplaced_references() {
    let mut table = TypeTable::new();
    let iface = table.intern(TypeDecl::interface("IAnimal")).expect("interned");
    let class = table.intern(TypeDecl::class("Animal")).expect("interned");

    assert_eq!(
        table.intern(TypeDecl::class("Ghost").extends(TypeId(99))),
        Err(TypeTableError::UnknownType(TypeId(99)))
    );
    assert!(matches!(
        table.intern(TypeDecl::class("Dog").extends(iface)),
        Err(TypeTableError::ParentNotClass { .. })
    ));
    assert!(matches!(
        table.intern(TypeDecl::class("Cat").implements([class])),
        Err(TypeTableError::NotAnInterface { .. })
    ));
}

#[test]
fn test_capabilities_are_inherited() {
    let mut table = TypeTable::new();
    let view_model = table
        .intern(TypeDecl::interface("IViewModel").capabilities(TypeCapabilities::VIEW_MODEL))
        .expect("interned");
    let base = table
        .intern(TypeDecl::class("ViewModelBase").implements([view_model]))
        .expect("interned");
    let dog_vm = table
        .intern(TypeDecl::class("DogViewModel").extends(base))
        .expect("interned");
    let dog = table.intern(TypeDecl::class("Dog")).expect("interned");

    assert!(table.capabilities(dog_vm).contains(TypeCapabilities::VIEW_MODEL));
    assert!(table.capabilities(dog).is_empty());
    assert!(table.capabilities(TypeId(1234)).is_empty());
}

#[test]
fn test_class_chain_stops_before_root() {
    let mut table = TypeTable::new();
    let a = table.intern(TypeDecl::class("A")).expect("interned");
    let b = table.intern(TypeDecl::class("B").extends(a)).expect("interned");
    let c = table.intern(TypeDecl::class("C").extends(b)).expect("interned");

    let chain: Vec<TypeId> = table.class_chain(c).collect();
    assert_eq!(chain, vec![c, b, a]);
    assert_eq!(table.class_chain(TypeId::OBJECT).count(), 0);
}

#[test]
fn test_interface_list_keeps_declaration_order() {
    let mut table = TypeTable::new();
    let i1 = table.intern(TypeDecl::interface("I1")).expect("interned");
    let i2 = table.intern(TypeDecl::interface("I2")).expect("interned");
    let node = table
        .intern(TypeDecl::class("Both").implements([i2, i1, i2]))
        .expect("interned");

    assert_eq!(table.get(node).map(TypeNode::interfaces), Some(&[i2, i1][..]));
}
