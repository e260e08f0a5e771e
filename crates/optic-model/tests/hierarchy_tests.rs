//! End-to-end checks of the descriptor model over an in-memory hierarchy.

use std::sync::Arc;

use optic_model::{
    FieldSpec, Introspector, Member, MethodSpec, TypeId, TypeModel, TypeSpec,
};

const OBJECT: TypeId = TypeId::new(0);
const NUMBER: TypeId = TypeId::new(1);
const INTEGER: TypeId = TypeId::new(2);
const INT: TypeId = TypeId::new(3);
const INT_ARRAY: TypeId = TypeId::new(4);
const SHAPE: TypeId = TypeId::new(5);
const CIRCLE: TypeId = TypeId::new(6);

fn intr() -> Introspector {
    let model = TypeModel::builder()
        .register(TypeSpec::new(OBJECT, "Object"))
        .register(TypeSpec::new(NUMBER, "Number").extends(OBJECT))
        .register(TypeSpec::new(INTEGER, "Integer").extends(NUMBER))
        .register(TypeSpec::new(INT, "int").primitive(INTEGER))
        .register(TypeSpec::new(INT_ARRAY, "int[]").array_of(INT))
        .register(
            TypeSpec::new(SHAPE, "Shape")
                .extends(OBJECT)
                .method(MethodSpec::new("area", INT)),
        )
        .register(
            TypeSpec::new(CIRCLE, "Circle")
                .extends(SHAPE)
                .field(FieldSpec::new("radius", INT))
                .method(MethodSpec::new("area", INT)),
        )
        .build();
    Introspector::new(Arc::new(model))
}

#[test]
fn ancestor_test_uses_native_assignability() {
    let intr = intr();
    let object = intr.wrap_type(OBJECT).unwrap();
    let circle = intr.wrap_type(CIRCLE).unwrap();

    assert!(object.is_ancestor_of(&intr, CIRCLE));
    assert!(circle.is_descendant_of(&intr, SHAPE));
    assert!(!circle.is_ancestor_of(&intr, SHAPE));
}

#[test]
fn primitive_ancestor_test_boxes_the_operand() {
    let intr = intr();
    let number = intr.wrap_type(NUMBER).unwrap();
    let shape = intr.wrap_type(SHAPE).unwrap();

    // int is not natively assignable to Number, but its boxed counterpart is.
    assert!(number.is_ancestor_of(&intr, INT));
    assert!(!shape.is_ancestor_of(&intr, INT));

    // The descendant direction takes the primitive as-is.
    let int = intr.wrap_type(INT).unwrap();
    assert!(!int.is_descendant_of(&intr, NUMBER));
}

#[test]
fn array_descriptor_exposes_component() {
    let intr = intr();
    let arr = intr.wrap_type(INT_ARRAY).unwrap();
    assert!(arr.is_array());
    assert_eq!(arr.component(), Some(INT));

    let int = intr.wrap_type(INT).unwrap();
    assert!(int.is_primitive());
    assert_eq!(int.boxed(), Some(INTEGER));
    assert!(!int.is_array());
}

#[test]
fn overriding_methods_are_distinct_members() {
    let intr = intr();
    let base = intr.declared_methods(SHAPE);
    let derived = intr.declared_methods(CIRCLE);
    assert_eq!(base[0].name(), "area");
    assert_eq!(derived[0].name(), "area");
    assert_ne!(base[0].id(), derived[0].id());
    assert_eq!(base[0].declaring_type(), Some(SHAPE));
    assert_eq!(derived[0].declaring_type(), Some(CIRCLE));
}
