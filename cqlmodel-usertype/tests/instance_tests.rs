use cqlmodel_columns::{ColumnError, Double, Integer, List, Map, Set, Text, UuidColumn};
use cqlmodel_types::Value;
use cqlmodel_usertype::{
    UnknownFieldPolicy, UserDefinedType, UserTypeDefinition, UserTypeError, UserTypeInstance,
};
use pretty_assertions::assert_eq;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

fn address() -> Arc<UserTypeDefinition> {
    UserTypeDefinition::builder("Address")
        .field("street", Text::new().required(true))
        .field("city", Text::new())
        .field("zipcode", Integer::new().db_field("zip"))
        .field("floor", Integer::new().default_value(Value::Int(7)))
        .build()
        .unwrap()
}

fn hash_of(instance: &UserTypeInstance) -> u64 {
    let mut h = DefaultHasher::new();
    instance.hash(&mut h);
    h.finish()
}

fn no_values() -> Vec<(&'static str, Option<Value>)> {
    Vec::new()
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn every_declared_field_gets_a_manager() {
    let def = address();
    let instance = UserTypeInstance::new(&def, no_values()).unwrap();
    let names: Vec<&str> = instance.iter_values().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["street", "city", "zipcode", "floor"]);
    assert!(instance.iter_values().all(|(_, v)| v.is_none()));
}

#[test]
fn supplied_values_go_through_conversion() {
    let def = address();
    let instance = UserTypeInstance::new(&def, [("zipcode", Some(Value::from("12345")))]).unwrap();
    assert_eq!(instance.get("zipcode").unwrap(), Some(&Value::Int(12345)));
}

#[test]
fn conversion_errors_propagate_unchanged() {
    let def = address();
    let err = UserTypeInstance::new(&def, [("zipcode", Some(Value::from("abc")))]).unwrap_err();
    match err {
        UserTypeError::Column(ColumnError::Conversion { column, .. }) => {
            assert_eq!(column, "zipcode");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[test]
fn explicit_none_is_explicit() {
    let def = address();
    let instance = UserTypeInstance::new(&def, [("city", None)]).unwrap();
    assert!(instance.is_explicit("city").unwrap());
    assert_eq!(instance.get("city").unwrap(), None);
}

#[test]
fn missing_key_is_not_explicit() {
    let def = address();
    let instance = UserTypeInstance::new(&def, [("street", Some("Main".into()))]).unwrap();
    assert!(instance.is_explicit("street").unwrap());
    assert!(!instance.is_explicit("city").unwrap());
}

#[test]
fn unknown_key_rejected_by_default() {
    let def = address();
    let err = UserTypeInstance::new(&def, [("planet", Some("Earth".into()))]).unwrap_err();
    match err {
        UserTypeError::UnknownField { type_name, field } => {
            assert_eq!(type_name, "address");
            assert_eq!(field, "planet");
        }
        other => panic!("expected unknown field, got {other:?}"),
    }
}

#[test]
fn unknown_key_ignored_when_permissive() {
    let def = UserTypeDefinition::builder("Loose")
        .field("a", Text::new())
        .unknown_fields(UnknownFieldPolicy::Ignore)
        .build()
        .unwrap();
    let instance =
        UserTypeInstance::new(&def, [("a", Some("x".into())), ("b", Some("y".into()))]).unwrap();
    assert_eq!(instance.get("a").unwrap(), Some(&Value::from("x")));
    assert!(instance.get("b").is_err());
}

#[test]
fn containers_start_empty_even_when_absent() {
    let def = UserTypeDefinition::builder("Bag")
        .field("items", List::new(Integer::new()))
        .field("tags", Set::new(Text::new()))
        .field("attrs", Map::new(Text::new(), Text::new()))
        .build()
        .unwrap();

    let instance = UserTypeInstance::new(&def, [("tags", None)]).unwrap();
    assert_eq!(instance.get("items").unwrap(), Some(&Value::List(vec![])));
    assert_eq!(instance.get("tags").unwrap(), Some(&Value::Set(vec![])));
    assert_eq!(instance.get("attrs").unwrap(), Some(&Value::Map(vec![])));
    assert!(instance.is_explicit("tags").unwrap());
    assert!(!instance.is_explicit("items").unwrap());
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn set_assigns_without_validation() {
    let def = address();
    let mut instance = UserTypeInstance::new(&def, no_values()).unwrap();
    instance.set("zipcode", Some("not a number".into())).unwrap();
    assert_eq!(instance.get("zipcode").unwrap(), Some(&Value::from("not a number")));
}

#[test]
fn accessors_reject_unknown_names() {
    let def = address();
    let mut instance = UserTypeInstance::new(&def, no_values()).unwrap();
    assert!(instance.get("nope").is_err());
    assert!(instance.set("nope", None).is_err());
    assert!(instance.is_explicit("nope").is_err());
    assert!(instance.value_manager("nope").is_err());
}

#[test]
fn changed_fields_tracks_assignments() {
    let def = address();
    let mut instance = UserTypeInstance::new(&def, [("city", Some("Oslo".into()))]).unwrap();
    assert!(instance.changed_fields().is_empty());
    instance.set("city", Some("Bergen".into())).unwrap();
    assert_eq!(instance.changed_fields(), vec!["city"]);
    assert_eq!(
        instance.value_manager("city").unwrap().previous_value(),
        Some(&Value::from("Oslo"))
    );
}

#[test]
fn mark_persisted_resets_change_tracking() {
    let def = address();
    let mut instance = UserTypeInstance::new(&def, [("street", Some("Main".into()))]).unwrap();
    instance.validate().unwrap();
    assert_eq!(instance.changed_fields(), vec!["floor"]);

    instance.mark_persisted();
    assert!(instance.changed_fields().is_empty());
    assert_eq!(
        instance.value_manager("floor").unwrap().previous_value(),
        Some(&Value::Int(7))
    );

    instance.set("city", Some("Oslo".into())).unwrap();
    assert_eq!(instance.changed_fields(), vec!["city"]);
}

#[test]
fn type_name_delegates_to_definition() {
    let def = address();
    let instance = UserTypeInstance::new(&def, no_values()).unwrap();
    assert_eq!(instance.type_name(), "address");
    assert!(Arc::ptr_eq(instance.definition(), &def));
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn validate_applies_defaults() {
    let def = address();
    let mut instance = UserTypeInstance::new(&def, [("street", Some("Main".into()))]).unwrap();
    assert_eq!(instance.get("floor").unwrap(), None);
    instance.validate().unwrap();
    assert_eq!(instance.get("floor").unwrap(), Some(&Value::Int(7)));
}

#[test]
fn explicit_none_suppresses_default() {
    let def = address();
    let mut instance =
        UserTypeInstance::new(&def, [("street", Some("Main".into())), ("floor", None)]).unwrap();
    instance.validate().unwrap();
    assert_eq!(instance.get("floor").unwrap(), None);
}

#[test]
fn validate_normalizes_values() {
    let def = address();
    let mut instance = UserTypeInstance::new(&def, [("street", Some("Main".into()))]).unwrap();
    instance.set("zipcode", Some(Value::BigInt(90210))).unwrap();
    instance.validate().unwrap();
    assert_eq!(instance.get("zipcode").unwrap(), Some(&Value::Int(90210)));
}

#[test]
fn validate_fails_fast() {
    let def = address();
    let mut instance = UserTypeInstance::new(&def, no_values()).unwrap();
    instance.set("zipcode", Some(Value::BigInt(1))).unwrap();

    let err = instance.validate().unwrap_err();
    match err {
        UserTypeError::Column(ColumnError::Validation { column, .. }) => {
            assert_eq!(column, "street");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    // Later fields were not normalized or defaulted.
    assert_eq!(instance.get("zipcode").unwrap(), Some(&Value::BigInt(1)));
    assert_eq!(instance.get("floor").unwrap(), None);
}

#[test]
fn callable_default_generates_per_instance() {
    let def = UserTypeDefinition::builder("Tagged")
        .field("id", UuidColumn::random_default())
        .build()
        .unwrap();
    let mut a = UserTypeInstance::new(&def, no_values()).unwrap();
    let mut b = UserTypeInstance::new(&def, no_values()).unwrap();
    a.validate().unwrap();
    b.validate().unwrap();
    assert!(a.get("id").unwrap().is_some());
    assert_ne!(a.get("id").unwrap(), b.get("id").unwrap());
}

#[test]
fn round_trip_explicit_default_and_absent() {
    let def = address();
    let mut instance = UserTypeInstance::new(
        &def,
        [("street", Some("Main".into())), ("zipcode", Some(Value::BigInt(5)))],
    )
    .unwrap();
    instance.validate().unwrap();

    assert_eq!(instance.get("street").unwrap(), Some(&Value::from("Main")));
    assert_eq!(instance.get("zipcode").unwrap(), Some(&Value::Int(5)));
    assert_eq!(instance.get("floor").unwrap(), Some(&Value::Int(7)));
    assert_eq!(instance.get("city").unwrap(), None);
}

// ── Equality and hashing ─────────────────────────────────────────

#[test]
fn same_values_are_equal() {
    let def = address();
    let a = UserTypeInstance::new(&def, [("street", Some("Main".into()))]).unwrap();
    let b = UserTypeInstance::new(&def, [("street", Some("Main".into()))]).unwrap();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn explicitness_does_not_affect_equality() {
    let def = address();
    let a = UserTypeInstance::new(&def, [("city", None)]).unwrap();
    let b = UserTypeInstance::new(&def, no_values()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn any_changed_field_breaks_equality() {
    let def = address();
    let a = UserTypeInstance::new(&def, [("street", Some("Main".into()))]).unwrap();
    let mut b = a.clone();
    assert_eq!(a, b);
    b.set("city", Some("Oslo".into())).unwrap();
    assert_ne!(a, b);
}

#[test]
fn different_types_with_same_shape_are_unequal() {
    let first = UserTypeDefinition::builder("Point")
        .field("x", Integer::new())
        .build()
        .unwrap();
    let second = UserTypeDefinition::builder("Point")
        .field("x", Integer::new())
        .build()
        .unwrap();

    let a = UserTypeInstance::new(&first, [("x", Some(Value::Int(1)))]).unwrap();
    let b = UserTypeInstance::new(&second, [("x", Some(Value::Int(1)))]).unwrap();
    assert_ne!(a, b);
    assert_ne!(b, a);
}

#[test]
fn signed_zero_doubles_are_equal() {
    let def = UserTypeDefinition::builder("Reading")
        .field("x", Double::new())
        .build()
        .unwrap();
    let a = UserTypeInstance::new(&def, [("x", Some(Value::Double(0.0)))]).unwrap();
    let b = UserTypeInstance::new(&def, [("x", Some(Value::Double(-0.0)))]).unwrap();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn instances_usable_as_set_keys() {
    let def = address();
    let mut set = HashSet::new();
    set.insert(UserTypeInstance::new(&def, [("city", Some("Oslo".into()))]).unwrap());
    set.insert(UserTypeInstance::new(&def, [("city", Some("Oslo".into()))]).unwrap());
    set.insert(UserTypeInstance::new(&def, [("city", Some("Rome".into()))]).unwrap());
    assert_eq!(set.len(), 2);
}

// ── Wire representation ──────────────────────────────────────────

#[test]
fn to_wire_uses_db_field_names() {
    let def = address();
    let instance = UserTypeInstance::new(
        &def,
        [("street", Some("Main".into())), ("zipcode", Some(Value::Int(1)))],
    )
    .unwrap();
    assert_eq!(
        instance.to_wire(),
        vec![
            ("street".to_string(), Some(Value::from("Main"))),
            ("city".to_string(), None),
            ("zip".to_string(), Some(Value::Int(1))),
            ("floor".to_string(), None),
        ]
    );
}

#[test]
fn from_wire_translates_back() {
    let def = address();
    let row = vec![
        ("street".to_string(), Some(Value::from("Main"))),
        ("zip".to_string(), Some(Value::Int(9))),
    ];
    let instance = UserTypeInstance::from_wire(&def, row).unwrap();
    assert_eq!(instance.get("zipcode").unwrap(), Some(&Value::Int(9)));
    assert!(instance.is_explicit("zipcode").unwrap());
}

#[test]
fn from_wire_rejects_declared_name_used_as_wire_name() {
    let def = address();
    let row = vec![("zipcode".to_string(), Some(Value::Int(9)))];
    assert!(matches!(
        UserTypeInstance::from_wire(&def, row),
        Err(UserTypeError::UnknownField { .. })
    ));
}

// ── Nested user types ────────────────────────────────────────────

fn person(address: &Arc<UserTypeDefinition>) -> Arc<UserTypeDefinition> {
    UserTypeDefinition::builder("Person")
        .field("name", Text::new())
        .field("home", UserDefinedType::new(address))
        .build()
        .unwrap()
}

#[test]
fn nested_type_converts_rows() {
    let address = address();
    let person = person(&address);
    let row = Value::Udt(vec![
        ("street".to_string(), Some("Main".into())),
        ("zip".to_string(), Some(Value::from("42"))),
    ]);
    let instance = UserTypeInstance::new(&person, [("home", Some(row))]).unwrap();

    let home = instance.get("home").unwrap().unwrap();
    let home = UserTypeInstance::from_wire(&address, home.as_udt().unwrap().to_vec()).unwrap();
    assert_eq!(home.get("zipcode").unwrap(), Some(&Value::Int(42)));
}

#[test]
fn nested_validation_applies_inner_defaults() {
    let address = address();
    let person = person(&address);
    let row = Value::Udt(vec![("street".to_string(), Some("Main".into()))]);
    let mut instance = UserTypeInstance::new(&person, [("home", Some(row))]).unwrap();
    instance.validate().unwrap();

    let home = instance.get("home").unwrap().unwrap().as_udt().unwrap();
    let floor = home.iter().find(|(name, _)| name == "floor").unwrap();
    assert_eq!(floor.1, Some(Value::Int(7)));
}

#[test]
fn nested_conversion_keeps_only_supplied_fields() {
    let address = address();
    let person = person(&address);
    let row = Value::Udt(vec![("street".to_string(), Some("Main".into()))]);
    let instance = UserTypeInstance::new(&person, [("home", Some(row))]).unwrap();

    assert_eq!(
        instance.get("home").unwrap(),
        Some(&Value::Udt(vec![("street".to_string(), Some("Main".into()))]))
    );
}

#[test]
fn nested_explicit_none_suppresses_inner_default() {
    let address = address();
    let person = person(&address);
    let row = Value::Udt(vec![
        ("street".to_string(), Some("Main".into())),
        ("floor".to_string(), None),
    ]);
    let mut instance = UserTypeInstance::new(&person, [("home", Some(row))]).unwrap();
    instance.validate().unwrap();

    let home = instance.get("home").unwrap().unwrap().as_udt().unwrap();
    let floor = home.iter().find(|(name, _)| name == "floor").unwrap();
    assert_eq!(floor.1, None);
}

#[test]
fn nested_validation_errors_pass_through() {
    let address = address();
    let person = person(&address);
    let row = Value::Udt(vec![("city".to_string(), Some("Oslo".into()))]);
    let mut instance = UserTypeInstance::new(&person, [("home", Some(row))]).unwrap();

    let err = instance.validate().unwrap_err();
    match err {
        UserTypeError::Column(ColumnError::Validation { column, .. }) => {
            assert_eq!(column, "street");
        }
        other => panic!("expected nested validation error, got {other:?}"),
    }
}

#[test]
fn nested_type_rejects_scalars() {
    let address = address();
    let person = person(&address);
    let err = UserTypeInstance::new(&person, [("home", Some(Value::Int(1)))]).unwrap_err();
    match err {
        UserTypeError::Column(ColumnError::Conversion { column, .. }) => {
            assert_eq!(column, "home");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}
