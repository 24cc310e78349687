use opsdeck_types::prelude::*;

#[test]
fn role_marker_defaults_to_admin() {
    assert_eq!(Role::from_marker(None), Role::Admin);
    assert_eq!(Role::from_marker(Some("viewer")), Role::Viewer);
    assert_eq!(Role::from_marker(Some("garbage")), Role::Admin);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
}

#[test]
fn random_ids_are_unique() {
    assert_ne!(Id::new_random(), Id::new_random());
}
