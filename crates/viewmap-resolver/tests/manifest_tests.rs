use super::*;
use crate::PrefabRef;
use crate::test_fixtures::*;

fn expect_invalid(manifest: &MappingManifest) -> InvalidManifestError {
    validate_manifest(manifest).expect_err("manifest should be rejected")
}

#[test]
fn test_fixture_manifest_is_valid() {
    let zoo = Zoo::new();
    assert_eq!(validate_manifest(&zoo.manifest()), Ok(()));
}

#[test]
fn test_empty_manifest_is_valid() {
    let zoo = Zoo::new();
    let manifest = zoo.builder().build();

    assert_eq!(validate_manifest(&manifest), Ok(()));
    assert!(manifest.models_to_view_models().is_empty());
}

#[test]
fn test_builder_keeps_registration_order() {
    let zoo = Zoo::new();
    let manifest = zoo
        .builder()
        .model_to_view_model(TypeMapping::new(zoo.dog, zoo.dog_vm))
        .model_to_view_model(TypeMapping::new(zoo.cat, zoo.cat_vm))
        .model_to_view_model(TypeMapping::new(zoo.animal, zoo.animal_vm))
        .build();

    let sources: Vec<TypeId> = manifest
        .models_to_view_models()
        .iter()
        .map(|mapping| mapping.source)
        .collect();
    assert_eq!(sources, vec![zoo.dog, zoo.cat, zoo.animal]);
}

#[test]
fn test_unknown_type_is_reported_with_position() {
    let zoo = Zoo::new();
    let manifest = zoo
        .builder()
        .model_to_view_model(TypeMapping::new(zoo.dog, zoo.dog_vm))
        .model_to_view_model(TypeMapping::new(TypeId(777), zoo.dog_vm))
        .build();

    let err = expect_invalid(&manifest);

    assert_eq!(err.list, ManifestList::ModelsToViewModels);
    assert_eq!(err.index, 1);
    assert_eq!(err.reason, InvalidEntry::UnresolvedType(TypeId(777)));
    assert_eq!(
        err.to_string(),
        "invalid manifest entry models_to_view_models[1]: type #777 did not resolve"
    );
}

#[test]
fn test_root_object_cannot_be_mapped() {
    let zoo = Zoo::new();
    let manifest = zoo
        .builder()
        .view_model_to_view(TypeMapping::new(TypeId::OBJECT, zoo.dog_view))
        .build();

    let err = expect_invalid(&manifest);

    assert_eq!(err.list, ManifestList::ViewModelsToViews);
    assert_eq!(err.reason, InvalidEntry::RootObject);
}

#[test]
fn test_prefab_entries_are_checked() {
    let zoo = Zoo::new();

    let empty_prefab = zoo
        .builder()
        .view_to_prefab(PrefabMapping::new(zoo.dog_view, PrefabRef::new("")))
        .build();
    let err = expect_invalid(&empty_prefab);
    assert_eq!(err.list, ManifestList::ViewsToPrefabs);
    assert_eq!(err.reason, InvalidEntry::EmptyPrefab);

    let unknown_view = zoo
        .builder()
        .view_to_prefab(PrefabMapping::new(zoo.dog_view, PrefabRef::new("ok")))
        .view_to_prefab(PrefabMapping::new(TypeId(555), PrefabRef::new("lost")))
        .build();
    let err = expect_invalid(&unknown_view);
    assert_eq!(err.index, 1);
    assert_eq!(err.reason, InvalidEntry::UnresolvedType(TypeId(555)));
}

#[test]
fn test_contradictory_explicit_variants_are_rejected() {
    let zoo = Zoo::new();
    let both: VariantSet = [fast(), slow()].into_iter().collect();
    let manifest = zoo
        .builder()
        .model_to_view_model(TypeMapping::new(zoo.dog, zoo.dog_vm).with_variants(both))
        .build();

    let err = expect_invalid(&manifest);

    match err.reason {
        InvalidEntry::AmbiguousVariants(ambiguous) => {
            assert_eq!(ambiguous.group, speed());
        }
        other => panic!("unexpected reason: {other:?}"),
    }
}

#[test]
fn test_first_invalid_entry_wins() {
    let zoo = Zoo::new();
    let manifest = zoo
        .builder()
        .view_to_prefab(PrefabMapping::new(zoo.dog_view, PrefabRef::new("")))
        .view_model_to_view(TypeMapping::new(zoo.dog_vm, TypeId(999)))
        .build();

    let err = expect_invalid(&manifest);

    // Type lists are checked before prefab lists.
    assert_eq!(err.list, ManifestList::ViewModelsToViews);
}
