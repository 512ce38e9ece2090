//! Integration tests for the viewmap resolver
//!
//! These tests drive the public API end to end:
//! - Interning a type model
//! - Building and validating a manifest
//! - Loading resolver configuration from disk
//! - Resolving with and without the shared solution cache

use rayon::prelude::*;
use std::io::Write;
use std::sync::Arc;
use viewmap::{
    MappingManifest, PrefabMapping, PrefabRef, Problem, ResolverConfig, Resolve, SolutionSet,
    TypeCapabilities, TypeDecl, TypeId, TypeMapping, TypeTable, VariantGroup, VariantSet,
    build_resolver,
};

struct Shop {
    manifest: Arc<MappingManifest>,
    product: TypeId,
    book: TypeId,
    product_vm: TypeId,
    book_vm: TypeId,
}

/// Products render through a generic card; books have their own card, with a
/// compact variant for phones.
fn shop() -> Shop {
    let mut types = TypeTable::new();
    let mut intern = |decl: TypeDecl| types.intern(decl).expect("type interns");

    let i_view_model =
        intern(TypeDecl::interface("IViewModel").capabilities(TypeCapabilities::VIEW_MODEL));
    let i_view = intern(TypeDecl::interface("IView").capabilities(TypeCapabilities::VIEW));
    let product = intern(TypeDecl::class("Product").capabilities(TypeCapabilities::MODEL));
    let book = intern(TypeDecl::class("Book").extends(product));
    let product_vm = intern(TypeDecl::class("ProductViewModel").implements([i_view_model]));
    let book_vm = intern(TypeDecl::class("BookViewModel").implements([i_view_model]));
    let product_view = intern(TypeDecl::class("ProductCard").implements([i_view]));
    let book_view = intern(TypeDecl::class("BookCard").implements([i_view]));

    let manifest = MappingManifest::builder(Arc::new(types))
        .model_to_view_model(TypeMapping::new(product, product_vm))
        .model_to_view_model(TypeMapping::new(book, book_vm))
        .view_model_to_view(TypeMapping::new(product_vm, product_view))
        .view_model_to_view(TypeMapping::new(book_vm, book_view))
        .view_to_prefab(PrefabMapping::new(product_view, PrefabRef::new("cards/product")))
        .view_to_prefab(PrefabMapping::new(book_view, PrefabRef::new("cards/book")))
        .view_to_prefab(
            PrefabMapping::new(book_view, PrefabRef::new("cards/book-compact"))
                .with_variants(compact()),
        )
        .build();

    Shop {
        manifest: Arc::new(manifest),
        product,
        book,
        product_vm,
        book_vm,
    }
}

fn compact() -> VariantSet {
    VariantSet::exclusive([VariantGroup::new("Density").variant("Compact")])
        .expect("single variant")
}

fn prefab_of(resolver: &dyn Resolve, problem: &Problem) -> String {
    resolver
        .resolve(problem)
        .expect("resolves")
        .expect("has type")
        .prefab
        .to_string()
}

#[test]
fn test_config_file_drives_weights_and_cache() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{ "weights": {{ "excessVariantPenalty": 5 }}, "cache": {{ "enabled": true }} }}"#
    )
    .expect("write config");

    let config = ResolverConfig::from_path(file.path()).expect("config loads");

    assert_eq!(config.weights.excess_variant_penalty, 5);
    assert!(config.cache.enabled);
}

#[test]
fn test_missing_config_file_names_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");

    let err = ResolverConfig::from_path(&path).expect_err("file does not exist");

    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_end_to_end_resolution_with_cache() {
    let shop = shop();
    let solutions = SolutionSet::shared();
    let resolver = build_resolver(
        &ResolverConfig::default(),
        Arc::clone(&shop.manifest),
        Arc::clone(&solutions),
    )
    .expect("resolver builds");

    let book = Problem::plain(shop.book);
    let compact_book = Problem::new(shop.book, compact()).expect("exclusive");
    let product = Problem::plain(shop.product);

    assert_eq!(prefab_of(&*resolver, &book), "cards/book");
    assert_eq!(prefab_of(&*resolver, &compact_book), "cards/book-compact");
    assert_eq!(prefab_of(&*resolver, &product), "cards/product");
    assert_eq!(solutions.len(), 3);

    let solution = solutions.get(&book).expect("cached");
    assert_eq!(solution.view_model, shop.book_vm);
    assert_eq!(solution.model, Some(shop.book));
}

#[test]
fn test_uncached_resolver_leaves_set_untouched() {
    let shop = shop();
    let solutions = SolutionSet::shared();
    let config = ResolverConfig::from_json_str(r#"{ "cache": { "enabled": false } }"#)
        .expect("config is valid");
    let resolver = build_resolver(&config, Arc::clone(&shop.manifest), Arc::clone(&solutions))
        .expect("resolver builds");

    let first = resolver
        .resolve(&Problem::plain(shop.product))
        .expect("resolves")
        .expect("has type");
    let second = resolver
        .resolve(&Problem::plain(shop.product))
        .expect("resolves")
        .expect("has type");

    assert!(solutions.is_empty());
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(first.same_resolution(&second));
    assert_eq!(first.view_model, shop.product_vm);
}

#[test]
fn test_invalid_manifest_fails_build() {
    let shop = shop();
    let broken = MappingManifest::builder(Arc::new(TypeTable::new()))
        .model_to_view_model(TypeMapping::new(shop.product, shop.product_vm))
        .build();

    let err = match build_resolver(
        &ResolverConfig::default(),
        Arc::new(broken),
        SolutionSet::shared(),
    ) {
        Ok(_) => panic!("manifest refers to types outside its table"),
        Err(err) => err,
    };

    assert!(format!("{err:#}").contains("models_to_view_models[0]"));
}

#[test]
fn test_solution_serializes_for_diagnostics() {
    let shop = shop();
    let resolver = build_resolver(
        &ResolverConfig::default(),
        Arc::clone(&shop.manifest),
        SolutionSet::shared(),
    )
    .expect("resolver builds");
    let solution = resolver
        .resolve(&Problem::new(shop.book, compact()).expect("exclusive"))
        .expect("resolves")
        .expect("has type");

    let json = serde_json::to_value(&*solution).expect("serializes");

    assert_eq!(json["prefab"], "cards/book-compact");
    assert_eq!(json["prefab_variants"], serde_json::json!(["Density.Compact"]));
    assert_eq!(json["model"], shop.book.0);
}

#[test]
fn test_parallel_resolution_through_boxed_resolver() {
    let shop = shop();
    let solutions = SolutionSet::shared();
    let resolver = build_resolver(
        &ResolverConfig::default(),
        Arc::clone(&shop.manifest),
        Arc::clone(&solutions),
    )
    .expect("resolver builds");
    let problems = [Problem::plain(shop.book), Problem::plain(shop.product)];

    let prefabs: Vec<String> = (0..64usize)
        .into_par_iter()
        .map(|i| prefab_of(&*resolver, &problems[i % 2]))
        .collect();

    assert_eq!(solutions.len(), 2);
    for (i, prefab) in prefabs.iter().enumerate() {
        let expected = if i % 2 == 0 { "cards/book" } else { "cards/product" };
        assert_eq!(prefab, expected);
    }
}
