//! Reflection-free type model.
//!
//! Types are interned once into a [`TypeTable`] and referred to by [`TypeId`]
//! afterwards, so resolution never walks live type metadata:
//!
//! - O(1) identity comparison via `TypeId`
//! - Class chains and interface DAGs stored as id edges, acyclic by construction
//! - Presentation capabilities (`MODEL`, `VIEW_MODEL`, `VIEW`) computed once at
//!   intern time and inherited through parents and interfaces

mod table;

pub use table::{
    ClassChain, TypeCapabilities, TypeDecl, TypeId, TypeKind, TypeNode, TypeTable, TypeTableError,
};
