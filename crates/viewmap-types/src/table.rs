//! Interned type arena.
//!
//! `TypeTable` owns exactly one `TypeNode` per canonical type name. Nodes are
//! stored in insertion order and addressed by index, so a `TypeId` is stable for
//! the lifetime of the table and can be compared without touching the arena.
//!
//! Index 0 is reserved for the root object type ([`TypeId::OBJECT`]). Every
//! class chain ends there; it is a sentinel and never matches a lookup walk.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

// =============================================================================
// TypeId
// =============================================================================

/// Handle to an interned type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The root object type every class ultimately derives from.
    pub const OBJECT: Self = Self(0);

    pub const OBJECT_NAME: &'static str = "object";

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Capabilities
// =============================================================================

bitflags::bitflags! {
    /// Presentation roles a type can play.
    ///
    /// Declared on a type and inherited by everything deriving from or
    /// implementing it.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeCapabilities: u8 {
        const MODEL = 1 << 0;
        const VIEW_MODEL = 1 << 1;
        const VIEW = 1 << 2;
    }
}

// =============================================================================
// TypeNode
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    /// `parent` is `None` only for [`TypeId::OBJECT`].
    Class { parent: Option<TypeId> },
    Interface,
}

/// An interned type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeNode {
    name: Arc<str>,
    kind: TypeKind,
    /// Directly implemented (classes) or extended (interfaces) interfaces, in
    /// declaration order.
    interfaces: SmallVec<[TypeId; 4]>,
    /// Effective capabilities, including inherited ones.
    capabilities: TypeCapabilities,
}

impl TypeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    pub fn parent(&self) -> Option<TypeId> {
        match self.kind {
            TypeKind::Class { parent } => parent,
            TypeKind::Interface => None,
        }
    }

    pub fn interfaces(&self) -> &[TypeId] {
        &self.interfaces
    }

    pub fn capabilities(&self) -> TypeCapabilities {
        self.capabilities
    }
}

// =============================================================================
// TypeDecl
// =============================================================================

#[derive(Clone, Debug)]
enum DeclKind {
    Class { parent: Option<TypeId> },
    Interface,
}

/// Declaration of a type to intern.
///
/// ```ignore
/// let animal = table.intern(TypeDecl::class("Animal").capabilities(TypeCapabilities::MODEL))?;
/// let dog = table.intern(TypeDecl::class("Dog").extends(animal))?;
/// ```
#[derive(Clone, Debug)]
pub struct TypeDecl {
    name: Arc<str>,
    kind: DeclKind,
    interfaces: Vec<TypeId>,
    capabilities: TypeCapabilities,
}

impl TypeDecl {
    /// A class deriving from the root object type unless `extends` is called.
    pub fn class(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            kind: DeclKind::Class { parent: None },
            interfaces: Vec::new(),
            capabilities: TypeCapabilities::empty(),
        }
    }

    pub fn interface(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            kind: DeclKind::Interface,
            interfaces: Vec::new(),
            capabilities: TypeCapabilities::empty(),
        }
    }

    /// Set the parent class. Ignored for interfaces.
    pub fn extends(mut self, parent: TypeId) -> Self {
        if let DeclKind::Class { parent: slot } = &mut self.kind {
            *slot = Some(parent);
        }
        self
    }

    /// Implemented interfaces for a class, extended interfaces for an interface.
    pub fn implements(mut self, interfaces: impl IntoIterator<Item = TypeId>) -> Self {
        self.interfaces.extend(interfaces);
        self
    }

    pub fn capabilities(mut self, capabilities: TypeCapabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }
}

// =============================================================================
// TypeTable
// =============================================================================

/// Owner of all interned types.
#[derive(Clone, Debug)]
pub struct TypeTable {
    nodes: IndexMap<Arc<str>, TypeNode, FxBuildHasher>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// Create a table holding only the root object type.
    pub fn new() -> Self {
        let mut nodes = IndexMap::with_hasher(FxBuildHasher);
        let name: Arc<str> = Arc::from(TypeId::OBJECT_NAME);
        nodes.insert(
            Arc::clone(&name),
            TypeNode {
                name,
                kind: TypeKind::Class { parent: None },
                interfaces: SmallVec::new(),
                capabilities: TypeCapabilities::empty(),
            },
        );
        Self { nodes }
    }

    /// Intern a declaration and return its id.
    ///
    /// Re-interning an identical declaration returns the existing id. All
    /// referenced types must already be interned, which keeps class chains and
    /// interface graphs acyclic.
    pub fn intern(&mut self, decl: TypeDecl) -> Result<TypeId, TypeTableError> {
        let mut capabilities = decl.capabilities;

        let kind = match decl.kind {
            DeclKind::Class { parent } => {
                let parent = parent.unwrap_or(TypeId::OBJECT);
                let parent_node = self.get(parent).ok_or(TypeTableError::UnknownType(parent))?;
                if !parent_node.is_class() {
                    return Err(TypeTableError::ParentNotClass {
                        name: decl.name.to_string(),
                        parent: parent_node.name().to_string(),
                    });
                }
                capabilities |= parent_node.capabilities;
                TypeKind::Class {
                    parent: Some(parent),
                }
            }
            DeclKind::Interface => TypeKind::Interface,
        };

        let mut interfaces: SmallVec<[TypeId; 4]> = SmallVec::new();
        for iface in decl.interfaces {
            let node = self.get(iface).ok_or(TypeTableError::UnknownType(iface))?;
            if !node.is_interface() {
                return Err(TypeTableError::NotAnInterface {
                    name: decl.name.to_string(),
                    ty: node.name().to_string(),
                });
            }
            capabilities |= node.capabilities;
            if !interfaces.contains(&iface) {
                interfaces.push(iface);
            }
        }

        let node = TypeNode {
            name: Arc::clone(&decl.name),
            kind,
            interfaces,
            capabilities,
        };

        if let Some((index, _, existing)) = self.nodes.get_full(&*decl.name) {
            return if *existing == node {
                Ok(Self::id_at(index))
            } else {
                Err(TypeTableError::Conflict {
                    name: decl.name.to_string(),
                })
            };
        }

        if u32::try_from(self.nodes.len()).is_err() {
            return Err(TypeTableError::Exhausted);
        }
        let (index, _) = self.nodes.insert_full(decl.name, node);
        let id = Self::id_at(index);
        trace!(type_id = id.0, name = %self.name(id).unwrap_or_default(), "TypeTable::intern");
        Ok(id)
    }

    fn id_at(index: usize) -> TypeId {
        // `intern` refuses to grow past u32::MAX entries
        TypeId(index as u32)
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.nodes.get_index(id.index()).map(|(_, node)| node)
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.nodes.get_index_of(name).map(Self::id_at)
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.get(id).map(TypeNode::name)
    }

    /// Effective capabilities; empty for unknown ids.
    pub fn capabilities(&self, id: TypeId) -> TypeCapabilities {
        self.get(id)
            .map(TypeNode::capabilities)
            .unwrap_or_default()
    }

    pub fn is_class(&self, id: TypeId) -> bool {
        self.get(id).is_some_and(TypeNode::is_class)
    }

    pub fn is_interface(&self, id: TypeId) -> bool {
        self.get(id).is_some_and(TypeNode::is_interface)
    }

    /// The class chain of `id`, starting at `id` itself and stopping before
    /// the root object type.
    pub fn class_chain(&self, id: TypeId) -> ClassChain<'_> {
        ClassChain {
            table: self,
            next: Some(id),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The root object type is always present, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeNode)> + '_ {
        self.nodes
            .values()
            .enumerate()
            .map(|(index, node)| (Self::id_at(index), node))
    }
}

/// Iterator over a class chain, see [`TypeTable::class_chain`].
#[derive(Clone, Debug)]
pub struct ClassChain<'a> {
    table: &'a TypeTable,
    next: Option<TypeId>,
}

impl Iterator for ClassChain<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.next.take()?;
        if current == TypeId::OBJECT {
            return None;
        }
        let node = self.table.get(current)?;
        self.next = node.parent();
        Some(current)
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeTableError {
    UnknownType(TypeId),
    ParentNotClass { name: String, parent: String },
    NotAnInterface { name: String, ty: String },
    /// The name is already interned with a different declaration.
    Conflict { name: String },
    Exhausted,
}

impl fmt::Display for TypeTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(id) => write!(f, "type {id} is not interned"),
            Self::ParentNotClass { name, parent } => {
                write!(f, "`{name}` cannot extend `{parent}`: parent is not a class")
            }
            Self::NotAnInterface { name, ty } => {
                write!(f, "`{name}` lists `{ty}` as an interface, but it is a class")
            }
            Self::Conflict { name } => {
                write!(f, "`{name}` is already interned with a different declaration")
            }
            Self::Exhausted => f.write_str("type table is full"),
        }
    }
}

impl std::error::Error for TypeTableError {}

#[cfg(test)]
#[path = "../tests/type_table_tests.rs"]
mod tests;
