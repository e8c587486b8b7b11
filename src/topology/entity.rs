//! Geometric entities as seen by the exporter.
//!
//! An [`Entity`] is a plain record: its elements grouped by type, physical
//! tags, the set of partitions that reference it, and two independent pieces
//! of relational metadata expressed through [`EntityId`]s:
//! - `parent`: set on partition entities. When the parent's dimension differs
//!   from the entity's own, the entity is a partition-interface copy.
//! - `periodic`: the mesh master and vertex correspondence of a periodic slave.

use crate::topology::element::{Element, ElementType};
use crate::topology::periodic::PeriodicLink;
use crate::topology::vertex::VertexId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Stable identity of a geometric entity: dimension, then tag.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, serde::Serialize, serde::Deserialize,
)]
pub struct EntityId {
    pub dim: u8,
    pub tag: i32,
}

impl EntityId {
    pub const fn new(dim: u8, tag: i32) -> Self {
        Self { dim, tag }
    }

    /// Long kind name used for default entity names.
    pub fn kind_name(self) -> &'static str {
        match self.dim {
            0 => "Point",
            1 => "Curve",
            2 => "Surface",
            3 => "Volume",
            _ => "",
        }
    }

    /// One-letter kind used in connectivity names.
    pub fn kind_letter(self) -> &'static str {
        match self.dim {
            0 => "P",
            1 => "C",
            2 => "S",
            3 => "V",
            _ => "",
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind_letter(), self.tag)
    }
}

/// A geometric entity together with its mesh.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Elementary name, if the model has one for this entity.
    pub name: Option<String>,
    /// Physical group tags. Empty means "untagged".
    pub physicals: Vec<i32>,
    /// Partitions referencing this entity.
    pub partitions: BTreeSet<u32>,
    /// Owner entity of a partition entity.
    pub parent: Option<EntityId>,
    pub periodic: Option<PeriodicLink>,
    elements: BTreeMap<ElementType, Vec<Element>>,
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::new(0, 0)
    }
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_physicals(mut self, physicals: impl IntoIterator<Item = i32>) -> Self {
        self.physicals = physicals.into_iter().collect();
        self
    }

    pub fn with_partitions(mut self, partitions: impl IntoIterator<Item = u32>) -> Self {
        self.partitions = partitions.into_iter().collect();
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Append an element of type `ty`.
    pub fn push_element(&mut self, ty: ElementType, element: Element) {
        self.elements.entry(ty).or_default().push(element);
    }

    /// Builder form of [`push_element`](Self::push_element).
    pub fn with_element(mut self, ty: ElementType, vertices: impl Into<Vec<VertexId>>) -> Self {
        self.push_element(ty, Element::new(vertices));
        self
    }

    pub fn dim(&self) -> u8 {
        self.id.dim
    }

    pub fn tag(&self) -> i32 {
        self.id.tag
    }

    pub fn has_physicals(&self) -> bool {
        !self.physicals.is_empty()
    }

    /// Element types present in this entity, in section order.
    pub fn element_types(&self) -> impl Iterator<Item = ElementType> + '_ {
        self.elements
            .iter()
            .filter(|(_, elems)| !elems.is_empty())
            .map(|(ty, _)| *ty)
    }

    pub fn num_elements_of_type(&self, ty: ElementType) -> usize {
        self.elements.get(&ty).map_or(0, Vec::len)
    }

    pub fn num_elements(&self) -> usize {
        self.elements.values().map(Vec::len).sum()
    }

    /// Random access to the `index`-th element of type `ty`.
    pub fn element(&self, ty: ElementType, index: usize) -> Option<&Element> {
        self.elements.get(&ty).and_then(|elems| elems.get(index))
    }

    /// All elements of type `ty`.
    pub fn elements_of_type(&self, ty: ElementType) -> &[Element] {
        self.elements.get(&ty).map_or(&[], Vec::as_slice)
    }

    /// Whether this entity is a partition-interface copy: its parent has a
    /// different dimension than itself.
    pub fn is_interface_copy(&self) -> bool {
        self.parent.is_some_and(|p| p.dim != self.id.dim)
    }

    /// Whether this entity is a periodic slave of another entity.
    pub fn is_periodic_slave(&self) -> bool {
        self.periodic
            .as_ref()
            .is_some_and(|link| link.master() != self.id)
    }

    /// Whether elements of this entity are exported under `save_all`.
    pub fn is_exported(&self, save_all: bool) -> bool {
        save_all || self.has_physicals()
    }
}
