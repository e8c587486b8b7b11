//! Zone layout: local numbering, coordinates and element sections of one
//! partition, computed without touching the sink.
//!
//! Building a layout is pure, so layouts of different partitions can be
//! built independently (in parallel with the `rayon` feature). Recording
//! occurrences and writing happen afterwards, in partition order.

use crate::config::ExportOptions;
use crate::mesh_error::MeshExportError;
use crate::model::PartitionedMeshSource;
use crate::topology::element::ElementType;
use crate::topology::entity::{Entity, EntityId};
use crate::topology::vertex::{GlobalIndex, MeshVertex};
use crate::zone::element_map::{OutputElementType, element_mapping};
use crate::zone::naming::{UniqueNames, entity_name, section_name, zone_name};
use hashbrown::HashMap;
use std::collections::BTreeMap;

/// Which nodes of an element to collect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeSelection {
    /// Corner nodes only.
    Primary,
    /// Every node, high-order ones included.
    All,
}

/// Distinct vertices referenced by the elements of `entities`, keyed by
/// global index. Vertices excluded from the global numbering are skipped.
///
/// With `all_elements == false`, only entities with a physical tag count.
pub fn nodes_in_entities<'s, S>(
    source: &'s S,
    entities: &[&Entity],
    selection: NodeSelection,
    all_elements: bool,
) -> Result<BTreeMap<GlobalIndex, &'s MeshVertex>, MeshExportError>
where
    S: PartitionedMeshSource + ?Sized,
{
    let mut nodes = BTreeMap::new();
    for entity in entities {
        if !entity.is_exported(all_elements) {
            continue;
        }
        for ty in entity.element_types() {
            for element in entity.elements_of_type(ty) {
                let vertices = match selection {
                    NodeSelection::Primary => element.primary_vertices(ty),
                    NodeSelection::All => element.vertices.as_slice(),
                };
                for &v in vertices {
                    let vertex = source.vertex(v).ok_or(MeshExportError::UnknownVertex {
                        entity: entity.id,
                        vertex: v,
                    })?;
                    if vertex.global_index.is_valid() {
                        nodes.insert(vertex.global_index, vertex);
                    }
                }
            }
        }
    }
    Ok(nodes)
}

/// One element section: all elements of one (entity, type) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    pub name: String,
    pub entity: EntityId,
    pub element_type: ElementType,
    pub output_type: OutputElementType,
    /// First local element index (1-based, inclusive).
    pub start: u64,
    /// Last local element index (inclusive).
    pub end: u64,
    /// Local vertex indices, `output_type` node order, element after element.
    pub connectivity: Vec<u64>,
}

impl SectionLayout {
    pub fn num_elements(&self) -> u64 {
        self.end + 1 - self.start
    }
}

/// Everything written for one partition.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneLayout {
    pub partition: u32,
    pub name: String,
    /// Global indices of the zone vertices in local order; local index = position + 1.
    pub nodes: Vec<GlobalIndex>,
    /// Scaled x, y and z coordinates in local order.
    pub coordinates: [Vec<f64>; 3],
    /// Elements of mesh-dimension entities, declared as the zone's cell count.
    pub num_cells: u64,
    pub sections: Vec<SectionLayout>,
}

impl ZoneLayout {
    /// Compute the layout of `partition`, owning `entities`.
    pub fn build<S>(
        source: &S,
        partition: u32,
        entities: &[&Entity],
        options: &ExportOptions,
    ) -> Result<Self, MeshExportError>
    where
        S: PartitionedMeshSource + ?Sized,
    {
        // Nodes come from elements: entity vertex lists miss nodes owned by
        // partition interfaces.
        let node_set = nodes_in_entities(source, entities, NodeSelection::All, options.save_all)?;

        let mut local_of: HashMap<GlobalIndex, u64> = HashMap::with_capacity(node_set.len());
        let mut nodes = Vec::with_capacity(node_set.len());
        let mut coordinates = [
            Vec::with_capacity(node_set.len()),
            Vec::with_capacity(node_set.len()),
            Vec::with_capacity(node_set.len()),
        ];
        for (global, vertex) in node_set {
            let local = nodes.len() as u64 + 1;
            local_of.insert(global, local);
            nodes.push(global);
            let xyz = vertex.scaled(options.scaling_factor);
            for (axis, values) in coordinates.iter_mut().enumerate() {
                values.push(xyz[axis]);
            }
        }

        let name = zone_name(source.name(), partition, options.name_limit);
        let mut section_names = UniqueNames::new(options.name_limit);
        let mut sections = Vec::new();
        let mut num_cells = 0u64;
        let mut last = 0u64;
        for entity in entities {
            if !entity.is_exported(options.save_all) {
                continue;
            }
            let ent_name = entity_name(entity, options.name_limit);
            for ty in entity.element_types() {
                let Some((output_type, perm)) = element_mapping(ty) else {
                    log::error!(
                        "zone {name}: unhandled element type {ty:?} (msh {}) in entity {}, section skipped",
                        ty.msh_code(),
                        entity.id
                    );
                    continue;
                };
                let connectivity =
                    section_connectivity(source, &name, entity, ty, perm, &local_of)?;
                let count = (connectivity.len() / perm.len()) as u64;
                if count == 0 {
                    continue;
                }
                let start = last + 1;
                last += count;
                if entity.dim() == options.mesh_dim {
                    num_cells += count;
                }
                sections.push(SectionLayout {
                    name: section_names.claim(&section_name(&ent_name, ty)),
                    entity: entity.id,
                    element_type: ty,
                    output_type,
                    start,
                    end: last,
                    connectivity,
                });
            }
        }

        log::debug!(
            "zone {name}: {} nodes, {} sections, {num_cells} cells",
            nodes.len(),
            sections.len()
        );
        Ok(Self {
            partition,
            name,
            nodes,
            coordinates,
            num_cells,
            sections,
        })
    }

    pub fn num_nodes(&self) -> u64 {
        self.nodes.len() as u64
    }

    pub fn num_elements(&self) -> u64 {
        self.sections.iter().map(SectionLayout::num_elements).sum()
    }
}

/// Local connectivity of every element of type `ty` in `entity`.
///
/// Elements touching a vertex without local index (excluded from the global
/// numbering) are dropped. An element whose node count does not match `ty`
/// is an error.
fn section_connectivity<S>(
    source: &S,
    zone: &str,
    entity: &Entity,
    ty: ElementType,
    perm: &[usize],
    local_of: &HashMap<GlobalIndex, u64>,
) -> Result<Vec<u64>, MeshExportError>
where
    S: PartitionedMeshSource + ?Sized,
{
    let elements = entity.elements_of_type(ty);
    let mut connectivity = Vec::with_capacity(elements.len() * perm.len());
    let mut scratch = Vec::with_capacity(perm.len());
    'elements: for (index, element) in elements.iter().enumerate() {
        if element.vertices.len() != ty.num_nodes() {
            return Err(MeshExportError::ElementArity {
                entity: entity.id,
                element_type: ty,
                index,
                expected: ty.num_nodes(),
                found: element.vertices.len(),
            });
        }
        scratch.clear();
        for &k in perm {
            let v = element.vertices[k];
            let vertex = source.vertex(v).ok_or(MeshExportError::UnknownVertex {
                entity: entity.id,
                vertex: v,
            })?;
            match local_of.get(&vertex.global_index) {
                Some(&local) if vertex.global_index.is_valid() => scratch.push(local),
                _ => {
                    log::warn!(
                        "zone {zone}: element {index} of {} ({ty:?}) references unnumbered vertex {v:?}, dropped",
                        entity.id
                    );
                    continue 'elements;
                }
            }
        }
        connectivity.extend_from_slice(&scratch);
    }
    Ok(connectivity)
}
