//! Output element types and node orderings.
//!
//! Input elements order their nodes the Gmsh way; the multi-zone format uses
//! its own (CGNS) ordering for high-order elements. A type is exportable only
//! when both its output type and its node permutation are known.

use crate::topology::element::ElementType;

/// Element type codes of the multi-zone format.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum OutputElementType {
    Node,
    Bar2,
    Bar3,
    Tri3,
    Tri6,
    Quad4,
    Quad8,
    Quad9,
    Tetra4,
    Tetra10,
    Pyra5,
    Pyra13,
    Penta6,
    Penta15,
    Hexa8,
    Hexa20,
    Hexa27,
}

impl OutputElementType {
    /// Numeric `ElementType_t` value.
    pub fn code(self) -> u32 {
        match self {
            OutputElementType::Node => 2,
            OutputElementType::Bar2 => 3,
            OutputElementType::Bar3 => 4,
            OutputElementType::Tri3 => 5,
            OutputElementType::Tri6 => 6,
            OutputElementType::Quad4 => 7,
            OutputElementType::Quad8 => 8,
            OutputElementType::Quad9 => 9,
            OutputElementType::Tetra4 => 10,
            OutputElementType::Tetra10 => 11,
            OutputElementType::Pyra5 => 12,
            OutputElementType::Penta6 => 14,
            OutputElementType::Penta15 => 15,
            OutputElementType::Hexa8 => 17,
            OutputElementType::Hexa20 => 18,
            OutputElementType::Hexa27 => 19,
            OutputElementType::Pyra13 => 21,
        }
    }

    /// Upper-case name as written in text renderings.
    pub fn name(self) -> &'static str {
        match self {
            OutputElementType::Node => "NODE",
            OutputElementType::Bar2 => "BAR_2",
            OutputElementType::Bar3 => "BAR_3",
            OutputElementType::Tri3 => "TRI_3",
            OutputElementType::Tri6 => "TRI_6",
            OutputElementType::Quad4 => "QUAD_4",
            OutputElementType::Quad8 => "QUAD_8",
            OutputElementType::Quad9 => "QUAD_9",
            OutputElementType::Tetra4 => "TETRA_4",
            OutputElementType::Tetra10 => "TETRA_10",
            OutputElementType::Pyra5 => "PYRA_5",
            OutputElementType::Pyra13 => "PYRA_13",
            OutputElementType::Penta6 => "PENTA_6",
            OutputElementType::Penta15 => "PENTA_15",
            OutputElementType::Hexa8 => "HEXA_8",
            OutputElementType::Hexa20 => "HEXA_20",
            OutputElementType::Hexa27 => "HEXA_27",
        }
    }
}

/// Output type for an input element type.
pub fn output_type(ty: ElementType) -> OutputElementType {
    match ty {
        ElementType::Point => OutputElementType::Node,
        ElementType::Line2 => OutputElementType::Bar2,
        ElementType::Line3 => OutputElementType::Bar3,
        ElementType::Triangle3 => OutputElementType::Tri3,
        ElementType::Triangle6 => OutputElementType::Tri6,
        ElementType::Quadrangle4 => OutputElementType::Quad4,
        ElementType::Quadrangle8 => OutputElementType::Quad8,
        ElementType::Quadrangle9 => OutputElementType::Quad9,
        ElementType::Tetrahedron4 => OutputElementType::Tetra4,
        ElementType::Tetrahedron10 => OutputElementType::Tetra10,
        ElementType::Hexahedron8 => OutputElementType::Hexa8,
        ElementType::Hexahedron20 => OutputElementType::Hexa20,
        ElementType::Hexahedron27 => OutputElementType::Hexa27,
        ElementType::Prism6 => OutputElementType::Penta6,
        ElementType::Prism15 => OutputElementType::Penta15,
        ElementType::Pyramid5 => OutputElementType::Pyra5,
        ElementType::Pyramid13 => OutputElementType::Pyra13,
    }
}

static IDENTITY: [usize; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
static TETRA_10: [usize; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 9, 8];
static HEXA_20: [usize; 20] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 11, 13, 9, 10, 12, 14, 15, 16, 18, 19, 17,
];
static PENTA_15: [usize; 15] = [0, 1, 2, 3, 4, 5, 6, 9, 7, 8, 10, 11, 12, 14, 13];
static PYRA_13: [usize; 13] = [0, 1, 2, 3, 4, 5, 8, 10, 6, 7, 9, 11, 12];

/// Node permutation for `ty`: output node `k` is input node `perm[k]`.
///
/// `None` when no ordering table exists; such types are not exported.
/// Hexahedron27 is left out on purpose even though HEXA_27 has a defined
/// ordering.
pub fn node_permutation(ty: ElementType) -> Option<&'static [usize]> {
    match ty {
        ElementType::Point
        | ElementType::Line2
        | ElementType::Line3
        | ElementType::Triangle3
        | ElementType::Triangle6
        | ElementType::Quadrangle4
        | ElementType::Quadrangle8
        | ElementType::Quadrangle9
        | ElementType::Tetrahedron4
        | ElementType::Hexahedron8
        | ElementType::Prism6
        | ElementType::Pyramid5 => Some(&IDENTITY[..ty.num_nodes()]),
        ElementType::Tetrahedron10 => Some(&TETRA_10),
        ElementType::Hexahedron20 => Some(&HEXA_20),
        ElementType::Prism15 => Some(&PENTA_15),
        ElementType::Pyramid13 => Some(&PYRA_13),
        ElementType::Hexahedron27 => None,
    }
}

/// Output type and node permutation, when `ty` is exportable.
pub fn element_mapping(ty: ElementType) -> Option<(OutputElementType, &'static [usize])> {
    node_permutation(ty).map(|perm| (output_type(ty), perm))
}
