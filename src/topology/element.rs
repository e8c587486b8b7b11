//! Element types and mesh elements.

use crate::topology::vertex::VertexId;

/// Element types understood by the exporter.
///
/// Node ordering inside an [`Element`] follows the Gmsh `.msh` convention;
/// the zone writer reorders nodes for the output format.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum ElementType {
    /// 0D point element.
    Point,
    /// 2-node segment.
    Line2,
    /// 3-node segment.
    Line3,
    /// 3-node triangle.
    Triangle3,
    /// 6-node triangle.
    Triangle6,
    /// 4-node quadrangle.
    Quadrangle4,
    /// 8-node (serendipity) quadrangle.
    Quadrangle8,
    /// 9-node quadrangle.
    Quadrangle9,
    /// 4-node tetrahedron.
    Tetrahedron4,
    /// 10-node tetrahedron.
    Tetrahedron10,
    /// 8-node hexahedron.
    Hexahedron8,
    /// 20-node (serendipity) hexahedron.
    Hexahedron20,
    /// 27-node hexahedron.
    Hexahedron27,
    /// 6-node prism.
    Prism6,
    /// 15-node prism.
    Prism15,
    /// 5-node pyramid.
    Pyramid5,
    /// 13-node pyramid.
    Pyramid13,
}

impl ElementType {
    /// Every supported type, in section order.
    pub const ALL: [ElementType; 17] = [
        ElementType::Point,
        ElementType::Line2,
        ElementType::Line3,
        ElementType::Triangle3,
        ElementType::Triangle6,
        ElementType::Quadrangle4,
        ElementType::Quadrangle8,
        ElementType::Quadrangle9,
        ElementType::Tetrahedron4,
        ElementType::Tetrahedron10,
        ElementType::Hexahedron8,
        ElementType::Hexahedron20,
        ElementType::Hexahedron27,
        ElementType::Prism6,
        ElementType::Prism15,
        ElementType::Pyramid5,
        ElementType::Pyramid13,
    ];

    /// Gmsh `.msh` element type code.
    pub fn msh_code(self) -> u32 {
        match self {
            ElementType::Line2 => 1,
            ElementType::Triangle3 => 2,
            ElementType::Quadrangle4 => 3,
            ElementType::Tetrahedron4 => 4,
            ElementType::Hexahedron8 => 5,
            ElementType::Prism6 => 6,
            ElementType::Pyramid5 => 7,
            ElementType::Line3 => 8,
            ElementType::Triangle6 => 9,
            ElementType::Quadrangle9 => 10,
            ElementType::Tetrahedron10 => 11,
            ElementType::Hexahedron27 => 12,
            ElementType::Point => 15,
            ElementType::Quadrangle8 => 16,
            ElementType::Hexahedron20 => 17,
            ElementType::Prism15 => 18,
            ElementType::Pyramid13 => 19,
        }
    }

    /// Inverse of [`msh_code`](Self::msh_code).
    pub fn from_msh_code(code: u32) -> Option<Self> {
        ElementType::ALL.into_iter().find(|t| t.msh_code() == code)
    }

    /// Total number of nodes, high-order ones included.
    pub fn num_nodes(self) -> usize {
        match self {
            ElementType::Point => 1,
            ElementType::Line2 => 2,
            ElementType::Line3 => 3,
            ElementType::Triangle3 => 3,
            ElementType::Triangle6 => 6,
            ElementType::Quadrangle4 => 4,
            ElementType::Quadrangle8 => 8,
            ElementType::Quadrangle9 => 9,
            ElementType::Tetrahedron4 => 4,
            ElementType::Tetrahedron10 => 10,
            ElementType::Hexahedron8 => 8,
            ElementType::Hexahedron20 => 20,
            ElementType::Hexahedron27 => 27,
            ElementType::Prism6 => 6,
            ElementType::Prism15 => 15,
            ElementType::Pyramid5 => 5,
            ElementType::Pyramid13 => 13,
        }
    }

    /// Number of corner (primary) nodes; these always come first.
    pub fn num_primary_nodes(self) -> usize {
        match self {
            ElementType::Point => 1,
            ElementType::Line2 | ElementType::Line3 => 2,
            ElementType::Triangle3 | ElementType::Triangle6 => 3,
            ElementType::Quadrangle4 | ElementType::Quadrangle8 | ElementType::Quadrangle9 => 4,
            ElementType::Tetrahedron4 | ElementType::Tetrahedron10 => 4,
            ElementType::Hexahedron8 | ElementType::Hexahedron20 | ElementType::Hexahedron27 => 8,
            ElementType::Prism6 | ElementType::Prism15 => 6,
            ElementType::Pyramid5 | ElementType::Pyramid13 => 5,
        }
    }

    /// Topological dimension.
    pub fn dimension(self) -> u8 {
        match self {
            ElementType::Point => 0,
            ElementType::Line2 | ElementType::Line3 => 1,
            ElementType::Triangle3
            | ElementType::Triangle6
            | ElementType::Quadrangle4
            | ElementType::Quadrangle8
            | ElementType::Quadrangle9 => 2,
            _ => 3,
        }
    }
}

/// One mesh element: an ordered list of vertex handles.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub vertices: Vec<VertexId>,
}

impl Element {
    pub fn new(vertices: impl Into<Vec<VertexId>>) -> Self {
        Self {
            vertices: vertices.into(),
        }
    }

    /// Corner vertices only, for an element of type `ty`.
    pub fn primary_vertices(&self, ty: ElementType) -> &[VertexId] {
        let n = ty.num_primary_nodes().min(self.vertices.len());
        &self.vertices[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msh_codes_round_trip_and_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for ty in ElementType::ALL {
            assert!(seen.insert(ty.msh_code()), "duplicate code for {ty:?}");
            assert_eq!(ElementType::from_msh_code(ty.msh_code()), Some(ty));
        }
        assert_eq!(ElementType::from_msh_code(99), None);
    }

    #[test]
    fn primary_nodes_never_exceed_total() {
        for ty in ElementType::ALL {
            assert!(ty.num_primary_nodes() <= ty.num_nodes());
        }
    }

    #[test]
    fn dimension_by_family() {
        assert_eq!(ElementType::Point.dimension(), 0);
        assert_eq!(ElementType::Line3.dimension(), 1);
        assert_eq!(ElementType::Quadrangle9.dimension(), 2);
        assert_eq!(ElementType::Pyramid13.dimension(), 3);
        for ty in ElementType::ALL {
            let by_corners = match ty.num_primary_nodes() {
                1 => 0,
                2 => 1,
                3 => 2,
                4 if matches!(
                    ty,
                    ElementType::Quadrangle4 | ElementType::Quadrangle8 | ElementType::Quadrangle9
                ) =>
                {
                    2
                }
                _ => 3,
            };
            assert_eq!(ty.dimension(), by_corners, "{ty:?}");
        }
    }

    #[test]
    fn primary_vertices_drop_high_order_nodes() {
        let e = Element::new((0..10).map(VertexId).collect::<Vec<_>>());
        assert_eq!(e.primary_vertices(ElementType::Tetrahedron10).len(), 4);
        assert_eq!(e.primary_vertices(ElementType::Tetrahedron10)[3], VertexId(3));
    }
}
