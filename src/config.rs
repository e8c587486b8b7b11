//! Export configuration.

use crate::mesh_error::MeshExportError;
use serde::{Deserialize, Serialize};

/// Length of a name field in the multi-zone format.
pub const NAME_LIMIT: usize = 32;

/// Options controlling one export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Export every entity, not only those with at least one physical tag.
    pub save_all: bool,
    /// Linear factor applied to every coordinate.
    pub scaling_factor: f64,
    /// Mesh dimension: entities of this dimension make up the declared
    /// element count of a zone, and it is the cell dimension of the base.
    pub mesh_dim: u8,
    /// Partition count overriding the source's own, when set.
    pub num_partitions: Option<u32>,
    /// Maximum length of zone, section and connectivity names.
    pub name_limit: usize,
    /// Log registry entries that never received an occurrence.
    pub check_registry_complete: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            save_all: false,
            scaling_factor: 1.0,
            mesh_dim: 3,
            num_partitions: None,
            name_limit: NAME_LIMIT,
            check_registry_complete: true,
        }
    }
}

impl ExportOptions {
    /// Check that all options are in range.
    pub fn validate(&self) -> Result<(), MeshExportError> {
        if !self.scaling_factor.is_finite() || self.scaling_factor == 0.0 {
            return Err(MeshExportError::InvalidOptions(format!(
                "scaling factor must be finite and non-zero, got {}",
                self.scaling_factor
            )));
        }
        if self.mesh_dim > 3 {
            return Err(MeshExportError::InvalidOptions(format!(
                "mesh dimension must be at most 3, got {}",
                self.mesh_dim
            )));
        }
        // Room for the longest zone suffix plus at least one character.
        if self.name_limit < "_Part4294967295".len() + 1 {
            return Err(MeshExportError::InvalidOptions(format!(
                "name limit {} is too short to hold a zone suffix",
                self.name_limit
            )));
        }
        Ok(())
    }
}
