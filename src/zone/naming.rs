//! Names of zones, sections and connectivity records.
//!
//! Every name must fit a fixed-length field. Zone names keep their
//! `_Part<p>` suffix intact and truncate the model name instead, so distinct
//! partitions never collide. Names inside a zone go through [`UniqueNames`].

use crate::topology::entity::{Entity, EntityId};
use crate::topology::element::ElementType;
use hashbrown::HashSet;

/// Truncate `s` to at most `limit` bytes on a character boundary.
pub fn truncate_name(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        return s.to_string();
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// `<model>_Part<p>` with the model part truncated to fit `limit`.
pub fn zone_name(model: &str, partition: u32, limit: usize) -> String {
    let suffix = format!("_Part{partition}");
    let base = truncate_name(model, limit.saturating_sub(suffix.len()));
    format!("{base}{suffix}")
}

/// Elementary name of the entity, or `<Kind>_<tag>`.
pub fn entity_name(entity: &Entity, limit: usize) -> String {
    let raw = match entity.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{}_{}", entity.id.kind_name(), entity.id.tag),
    };
    truncate_name(&raw, limit)
}

/// `<entity name>_<msh type code>`.
pub fn section_name(entity_name: &str, ty: ElementType) -> String {
    format!("{entity_name}_{}", ty.msh_code())
}

/// `Per_<p1>-<K1><tag1>_<p2>-<K2><tag2>`.
pub fn periodic_connection_name(p1: u32, e1: EntityId, p2: u32, e2: EntityId) -> String {
    format!(
        "Per_{p1}-{}{}_{p2}-{}{}",
        e1.kind_letter(),
        e1.tag,
        e2.kind_letter(),
        e2.tag
    )
}

/// `Part<p1>_Part<p2>`.
pub fn interface_connection_name(p1: u32, p2: u32) -> String {
    format!("Part{p1}_Part{p2}")
}

/// Hands out names that are unique within one scope after truncation.
///
/// A repeated name has its tail replaced with `~<n>`.
#[derive(Debug, Clone)]
pub struct UniqueNames {
    limit: usize,
    used: HashSet<String>,
}

impl UniqueNames {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            used: HashSet::new(),
        }
    }

    /// Truncate `raw` and disambiguate it against names already handed out.
    pub fn claim(&mut self, raw: &str) -> String {
        let first = truncate_name(raw, self.limit);
        if self.used.insert(first.clone()) {
            return first;
        }
        let mut n = 1usize;
        loop {
            let tag = format!("~{n}");
            let candidate = format!(
                "{}{tag}",
                truncate_name(raw, self.limit.saturating_sub(tag.len()))
            );
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
