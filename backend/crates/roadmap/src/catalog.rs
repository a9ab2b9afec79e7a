//! Roadmap catalog

use serde::{Deserialize, Serialize};

use crate::error::{RoadmapError, RoadmapResult};

const EMBEDDED: &str = include_str!("../data/roadmaps.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapResource {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub id: u32,
    pub title: String,
    pub resources: Vec<RoadmapResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    pub id: u32,
    pub title: String,
    pub slug: String,
    pub steps: Vec<RoadmapStep>,
}

/// Roadmaps in catalog order.
#[derive(Debug, Clone, Default)]
pub struct RoadmapCatalog {
    roadmaps: Vec<Roadmap>,
}

impl RoadmapCatalog {
    /// Catalog shipped with the binary.
    pub fn embedded() -> RoadmapResult<Self> {
        Self::from_json(EMBEDDED)
    }

    /// Parses a catalog and rejects duplicate slugs.
    pub fn from_json(json: &str) -> RoadmapResult<Self> {
        let roadmaps: Vec<Roadmap> = serde_json::from_str(json)?;

        for (i, roadmap) in roadmaps.iter().enumerate() {
            if roadmaps[..i].iter().any(|r| r.slug == roadmap.slug) {
                return Err(RoadmapError::DuplicateSlug(roadmap.slug.clone()));
            }
        }

        tracing::debug!(count = roadmaps.len(), "Roadmap catalog loaded");

        Ok(Self { roadmaps })
    }

    pub fn all(&self) -> &[Roadmap] {
        &self.roadmaps
    }

    /// Slug match is exact.
    pub fn find(&self, slug: &str) -> Option<&Roadmap> {
        self.roadmaps.iter().find(|r| r.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.roadmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roadmaps.is_empty()
    }
}
