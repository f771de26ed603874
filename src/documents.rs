//! Document registry and PDF locator.
//!
//! Bookmarks, reading positions and content citations all use logical page
//! numbers. The per-document offset is applied here, when a viewer URL is
//! built, and nowhere else.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::LocatorError;
use crate::model::{DocumentId, Page};

pub const DEFAULT_PDF_BASE: &str = "/pdfs";

#[derive(Debug, Clone, Serialize)]
pub struct DocumentDescriptor {
    pub id: DocumentId,
    pub name: &'static str,
    pub file_name: &'static str,
    pub offset: i32,
}

const DESCRIPTORS: [DocumentDescriptor; 4] = [
    DocumentDescriptor {
        id: DocumentId::Pmbok,
        name: "PMBOK 7",
        file_name: "A Guide to the Project Management Body of Knowledge (PMBOK® Guide) – Seventh Edition and The Standard for.pdf",
        offset: 0,
    },
    DocumentDescriptor {
        id: DocumentId::Prince2,
        name: "PRINCE2",
        file_name: "Managing Successful Projects with PRINCE2® -- Andy Murray -- 7, 2023 -- PeopleCert International Limited.pdf",
        offset: 0,
    },
    DocumentDescriptor {
        id: DocumentId::Iso21500,
        name: "ISO 21500",
        file_name: "ISO 21500-2021_ Project, programme and portfolio management - Context and concepts.pdf",
        offset: 0,
    },
    DocumentDescriptor {
        id: DocumentId::Iso21502,
        name: "ISO 21502",
        file_name: "ISO 21502-2020_ Project, programme and portfolio management - Guidance on project management.pdf",
        offset: 0,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub document: DocumentId,
    pub logical_page: Page,
    pub physical_page: u32,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct DocumentRegistry {
    descriptors: [DocumentDescriptor; 4],
    base_path: String,
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        DocumentRegistry {
            descriptors: DESCRIPTORS,
            base_path: DEFAULT_PDF_BASE.to_string(),
        }
    }
}

impl DocumentRegistry {
    /// Builds the registry, replacing the built-in offsets with any overrides.
    pub fn with_offsets(offsets: &HashMap<DocumentId, i32>) -> Self {
        let mut registry = DocumentRegistry::default();
        for descriptor in registry.descriptors.iter_mut() {
            if let Some(offset) = offsets.get(&descriptor.id) {
                descriptor.offset = *offset;
            }
        }
        registry
    }

    pub fn all(&self) -> &[DocumentDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, id: DocumentId) -> &DocumentDescriptor {
        // DESCRIPTORS is laid out in DocumentId declaration order
        &self.descriptors[id as usize]
    }

    pub fn lookup(&self, doc: &str) -> Result<&DocumentDescriptor, LocatorError> {
        let id: DocumentId = doc.parse()?;
        Ok(self.descriptor(id))
    }

    pub fn display_name(&self, id: DocumentId) -> &'static str {
        self.descriptor(id).name
    }

    pub fn resolve(&self, doc: &str, logical_page: Page) -> Result<Location, LocatorError> {
        let descriptor = self.lookup(doc)?;
        self.locate(descriptor, logical_page)
    }

    pub fn resolve_id(&self, id: DocumentId, logical_page: Page) -> Result<Location, LocatorError> {
        self.locate(self.descriptor(id), logical_page)
    }

    fn locate(&self, descriptor: &DocumentDescriptor, logical_page: Page) -> Result<Location, LocatorError> {
        let physical = i64::from(logical_page.get()) + i64::from(descriptor.offset);
        let physical_page = u32::try_from(physical)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(LocatorError::InvalidPage {
                document: descriptor.id,
                logical: logical_page.get(),
                offset: descriptor.offset,
            })?;

        let url = format!(
            "{}/{}#page={}",
            self.base_path,
            urlencoding::encode(descriptor.file_name),
            physical_page
        );

        Ok(Location {
            document: descriptor.id,
            logical_page,
            physical_page,
            url,
        })
    }
}
