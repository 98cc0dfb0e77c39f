//! Mesh picker
//!
//! Edits a [`MeshDescriptor`] and turns it into a mesh. Invalid field values
//! are kept out of the descriptor and reported per field, so the form can
//! show them next to the offending control.
//!
//! Text kinds may be generated later, off the UI path. Those requests are
//! tagged with a generation number; a result is applied only while its
//! generation is still current and the picker is still open.

use std::collections::BTreeMap;

use atelier_mesh::{EngineError, FieldError, FieldValue, MeshDescriptor, MeshEngine, MeshKind, MeshResource};

use crate::error::EditorError;

/// Claim on a deferred mesh result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshTicket {
    generation: u64,
}

impl MeshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A mesh together with the descriptor that produced it
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMesh {
    pub mesh: MeshResource,
    pub descriptor: MeshDescriptor,
}

/// Outcome of [`MeshPicker::apply`]
#[derive(Clone, Debug, PartialEq)]
pub enum MeshRequest {
    /// Generated on the spot
    Ready(GeneratedMesh),
    /// Generate `descriptor` elsewhere, then hand the result to
    /// [`MeshPicker::deliver`] with `ticket`
    Deferred { ticket: MeshTicket, descriptor: MeshDescriptor },
}

/// Form state for choosing and parameterizing a mesh
#[derive(Clone, Debug)]
pub struct MeshPicker {
    descriptor: MeshDescriptor,
    field_errors: BTreeMap<&'static str, FieldError>,
    engine_error: Option<EngineError>,
    generation: u64,
    is_open: bool,
}

impl Default for MeshPicker {
    fn default() -> Self {
        Self::new(MeshDescriptor::default())
    }
}

impl MeshPicker {
    /// Open a picker on an existing descriptor
    pub fn new(descriptor: MeshDescriptor) -> Self {
        Self {
            descriptor,
            field_errors: BTreeMap::new(),
            engine_error: None,
            generation: 0,
            is_open: true,
        }
    }

    pub fn descriptor(&self) -> &MeshDescriptor {
        &self.descriptor
    }

    pub fn kind(&self) -> MeshKind {
        self.descriptor.kind()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Switch to `kind`, resetting every field to its default
    ///
    /// Outstanding deferred requests become stale.
    pub fn select_kind(&mut self, kind: MeshKind) {
        self.descriptor = kind.default_descriptor();
        self.field_errors.clear();
        self.engine_error = None;
        self.generation += 1;
    }

    /// Current value of a field
    pub fn field(&self, identifier: &str) -> FieldValue {
        self.descriptor.field(identifier)
    }

    /// Validate and store a field value
    ///
    /// An invalid value leaves the descriptor unchanged and is remembered
    /// as that field's error until a valid value replaces it. An accepted
    /// value makes outstanding deferred requests stale.
    pub fn set_field(&mut self, identifier: &str, value: FieldValue) -> Result<(), FieldError> {
        let declared = self.descriptor.field_descriptor(identifier).identifier;
        match self.descriptor.validate_field(identifier, &value) {
            Ok(()) => {
                self.descriptor.set_field(identifier, value);
                self.field_errors.remove(declared);
                self.engine_error = None;
                self.generation += 1;
                Ok(())
            }
            Err(e) => {
                self.field_errors.insert(declared, e.clone());
                Err(e)
            }
        }
    }

    pub fn field_error(&self, identifier: &str) -> Option<&FieldError> {
        self.field_errors.get(identifier)
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty() || self.engine_error.is_some()
    }

    /// Last engine rejection, shown until the descriptor changes
    pub fn engine_error(&self) -> Option<&EngineError> {
        self.engine_error.as_ref()
    }

    /// Convert the descriptor to a mesh, or defer it for text kinds
    pub fn apply(&mut self, engine: &dyn MeshEngine) -> Result<MeshRequest, EditorError> {
        if !self.is_open {
            return Err(EditorError::SessionClosed);
        }
        if self.kind().is_deferred() {
            self.generation += 1;
            log::debug!("deferred {} mesh, generation {}", self.kind(), self.generation);
            return Ok(MeshRequest::Deferred {
                ticket: MeshTicket { generation: self.generation },
                descriptor: self.descriptor.clone(),
            });
        }
        match self.descriptor.to_mesh(engine) {
            Ok(mesh) => {
                self.engine_error = None;
                Ok(MeshRequest::Ready(GeneratedMesh {
                    mesh,
                    descriptor: self.descriptor.clone(),
                }))
            }
            Err(e) => {
                self.engine_error = Some(e.clone());
                Err(EditorError::EngineRejected(e))
            }
        }
    }

    /// Hand in the result of a deferred request
    ///
    /// Returns `Ok(None)` when the result is stale or the picker was closed;
    /// such results are dropped.
    pub fn deliver(
        &mut self,
        ticket: MeshTicket,
        result: Result<MeshResource, EngineError>,
    ) -> Result<Option<GeneratedMesh>, EditorError> {
        if !self.is_open {
            log::debug!("dropped mesh for closed picker (generation {})", ticket.generation);
            return Ok(None);
        }
        if ticket.generation != self.generation {
            log::debug!(
                "dropped stale mesh (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return Ok(None);
        }
        match result {
            Ok(mesh) => {
                self.engine_error = None;
                Ok(Some(GeneratedMesh {
                    mesh,
                    descriptor: self.descriptor.clone(),
                }))
            }
            Err(e) => {
                self.engine_error = Some(e.clone());
                Err(EditorError::EngineRejected(e))
            }
        }
    }

    /// Close the picker; pending results will be dropped
    pub fn close(&mut self) {
        self.is_open = false;
        self.generation += 1;
    }
}
