//! Fields placed on the document preview, each attributed to a signer role.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{CanvasRect, MappedFieldId, MappedFieldKind, Point, SignerRole};
use super::ids::IdGenerator;

/// Letter-size preview in canvas units.
pub const CANVAS_WIDTH: f32 = 612.0;
pub const CANVAS_HEIGHT: f32 = 792.0;
const ID_PREFIX: &str = "map";
const MARGIN: f32 = 48.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedField {
    pub id: MappedFieldId,
    pub kind: MappedFieldKind,
    pub label: String,
    pub owner: SignerRole,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingPlacement {
    kind: MappedFieldKind,
    label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialFieldMapper {
    fields: Vec<MappedField>,
    active_role: Option<SignerRole>,
    drag_source: Option<MappedFieldId>,
    pending: Option<PendingPlacement>,
    placements: u32,
}

impl Default for SpatialFieldMapper {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SpatialFieldMapper {
    pub fn new(active_role: Option<SignerRole>) -> Self {
        Self {
            fields: Vec::new(),
            active_role,
            drag_source: None,
            pending: None,
            placements: 0,
        }
    }

    pub fn fields(&self) -> &[MappedField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, id: &MappedFieldId) -> Option<&MappedField> {
        self.fields.iter().find(|field| &field.id == id)
    }

    pub fn active_role(&self) -> Option<SignerRole> {
        self.active_role
    }

    pub fn drag_source(&self) -> Option<&MappedFieldId> {
        self.drag_source.as_ref()
    }

    pub fn pending_kind(&self) -> Option<MappedFieldKind> {
        self.pending.as_ref().map(|pending| pending.kind)
    }

    pub fn count_for(&self, role: SignerRole) -> usize {
        self.fields
            .iter()
            .filter(|field| field.owner == role)
            .count()
    }

    /// Place a field at the next default position for the active role.
    pub fn add_field(
        &mut self,
        kind: MappedFieldKind,
        label: Option<&str>,
        ids: &dyn IdGenerator,
    ) -> Option<MappedFieldId> {
        let position = default_position(self.placements);
        self.place(kind, label, position, ids)
    }

    pub fn remove_field(&mut self, id: &MappedFieldId) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| &field.id != id);
        if self.drag_source.as_ref() == Some(id) {
            self.drag_source = None;
        }
        self.fields.len() != before
    }

    /// Arm a click-to-place: the next canvas drop creates a field of `kind`.
    pub fn begin_placement(&mut self, kind: MappedFieldKind, label: Option<String>) -> bool {
        if self.active_role.is_none() {
            return false;
        }
        self.pending = Some(PendingPlacement { kind, label });
        true
    }

    pub fn cancel_placement(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn begin_drag(&mut self, id: &MappedFieldId) -> bool {
        if self.field(id).is_none() {
            return false;
        }
        self.drag_source = Some(id.clone());
        true
    }

    /// Finish a drag or a pending placement at the pointer position.
    /// Returns the id of the field that moved or was created.
    pub fn drop_on_canvas(
        &mut self,
        pointer: Point,
        canvas: CanvasRect,
        ids: &dyn IdGenerator,
    ) -> Option<MappedFieldId> {
        let local = canvas.to_local(pointer);

        if let Some(source) = self.drag_source.take() {
            let field = self.fields.iter_mut().find(|field| field.id == source)?;
            field.position = local;
            return Some(source);
        }

        let pending = self.pending.take()?;
        self.place(pending.kind, pending.label.as_deref(), local, ids)
    }

    /// Choose which role new fields belong to; only roles with a signer qualify.
    pub fn set_active_signer_role(&mut self, role: SignerRole, available: &[SignerRole]) -> bool {
        if !available.contains(&role) {
            return false;
        }
        self.active_role = Some(role);
        true
    }

    /// Align with the live signer roles: fall back to the first available role and drop
    /// fields owned by roles that no longer sign. Returns the number of fields removed.
    pub fn reconcile_roles(&mut self, available: &[SignerRole]) -> usize {
        if self.active_role.map_or(true, |role| !available.contains(&role)) {
            self.active_role = available.first().copied();
            if self.active_role.is_none() {
                self.pending = None;
            }
        }

        let before = self.fields.len();
        self.fields.retain(|field| available.contains(&field.owner));
        let removed = before - self.fields.len();

        if let Some(source) = &self.drag_source {
            if !self.fields.iter().any(|field| &field.id == source) {
                self.drag_source = None;
            }
        }

        if removed > 0 {
            debug!(removed, "dropped mapped fields owned by removed signer roles");
        }
        removed
    }

    fn place(
        &mut self,
        kind: MappedFieldKind,
        label: Option<&str>,
        position: Point,
        ids: &dyn IdGenerator,
    ) -> Option<MappedFieldId> {
        let owner = self.active_role?;
        let id = MappedFieldId(ids.next_id(ID_PREFIX));
        let label = label
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(kind.label())
            .to_string();

        self.fields.push(MappedField {
            id: id.clone(),
            kind,
            label,
            owner,
            position,
        });
        self.placements += 1;
        Some(id)
    }
}

/// Scatter successive fields over the page with an additive recurrence so they rarely
/// stack on top of each other.
fn default_position(sequence: u32) -> Point {
    const ALPHA_X: f32 = 0.618_034;
    const ALPHA_Y: f32 = 0.754_878;

    let n = sequence as f32 + 1.0;
    let usable_w = CANVAS_WIDTH - 2.0 * MARGIN;
    let usable_h = CANVAS_HEIGHT - 2.0 * MARGIN;
    Point::new(
        MARGIN + (n * ALPHA_X).fract() * usable_w,
        MARGIN + (n * ALPHA_Y).fract() * usable_h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_positions_stay_inside_the_margins() {
        for sequence in 0..200 {
            let point = default_position(sequence);
            assert!(point.x >= MARGIN && point.x <= CANVAS_WIDTH - MARGIN);
            assert!(point.y >= MARGIN && point.y <= CANVAS_HEIGHT - MARGIN);
        }
        assert_ne!(default_position(0), default_position(1));
    }
}
