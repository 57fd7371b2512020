//! Ordered signing sequence for a signable document.
//!
//! At most one team-member entry exists and it always enters at the front. Company
//! entries are appended with an empty identity until a directory signer is chosen.
//! The order of `entries` is the signing order.

use serde::{Deserialize, Serialize};

use super::domain::{MoveDirection, SignerId, SignerRole};
use super::ids::IdGenerator;
use super::reference::ReferenceData;
use super::schema::swap_adjacent;

/// Identity slot filled by whichever employee the document is sent to.
pub const TEAM_MEMBER_IDENTITY: &str = "assigned-employee";
pub const UNASSIGNED_COMPANY_LABEL: &str = "Company Signer (unassigned)";
const ID_PREFIX: &str = "sig";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerEntry {
    pub id: SignerId,
    pub role: SignerRole,
    pub identity_ref: String,
}

impl SignerEntry {
    pub fn is_resolved(&self) -> bool {
        !self.identity_ref.is_empty()
    }

    /// Label used in the review summary's signing order.
    pub fn display_label(&self, reference: &ReferenceData) -> String {
        match self.role {
            SignerRole::TeamMember => SignerRole::TeamMember.label().to_string(),
            SignerRole::Company => reference
                .company_signer(&self.identity_ref)
                .map(|signer| signer.name.clone())
                .unwrap_or_else(|| UNASSIGNED_COMPANY_LABEL.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerSequenceManager {
    entries: Vec<SignerEntry>,
}

impl SignerSequenceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence with only the team member, the default for signable documents.
    pub fn with_team_member(ids: &dyn IdGenerator) -> Self {
        let mut manager = Self::new();
        manager.toggle_team_member(ids);
        manager
    }

    pub fn entries(&self) -> &[SignerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_role(&self, role: SignerRole) -> bool {
        self.entries.iter().any(|entry| entry.role == role)
    }

    pub fn company_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.role == SignerRole::Company)
            .count()
    }

    /// Roles with at least one entry, in canonical order.
    pub fn available_roles(&self) -> Vec<SignerRole> {
        SignerRole::ordered()
            .into_iter()
            .filter(|role| self.has_role(*role))
            .collect()
    }

    pub fn unresolved_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.is_resolved())
            .count()
    }

    pub fn toggle_team_member(&mut self, ids: &dyn IdGenerator) {
        if self.has_role(SignerRole::TeamMember) {
            self.entries
                .retain(|entry| entry.role != SignerRole::TeamMember);
        } else {
            self.entries.insert(
                0,
                SignerEntry {
                    id: SignerId(ids.next_id(ID_PREFIX)),
                    role: SignerRole::TeamMember,
                    identity_ref: TEAM_MEMBER_IDENTITY.to_string(),
                },
            );
        }
    }

    pub fn toggle_company(&mut self, ids: &dyn IdGenerator) {
        if self.has_role(SignerRole::Company) {
            self.entries.retain(|entry| entry.role != SignerRole::Company);
        } else {
            self.push_company(ids);
        }
    }

    /// Append another company signer; only offered once company signing is enabled.
    pub fn add_company_signer(&mut self, ids: &dyn IdGenerator) -> Option<SignerId> {
        if !self.has_role(SignerRole::Company) {
            return None;
        }
        Some(self.push_company(ids))
    }

    pub fn set_identity(&mut self, id: &SignerId, identity_ref: impl Into<String>) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| &entry.id == id && entry.role == SignerRole::Company)
        {
            Some(entry) => {
                entry.identity_ref = identity_ref.into();
                true
            }
            None => false,
        }
    }

    /// Remove a company entry while at least one other company entry remains.
    /// The team member leaves only through [`Self::toggle_team_member`].
    pub fn remove_entry(&mut self, id: &SignerId) -> bool {
        let removable = self
            .entries
            .iter()
            .any(|entry| &entry.id == id && entry.role == SignerRole::Company)
            && self.company_count() > 1;
        if removable {
            self.entries.retain(|entry| &entry.id != id);
        }
        removable
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        swap_adjacent(&mut self.entries, index, MoveDirection::Up)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        swap_adjacent(&mut self.entries, index, MoveDirection::Down)
    }

    pub fn signing_order(&self, reference: &ReferenceData) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.display_label(reference))
            .collect()
    }

    fn push_company(&mut self, ids: &dyn IdGenerator) -> SignerId {
        let id = SignerId(ids.next_id(ID_PREFIX));
        self.entries.push(SignerEntry {
            id: id.clone(),
            role: SignerRole::Company,
            identity_ref: String::new(),
        });
        id
    }
}
