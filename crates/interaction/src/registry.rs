//! Arena of interactables with stable ids.

use crate::{Interactable, InteractionError};
use handpoke_core::InteractableId;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug)]
struct Slot {
    interactable: Interactable,
    enabled: bool,
}

/// Every interactable an interactor may consider.
///
/// Ids are slot indices that are never reused. Removing an interactable
/// leaves a tombstone, so an id held by an interactor can never alias a newer
/// registration.
#[derive(Debug, Default)]
pub struct InteractableRegistry {
    slots: Vec<Option<Slot>>,
    active: BTreeSet<InteractableId>,
}

impl InteractableRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interactable; it is listed immediately.
    pub fn register(&mut self, interactable: Interactable) -> InteractableId {
        let id = InteractableId::from_raw(self.slots.len() as u32);
        self.slots.push(Some(Slot {
            interactable,
            enabled: true,
        }));
        self.active.insert(id);
        debug!(%id, "registered interactable");
        id
    }

    /// Remove and return an interactable.
    pub fn unregister(&mut self, id: InteractableId) -> Result<Interactable, InteractionError> {
        let slot = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(InteractionError::UnknownInteractable(id))?;
        self.active.remove(&id);
        debug!(%id, "unregistered interactable");
        Ok(slot.interactable)
    }

    /// Show or hide an interactable without unregistering it.
    pub fn set_enabled(
        &mut self,
        id: InteractableId,
        enabled: bool,
    ) -> Result<(), InteractionError> {
        let slot = self.slot_mut(id)?;
        if slot.enabled == enabled {
            return Ok(());
        }
        slot.enabled = enabled;
        if enabled {
            self.active.insert(id);
        } else {
            self.active.remove(&id);
        }
        debug!(%id, enabled, "interactable enabled flag changed");
        Ok(())
    }

    /// Registered interactable, enabled or not.
    pub fn get(&self, id: InteractableId) -> Option<&Interactable> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .map(|slot| &slot.interactable)
    }

    /// Mutable access, e.g. to move a surface between frames.
    pub fn get_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .map(|slot| &mut slot.interactable)
    }

    /// Registered, whether enabled or not.
    pub fn contains(&self, id: InteractableId) -> bool {
        self.get(id).is_some()
    }

    /// Registered and enabled.
    pub fn is_listed(&self, id: InteractableId) -> bool {
        self.active.contains(&id)
    }

    /// Enabled interactables in id order.
    pub fn list(&self) -> impl Iterator<Item = (InteractableId, &Interactable)> + '_ {
        self.active
            .iter()
            .filter_map(move |&id| self.get(id).map(|interactable| (id, interactable)))
    }

    /// Number of listed interactables.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True when nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn slot_mut(&mut self, id: InteractableId) -> Result<&mut Slot, InteractionError> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(InteractionError::UnknownInteractable(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use handpoke_math::Transform;
    use handpoke_physics::{Facing, PointProximityField, RectSurface};

    fn button() -> Interactable {
        Interactable::builder()
            .surface(RectSurface::new(Transform::IDENTITY, Vec2::splat(0.05), Facing::Forward))
            .proximity_field(PointProximityField::new(Transform::IDENTITY))
            .build()
            .unwrap()
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = InteractableRegistry::new();
        let a = registry.register(button());
        let b = registry.register(button());
        registry.unregister(a).unwrap();
        let c = registry.register(button());
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert!(!registry.contains(a));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unregister_unknown_fails() {
        let mut registry = InteractableRegistry::new();
        let a = registry.register(button());
        registry.unregister(a).unwrap();
        assert_eq!(
            registry.unregister(a).unwrap_err(),
            InteractionError::UnknownInteractable(a)
        );
        assert!(registry.set_enabled(InteractableId::from_raw(42), false).is_err());
    }

    #[test]
    fn disabled_interactables_are_not_listed() {
        let mut registry = InteractableRegistry::new();
        let a = registry.register(button());
        let b = registry.register(button());
        registry.set_enabled(a, false).unwrap();

        let listed: Vec<_> = registry.list().map(|(id, _)| id).collect();
        assert_eq!(listed, vec![b]);
        assert!(registry.contains(a));
        assert!(!registry.is_listed(a));

        registry.set_enabled(a, true).unwrap();
        let listed: Vec<_> = registry.list().map(|(id, _)| id).collect();
        assert_eq!(listed, vec![a, b]);
    }
}
