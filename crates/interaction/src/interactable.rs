//! A touchable surface paired with its proximity field and settings.

use crate::{InteractableConfig, InteractionError};
use glam::Vec3;
use handpoke_math::Transform;
use handpoke_physics::{passes_mask, ProximityField, Surface, SurfaceHit, VolumeMask};

/// Something a poke interactor can hover over and press.
#[derive(Debug)]
pub struct Interactable {
    surface: Box<dyn Surface>,
    proximity_field: Box<dyn ProximityField>,
    volume_mask: Option<VolumeMask>,
    config: InteractableConfig,
}

impl Interactable {
    /// Start building an interactable.
    pub fn builder() -> InteractableBuilder {
        InteractableBuilder::default()
    }

    /// The touchable surface.
    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    /// Current surface transform.
    pub fn transform(&self) -> &Transform {
        self.surface.transform()
    }

    /// Move the surface; the proximity field keeps its pose relative to it.
    ///
    /// Each part keeps its own scale, so a box field sized by its transform
    /// stays the same size.
    pub fn set_transform(&mut self, transform: Transform) {
        let old = *self.surface.transform();
        let field = *self.proximity_field.transform();

        let local_position = old.inverse_transform_point(field.position);
        let relative_rotation = old.rotation.inverse() * field.rotation;
        self.proximity_field.set_transform(Transform {
            position: transform.transform_point(local_position),
            rotation: (transform.rotation * relative_rotation).normalize(),
            scale: field.scale,
        });
        self.surface.set_transform(transform);
    }

    /// Optional mask restricting where touches may land.
    pub fn volume_mask(&self) -> Option<&VolumeMask> {
        self.volume_mask.as_ref()
    }

    /// Replace the volume mask.
    pub fn set_volume_mask(&mut self, mask: Option<VolumeMask>) {
        self.volume_mask = mask;
    }

    /// True when `point` lies inside the volume mask, or there is none.
    pub fn mask_contains(&self, point: Vec3) -> bool {
        passes_mask(self.volume_mask.as_ref(), point)
    }

    /// Validated settings.
    pub fn config(&self) -> &InteractableConfig {
        &self.config
    }

    /// Shorthand for `config().tiebreaker_score`.
    pub fn tiebreaker_score(&self) -> i32 {
        self.config.tiebreaker_score
    }

    /// Change the tiebreaker score at runtime.
    pub fn set_tiebreaker_score(&mut self, score: i32) {
        self.config.tiebreaker_score = score;
    }

    /// Change how far away hovering and pressing are still accepted.
    pub fn set_max_distance(&mut self, distance: f32) -> Result<(), InteractionError> {
        self.reconfigure(|config| config.max_distance = distance)
    }

    /// Change the height the probe must come from before it may hover or press.
    pub fn set_enter_hover_distance(&mut self, distance: f32) -> Result<(), InteractionError> {
        self.reconfigure(|config| config.enter_hover_distance = distance)
    }

    /// Change how far the probe may stray from a press before it is cancelled.
    /// Zero disables cancelling.
    pub fn set_release_distance(&mut self, distance: f32) -> Result<(), InteractionError> {
        self.reconfigure(|config| config.release_distance = distance)
    }

    // Edits are validated as a whole; a rejected edit leaves the config untouched.
    fn reconfigure(
        &mut self,
        edit: impl FnOnce(&mut InteractableConfig),
    ) -> Result<(), InteractionError> {
        let mut config = self.config.clone();
        edit(&mut config);
        self.config = config.validated()?;
        Ok(())
    }

    /// Snap the proximity field's anchor for `point` onto the surface.
    pub fn compute_closest_point(&self, point: Vec3) -> Vec3 {
        let anchor = self.proximity_field.compute_closest_point(point);
        self.surface.closest_surface_point(anchor).point
    }

    /// Full closest-point query against the surface alone.
    pub fn closest_surface_hit(&self, point: Vec3) -> SurfaceHit {
        self.surface.closest_surface_point(point)
    }

    /// Closest surface point to `point`, ignoring the proximity field.
    pub fn closest_surface_point(&self, point: Vec3) -> Vec3 {
        self.surface.closest_surface_point(point).point
    }

    /// Surface normal at the closest surface point to `point`.
    pub fn closest_surface_normal(&self, point: Vec3) -> Vec3 {
        self.surface.closest_surface_point(point).normal
    }
}

/// Builder for [`Interactable`]; surface and proximity field are required.
#[derive(Debug, Default)]
pub struct InteractableBuilder {
    surface: Option<Box<dyn Surface>>,
    proximity_field: Option<Box<dyn ProximityField>>,
    volume_mask: Option<VolumeMask>,
    config: InteractableConfig,
}

impl InteractableBuilder {
    /// Touchable surface.
    pub fn surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Broad-phase proximity field.
    pub fn proximity_field(mut self, field: impl ProximityField + 'static) -> Self {
        self.proximity_field = Some(Box::new(field));
        self
    }

    /// Optional volume mask.
    pub fn volume_mask(mut self, mask: VolumeMask) -> Self {
        self.volume_mask = Some(mask);
        self
    }

    /// Settings; defaults apply otherwise.
    pub fn config(mut self, config: InteractableConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and assemble.
    pub fn build(self) -> Result<Interactable, InteractionError> {
        let surface = self.surface.ok_or(InteractionError::MissingSurface)?;
        let proximity_field = self
            .proximity_field
            .ok_or(InteractionError::MissingProximityField)?;
        Ok(Interactable {
            surface,
            proximity_field,
            volume_mask: self.volume_mask,
            config: self.config.validated()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use handpoke_physics::{BoxProximityField, Facing, PointProximityField, RectSurface};

    fn rect() -> RectSurface {
        RectSurface::new(Transform::IDENTITY, Vec2::splat(0.1), Facing::Forward)
    }

    #[test]
    fn build_requires_surface_and_field() {
        let err = Interactable::builder()
            .proximity_field(PointProximityField::new(Transform::IDENTITY))
            .build()
            .unwrap_err();
        assert_eq!(err, InteractionError::MissingSurface);

        let err = Interactable::builder().surface(rect()).build().unwrap_err();
        assert_eq!(err, InteractionError::MissingProximityField);
    }

    #[test]
    fn distance_setters_validate_and_keep_enter_within_max() {
        let mut pad = Interactable::builder()
            .surface(rect())
            .proximity_field(PointProximityField::new(Transform::IDENTITY))
            .build()
            .unwrap();

        pad.set_release_distance(0.0).unwrap();
        assert_eq!(pad.config().release_distance, 0.0);

        pad.set_enter_hover_distance(0.03).unwrap();
        pad.set_max_distance(0.02).unwrap();
        assert_eq!(pad.config().max_distance, 0.02);
        assert_eq!(pad.config().enter_hover_distance, 0.02);

        let err = pad.set_max_distance(f32::NAN).unwrap_err();
        assert!(matches!(err, InteractionError::InvalidConfig { field: "max_distance", .. }));
        assert_eq!(pad.config().max_distance, 0.02);
        assert!(pad.set_enter_hover_distance(-1.0).is_err());
        assert_eq!(pad.config().enter_hover_distance, 0.02);
    }

    #[test]
    fn build_validates_config() {
        let err = Interactable::builder()
            .surface(rect())
            .proximity_field(PointProximityField::new(Transform::IDENTITY))
            .config(InteractableConfig {
                max_distance: -0.1,
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, InteractionError::InvalidConfig { field: "max_distance", .. }));
    }

    #[test]
    fn closest_point_goes_through_the_field() {
        let interactable = Interactable::builder()
            .surface(rect())
            .proximity_field(PointProximityField::new(Transform::from_position(Vec3::new(
                0.02, 0.0, 0.0,
            ))))
            .build()
            .unwrap();
        let probe = Vec3::new(-0.04, 0.03, 0.05);
        assert_eq!(interactable.compute_closest_point(probe), Vec3::new(0.02, 0.0, 0.0));
        assert_eq!(interactable.closest_surface_point(probe), Vec3::new(-0.04, 0.03, 0.0));
        assert_eq!(interactable.closest_surface_normal(probe), Vec3::Z);
    }

    #[test]
    fn set_transform_moves_surface_and_field() {
        let mut interactable = Interactable::builder()
            .surface(rect())
            .proximity_field(PointProximityField::new(Transform::IDENTITY))
            .build()
            .unwrap();
        let moved = Transform::from_position(Vec3::new(0.0, 0.0, 0.5));
        interactable.set_transform(moved);
        assert_eq!(interactable.transform().position, moved.position);
        assert_eq!(interactable.compute_closest_point(Vec3::ZERO), Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn set_transform_keeps_field_scale_and_offset() {
        let mut interactable = Interactable::builder()
            .surface(rect())
            .proximity_field(BoxProximityField::new(
                Transform::from_position(Vec3::new(0.01, 0.0, 0.0))
                    .with_scale(Vec3::new(0.02, 0.02, 0.01)),
            ))
            .build()
            .unwrap();
        interactable.set_transform(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        // Field now spans x in [1.0, 1.02].
        let p = interactable.compute_closest_point(Vec3::new(2.0, 0.0, 0.0));
        assert!((p - Vec3::new(1.02, 0.0, 0.0)).length() < 1e-5);
    }
}
