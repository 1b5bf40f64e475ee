use anyhow::{Context, Result};
use glam::{EulerRot, Quat, Vec2, Vec3};
use handpoke_interaction::{
    Interactable, InteractableConfig, InteractableId, InteractableRegistry, InteractorConfig,
};
use handpoke_math::Transform;
use handpoke_physics::{
    check_extent, Aabb, BoxProximityField, CircleProximityField, Collider, ColliderSurface, Facing,
    MeshSurface, PlaneSurface, PointProximityField, ProximityShape, RectSurface, SurfaceShape,
    VolumeMask,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{info, warn};

/// A scene file: interactor settings plus the interactables to register.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub interactor: InteractorConfig,
    pub interactables: Vec<InteractableSpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        // A single 5 cm push button at the origin facing +Z.
        Self {
            interactor: InteractorConfig::default(),
            interactables: vec![InteractableSpec {
                name: Some("button".to_string()),
                transform: TransformSpec::default(),
                surface: SurfaceSpec::Rect {
                    size: [0.05, 0.05],
                    facing: FacingSpec::Forward,
                    double_sided: false,
                },
                proximity: ProximitySpec::Box {
                    size: [0.05, 0.05, 0.01],
                },
                volume_mask: None,
                config: InteractableConfig::default(),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InteractableSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub transform: TransformSpec,
    pub surface: SurfaceSpec,
    pub proximity: ProximitySpec,
    #[serde(default)]
    pub volume_mask: Option<VolumeMaskSpec>,
    #[serde(default)]
    pub config: InteractableConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TransformSpec {
    pub position: [f32; 3],
    /// XYZ Euler angles in degrees.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl TransformSpec {
    pub fn to_transform(self) -> Result<Transform> {
        let scale = Vec3::from_array(self.scale);
        if !scale.is_finite() || scale.cmpeq(Vec3::ZERO).any() {
            anyhow::bail!("transform scale must be finite and non-zero, got {:?}", self.scale);
        }
        let [x, y, z] = self.rotation.map(f32::to_radians);
        Ok(Transform {
            position: Vec3::from_array(self.position),
            rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
            scale,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingSpec {
    #[default]
    Forward,
    Backward,
}

impl From<FacingSpec> for Facing {
    fn from(facing: FacingSpec) -> Self {
        match facing {
            FacingSpec::Forward => Facing::Forward,
            FacingSpec::Backward => Facing::Backward,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceSpec {
    Plane {
        #[serde(default)]
        facing: FacingSpec,
        #[serde(default)]
        double_sided: bool,
    },
    Rect {
        size: [f32; 2],
        #[serde(default)]
        facing: FacingSpec,
        #[serde(default)]
        double_sided: bool,
    },
    Box {
        half_extents: [f32; 3],
    },
    Sphere {
        radius: f32,
    },
    Mesh {
        vertices: Vec<[f32; 3]>,
        indices: Vec<u32>,
    },
}

impl SurfaceSpec {
    pub fn build(&self, transform: Transform) -> Result<SurfaceShape> {
        let shape = match self {
            SurfaceSpec::Plane {
                facing,
                double_sided,
            } => PlaneSurface::new(transform, (*facing).into())
                .double_sided(*double_sided)
                .into(),
            SurfaceSpec::Rect {
                size,
                facing,
                double_sided,
            } => {
                let size = Vec2::new(
                    check_extent("rect width", size[0])?,
                    check_extent("rect height", size[1])?,
                );
                RectSurface::new(transform, size, (*facing).into())
                    .double_sided(*double_sided)
                    .into()
            }
            SurfaceSpec::Box { half_extents } => {
                let collider = Collider::Box {
                    half_extents: Vec3::from_array(*half_extents),
                }
                .validated()?;
                ColliderSurface::new(transform, collider).into()
            }
            SurfaceSpec::Sphere { radius } => {
                let collider = Collider::Sphere { radius: *radius }.validated()?;
                ColliderSurface::new(transform, collider).into()
            }
            SurfaceSpec::Mesh { vertices, indices } => {
                let vertices = vertices.iter().copied().map(Vec3::from_array).collect();
                MeshSurface::new(transform, vertices, indices.clone())?.into()
            }
        };
        Ok(shape)
    }
}

/// Proximity field placed at the surface transform.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProximitySpec {
    Point,
    Circle { radius: f32 },
    /// Solid box of the given world size, oriented like the surface.
    Box { size: [f32; 3] },
}

impl ProximitySpec {
    pub fn build(&self, transform: Transform) -> Result<ProximityShape> {
        let shape = match self {
            ProximitySpec::Point => ProximityShape::Point(PointProximityField::new(transform)),
            ProximitySpec::Circle { radius } => {
                let radius = check_extent("circle radius", *radius)?;
                ProximityShape::Circle(CircleProximityField::new(transform, radius))
            }
            ProximitySpec::Box { size } => {
                for (axis, value) in size.iter().enumerate() {
                    if check_extent("box field size", *value)? == 0.0 {
                        anyhow::bail!("box field size along axis {axis} must be non-zero");
                    }
                }
                ProximityShape::Box(BoxProximityField::new(Transform {
                    scale: Vec3::from_array(*size),
                    ..transform
                }))
            }
        };
        Ok(shape)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VolumeMaskSpec {
    Aabb {
        min: [f32; 3],
        max: [f32; 3],
    },
    Box {
        center: [f32; 3],
        half_extents: [f32; 3],
    },
    Sphere {
        center: [f32; 3],
        radius: f32,
    },
}

impl VolumeMaskSpec {
    pub fn build(&self) -> Result<VolumeMask> {
        let mask = match self {
            VolumeMaskSpec::Aabb { min, max } => {
                let (min, max) = (Vec3::from_array(*min), Vec3::from_array(*max));
                if !(min.is_finite() && max.is_finite()) || min.cmpgt(max).any() {
                    anyhow::bail!(
                        "aabb mask needs finite bounds with min <= max, got {min} .. {max}"
                    );
                }
                VolumeMask::Aabb(Aabb::new(min, max))
            }
            VolumeMaskSpec::Box {
                center,
                half_extents,
            } => {
                for (axis, extent) in half_extents.iter().enumerate() {
                    check_extent("mask half extent", *extent)
                        .with_context(|| format!("box mask axis {axis}"))?;
                }
                VolumeMask::Box {
                    transform: Transform::from_position(Vec3::from_array(*center)),
                    half_extents: Vec3::from_array(*half_extents),
                }
            }
            VolumeMaskSpec::Sphere { center, radius } => VolumeMask::Sphere {
                center: Vec3::from_array(*center),
                radius: check_extent("mask radius", *radius)?,
            },
        };
        Ok(mask)
    }
}

/// Registered scene ready to be probed.
pub struct Scene {
    pub interactor: InteractorConfig,
    pub registry: InteractableRegistry,
    pub names: BTreeMap<InteractableId, String>,
}

impl Scene {
    pub fn name_of(&self, id: InteractableId) -> String {
        self.names.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }
}

impl SceneConfig {
    /// Load a scene from an explicit path, falling back to the default scene on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SceneConfig>(&contents) {
                Ok(scene) => scene,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using default scene", path.display());
                    SceneConfig::default()
                }
            },
            Err(err) => {
                warn!("Failed to read {}: {err}. Using default scene", path.display());
                SceneConfig::default()
            }
        }
    }

    /// Build every interactable and register it.
    pub fn build(&self) -> Result<Scene> {
        let interactor = self.interactor.validated().context("invalid interactor settings")?;
        let mut registry = InteractableRegistry::new();
        let mut names = BTreeMap::new();

        for (index, spec) in self.interactables.iter().enumerate() {
            let label = spec.name.clone().unwrap_or_else(|| format!("interactable {index}"));
            let interactable =
                build_interactable(spec).with_context(|| format!("failed to build {label}"))?;
            let id = registry.register(interactable);
            names.insert(id, label);
        }

        info!(interactables = registry.len(), "scene built");
        Ok(Scene {
            interactor,
            registry,
            names,
        })
    }
}

fn build_interactable(spec: &InteractableSpec) -> Result<Interactable> {
    let transform = spec.transform.to_transform()?;
    let mut builder = Interactable::builder()
        .surface(spec.surface.build(transform)?)
        .proximity_field(spec.proximity.build(transform)?)
        .config(spec.config.clone());
    if let Some(mask) = &spec.volume_mask {
        builder = builder.volume_mask(mask.build()?);
    }
    Ok(builder.build()?)
}
