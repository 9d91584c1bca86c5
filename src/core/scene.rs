use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

use super::camera::Camera;
use super::constants::{AUTO_ROTATE_STEP_RAD, MODEL_FIT_EXTENT};
use super::orbit::{ControlEvent, OrbitControls};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box around `points`; `None` when there are none.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Aabb {
            min: first,
            max: first,
        };
        for p in it {
            b.expand(p);
        }
        Some(b)
    }

    #[inline]
    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    pub fn transformed(&self, m: Mat4) -> Aabb {
        let corners = (0..8).map(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        });
        // Eight corners always yield a box.
        let mut out = Aabb {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        };
        for c in corners {
            out.expand(m.transform_point3(c));
        }
        out
    }
}

/// Uniform scale plus translation that fits a model into the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub scale: f32,
    pub offset: Vec3,
}

impl Placement {
    pub const IDENTITY: Placement = Placement {
        scale: 1.0,
        offset: Vec3::ZERO,
    };

    /// Scale so the largest dimension of `bounds` equals `extent`, and shift
    /// the scaled centre onto the origin. Degenerate (flat-to-a-point or
    /// non-finite) boxes keep unit scale and are only centred.
    pub fn fit(bounds: &Aabb, extent: f32) -> Self {
        let max_dim = bounds.max_dimension();
        let scale = if max_dim.is_finite() && max_dim > f32::EPSILON {
            extent / max_dim
        } else {
            1.0
        };
        Placement {
            scale,
            offset: -bounds.center() * scale,
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.offset) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Placement plus the accumulated auto-rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    pub placement: Placement,
    pub yaw: f32,
}

impl ModelTransform {
    /// Yaw is applied after centring so the model spins around its own
    /// centre, which stays on the origin.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw) * self.placement.matrix()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RotationState {
    #[default]
    Rotating,
    UserControlled,
}

/// Everything a viewer needs to produce a frame, minus the GPU.
#[derive(Clone, Debug)]
pub struct ViewerState {
    pub camera: Camera,
    pub controls: OrbitControls,
    rotation: RotationState,
    model: Option<ModelTransform>,
}

impl ViewerState {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Camera::for_viewport(width, height);
        let mut controls = OrbitControls::new(camera.target);
        controls.update(&mut camera.eye);
        Self {
            camera,
            controls,
            rotation: RotationState::Rotating,
            model: None,
        }
    }

    #[inline]
    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    #[inline]
    pub fn model(&self) -> Option<&ModelTransform> {
        self.model.as_ref()
    }

    pub fn on_control_event(&mut self, ev: ControlEvent) {
        match ev {
            ControlEvent::Start => self.rotation = RotationState::UserControlled,
            ControlEvent::End => self.rotation = RotationState::Rotating,
            ControlEvent::Change => {}
        }
    }

    /// Fit a freshly loaded model with the given model-space bounds.
    pub fn place_model(&mut self, bounds: &Aabb) -> Placement {
        let placement = Placement::fit(bounds, MODEL_FIT_EXTENT);
        self.model = Some(ModelTransform { placement, yaw: 0.0 });
        placement
    }

    /// Advance one frame: auto-rotate if allowed, then settle the controls.
    pub fn tick(&mut self) {
        if self.rotation == RotationState::Rotating {
            if let Some(m) = &mut self.model {
                // Kept in [0, 2π) so the step never drops below f32 precision
                m.yaw = (m.yaw + AUTO_ROTATE_STEP_RAD).rem_euclid(TAU);
            }
        }
        self.controls.update(&mut self.camera.eye);
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model
            .as_ref()
            .map(ModelTransform::matrix)
            .unwrap_or(Mat4::IDENTITY)
    }
}
