use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use super::constants::{ORBIT_DAMPING_FACTOR, ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED};

/// Notifications emitted by the controls, mirroring the usual orbit-control
/// `start` / `change` / `end` events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    Start,
    Change,
    End,
}

/// Spherical coordinates around the orbit target, Y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    pointer_id: i32,
    last: Vec2,
}

/// Rotation-only orbit camera controls with optional damped inertia.
///
/// Pointer deltas accumulate into a pending spherical delta; [`update`]
/// applies it to the eye. With damping on, each update applies
/// `damping_factor` of the pending delta and keeps the rest decaying, so the
/// camera keeps gliding after the drag ends.
///
/// [`update`]: OrbitControls::update
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    drag: Option<Drag>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            enable_zoom: false,
            enable_pan: false,
            rotate_speed: ORBIT_ROTATE_SPEED,
            delta_theta: 0.0,
            delta_phi: 0.0,
            drag: None,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Rotation still waiting to be applied by [`OrbitControls::update`].
    #[inline]
    pub fn pending_rotation(&self) -> (f32, f32) {
        (self.delta_theta, self.delta_phi)
    }

    /// Primary pointer went down. Further pointers while dragging are ignored.
    pub fn begin_drag(&mut self, pointer_id: i32, pos: Vec2) -> Option<ControlEvent> {
        if self.drag.is_some() {
            return None;
        }
        self.drag = Some(Drag {
            pointer_id,
            last: pos,
        });
        Some(ControlEvent::Start)
    }

    /// Pointer moved. `viewport_height` is the element height in the same
    /// units as `pos`; a full-height drag turns the camera once around.
    pub fn drag_to(
        &mut self,
        pointer_id: i32,
        pos: Vec2,
        viewport_height: f32,
    ) -> Option<ControlEvent> {
        let drag = self.drag.as_mut().filter(|d| d.pointer_id == pointer_id)?;
        let delta = (pos - drag.last) * self.rotate_speed;
        drag.last = pos;
        if viewport_height <= 0.0 || delta == Vec2::ZERO {
            return None;
        }
        self.rotate_left(TAU * delta.x / viewport_height);
        self.rotate_up(TAU * delta.y / viewport_height);
        Some(ControlEvent::Change)
    }

    /// Pointer released or cancelled.
    pub fn end_drag(&mut self, pointer_id: i32) -> Option<ControlEvent> {
        match self.drag {
            Some(d) if d.pointer_id == pointer_id => {
                self.drag = None;
                Some(ControlEvent::End)
            }
            _ => None,
        }
    }

    /// Wheel input. Zoom is disabled for the viewer, so this only reports
    /// whether the gesture was consumed.
    pub fn wheel(&mut self, _delta_y: f32) -> Option<ControlEvent> {
        if !self.enable_zoom {
            return None;
        }
        Some(ControlEvent::Change)
    }

    /// Apply pending rotation to `eye`, keeping its distance to the target.
    /// Returns true if the eye moved noticeably.
    pub fn update(&mut self, eye: &mut Vec3) -> bool {
        let offset = *eye - self.target;
        let mut s = Spherical::from_offset(offset);
        if self.enable_damping {
            s.theta += self.delta_theta * self.damping_factor;
            s.phi += self.delta_phi * self.damping_factor;
        } else {
            s.theta += self.delta_theta;
            s.phi += self.delta_phi;
        }
        s.phi = s.phi.clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);

        let new_eye = self.target + s.to_offset();
        let moved = new_eye.distance_squared(*eye) > 1e-12;
        *eye = new_eye;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        moved
    }

    fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }
}
