use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyreach_input::{Action, InputState};
use skyreach_terrain::{HeightField, HeightSampler};

use crate::config::ConfigError;
use crate::player::PlayerState;
use crate::vitals::{VitalsModel, VitalsRates, VitalsState};

/// Movement constants. Speeds in units/second, costs per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub walk_speed: f32,
    pub dash_speed: f32,
    /// Multiplies acceleration and drag while dashing.
    pub dash_boost: f32,
    /// Horizontal drag rate per second.
    pub drag: f32,
    /// Eye height above the ground surface.
    pub eye_height: f32,
    pub jump_velocity: f32,
    pub glide_jump_velocity: f32,
    pub jump_cost: f32,
    pub glide_jump_cost: f32,
    pub gravity: f32,
    /// Fastest allowed descent while gliding.
    pub glide_max_descent: f32,
    pub glide_cost: f32,
    pub glide_bob_amplitude: f32,
    pub glide_bob_frequency: f32,
    /// How far below the world datum the avatar may fall before recovery.
    pub respawn_depth: f32,
    pub respawn_point: Vec3,
    pub fall_damage: f32,
    pub dash_cost: f32,
    /// Mana drained per frame while jump and glide are both held.
    pub jump_glide_mana_cost: f32,
    /// Seconds between environmental attrition hits.
    pub attrition_period: f32,
    pub attrition_damage: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 14.0,
            dash_speed: 28.0,
            dash_boost: 1.75,
            drag: 8.0,
            eye_height: 3.4,
            jump_velocity: 10.0,
            glide_jump_velocity: 8.0,
            jump_cost: 0.12,
            glide_jump_cost: 0.08,
            gravity: 30.0,
            glide_max_descent: 6.0,
            glide_cost: 0.06,
            glide_bob_amplitude: 0.01,
            glide_bob_frequency: 6.0,
            respawn_depth: 30.0,
            respawn_point: Vec3::new(0.0, 25.0, 0.0),
            fall_damage: 0.2,
            dash_cost: 0.002,
            jump_glide_mana_cost: 0.0005,
            attrition_period: 12.0,
            attrition_damage: 0.05,
        }
    }
}

impl MovementTuning {
    /// Reject tuning that would make [`MovementController::step`] misbehave:
    /// every value finite, rates and costs non-negative, boost and attrition
    /// period strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("dash_speed", self.dash_speed),
            ("drag", self.drag),
            ("eye_height", self.eye_height),
            ("jump_velocity", self.jump_velocity),
            ("glide_jump_velocity", self.glide_jump_velocity),
            ("jump_cost", self.jump_cost),
            ("glide_jump_cost", self.glide_jump_cost),
            ("gravity", self.gravity),
            ("glide_max_descent", self.glide_max_descent),
            ("glide_cost", self.glide_cost),
            ("glide_bob_amplitude", self.glide_bob_amplitude),
            ("respawn_depth", self.respawn_depth),
            ("fall_damage", self.fall_damage),
            ("dash_cost", self.dash_cost),
            ("jump_glide_mana_cost", self.jump_glide_mana_cost),
            ("attrition_damage", self.attrition_damage),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning {
                    field,
                    value,
                    requirement: "finite and non-negative",
                });
            }
        }
        for (field, value) in [("dash_boost", self.dash_boost), ("attrition_period", self.attrition_period)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTuning {
                    field,
                    value,
                    requirement: "finite and positive",
                });
            }
        }
        let p = self.respawn_point;
        for (field, value) in [
            ("glide_bob_frequency", self.glide_bob_frequency),
            ("respawn_point.x", p.x),
            ("respawn_point.y", p.y),
            ("respawn_point.z", p.z),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidTuning {
                    field,
                    value,
                    requirement: "finite",
                });
            }
        }
        Ok(())
    }
}

/// Something noteworthy that happened during a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameEvent {
    /// Left the ground under jump input.
    Jumped { frame: u64, gliding: bool },
    /// Fell below the recovery floor and was returned to the respawn point.
    Respawned { frame: u64, from: Vec3 },
    /// Periodic environmental damage was applied.
    AttritionDamage { frame: u64, amount: f32 },
}

/// What observers see after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub player: PlayerState,
    pub vitals: VitalsState,
}

/// Integrates avatar motion against a height field and applies the vitals
/// side effects of each action.
///
/// The controller owns the frame's state but not the frame loop: an external
/// driver calls [`MovementController::step`] once per rendered frame.
#[derive(Debug, Clone)]
pub struct MovementController<H = HeightField> {
    terrain: H,
    height_offset: f32,
    tuning: MovementTuning,
    player: PlayerState,
    vitals: VitalsModel,
    attrition_timer: f32,
    elapsed: f32,
    frame: u64,
    events: Vec<FrameEvent>,
}

impl<H: HeightSampler> MovementController<H> {
    /// New session: avatar at the respawn point, all pools full.
    pub fn new(terrain: H, height_offset: f32, tuning: MovementTuning, rates: VitalsRates) -> Self {
        Self {
            terrain,
            height_offset,
            player: PlayerState::at(tuning.respawn_point),
            tuning,
            vitals: VitalsModel::new(rates),
            attrition_timer: 0.0,
            elapsed: 0.0,
            frame: 0,
            events: Vec::new(),
        }
    }

    pub fn terrain(&self) -> &H {
        &self.terrain
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn vitals(&self) -> VitalsState {
        self.vitals.state()
    }

    #[cfg(test)]
    pub(crate) fn vitals_mut(&mut self) -> &mut VitalsModel {
        &mut self.vitals
    }

    /// Move the avatar without integrating, keeping its velocity.
    #[cfg(test)]
    pub(crate) fn teleport(&mut self, position: Vec3) {
        self.player.position = position;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds accumulated toward the next attrition hit.
    pub fn attrition_elapsed(&self) -> f32 {
        self.attrition_timer
    }

    /// Elevation the avatar's eye rests at when standing on `(x, z)`.
    pub fn contact_height(&self, x: f32, z: f32) -> f32 {
        self.terrain.height(x, z) + self.height_offset + self.tuning.eye_height
    }

    /// Falling below this triggers recovery.
    pub fn respawn_floor(&self) -> f32 {
        self.height_offset - self.tuning.respawn_depth
    }

    pub fn events(&self) -> &[FrameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> FrameOutput {
        FrameOutput {
            player: self.player,
            vitals: self.vitals.state(),
        }
    }

    /// Advance one frame.
    ///
    /// `camera_forward` only needs a meaningful horizontal component; it is
    /// flattened and normalized here. `delta` must be finite and non-negative.
    pub fn step(&mut self, delta: f32, input: &InputState, camera_forward: Vec3) -> FrameOutput {
        debug_assert!(
            delta.is_finite() && delta >= 0.0,
            "frame delta must be finite and non-negative, got {delta}"
        );
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let t = self.tuning;

        self.frame += 1;
        self.elapsed += delta;
        self.vitals.tick(delta);
        self.player.latch_input(input);

        let dash = input.is_held(Action::Dash);
        let jump = input.is_held(Action::Jump);
        let glide = input.is_held(Action::Glide);

        let mut position = self.player.position;
        let mut velocity = self.player.velocity;

        // Exponential approach toward the wished velocity: drag alone when idle,
        // terminal speed equals the nominal speed when input is held.
        let (speed, boost) = if dash {
            (t.dash_speed, t.dash_boost)
        } else {
            (t.walk_speed, 1.0)
        };
        let damping = (1.0 - t.drag * boost * delta).max(0.0);
        let (forward, side) = horizontal_basis(camera_forward);
        let axes = input.move_axes().clamp_length_max(1.0);
        let wish = (forward * axes.y + side * axes.x) * speed;
        velocity.x = velocity.x * damping + wish.x * (1.0 - damping);
        velocity.z = velocity.z * damping + wish.z * (1.0 - damping);

        position.x += velocity.x * delta;
        position.z += velocity.z * delta;

        let surface = self.contact_height(position.x, position.z);
        if position.y <= surface {
            position.y = surface;
            velocity.y = 0.0;
            self.player.grounded = true;
            if jump {
                let (impulse, cost) = if glide {
                    (t.glide_jump_velocity, t.glide_jump_cost)
                } else {
                    (t.jump_velocity, t.jump_cost)
                };
                velocity.y = impulse;
                self.vitals.spend_energy(cost);
                self.record(FrameEvent::Jumped {
                    frame: self.frame,
                    gliding: glide,
                });
            }
        } else {
            self.player.grounded = false;
            velocity.y -= t.gravity * delta;
            if glide {
                velocity.y = velocity.y.max(-t.glide_max_descent);
                position.y += (self.elapsed * t.glide_bob_frequency).sin() * t.glide_bob_amplitude;
                self.vitals.spend_energy(t.glide_cost);
            }
        }

        position.y += velocity.y * delta;

        if position.y < self.respawn_floor() {
            let from = position;
            position = t.respawn_point;
            velocity = Vec3::ZERO;
            self.player.grounded = false;
            self.vitals.apply_damage(t.fall_damage);
            self.record(FrameEvent::Respawned {
                frame: self.frame,
                from,
            });
        }

        if dash {
            self.vitals.spend_energy(t.dash_cost);
        }
        if jump && glide {
            self.vitals.spend_mana(t.jump_glide_mana_cost);
        }

        self.attrition_timer += delta;
        if self.attrition_timer >= t.attrition_period {
            self.attrition_timer = 0.0;
            self.vitals.apply_damage(t.attrition_damage);
            self.record(FrameEvent::AttritionDamage {
                frame: self.frame,
                amount: t.attrition_damage,
            });
        }

        self.player.position = position;
        self.player.velocity = velocity;

        tracing::trace!(
            frame = self.frame,
            x = position.x,
            y = position.y,
            z = position.z,
            grounded = self.player.grounded,
            "step complete"
        );

        self.snapshot()
    }

    /// FNV-1a over the frame counter, player and vitals, for determinism checks.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&self.frame.to_le_bytes());
        let v = self.vitals.state();
        let floats = [
            self.player.position.x,
            self.player.position.y,
            self.player.position.z,
            self.player.velocity.x,
            self.player.velocity.y,
            self.player.velocity.z,
            v.health(),
            v.mana(),
            v.energy(),
            self.attrition_timer,
        ];
        for f in floats {
            mix(&f.to_le_bytes());
        }
        h
    }

    fn record(&mut self, event: FrameEvent) {
        tracing::debug!(?event, "frame event");
        self.events.push(event);
    }
}

/// Forward and right vectors on the horizontal plane.
///
/// Looking straight up or down leaves no horizontal heading; fall back to -Z.
fn horizontal_basis(camera_forward: Vec3) -> (Vec3, Vec3) {
    let forward = camera_forward.with_y(0.0).try_normalize().unwrap_or(Vec3::NEG_Z);
    let right = forward.cross(Vec3::Y).normalize();
    (forward, right)
}
