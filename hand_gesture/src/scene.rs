//! Visual state driven by committed gestures.
//!
//! | Gesture | Effect |
//! |---|---|
//! | `thumbUp` | hue += step (mod 360) |
//! | `thumbDown` | hue −= step (mod 360, non-negative) |
//! | `open` | show rectangle |
//! | `fist` | hide rectangle |
//! | `peace` | enable particles, seed a new batch |
//! | `pointing` | disable particles, clear them |

use rand::Rng;

use crate::label::GestureLabel;

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

/// Starting life of a particle; also its initial opacity on a 0–255 scale.
pub const PARTICLE_LIFE: f32 = 255.0;
/// Life lost per tick.
pub const PARTICLE_DECAY: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x:    f32,
    pub y:    f32,
    pub vx:   f32,
    pub vy:   f32,
    pub size: f32,
    /// Degrees, 0–360.
    pub hue:  f32,
    pub life: f32,
}

impl Particle {
    /// Random particle somewhere inside a `width` × `height` canvas.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Particle {
            x:    rng.gen_range(0.0..width),
            y:    rng.gen_range(0.0..height),
            vx:   rng.gen_range(-2.0..2.0),
            vy:   rng.gen_range(-2.0..2.0),
            size: rng.gen_range(5.0..15.0),
            hue:  rng.gen_range(0.0..360.0),
            life: PARTICLE_LIFE,
        }
    }

    /// Advance one tick.  Returns false once the particle has expired.
    pub fn tick(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= PARTICLE_DECAY;
        self.life > 0.0
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SceneSettings
// ════════════════════════════════════════════════════════════════════════════

/// Fixed parameters of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    /// Degrees per thumb commit.
    pub hue_step:       f32,
    pub width:          f32,
    pub height:         f32,
    /// Particles added per peace commit.
    pub particle_batch: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        SceneSettings {
            hue_step:       2.0,
            width:          640.0,
            height:         480.0,
            particle_batch: 5,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scene
// ════════════════════════════════════════════════════════════════════════════

/// Everything a committed gesture can change.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub settings:        SceneSettings,
    hue:                 f32,
    show_rect:           bool,
    particles_enabled:   bool,
    particles:           Vec<Particle>,
    current:             GestureLabel,
}

impl Scene {
    pub fn new(settings: SceneSettings) -> Self {
        Scene { settings, ..Scene::default() }
    }

    /// Apply one committed gesture.
    pub fn apply<R: Rng + ?Sized>(&mut self, gesture: GestureLabel, rng: &mut R) {
        self.current = gesture;
        match gesture {
            GestureLabel::ThumbUp => {
                self.hue = wrap_hue(self.hue + self.settings.hue_step);
            }
            GestureLabel::ThumbDown => {
                self.hue = wrap_hue(self.hue - self.settings.hue_step);
            }
            GestureLabel::Open => self.show_rect = true,
            GestureLabel::Fist => self.show_rect = false,
            GestureLabel::Peace => {
                self.particles_enabled = true;
                self.seed_particles(rng);
            }
            GestureLabel::Pointing => {
                self.particles_enabled = false;
                self.particles.clear();
            }
            GestureLabel::None => {}
        }
    }

    fn seed_particles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let SceneSettings { width, height, particle_batch, .. } = self.settings;
        self.particles
            .extend((0..particle_batch).map(|_| Particle::spawn(rng, width, height)));
    }

    /// Advance particle animation by one frame; expired particles are dropped.
    /// Particles are frozen while disabled.
    pub fn tick(&mut self) {
        if self.particles_enabled {
            self.particles.retain_mut(Particle::tick);
        }
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        self.hue = 0.0;
        self.show_rect = false;
        self.particles_enabled = false;
        self.particles.clear();
        self.current = GestureLabel::None;
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn hue(&self)               -> f32            { self.hue }
    pub fn show_rect(&self)         -> bool           { self.show_rect }
    pub fn particles_enabled(&self) -> bool           { self.particles_enabled }
    pub fn particles(&self)         -> &[Particle]    { &self.particles }
    pub fn current_gesture(&self)   -> GestureLabel   { self.current }
}

/// Wrap a hue into `[0, 360)`.  `rem_euclid` can round a tiny negative
/// value up to exactly 360.
pub fn wrap_hue(hue: f32) -> f32 {
    let h = hue.rem_euclid(360.0);
    if h >= 360.0 { 0.0 } else { h }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
