//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Gesture: open                          ╭──╮      │
//! │ Hue: 42                                │ ─┼ wheel│
//! │ Buffer: 5                              ╰──╯      │
//! │ Rect: ON                                         │
//! │ Particles: OFF    ·  ·   ┌──────┐                │
//! │                  ·hand·  │ rect │   * particles  │
//! │                   ·  ·   └──────┘                │
//! │                                    instructions  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Drawing goes into a plain [`Canvas`] so a frame can be rendered and
//! inspected without a window.

use std::sync::mpsc::Sender;
use std::time::Duration;

use hand_gesture::{Frame, Scene};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::app::{AppState, Command};
use crate::pose::SimPose;
use crate::source::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR:       u32 = 0xFF141420;
const TEXT_COLOR:     u32 = 0xFFEEEEEE;
const DIM_TEXT:       u32 = 0xFF9A9AAA;
const KEYPOINT_COLOR: u32 = 0xFF3CE68C;
const NEEDLE_COLOR:   u32 = 0xFFFFFFFF;

const HUE_OVERLAY_ALPHA: f32 = 0.3;
const RECT_W:   i32 = 100;
const RECT_H:   i32 = 60;
const RECT_HUE: f32 = 200.0;

const WHEEL_INNER:   f32 = 15.0;
const WHEEL_OUTER:   f32 = 25.0;
const WHEEL_SEGMENT: f32 = 10.0;

const TEXT_SCALE:  i32 = 2;
const LINE_HEIGHT: i32 = 7 * TEXT_SCALE;
const MARGIN:      i32 = 10;

const INSTRUCTIONS: [&str; 5] = [
    "thumb up/down: hue   open/fist: rect",
    "peace: particles on   point: off",
    "1-7 pose  0 hide",
    "C calibrate  R reset",
    "Q quit",
];

// ════════════════════════════════════════════════════════════════════════════
// Canvas — an ARGB framebuffer with the drawing primitives
// ════════════════════════════════════════════════════════════════════════════

pub struct Canvas {
    buf:    Vec<u32>,
    width:  usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { buf: vec![BG_COLOR; width * height], width, height }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn buffer(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    /// Draw one complete frame for `app`.
    pub fn draw(&mut self, app: &AppState) {
        let scene = app.session().scene();

        // Background tinted by the current hue
        self.buf.fill(blend(BG_COLOR, hsv_to_argb(scene.hue(), 0.8, 0.9), HUE_OVERLAY_ALPHA));

        if let Some(hand) = app.hand() {
            self.draw_hand(hand);
        }
        if scene.show_rect() {
            self.draw_centre_rect();
        }
        self.draw_particles(scene);
        self.draw_info(app);
        self.draw_color_wheel(scene.hue());
        self.draw_instructions();
    }

    // ── Scene elements ───────────────────────────────────────────────────

    fn draw_hand(&mut self, hand: &Frame) {
        for (i, p) in hand.landmarks().iter().enumerate() {
            let (x, y) = (p.x.round() as i32, p.y.round() as i32);
            self.fill_circle(x, y, 3, KEYPOINT_COLOR, 1.0);
            self.draw_text(&i.to_string(), x + 5, y - 3, 1, DIM_TEXT);
        }
    }

    fn draw_centre_rect(&mut self) {
        let x = (self.width as i32 - RECT_W) / 2;
        let y = (self.height as i32 - RECT_H) / 2;
        self.fill_rect(x, y, RECT_W, RECT_H, hsv_to_argb(RECT_HUE, 0.8, 0.9));
    }

    fn draw_particles(&mut self, scene: &Scene) {
        for p in scene.particles() {
            let alpha = (p.life / 255.0).clamp(0.0, 1.0);
            let radius = (p.size * 0.5).round().max(1.0) as i32;
            self.fill_circle(
                p.x.round() as i32,
                p.y.round() as i32,
                radius,
                hsv_to_argb(p.hue, 0.8, 1.0),
                alpha,
            );
        }
    }

    fn draw_info(&mut self, app: &AppState) {
        let session = app.session();
        let scene = session.scene();
        let on_off = |b: bool| if b { "ON" } else { "OFF" };
        let lines = [
            format!("Gesture: {}", scene.current_gesture()),
            format!("Hue: {}", scene.hue().round() as i32),
            format!("Buffer: {}/{}", session.buffer_len(), session.stabilizer().buffer().capacity()),
            format!("Rect: {}", on_off(scene.show_rect())),
            format!("Particles: {}", on_off(scene.particles_enabled())),
        ];
        let mut y = MARGIN;
        for line in &lines {
            self.draw_text(line, MARGIN, y, TEXT_SCALE, TEXT_COLOR);
            y += LINE_HEIGHT;
        }
        y += LINE_HEIGHT / 2;
        self.draw_text(&format!("raw: {}", app.last_raw()), MARGIN, y, 1, DIM_TEXT);
        self.draw_text(&app.status, MARGIN, y + 8, 1, DIM_TEXT);
    }

    fn draw_color_wheel(&mut self, hue: f32) {
        let cx = self.width as f32 - 60.0;
        let cy = 60.0;
        let r = WHEEL_OUTER.ceil() as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                let (fx, fy) = (dx as f32, dy as f32);
                let d = (fx * fx + fy * fy).sqrt();
                if !(WHEEL_INNER..=WHEEL_OUTER).contains(&d) { continue; }
                let color = hsv_to_argb(wheel_segment_hue(fx, fy), 0.8, 0.9);
                self.set_pixel(cx as i32 + dx, cy as i32 + dy, color);
            }
        }

        // Needle from the centre to the outer rim
        let angle = hue.to_radians();
        let steps = WHEEL_OUTER as i32;
        for s in 0..=steps {
            let x = cx + angle.cos() * s as f32;
            let y = cy + angle.sin() * s as f32;
            self.set_pixel(x.round() as i32, y.round() as i32, NEEDLE_COLOR);
        }
    }

    fn draw_instructions(&mut self) {
        let mut y = self.height as i32 - MARGIN - LINE_HEIGHT * INSTRUCTIONS.len() as i32;
        for line in INSTRUCTIONS {
            let x = self.width as i32 - MARGIN - text_width(line, TEXT_SCALE);
            self.draw_text(line, x, y, TEXT_SCALE, DIM_TEXT);
            y += LINE_HEIGHT;
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: u32, alpha: f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let i = y as usize * self.width + x as usize;
            self.buf[i] = blend(self.buf[i], color, alpha);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for row in y..y + h {
            for col in x..x + w {
                self.set_pixel(col, row, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32, alpha: f32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.blend_pixel(cx + dx, cy + dy, color, alpha);
                }
            }
        }
    }

    /// 3×5 bitmap text, each font pixel drawn as a `scale`×`scale` block.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row as i32 * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale;
            if cx >= self.width as i32 { break; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer — the window around a Canvas
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    canvas: Canvas,
    sim_tx: Option<Sender<SimInput>>,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, sim_tx: Option<Sender<SimInput>>) -> Result<Self, String> {
        let mut window = Window::new(
            "Gesture Canvas",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, canvas: Canvas::new(width, height), sim_tx })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll the keyboard.  Number keys go straight to the simulated source;
    /// everything else comes back as a [`Command`].
    pub fn poll_input(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if pressed(Key::Q) || pressed(Key::Escape) {
            commands.push(Command::Quit);
            return commands;
        }
        if pressed(Key::C) { commands.push(Command::Calibrate); }
        if pressed(Key::R) { commands.push(Command::Reset); }

        const DIGITS: [Key; 8] = [
            Key::Key0, Key::Key1, Key::Key2, Key::Key3,
            Key::Key4, Key::Key5, Key::Key6, Key::Key7,
        ];
        if let Some(tx) = &self.sim_tx {
            for (d, key) in DIGITS.into_iter().enumerate() {
                if pressed(key) {
                    if let Some(pose) = SimPose::from_digit(d as u8) {
                        let _ = tx.send(SimInput::Pose(pose));
                    }
                }
            }
        }
        commands
    }

    /// Tell a simulated source to stop.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.sim_tx.take() {
            let _ = tx.send(SimInput::Quit);
        }
    }

    /// Render one frame.
    pub fn render(&mut self, app: &AppState) {
        self.canvas.draw(app);
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.window.update_with_buffer(self.canvas.buffer(), w, h).ok();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Colour helpers
// ────────────────────────────────────────────────────────────────────────────

/// Convert HSV → packed ARGB (0xAARRGGBB, A=0xFF).  `h` in degrees, any range.
pub fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h  = h.rem_euclid(360.0);
    let hi = (h / 60.0) as u32;
    let f  = h / 60.0 - hi as f32;
    let p  = v * (1.0 - s);
    let q  = v * (1.0 - s * f);
    let t  = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let channel = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u32;
    0xFF000000 | (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t).round() as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

/// Hue of the wheel segment containing the offset `(dx, dy)` from its centre.
/// Angles run clockwise from +x on screen, in 10° steps.
fn wheel_segment_hue(dx: f32, dy: f32) -> f32 {
    let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    (angle / WHEEL_SEGMENT).floor() * WHEEL_SEGMENT
}

fn text_width(text: &str, scale: i32) -> i32 {
    (text.chars().count() as i32 * 4 - 1).max(0) * scale
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
