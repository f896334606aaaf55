//! Neural network training visualization.
//!
//! Three layers of neurons projected through a perspective camera. The
//! connections pulse once per cycle; every cycle flips the pass direction,
//! counts an epoch, and decays the displayed error.

use std::f32::consts::PI;

use glam::{Mat4, Vec3, Vec4};

use crate::engine::state::AnimationState;
use crate::engine::{Input, Scene};
use crate::types::{Color, Frame, Point};

/// Ticks per pass: progress grows by 0.02 each tick.
pub const PASS_TICKS: u32 = 50;
pub const INITIAL_ERROR: f32 = 0.25;
pub const ERROR_DECAY: f32 = 0.95;
/// Degrees turned by one rotate input.
pub const ROTATE_STEP: f32 = 5.0;

const NEURON_RADIUS: f32 = 0.2;
const SIGNIFICANT_DIGITS: i32 = 6;
const CAMERA_DISTANCE: f32 = 15.0;
const FIELD_OF_VIEW: f32 = 60.0;
const DEFAULT_ASPECT: f32 = 1000.0 / 700.0;

const INPUT_COLOR: (f32, f32, f32) = (0.2, 0.8, 0.2);
const HIDDEN_COLOR: (f32, f32, f32) = (0.9, 0.9, 0.2);
const OUTPUT_COLOR: (f32, f32, f32) = (0.8, 0.2, 0.2);

pub struct Network {
    state: AnimationState,
    error: f32,
    angle: f32,
    aspect: f32,
    input: Vec<Vec3>,
    hidden: Vec<Vec3>,
    output: Vec<Vec3>,
}

impl Network {
    pub fn new() -> Self {
        Network {
            state: AnimationState::running(PASS_TICKS),
            error: INITIAL_ERROR,
            angle: 0.0,
            aspect: DEFAULT_ASPECT,
            input: (0..3)
                .map(|i| Vec3::new(-4.0, (i as f32 - 1.0) * 1.5, 0.0))
                .collect(),
            hidden: (0..4)
                .map(|i| Vec3::new(0.0, (i as f32 - 1.5) * 1.2, 0.0))
                .collect(),
            output: (0..2)
                .map(|i| Vec3::new(4.0, (i as f32 - 0.5) * 1.5, 0.0))
                .collect(),
        }
    }

    pub fn epoch(&self) -> u32 {
        self.state.step
    }

    pub fn error(&self) -> f32 {
        self.error
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(FIELD_OF_VIEW.to_radians(), self.aspect, 1.0, 100.0)
    }

    fn transform(&self) -> Mat4 {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_DISTANCE), Vec3::ZERO, Vec3::Y);
        let model = Mat4::from_rotation_y(self.angle.to_radians());
        self.projection() * view * model
    }

    fn connection_color(&self, intensity: f32) -> Color {
        if self.state.forward {
            Color::unit(0.1, intensity, 1.0)
        } else {
            Color::unit(1.0, 0.1, intensity)
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

/// Project a world position to scene space. Returns the point and the clip
/// `w`, or `None` behind the camera.
fn project(mvp: &Mat4, p: Vec3) -> Option<(Point, f32)> {
    let clip: Vec4 = *mvp * p.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    Some((Point::new(clip.x / clip.w, clip.y / clip.w), clip.w))
}

/// Format with six significant digits and no trailing zeros.
fn significant(value: f32) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

impl Scene for Network {
    fn title(&self) -> &str {
        "3D ANN Backpropagation Visualization"
    }

    fn state(&self) -> &AnimationState {
        &self.state
    }

    fn tick(&mut self) {
        if !self.state.running {
            return;
        }
        if self.state.advance() {
            self.error *= ERROR_DECAY;
        }
    }

    fn render(&self) -> Frame {
        let mut frame = Frame::new(Color::unit(0.05, 0.05, 0.08));
        let mvp = self.transform();
        let focal = self.projection().y_axis.y;

        let intensity = (self.state.progress() * PI).sin().abs();
        let color = self.connection_color(intensity);
        for (from, to) in [(&self.input, &self.hidden), (&self.hidden, &self.output)] {
            for a in from {
                for b in to {
                    if let (Some((pa, _)), Some((pb, _))) = (project(&mvp, *a), project(&mvp, *b)) {
                        frame.line(pa.x, pa.y, pb.x, pb.y, color);
                    }
                }
            }
        }

        for (layer, (r, g, b)) in [
            (&self.input, INPUT_COLOR),
            (&self.hidden, HIDDEN_COLOR),
            (&self.output, OUTPUT_COLOR),
        ] {
            for neuron in layer {
                if let Some((center, w)) = project(&mvp, *neuron) {
                    frame.circle(center.x, center.y, NEURON_RADIUS * focal / w, Color::unit(r, g, b));
                }
            }
        }

        frame.text(
            -0.98,
            0.92,
            format!("Epoch: {}   Error: {}", self.epoch(), significant(self.error)),
            Color::WHITE,
        );
        frame
    }

    fn on_input(&mut self, input: Input) -> bool {
        match input {
            Input::RotateLeft => self.angle -= ROTATE_STEP,
            Input::RotateRight => self.angle += ROTATE_STEP,
            Input::TogglePause => self.state.running = !self.state.running,
            Input::Start => {
                if self.state.running {
                    return false;
                }
                self.state.running = true;
            }
            Input::Reset => self.reset(),
            _ => return false,
        }
        true
    }

    fn reset(&mut self) {
        self.state.reset();
        self.error = INITIAL_ERROR;
    }

    fn resize(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    fn lines(frame: &Frame) -> Vec<Color> {
        frame
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn draws_every_connection_then_every_neuron() {
        let frame = Network::new().render();
        let kinds: Vec<&str> = frame
            .primitives
            .iter()
            .map(|p| match p {
                Primitive::Line { .. } => "line",
                Primitive::Circle { .. } => "circle",
                Primitive::Text { .. } => "text",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds.iter().filter(|k| **k == "line").count(), 3 * 4 + 4 * 2);
        assert_eq!(kinds.iter().filter(|k| **k == "circle").count(), 9);
        assert_eq!(kinds[..20], ["line"; 20]);
        assert_eq!(kinds.last(), Some(&"text"));
    }

    #[test]
    fn wrap_flips_direction_counts_epoch_and_decays_error() {
        let mut net = Network::new();
        for _ in 0..PASS_TICKS - 1 {
            net.tick();
        }
        assert_eq!(net.epoch(), 0);
        assert!(net.state().forward);
        net.tick();
        assert_eq!(net.epoch(), 1);
        assert!(!net.state().forward);
        assert!((net.error() - INITIAL_ERROR * ERROR_DECAY).abs() < 1e-6);
        assert_eq!(net.state().progress(), 0.0);
    }

    #[test]
    fn connection_color_follows_direction() {
        let mut net = Network::new();
        for _ in 0..10 {
            net.tick();
        }
        let forward = lines(&net.render());
        assert!(forward.iter().all(|c| c.b == 255));
        for _ in 10..PASS_TICKS + 10 {
            net.tick();
        }
        let backward = lines(&net.render());
        assert!(backward.iter().all(|c| c.r == 255));
    }

    #[test]
    fn overlay_reports_epoch_and_error() {
        let frame = Network::new().render();
        assert_eq!(frame.texts().next(), Some("Epoch: 0   Error: 0.25"));

        let mut net = Network::new();
        for _ in 0..PASS_TICKS {
            net.tick();
        }
        assert_eq!(net.render().texts().next(), Some("Epoch: 1   Error: 0.2375"));
    }

    #[test]
    fn error_uses_six_significant_digits() {
        assert_eq!(significant(0.25), "0.25");
        assert_eq!(significant(0.225625), "0.225625");
        assert_eq!(significant(0.123456789), "0.123457");
        assert_eq!(significant(3.0), "3");
        assert_eq!(significant(0.0), "0");
    }

    #[test]
    fn rotation_moves_neurons_but_not_state() {
        let mut net = Network::new();
        let before = net.render();
        assert!(net.on_input(Input::RotateRight));
        assert_eq!(net.angle(), 5.0);
        assert_ne!(net.render(), before);
        assert_eq!(net.state(), &AnimationState::running(PASS_TICKS));
    }

    #[test]
    fn pause_freezes_and_reset_rewinds() {
        let mut net = Network::new();
        for _ in 0..60 {
            net.tick();
        }
        net.on_input(Input::TogglePause);
        net.tick();
        assert_eq!(net.state().ticks, 60);

        net.on_input(Input::Reset);
        assert_eq!(net.epoch(), 0);
        assert_eq!(net.error(), INITIAL_ERROR);
        assert!(!net.state().running);
        assert!(net.on_input(Input::Start));
        assert!(!net.on_input(Input::Start));
    }

    #[test]
    fn neurons_project_inside_the_view() {
        let frame = Network::new().render();
        for p in &frame.primitives {
            if let Primitive::Circle { center, radius, .. } = p {
                assert!(center.x.abs() < 1.0 && center.y.abs() < 1.0);
                assert!(*radius > 0.0 && *radius < 0.2);
            }
        }
    }
}
