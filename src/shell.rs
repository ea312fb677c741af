use crate::math::{lerp_rgb, parse_hex};
use crate::spring::Spring;

/// Fallback when the panel's background string fails to parse
const FALLBACK_BACKGROUND: [f32; 3] = [240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0];

/// Fixed endpoints of the light-color table. The panel's background drives
/// only the clear color; the point light is pinned to these.
const LIGHT_COLOR_CLOSED: [f32; 3] = [240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0];
const LIGHT_COLOR_OPEN: [f32; 3] = LIGHT_COLOR_CLOSED;

/// Top-level state holder: owns `open`, the texture payload, the animated
/// progress spring, and the two cosmetic panel values.
///
/// Single-writer discipline: everything here is mutated only from the
/// UI/render thread, no locking needed.
pub struct AppState {
    open: bool,
    texture: String,
    spring: Spring,
    pub title: String,
    pub background: String,
}

impl AppState {
    pub fn new() -> Self {
        // The demo starts closed with no texture chosen
        Self {
            open: false,
            texture: String::new(),
            spring: Spring::new(0.0),
            title: "Hello!".to_string(),
            background: "#f0f0f0".to_string(),
        }
    }

    pub fn open(&self) -> bool {
        self.open
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Unconditional flip; rapid toggles just retarget the spring each time
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
        self.spring.set_target(if self.open { 1.0 } else { 0.0 });
    }

    /// Last write wins; a new drop fully replaces the prior payload
    pub fn set_texture(&mut self, data_url: String) {
        self.texture = data_url;
    }

    /// Advance the progress spring by the frame delta
    pub fn step(&mut self, dt: f32) {
        self.spring.step(dt);
    }

    /// Animated progress scalar in [0,1], trending toward `open`
    pub fn progress(&self) -> f32 {
        self.spring.value()
    }

    /// The configured background color, with a fallback while the panel
    /// value is mid-edit
    pub fn background_color(&self) -> [f32; 3] {
        parse_hex(&self.background).unwrap_or(FALLBACK_BACKGROUND)
    }

    /// Scene light color from the fixed two-point table, indexed by the
    /// progress scalar. The endpoints coincide in this variant, so the
    /// light holds steady across the animation.
    pub fn scene_color(&self) -> [f32; 3] {
        lerp_rgb(LIGHT_COLOR_CLOSED, LIGHT_COLOR_OPEN, self.progress())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_closed_and_untextured() {
        let state = AppState::new();
        assert!(!state.open());
        assert_eq!(state.texture(), "");
        assert_eq!(state.progress(), 0.0);
        assert_eq!(state.title, "Hello!");
        assert_eq!(state.background, "#f0f0f0");
    }

    #[test]
    fn toggle_flips_exactly_once_per_call() {
        let mut state = AppState::new();
        state.toggle_open();
        assert!(state.open());
        state.toggle_open();
        assert!(!state.open());
        state.toggle_open();
        state.toggle_open();
        state.toggle_open();
        assert!(state.open());
    }

    #[test]
    fn open_never_changes_without_a_toggle() {
        let mut state = AppState::new();
        state.set_texture("data:image/png;base64,AAAA".to_string());
        state.step(1.0);
        assert!(!state.open());
    }

    #[test]
    fn progress_trends_toward_open_endpoint() {
        let mut state = AppState::new();
        state.toggle_open();
        let mut last = state.progress();
        for _ in 0..30 {
            state.step(1.0 / 60.0);
            assert!(state.progress() >= 0.0 && state.progress() <= 1.0);
            assert!(state.progress() >= last - 1e-4);
            last = state.progress();
        }
        for _ in 0..300 {
            state.step(1.0 / 60.0);
        }
        assert!((state.progress() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn last_texture_write_wins() {
        let mut state = AppState::new();
        state.set_texture("data:image/png;base64,Zmlyc3Q=".to_string());
        state.set_texture("data:image/png;base64,c2Vjb25k".to_string());
        assert_eq!(state.texture(), "data:image/png;base64,c2Vjb25k");
    }

    #[test]
    fn background_falls_back_while_mid_edit() {
        let mut state = AppState::new();
        state.background = "#f0".to_string();
        assert_eq!(state.background_color(), FALLBACK_BACKGROUND);

        state.background = "#102030".to_string();
        let rgb = state.background_color();
        assert!((rgb[0] - 16.0 / 255.0).abs() < 1e-4);
        assert!((rgb[1] - 32.0 / 255.0).abs() < 1e-4);
        assert!((rgb[2] - 48.0 / 255.0).abs() < 1e-4);
    }

    #[test]
    fn scene_color_is_pinned_independent_of_background() {
        let mut state = AppState::new();
        let baseline = state.scene_color();
        assert_eq!(baseline, LIGHT_COLOR_CLOSED);

        // Editing the panel background recolors the clear, not the light
        state.background = "#204060".to_string();
        assert_eq!(state.scene_color(), baseline);
        assert_ne!(state.background_color(), baseline);

        // Coinciding endpoints hold steady across the animation too
        state.toggle_open();
        state.step(0.2);
        assert_eq!(state.scene_color(), baseline);
    }
}
