use crate::constants::{DEFAULT_MODEL_URL, PIXEL_RATIO_CAP};
use crate::overlay::TransitionConfig;
use crate::params::ShadingParameters;

/// Startup configuration for one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub transition: TransitionConfig,
    /// Meshes to fetch; all are registered before activation.
    pub model_urls: Vec<String>,
    pub shading: ShadingParameters,
    pub pixel_ratio_cap: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            model_urls: vec![DEFAULT_MODEL_URL.to_string()],
            shading: ShadingParameters::default(),
            pixel_ratio_cap: PIXEL_RATIO_CAP,
        }
    }
}

impl SceneConfig {
    /// Apply one `key=value` override, typically from the page query string.
    ///
    /// Timing keys take seconds. `model` replaces the mesh list with a
    /// comma-separated one; an empty value means no meshes. Returns `false`
    /// for unknown keys and unparsable values, which are left unchanged.
    pub fn apply_override(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "hold" => &mut self.transition.hold_sec,
            "fadeDelay" => &mut self.transition.fade_delay_sec,
            "fade" => &mut self.transition.fade_duration_sec,
            "panelDelay" => &mut self.transition.panel_delay_sec,
            "pixelRatioCap" => &mut self.pixel_ratio_cap,
            "model" => {
                self.model_urls = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                return true;
            }
            _ => {
                log::debug!("[config] ignoring unknown key {}", key);
                return false;
            }
        };
        match value.trim().parse::<f32>() {
            Ok(v) if v.is_finite() && v >= 0.0 => {
                *slot = v;
                true
            }
            _ => {
                log::warn!("[config] invalid value for {}: {:?}", key, value);
                false
            }
        }
    }

    pub fn with_overrides<'a>(mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (k, v) in pairs {
            self.apply_override(k, v);
        }
        self
    }
}
