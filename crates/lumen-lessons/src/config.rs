use std::path::PathBuf;

use lumen_engine::render::TextureSource;
use lumen_engine::window::RuntimeConfig;
use lumen_motion::{DriverConfig, ScaleBounds};
use winit::dpi::LogicalSize;

use crate::lessons::Lesson;

/// Overrides the first lesson texture with an image file.
pub const PRIMARY_TEXTURE_ENV: &str = "LUMEN_TEXTURE_PRIMARY";
/// Overrides the second lesson texture with an image file.
pub const SECONDARY_TEXTURE_ENV: &str = "LUMEN_TEXTURE_SECONDARY";

/// Scale range used by the lessons app. The driver itself defaults to none.
pub const LESSON_SCALE_BOUNDS: (f64, f64) = (0.1, 4.0);

/// Top-level configuration for the lessons binary.
#[derive(Debug, Clone)]
pub struct LessonsConfig {
    pub window: RuntimeConfig,
    pub driver: DriverConfig,
    pub first_lesson: Lesson,
    pub primary_texture: TextureSource,
    pub secondary_texture: TextureSource,
}

impl Default for LessonsConfig {
    fn default() -> Self {
        let (min, max) = LESSON_SCALE_BOUNDS;
        Self {
            window: RuntimeConfig {
                title: "lumen".to_string(),
                initial_size: LogicalSize::new(800.0, 600.0),
                resizable: false,
            },
            driver: DriverConfig {
                scale_bounds: ScaleBounds::new(min, max),
                ..DriverConfig::default()
            },
            first_lesson: Lesson::Pulse,
            primary_texture: TextureSource::Checker {
                size: 256,
                cells: 8,
                a: [236, 180, 120, 255],
                b: [90, 60, 40, 255],
            },
            secondary_texture: TextureSource::Gradient {
                size: 256,
                top: [40, 90, 200, 255],
                bottom: [250, 250, 250, 255],
            },
        }
    }
}

impl LessonsConfig {
    /// Defaults plus environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var_os(PRIMARY_TEXTURE_ENV).map(PathBuf::from),
            std::env::var_os(SECONDARY_TEXTURE_ENV).map(PathBuf::from),
        )
    }

    pub fn with_overrides(mut self, primary: Option<PathBuf>, secondary: Option<PathBuf>) -> Self {
        if let Some(path) = primary.filter(|p| !p.as_os_str().is_empty()) {
            log::info!("primary texture: {}", path.display());
            self.primary_texture = TextureSource::File(path);
        }
        if let Some(path) = secondary.filter(|p| !p.as_os_str().is_empty()) {
            log::info!("secondary texture: {}", path.display());
            self.secondary_texture = TextureSource::File(path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_procedural_and_bounded() {
        let cfg = LessonsConfig::default();
        assert!(matches!(cfg.primary_texture, TextureSource::Checker { .. }));
        assert!(matches!(cfg.secondary_texture, TextureSource::Gradient { .. }));
        assert_eq!(cfg.driver.scale_bounds, ScaleBounds::new(0.1, 4.0));
        assert_eq!(cfg.driver.scale_step, lumen_motion::SCALE_STEP);
        assert!(!cfg.window.resizable);
    }

    #[test]
    fn overrides_replace_textures_with_files() {
        let cfg = LessonsConfig::default()
            .with_overrides(Some(PathBuf::from("kitten.png")), None);
        assert_eq!(cfg.primary_texture, TextureSource::File(PathBuf::from("kitten.png")));
        assert!(matches!(cfg.secondary_texture, TextureSource::Gradient { .. }));
    }

    #[test]
    fn empty_override_is_ignored() {
        let cfg = LessonsConfig::default().with_overrides(Some(PathBuf::new()), Some(PathBuf::new()));
        assert!(matches!(cfg.primary_texture, TextureSource::Checker { .. }));
        assert!(matches!(cfg.secondary_texture, TextureSource::Gradient { .. }));
    }
}
