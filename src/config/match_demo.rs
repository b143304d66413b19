//! JSON configuration of the `match_demo` tool.
//!
//! ```json
//! {
//!   "frame": "data/frame.png",
//!   "color": "rgb",
//!   "templates": [
//!     { "class_id": "hp_bar", "path": "data/hp_bar.png", "roi": { "x": 2, "y": 2, "w": 60, "h": 12 } },
//!     { "class_id": "marker", "path": "data/marker.png", "scales": [1.0, 0.75], "match_threshold": 0.85 }
//!   ],
//!   "template_params": { "num_features": 24 },
//!   "match_params": { "t": 4, "nms_iou": 0.4 },
//!   "output": { "report_json": "out/report.json", "debug_dir": "out/planes" }
//! }
//! ```
use crate::detector::MatchParams;
use crate::error::{Result, ShapeMatchError};
use crate::image::io::ColorMode;
use crate::template::TemplateParams;
use crate::types::Rect;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct MatchDemoConfig {
    pub frame: PathBuf,
    /// Pixel layout used for the frame and every exemplar.
    #[serde(default)]
    pub color: ColorMode,
    pub templates: Vec<TemplateSpec>,
    #[serde(default)]
    pub template_params: TemplateParams,
    #[serde(default)]
    pub match_params: MatchParams,
    pub output: MatchDemoOutput,
}

/// One exemplar to learn, with optional per-template overrides.
#[derive(Debug, Deserialize)]
pub struct TemplateSpec {
    pub class_id: String,
    pub path: PathBuf,
    #[serde(default)]
    pub roi: Option<Rect>,
    /// Scale factors to train at; a single unscaled template when absent.
    #[serde(default)]
    pub scales: Option<Vec<f32>>,
    #[serde(default)]
    pub num_features: Option<usize>,
    #[serde(default)]
    pub match_threshold: Option<f32>,
}

impl TemplateSpec {
    /// Global training parameters with this template's overrides applied.
    pub fn params(&self, base: &TemplateParams) -> TemplateParams {
        let mut params = base.clone();
        if let Some(n) = self.num_features {
            params.num_features = n;
        }
        if let Some(thr) = self.match_threshold {
            params.match_threshold = thr;
        }
        params
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchDemoOutput {
    pub report_json: PathBuf,
    /// Learned templates, for inspection or reuse.
    #[serde(default)]
    pub templates_json: Option<PathBuf>,
    /// Directory receiving quantized, spread and response planes of the frame.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<MatchDemoConfig> {
    let data = fs::read_to_string(path).map_err(|source| ShapeMatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ShapeMatchError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::AccumulationMode;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let cfg: MatchDemoConfig = serde_json::from_str(
            r#"{
                "frame": "frame.png",
                "templates": [{ "class_id": "bar", "path": "bar.png" }],
                "output": { "report_json": "out/report.json" }
            }"#,
        )
        .expect("valid config");
        assert_eq!(cfg.color, ColorMode::Gray);
        assert_eq!(cfg.match_params, MatchParams::default());
        assert_eq!(cfg.template_params, TemplateParams::default());
        assert!(cfg.templates[0].roi.is_none());
        assert!(cfg.output.debug_dir.is_none());
    }

    #[test]
    fn parses_overrides() {
        let cfg: MatchDemoConfig = serde_json::from_str(
            r#"{
                "frame": "frame.png",
                "color": "rgb",
                "templates": [{
                    "class_id": "marker",
                    "path": "marker.png",
                    "roi": { "x": 1, "y": 2, "w": 30, "h": 20 },
                    "scales": [1.0, 0.5],
                    "num_features": 24,
                    "match_threshold": 0.9
                }],
                "template_params": { "strong_threshold": 80.0 },
                "match_params": { "t": 5, "accumulation": "rect", "nms_iou": null },
                "output": { "report_json": "r.json", "debug_dir": "planes" }
            }"#,
        )
        .expect("valid config");
        assert_eq!(cfg.color, ColorMode::Rgb);
        assert_eq!(cfg.match_params.t, 5);
        assert_eq!(cfg.match_params.accumulation, AccumulationMode::Rect);
        assert_eq!(cfg.match_params.nms_iou, None);
        let spec = &cfg.templates[0];
        assert_eq!(spec.roi, Some(Rect::new(1, 2, 30, 20)));
        let params = spec.params(&cfg.template_params);
        assert_eq!(params.num_features, 24);
        assert_eq!(params.match_threshold, 0.9);
        assert_eq!(params.strong_threshold, 80.0);
    }
}
