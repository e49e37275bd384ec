//! Output configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Output settings used by the command-line tool
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputSection {
    /// Directory for result files
    #[serde(default = "defaults::output_dir")]
    pub directory: String,

    /// Write an SVG rendering of the placement
    #[serde(default = "defaults::enabled")]
    pub svg: bool,

    /// SVG pixels per meter
    #[serde(default = "defaults::svg_scale")]
    pub svg_scale: f32,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: defaults::output_dir(),
            svg: true,
            svg_scale: defaults::svg_scale(),
        }
    }
}
