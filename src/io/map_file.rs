//! ROS `map_server` map files (YAML metadata + PGM image).
//!
//! ```yaml
//! image: office.pgm
//! resolution: 0.05
//! origin: [-10.0, -10.0, 0.0]
//! negate: 0
//! occupied_thresh: 0.65
//! free_thresh: 0.196
//! ```
//!
//! Each pixel `v` of an image with maximum value `max` becomes an
//! occupancy probability `p = (max - v) / max` (or `v / max` when
//! `negate` is set). `p > occupied_thresh` is occupied, `p < free_thresh`
//! is free, anything between is unknown. Image row 0 is the top of the
//! map.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use super::MapLoadError;
use super::pgm::{read_pgm, write_pgm};
use crate::core::WorldPoint;
use crate::grid::{CellState, OccupancyGrid};

fn default_occupied_thresh() -> f32 {
    0.65
}

fn default_free_thresh() -> f32 {
    0.196
}

/// Map metadata file contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosMapMetadata {
    /// Image path, relative to the metadata file
    pub image: PathBuf,
    /// Meters per pixel
    pub resolution: f32,
    /// Pose of the lower-left pixel: x, y, yaw
    pub origin: [f32; 3],
    /// Nonzero inverts the black/white meaning
    #[serde(default)]
    pub negate: i32,
    /// Occupancy probability above which a pixel is occupied
    #[serde(default = "default_occupied_thresh")]
    pub occupied_thresh: f32,
    /// Occupancy probability below which a pixel is free
    #[serde(default = "default_free_thresh")]
    pub free_thresh: f32,
}

impl RosMapMetadata {
    /// Thresholds must be ordered probabilities and resolution positive.
    pub fn validate(&self) -> Result<(), MapLoadError> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(MapLoadError::InvalidMetadata(format!(
                "resolution {} must be positive",
                self.resolution
            )));
        }
        if !self.origin.iter().all(|v| v.is_finite()) {
            return Err(MapLoadError::InvalidMetadata("origin is not finite".to_string()));
        }
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(self.free_thresh)
            || !in_unit(self.occupied_thresh)
            || self.free_thresh > self.occupied_thresh
        {
            return Err(MapLoadError::InvalidMetadata(format!(
                "thresholds free {} / occupied {} must satisfy 0 <= free <= occupied <= 1",
                self.free_thresh, self.occupied_thresh
            )));
        }
        Ok(())
    }

    /// Classify one pixel.
    pub fn classify(&self, value: u16, max_value: u16) -> CellState {
        let max = max_value.max(1) as f32;
        let v = value.min(max_value) as f32;
        let p = if self.negate != 0 { v / max } else { (max - v) / max };
        if p > self.occupied_thresh {
            CellState::Occupied
        } else if p < self.free_thresh {
            CellState::Free
        } else {
            CellState::Unknown
        }
    }
}

/// Load a map from its YAML metadata file.
pub fn load_ros_map(yaml_path: &Path) -> Result<OccupancyGrid, MapLoadError> {
    let meta: RosMapMetadata = serde_yaml::from_str(&std::fs::read_to_string(yaml_path)?)?;
    meta.validate()?;

    let image_path = if meta.image.is_absolute() {
        meta.image.clone()
    } else {
        yaml_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&meta.image)
    };
    let image = read_pgm(&image_path)?;

    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut cells = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (height - 1 - y) as u32;
        cells.extend(
            (0..width as u32).map(|x| meta.classify(image.get_pixel(x, row).0[0], u16::MAX)),
        );
    }

    let origin = WorldPoint::new(meta.origin[0], meta.origin[1]);
    let grid = OccupancyGrid::from_cells(width, height, meta.resolution, origin, cells)?
        .with_origin_yaw(meta.origin[2])?;

    let counts = grid.count_by_state();
    info!(
        "[Map] loaded {} ({}x{} @ {:.3} m): {} free, {} occupied, {} unknown",
        image_path.display(),
        width,
        height,
        meta.resolution,
        counts.free,
        counts.occupied,
        counts.unknown
    );
    Ok(grid)
}

/// Write `stem.pgm` and `stem.yaml` for a grid.
pub fn export_ros_map(grid: &OccupancyGrid, stem: &Path) -> Result<(), super::ExportError> {
    let pgm_path = stem.with_extension("pgm");
    let yaml_path = stem.with_extension("yaml");
    write_pgm(grid, &pgm_path)?;

    let image = pgm_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| pgm_path.clone());
    let meta = RosMapMetadata {
        image,
        resolution: grid.resolution(),
        origin: [grid.origin().x, grid.origin().y, grid.origin_yaw()],
        negate: 0,
        occupied_thresh: default_occupied_thresh(),
        free_thresh: default_free_thresh(),
    };
    std::fs::write(&yaml_path, serde_yaml::to_string(&meta)?)?;
    Ok(())
}
