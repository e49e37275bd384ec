//! SVG rendering of a placement.
//!
//! Draws, bottom to top:
//! - the occupancy grid
//! - the area-of-interest polygon
//! - targets, colored by whether the final placement covers them
//! - each sensor's field of view, position and heading

use std::fmt::Write;
use std::path::Path;

use super::ExportError;
use crate::core::{SensorPose, WorldPoint};
use crate::geometry::Bounds;
use crate::grid::{CellState, OccupancyGrid};

/// SVG color scheme for visualization
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Occupied cell color
    pub occupied: &'static str,
    /// Free cell color
    pub free: &'static str,
    /// Unknown cell color
    pub unknown: &'static str,
    /// Area-of-interest outline color
    pub area: &'static str,
    /// Covered target color
    pub covered: &'static str,
    /// Uncovered target color
    pub uncovered: &'static str,
    /// Sensor marker and field-of-view color
    pub sensor: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            occupied: "#333333",
            free: "#FFFFFF",
            unknown: "#CCCCCC",
            area: "#2222AA",
            covered: "#22AA22",
            uncovered: "#DD3333",
            sensor: "#FF8800",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per meter
    pub scale: f32,
    /// Sensor marker radius in pixels
    pub marker_radius: f32,
    /// Target dot radius in pixels
    pub target_radius: f32,
    /// Color scheme
    pub colors: SvgColorScheme,
    /// Padding around the map in pixels
    pub padding: f32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 40.0,
            marker_radius: 5.0,
            target_radius: 1.5,
            colors: SvgColorScheme::default(),
            padding: 20.0,
        }
    }
}

impl SvgConfig {
    /// Default config at the given pixels per meter.
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }
}

/// A sensor to draw.
#[derive(Clone, Debug)]
struct SensorGlyph {
    pose: SensorPose,
    outline: Vec<WorldPoint>,
}

/// SVG visualization builder
pub struct SvgVisualizer<'a> {
    config: SvgConfig,
    grid: &'a OccupancyGrid,
    title: Option<String>,
    area: Option<Vec<WorldPoint>>,
    targets: Vec<(WorldPoint, bool)>,
    sensors: Vec<SensorGlyph>,
}

struct Frame {
    min: WorldPoint,
    height_px: f32,
    scale: f32,
}

impl Frame {
    #[inline]
    fn px(&self, p: WorldPoint) -> (f32, f32) {
        (
            (p.x - self.min.x) * self.scale,
            self.height_px - (p.y - self.min.y) * self.scale,
        )
    }
}

impl<'a> SvgVisualizer<'a> {
    /// Create a new SVG visualizer over a grid
    pub fn new(grid: &'a OccupancyGrid, config: SvgConfig) -> Self {
        Self {
            config,
            grid,
            title: None,
            area: None,
            targets: Vec::new(),
            sensors: Vec::new(),
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Draw the area-of-interest outline
    pub fn with_area(mut self, vertices: &[WorldPoint]) -> Self {
        self.area = Some(vertices.to_vec());
        self
    }

    /// Draw targets; `covered[i]` selects the color of `targets[i]`
    pub fn with_targets(mut self, targets: &[WorldPoint], covered: &[bool]) -> Self {
        self.targets = targets
            .iter()
            .enumerate()
            .map(|(i, t)| (*t, covered.get(i).copied().unwrap_or(false)))
            .collect();
        self
    }

    /// Draw sensors with their field-of-view outlines
    pub fn with_sensors(mut self, poses: &[SensorPose], outlines: Vec<Vec<WorldPoint>>) -> Self {
        let mut outlines = outlines.into_iter();
        self.sensors = poses
            .iter()
            .map(|pose| SensorGlyph {
                pose: *pose,
                outline: outlines.next().unwrap_or_default(),
            })
            .collect();
        self
    }

    fn world_bounds(&self) -> Bounds {
        let mut bounds = self.grid.world_bounds();
        for glyph in &self.sensors {
            for p in &glyph.outline {
                bounds.expand_to_include(*p);
            }
        }
        bounds
    }

    /// Render to SVG string
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut svg = String::new();

        let bounds = self.world_bounds();
        let map_width_px = bounds.width().max(0.0) * self.config.scale;
        let map_height_px = bounds.height().max(0.0) * self.config.scale;

        let padding = self.config.padding;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };
        let legend_height = 95.0;

        let width = map_width_px + 2.0 * padding;
        let height = map_height_px + 2.0 * padding + title_height + legend_height;

        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        writeln!(svg, r##"  <rect width="100%" height="100%" fill="#F8F8F8"/>"##)?;

        if let Some(ref title) = self.title {
            writeln!(
                svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                escape(title)
            )?;
        }

        let map_offset_y = padding + title_height;
        writeln!(
            svg,
            r#"  <g transform="translate({:.0}, {:.0})">"#,
            padding, map_offset_y
        )?;

        let frame = Frame {
            min: bounds.min,
            height_px: map_height_px,
            scale: self.config.scale,
        };
        self.render_grid(&mut svg, &frame)?;
        self.render_area(&mut svg, &frame)?;
        self.render_sensor_fields(&mut svg, &frame)?;
        self.render_targets(&mut svg, &frame)?;
        self.render_sensor_markers(&mut svg, &frame)?;

        writeln!(svg, "  </g>")?;

        self.render_legend(&mut svg, width, map_offset_y + map_height_px + 10.0)?;
        writeln!(svg, "</svg>")?;
        Ok(svg)
    }

    /// Render and write to a file
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.render()?)?;
        Ok(())
    }

    fn render_grid(&self, svg: &mut String, frame: &Frame) -> std::fmt::Result {
        let cell_size = self.grid.resolution() * self.config.scale;
        writeln!(svg, r#"    <g id="grid">"#)?;
        for (coord, state) in self.grid.iter() {
            let color = match state {
                CellState::Free => self.config.colors.free,
                CellState::Occupied => self.config.colors.occupied,
                CellState::Unknown => self.config.colors.unknown,
            };
            let (cx, cy) = frame.px(self.grid.map_to_world(coord));
            writeln!(
                svg,
                r#"      <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                cx - cell_size / 2.0,
                cy - cell_size / 2.0,
                cell_size,
                cell_size,
                color
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn render_area(&self, svg: &mut String, frame: &Frame) -> std::fmt::Result {
        let Some(ref area) = self.area else {
            return Ok(());
        };
        writeln!(
            svg,
            r#"    <polygon id="area" points="{}" fill="none" stroke="{}" stroke-width="2" stroke-dasharray="6,3"/>"#,
            points_attr(area, frame)?,
            self.config.colors.area
        )
    }

    fn render_sensor_fields(&self, svg: &mut String, frame: &Frame) -> std::fmt::Result {
        if self.sensors.is_empty() {
            return Ok(());
        }
        writeln!(svg, r#"    <g id="fields-of-view">"#)?;
        for glyph in self.sensors.iter().filter(|g| !g.outline.is_empty()) {
            writeln!(
                svg,
                r#"      <polygon points="{}" fill="{}" fill-opacity="0.15" stroke="{}" stroke-width="1"/>"#,
                points_attr(&glyph.outline, frame)?,
                self.config.colors.sensor,
                self.config.colors.sensor
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn render_targets(&self, svg: &mut String, frame: &Frame) -> std::fmt::Result {
        if self.targets.is_empty() {
            return Ok(());
        }
        writeln!(svg, r#"    <g id="targets">"#)?;
        for (target, covered) in &self.targets {
            let (px, py) = frame.px(*target);
            let color = if *covered {
                self.config.colors.covered
            } else {
                self.config.colors.uncovered
            };
            writeln!(
                svg,
                r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                px, py, self.config.target_radius, color
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn render_sensor_markers(&self, svg: &mut String, frame: &Frame) -> std::fmt::Result {
        if self.sensors.is_empty() {
            return Ok(());
        }
        writeln!(svg, r#"    <g id="sensors">"#)?;
        for (i, glyph) in self.sensors.iter().enumerate() {
            let (px, py) = frame.px(glyph.pose.position());
            let arrow_len = self.config.marker_radius * 2.5;
            // SVG y axis points down
            let dx = arrow_len * glyph.pose.yaw.cos();
            let dy = -arrow_len * glyph.pose.yaw.sin();

            writeln!(
                svg,
                r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
                px, py, self.config.marker_radius, self.config.colors.sensor
            )?;
            writeln!(
                svg,
                r#"      <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"/>"#,
                px,
                py,
                px + dx,
                py + dy,
                self.config.colors.sensor
            )?;
            writeln!(
                svg,
                r##"      <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" fill="#333" text-anchor="middle" dy="-8">S{}</text>"##,
                px,
                py,
                i + 1
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn render_legend(&self, svg: &mut String, svg_width: f32, y_offset: f32) -> std::fmt::Result {
        writeln!(
            svg,
            r#"  <g id="legend" font-family="sans-serif" font-size="12" transform="translate(0, {:.0})">"#,
            y_offset
        )?;
        writeln!(
            svg,
            r##"    <rect x="10" y="0" width="{:.0}" height="85" fill="white" stroke="#CCC" stroke-width="1" rx="4"/>"##,
            (svg_width - 20.0).max(0.0)
        )?;

        let colors = &self.config.colors;
        let left = [
            (colors.sensor, "Sensor"),
            (colors.covered, "Covered target"),
            (colors.uncovered, "Uncovered target"),
        ];
        for (i, (color, label)) in left.iter().enumerate() {
            let y = 20.0 + i as f32 * 20.0;
            writeln!(
                svg,
                r#"    <circle cx="35" cy="{:.0}" r="5" fill="{}"/>"#,
                y, color
            )?;
            writeln!(
                svg,
                r##"    <text x="60" y="{:.0}" fill="#333">{}</text>"##,
                y + 4.0,
                label
            )?;
        }

        let right_x = (svg_width - 150.0).max(170.0);
        let right = [
            (colors.occupied, "Occupied"),
            (colors.free, "Free"),
            (colors.unknown, "Unknown"),
        ];
        for (i, (color, label)) in right.iter().enumerate() {
            let y = 10.0 + i as f32 * 20.0;
            writeln!(
                svg,
                r##"    <rect x="{:.0}" y="{:.0}" width="15" height="15" fill="{}" stroke="#CCC"/>"##,
                right_x, y, color
            )?;
            writeln!(
                svg,
                r##"    <text x="{:.0}" y="{:.0}" fill="#333">{}</text>"##,
                right_x + 20.0,
                y + 12.0,
                label
            )?;
        }
        if self.area.is_some() {
            writeln!(
                svg,
                r#"    <line x1="{:.0}" y1="72" x2="{:.0}" y2="72" stroke="{}" stroke-width="2" stroke-dasharray="6,3"/>"#,
                right_x,
                right_x + 15.0,
                colors.area
            )?;
            writeln!(
                svg,
                r##"    <text x="{:.0}" y="76" fill="#333">Area of interest</text>"##,
                right_x + 20.0
            )?;
        }

        writeln!(svg, "  </g>")
    }
}

fn points_attr(points: &[WorldPoint], frame: &Frame) -> Result<String, std::fmt::Error> {
    let mut attr = String::new();
    for (i, p) in points.iter().enumerate() {
        let (x, y) = frame.px(*p);
        if i > 0 {
            attr.push(' ');
        }
        write!(attr, "{:.1},{:.1}", x, y)?;
    }
    Ok(attr)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
