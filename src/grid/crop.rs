//! Cropping a grid to a region of interest.

use log::debug;

use super::OccupancyGrid;
use crate::geometry::Bounds;

/// Cut out the cells of `source` overlapping `bounds`.
///
/// The result keeps the source resolution and orientation, and its origin
/// is moved so that every kept cell maps to the same world position as in
/// the source. Bounds extending past the map are clamped to it; bounds that
/// miss the map entirely produce a 0 x 0 grid.
pub fn crop_map(bounds: &Bounds, source: &OccupancyGrid) -> OccupancyGrid {
    if bounds.is_empty() || source.cell_count() == 0 {
        return source.sub_grid(0, 0, 0, 0);
    }

    // Region expressed in the (possibly rotated) grid frame
    let local = Bounds::from_points(bounds.corners().map(|c| source.to_local(c)));
    let res = source.resolution();

    let x0 = cell_floor(local.min.x / res, source.width());
    let y0 = cell_floor(local.min.y / res, source.height());
    let x1 = cell_ceil(local.max.x / res, source.width());
    let y1 = cell_ceil(local.max.y / res, source.height());

    if x0 >= x1 || y0 >= y1 {
        debug!("[Crop] bounds miss the map, returning empty grid");
        return source.sub_grid(0, 0, 0, 0);
    }

    let cropped = source.sub_grid(x0, y0, x1, y1);
    debug!(
        "[Crop] {}x{} -> {}x{} cells, origin ({:.2}, {:.2})",
        source.width(),
        source.height(),
        cropped.width(),
        cropped.height(),
        cropped.origin().x,
        cropped.origin().y
    );
    cropped
}

fn cell_floor(v: f32, limit: usize) -> usize {
    (v.floor().max(0.0) as usize).min(limit)
}

fn cell_ceil(v: f32, limit: usize) -> usize {
    (v.ceil().max(0.0) as usize).min(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridCoord, WorldPoint};
    use crate::grid::CellState;
    use approx::assert_relative_eq;

    fn striped_grid() -> OccupancyGrid {
        // Column x is occupied when x is odd
        let cells = (0..100)
            .map(|i| if (i % 10) % 2 == 1 { CellState::Occupied } else { CellState::Free })
            .collect();
        OccupancyGrid::from_cells(10, 10, 1.0, WorldPoint::new(-5.0, -5.0), cells).unwrap()
    }

    #[test]
    fn test_crop_keeps_world_positions() {
        let source = striped_grid();
        let bounds = Bounds::new(WorldPoint::new(-2.5, -1.5), WorldPoint::new(1.5, 0.5));
        let cropped = crop_map(&bounds, &source);

        assert_eq!(cropped.width(), 5);
        assert_eq!(cropped.height(), 3);
        assert_relative_eq!(cropped.origin().x, -3.0);
        assert_relative_eq!(cropped.origin().y, -2.0);

        for (coord, state) in cropped.iter() {
            let world = cropped.map_to_world(coord);
            let src = source.world_to_map(world);
            assert_eq!(source.get(src), state);
        }
    }

    #[test]
    fn test_crop_clamps_to_map() {
        let source = striped_grid();
        let bounds = Bounds::new(WorldPoint::new(-100.0, 3.2), WorldPoint::new(100.0, 100.0));
        let cropped = crop_map(&bounds, &source);
        assert_eq!(cropped.width(), 10);
        assert_eq!(cropped.height(), 2);
        assert_eq!(cropped.get(GridCoord::new(1, 0)), CellState::Occupied);
    }

    #[test]
    fn test_crop_outside_map_is_empty() {
        let source = striped_grid();
        let bounds = Bounds::new(WorldPoint::new(20.0, 20.0), WorldPoint::new(30.0, 30.0));
        let cropped = crop_map(&bounds, &source);
        assert_eq!(cropped.cell_count(), 0);
        assert!(crop_map(&Bounds::empty(), &source).cell_count() == 0);
    }
}
