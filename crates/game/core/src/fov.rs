//! Field-of-view computation.
//!
//! Simple symmetric ray casting: a tile within the radius is visible when a
//! Bresenham line from the origin reaches it without crossing an opaque
//! tile first. The origin is always visible. Good enough for small rooms
//! and fully deterministic.

use crate::state::types::{Position, TileGrid};

/// Returns a dense `width * height` visibility overlay for an observer at
/// `origin` with the given radius.
pub fn compute(grid: &TileGrid, origin: Position, radius: u32) -> Vec<bool> {
    let len = (grid.width() * grid.height()) as usize;
    let mut visible = vec![false; len];
    if !grid.in_bounds(origin) {
        return visible;
    }

    let index = |p: Position| (p.y as u32 * grid.width() + p.x as u32) as usize;
    visible[index(origin)] = true;

    let r = radius as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            let target = origin.offset(dx, dy);
            if !grid.in_bounds(target) || origin.distance(target) > radius {
                continue;
            }
            for point in line(origin, target) {
                visible[index(point)] = true;
                if point != target && !grid.is_transparent(point) {
                    break;
                }
            }
        }
    }
    visible
}

/// Bresenham line from `from` to `to`, excluding `from`, including `to`.
fn line(from: Position, to: Position) -> Vec<Position> {
    let mut points = Vec::new();
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut current = from;
    loop {
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
        points.push(current);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::TileKind;

    fn open_grid() -> TileGrid {
        let mut grid = TileGrid::filled_with_walls(11, 11);
        for p in grid.iter_positions().collect::<Vec<_>>() {
            if p.x > 0 && p.y > 0 && p.x < 10 && p.y < 10 {
                grid.set_kind(p, TileKind::Floor);
            }
        }
        grid
    }

    fn is_visible(grid: &TileGrid, overlay: &[bool], p: Position) -> bool {
        overlay[(p.y as u32 * grid.width() + p.x as u32) as usize]
    }

    #[test]
    fn walls_cast_shadows() {
        let mut grid = open_grid();
        grid.set_kind(Position::new(5, 3), TileKind::Wall);
        let overlay = compute(&grid, Position::new(5, 5), 8);
        // the wall itself is visible, the tile directly behind it is not
        assert!(is_visible(&grid, &overlay, Position::new(5, 3)));
        assert!(!is_visible(&grid, &overlay, Position::new(5, 1)));
    }

    #[test]
    fn radius_bounds_sight() {
        let grid = open_grid();
        let overlay = compute(&grid, Position::new(5, 5), 2);
        assert!(is_visible(&grid, &overlay, Position::new(7, 5)));
        assert!(!is_visible(&grid, &overlay, Position::new(8, 5)));
    }

    #[test]
    fn origin_is_always_visible() {
        let grid = open_grid();
        let overlay = compute(&grid, Position::new(5, 5), 0);
        assert!(is_visible(&grid, &overlay, Position::new(5, 5)));
        assert!(!is_visible(&grid, &overlay, Position::new(6, 5)));
    }
}
