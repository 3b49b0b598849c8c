//! Shared input handling: coordinate conversion, click targets, drop zones,
//! and event types.

use ratzilla::ratatui::layout::Rect;

/// All possible input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press from keyboard.
    Key(char),
    /// A click/tap on a registered target, identified by a semantic action ID.
    Click(u16),
    /// Pointer went down on a registered target.
    Press(u16),
    /// Pointer moved (terminal cell coordinates).
    Move { col: u16, row: u16 },
    /// Pointer went up. `target` is the click target under the pointer and
    /// `drop` the drop zone hit, as `(zone_id, x%, y%)`.
    Release {
        target: Option<u16>,
        drop: Option<(u16, f64, f64)>,
    },
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// The rectangular region (in terminal cell coordinates) for hit testing.
    pub rect: Rect,
    pub action_id: u16,
}

/// A region that accepts dragged items.
#[derive(Debug, Clone)]
pub struct DropZone {
    pub rect: Rect,
    pub zone_id: u16,
}

impl DropZone {
    /// Position of a cell inside the zone as percentages (0–100) of its
    /// width and height, measured to the cell centre. None when outside.
    pub fn relative_position(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        let r = &self.rect;
        if r.width == 0 || r.height == 0 {
            return None;
        }
        if col < r.x || col >= r.x + r.width || row < r.y || row >= r.y + r.height {
            return None;
        }
        let x = (col - r.x) as f64 + 0.5;
        let y = (row - r.y) as f64 + 0.5;
        Some((x / r.width as f64 * 100.0, y / r.height as f64 * 100.0))
    }
}

/// Shared state between the render loop and pointer handlers.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub drop_zones: Vec<DropZone>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            drop_zones: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Forget everything registered by the previous frame.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
        self.drop_zones.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Convenience: register a full-row click target at the given row within an area.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    pub fn add_drop_zone(&mut self, rect: Rect, zone_id: u16) {
        self.drop_zones.push(DropZone { rect, zone_id });
    }

    /// Hit-test a terminal cell coordinate against all registered targets.
    /// Later-registered targets win when they overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }

    /// Find the topmost drop zone under a cell, with the relative position.
    pub fn drop_test(&self, col: u16, row: u16) -> Option<(u16, f64, f64)> {
        self.drop_zones
            .iter()
            .rev()
            .find_map(|z| z.relative_position(col, row).map(|(x, y)| (z.zone_id, x, y)))
    }
}

/// Determine whether a screen width (in columns) should use narrow layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y coordinate to a terminal row index.
///
/// `click_y` is relative to the grid container's top edge.
/// `grid_height` is the total pixel height of the grid container.
///
/// Returns `None` if the point is outside the grid or inputs are invalid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;
    if row >= terminal_rows { None } else { Some(row) }
}

/// Convert a pixel X coordinate to a terminal column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols { None } else { Some(col) }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hit_test tests ──────────────────────────────────────────────

    #[test]
    fn hit_test_column_precision() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 10, 1), 1);
        cs.add_click_target(Rect::new(10, 5, 10, 1), 2);

        assert_eq!(cs.hit_test(9, 5), Some(1));
        assert_eq!(cs.hit_test(10, 5), Some(2));
        assert_eq!(cs.hit_test(20, 5), None);
        assert_eq!(cs.hit_test(3, 4), None);
    }

    #[test]
    fn hit_test_overlap_last_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(5, 5, 10, 1), 2);

        assert_eq!(cs.hit_test(7, 5), Some(2));
        assert_eq!(cs.hit_test(20, 5), Some(1));
    }

    #[test]
    fn row_target_outside_area_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 99);
        cs.add_row_target(area, 15, 98);
        cs.add_row_target(area, 12, 97);

        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(15, 12), Some(97));
    }

    #[test]
    fn clear_removes_targets_and_zones() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.add_drop_zone(Rect::new(0, 0, 10, 10), 7);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
        assert_eq!(cs.drop_test(1, 1), None);
    }

    // ── drop zones ─────────────────────────────────────────────────

    fn assert_pos(actual: Option<(f64, f64)>, x: f64, y: f64) {
        let (ax, ay) = actual.expect("inside zone");
        assert!((ax - x).abs() < 1e-9, "x: {ax} != {x}");
        assert!((ay - y).abs() < 1e-9, "y: {ay} != {y}");
    }

    #[test]
    fn drop_position_is_cell_centre_percentage() {
        let zone = DropZone {
            rect: Rect::new(10, 4, 20, 10),
            zone_id: 1,
        };
        assert_pos(zone.relative_position(10, 4), 2.5, 5.0);
        assert_pos(zone.relative_position(29, 13), 97.5, 95.0);
        assert_pos(zone.relative_position(20, 9), 52.5, 55.0);
    }

    #[test]
    fn drop_outside_zone_is_none() {
        let zone = DropZone {
            rect: Rect::new(10, 4, 20, 10),
            zone_id: 1,
        };
        assert_eq!(zone.relative_position(9, 5), None);
        assert_eq!(zone.relative_position(30, 5), None);
        assert_eq!(zone.relative_position(15, 14), None);
    }

    #[test]
    fn drop_test_reports_zone_id() {
        let mut cs = ClickState::new();
        cs.add_drop_zone(Rect::new(0, 0, 10, 10), 3);
        let (zone, x, y) = cs.drop_test(0, 0).unwrap();
        assert_eq!(zone, 3);
        assert_pos(Some((x, y)), 5.0, 5.0);
        assert_eq!(cs.drop_test(10, 0), None);
    }

    // ── Layout responsive tests ────────────────────────────────────

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    // ── pixel coordinate conversion tests ──────────────────────────

    #[test]
    fn pixel_to_row_basic() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
    }

    #[test]
    fn pixel_to_row_invalid_inputs() {
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn pixel_x_to_col_basic() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
        assert_eq!(pixel_x_to_col(-1.0, 800.0, 80), None);
    }

    #[test]
    fn pixel_to_drop_pipeline() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 80;
        cs.terminal_rows = 30;
        cs.add_drop_zone(Rect::new(40, 10, 20, 8), 1);

        // 10px x 15px cells
        let col = pixel_x_to_col(455.0, 800.0, cs.terminal_cols).unwrap();
        let row = pixel_y_to_row(160.0, 450.0, cs.terminal_rows).unwrap();
        assert_eq!((col, row), (45, 10));
        let (zone, x, _) = cs.drop_test(col, row).unwrap();
        assert_eq!(zone, 1);
        assert!((x - 27.5).abs() < 1e-9);
    }
}
