//! BoardView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Coord, TileColor};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board lands on screen for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the border
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub columns: u8,
    pub rows: u8,
}

impl BoardLayout {
    pub fn inner_x(&self) -> u16 {
        self.frame_x + 1
    }

    pub fn inner_y(&self) -> u16 {
        self.frame_y + 1
    }

    pub fn inner_h(&self) -> u16 {
        (self.rows as u16) * self.cell_h
    }

    /// Screen position of a grid cell's top-left corner
    pub fn cell_origin(&self, coord: Coord) -> (u16, u16) {
        (
            self.inner_x() + (coord.x as u16) * self.cell_w,
            self.inner_y() + (coord.y as u16) * self.cell_h,
        )
    }

    /// Translate a terminal position into a grid cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Coord> {
        let dx = column.checked_sub(self.inner_x())?;
        let dy = row.checked_sub(self.inner_y())?;
        let x = dx / self.cell_w;
        let y = dy / self.cell_h;
        if x >= self.columns as u16 || y >= self.rows as u16 {
            return None;
        }
        Some(Coord::new(x as u8, y as u8))
    }
}

/// A lightweight terminal renderer for the tile grid.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square with typical glyph aspect ratios.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn layout(&self, columns: u8, rows: u8, viewport: Viewport) -> BoardLayout {
        let frame_w = (columns as u16) * self.cell_w + 2;
        let frame_h = (rows as u16) * self.cell_h + 2;
        BoardLayout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            columns,
            rows,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// `cursor` is the keyboard cursor owned by the input layer.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Coord>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let layout = self.layout(snap.columns, snap.rows, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.inner_x(),
            layout.inner_y(),
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        fb.stroke_rect(layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h, border);

        for y in 0..snap.rows {
            for x in 0..snap.columns {
                self.draw_slot(fb, &layout, Coord::new(x, y));
            }
        }

        for y in 0..snap.rows {
            for x in 0..snap.columns {
                let coord = Coord::new(x, y);
                if let Some(tile) = snap.cell(coord) {
                    let shift = offset_rows(tile.offset, snap.tile_size, self.cell_h);
                    self.draw_tile(fb, &layout, coord, shift, tile.color);
                }
            }
        }

        if let Some(cursor) = cursor {
            self.draw_cursor(fb, &layout, cursor);
        }
        if let Some(selected) = snap.selection {
            self.draw_selection(fb, &layout, selected, snap.cell(selected).map(|t| t.color));
        }

        self.draw_side_panel(fb, snap, cursor, viewport, &layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Option<Coord>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_slot(&self, fb: &mut FrameBuffer, layout: &BoardLayout, coord: Coord) {
        let (px, py) = layout.cell_origin(coord);
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
    }

    /// Tiles leave their last column blank as a gutter and are clipped to the
    /// board interior while they fall in from above.
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        coord: Coord,
        shift: i32,
        color: TileColor,
    ) {
        let (px, py) = layout.cell_origin(coord);
        let top = layout.inner_y() as i32;
        let bottom = top + layout.inner_h() as i32;
        let width = tile_width(self.cell_w);
        let style = CellStyle::new(tile_rgb(color), tile_rgb(color));

        for dy in 0..self.cell_h as i32 {
            let ty = py as i32 + shift + dy;
            if ty < top || ty >= bottom {
                continue;
            }
            fb.fill_rect(px, ty as u16, width, 1, ' ', style);
        }
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, layout: &BoardLayout, cursor: Coord) {
        if cursor.x >= layout.columns || cursor.y >= layout.rows {
            return;
        }
        let (px, py) = layout.cell_origin(cursor);
        let bg = fb.get(px, py).map(|c| c.style.bg).unwrap_or(BOARD_BG);
        let style = CellStyle::new(Rgb::new(255, 255, 255), bg).bold();
        fb.put_char(px, py, '▸', style);
    }

    fn draw_selection(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        selected: Coord,
        color: Option<TileColor>,
    ) {
        let (px, py) = layout.cell_origin(selected);
        let bg = color.map(tile_rgb).unwrap_or(BOARD_BG);
        let style = CellStyle::new(Rgb::new(255, 255, 255), bg).bold();
        let width = tile_width(self.cell_w);
        if width >= 2 && self.cell_h >= 2 {
            fb.stroke_rect(px, py, width, self.cell_h, style);
        } else {
            fb.put_char(px, py, '■', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        cursor: Option<Coord>,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "STATUS", label);
        y = y.saturating_add(1);
        if snap.busy() {
            fb.put_str(panel_x, y, "BUSY", CellStyle::new(Rgb::new(240, 200, 80), PANEL_BG));
        } else {
            fb.put_str(panel_x, y, "READY", CellStyle::new(Rgb::new(120, 220, 120), PANEL_BG));
        }
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.phase.as_str(), dim);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "CHAIN", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.chain_depth, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SELECTED", label);
        y = y.saturating_add(1);
        put_coord(fb, panel_x, y, snap.selection, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "CURSOR", label);
        y = y.saturating_add(1);
        put_coord(fb, panel_x, y, cursor, value);
        y = y.saturating_add(2);

        for line in ["arrows  move", "space   pick", "mouse   pick", "q       quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }
}

/// Convert an offset in tile units into whole terminal rows.
pub fn offset_rows(offset: f32, tile_size: f32, cell_h: u16) -> i32 {
    if offset == 0.0 || tile_size <= 0.0 {
        return 0;
    }
    (offset / tile_size * cell_h as f32).round() as i32
}

/// Terminal color for a tile color.
pub fn tile_rgb(color: TileColor) -> Rgb {
    match color {
        TileColor::Red => Rgb::new(220, 60, 60),
        TileColor::Orange => Rgb::new(255, 150, 40),
        TileColor::Yellow => Rgb::new(240, 220, 70),
        TileColor::Green => Rgb::new(90, 200, 100),
        TileColor::Blue => Rgb::new(70, 120, 230),
        TileColor::Purple => Rgb::new(170, 90, 210),
    }
}

fn tile_width(cell_w: u16) -> u16 {
    if cell_w > 1 {
        cell_w - 1
    } else {
        cell_w
    }
}

fn put_coord(fb: &mut FrameBuffer, x: u16, y: u16, coord: Option<Coord>, style: CellStyle) {
    match coord {
        Some(c) => {
            fb.put_u32(x, y, c.x as u32, style);
            let comma = x + if c.x >= 10 { 2 } else { 1 };
            fb.put_char(comma, y, ',', style);
            fb.put_u32(comma + 1, y, c.y as u32, style);
        }
        None => fb.put_str(x, y, "-", style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_rows() {
        assert_eq!(offset_rows(0.0, 50.0, 2), 0);
        assert_eq!(offset_rows(-50.0, 50.0, 2), -2);
        assert_eq!(offset_rows(-100.0, 50.0, 2), -4);
        assert_eq!(offset_rows(-10.0, 50.0, 2), 0);
        assert_eq!(offset_rows(-20.0, 50.0, 2), -1);
    }

    #[test]
    fn test_hit_test_inverts_cell_origin() {
        let view = BoardView::default();
        let layout = view.layout(8, 8, Viewport::new(80, 24));
        for y in 0..8 {
            for x in 0..8 {
                let c = Coord::new(x, y);
                let (px, py) = layout.cell_origin(c);
                assert_eq!(layout.hit_test(px, py), Some(c));
                assert_eq!(layout.hit_test(px + 3, py + 1), Some(c));
            }
        }
        assert_eq!(layout.hit_test(layout.frame_x, layout.frame_y), None);
        assert_eq!(layout.hit_test(0, 0), None);
    }

    #[test]
    fn test_tile_colors_are_distinct() {
        for a in TileColor::ALL {
            for b in TileColor::ALL {
                if a != b {
                    assert_ne!(tile_rgb(a), tile_rgb(b));
                }
            }
        }
    }
}
