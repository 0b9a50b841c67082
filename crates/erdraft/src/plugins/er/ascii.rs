//! Terminal preview backend
//!
//! Rasterizes draw primitives onto an [`AsciiCanvas`]. Pixel coordinates map
//! to cells by integer division with the configured cell size.

use crate::core::{
    AsciiCanvas, BoxChars, CharacterSet, ConnectorChars, DrawPrimitive, EndpointGlyph, Point, Rect,
    RectRole, TextAnchor, TextStyle,
};

/// Character grid preview of a rendered diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiBackend {
    pub style: CharacterSet,
    /// Pixels per column
    pub cell_width: u32,
    /// Pixels per row
    pub cell_height: u32,
}

impl Default for AsciiBackend {
    fn default() -> Self {
        Self {
            style: CharacterSet::default(),
            cell_width: 8,
            cell_height: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    col: usize,
    row: usize,
}

impl AsciiBackend {
    pub fn new(style: CharacterSet) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn render(&self, primitives: &[DrawPrimitive]) -> String {
        let boxes = BoxChars::for_style(self.style);
        let lines = ConnectorChars::for_style(self.style);
        let mut canvas = AsciiCanvas::new(0, 0);

        for primitive in primitives {
            match primitive {
                DrawPrimitive::Rect { bounds, role, .. } => match role {
                    // Fills have no terminal counterpart
                    RectRole::Body => {}
                    RectRole::Header => {
                        let (left, _, right, bottom) = self.rect_cells(bounds);
                        canvas.draw_separator(left, right, bottom.saturating_sub(1), &boxes);
                    }
                    RectRole::Border => {
                        let (left, top, right, bottom) = self.rect_cells(bounds);
                        canvas.draw_box(left, top, right, bottom, &boxes);
                    }
                },
                DrawPrimitive::Text {
                    position,
                    content,
                    style,
                    anchor,
                } => {
                    let cell = self.cell(*position);
                    // Labels sit on the row above their connector
                    let row = match style {
                        TextStyle::Label => cell.row.saturating_sub(1),
                        TextStyle::Title | TextStyle::Field => cell.row,
                    };
                    match anchor {
                        TextAnchor::Start => {
                            let col = position.x.div_ceil(self.cell_width) as usize;
                            canvas.draw_text(col, row, content);
                        }
                        TextAnchor::Middle => canvas.draw_text_centered(cell.col, row, content),
                    }
                }
                DrawPrimitive::Path {
                    points,
                    stroke,
                    start,
                    end,
                } => {
                    let cells = self.path_cells(points);
                    draw_path(&mut canvas, &cells, &lines, stroke.dashed);
                    if let [tip, next, ..] = cells.as_slice() {
                        draw_glyph(&mut canvas, *tip, *next, *start);
                    }
                    if let [.., prev, tip] = cells.as_slice() {
                        draw_glyph(&mut canvas, *tip, *prev, *end);
                    }
                }
            }
        }

        canvas.to_string()
    }

    fn cell(&self, point: Point) -> Cell {
        Cell {
            col: (point.x / self.cell_width) as usize,
            row: (point.y / self.cell_height) as usize,
        }
    }

    /// Inclusive (left, top, right, bottom) cells of a rectangle
    fn rect_cells(&self, rect: &Rect) -> (usize, usize, usize, usize) {
        let top_left = self.cell(Point::new(rect.x, rect.y));
        let bottom_right = self.cell(Point::new(rect.right(), rect.bottom()));
        (top_left.col, top_left.row, bottom_right.col, bottom_right.row)
    }

    /// Path corners as cells, with repeated cells collapsed
    fn path_cells(&self, points: &[Point]) -> Vec<Cell> {
        let mut cells: Vec<Cell> = Vec::with_capacity(points.len());
        for point in points {
            let cell = self.cell(*point);
            if cells.last() != Some(&cell) {
                cells.push(cell);
            }
        }
        cells
    }
}

/// Direction flags (left, right, up, down) from `at` toward `other`
fn heading(at: Cell, other: Cell) -> (bool, bool, bool, bool) {
    (
        other.col < at.col,
        other.col > at.col,
        other.row < at.row,
        other.row > at.row,
    )
}

/// Draw the connector runs, leaving both end cells (box edges) untouched
fn draw_path(canvas: &mut AsciiCanvas, cells: &[Cell], lines: &ConnectorChars, dashed: bool) {
    let (Some(&first), Some(&last)) = (cells.first(), cells.last()) else {
        return;
    };
    let put = |canvas: &mut AsciiCanvas, cell: Cell, c: char| {
        if cell != first && cell != last {
            canvas.set_char(cell.col, cell.row, c);
        }
    };

    for pair in cells.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.row == b.row {
            for col in a.col.min(b.col)..=a.col.max(b.col) {
                put(canvas, Cell { col, row: a.row }, lines.horizontal(dashed));
            }
        } else {
            for row in a.row.min(b.row)..=a.row.max(b.row) {
                put(canvas, Cell { col: a.col, row }, lines.vertical(dashed));
            }
        }
    }

    for window in cells.windows(3) {
        let (prev, at, next) = (window[0], window[1], window[2]);
        let (l1, r1, u1, d1) = heading(at, prev);
        let (l2, r2, u2, d2) = heading(at, next);
        let corner = lines.corners.corner(l1 || l2, r1 || r2, u1 || u2, d1 || d2);
        put(canvas, at, corner);
    }
}

/// Glyph characters for a connector end, from the box outward.
/// `into` is the unit step pointing from the connector into the box.
fn glyph_chars(glyph: EndpointGlyph, into: (isize, isize)) -> Vec<char> {
    let vertical = into.0 == 0;
    let bar = if vertical { '-' } else { '|' };
    let crow = match into {
        (1, _) => '{',
        (-1, _) => '}',
        (_, 1) => '^',
        _ => 'v',
    };
    match glyph {
        EndpointGlyph::None => Vec::new(),
        EndpointGlyph::Bar => vec![bar],
        EndpointGlyph::Circle => vec!['o'],
        EndpointGlyph::CircleBar => vec![bar, 'o'],
        EndpointGlyph::CrowFoot => vec![crow],
    }
}

fn draw_glyph(canvas: &mut AsciiCanvas, tip: Cell, toward: Cell, glyph: EndpointGlyph) {
    let into = (
        (tip.col as isize - toward.col as isize).signum(),
        (tip.row as isize - toward.row as isize).signum(),
    );
    if into == (0, 0) {
        return;
    }
    for (step, c) in glyph_chars(glyph, into).into_iter().enumerate() {
        let distance = step as isize + 1;
        let col = tip.col as isize - into.0 * distance;
        let row = tip.row as isize - into.1 * distance;
        if col >= 0 && row >= 0 {
            canvas.set_char(col as usize, row as usize, c);
        }
    }
}
