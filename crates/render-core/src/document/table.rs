use super::Document;
use crate::types::{Align, DrawOp, FontRole};
use crate::utils::line_height_mm;
use nuzum_shaper::Shaped;
use nuzum_types::{Color, Rect};

const CELL_PAD_X: f32 = 1.8;
const MIN_ROW_HEIGHT: f32 = 7.0;
const BORDER_WIDTH: f32 = 0.3;

static EMPTY_CELL: Cell = Cell::Empty;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// A green check for `true`, a red cross for `false`. Drawn as vector
    /// marks, never as glyphs, so it survives every font.
    Check(bool),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Check(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    /// Relative width; columns are scaled to fill the content width.
    pub width: f32,
    pub align: Align,
}

impl ColumnSpec {
    pub fn new(width: f32) -> Self {
        Self { width, align: Align::Right }
    }

    /// Left-aligned, for numeric columns.
    pub fn numeric(width: f32) -> Self {
        Self { width, align: Align::Left }
    }

    pub fn centered(width: f32) -> Self {
        Self { width, align: Align::Center }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStyle {
    pub text_color: Option<Color>,
    pub fill: Option<Color>,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
    pub style: RowStyle,
}

impl TableRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells, style: RowStyle::default() }
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.style.text_color = Some(color);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }
}

/// A table whose first column sits at the right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub columns: Vec<ColumnSpec>,
    /// Repeated at the top of every page the table spans. Empty for none.
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
    pub zebra: bool,
    pub font_size: f32,
}

impl TableSpec {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            header: Vec::new(),
            rows: Vec::new(),
            zebra: true,
            font_size: 9.5,
        }
    }

    pub fn header<S: Into<String>>(mut self, titles: impl IntoIterator<Item = S>) -> Self {
        self.header = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn zebra(mut self, zebra: bool) -> Self {
        self.zebra = zebra;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn push(&mut self, row: TableRow) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    x: f32,
    width: f32,
    align: Align,
}

#[derive(Debug, Clone)]
struct Paint {
    fill: Option<Color>,
    color: Color,
    font: FontRole,
}

fn rtl_slots(columns: &[ColumnSpec], left: f32, width: f32) -> Vec<Slot> {
    let total: f32 = columns.iter().map(|c| c.width.max(0.0)).sum();
    let scale = if total > 0.0 { width / total } else { 0.0 };
    let mut right = left + width;
    columns
        .iter()
        .map(|column| {
            let w = column.width.max(0.0) * scale;
            right -= w;
            Slot { x: right, width: w, align: column.align }
        })
        .collect()
}

impl Document {
    /// Draws a table with column 0 rightmost. Rows that do not fit start a
    /// new page, which repeats the header row.
    pub fn rtl_table(&mut self, spec: &TableSpec) {
        if spec.columns.is_empty() {
            return;
        }
        let content = self.content_rect();
        let slots = rtl_slots(&spec.columns, content.x, content.width);
        let size = spec.font_size;
        let header: Vec<Cell> = spec.header.iter().map(|h| Cell::Text(h.clone())).collect();
        let header_paint = Paint {
            fill: Some(self.palette().primary.clone()),
            color: Color::WHITE,
            font: FontRole::Bold,
        };

        if !header.is_empty() {
            self.table_header(&slots, &header, &header_paint, size);
        }

        for (index, row) in spec.rows.iter().enumerate() {
            let cells: Vec<&Cell> =
                (0..slots.len()).map(|i| row.cells.get(i).unwrap_or(&EMPTY_CELL)).collect();
            let zebra = (spec.zebra && index % 2 == 1).then(|| self.palette().zebra.clone());
            let paint = Paint {
                fill: row.style.fill.clone().or(zebra),
                color: row.style.text_color.clone().unwrap_or_else(|| self.palette().text.clone()),
                font: if row.style.bold { FontRole::Bold } else { FontRole::Regular },
            };
            let paints = vec![paint; slots.len()];
            let (lines, height) = self.layout_row(&slots, &cells, &paints, size);

            if self.ensure_space(height) && !header.is_empty() {
                self.table_header(&slots, &header, &header_paint, size);
            }
            self.draw_row(&slots, &cells, lines, height, &paints, size);
        }
        self.cursor_y += 4.0;
    }

    /// Two columns: bold label on the left, value on the right.
    pub fn kv_table<K: AsRef<str>, V: AsRef<str>>(&mut self, pairs: &[(K, V)]) {
        let content = self.content_rect();
        let label_width = content.width * 0.4;
        let slots = [
            Slot { x: content.x, width: label_width, align: Align::Right },
            Slot { x: content.x + label_width, width: content.width - label_width, align: Align::Right },
        ];
        let paints = [
            Paint {
                fill: Some(self.palette().header_bg.clone()),
                color: self.palette().text.clone(),
                font: FontRole::Bold,
            },
            Paint { fill: None, color: self.palette().text.clone(), font: FontRole::Regular },
        ];
        let size = 10.0;

        for (label, value) in pairs {
            let label = Cell::text(label.as_ref());
            let value = Cell::text(value.as_ref());
            let cells = [&label, &value];
            let (lines, height) = self.layout_row(&slots, &cells, &paints, size);
            self.ensure_space(height);
            self.draw_row(&slots, &cells, lines, height, &paints, size);
        }
        self.cursor_y += 4.0;
    }

    fn table_header(&mut self, slots: &[Slot], header: &[Cell], paint: &Paint, size: f32) {
        let cells: Vec<&Cell> = (0..slots.len()).map(|i| header.get(i).unwrap_or(&EMPTY_CELL)).collect();
        let paints = vec![paint.clone(); slots.len()];
        let centered: Vec<Slot> = slots.iter().map(|s| Slot { align: Align::Center, ..*s }).collect();
        let (lines, height) = self.layout_row(&centered, &cells, &paints, size);
        self.ensure_space(height);
        self.draw_row(&centered, &cells, lines, height, &paints, size);
    }

    fn layout_row(&self, slots: &[Slot], cells: &[&Cell], paints: &[Paint], size: f32) -> (Vec<Vec<Shaped>>, f32) {
        let lines: Vec<Vec<Shaped>> = slots
            .iter()
            .zip(cells)
            .zip(paints)
            .map(|((slot, cell), paint)| match cell {
                Cell::Text(text) => self.wrap(text, paint.font, size, slot.width - 2.0 * CELL_PAD_X),
                Cell::Check(_) | Cell::Empty => Vec::new(),
            })
            .collect();
        let max_lines = lines.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let height = (max_lines as f32 * line_height_mm(size) + 2.0).max(MIN_ROW_HEIGHT);
        (lines, height)
    }

    fn draw_row(
        &mut self,
        slots: &[Slot],
        cells: &[&Cell],
        lines: Vec<Vec<Shaped>>,
        height: f32,
        paints: &[Paint],
        size: f32,
    ) {
        let top = self.cursor_y;
        let line_height = line_height_mm(size);
        let border = Color::rgb(200, 205, 210);

        for (((slot, cell), cell_lines), paint) in slots.iter().zip(cells).zip(lines).zip(paints) {
            let rect = Rect::new(slot.x, top, slot.width, height);
            if let Some(fill) = &paint.fill {
                self.push(DrawOp::FillRect { rect, color: fill.clone() });
            }
            self.push(DrawOp::StrokeRect { rect, color: border.clone(), width: BORDER_WIDTH });

            match cell {
                Cell::Text(_) => {
                    let block = cell_lines.len() as f32 * line_height;
                    let mut line_top = top + (height - block) / 2.0;
                    for line in cell_lines {
                        self.place_line(
                            line,
                            slot.x + CELL_PAD_X,
                            slot.width - 2.0 * CELL_PAD_X,
                            line_top,
                            paint.font,
                            size,
                            paint.color.clone(),
                            slot.align,
                        );
                        line_top += line_height;
                    }
                }
                Cell::Check(checked) => self.checkmark(rect, *checked),
                Cell::Empty => {}
            }
        }
        self.cursor_y = top + height;
    }

    fn checkmark(&mut self, cell: Rect, checked: bool) {
        let (cx, cy) = (cell.x + cell.width / 2.0, cell.y + cell.height / 2.0);
        if checked {
            let color = self.palette().success.clone();
            self.push(DrawOp::Polyline {
                points: vec![(cx - 2.2, cy + 0.1), (cx - 0.7, cy + 1.7), (cx + 2.4, cy - 1.9)],
                color,
                width: 1.6,
            });
        } else {
            let color = self.palette().danger.clone();
            for points in [
                vec![(cx - 1.8, cy - 1.8), (cx + 1.8, cy + 1.8)],
                vec![(cx - 1.8, cy + 1.8), (cx + 1.8, cy - 1.8)],
            ] {
                self.push(DrawOp::Polyline { points, color: color.clone(), width: 1.4 });
            }
        }
    }
}
