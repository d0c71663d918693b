//! Grid placement of workspace widgets.
//!
//! The workspace is divided into a fixed number of columns and rows. Widgets
//! are placed left to right in insertion order, each spanning as many cells
//! as its pixel size covers. Any resize clears the grid and places every
//! widget again from the top-left.

use tracing::debug;

use crate::geometry::{Point, Rect, Size};

pub const DEFAULT_COLUMNS: u32 = 100;
pub const DEFAULT_ROWS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetGridCell {
    pub row: u32,
    pub column: u32,
    pub row_span: u32,
    pub col_span: u32,
}

#[derive(Debug, Clone)]
pub struct GridItem<T> {
    pub widget: T,
    /// Pixel size snapped to whole cells.
    pub size: Size,
    pub cell: WidgetGridCell,
}

#[derive(Debug, Clone)]
pub struct WorkspaceGrid<T> {
    size: Size,
    columns: u32,
    rows: u32,
    col_width: u32,
    row_height: u32,
    next_column: u32,
    next_row: u32,
    row_extent: u32,
    items: Vec<GridItem<T>>,
}

impl<T> WorkspaceGrid<T> {
    /// Cell size is fixed here from `size / (columns, rows)`; later resizes
    /// change the number of cells instead.
    pub fn new(size: Size, columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            size,
            columns,
            rows,
            col_width: (size.width / columns).max(1),
            row_height: (size.height / rows).max(1),
            next_column: 0,
            next_row: 0,
            row_extent: 0,
            items: Vec::new(),
        }
    }

    /// Append a widget after the last one.
    pub fn place(&mut self, widget: T, size: Size) -> WidgetGridCell {
        let (cell, snapped) = self.allocate(size);
        self.items.push(GridItem {
            widget,
            size: snapped,
            cell,
        });
        cell
    }

    /// Insert at `index` (clamped to the end) and re-place everything.
    pub fn insert(&mut self, index: usize, widget: T, size: Size) {
        let index = index.min(self.items.len());
        self.items.insert(
            index,
            GridItem {
                widget,
                size,
                cell: WidgetGridCell::default(),
            },
        );
        self.relayout();
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.relayout();
        Some(item.widget)
    }

    /// Keep the cell size, recount the cells for `size`, re-place every widget.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.columns = (size.width / self.col_width).max(1);
        self.rows = (size.height / self.row_height).max(1);
        debug!(
            columns = self.columns,
            rows = self.rows,
            widgets = self.items.len(),
            "workspace grid rebuilt"
        );
        self.relayout();
    }

    fn relayout(&mut self) {
        self.next_column = 0;
        self.next_row = 0;
        self.row_extent = 0;
        let mut items = std::mem::take(&mut self.items);
        for item in &mut items {
            let (cell, snapped) = self.allocate(item.size);
            item.cell = cell;
            item.size = snapped;
        }
        self.items = items;
    }

    fn allocate(&mut self, size: Size) -> (WidgetGridCell, Size) {
        let col_span = (size.width / self.col_width).clamp(1, self.columns);
        let row_span = (size.height / self.row_height).max(1);

        if self.next_column > 0 && self.next_column + col_span > self.columns {
            self.next_column = 0;
            self.next_row += self.row_extent;
            self.row_extent = 0;
        }
        let cell = WidgetGridCell {
            row: self.next_row,
            column: self.next_column,
            row_span,
            col_span,
        };
        self.next_column += col_span;
        self.row_extent = self.row_extent.max(row_span);
        let snapped = Size::new(col_span * self.col_width, row_span * self.row_height);
        (cell, snapped)
    }

    /// Pixel rect of a cell relative to the workspace origin.
    pub fn cell_rect(&self, cell: WidgetGridCell) -> Rect {
        Rect::new(
            (cell.column * self.col_width) as i32,
            (cell.row * self.row_height) as i32,
            cell.col_span * self.col_width,
            cell.row_span * self.row_height,
        )
    }

    /// Insertion index for a widget dropped at `p`: before the first widget
    /// that comes after `p` in reading order.
    pub fn drop_index(&self, p: Point) -> usize {
        self.items
            .iter()
            .position(|item| {
                let r = self.cell_rect(item.cell);
                let mid_x = r.center().x;
                p.y < f64::from(r.y) || (p.y < f64::from(r.bottom()) && p.x < mid_x)
            })
            .unwrap_or(self.items.len())
    }

    /// Index of the widget whose cell contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        self.items
            .iter()
            .position(|item| self.cell_rect(item.cell).contains(p))
    }

    pub fn items(&self) -> &[GridItem<T>] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [GridItem<T>] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_size(&self) -> Size {
        Size::new(self.col_width, self.row_height)
    }
}
