//! Room grid state: per-cell collision scores, occupants and relation sets
//!
//! Coordinates follow one convention throughout: `x` is the row and runs over
//! `0..length`, `y` is the column and runs over `0..width`. Every accessor
//! checks bounds against that convention and reports `OutOfRange` instead of
//! panicking.

use ndarray::{Array2, ArrayView2, Axis, Slice};

use crate::io::configuration::HARD_BLOCK_SCORE;
use crate::io::error::{Result, invalid_parameter, out_of_range};
use crate::spatial::items::Item;
use crate::spatial::labels::{Label, LabelSet, LabelTable};

/// Half-open rectangle `[start_x, end_x) × [start_y, end_y)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// First row (inclusive)
    pub start_x: usize,
    /// First column (inclusive)
    pub start_y: usize,
    /// Last row (exclusive)
    pub end_x: usize,
    /// Last column (exclusive)
    pub end_y: usize,
}

impl Rect {
    /// Create a rectangle from its corners
    pub const fn new(start_x: usize, start_y: usize, end_x: usize, end_y: usize) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Rectangle covered by an item anchored at `(x, y)`
    ///
    /// `None` when the far edge does not fit in `usize`.
    pub const fn for_item(x: usize, y: usize, item: &Item) -> Option<Self> {
        match (x.checked_add(item.length()), y.checked_add(item.width())) {
            (Some(end_x), Some(end_y)) => Some(Self::new(x, y, end_x, end_y)),
            _ => None,
        }
    }

    fn rows(&self) -> Slice {
        Slice::from(self.start_x..self.end_x)
    }

    fn cols(&self) -> Slice {
        Slice::from(self.start_y..self.end_y)
    }

    /// Test if the rectangle covers no cells
    pub const fn is_empty(&self) -> bool {
        self.start_x >= self.end_x || self.start_y >= self.end_y
    }

    /// Number of cells covered
    pub const fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end_x - self.start_x) * (self.end_y - self.start_y)
        }
    }

    /// Iterate covered coordinates in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (start_y, end_y) = (self.start_y, self.end_y);
        (self.start_x..self.end_x).flat_map(move |x| (start_y..end_y).map(move |y| (x, y)))
    }
}

/// One grid unit
#[derive(Clone, Debug)]
pub struct Cell {
    /// Sequential number, 1-based, row-major
    pub number: usize,
    /// Row coordinate
    pub x: usize,
    /// Column coordinate
    pub y: usize,
    /// Sum of the collision weights of every item written here
    pub collision_score: u32,
    /// Item labels in write order; the last one is topmost
    pub occupants: Vec<Label>,
    /// Next-to relation labels (stored, not interpreted)
    pub next_to: LabelSet,
    /// Item labels that must not be placed on this cell
    pub avoid: LabelSet,
}

impl Cell {
    fn empty(number: usize, x: usize, y: usize) -> Self {
        Self {
            number,
            x,
            y,
            collision_score: 0,
            occupants: Vec::new(),
            next_to: LabelSet::new(),
            avoid: LabelSet::new(),
        }
    }

    /// Test whether the cell already holds a hard-blocking score
    pub const fn is_hard_blocked(&self) -> bool {
        self.collision_score >= HARD_BLOCK_SCORE
    }

    /// Test whether a label has been written to this cell
    pub fn has_occupant(&self, label: Label) -> bool {
        self.occupants.contains(&label)
    }

    fn write(&mut self, label: Label, weight: u32) {
        self.occupants.push(label);
        self.collision_score += weight;
    }
}

/// Read-only snapshot of a cell with every label resolved to its name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    /// Sequential number, 1-based, row-major
    pub number: usize,
    /// Row coordinate
    pub x: usize,
    /// Column coordinate
    pub y: usize,
    /// Accumulated collision score
    pub collision_score: u32,
    /// Occupant names in write order
    pub occupants: Vec<String>,
    /// Next-to relation names
    pub next_to: Vec<String>,
    /// Names of items avoided at this cell
    pub avoid: Vec<String>,
}

impl CellView {
    /// Most recently written occupant
    pub fn topmost(&self) -> Option<&str> {
        self.occupants.last().map(String::as_str)
    }

    /// Test whether the named item is avoided here
    pub fn avoids(&self, name: &str) -> bool {
        self.avoid.iter().any(|avoided| avoided == name)
    }

    /// Test whether the cell holds a hard-blocking score
    pub const fn is_hard_blocked(&self) -> bool {
        self.collision_score >= HARD_BLOCK_SCORE
    }
}

/// Mutable room state owned by a single layout
#[derive(Debug)]
pub struct RoomGrid {
    cells: Array2<Cell>,
    labels: LabelTable,
    dimensions: (usize, usize),
}

impl RoomGrid {
    /// Allocate a `length × width` grid and seed its perimeter with walls
    ///
    /// Cells are numbered 1.. in row-major order. Every cell with
    /// `x ∈ {0, length-1}` or `y ∈ {0, width-1}` receives the wall item;
    /// interior cells start with score 0 and no occupants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero
    pub fn initialize(length: usize, width: usize) -> Result<Self> {
        if length == 0 {
            return Err(invalid_parameter("length", &length, &"room must have rows"));
        }
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"room must have columns"));
        }

        let cells = Array2::from_shape_fn((length, width), |(x, y)| {
            Cell::empty(x * width + y + 1, x, y)
        });

        let mut grid = Self {
            cells,
            labels: LabelTable::new(),
            dimensions: (length, width),
        };

        let wall = Item::wall();
        let wall_label = grid.labels.intern(wall.name());
        let wall_weight = wall.collision_class().weight();
        for cell in &mut grid.cells {
            if cell.x == 0 || cell.y == 0 || cell.x == length - 1 || cell.y == width - 1 {
                cell.write(wall_label, wall_weight);
            }
        }

        Ok(grid)
    }

    /// Number of rows
    pub const fn length(&self) -> usize {
        self.dimensions.0
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.dimensions.1
    }

    /// Grid dimensions (length, width)
    pub const fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// Test whether a coordinate lies inside the grid
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.dimensions.0 && y < self.dimensions.1
    }

    /// Test whether a rectangle lies entirely inside the grid
    pub const fn contains_rect(&self, rect: &Rect) -> bool {
        rect.start_x <= rect.end_x
            && rect.start_y <= rect.end_y
            && rect.end_x <= self.dimensions.0
            && rect.end_y <= self.dimensions.1
    }

    /// Borrow a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate lies outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell> {
        self.cells
            .get([x, y])
            .ok_or_else(|| out_of_range(x, y, self.dimensions))
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell> {
        let dimensions = self.dimensions;
        self.cells
            .get_mut([x, y])
            .ok_or_else(|| out_of_range(x, y, dimensions))
    }

    /// Borrow the cells covered by a rectangle
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` naming the far corner if the rectangle leaves the grid
    pub fn region(&self, rect: &Rect) -> Result<ArrayView2<'_, Cell>> {
        if !self.contains_rect(rect) {
            return Err(out_of_range(
                rect.end_x.saturating_sub(1),
                rect.end_y.saturating_sub(1),
                self.dimensions,
            ));
        }
        Ok(self
            .cells
            .slice_axis(Axis(0), rect.rows())
            .slice_axis_move(Axis(1), rect.cols()))
    }

    /// Iterate every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The label table backing this grid
    pub const fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Intern a name in this grid's label table
    pub fn intern(&mut self, name: &str) -> Label {
        self.labels.intern(name)
    }

    /// Look up the label of a name already known to this grid
    pub fn label_of(&self, name: &str) -> Option<Label> {
        self.labels.lookup(name)
    }

    /// Append an item to a cell and add its collision weight
    ///
    /// No feasibility check is made; callers validate first.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate lies outside the grid
    pub fn write_cell(&mut self, x: usize, y: usize, item: &Item) -> Result<()> {
        let label = self.labels.intern(item.name());
        self.cell_mut(x, y)?
            .write(label, item.collision_class().weight());
        Ok(())
    }

    /// Replace a cell's occupants and relations with a single item
    ///
    /// The collision score keeps accumulating; only the label data is cleared.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate lies outside the grid
    pub fn reset_cell(&mut self, x: usize, y: usize, item: &Item) -> Result<()> {
        let label = self.labels.intern(item.name());
        let cell = self.cell_mut(x, y)?;
        cell.occupants.clear();
        cell.next_to.clear();
        cell.avoid.clear();
        cell.write(label, item.collision_class().weight());
        Ok(())
    }

    /// Write an item into every cell of its rectangle anchored at `(x, y)`
    ///
    /// The whole rectangle is bounds-checked before any cell is touched, so a
    /// failed call leaves the grid unchanged. Returns the covered rectangle.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if any part of the rectangle leaves the grid,
    /// including rectangles whose far edge overflows
    pub fn place_item(&mut self, x: usize, y: usize, item: &Item) -> Result<Rect> {
        let Some(rect) = Rect::for_item(x, y, item) else {
            return Err(out_of_range(x, y, self.dimensions));
        };
        if !self.contains_rect(&rect) {
            return Err(out_of_range(
                rect.end_x.saturating_sub(1),
                rect.end_y.saturating_sub(1),
                self.dimensions,
            ));
        }

        let label = self.labels.intern(item.name());
        let weight = item.collision_class().weight();
        let covered = self
            .cells
            .slice_axis_mut(Axis(0), rect.rows())
            .slice_axis_move(Axis(1), rect.cols());
        for cell in covered {
            cell.write(label, weight);
        }

        Ok(rect)
    }

    /// Record that an item must not be placed on a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate lies outside the grid
    pub fn mark_avoid(&mut self, x: usize, y: usize, label: Label) -> Result<bool> {
        Ok(self.cell_mut(x, y)?.avoid.insert(label))
    }

    /// Record a next-to relation on a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate lies outside the grid
    pub fn mark_next_to(&mut self, x: usize, y: usize, label: Label) -> Result<bool> {
        Ok(self.cell_mut(x, y)?.next_to.insert(label))
    }

    /// Snapshot a cell with names resolved
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate lies outside the grid
    pub fn query_cell(&self, x: usize, y: usize) -> Result<CellView> {
        let cell = self.cell(x, y)?;
        Ok(CellView {
            number: cell.number,
            x: cell.x,
            y: cell.y,
            collision_score: cell.collision_score,
            occupants: cell
                .occupants
                .iter()
                .map(|&label| self.labels.resolve(label).to_string())
                .collect(),
            next_to: self.labels.resolve_set(&cell.next_to),
            avoid: self.labels.resolve_set(&cell.avoid),
        })
    }

    /// Name of the most recently written occupant of a cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate lies outside the grid
    pub fn topmost_occupant(&self, x: usize, y: usize) -> Result<Option<&str>> {
        Ok(self
            .cell(x, y)?
            .occupants
            .last()
            .map(|&label| self.labels.resolve(label)))
    }

    /// Coordinates of every cell holding the named item
    pub fn cells_with_occupant(&self, name: &str) -> Vec<(usize, usize)> {
        let Some(label) = self.label_of(name) else {
            return Vec::new();
        };
        self.cells
            .iter()
            .filter(|cell| cell.has_occupant(label))
            .map(|cell| (cell.x, cell.y))
            .collect()
    }
}
