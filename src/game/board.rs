use super::types::Mark;

/// A single cell: fixed position index, mutable occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub value: Option<Mark>,
}

/// An n×n board of cells, row-major, indexed by `row * n + col`.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Fresh board with sequential indices and every cell empty.
    pub fn new(size: usize) -> Self {
        let cells = (0..size * size)
            .map(|index| Cell { index, value: None })
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn mark_at(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).and_then(|cell| cell.value)
    }

    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(cell) if cell.value.is_none())
    }

    /// Occupy a cell. Unknown indices and already-taken cells are left
    /// untouched and reported as `false`.
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if cell.value.is_none() => {
                cell.value = Some(mark);
                true
            }
            _ => false,
        }
    }

    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|cell| cell.value.is_none())
            .map(|cell| cell.index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.value.is_some())
    }

    /// Row-major occupancy snapshot.
    pub fn flatten(&self) -> Vec<Option<Mark>> {
        self.cells.iter().map(|cell| cell.value).collect()
    }

    /// Canonical key of this position for the statistics store.
    pub fn stats_key(&self) -> String {
        board_key(&self.flatten())
    }
}

/// Key of an occupancy sequence: the marks in order, with a space for every
/// empty cell.
pub fn board_key(cells: &[Option<Mark>]) -> String {
    cells.iter().map(|v| v.map_or(' ', Mark::as_char)).collect()
}
