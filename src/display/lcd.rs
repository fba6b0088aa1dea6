/// A character display addressed by cell, like an HD44780 module.
pub trait CharDisplay {
    fn clear(&mut self);
    /// Move the write cursor to `col`, `row`.
    fn position(&mut self, col: usize, row: usize);
    /// Write at the cursor, advancing it. Anything past the end of the row is dropped.
    fn write(&mut self, text: &str);
}

/// In-memory character grid. Mirrors what a physical module would show.
#[derive(Debug, Clone)]
pub struct LcdBuffer {
    cells: Vec<Vec<char>>,
    col: usize,
    row: usize,
}

impl LcdBuffer {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![' '; columns]; rows],
            col: 0,
            row: 0,
        }
    }

    #[cfg(test)]
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|cells| cells.iter().collect())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.rows()).map(|row| self.row_text(row)).collect()
    }
}

impl CharDisplay for LcdBuffer {
    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
        self.col = 0;
        self.row = 0;
    }

    fn position(&mut self, col: usize, row: usize) {
        self.col = col;
        self.row = row;
    }

    fn write(&mut self, text: &str) {
        let Some(cells) = self.cells.get_mut(self.row) else {
            return;
        };
        for ch in text.chars() {
            if let Some(cell) = cells.get_mut(self.col) {
                *cell = ch;
            }
            self.col += 1;
        }
    }
}
