//! Virtual character LCD for testing and emulation.
//!
//! [`VirtualLcd`] keeps an in-memory grid of characters and a cursor, and
//! applies [`CharacterDisplay`] calls the way an HD44780-style module does:
//! `clear` blanks the grid and homes the cursor, `print` writes from the
//! cursor and advances it, and text past the last column is dropped.
//!
//! # Character Encoding - ASCII Only
//!
//! The character ROM of these modules only covers printable ASCII. Control
//! characters are removed and any non-ASCII character is shown as `?`, so
//! that text which would garble a real module is visible in tests.
//!
//! # Examples
//!
//! ```
//! use gatekeeper_hardware::mock::VirtualLcd;
//! use gatekeeper_hardware::traits::CharacterDisplay;
//!
//! let mut lcd = VirtualLcd::new(16, 2);
//! lcd.print("RFID SYSTEM");
//! lcd.set_cursor(0, 1);
//! lcd.print("Hi ..");
//!
//! assert_eq!(lcd.line(0).unwrap().trim_end(), "RFID SYSTEM");
//! assert_eq!(lcd.lines_trimmed(), vec!["RFID SYSTEM", "Hi .."]);
//! ```

use gatekeeper_core::constants::{DISPLAY_COLUMNS, DISPLAY_ROWS};

use crate::traits::CharacterDisplay;

/// In-memory character display.
#[derive(Debug, Clone)]
pub struct VirtualLcd {
    /// Number of columns per line.
    columns: u8,

    /// Number of lines.
    rows: u8,

    /// Character grid, one vector per row.
    buffer: Vec<Vec<char>>,

    /// Cursor position (column, row).
    cursor: (u8, u8),

    /// Number of `clear()` calls, i.e. full redraws.
    clears: usize,
}

impl VirtualLcd {
    /// Create a blank display with the given geometry.
    pub fn new(columns: u8, rows: u8) -> Self {
        Self {
            columns,
            rows,
            buffer: vec![vec![' '; columns as usize]; rows as usize],
            cursor: (0, 0),
            clears: 0,
        }
    }

    /// Text of `row`, padded to the display width.
    pub fn line(&self, row: u8) -> Option<String> {
        self.buffer
            .get(row as usize)
            .map(|cells| cells.iter().collect())
    }

    /// All rows with trailing padding removed.
    pub fn lines_trimmed(&self) -> Vec<String> {
        self.buffer
            .iter()
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    /// Current cursor position as (column, row).
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Number of times the display was cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Render the display as a framed text panel.
    ///
    /// ```text
    /// +----------------+
    /// |RFID SYSTEM     |
    /// |Hi ..           |
    /// +----------------+
    /// ```
    pub fn frame(&self) -> String {
        let border = format!("+{}+", "-".repeat(self.columns as usize));
        let mut out = border.clone();
        for cells in &self.buffer {
            out.push('\n');
            out.push('|');
            out.extend(cells.iter());
            out.push('|');
        }
        out.push('\n');
        out.push_str(&border);
        out
    }
}

impl Default for VirtualLcd {
    fn default() -> Self {
        Self::new(DISPLAY_COLUMNS, DISPLAY_ROWS)
    }
}

impl CharacterDisplay for VirtualLcd {
    fn clear(&mut self) {
        for cells in &mut self.buffer {
            cells.fill(' ');
        }
        self.cursor = (0, 0);
        self.clears += 1;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let last_row = self.rows.saturating_sub(1);
        self.cursor = (col.min(self.columns), row.min(last_row));
    }

    fn print(&mut self, text: &str) {
        let (mut col, row) = self.cursor;
        let Some(cells) = self.buffer.get_mut(row as usize) else {
            return;
        };

        for c in sanitize_text(text).chars() {
            if let Some(cell) = cells.get_mut(col as usize) {
                *cell = c;
            }
            col = col.saturating_add(1).min(self.columns);
        }

        self.cursor = (col, row);
    }
}

/// Remove control characters and replace non-ASCII characters with `?`.
///
/// # Examples
///
/// ```
/// use gatekeeper_hardware::mock::display::sanitize_text;
///
/// assert_eq!(sanitize_text("CARD\tOK\n"), "CARDOK");
/// assert_eq!(sanitize_text("Liberação"), "Libera??o");
/// ```
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}
