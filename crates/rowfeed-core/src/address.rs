//! Column letter helpers

use crate::error::{Error, Result};
use crate::MAX_COLS;

/// Convert column letters to a 0-based index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are case-insensitive.
///
/// # Examples
/// ```
/// use rowfeed_core::letters_to_column;
///
/// assert_eq!(letters_to_column("C").unwrap(), 2);
/// assert_eq!(letters_to_column("aa").unwrap(), 26);
/// ```
pub fn letters_to_column(letters: &str) -> Result<u16> {
    if letters.is_empty() {
        return Err(Error::InvalidColumn("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumn(format!(
                "invalid column letter '{}' in '{}'",
                c, letters
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if col > MAX_COLS as u32 {
            return Err(Error::ColumnOutOfBounds(col - 1, MAX_COLS - 1));
        }
    }

    Ok((col - 1) as u16)
}
