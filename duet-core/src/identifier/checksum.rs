//! Check digit over a decimal string (EAN-13 / UPC-A weighting)

use crate::error::IdentifierError;

/// Compute the check digit of `digits`.
///
/// Positions are counted from the left starting at 1 and walked from the
/// last one back to the first. Even positions weigh 3, odd positions weigh
/// 1. The weight follows the left-counted position, so strings of odd and
/// even length weigh their final digit differently.
pub fn checksum_digit(digits: &str) -> Result<u8, IdentifierError> {
    if digits.is_empty() {
        return Err(IdentifierError::Empty);
    }

    let chars: Vec<char> = digits.chars().collect();
    let mut sum: u32 = 0;
    for position in (1..=chars.len()).rev() {
        let found = chars[position - 1];
        let digit = found
            .to_digit(10)
            .ok_or(IdentifierError::InvalidDigit { position, found })?;
        sum += if position % 2 == 0 { digit * 3 } else { digit };
    }

    // sum % 10 is below 10, so the cast cannot truncate
    Ok(((10 - sum % 10) % 10) as u8)
}
