//! Telephony BCD digit packing (3GPP TS 24.008 style)
//!
//! Two decimal digits are packed per octet, the earlier digit in the low
//! nibble and the later digit in the high nibble. An odd digit count leaves
//! the final high nibble at zero; callers that need the `0xF` filler spell it
//! out as a trailing `f`.
//!
//! # Example
//!
//! ```rust
//! use gnbsim_common::bcd;
//!
//! assert_eq!(bcd::encode("12345").unwrap(), vec![0x21, 0x43, 0x05]);
//! assert_eq!(bcd::encode("12345f").unwrap(), vec![0x21, 0x43, 0xF5]);
//! assert_eq!(bcd::decode(&[0x21, 0x43, 0xF5]).unwrap(), "12345");
//! assert_eq!(bcd::decode_digits(&[0x21, 0x43, 0x05], 5).unwrap(), "12345");
//! ```

use thiserror::Error;

/// Filler nibble, written only where the input spells out `f`.
pub const FILLER: u8 = 0x0F;

/// Errors raised while packing or unpacking BCD digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BcdError {
    /// Input character is neither a decimal digit nor the filler `f`.
    #[error("Invalid BCD digit {digit:?} at position {position}")]
    InvalidDigit {
        /// The offending character
        digit: char,
        /// Character index in the input
        position: usize,
    },
    /// Packed nibble is not a decimal digit, or is a filler before the end.
    #[error("Invalid BCD nibble 0x{nibble:X} in octet {position}")]
    InvalidNibble {
        /// The offending nibble value
        nibble: u8,
        /// Octet index in the input
        position: usize,
    },
    /// Octet count does not fit the requested digit count.
    #[error("{octets} BCD octets cannot hold exactly {digits} digits")]
    DigitCountMismatch {
        /// Requested digit count
        digits: usize,
        /// Octets supplied
        octets: usize,
    },
}

fn digit_to_nibble(position: usize, digit: char) -> Result<u8, BcdError> {
    match digit {
        '0'..='9' => Ok(digit as u8 - b'0'),
        // An explicit filler lets callers spell out layouts such as "123f45".
        'f' | 'F' => Ok(FILLER),
        _ => Err(BcdError::InvalidDigit { digit, position }),
    }
}

fn nibble_to_digit(position: usize, nibble: u8) -> Result<char, BcdError> {
    if nibble <= 9 {
        Ok(char::from(b'0' + nibble))
    } else {
        Err(BcdError::InvalidNibble { nibble, position })
    }
}

/// Packs a digit string into BCD octets.
///
/// The output is `ceil(len / 2)` octets long. An odd digit count leaves the
/// final high nibble at zero. An empty string packs to an empty vector.
pub fn encode(digits: &str) -> Result<Vec<u8>, BcdError> {
    let mut nibbles = digits
        .chars()
        .enumerate()
        .map(|(position, digit)| digit_to_nibble(position, digit));

    let mut octets = Vec::with_capacity(digits.len().div_ceil(2));
    while let Some(low) = nibbles.next() {
        let low = low?;
        let high = nibbles.next().transpose()?.unwrap_or(0);
        octets.push((high << 4) | low);
    }
    Ok(octets)
}

/// Unpacks BCD octets into a digit string.
///
/// Every nibble is a digit, except that a filler in the final high nibble is
/// dropped. A filler anywhere else is rejected. A zero high nibble left by an
/// odd-length [`encode`] is indistinguishable from a trailing `0` digit and
/// comes back as one; use [`decode_digits`] when the digit count is known.
pub fn decode(octets: &[u8]) -> Result<String, BcdError> {
    let mut digits = String::with_capacity(octets.len() * 2);
    let last = octets.len().saturating_sub(1);

    for (position, &octet) in octets.iter().enumerate() {
        digits.push(nibble_to_digit(position, octet & 0x0F)?);

        let high = octet >> 4;
        if high == FILLER && position == last {
            break;
        }
        digits.push(nibble_to_digit(position, high)?);
    }
    Ok(digits)
}

/// Unpacks exactly `count` digits.
///
/// `octets` must be `ceil(count / 2)` long. For an odd count the final high
/// nibble is padding and must be `0` or the filler.
pub fn decode_digits(octets: &[u8], count: usize) -> Result<String, BcdError> {
    if octets.len() != count.div_ceil(2) {
        return Err(BcdError::DigitCountMismatch {
            digits: count,
            octets: octets.len(),
        });
    }
    if count % 2 == 1 {
        let last = octets.len() - 1;
        let padding = octets[last] >> 4;
        if padding != 0 && padding != FILLER {
            return Err(BcdError::InvalidNibble {
                nibble: padding,
                position: last,
            });
        }
    }

    let mut digits = String::with_capacity(count);
    for (position, &octet) in octets.iter().enumerate() {
        digits.push(nibble_to_digit(position, octet & 0x0F)?);
        if digits.len() < count {
            digits.push(nibble_to_digit(position, octet >> 4)?);
        }
    }
    Ok(digits)
}
