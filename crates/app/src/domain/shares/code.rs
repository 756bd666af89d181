//! Share code generation and normalization.

use mockall::automock;
use rand::{RngCore, rngs::OsRng};

/// Length of a generated share code.
pub const SHARE_CODE_LEN: usize = 8;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Source of candidate share codes.
#[automock]
pub trait CodeSource: Send + Sync {
    /// A fresh candidate code, uppercase, [`SHARE_CODE_LEN`] characters.
    fn candidate(&self) -> String;
}

/// Candidate codes drawn from the operating system's random source.
#[derive(Debug, Clone, Default)]
pub struct OsRngCodes;

impl CodeSource for OsRngCodes {
    fn candidate(&self) -> String {
        let mut bytes = [0_u8; SHARE_CODE_LEN / 2];

        OsRng.fill_bytes(&mut bytes);

        let mut code = String::with_capacity(SHARE_CODE_LEN);

        for byte in bytes {
            code.push(HEX_UPPER[(byte >> 4) as usize] as char);
            code.push(HEX_UPPER[(byte & 0x0f) as usize] as char);
        }

        code
    }
}

/// Normalizes a user-entered code: strips whitespace, uppercases.
///
/// Applied on both write and read so lookup is case-insensitive.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
