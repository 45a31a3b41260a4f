//! Classroom join codes: six decimal digits, never starting with zero.

use rand::Rng;

pub const CODE_LEN: usize = 6;

/// Generate a random join code in `100000..=999999`.
///
/// ```
/// use classroom_server::utils::join_code::{generate_join_code, is_valid_join_code};
///
/// let code = generate_join_code();
/// assert!(is_valid_join_code(&code));
/// ```
pub fn generate_join_code() -> String {
    rand::rng().random_range(100_000..=999_999u32).to_string()
}

/// Exactly six ASCII digits.
pub fn is_valid_join_code(code: &str) -> bool {
    code.len() == CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}
