//! Unique identifiers so concurrently running tests never share players.

use ulid::Ulid;

/// Player id shaped like the browser's: `player_<unique>`.
///
/// ```
/// use backend_test_support::ids::unique_player_id;
///
/// let a = unique_player_id();
/// let b = unique_player_id();
/// assert_ne!(a, b);
/// assert!(a.starts_with("player_"));
/// ```
pub fn unique_player_id() -> String {
    format!("player_{}", Ulid::new().to_string().to_lowercase())
}

/// `{prefix}-{ulid}`, for names and other free-form strings.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
