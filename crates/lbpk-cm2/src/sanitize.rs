//! Track name sanitizing for output file names.

/// Keep letters, digits and underscores, then uppercase what is left.
///
/// No length limit is applied. An empty result is possible and left for the
/// caller to reject.
///
/// ```
/// use lbpk_cm2::sanitize_track_name;
///
/// assert_eq!(sanitize_track_name("My Track! #1"), "MYTRACK1");
/// ```
pub fn sanitize_track_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_uppercase)
        .collect()
}
