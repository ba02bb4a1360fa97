//! Small formatting helpers shared by the CLI and header checks.

/// Join items the way they read in an English sentence.
///
/// ```rust
/// use simport_cli::utils::join_human;
///
/// assert_eq!(join_human(&["Weight"]), "Weight");
/// assert_eq!(join_human(&["Weight", "Height"]), "Weight and Height");
/// assert_eq!(join_human(&["Weight", "Height", "Age"]), "Weight, Height, and Age");
/// ```
pub fn join_human<S: AsRef<str>>(items: &[S]) -> String {
    let mut result = String::new();
    for (i, item) in items.iter().enumerate() {
        if items.len() == 2 && i == 1 {
            result.push_str(" and ");
        } else if items.len() > 2 && i == items.len() - 1 {
            result.push_str(", and ");
        } else if i != 0 {
            result.push_str(", ");
        }
        result.push_str(item.as_ref());
    }
    result
}
