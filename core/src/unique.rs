//! Cross-element uniqueness.

use std::collections::HashMap;

use crate::ValidationError;
use crate::catalog::CatalogEntry;

/// Rejects the second occurrence of any single-instance element type.
///
/// Entries are scanned in document order and compared by type name; only
/// the first duplicate is reported. Types whose entry allows multiple
/// instances are counted but never rejected.
///
/// # Errors
///
/// Returns [`ValidationError::DuplicateElementType`] naming the repeated type.
pub fn enforce_unique<'a, I>(entries: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let count = counts.entry(entry.name()).or_insert(0);
        *count += 1;
        if *count > 1 && !entry.multiple {
            return Err(ValidationError::DuplicateElementType(
                entry.name().to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    fn entry(name: &str) -> &'static CatalogEntry {
        catalog().get(name).unwrap()
    }

    #[test]
    fn test_distinct_types_pass() {
        let entries = [
            entry("issue-link"),
            entry("issue-media"),
            entry("stacktrace-link"),
        ];
        assert!(enforce_unique(entries).is_ok());
    }

    #[test]
    fn test_first_duplicate_is_reported() {
        let entries = [
            entry("stacktrace-link"),
            entry("issue-link"),
            entry("issue-link"),
            entry("stacktrace-link"),
        ];
        assert_eq!(
            enforce_unique(entries).unwrap_err(),
            ValidationError::DuplicateElementType("issue-link".to_string())
        );
    }

    #[test]
    fn test_multi_instance_types_may_repeat() {
        let repeatable = CatalogEntry {
            multiple: true,
            ..*entry("issue-media")
        };
        assert!(enforce_unique([&repeatable, &repeatable, &repeatable]).is_ok());
    }
}
