// crates/tailorfind-core/src/traits.rs
use crate::error::Result;
use crate::model::{LocationSnapshot, ProviderRecord};
use crate::text::fold_key;
use async_trait::async_trait;

/// Name matching for types that expose a canonical display name.
///
/// Comparison is case-insensitive via [`fold_key`]. Implementors provide a
/// `&str` view of their name via [`NameMatch::name_str`].
///
/// # Examples
/// ```rust
/// use tailorfind_core::text::normalize_query;
/// use tailorfind_core::traits::NameMatch;
///
/// struct Shop(&'static str);
/// impl NameMatch for Shop {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Shop("Zürich Änderungen").name_contains(&normalize_query(" ZÜRI")));
/// assert!(!Shop("Zürich Änderungen").name_contains("zuri"));
/// assert!(Shop("Ace Tailors").name_contains(""));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Contiguous substring test of an already-normalized query (see
    /// [`crate::text::normalize_query`]) on the folded name. An empty query
    /// matches.
    #[inline]
    fn name_contains(&self, normalized_query: &str) -> bool {
        normalized_query.is_empty() || fold_key(self.name_str()).contains(normalized_query)
    }
}

impl NameMatch for ProviderRecord {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Remote collaborator that delivers the full tailor collection.
///
/// Called once per screen activation; no pagination, no incremental sync.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<ProviderRecord>>;
}

/// Outcome of the platform permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Device location collaborator: a permission prompt and a one-shot fix.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> Permission;

    /// Only called after [`Permission::Granted`].
    async fn current_fix(&self) -> Result<LocationSnapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize_query;

    #[test]
    fn records_match_on_folded_name() {
        let r = ProviderRecord::new("1", "Åsa's Schneiderei");
        assert!(r.name_contains(&normalize_query("åsa")));
        assert!(r.name_contains(&normalize_query(" SCHNEID ")));
        assert!(!r.name_contains("asa"));
        assert!(!r.name_contains(&normalize_query("åsa schneiderei")));
    }

    #[test]
    fn contiguous_substring_only() {
        let r = ProviderRecord::new("1", "Ace Tailors");
        assert!(r.name_contains("ce ta"));
        assert!(!r.name_contains("ace  tailors"));
        assert!(!r.name_contains("tailors ace"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(ProviderRecord::new("1", "Bee Stitch").name_contains(""));
        assert!(ProviderRecord::new("2", "").name_contains(""));
    }
}
