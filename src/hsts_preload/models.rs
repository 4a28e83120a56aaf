//! HSTS preload data models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::PINNED_DOMAIN_MODE;

/// Top level of the Chromium feed. Only `entries` is used; `pinsets` and
/// anything else upstream adds are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct PreloadFeed {
    pub entries: Vec<FeedEntry>,
}

/// One domain record as it appears in the feed.
#[derive(Debug, Deserialize)]
pub(crate) struct FeedEntry {
    pub name: String,
    #[serde(default)]
    pub include_subdomains: bool,
    #[serde(default)]
    pub include_subdomains_for_pinning: bool,
    #[serde(default)]
    pub mode: Option<String>,
    /// Name of the pinset; upstream uses a string, anything non-empty counts
    #[serde(default)]
    pub pins: Option<serde_json::Value>,
}

impl FeedEntry {
    fn has_pins(&self) -> bool {
        match &self.pins {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => false,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Array(a)) => !a.is_empty(),
            Some(serde_json::Value::Object(o)) => !o.is_empty(),
            Some(_) => true,
        }
    }
}

/// Normalized preload policy for one domain.
///
/// Field order is alphabetical by serialized key, so the written file has
/// sorted keys at every level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HstsPreloadEntry {
    /// HSTS applies to subdomains
    #[serde(rename = "includeSubDomains")]
    pub include_subdomains: bool,

    /// Pinning applies to subdomains (implied by `include_subdomains`)
    #[serde(rename = "includeSubDomainsForPinning")]
    pub include_subdomains_for_pinning: bool,

    /// Upstream mode, usually `force-https`; `null` when the feed has none
    pub mode: Option<String>,

    /// Domain has a public-key pinset
    pub pinned: bool,
}

impl HstsPreloadEntry {
    /// Entry forced for a manually pinned domain.
    pub fn manually_pinned() -> Self {
        Self {
            include_subdomains: true,
            include_subdomains_for_pinning: true,
            mode: Some(PINNED_DOMAIN_MODE.to_string()),
            pinned: true,
        }
    }
}

impl From<&FeedEntry> for HstsPreloadEntry {
    fn from(entry: &FeedEntry) -> Self {
        Self {
            include_subdomains: entry.include_subdomains,
            include_subdomains_for_pinning: entry.include_subdomains
                || entry.include_subdomains_for_pinning,
            mode: entry.mode.clone(),
            pinned: entry.has_pins(),
        }
    }
}

/// Domain name to preload policy, ordered by domain.
///
/// Domain names are kept exactly as the feed spells them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HstsPreloadDataset(BTreeMap<String, HstsPreloadEntry>);

impl HstsPreloadDataset {
    /// Normalizes every feed entry. A name repeated in the feed keeps its
    /// last record.
    pub(crate) fn from_feed(feed: &PreloadFeed) -> Self {
        let entries = feed
            .entries
            .iter()
            .map(|entry| (entry.name.clone(), HstsPreloadEntry::from(entry)))
            .collect();
        Self(entries)
    }

    /// Adds a manually pinned domain, replacing any feed record for it.
    pub fn insert_pinned(&mut self, domain: &str) {
        self.0
            .insert(domain.to_string(), HstsPreloadEntry::manually_pinned());
    }

    /// Looks up a domain by exact name.
    pub fn get(&self, domain: &str) -> Option<&HstsPreloadEntry> {
        self.0.get(domain)
    }

    /// Number of domains.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the dataset has no domains.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates domains in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HstsPreloadEntry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(json: &str) -> FeedEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_feed_entry_defaults() {
        let normalized = HstsPreloadEntry::from(&entry(r#"{"name": "example.com"}"#));
        assert_eq!(
            normalized,
            HstsPreloadEntry {
                include_subdomains: false,
                include_subdomains_for_pinning: false,
                mode: None,
                pinned: false,
            }
        );
    }

    #[test]
    fn test_include_subdomains_implies_pinning_scope() {
        let normalized = HstsPreloadEntry::from(&entry(
            r#"{"name": "example.com", "include_subdomains": true}"#,
        ));
        assert!(normalized.include_subdomains);
        assert!(normalized.include_subdomains_for_pinning);
    }

    #[test]
    fn test_pinning_scope_alone() {
        let normalized = HstsPreloadEntry::from(&entry(
            r#"{"name": "example.com", "include_subdomains_for_pinning": true}"#,
        ));
        assert!(!normalized.include_subdomains);
        assert!(normalized.include_subdomains_for_pinning);
    }

    #[test]
    fn test_pins_must_be_non_empty() {
        assert!(HstsPreloadEntry::from(&entry(r#"{"name": "a", "pins": "google"}"#)).pinned);
        assert!(!HstsPreloadEntry::from(&entry(r#"{"name": "a", "pins": ""}"#)).pinned);
        assert!(!HstsPreloadEntry::from(&entry(r#"{"name": "a", "pins": null}"#)).pinned);
        assert!(!HstsPreloadEntry::from(&entry(r#"{"name": "a", "pins": []}"#)).pinned);
        assert!(HstsPreloadEntry::from(&entry(r#"{"name": "a", "pins": ["x"]}"#)).pinned);
    }

    #[test]
    fn test_mode_is_carried_over() {
        let normalized = HstsPreloadEntry::from(&entry(
            r#"{"name": "a", "mode": "force-https", "policy": "google"}"#,
        ));
        assert_eq!(normalized.mode.as_deref(), Some("force-https"));
    }

    #[test]
    fn test_entry_without_name_is_rejected() {
        assert!(serde_json::from_str::<FeedEntry>(r#"{"mode": "force-https"}"#).is_err());
    }

    #[test]
    fn test_duplicate_feed_names_last_wins() {
        let feed: PreloadFeed = serde_json::from_str(
            r#"{"entries": [
                {"name": "dup.example", "mode": "first"},
                {"name": "dup.example", "mode": "second"}
            ]}"#,
        )
        .unwrap();
        let dataset = HstsPreloadDataset::from_feed(&feed);
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.get("dup.example").unwrap().mode.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_insert_pinned_overrides_feed_entry() {
        let feed: PreloadFeed = serde_json::from_str(
            r#"{"entries": [{"name": "pinned.example", "mode": "other"}]}"#,
        )
        .unwrap();
        let mut dataset = HstsPreloadDataset::from_feed(&feed);
        dataset.insert_pinned("pinned.example");
        assert_eq!(
            dataset.get("pinned.example"),
            Some(&HstsPreloadEntry::manually_pinned())
        );
    }

    #[test]
    fn test_iter_is_sorted() {
        let feed: PreloadFeed = serde_json::from_str(
            r#"{"entries": [{"name": "b.example"}, {"name": "a.example"}, {"name": "C.example"}]}"#,
        )
        .unwrap();
        let dataset = HstsPreloadDataset::from_feed(&feed);
        let names: Vec<&str> = dataset.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["C.example", "a.example", "b.example"]);
    }

    #[test]
    fn test_entry_serializes_with_sorted_camel_case_keys() {
        let json = serde_json::to_string(&HstsPreloadEntry {
            include_subdomains: false,
            include_subdomains_for_pinning: false,
            mode: None,
            pinned: false,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"includeSubDomains":false,"includeSubDomainsForPinning":false,"mode":null,"pinned":false}"#
        );
    }
}
