//! Attribute projection with include/ignore lists

use graphsync_core::{AttrValue, Attributes};
use serde::{Deserialize, Serialize};

/// Compute the attributes that propagate from a source element.
///
/// A non-empty `include` is an exclusive allow-list and wins over `ignore`:
/// every included name is present in the result, set to `null` when the
/// source lacks it. With an empty `include`, the result is the whole source
/// mapping minus the `ignore` names.
pub fn project(source: &Attributes, include: &[String], ignore: &[String]) -> Attributes {
    if !include.is_empty() {
        return include
            .iter()
            .map(|name| {
                let value = source.get(name).cloned().unwrap_or(AttrValue::Null);
                (name.clone(), value)
            })
            .collect();
    }

    source
        .iter()
        .filter(|(name, _)| !ignore.contains(*name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// An include/ignore pair applied to one kind of attribute mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl AttributeFilter {
    pub fn new<I, G, S, T>(include: I, ignore: G) -> Self
    where
        I: IntoIterator<Item = S>,
        G: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        AttributeFilter {
            include: include.into_iter().map(Into::into).collect(),
            ignore: ignore.into_iter().map(Into::into).collect(),
        }
    }

    pub fn project(&self, source: &Attributes) -> Attributes {
        project(source, &self.include, &self.ignore)
    }

    /// True when the filter copies attributes through unchanged.
    pub fn is_passthrough(&self) -> bool {
        self.include.is_empty() && self.ignore.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphsync_core::attrs;
    use serde_json::json;
    use std::collections::HashSet;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn source() -> Attributes {
        attrs([
            ("color", json!("red")),
            ("size", json!(5)),
            ("label", json!("a")),
        ])
    }

    #[test]
    fn include_is_exclusive() {
        let projected = project(&source(), &names(&["color"]), &[]);
        assert_eq!(projected, attrs([("color", json!("red"))]));
    }

    #[test]
    fn include_overrides_ignore() {
        let projected = project(&source(), &names(&["color", "size"]), &names(&["color"]));

        let keys: HashSet<_> = projected.keys().cloned().collect();
        assert_eq!(keys, HashSet::from(["color".to_string(), "size".to_string()]));
        assert_eq!(projected["color"], json!("red"));
    }

    #[test]
    fn include_keeps_missing_names_as_null() {
        let projected = project(&source(), &names(&["color", "weight"]), &[]);

        assert_eq!(projected.len(), 2);
        assert_eq!(projected["weight"], AttrValue::Null);
    }

    #[test]
    fn ignore_removes_names_from_full_copy() {
        let projected = project(&source(), &[], &names(&["size", "missing"]));
        assert_eq!(
            projected,
            attrs([("color", json!("red")), ("label", json!("a"))])
        );
    }

    #[test]
    fn empty_lists_copy_everything() {
        assert_eq!(project(&source(), &[], &[]), source());
        assert!(AttributeFilter::default().is_passthrough());
    }

    #[test]
    fn filter_delegates_to_project() {
        let filter = AttributeFilter::new(["label"], ["label"]);
        assert_eq!(filter.project(&source()), attrs([("label", json!("a"))]));
    }
}
