// src/item.rs
//! Documentable item records shared by every pipeline stage.

use crate::lang::DocKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Prefix of the textual form of an [`ItemId`].
pub const ID_PREFIX: &str = "doc_";

/// Run-scoped item identifier, rendered as `doc_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u32);

impl ItemId {
    /// The placeholder line standing in for this item's documentation.
    #[must_use]
    pub fn marker(self) -> String {
        format!("{{{{{self}}}}}")
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(ID_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(Self)
            .ok_or_else(|| format!("invalid item id: {s}"))
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Generated documentation keyed by item id. Missing keys mean no doc.
pub type DocMap = BTreeMap<ItemId, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSpan {
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub pass_by_reference: bool,
    pub variadic: bool,
    pub has_default: bool,
    /// Verbatim default expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub kind: DocKind,
    pub name: Option<String>,
    pub qualified_name: Option<String>,
    pub existing_doc: Option<String>,
    pub doc_span: Option<DocSpan>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub line: usize,
    pub end_line: Option<usize>,
}

impl Item {
    /// Best display name: qualified, then short, then the kind.
    #[must_use]
    pub fn label(&self) -> &str {
        self.qualified_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(self.kind.as_str())
    }
}

/// The part of an [`Item`] the placeholder injector needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPosition {
    pub id: ItemId,
    pub line: usize,
    pub doc_span: Option<DocSpan>,
}

impl From<&Item> for ItemPosition {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            line: item.line,
            doc_span: item.doc_span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_text_forms() {
        let id = ItemId(7);
        assert_eq!(id.to_string(), "doc_7");
        assert_eq!(id.marker(), "{{doc_7}}");
        assert_eq!("doc_7".parse::<ItemId>(), Ok(id));
        assert!("doc_x".parse::<ItemId>().is_err());
        assert!("7".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_doc_map_keys_serialize_as_strings() {
        let mut map = DocMap::new();
        map.insert(ItemId(2), "b".into());
        map.insert(ItemId(10), "c".into());
        let json = serde_json::to_string(&map).unwrap_or_default();
        assert_eq!(json, r#"{"doc_2":"b","doc_10":"c"}"#);

        let back: DocMap = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back, map);
    }
}
