//! List items.

use std::fmt;

use domlet::Element;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse the id back from a rendered element id.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque renderable with a stable identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    id: ItemId,
    content: Element,
}

impl ListItem {
    pub fn new(content: Element) -> Self {
        Self {
            id: ItemId::new(),
            content,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn content(&self) -> &Element {
        &self.content
    }
}

impl From<Element> for ListItem {
    fn from(content: Element) -> Self {
        Self::new(content)
    }
}
