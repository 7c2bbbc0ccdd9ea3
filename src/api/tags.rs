//! Cache tags: queries provide them, mutations invalidate them.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Category,
    Product,
    ProductTemplate,
    FilterGroup,
    Publication,
    Order,
    OrderEvent,
    Preorder,
    User,
    CdekWaybill,
    Metrics,
    Faq,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagId {
    List,
    Id(String),
}

/// `(kind, id)`. Without an id the tag only makes sense for invalidation,
/// where it matches every tag of the same kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Tag {
    pub kind: TagKind,
    pub id: Option<TagId>,
}

impl Tag {
    pub fn all(kind: TagKind) -> Self {
        Self { kind, id: None }
    }

    pub fn list(kind: TagKind) -> Self {
        Self { kind, id: Some(TagId::List) }
    }

    pub fn id(kind: TagKind, id: impl fmt::Display) -> Self {
        Self { kind, id: Some(TagId::Id(id.to_string())) }
    }

    /// Whether invalidating `self` evicts an entry that provided `provided`.
    pub fn matches(&self, provided: &Tag) -> bool {
        self.kind == provided.kind && (self.id.is_none() || self.id == provided.id)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            None => write!(f, "{:?}", self.kind),
            Some(TagId::List) => write!(f, "{:?}:LIST", self.kind),
            Some(TagId::Id(id)) => write!(f, "{:?}:{}", self.kind, id),
        }
    }
}

/// Tags for a list result: the list itself plus every row in it.
pub fn list_tags<'a>(kind: TagKind, ids: impl IntoIterator<Item = &'a Uuid>) -> Vec<Tag> {
    std::iter::once(Tag::list(kind))
        .chain(ids.into_iter().map(|id| Tag::id(kind, id)))
        .collect()
}

/// Tags a create/update/delete of one entity invalidates.
pub fn entity_tags(kind: TagKind, id: impl fmt::Display) -> Vec<Tag> {
    vec![Tag::list(kind), Tag::id(kind, id)]
}
