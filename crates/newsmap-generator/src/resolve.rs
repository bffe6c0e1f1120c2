//! Attribute resolution.
//!
//! A feed reads every entry field through [`Accessors::resolve`], which tries, in
//! order: an accessor registered on the feed for that field, an attribute of the
//! same name on the item, and finally the caller's default. Missing attributes
//! never fail; they resolve to the default.

use std::{collections::HashMap, fmt};

use newsmap_core::{AttrValue, ContentItem};
use tracing::{debug, trace};

/// Accessor function computing a field value from an item.
pub type AccessorFn<T> = dyn Fn(&T) -> Option<AttrValue> + Send + Sync;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFrom {
    /// An accessor registered on the feed.
    Accessor,
    /// An attribute of the same name on the item.
    Item,
    /// The caller-supplied default.
    Default,
}

/// A resolved field value together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Option<AttrValue>,
    pub from: ResolvedFrom,
}

/// Table of per-field accessors for items of type `T`.
pub struct Accessors<T> {
    table: HashMap<String, Box<AccessorFn<T>>>,
}

impl<T> Default for Accessors<T> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<T> fmt::Debug for Accessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self.table.keys().collect();
        fields.sort();
        f.debug_struct("Accessors").field("fields", &fields).finish()
    }
}

impl<T: ContentItem> Accessors<T> {
    /// Create an empty accessor table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accessor for `field`, replacing any previous one.
    pub fn insert<F>(&mut self, field: impl Into<String>, accessor: F)
    where
        F: Fn(&T) -> Option<AttrValue> + Send + Sync + 'static,
    {
        self.table.insert(field.into(), Box::new(accessor));
    }

    /// Whether an accessor is registered for `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.table.contains_key(field)
    }

    /// Resolve `field` for `item`, returning `default` when nothing supplies it.
    pub fn resolve(&self, field: &str, item: &T, default: Option<AttrValue>) -> Option<AttrValue> {
        self.resolve_with(field, item, |_| default).value
    }

    /// Resolve `field` for `item`, computing the default lazily from the item.
    pub fn resolve_with<D>(&self, field: &str, item: &T, default: D) -> Resolution
    where
        D: FnOnce(&T) -> Option<AttrValue>,
    {
        if let Some(accessor) = self.table.get(field) {
            trace!(field, "resolved through accessor");
            return Resolution {
                value: accessor(item),
                from: ResolvedFrom::Accessor,
            };
        }

        if let Some(value) = item.attribute(field) {
            trace!(field, "resolved from item attribute");
            return Resolution {
                value: Some(value),
                from: ResolvedFrom::Item,
            };
        }

        let value = default(item);
        debug!(field, has_value = value.is_some(), "attribute fell back to default");
        Resolution {
            value,
            from: ResolvedFrom::Default,
        }
    }
}

/// First attribute among `names` the item exposes.
pub fn first_present<T: ContentItem>(item: &T, names: &[&str]) -> Option<AttrValue> {
    names.iter().find_map(|name| item.attribute(name))
}
