//! Order validation against a row store snapshot.

use std::collections::HashMap;

use qmap_model::{RowKey, RowStore};
use tracing::debug;

use crate::order::{OrderError, OrderPath};

/// Checks proposed order values against the orders already in a store.
///
/// Duplicate and parent checks look only at records other than the one being
/// edited, so a record can always keep the order it already has. A preceding
/// sibling may be held by any record, the edited one included.
#[derive(Debug)]
pub struct OrderValidator<'a> {
    by_path: HashMap<OrderPath, Vec<&'a RowKey>>,
    unparsed: Vec<(&'a str, &'a RowKey)>,
}

impl<'a> OrderValidator<'a> {
    pub fn new(store: &'a RowStore) -> Self {
        let mut by_path: HashMap<OrderPath, Vec<&'a RowKey>> = HashMap::new();
        let mut unparsed = Vec::new();
        for (key, order) in store.orders() {
            match OrderPath::parse(order) {
                Ok(path) => by_path.entry(path).or_default().push(key),
                Err(_) => unparsed.push((order, key)),
            }
        }
        Self { by_path, unparsed }
    }

    /// Cheap check used while the user is still typing.
    ///
    /// True when another record already holds `value`. Blank values never
    /// collide.
    pub fn is_duplicate(&self, value: &str, current: &RowKey) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }
        match OrderPath::parse(trimmed) {
            Ok(path) => self.holder(&path, current).is_some(),
            Err(_) => self
                .unparsed
                .iter()
                .any(|(order, key)| *order == trimmed && *key != current),
        }
    }

    /// Full check run before an order is committed.
    ///
    /// Checks, in order: grammar, uniqueness, ancestors, preceding siblings.
    pub fn validate(&self, value: &str, current: &RowKey) -> Result<OrderPath, OrderError> {
        let trimmed = value.trim();
        let path = OrderPath::parse(trimmed)?;

        if let Some(holder) = self.holder(&path, current) {
            return Err(OrderError::DuplicateOrder {
                value: trimmed.to_string(),
                holder: holder.clone(),
            });
        }

        if let Some(parent) = path.ancestors().find(|ancestor| !self.exists(ancestor, current)) {
            return Err(OrderError::MissingParent {
                value: trimmed.to_string(),
                parent,
            });
        }

        if let Some(sibling) = path
            .preceding_siblings()
            .find(|sibling| !self.by_path.contains_key(sibling))
        {
            return Err(OrderError::MissingSibling {
                value: trimmed.to_string(),
                sibling,
            });
        }

        debug!(row = %current, order = %path, "order accepted");
        Ok(path)
    }

    fn exists(&self, path: &OrderPath, current: &RowKey) -> bool {
        self.holder(path, current).is_some()
    }

    /// First record other than `current` holding `path`.
    fn holder(&self, path: &OrderPath, current: &RowKey) -> Option<&'a RowKey> {
        self.by_path
            .get(path)?
            .iter()
            .copied()
            .find(|key| *key != current)
    }
}
