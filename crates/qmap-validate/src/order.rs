//! Order number grammar.
//!
//! An order is one or more dot-separated decimal segments: `1`, `1.2`,
//! `1.2.1`. Segments compare numerically, so `01.2` and `1.2` name the same
//! position.

use std::fmt;
use std::sync::LazyLock;

use qmap_model::RowKey;
use regex::Regex;
use thiserror::Error;

static ORDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)*$").expect("Invalid order regex"));

/// Reasons an order value cannot be committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The value does not follow the dot-separated number grammar.
    #[error("'{value}' is not a valid order; use dot-separated numbers such as 1, 1.2 or 1.2.1")]
    InvalidFormat { value: String },

    /// An ancestor order does not exist yet.
    #[error("order {value} needs parent {parent} to exist first")]
    MissingParent { value: String, parent: OrderPath },

    /// An earlier sibling order does not exist yet.
    #[error("order {value} skips {sibling}; add {sibling} first")]
    MissingSibling { value: String, sibling: OrderPath },

    /// Another row already holds this order.
    #[error("order {value} is already used by row {holder}")]
    DuplicateOrder { value: String, holder: RowKey },
}

impl OrderError {
    /// Short name of the error kind, for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "InvalidFormat",
            Self::MissingParent { .. } => "MissingParent",
            Self::MissingSibling { .. } => "MissingSibling",
            Self::DuplicateOrder { .. } => "DuplicateOrder",
        }
    }

    /// The rejected value.
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidFormat { value }
            | Self::MissingParent { value, .. }
            | Self::MissingSibling { value, .. }
            | Self::DuplicateOrder { value, .. } => value,
        }
    }
}

/// A parsed order number in canonical numeric form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderPath {
    segments: Vec<u64>,
}

impl OrderPath {
    /// Parses an order, trimming surrounding whitespace first.
    pub fn parse(value: &str) -> Result<Self, OrderError> {
        let trimmed = value.trim();
        let invalid = || OrderError::InvalidFormat {
            value: trimmed.to_string(),
        };
        if !ORDER_REGEX.is_match(trimmed) {
            return Err(invalid());
        }
        let segments = trimmed
            .split('.')
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Number of segments (1 for top-level orders).
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Final segment, the position among siblings.
    pub fn position(&self) -> u64 {
        self.segments.last().copied().unwrap_or_default()
    }

    /// Immediate parent, `None` for top-level orders.
    pub fn parent(&self) -> Option<OrderPath> {
        (self.depth() > 1).then(|| Self {
            segments: self.segments[..self.depth() - 1].to_vec(),
        })
    }

    /// Strict-prefix ancestors, shortest first.
    pub fn ancestors(&self) -> impl Iterator<Item = OrderPath> + '_ {
        (1..self.depth()).map(|len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// Siblings that must precede this order, lowest position first.
    pub fn preceding_siblings(&self) -> impl Iterator<Item = OrderPath> + '_ {
        let prefix = &self.segments[..self.depth().saturating_sub(1)];
        (1..self.position()).map(move |position| {
            let mut segments = prefix.to_vec();
            segments.push(position);
            Self { segments }
        })
    }
}

impl fmt::Display for OrderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(value: &str) -> OrderPath {
        OrderPath::parse(value).unwrap()
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(path("1").segments(), [1]);
        assert_eq!(path(" 1.2.10 ").segments(), [1, 2, 10]);
        assert_eq!(path("01.2").to_string(), "1.2");
    }

    #[test]
    fn test_parse_invalid() {
        for value in ["", " ", "1.", ".1", "1..2", "a", "1.a", "1,2", "-1", "1.2 .3", "١"] {
            assert!(
                matches!(OrderPath::parse(value), Err(OrderError::InvalidFormat { .. })),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_overflow_is_invalid() {
        let err = OrderPath::parse("99999999999999999999999").unwrap_err();
        assert_eq!(err.kind(), "InvalidFormat");
    }

    #[test]
    fn test_ancestors_and_siblings() {
        let order = path("2.3.3");
        let ancestors: Vec<String> = order.ancestors().map(|p| p.to_string()).collect();
        assert_eq!(ancestors, vec!["2", "2.3"]);
        let siblings: Vec<String> = order.preceding_siblings().map(|p| p.to_string()).collect();
        assert_eq!(siblings, vec!["2.3.1", "2.3.2"]);
        assert_eq!(order.parent(), Some(path("2.3")));
        assert_eq!(path("4").parent(), None);
    }

    #[test]
    fn test_top_level_siblings() {
        let siblings: Vec<String> = path("3").preceding_siblings().map(|p| p.to_string()).collect();
        assert_eq!(siblings, vec!["1", "2"]);
        assert_eq!(path("0").preceding_siblings().count(), 0);
    }
}
