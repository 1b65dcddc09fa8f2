//! Filter pieces shared by every list endpoint.
//!
//! Entity-specific filters embed a [`CommonFilter`] and add their own
//! set-membership lists. Empty lists and `None` mean "no predicate".

use crate::error::CoreError;
use crate::pagination::PageRequest;
use crate::sort::SortField;
use crate::types::{DbId, Timestamp};

/// An inclusive timestamp range with independently optional ends.
///
/// Construction through [`DateRange::new`] guarantees `to >= from` whenever
/// both are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<Timestamp>,
    to: Option<Timestamp>,
}

impl DateRange {
    /// Build a range for `field`, rejecting an inverted range.
    ///
    /// The error is reported against `<field>_to` so clients can map it back
    /// to the query parameter they sent.
    pub fn new(
        field: &str,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Self, CoreError> {
        if let (Some(from), Some(to)) = (from, to) {
            if to < from {
                return Err(CoreError::invalid_field(
                    format!("{field}_to"),
                    format!("must be greater than or equal to {field}_from"),
                ));
            }
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> Option<Timestamp> {
        self.from
    }

    pub fn to(&self) -> Option<Timestamp> {
        self.to
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Predicates every listable entity supports, plus sort and page.
#[derive(Debug, Clone, Default)]
pub struct CommonFilter {
    pub ids: Vec<DbId>,
    pub search: Option<String>,
    pub created: DateRange,
    pub updated: DateRange,
    pub created_by_ids: Vec<DbId>,
    pub updated_by_ids: Vec<DbId>,
    pub sort: Vec<SortField>,
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn open_ranges_are_accepted() {
        let now = Utc::now();
        assert!(DateRange::new("created", None, None).unwrap().is_unbounded());
        assert_eq!(
            DateRange::new("created", Some(now), None).unwrap().from(),
            Some(now)
        );
        assert_eq!(
            DateRange::new("created", None, Some(now)).unwrap().to(),
            Some(now)
        );
    }

    #[test]
    fn equal_bounds_are_accepted() {
        let now = Utc::now();
        let range = DateRange::new("updated", Some(now), Some(now)).unwrap();
        assert_eq!(range.from(), range.to());
    }

    #[test]
    fn inverted_range_is_rejected_on_the_to_field() {
        let now = Utc::now();
        let result = DateRange::new("created", Some(now), Some(now - Duration::seconds(1)));
        assert_matches!(result, Err(CoreError::Validation(errors)) => {
            assert_eq!(
                errors.get("created_to").map(String::as_str),
                Some("must be greater than or equal to created_from")
            );
        });
    }
}
