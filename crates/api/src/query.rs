//! Shared query parameter types for list endpoints.
//!
//! Read-side parameters are parsed leniently: every value arrives as a raw
//! string, and anything that does not parse (a bad UUID inside a list, a
//! malformed timestamp, a non-numeric page) is treated as absent. What does
//! parse is then validated: page bounds and inverted date ranges are 422s.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::filters::{CommonFilter, DateRange};
use storefront_core::pagination::PageRequest;
use storefront_core::sort::parse_sort;
use storefront_core::types::{DbId, Timestamp};

/// Parameters every list endpoint accepts.
///
/// Entity-specific parameter structs embed this with `#[serde(flatten)]`.
/// All fields stay strings so that a malformed value can never reject the
/// whole query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    /// Comma-separated, `-` prefix for descending (`-created_at,name`).
    pub sort: Option<String>,
    pub search: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    pub updated_from: Option<String>,
    pub updated_to: Option<String>,
    pub created_by_ids: Option<String>,
    pub updated_by_ids: Option<String>,
    pub ids: Option<String>,
}

impl ListParams {
    /// Turn the raw parameters into a [`CommonFilter`], keeping only sort
    /// keys found in `safelist`.
    pub fn to_filter(&self, safelist: &[&'static str]) -> Result<CommonFilter, CoreError> {
        let page = PageRequest::new(integer(self.page.as_deref()), integer(self.page_size.as_deref()))?;

        let created = DateRange::new(
            "created",
            range_start(self.created_from.as_deref()),
            range_end(self.created_to.as_deref()),
        )?;
        let updated = DateRange::new(
            "updated",
            range_start(self.updated_from.as_deref()),
            range_end(self.updated_to.as_deref()),
        )?;

        Ok(CommonFilter {
            ids: id_list(self.ids.as_deref()),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            created,
            updated,
            created_by_ids: id_list(self.created_by_ids.as_deref()),
            updated_by_ids: id_list(self.updated_by_ids.as_deref()),
            sort: self
                .sort
                .as_deref()
                .map(|spec| parse_sort(spec, safelist))
                .unwrap_or_default(),
            page,
        })
    }
}

/// Split a comma-separated list, dropping blank entries.
pub fn text_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Split a comma-separated list of UUIDs, dropping entries that do not parse.
pub fn id_list(raw: Option<&str>) -> Vec<DbId> {
    raw.map(|s| {
        s.split(',')
            .filter_map(|v| v.trim().parse::<DbId>().ok())
            .collect()
    })
    .unwrap_or_default()
}

/// `true`/`false`/`1`/`0`, case-insensitive. Anything else is absent.
pub fn boolean(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn integer(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` meaning the start of that day.
fn range_start(raw: Option<&str>) -> Option<Timestamp> {
    let raw = raw?.trim();
    rfc3339(raw).or_else(|| date(raw).map(|d| d.and_time(NaiveTime::MIN).and_utc()))
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` meaning the end of that day.
fn range_end(raw: Option<&str>) -> Option<Timestamp> {
    let raw = raw?.trim();
    rfc3339(raw).or_else(|| {
        date(raw)
            .and_then(|d| d.and_hms_micro_opt(23, 59, 59, 999_999))
            .map(|dt| dt.and_utc())
    })
}

fn rfc3339(raw: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use storefront_core::sort::SortField;
    use uuid::Uuid;

    use super::*;

    const SAFELIST: &[&str] = &["name", "created_at"];

    #[test]
    fn defaults_when_nothing_given() {
        let filter = ListParams::default().to_filter(SAFELIST).unwrap();
        assert_eq!(filter.page, PageRequest::default());
        assert!(filter.sort.is_empty());
        assert!(filter.ids.is_empty());
        assert!(filter.created.is_unbounded());
    }

    #[test]
    fn malformed_values_are_dropped() {
        let good = Uuid::new_v4();
        let params = ListParams {
            page: Some("abc".into()),
            ids: Some(format!("not-a-uuid,{good}, ,")),
            created_from: Some("yesterday".into()),
            search: Some("   ".into()),
            sort: Some("-name,password_hash".into()),
            ..ListParams::default()
        };
        let filter = params.to_filter(SAFELIST).unwrap();

        assert_eq!(filter.page.page(), 1);
        assert_eq!(filter.ids, vec![good]);
        assert_eq!(filter.created.from(), None);
        assert_eq!(filter.search, None);
        assert_eq!(filter.sort, vec![SortField::desc("name")]);
    }

    #[test]
    fn out_of_range_page_is_rejected() {
        let params = ListParams {
            page_size: Some("101".into()),
            ..ListParams::default()
        };
        assert_matches!(
            params.to_filter(SAFELIST),
            Err(CoreError::Validation(fields)) if fields.contains_key("page_size")
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let params = ListParams {
            updated_from: Some("2024-05-02".into()),
            updated_to: Some("2024-05-01".into()),
            ..ListParams::default()
        };
        assert_matches!(
            params.to_filter(SAFELIST),
            Err(CoreError::Validation(fields)) if fields.contains_key("updated_to")
        );
    }

    #[test]
    fn same_day_range_covers_the_whole_day() {
        let params = ListParams {
            created_from: Some("2024-05-01".into()),
            created_to: Some("2024-05-01".into()),
            ..ListParams::default()
        };
        let range = params.to_filter(SAFELIST).unwrap().created;
        let span = range.to().unwrap() - range.from().unwrap();
        assert!(span > chrono::Duration::hours(23));
    }

    #[test]
    fn rfc3339_is_accepted() {
        let ts = range_start(Some("2024-05-01T10:00:00+05:00")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-01T05:00:00+00:00");
    }

    #[test]
    fn list_helpers() {
        assert_eq!(text_list(Some("a, b,,c")), vec!["a", "b", "c"]);
        assert!(text_list(None).is_empty());
        assert_eq!(boolean(Some("TRUE")), Some(true));
        assert_eq!(boolean(Some("0")), Some(false));
        assert_eq!(boolean(Some("maybe")), None);
    }
}
