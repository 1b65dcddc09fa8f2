//! Filtered, sorted, paginated list queries.
//!
//! [`ListQuery`] wraps a [`sqlx::QueryBuilder`] and appends predicates only
//! for filter fields that are present. Every user-supplied value goes through
//! `push_bind`, so it reaches Postgres as a positional parameter; the only
//! text ever interpolated is table/column names written in this crate and
//! sort columns taken from a safe-list.
//!
//! Each row carries `COUNT(*) OVER()` so the filtered total arrives with the
//! page in a single round trip.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder, Row};
use storefront_core::filters::{CommonFilter, DateRange};
use storefront_core::pagination::{calculate_metadata, Metadata, PageRequest};
use storefront_core::sort::SortField;
use storefront_core::types::DbId;

use crate::error::DbResult;
use crate::{with_timeout, DbPool, LIST_TIMEOUT};

/// Column the window count is exposed under.
const TOTAL_COUNT: &str = "total_count";

pub struct ListQuery {
    builder: QueryBuilder<'static, Postgres>,
    has_where: bool,
}

impl ListQuery {
    /// Start `SELECT <columns>, COUNT(*) OVER() FROM <table>`.
    pub fn new(table: &'static str, columns: &'static str) -> Self {
        let builder = QueryBuilder::new(format!(
            "SELECT {columns}, COUNT(*) OVER() AS {TOTAL_COUNT} FROM {table}"
        ));
        Self {
            builder,
            has_where: false,
        }
    }

    /// Open the next conjunct, emitting `WHERE` the first time and `AND` after.
    fn conjunct(&mut self) -> &mut QueryBuilder<'static, Postgres> {
        self.builder
            .push(if self.has_where { " AND " } else { " WHERE " });
        self.has_where = true;
        &mut self.builder
    }

    /// `column = ANY($n)` over text values. No-op for an empty list.
    pub fn any_text(&mut self, column: &'static str, values: &[String]) -> &mut Self {
        if !values.is_empty() {
            self.conjunct()
                .push(column)
                .push(" = ANY(")
                .push_bind(values.to_vec())
                .push(")");
        }
        self
    }

    /// `column = ANY($n)` over UUIDs. No-op for an empty list.
    pub fn any_id(&mut self, column: &'static str, values: &[DbId]) -> &mut Self {
        if !values.is_empty() {
            self.conjunct()
                .push(column)
                .push(" = ANY(")
                .push_bind(values.to_vec())
                .push(")");
        }
        self
    }

    /// `column = $n` for a boolean flag. No-op when absent.
    pub fn eq_bool(&mut self, column: &'static str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            self.conjunct().push(column).push(" = ").push_bind(value);
        }
        self
    }

    /// Full-text match of `text` against `column` using the `simple` dictionary.
    /// Blank input adds nothing.
    pub fn search(&mut self, column: &'static str, text: Option<&str>) -> &mut Self {
        if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
            self.conjunct()
                .push("to_tsvector('simple', ")
                .push(column)
                .push(") @@ plainto_tsquery('simple', ")
                .push_bind(text.to_string())
                .push(")");
        }
        self
    }

    /// Inclusive bounds on a timestamp column; each end is independent.
    pub fn date_range(&mut self, column: &'static str, range: &DateRange) -> &mut Self {
        if let Some(from) = range.from() {
            self.conjunct().push(column).push(" >= ").push_bind(from);
        }
        if let Some(to) = range.to() {
            self.conjunct().push(column).push(" <= ").push_bind(to);
        }
        self
    }

    /// Apply the predicates every entity shares. `search_column` is `None`
    /// for entities without a searchable text column.
    pub fn common(&mut self, filter: &CommonFilter, search_column: Option<&'static str>) -> &mut Self {
        self.any_id("id", &filter.ids);
        if let Some(column) = search_column {
            self.search(column, filter.search.as_deref());
        }
        self.date_range("created_at", &filter.created)
            .date_range("updated_at", &filter.updated)
            .any_id("created_by_id", &filter.created_by_ids)
            .any_id("updated_by_id", &filter.updated_by_ids)
    }

    /// `ORDER BY` from validated sort fields, falling back to `default` when
    /// none survived. `id` is appended as a tiebreaker so paging is stable.
    pub fn order_by(&mut self, sort: &[SortField], default: &[SortField]) -> &mut Self {
        let fields = if sort.is_empty() { default } else { sort };

        self.builder.push(" ORDER BY ");
        for field in fields {
            self.builder
                .push(field.column)
                .push(" ")
                .push(field.direction.as_sql())
                .push(", ");
        }
        self.builder.push("id ASC");
        self
    }

    /// `LIMIT $n OFFSET $m` for the requested page.
    pub fn paginate(&mut self, page: PageRequest) -> &mut Self {
        self.builder
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        self
    }

    /// Generated SQL so far.
    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    /// Execute and split rows from the window count.
    ///
    /// A page past the end yields no rows and therefore zero metadata.
    pub async fn fetch_page<T>(mut self, pool: &DbPool, page: PageRequest) -> DbResult<(Vec<T>, Metadata)>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let rows: Vec<Counted<T>> = with_timeout(
            LIST_TIMEOUT,
            self.builder.build_query_as::<Counted<T>>().fetch_all(pool),
        )
        .await?;

        let total = rows.first().map_or(0, |r| r.total_count);
        let metadata = calculate_metadata(total, page.page(), page.page_size());
        Ok((rows.into_iter().map(|r| r.row).collect(), metadata))
    }
}

/// A row plus the window count that rode along with it.
struct Counted<T> {
    row: T,
    total_count: i64,
}

impl<'r, T> FromRow<'r, PgRow> for Counted<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            total_count: row.try_get(TOTAL_COUNT)?,
            row: T::from_row(row)?,
        })
    }
}
