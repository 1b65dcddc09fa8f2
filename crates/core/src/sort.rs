//! Sort specifications checked against per-entity safe-lists.
//!
//! Clients send sort keys as a comma-separated list such as
//! `-created_at,name`. A leading `-` means descending. Only keys present in
//! the entity's safe-list survive parsing; anything else is dropped silently.
//! The column name carried by a [`SortField`] is always the `'static` string
//! taken from the safe-list itself, never the client's input.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl SortField {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }
}

/// Parse a comma-separated sort specification against `safelist`.
///
/// Unknown keys and repeated columns are dropped; the first occurrence of a
/// column wins. An empty result means "use the entity's default order".
pub fn parse_sort(spec: &str, safelist: &[&'static str]) -> Vec<SortField> {
    let mut fields: Vec<SortField> = Vec::new();

    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (direction, key) = match token.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, token.strip_prefix('+').unwrap_or(token)),
        };

        let Some(column) = safelist.iter().copied().find(|allowed| *allowed == key) else {
            continue;
        };

        if fields.iter().any(|f| f.column == column) {
            continue;
        }

        fields.push(SortField { column, direction });
    }

    fields
}
