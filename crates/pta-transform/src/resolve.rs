//! Date and value column resolution from header names.
//!
//! Each role is resolved by an ordered rule: the first column, in table
//! order, whose name contains one of the rule's keywords wins. Matching is a
//! case-sensitive substring test and there is no scoring beyond first match.
//! The two roles are resolved independently, so one column may satisfy both.

use tracing::debug;

use pta_model::{ColumnRole, ResolvedColumns, Result};

/// A keyword rule for one column role.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub role: ColumnRole,
    pub keywords: &'static [&'static str],
}

impl ColumnRule {
    pub fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|keyword| name.contains(keyword))
    }
}

/// Rules evaluated in order.
pub const COLUMN_RULES: [ColumnRule; 2] = [
    ColumnRule {
        role: ColumnRole::Date,
        keywords: &["Date", "Time"],
    },
    ColumnRule {
        role: ColumnRole::Value,
        keywords: &["Price", "Close", "Val", "Amt"],
    },
];

fn first_match<S: AsRef<str>>(rule: &ColumnRule, names: &[S]) -> Option<String> {
    names
        .iter()
        .map(AsRef::as_ref)
        .find(|name| rule.matches(name))
        .map(str::to_string)
}

/// Pick the date and value columns from `names`.
pub fn resolve_columns<S: AsRef<str>>(names: &[S]) -> ResolvedColumns {
    let mut resolved = ResolvedColumns::default();
    for rule in &COLUMN_RULES {
        let found = first_match(rule, names);
        match rule.role {
            ColumnRole::Date => resolved.date = found,
            ColumnRole::Value => resolved.value = found,
        }
    }
    debug!(
        date_column = resolved.date.as_deref().unwrap_or("-"),
        value_column = resolved.value.as_deref().unwrap_or("-"),
        "columns resolved"
    );
    resolved
}

/// Resolve both columns or fail with `MissingColumn`.
pub fn resolve_required(names: &[String]) -> Result<(String, String)> {
    let resolved = resolve_columns(names);
    let (date, value) = resolved.require(names)?;
    Ok((date.to_string(), value.to_string()))
}
