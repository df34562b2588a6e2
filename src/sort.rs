//! Sort state and field-based ordering.
//!
//! A list is in exactly one of three sort states:
//!
//! - `Unsorted`: items are shown in the order the data source returned them
//! - `Sorted`: the data source orders by a field, and the current window is
//!   re-ordered locally by the same field
//! - `Randomized`: the current window is shuffled with a stored seed
//!
//! Toggling the same field cycles `desc → asc → random`. Toggling a different
//! field always starts over at `desc`.
//!
//! ```text
//! Unsorted / Randomized --(toggle f)--> Sorted{f, desc}
//! Sorted{f, desc}       --(toggle f)--> Sorted{f, asc}
//! Sorted{f, asc}        --(toggle f)--> Randomized{new seed}
//! Sorted{other, *}      --(toggle f)--> Sorted{f, desc}
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::shuffle::fresh_seed;

/// Direction of a field sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest value first.
    Asc,
    /// Largest value first.
    Desc,
}

impl SortDirection {
    /// Returns the wire name, `"asc"` or `"desc"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active ordering of a list.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::sort::{SortDirection, SortState};
///
/// let state = SortState::Unsorted.toggled("views");
/// assert_eq!(state, SortState::sorted("views", SortDirection::Desc));
///
/// let state = state.toggled("views");
/// assert_eq!(state, SortState::sorted("views", SortDirection::Asc));
///
/// let state = state.toggled("views");
/// assert!(state.is_randomized());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortState {
    /// Source order.
    #[default]
    Unsorted,
    /// Ordered by `field`.
    Sorted {
        /// Field name as understood by the data source.
        field: String,
        /// Sort direction.
        direction: SortDirection,
    },
    /// Shuffled with a stored, non-zero seed.
    Randomized {
        /// Seed for [`crate::shuffle::shuffle_with_seed`].
        seed: u32,
    },
}

impl SortState {
    /// Shorthand for `SortState::Sorted { field, direction }`.
    pub fn sorted(field: impl Into<String>, direction: SortDirection) -> Self {
        SortState::Sorted {
            field: field.into(),
            direction,
        }
    }

    /// Returns the next state after the user toggles `field`.
    ///
    /// Entering `Randomized` draws a fresh non-zero seed.
    pub fn toggled(&self, field: &str) -> SortState {
        self.toggled_with(field, fresh_seed)
    }

    /// Like [`SortState::toggled`], with the seed supplied by `next_seed`.
    ///
    /// A zero seed is bumped to 1 so that `Randomized` never carries zero.
    pub fn toggled_with(&self, field: &str, next_seed: impl FnOnce() -> u32) -> SortState {
        match self {
            SortState::Sorted {
                field: current,
                direction: SortDirection::Desc,
            } if current == field => SortState::sorted(field, SortDirection::Asc),
            SortState::Sorted {
                field: current,
                direction: SortDirection::Asc,
            } if current == field => SortState::Randomized {
                seed: next_seed().max(1),
            },
            _ => SortState::sorted(field, SortDirection::Desc),
        }
    }

    /// Field sent to the data source, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            SortState::Sorted { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Direction sent to the data source, if any.
    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortState::Sorted { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    /// Direction of `field` if the list is currently sorted by it.
    ///
    /// Useful for drawing arrows on column headers.
    pub fn direction_for(&self, field: &str) -> Option<SortDirection> {
        match self {
            SortState::Sorted {
                field: current,
                direction,
            } if current == field => Some(*direction),
            _ => None,
        }
    }

    /// Returns true in the `Randomized` state.
    pub fn is_randomized(&self) -> bool {
        matches!(self, SortState::Randomized { .. })
    }

    /// Shuffle seed, if randomized.
    pub fn seed(&self) -> Option<u32> {
        match self {
            SortState::Randomized { seed } => Some(*seed),
            _ => None,
        }
    }
}

/// A value extracted from an item for sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Numeric value; compared numerically.
    Number(f64),
    /// Text value; compared case-insensitively first.
    Text(String),
    /// The item has no value for the field. Sorts like `Number(0.0)`.
    Missing,
}

impl From<u64> for SortValue {
    fn from(value: u64) -> Self {
        SortValue::Number(value as f64)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Number(value as f64)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Number(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::Text(value)
    }
}


/// Items that can be ordered by named fields.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::sort::{SortKey, SortValue};
///
/// #[derive(Clone)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// impl SortKey for User {
///     fn sort_value(&self, field: &str) -> SortValue {
///         match field {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             _ => SortValue::Missing,
///         }
///     }
/// }
/// ```
pub trait SortKey {
    /// Returns the value of `field` for this item.
    fn sort_value(&self, field: &str) -> SortValue;
}

/// Compares two sort values in ascending order.
///
/// The order is total, so fields with mixed shapes sort without surprises:
///
/// - numbers (and `Missing`, as 0) come before all text
/// - numbers compare with [`f64::total_cmp`]; NaN sorts after every number
/// - text compares case-folded first, then by code point
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use bubbletea_paged_list::sort::{compare_values, SortValue};
///
/// let ten = SortValue::Number(10.0);
/// let nine = SortValue::Text("9".into());
/// assert_eq!(compare_values(&ten, &nine), Ordering::Less);
/// assert_eq!(compare_values(&SortValue::Missing, &SortValue::Number(0.0)), Ordering::Equal);
/// ```
pub fn compare_values(a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
        (SortValue::Text(_), _) => Ordering::Greater,
        (_, SortValue::Text(_)) => Ordering::Less,
        (a, b) => numeric(a).total_cmp(&numeric(b)),
    }
}

fn numeric(value: &SortValue) -> f64 {
    match value {
        SortValue::Number(n) if n.is_nan() => f64::NAN,
        // -0.0 ties with 0 and Missing
        SortValue::Number(n) if *n == 0.0 => 0.0,
        SortValue::Number(n) => *n,
        SortValue::Missing | SortValue::Text(_) => 0.0,
    }
}

/// Stably sorts `items` by `field` in `direction`.
///
/// Items with equal values keep their relative order in both directions.
pub fn sort_by_field<T: SortKey>(items: &mut [T], field: &str, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = compare_values(&a.sort_value(field), &b.sort_value(field));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
