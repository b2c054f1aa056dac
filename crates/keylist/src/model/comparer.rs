//! Value comparators and member-based element comparison.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::members::Members;
use super::value::Value;
use crate::error::{ListError, Result};

/// Type alias for a raw value compare function.
pub type CompareFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first. Equal elements keep their relative order.
    Descending,
}

impl SortDirection {
    /// Applies this direction to an ascending ordering.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The member and direction a list is currently sorted by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortDescriptor {
    /// Member name.
    pub attribute: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortDescriptor {
    /// Creates a new descriptor.
    pub fn new(attribute: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            attribute: attribute.into(),
            direction,
        }
    }
}

/// Orders and equates two [`Value`]s.
///
/// `Value::None` is handled before the inner function runs: it orders before
/// every other value and equals only itself. The inner function therefore
/// only ever sees two non-empty values.
///
/// # Panics
///
/// The built-in comparators panic when asked to compare two values of
/// incompatible kinds (for example a string with a date). An element type
/// must only hand out comparators for kinds its members actually produce.
#[derive(Clone)]
pub struct Comparator {
    name: &'static str,
    compare: CompareFn,
}

impl Comparator {
    /// Wraps an arbitrary compare function.
    pub fn by<F>(name: &'static str, compare: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        Self {
            name,
            compare: Arc::new(compare),
        }
    }

    /// Native ordering for every kind.
    ///
    /// Strings compare ordinally, numbers numerically (integers, unsigned
    /// integers and floats compare with each other), booleans `false < true`,
    /// dates, date-times and durations chronologically.
    ///
    /// Mixed integer/float comparisons are exact: integers are never rounded
    /// to `f64`, so `Int(2^53 + 1)` orders above `Float(2^53)`.
    pub fn natural() -> Self {
        Self::by("natural", natural_cmp)
    }

    /// Strings compared without regard to case; other kinds as [`natural`](Self::natural).
    pub fn case_insensitive() -> Self {
        Self::by("case_insensitive", |a, b| match (a, b) {
            (Value::String(sa), Value::String(sb)) => caseless_cmp(sa, sb),
            _ => natural_cmp(a, b),
        })
    }

    /// The comparator's name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Orders two values.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::None, Value::None) => Ordering::Equal,
            (Value::None, _) => Ordering::Less,
            (_, Value::None) => Ordering::Greater,
            _ => (self.compare)(a, b),
        }
    }

    /// Returns `true` if the two values compare equal.
    pub fn equals(&self, a: &Value, b: &Value) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::natural()
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator").field("name", &self.name).finish()
    }
}

fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn natural_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(sa), Value::String(sb)) => sa.cmp(sb),
        (Value::Int(ia), Value::Int(ib)) => ia.cmp(ib),
        (Value::UInt(ua), Value::UInt(ub)) => ua.cmp(ub),
        (Value::Int(ia), Value::UInt(ub)) => i128::from(*ia).cmp(&i128::from(*ub)),
        (Value::UInt(ua), Value::Int(ib)) => i128::from(*ua).cmp(&i128::from(*ib)),
        (Value::Bool(ba), Value::Bool(bb)) => ba.cmp(bb),
        (Value::DateTime(da), Value::DateTime(db)) => da.cmp(db),
        (Value::Date(da), Value::Date(db)) => da.cmp(db),
        (Value::Duration(da), Value::Duration(db)) => da.cmp(db),
        (Value::Float(fa), Value::Float(fb)) => fa.total_cmp(fb),
        (Value::Int(i), Value::Float(f)) => int_float_cmp(i128::from(*i), *f),
        (Value::UInt(u), Value::Float(f)) => int_float_cmp(i128::from(*u), *f),
        (Value::Float(f), Value::Int(i)) => int_float_cmp(i128::from(*i), *f).reverse(),
        (Value::Float(f), Value::UInt(u)) => int_float_cmp(i128::from(*u), *f).reverse(),
        _ => kind_mismatch(a, b),
    }
}

/// 2^127, the first float above every `i128`.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Exact ordering of an integer against a float, without widening the
/// integer to `f64`. NaN orders like `f64::total_cmp` does.
fn int_float_cmp(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return (int as f64).total_cmp(&float);
    }
    if float >= I128_BOUND {
        return Ordering::Less;
    }
    if float < -I128_BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    // `whole` is integral and in range, so the cast is exact.
    int.cmp(&(whole as i128)).then_with(|| 0.0_f64.total_cmp(&(float - whole)))
}

#[cold]
fn kind_mismatch(a: &Value, b: &Value) -> ! {
    let name = |v: &Value| v.kind().map_or("none", |k| k.name());
    panic!("cannot compare a {} value with a {} value", name(a), name(b))
}

/// Compares elements by one named member.
///
/// The comparator is chosen once per sort: the first element with a
/// non-empty value for the member supplies it through
/// [`Members::member_comparer`]. Descending order reverses the comparator
/// output, so combined with a stable sort equal elements keep their relative
/// order in both directions.
#[derive(Debug, Clone)]
pub struct MemberComparer {
    attribute: String,
    direction: SortDirection,
    comparator: Comparator,
}

impl MemberComparer {
    /// Creates a comparer with an explicit comparator.
    pub fn new(attribute: impl Into<String>, direction: SortDirection, comparator: Comparator) -> Self {
        Self {
            attribute: attribute.into(),
            direction,
            comparator,
        }
    }

    /// Resolves `attribute` on every element and picks the comparator.
    ///
    /// Returns the comparer together with the resolved keys, in element
    /// order. Fails with [`ListError::AttributeNotFound`] if the member name is
    /// unknown for `T` or any element cannot resolve it.
    pub fn resolve<T: Members>(
        attribute: &str,
        direction: SortDirection,
        items: &[T],
    ) -> Result<(Self, Vec<Value>)> {
        if !T::has_member(attribute) {
            return Err(ListError::attribute_not_found(attribute));
        }

        let keys = items
            .iter()
            .map(|item| item.member_value(attribute))
            .collect::<Result<Vec<_>>>()?;

        let comparator = items
            .iter()
            .zip(&keys)
            .find_map(|(item, key)| key.kind().map(|kind| item.member_comparer(kind)))
            .unwrap_or_default();

        Ok((Self::new(attribute, direction, comparator), keys))
    }

    /// The member this comparer sorts by.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// The underlying value comparator.
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Orders two already resolved keys, honoring the direction.
    pub fn compare_values(&self, a: &Value, b: &Value) -> Ordering {
        self.direction.apply(self.comparator.compare(a, b))
    }

    /// Orders two elements by resolving the member on each.
    pub fn compare<T: Members>(&self, a: &T, b: &T) -> Result<Ordering> {
        let va = a.member_value(&self.attribute)?;
        let vb = b.member_value(&self.attribute)?;
        Ok(self.compare_values(&va, &vb))
    }

    /// Stable sort permutation for `keys`.
    ///
    /// Entry `i` of the result is the index in `keys` of the element that
    /// belongs at position `i`.
    pub fn sort_permutation(&self, keys: &[Value]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..keys.len()).collect();
        // `sort_by` is stable.
        order.sort_by(|&a, &b| self.compare_values(&keys[a], &keys[b]));
        order
    }
}
