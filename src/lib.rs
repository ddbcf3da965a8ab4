//! Class breaks for choropleth maps and other visualisations that shade a continuous variable
//! in a small number of discrete steps.
//!
//! Three classification strategies are provided, each returning `num_classes + 1` ascending
//! class boundaries ("breaks"):
//!
//! - [`equal_breaks`]: equal-width classes spanning the range of the series
//! - [`quantile_breaks`]: classes holding (approximately) equal numbers of observations
//! - [`jenks_breaks`]: [Jenks natural breaks](https://en.wikipedia.org/wiki/Jenks_natural_breaks_optimization),
//!   the classes with the least within-class sum of squared deviations, found by dynamic programming
//!
//! Once breaks are computed, [`plot`] maps individual values to the index of their class.
//!
//! # References
//! 1. [geostats](https://github.com/simogeo/geostats) (equal interval and quantile classification)
//! 2. [Lewis, D. (2010). Jenks natural breaks](http://danieljlewis.org/files/2010/06/Jenks.pdf)

use log::debug;
use num_traits::Float;
use num_traits::cast::FromPrimitive;
use std::cmp::Ordering;
use std::fmt::Debug;

#[cfg(not(target_arch = "wasm32"))]
mod ffi;
#[cfg(not(target_arch = "wasm32"))]
pub use crate::ffi::{
    ExternalArray, drop_breaks_result, equal_breaks_ffi, jenks_breaks_ffi, plot_ffi,
    quantile_breaks_ffi,
};

#[cfg(target_arch = "wasm32")]
mod wasm;

mod errors;
pub use crate::errors::BreaksErr;

mod jenks;
pub use crate::jenks::{JenksOptions, jenks_breaks, jenks_breaks_with};

/// A trait that encompasses the floating-point types a series can be made of
pub trait BreaksNum: Float + FromPrimitive + Debug {}
impl<T: Float + FromPrimitive + Debug> BreaksNum for T {}

/// A classification strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    EqualInterval,
    Quantile,
    Jenks(JenksOptions),
}

/// Smallest value of the series, or `None` if it's empty
pub fn min<T: BreaksNum>(series: &[T]) -> Option<T> {
    series.iter().copied().reduce(|acc, x| if x < acc { x } else { acc })
}

/// Largest value of the series, or `None` if it's empty
pub fn max<T: BreaksNum>(series: &[T]) -> Option<T> {
    series.iter().copied().reduce(|acc, x| if x > acc { x } else { acc })
}

/// Total of the series, zero if it's empty
pub fn sum<T: BreaksNum>(series: &[T]) -> T {
    series.iter().rev().fold(T::zero(), |acc, &x| acc + x)
}

/// Arithmetic mean of the series, or `None` if it's empty
pub fn mean<T: BreaksNum>(series: &[T]) -> Option<T> {
    if series.is_empty() {
        return None;
    }
    Some(sum(series) / T::from_usize(series.len())?)
}

/// return a sorted **copy** of the input
pub fn numeric_sort<T: BreaksNum>(series: &[T], descending: bool) -> Vec<T> {
    let mut xs = series.to_vec();
    if descending {
        xs.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    } else {
        xs.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    }
    xs
}

/// Reject inputs no classifier can work with
pub(crate) fn validate<T: BreaksNum>(series: &[T], num_classes: u8) -> Result<(), BreaksErr> {
    if num_classes == 0 {
        return Err(BreaksErr::TooFewClassesError);
    }
    if series.is_empty() {
        return Err(BreaksErr::EmptySeriesError);
    }
    if series.iter().any(|x| !x.is_finite()) {
        return Err(BreaksErr::NonFiniteError);
    }
    Ok(())
}

/// Equal-width classes spread evenly across the range of the series.
///
/// The first break is the series minimum and the last is the maximum. A series whose values are
/// all identical produces zero-width classes, with every break equal to that value.
///
/// # Example
///
/// ```
/// use classbreaks::equal_breaks;
///
/// let series = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert_eq!(equal_breaks(&series, 3).unwrap(), vec![1.0, 4.0, 7.0, 10.0]);
/// ```
pub fn equal_breaks<T: BreaksNum>(series: &[T], num_classes: u8) -> Result<Vec<T>, BreaksErr> {
    validate(series, num_classes)?;
    let nclasses = usize::try_from(num_classes)?;
    debug!("equal breaks: {} values, {nclasses} classes", series.len());
    let low = min(series).ok_or(BreaksErr::EmptySeriesError)?;
    let high = max(series).ok_or(BreaksErr::EmptySeriesError)?;
    if low == high {
        debug!("flat series at {low:?}, classes have zero width");
    }
    let interval = (high - low) / T::from_u8(num_classes).ok_or(BreaksErr::ConversionError)?;

    let mut breaks = Vec::with_capacity(nclasses + 1);
    let mut current = low;
    for _ in 0..nclasses {
        breaks.push(current.min(high));
        current = current + interval;
    }
    // accumulated intervals can drift from the maximum by a few ulps
    breaks.push(high);
    Ok(breaks)
}

/// Classes holding (approximately) the same number of observations.
///
/// Break `i` is the value at position `round(i * (len - 1) / num_classes)` of the sorted series,
/// so every break is an observed value. Asking for at least as many classes as there are values
/// repeats values rather than failing.
///
/// The input isn't modified: a sorted copy is classified.
///
/// # Example
///
/// ```
/// use classbreaks::quantile_breaks;
///
/// let series = [10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
/// assert_eq!(quantile_breaks(&series, 4).unwrap(), vec![1.0, 3.0, 6.0, 8.0, 10.0]);
/// ```
pub fn quantile_breaks<T: BreaksNum>(series: &[T], num_classes: u8) -> Result<Vec<T>, BreaksErr> {
    validate(series, num_classes)?;
    let nclasses = usize::try_from(num_classes)?;
    debug!("quantile breaks: {} values, {nclasses} classes", series.len());
    let sorted = numeric_sort(series, false);
    let inc = (sorted.len() - 1) as f64 / nclasses as f64;

    (0..=nclasses)
        .map(|i| {
            let position = (i as f64 * inc).round() as usize;
            // guard against the product landing a hair past the last index
            sorted
                .get(position.min(sorted.len() - 1))
                .copied()
                .ok_or(BreaksErr::ConversionError)
        })
        .collect()
}

/// Compute breaks with the given [`Method`].
///
/// ```
/// use classbreaks::{breaks, Method};
///
/// let series = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert_eq!(breaks(&series, 3, Method::EqualInterval).unwrap(), vec![1.0, 4.0, 7.0, 10.0]);
/// ```
pub fn breaks<T: BreaksNum>(
    series: &[T],
    num_classes: u8,
    method: Method,
) -> Result<Vec<T>, BreaksErr> {
    match method {
        Method::EqualInterval => equal_breaks(series, num_classes),
        Method::Quantile => quantile_breaks(series, num_classes),
        Method::Jenks(options) => jenks_breaks_with(series, num_classes, options),
    }
}

/// Find the class of `value` within a breaks series.
///
/// With ascending breaks, the last break is never matched and the result is `i - 1` for the
/// first break `i` that `value` doesn't exceed, so class `c` covers `(breaks[c], breaks[c + 1]]`.
/// A value equal to `breaks[0]` therefore has no class, and neither does a value above
/// `breaks[len - 2]`.
///
/// With `descending` set, the breaks are scanned from the end and the result is the last index
/// `i` with `value >= breaks[i]`, so a value equal to the final break maps to that break's index.
///
/// `None` means the value falls outside every class.
///
/// # Example
///
/// ```
/// use classbreaks::plot;
///
/// let breaks = [0.0, 10.0, 20.0, 30.0];
/// assert_eq!(plot(&breaks, 15.0, false), Some(1));
/// assert_eq!(plot(&breaks, 0.0, false), None);
/// ```
pub fn plot<T: PartialOrd>(breaks: &[T], value: T, descending: bool) -> Option<usize> {
    if descending {
        breaks.iter().rposition(|b| value >= *b)
    } else {
        let (_, candidates) = breaks.split_last()?;
        candidates
            .iter()
            .position(|b| value <= *b)
            .and_then(|i| i.checked_sub(1))
    }
}
