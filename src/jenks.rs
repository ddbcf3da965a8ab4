//! Fisher–Jenks natural breaks.
//!
//! The optimisation is the classic O(n²·k) dynamic program described by
//! [Daniel Lewis](http://danieljlewis.org/files/2010/06/Jenks.pdf): two matrices hold, for every
//! prefix of the sorted series and every class count, the lowest total within-class variance
//! found so far and the 1-based index at which the last class of that prefix starts.

use log::{debug, trace};
use std::ops::{Index, IndexMut};

use crate::{BreaksErr, BreaksNum, numeric_sort, validate};

/// Options controlling the presentation of Jenks breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JenksOptions {
    /// When the first two breaks are equal (a "flat bottom"), replace the first break with zero
    /// so that the lowest class starts at the axis origin. Enabled by default.
    pub zero_flat_bottom: bool,
    /// Allow the lowest class to hold a single value. Enabled by default, which makes the
    /// breaks the true minimum-variance classification.
    ///
    /// Disabling it reproduces the classic Lewis formulation, where the single-class row is only
    /// filled from a prefix of two values on and a one-value lowest class is never chosen.
    pub singleton_first_class: bool,
}

impl JenksOptions {
    /// Default options: flat bottoms start at zero, optimal classification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a flat bottom is replaced by zero.
    pub fn with_zero_flat_bottom(mut self, zero_flat_bottom: bool) -> Self {
        self.zero_flat_bottom = zero_flat_bottom;
        self
    }

    /// Set whether the lowest class may hold a single value.
    pub fn with_singleton_first_class(mut self, singleton_first_class: bool) -> Self {
        self.singleton_first_class = singleton_first_class;
        self
    }
}

impl Default for JenksOptions {
    fn default() -> Self {
        JenksOptions {
            zero_flat_bottom: true,
            singleton_first_class: true,
        }
    }
}

/// Row-major matrix addressed by `(row, column)`.
///
/// Rows are prefix lengths `0..=k` and columns are class counts `0..=classes`. Row 0 and
/// column 0 are padding so that both axes can be addressed 1-based.
struct Matrix<T> {
    data: Vec<T>,
    columns: usize,
}

impl<T: Copy> Matrix<T> {
    fn new(rows: usize, columns: usize, fill: T) -> Self {
        Matrix {
            data: vec![fill; rows * columns],
            columns,
        }
    }

    #[inline(always)]
    fn offset(&self, row: usize, column: usize) -> usize {
        debug_assert!(column < self.columns);
        row * self.columns + column
    }
}

impl<T: Copy> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        &self.data[self.offset(row, column)]
    }
}

impl<T: Copy> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        let offset = self.offset(row, column);
        &mut self.data[offset]
    }
}

/// Sums of squares start overflowing `f64` around here
const RESCALE_ABOVE: f64 = 1e150;

/// Widen the sorted series to `f64` for the variance arithmetic.
///
/// Series large enough to overflow a sum of squares are scaled by a power of two, which is exact
/// and leaves the ordering of every variance comparison unchanged.
fn widen<T: BreaksNum>(sorted: &[T]) -> Result<Vec<f64>, BreaksErr> {
    let mut wide = sorted
        .iter()
        .map(|x| x.to_f64())
        .collect::<Option<Vec<f64>>>()
        .ok_or(BreaksErr::ConversionError)?;
    let largest = wide.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    if largest > RESCALE_ABOVE {
        let scale = 2.0f64.powi(-(largest.log2().ceil() as i32));
        debug!("rescaling series by {scale:e} before computing variances");
        wide.iter_mut().for_each(|x| *x *= scale);
    }
    Ok(wide)
}

/// Fill the lower class limit and variance combination matrices for `sorted`.
fn fill_matrices(
    sorted: &[f64],
    nclasses: usize,
    options: JenksOptions,
    lower_class_limits: &mut Matrix<usize>,
    variance_combinations: &mut Matrix<f64>,
) {
    let k = sorted.len();
    for y in 1..=nclasses {
        lower_class_limits[(0, y)] = 1;
        variance_combinations[(0, y)] = 0.0;
        for t in 1..=k {
            variance_combinations[(t, y)] = f64::INFINITY;
        }
    }

    // without a one-value lowest class, row 1 keeps its infinite variance
    let first_prefix = if options.singleton_first_class { 1 } else { 2 };
    for l in first_prefix..=k {
        let mut s1 = 0.0;
        let mut s2 = 0.0;
        let mut w = 0.0;
        let mut v = 0.0;

        // grow a suffix of the first `l` values, right to left
        for m in 1..=l {
            let i3 = l - m + 1;
            let val = sorted[i3 - 1];
            s2 += val * val;
            s1 += val;
            w += 1.0;
            // w times the population variance of the suffix
            v = s2 - (s1 * s1) / w;
            let i4 = i3 - 1;
            if i4 != 0 {
                for p in 2..=nclasses {
                    let candidate = v + variance_combinations[(i4, p - 1)];
                    // ties go to the longer suffix
                    if variance_combinations[(l, p)] >= candidate {
                        variance_combinations[(l, p)] = candidate;
                        lower_class_limits[(l, p)] = i3;
                    }
                }
            }
        }
        lower_class_limits[(l, 1)] = 1;
        variance_combinations[(l, 1)] = v;
    }
}

/// Walk the lower class limits back from the full series to recover the class breaks.
fn backtrack<T: BreaksNum>(
    sorted: &[T],
    nclasses: usize,
    lower_class_limits: &Matrix<usize>,
) -> Result<Vec<T>, BreaksErr> {
    let k = sorted.len();
    let mut breaks = vec![T::zero(); nclasses + 1];
    breaks[0] = sorted[0];
    breaks[nclasses] = sorted[k - 1];

    let mut upper = k;
    for count in (2..=nclasses).rev() {
        let start = lower_class_limits[(upper, count)];
        trace!("class {count} starts at position {start} of {upper}");
        // `start` is 1-based; the preceding class ends one position earlier
        let last_of_previous = start.checked_sub(2).ok_or(BreaksErr::BacktrackError)?;
        breaks[count - 1] = sorted[last_of_previous];
        upper = start - 1;
    }
    Ok(breaks)
}

/// Jenks natural breaks, using the default [`JenksOptions`].
///
/// Finds the `num_classes + 1` class boundaries which minimise the total within-class
/// sum of squared deviations of the sorted series. The first break is the series minimum, the
/// last is the maximum, and each break in between is the **largest** value of the class below it.
///
/// If the series has fewer than `num_classes + 1` values, there's nothing to optimise and a copy
/// of the series is returned as given.
///
/// The input isn't modified: a sorted copy is classified.
///
/// # Example
///
/// ```
/// use classbreaks::jenks_breaks;
///
/// let series = [10.0, 4.0, 9.0, 5.0];
/// assert_eq!(jenks_breaks(&series, 2).unwrap(), vec![4.0, 5.0, 10.0]);
/// ```
pub fn jenks_breaks<T: BreaksNum>(series: &[T], num_classes: u8) -> Result<Vec<T>, BreaksErr> {
    jenks_breaks_with(series, num_classes, JenksOptions::default())
}

/// Jenks natural breaks with explicit [`JenksOptions`].
///
/// ```
/// use classbreaks::{jenks_breaks_with, JenksOptions};
///
/// let series = [1.0, 1.0, 1.0, 7.0, 8.0];
/// let options = JenksOptions::new().with_zero_flat_bottom(false);
/// assert_eq!(jenks_breaks_with(&series, 2, options).unwrap(), vec![1.0, 1.0, 8.0]);
/// ```
pub fn jenks_breaks_with<T: BreaksNum>(
    series: &[T],
    num_classes: u8,
    options: JenksOptions,
) -> Result<Vec<T>, BreaksErr> {
    validate(series, num_classes)?;
    let nclasses = usize::try_from(num_classes)?;
    let k = series.len();
    debug!("jenks breaks: {k} values, {nclasses} classes");

    if k < nclasses + 1 {
        debug!("too few values for {nclasses} classes, returning the series");
        return Ok(series.to_vec());
    }
    let sorted = numeric_sort(series, false);
    let wide = widen(&sorted)?;

    trace!("allocating {}x{} matrices", k + 1, nclasses + 1);
    let mut lower_class_limits = Matrix::new(k + 1, nclasses + 1, 0usize);
    let mut variance_combinations = Matrix::new(k + 1, nclasses + 1, 0.0f64);
    fill_matrices(
        &wide,
        nclasses,
        options,
        &mut lower_class_limits,
        &mut variance_combinations,
    );

    let mut breaks = backtrack(&sorted, nclasses, &lower_class_limits)?;
    if options.zero_flat_bottom && breaks[0] == breaks[1] {
        debug!("flat bottom at {:?}, starting the first class at zero", breaks[0]);
        breaks[0] = T::zero();
    }
    Ok(breaks)
}
