use libc::{c_double, c_uchar, c_void, size_t, ssize_t};
use std::ptr;
use std::slice;

use crate::{BreaksErr, equal_breaks, jenks_breaks, plot, quantile_breaks};

/// Wrapper for a void pointer to a sequence of floats, and the sequence length. Used for FFI.
///
/// Incoming arrays hold the series to be classified (or the breaks to plot against); arrays
/// returned by the `*_breaks_ffi` functions hold class breaks, and must be released by passing
/// them to [`drop_breaks_result`].
///
/// `data` is a `Vec<c_double>`.
#[repr(C)]
pub struct ExternalArray {
    pub data: *const c_void,
    pub len: size_t,
}

/// We don't need to take ownership of incoming data: the classifiers work on their own copy
impl From<&ExternalArray> for &[f64] {
    fn from(arr: &ExternalArray) -> Self {
        if arr.data.is_null() || arr.len == 0 {
            return &[];
        }
        unsafe { slice::from_raw_parts(arr.data as *const f64, arr.len) }
    }
}

// Convert class breaks into something that can be leaked across the FFI boundary
impl From<Vec<f64>> for ExternalArray {
    fn from(v: Vec<f64>) -> Self {
        let boxed = v.into_boxed_slice();
        let blen = boxed.len();
        let rawp = Box::into_raw(boxed);
        ExternalArray {
            data: rawp as *const libc::c_void,
            len: blen as libc::size_t,
        }
    }
}

// Reconstitute breaks that have been returned across the FFI boundary so they can be dropped
impl From<ExternalArray> for Vec<f64> {
    fn from(arr: ExternalArray) -> Self {
        // we originated this data, so pointer-to-slice -> box -> vec
        unsafe {
            let p = ptr::slice_from_raw_parts_mut(arr.data as *mut f64, arr.len);
            Box::from_raw(p).into_vec()
        }
    }
}

// Invalid input (no classes, an empty series, NaN or infinite values) yields an empty array
fn into_external(result: Result<Vec<f64>, BreaksErr>) -> ExternalArray {
    result.unwrap_or_default().into()
}

#[unsafe(no_mangle)]
pub extern "C" fn equal_breaks_ffi(data: &ExternalArray, classes: c_uchar) -> ExternalArray {
    into_external(equal_breaks::<f64>(data.into(), classes))
}

#[unsafe(no_mangle)]
pub extern "C" fn quantile_breaks_ffi(data: &ExternalArray, classes: c_uchar) -> ExternalArray {
    into_external(quantile_breaks::<f64>(data.into(), classes))
}

#[unsafe(no_mangle)]
pub extern "C" fn jenks_breaks_ffi(data: &ExternalArray, classes: c_uchar) -> ExternalArray {
    into_external(jenks_breaks::<f64>(data.into(), classes))
}

#[unsafe(no_mangle)]
pub extern "C" fn drop_breaks_result(result: ExternalArray) {
    let _: Vec<f64> = result.into();
}

/// Class index of `value` within `breaks`, or -1 if it falls outside every class
#[unsafe(no_mangle)]
pub extern "C" fn plot_ffi(
    breaks: &ExternalArray,
    value: c_double,
    descending: bool,
) -> ssize_t {
    let breaks: &[f64] = breaks.into();
    plot(breaks, value, descending)
        .and_then(|idx| ssize_t::try_from(idx).ok())
        .unwrap_or(-1)
}
