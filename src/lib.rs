//! Savitzky-Golay smoothing and differentiation filters.
//!
//! A Savitzky-Golay filter smooths a sampled signal by fitting a low-order
//! polynomial to each window of `frame` consecutive samples, by linear least
//! squares, and replacing the sample at the window's reference position with
//! the fitted value. Unlike a moving average it preserves the height and
//! width of peaks, because any polynomial feature up to the fit order passes
//! through the filter unchanged.
//!
//! The crate splits the work in two:
//!
//! * [`design`] builds a [`FilterBank`] for a `(frame, order)` pair: the
//!   steady-state kernel, the one-sided transient filters for the sequence
//!   edges, and the differentiators. Designing is the expensive step (a QR
//!   factorization of the polynomial basis) and is done once per parameter
//!   pair.
//! * [`FilterBank::apply`] runs the bank over a sample sequence and returns
//!   one output per input. The edges are handled by the transient filters,
//!   never by padding, and inputs shorter than the frame are re-projected
//!   rather than rejected.
//!
//! # Example
//!
//! ```rust
//! use savgol::design;
//!
//! let bank = design::<f64>(5, 3).unwrap();
//! let samples = [900.0, 920.0, 940.0, 960.0, 980.0];
//! let smoothed = bank.apply(&samples).unwrap();
//!
//! // A straight line is a degree-1 polynomial: it is reproduced exactly,
//! // transient regions included.
//! for (y, x) in smoothed.iter().zip(samples.iter()) {
//!     assert!((y - x).abs() < 1e-9);
//! }
//! ```
//!
//! The scalar type is generic over [`nalgebra::RealField`], so the same
//! code paths serve `f32` and `f64`.

pub mod basis;
pub mod design;
pub mod error;
mod filter;

pub use crate::basis::basis;
pub use crate::design::{design, design_with_weights, FilterBank};
pub use crate::error::{Result, SavgolError};

use nalgebra::RealField;
use num_traits::FromPrimitive;

/// Designs a filter bank and applies it in one call.
///
/// Convenient for one-off smoothing; when the same `(frame, order)` pair is
/// applied to many sequences, design the bank once with [`design`] and reuse
/// it.
///
/// # Example
///
/// ```rust
/// let smoothed = savgol::smooth(5, 2, &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0]).unwrap();
/// assert_eq!(smoothed.len(), 7);
/// ```
pub fn smooth<T>(frame: usize, order: usize, samples: &[T]) -> Result<Vec<T>>
where
    T: RealField + FromPrimitive + Copy,
{
    design::<T>(frame, order)?.apply(samples)
}
