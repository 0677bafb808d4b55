use nalgebra::DMatrix;

use crate::error::{Result, SavgolError};

/// Computes the polynomial basis (Vandermonde) matrix for a window of `frame` samples.
///
/// Row `i`, column `j` holds `v[i]^j`, where `v` is the integer offset vector
/// `-(frame-1)/2, ..., (frame-1)/2` running over the window. Column 0 is therefore
/// all ones and the columns together form the polynomial regressor basis that the
/// filter design truncates to its chosen order.
///
/// Even frame lengths are accepted by construction but produce an asymmetric
/// offset range (the integer half-width truncates), which breaks the symmetric
/// window assumption of the filter design; they are unsupported for filtering
/// and rejected there.
///
/// # Arguments
///
/// * `frame` - Number of samples spanned by the window (must be at least 1)
///
/// # Returns
///
/// The `frame` x `frame` integer basis matrix
///
/// # Example
///
/// ```rust
/// let a = savgol::basis(5).unwrap();
/// // Offset -2 raised to powers 0..=4:
/// assert_eq!(a.row(0).iter().copied().collect::<Vec<i64>>(), vec![1, -2, 4, -8, 16]);
/// ```
pub fn basis(frame: usize) -> Result<DMatrix<i64>> {
    if frame == 0 {
        return Err(SavgolError::InvalidFrameLength(frame));
    }

    let half = (frame as i64 - 1) / 2;
    let mut a = DMatrix::<i64>::zeros(frame, frame);

    for i in 0..frame {
        let v = i as i64 - half;
        for j in 0..frame {
            // The highest power is v^(frame-1); past |v| = 9 that no longer
            // fits in an i64, so the overflow is surfaced rather than wrapped.
            a[(i, j)] = v
                .checked_pow(j as u32)
                .ok_or(SavgolError::FrameTooLarge(frame))?;
        }
    }

    Ok(a)
}
