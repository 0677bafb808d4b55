use log::debug;
use nalgebra::{DMatrix, RealField};
use num_traits::FromPrimitive;

use crate::design::{project, FilterBank};
use crate::error::{Result, SavgolError};

impl<T> FilterBank<T>
where
    T: RealField + FromPrimitive + Copy,
{
    /// Filters a sequence of samples, returning one smoothed value per input
    /// sample.
    ///
    /// The interior of the sequence is convolved with the steady-state
    /// kernel. The first and last `(frame - 1) / 2` outputs come from the
    /// one-sided transient filters of the bank, fitted over the first and
    /// last full window respectively, so no padding or signal extension is
    /// ever invented.
    ///
    /// Sequences shorter than the frame are still filtered: the bank is
    /// re-projected onto as many window offsets as there are samples (see
    /// [`FilterBank::rank`] for how degenerate fits are truncated). An empty
    /// input is an error.
    ///
    /// # Arguments
    ///
    /// * `samples` - Input sequence, oldest sample first
    ///
    /// # Returns
    ///
    /// The filtered sequence, same length as `samples`
    ///
    /// # Example
    ///
    /// ```rust
    /// let bank = savgol::design::<f64>(5, 3).unwrap();
    /// let smoothed = bank.apply(&[900.0, 920.0, 940.0, 960.0, 980.0]).unwrap();
    /// assert!((smoothed[0] - 900.0).abs() < 1e-9);
    /// ```
    pub fn apply(&self, samples: &[T]) -> Result<Vec<T>> {
        if samples.is_empty() {
            return Err(SavgolError::EmptyInput);
        }
        let n = samples.len();
        if n < self.frame {
            return self.apply_short(samples);
        }

        let half = (self.frame - 1) / 2;
        let mut filtered = Vec::with_capacity(n);

        // Leading transient: the outer rows of B, bottom-up, against the
        // first window reversed.
        let head = &samples[..self.frame];
        for i in 0..half {
            filtered.push(dot_reversed(&self.filters, self.frame - 1 - i, head));
        }

        // Steady state: the centered filter slides over every fully
        // populated window.
        let mid = self.frame / 2;
        for center in half..n - half {
            let window = &samples[center - half..=center + half];
            filtered.push(dot_column(&self.filters, mid, window));
        }

        // Trailing transient: the rows above the middle one, bottom-up,
        // against the last window reversed.
        let tail = &samples[n - self.frame..];
        for i in 0..half {
            filtered.push(dot_reversed(&self.filters, half - 1 - i, tail));
        }

        Ok(filtered)
    }

    /// Filters a sequence shorter than the frame by projecting onto the
    /// window offsets the samples can cover.
    ///
    /// The first `ceil(n / 2)` outputs use the fit anchored at the leading
    /// edge of the window (the first `n` basis rows), the rest the fit
    /// anchored at the trailing edge. Polynomials of degree at most the
    /// bank's order are still reproduced exactly; once `n` drops to
    /// `order + 1` or below the fit interpolates and the input passes
    /// through unchanged.
    fn apply_short(&self, samples: &[T]) -> Result<Vec<T>> {
        let n = samples.len();
        debug!(
            "short input: {} samples against a {}-point frame",
            n, self.frame
        );

        let weights = DMatrix::<T>::identity(n, n);
        let head = self.design.rows(0, n).into_owned();
        let tail = self.design.rows(self.frame - n, n).into_owned();
        let (b_head, _, _) = project(&head, &weights)?;
        let (b_tail, _, _) = project(&tail, &weights)?;

        let split = n.div_ceil(2);
        let mut filtered = Vec::with_capacity(n);
        for i in 0..split {
            filtered.push(dot_row(&b_head, i, samples));
        }
        for i in split..n {
            filtered.push(dot_row(&b_tail, i, samples));
        }

        Ok(filtered)
    }
}

fn dot_row<T>(filters: &DMatrix<T>, row: usize, window: &[T]) -> T
where
    T: RealField + Copy,
{
    window
        .iter()
        .enumerate()
        .fold(T::zero(), |acc, (j, &x)| acc + filters[(row, j)] * x)
}

fn dot_column<T>(filters: &DMatrix<T>, column: usize, window: &[T]) -> T
where
    T: RealField + Copy,
{
    window
        .iter()
        .enumerate()
        .fold(T::zero(), |acc, (j, &x)| acc + filters[(j, column)] * x)
}

/// Dot product of a filter row with a window traversed newest-first. The
/// transient filters are fitted in window coordinates, so the edge of the
/// sequence has to meet the edge of the window.
fn dot_reversed<T>(filters: &DMatrix<T>, row: usize, window: &[T]) -> T
where
    T: RealField + Copy,
{
    window
        .iter()
        .rev()
        .enumerate()
        .fold(T::zero(), |acc, (j, &x)| acc + filters[(row, j)] * x)
}
