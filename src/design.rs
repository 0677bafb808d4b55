use log::debug;
use nalgebra::{DMatrix, DVector, RealField};
use num_traits::FromPrimitive;

use crate::basis::basis;
use crate::error::{Result, SavgolError};

/// A designed bank of Savitzky-Golay FIR filters for one `(frame, order)` pair.
///
/// Column `c` of the filter matrix holds the coefficients that estimate the
/// smoothed value when the window is positioned so that sample `c` sits at the
/// filter's reference offset; the column at `frame / 2` is the steady-state
/// (centered) filter, the outer columns are the one-sided transient filters
/// used at the edges of a finite sequence.
///
/// A bank is immutable once designed and carries no hidden state; designing
/// twice with the same inputs yields identical banks.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank<T: RealField> {
    pub(crate) frame: usize,
    pub(crate) order: usize,
    pub(crate) rank: usize,
    /// The frame x frame filter matrix B.
    pub(crate) filters: DMatrix<T>,
    /// The matrix of differentiators G (frame x rank).
    pub(crate) differentiators: DMatrix<T>,
    /// The real-valued design matrix S (frame x order+1).
    pub(crate) design: DMatrix<T>,
}

impl<T> FilterBank<T>
where
    T: RealField + FromPrimitive + Copy,
{
    /// Number of samples spanned by the filter window.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Order of the local polynomial fit.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Numerical rank of the weighted design matrix, as reported by the
    /// factorization. Equals `order + 1` for a well-conditioned design.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The full filter-coefficient matrix B.
    pub fn filters(&self) -> &DMatrix<T> {
        &self.filters
    }

    /// The matrix of differentiators G; column `d` estimates the `d`-th
    /// polynomial coefficient of the local fit.
    pub fn differentiators(&self) -> &DMatrix<T> {
        &self.differentiators
    }

    /// The design matrix S: the polynomial regressors evaluated at each
    /// window offset.
    pub fn design_matrix(&self) -> &DMatrix<T> {
        &self.design
    }

    /// The steady-state smoothing kernel: the middle column of B, convolved
    /// with each fully populated window in the interior of a sequence.
    ///
    /// For `frame = 5` and order 2 or 3 this is the classic
    /// `[-3, 12, 17, 12, -3] / 35` kernel.
    pub fn steady_kernel(&self) -> DVector<T> {
        self.filters.column(self.frame / 2).into_owned()
    }

    /// The FIR kernel whose dot product with a centered window estimates the
    /// `deriv`-th derivative of the signal at the window center (unit sample
    /// spacing).
    ///
    /// A derivative order above the polynomial order yields the zero kernel:
    /// the local fit carries no such component. Orders the factorization could
    /// not resolve (a rank-deficient design) are an error.
    pub fn derivative_kernel(&self, deriv: usize) -> Result<DVector<T>> {
        if deriv > self.order {
            return Ok(DVector::zeros(self.frame));
        }
        if deriv >= self.rank {
            return Err(SavgolError::SingularDesign(self.rank));
        }

        let mut scale = T::one();
        for q in 1..=deriv {
            scale *= T::from_usize(q).expect("factorial term is representable in the scalar type");
        }
        Ok(self.differentiators.column(deriv) * scale)
    }
}

/// Designs a Savitzky-Golay filter bank with identity weighting.
///
/// The basis matrix for `frame` is truncated to its leftmost `order + 1`
/// columns, factored by a Householder QR decomposition, and assembled into
/// the filter matrix `B = G * S^T * W` where `G` honors the numerical rank
/// reported by the factorization (see [`design_with_weights`] for the exact
/// steps).
///
/// # Arguments
///
/// * `frame` - Window width in samples (must be odd and at least 1)
/// * `order` - Degree of the local polynomial fit (must be less than `frame`)
///
/// # Returns
///
/// The designed [`FilterBank`]
///
/// # Example
///
/// ```rust
/// let bank = savgol::design::<f64>(5, 3).unwrap();
/// assert_eq!(bank.rank(), 4);
/// assert_eq!(bank.filters().nrows(), 5);
/// ```
pub fn design<T>(frame: usize, order: usize) -> Result<FilterBank<T>>
where
    T: RealField + FromPrimitive + Copy,
{
    if frame == 0 {
        return Err(SavgolError::InvalidFrameLength(frame));
    }
    let weights = DMatrix::<T>::identity(frame, frame);
    design_with_weights(frame, order, &weights)
}

/// Designs a Savitzky-Golay filter bank with an explicit weighting matrix.
///
/// The weighting matrix enters the least-squares fit as `inter = W * S`; the
/// default (and the only weighting exercised by the reference behavior) is
/// identity. `weights` must be `frame` x `frame`.
///
/// The steps, in order: truncate the basis to `order + 1` columns and promote
/// to the scalar type; form `inter`; factor it by QR; take the numerical rank
/// `r` of `inter` as authoritative; invert the top-left `r` x `r` block of the
/// triangular factor by back substitution; form `G = S * Rinv * Rinv^T` over
/// the leading `r` basis columns and `B = G * S^T * W`.
pub fn design_with_weights<T>(
    frame: usize,
    order: usize,
    weights: &DMatrix<T>,
) -> Result<FilterBank<T>>
where
    T: RealField + FromPrimitive + Copy,
{
    if frame == 0 {
        return Err(SavgolError::InvalidFrameLength(frame));
    }
    if frame % 2 == 0 {
        return Err(SavgolError::EvenFrameLength(frame));
    }
    if order >= frame {
        return Err(SavgolError::InvalidPolynomialOrder(order, frame));
    }
    if weights.nrows() != frame || weights.ncols() != frame {
        return Err(SavgolError::InvalidWeighting {
            frame,
            rows: weights.nrows(),
            cols: weights.ncols(),
        });
    }

    let a = basis(frame)?;
    let design = promote::<T>(&a, order + 1);
    let (filters, differentiators, rank) = project(&design, weights)?;

    debug!(
        "designed filter bank: frame={}, order={}, rank={}",
        frame, order, rank
    );

    Ok(FilterBank {
        frame,
        order,
        rank,
        filters,
        differentiators,
        design,
    })
}

/// Least-squares projection honoring the numerical rank: returns
/// `(B, G, rank)` for a design matrix `s` and weighting `weights`.
///
/// Shared by the full-frame design and by the short-input path of the
/// applicator, which projects onto row-truncated design matrices.
pub(crate) fn project<T>(
    s: &DMatrix<T>,
    weights: &DMatrix<T>,
) -> Result<(DMatrix<T>, DMatrix<T>, usize)>
where
    T: RealField + FromPrimitive + Copy,
{
    let inter = weights * s;

    let rank = numerical_rank(&inter);
    if rank == 0 {
        return Err(SavgolError::SingularDesign(rank));
    }

    let r = inter.qr().r();
    // Invert the non-degenerate triangular sub-block by back substitution; a
    // dense inverse would amplify the conditioning error of the basis.
    let r_block = r.view((0, 0), (rank, rank)).into_owned();
    let rinv = r_block
        .solve_upper_triangular(&DMatrix::<T>::identity(rank, rank))
        .ok_or(SavgolError::SingularDesign(rank))?;

    let s_lead = s.columns(0, rank).into_owned();
    let g = &s_lead * (&rinv * rinv.transpose());
    let b = &g * (s_lead.transpose() * weights);

    Ok((b, g, rank))
}

/// Numerical rank via the singular values, with the standard relative cutoff
/// `max(nrows, ncols) * eps * sigma_max`.
fn numerical_rank<T>(m: &DMatrix<T>) -> usize
where
    T: RealField + FromPrimitive + Copy,
{
    let svd = m.clone().svd(false, false);
    let sigma_max = svd
        .singular_values
        .iter()
        .fold(T::zero(), |acc, &s| if s > acc { s } else { acc });
    if sigma_max == T::zero() {
        return 0;
    }

    let dim = T::from_usize(m.nrows().max(m.ncols()))
        .expect("matrix dimension is representable in the scalar type");
    let cutoff = dim * T::default_epsilon() * sigma_max;
    svd.singular_values.iter().filter(|&&s| s > cutoff).count()
}

fn promote<T>(a: &DMatrix<i64>, columns: usize) -> DMatrix<T>
where
    T: RealField + FromPrimitive,
{
    a.columns(0, columns)
        .map(|e| T::from_i64(e).expect("integer basis entry is representable in the scalar type"))
}
