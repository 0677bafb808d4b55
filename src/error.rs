use std::fmt;

/// Error types for Savitzky-Golay basis, design and filtering operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavgolError {
    /// Frame length is zero; a window must span at least one sample
    InvalidFrameLength(usize),
    /// Frame length whose highest basis power overflows a signed 64-bit integer
    FrameTooLarge(usize),
    /// Even frame length; the window has no center sample
    EvenFrameLength(usize),
    /// Polynomial order must be strictly less than the frame length
    InvalidPolynomialOrder(usize, usize),
    /// Supplied weighting matrix does not match the frame dimensions
    InvalidWeighting {
        frame: usize,
        rows: usize,
        cols: usize,
    },
    /// The rank-revealing triangular factor is singular to machine precision
    SingularDesign(usize),
    /// Empty sample sequence passed to the applicator
    EmptyInput,
}

impl fmt::Display for SavgolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavgolError::InvalidFrameLength(frame) => {
                write!(
                    f,
                    "Invalid frame length: {}. The window must span at least one sample",
                    frame
                )
            }
            SavgolError::FrameTooLarge(frame) => {
                write!(
                    f,
                    "Frame length {} overflows the integer polynomial basis; \
                     the largest supported odd frame is 19",
                    frame
                )
            }
            SavgolError::EvenFrameLength(frame) => {
                write!(
                    f,
                    "Even frame length: {}. A symmetric window needs an odd number of samples",
                    frame
                )
            }
            SavgolError::InvalidPolynomialOrder(order, frame) => {
                write!(
                    f,
                    "Invalid polynomial order: {}. Must be less than the frame length ({})",
                    order, frame
                )
            }
            SavgolError::InvalidWeighting { frame, rows, cols } => {
                write!(
                    f,
                    "Weighting matrix is {}x{}, expected {}x{}",
                    rows, cols, frame, frame
                )
            }
            SavgolError::SingularDesign(rank) => {
                write!(
                    f,
                    "Design matrix is singular to machine precision (numerical rank {})",
                    rank
                )
            }
            SavgolError::EmptyInput => {
                write!(f, "Empty sample sequence")
            }
        }
    }
}

impl std::error::Error for SavgolError {}

/// Result type for Savitzky-Golay operations
pub type Result<T> = std::result::Result<T, SavgolError>;
