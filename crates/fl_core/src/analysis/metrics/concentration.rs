//! # Concentration Module
//!
//! Herfindahl-Hirschman Index over exposure counts - the batch-level
//! chalk/diversity proxy.
//!
//! ## Background
//!
//! HHI is the sum of squared shares of a distribution:
//! - 1/n = every participant has an equal share (n participants)
//! - 1.0 = one participant holds everything
//!
//! For a lineup batch:
//! - Low HHI: exposure spread widely across the pool
//! - High HHI: the batch concentrates on a few chalk players

/// Calculate the Herfindahl-Hirschman Index from a slice of counts.
///
/// Shares are `count_i / Σcount`; the result is `Σ share_i²`.
///
/// # Returns
/// * `Some(hhi)` - HHI in [0.0, 1.0]
/// * `None` - If input is empty
///
/// # Examples
/// ```
/// use fl_core::analysis::metrics::concentration::herfindahl_index;
///
/// // Uniform distribution over 10 players → HHI = 0.1
/// let uniform = [5.0f64; 10];
/// assert!((herfindahl_index(&uniform).unwrap() - 0.1).abs() < 1e-12);
///
/// // Complete monopoly → HHI = 1.0
/// let monopoly = [12.0f64, 0.0, 0.0, 0.0];
/// assert_eq!(herfindahl_index(&monopoly).unwrap(), 1.0);
/// ```
pub fn herfindahl_index(counts: &[f64]) -> Option<f64> {
    if counts.is_empty() {
        return None;
    }

    let sum: f64 = counts.iter().sum();
    if sum <= 0.0 {
        // No selections at all - treat as perfectly unconcentrated.
        return Some(0.0);
    }

    let hhi = counts.iter().map(|&c| (c / sum) * (c / sum)).sum::<f64>();

    // Clamp to [0, 1] to absorb floating point error.
    Some(hhi.clamp(0.0, 1.0))
}
