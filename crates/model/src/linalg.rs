//! Dense solve for the small normal-equation systems.

use ndarray::{Array1, Array2};

/// A pivot that has shrunk below this fraction of its original diagonal
/// entry marks a column that is a linear combination of earlier columns.
const DEPENDENCE_TOLERANCE: f64 = 1e-10;

/// Solution of a normal-equation system.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Solution {
    /// Coefficients; dependent columns are exactly zero.
    pub(crate) x: Array1<f64>,
    /// Columns dropped as linearly dependent on earlier ones, ascending.
    pub(crate) dependent: Vec<usize>,
}

/// Solves `a * x = b` for a symmetric positive semi-definite `a` (a Gram
/// matrix `XᵀX`) by symmetric Gaussian elimination in column order.
///
/// Rank deficiency is not an error: a column whose pivot vanishes relative
/// to its own diagonal is skipped and receives a zero coefficient, so the
/// result is a least-squares solution over the remaining columns.
///
/// Consumes `a` and `b` as scratch space.
pub(crate) fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Solution {
    let n = b.len();
    debug_assert_eq!(a.dim(), (n, n));

    let diag: Vec<f64> = (0..n).map(|i| a[[i, i]]).collect();
    let mut kept = vec![true; n];

    // Forward elimination
    for col in 0..n {
        let pivot = a[[col, col]];
        // Also catches zero columns and negative round-off.
        if !(pivot > DEPENDENCE_TOLERANCE * diag[col]) {
            kept[col] = false;
            continue;
        }

        for row in (col + 1)..n {
            let factor = a[[row, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                let upper = a[[col, j]];
                a[[row, j]] -= factor * upper;
            }
            let upper = b[col];
            b[row] -= factor * upper;
        }
    }

    // Back substitution over the kept columns
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        if !kept[i] {
            continue;
        }
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[[i, j]] * x[j];
        }
        x[i] = sum / a[[i, i]];
    }

    let dependent = (0..n).filter(|&i| !kept[i]).collect();
    Solution { x, dependent }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn solves_small_system() {
        // 2x + y = 5, x + 3y = 10  =>  x = 1, y = 3
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![5.0, 10.0];
        let s = solve(a, b);
        assert_relative_eq!(s.x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(s.x[1], 3.0, epsilon = 1e-12);
        assert!(s.dependent.is_empty());
    }

    #[test]
    fn duplicated_column_gets_zero() {
        // Gram matrix of columns u and 2u with |u|² = 1, rhs = Xᵀy for y = u
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![1.0, 2.0];
        let s = solve(a, b);
        assert_eq!(s.dependent, vec![1]);
        assert_relative_eq!(s.x[0], 1.0, epsilon = 1e-12);
        assert_eq!(s.x[1], 0.0);
    }

    #[test]
    fn zero_column_is_dropped() {
        let a = array![[0.0, 0.0], [0.0, 2.0]];
        let b = array![0.0, 4.0];
        let s = solve(a, b);
        assert_eq!(s.dependent, vec![0]);
        assert_relative_eq!(s.x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn combination_of_earlier_columns_is_dropped() {
        // Columns c0, c1 and c0 + c1 of a 3-row design matrix
        let x = array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 2.0]];
        let y = array![1.0, 2.0, 3.0];
        let s = solve(x.t().dot(&x), x.t().dot(&y));
        assert_eq!(s.dependent, vec![2]);
        let fitted = x.dot(&s.x);
        for (f, t) in fitted.iter().zip(y.iter()) {
            assert_relative_eq!(*f, *t, epsilon = 1e-10);
        }
    }

    #[test]
    fn empty_system_is_trivial() {
        let s = solve(Array2::zeros((0, 0)), Array1::zeros(0));
        assert!(s.x.is_empty());
        assert!(s.dependent.is_empty());
    }
}
