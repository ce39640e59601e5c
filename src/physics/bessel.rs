//! Bessel functions of the first kind and their positive zeros.
//!
//! J0 and J1 use the classic rational approximations (accurate to roughly
//! 1e-8 in the small-argument branch, with the standard asymptotic form
//! beyond |x| = 8); higher orders use upward recurrence when it is stable
//! (x > n) and Miller's normalised downward recurrence otherwise. Zeros are
//! located by Newton refinement of McMahon's asymptotic estimate.

use std::f64::consts::PI;

/// Evaluates the Bessel function of the first kind J_n(x).
///
/// # Examples
///
/// ```
/// use drumhead::physics::bessel_j;
///
/// assert!((bessel_j(0, 0.0) - 1.0).abs() < 1e-8);
/// assert!(bessel_j(1, 0.0).abs() < 1e-12);
/// ```
pub fn bessel_j(order: usize, x: f64) -> f64 {
    match order {
        0 => bessel_j0(x),
        1 => bessel_j1(x),
        n => bessel_jn(n, x),
    }
}

/// The k-th positive zero of J_n, for k >= 1.
///
/// # Examples
///
/// ```
/// use drumhead::physics::bessel_j_zero;
///
/// assert!((bessel_j_zero(0, 1) - 2.404825557695773).abs() < 1e-6);
/// assert!((bessel_j_zero(1, 1) - 3.831705970207512).abs() < 1e-6);
/// ```
pub fn bessel_j_zero(order: usize, k: usize) -> f64 {
    let n = order as f64;
    let k = k.max(1) as f64;

    // McMahon's asymptotic expansion as the starting estimate.
    let beta = (k + 0.5 * n - 0.25) * PI;
    let mu = 4.0 * n * n;
    let mut x = beta
        - (mu - 1.0) / (8.0 * beta)
        - 4.0 * (mu - 1.0) * (7.0 * mu - 31.0) / (3.0 * (8.0 * beta).powi(3));

    for _ in 0..64 {
        let f = bessel_j(order, x);
        let fp = if order == 0 {
            -bessel_j1(x)
        } else {
            bessel_j(order - 1, x) - n / x * f
        };
        let dx = f / fp;
        x -= dx;
        if dx.abs() < 1e-13 {
            break;
        }
    }
    x
}

fn bessel_j0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let p = 57568490574.0
            + y * (-13362590354.0
                + y * (651619640.7
                    + y * (-11214424.18 + y * (77392.33017 + y * (-184.9052456)))));
        let q = 57568490411.0
            + y * (1029532985.0
                + y * (9494680.718 + y * (59272.64853 + y * (267.8532712 + y))));
        p / q
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 0.785398164;
        let p = 1.0
            + y * (-0.1098628627e-2
                + y * (0.2734510407e-4 + y * (-0.2073370639e-5 + y * 0.2093887211e-6)));
        let q = -0.1562499995e-1
            + y * (0.1430488765e-3
                + y * (-0.6911147651e-5 + y * (0.7621095161e-6 + y * (-0.934935152e-7))));
        (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q)
    }
}

fn bessel_j1(x: f64) -> f64 {
    let ax = x.abs();
    let ans = if ax < 8.0 {
        let y = x * x;
        let p = x
            * (72362614232.0
                + y * (-7895059235.0
                    + y * (242396853.1
                        + y * (-2972611.439 + y * (15704.48260 + y * (-30.16036606))))));
        let q = 144725228442.0
            + y * (2300535178.0
                + y * (18583304.74 + y * (99447.43394 + y * (376.9991397 + y))));
        p / q
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 2.356194491;
        let p = 1.0
            + y * (0.183105e-2
                + y * (-0.3516396496e-4 + y * (0.2457520174e-5 + y * (-0.240337019e-6))));
        let q = 0.04687499995
            + y * (-0.2002690873e-3
                + y * (0.8449199096e-5 + y * (-0.88228987e-6 + y * 0.105787412e-6)));
        (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q)
    };
    if x < 0.0 { -ans } else { ans }
}

fn bessel_jn(n: usize, x: f64) -> f64 {
    const ACC: f64 = 40.0;
    const BIG: f64 = 1e10;
    const BIG_INV: f64 = 1e-10;

    let ax = x.abs();
    if ax == 0.0 {
        return 0.0;
    }

    let tox = 2.0 / ax;
    let mut ans;
    if ax > n as f64 {
        // Upward recurrence is stable above the turning point.
        let mut bjm = bessel_j0(ax);
        let mut bj = bessel_j1(ax);
        for j in 1..n {
            let bjp = j as f64 * tox * bj - bjm;
            bjm = bj;
            bj = bjp;
        }
        ans = bj;
    } else {
        // Miller's downward recurrence, normalised by the summed series.
        let m = 2 * ((n + (ACC * n as f64).sqrt() as usize) / 2);
        let mut jsum = false;
        let mut sum = 0.0;
        let mut bjp = 0.0;
        let mut bj = 1.0;
        ans = 0.0;
        for j in (1..=m).rev() {
            let bjm = j as f64 * tox * bj - bjp;
            bjp = bj;
            bj = bjm;
            if bj.abs() > BIG {
                bj *= BIG_INV;
                bjp *= BIG_INV;
                ans *= BIG_INV;
                sum *= BIG_INV;
            }
            if jsum {
                sum += bj;
            }
            jsum = !jsum;
            if j == n {
                ans = bjp;
            }
        }
        sum = 2.0 * sum - bj;
        ans /= sum;
    }
    if x < 0.0 && n % 2 == 1 { -ans } else { ans }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j0_reference_values() {
        assert!((bessel_j(0, 0.0) - 1.0).abs() < 1e-8);
        assert!((bessel_j(0, 1.0) - 0.7651976865579666).abs() < 1e-7);
        assert!((bessel_j(0, 5.0) - (-0.17759677131433830)).abs() < 1e-7);
        assert!((bessel_j(0, 10.0) - (-0.24593576445134835)).abs() < 1e-7);
    }

    #[test]
    fn test_j1_reference_values() {
        assert!(bessel_j(1, 0.0).abs() < 1e-10);
        assert!((bessel_j(1, 1.0) - 0.4400505857449335).abs() < 1e-7);
        assert!((bessel_j(1, 5.0) - (-0.3275791375914652)).abs() < 1e-7);
        // J1 is odd.
        assert!((bessel_j(1, -1.0) + bessel_j(1, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_higher_order_reference_values() {
        assert!((bessel_j(2, 1.0) - 0.11490348493190048).abs() < 1e-7);
        assert!((bessel_j(5, 10.0) - (-0.23406152818679364)).abs() < 1e-7);
        assert!((bessel_j(10, 1.0) - 2.630615123687453e-10).abs() < 1e-12);
    }

    #[test]
    fn test_zero_values() {
        // First three zeros of J0 and the first of J1 and J2. The tolerance
        // reflects the accuracy of the rational approximations, not Newton's.
        assert!((bessel_j_zero(0, 1) - 2.404825557695773).abs() < 1e-6);
        assert!((bessel_j_zero(0, 2) - 5.520078110286311).abs() < 1e-6);
        assert!((bessel_j_zero(0, 3) - 8.653727912911013).abs() < 1e-6);
        assert!((bessel_j_zero(1, 1) - 3.831705970207512).abs() < 1e-6);
        assert!((bessel_j_zero(2, 1) - 5.135622301840683).abs() < 1e-6);
        // A higher-order first zero, where the asymptotic guess is weakest.
        assert!((bessel_j_zero(10, 1) - 14.475500686554541).abs() < 1e-6);
    }

    #[test]
    fn test_zeros_are_zeros_and_increase() {
        for order in 0..8 {
            let mut previous = 0.0;
            for k in 1..=5 {
                let z = bessel_j_zero(order, k);
                assert!(z > previous);
                assert!(bessel_j(order, z).abs() < 1e-8);
                previous = z;
            }
        }
    }
}
