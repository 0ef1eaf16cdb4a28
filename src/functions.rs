//! Square root and absolute value.

use super::float::{
    BigFloat, SQRT_ACCURACY, SQRT_ACCURACY_INCREASE_RATIO,
};

impl BigFloat {
    /// Returns the absolute value of this float.
    pub fn abs(&self) -> Self {
        let mut x = self.clone();
        x.set_sign(false);
        x
    }

    /// Calculate the square root of the number using the Newton-Raphson
    /// method, `x <- x - (x*x - n) / (2*x)`, starting from the number
    /// itself.
    ///
    /// A negative input (a negative zero included) has no result. The
    /// iteration stops once consecutive iterates agree to within
    /// [`SQRT_ACCURACY`], or when the iterate's mantissa has outgrown the
    /// input by [`SQRT_ACCURACY_INCREASE_RATIO`]; each division adds
    /// fractional bits, so the growth cutoff is what normally ends the
    /// search.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_error() {
            return Some(Self::error());
        }
        if self.is_negative() {
            return None;
        }
        // The iteration cannot start from zero or infinity.
        if self.is_zero() || self.is_inf() {
            return Some(self.clone());
        }

        let accuracy = Self::from_f64(SQRT_ACCURACY);
        let max_size = self.get_mantissa().len() * SQRT_ACCURACY_INCREASE_RATIO;
        let two = Self::from_u64(2);
        let mut curr = self.clone();

        loop {
            let next =
                &curr - &(&(&(&curr * &curr) - self) / &(&curr * &two));

            if (&next.abs() - &curr.abs()).abs() < accuracy {
                break;
            }
            if next.get_mantissa().len() > max_size {
                break;
            }
            curr = next;
        }

        Some(curr)
    }
}

#[cfg(test)]
fn assert_close(value: Option<BigFloat>, expected: f64, tolerance: f64) {
    let value = value.expect("expected a result");
    let got = value.as_f64();
    assert!(
        (got - expected).abs() <= tolerance,
        "got {}, expected {}",
        got,
        expected
    );
}

#[test]
fn test_sqrt_of_squares() {
    assert_close(BigFloat::from_f64(4.0).sqrt(), 2.0, 1e-2);
    assert_close(BigFloat::from_f64(2.25).sqrt(), 1.5, 1e-3);
    assert_close(BigFloat::from_f64(0.25).sqrt(), 0.5, 1e-2);
    assert_close(BigFloat::from_f64(1.0).sqrt(), 1.0, 1e-12);
}

#[test]
fn test_sqrt_domain() {
    // Negative inputs, the negative zero included, have no square root.
    assert!(BigFloat::from_f64(-4.0).sqrt().is_none());
    assert!(BigFloat::from_f64(-0.0).sqrt().is_none());

    // The error state propagates through.
    let r = BigFloat::from("junk").sqrt();
    assert!(r.expect("error propagates").is_error());

    // Zero and infinity are their own roots.
    assert!(BigFloat::from_f64(0.0).sqrt().expect("zero").is_zero());
    let inf = BigFloat::inf(false).sqrt().expect("inf");
    assert!(inf.is_inf() && !inf.is_negative());
}

#[test]
fn test_abs() {
    assert_eq!(BigFloat::from_f64(-4.5).abs(), BigFloat::from_f64(4.5));
    assert_eq!(BigFloat::from_f64(4.5).abs(), BigFloat::from_f64(4.5));
    assert!(!BigFloat::from_f64(-0.0).abs().is_negative());
    assert!(!BigFloat::inf(true).abs().is_negative());
}
