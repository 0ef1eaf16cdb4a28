//! The four basic operations on [`BigFloat`]. Each reduces to a BigNat
//! operation once the operands are aligned on a common binary shift, and the
//! state tag handles the IEEE-754-style special cases.

use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

use super::bignat::BigNat;
use super::float::{BigFloat, State, DIVISION_ACCURACY};

impl BigFloat {
    /// Add `other` to this value, exactly.
    ///
    /// Operands of different shifts are aligned by stretching the mantissa
    /// with the fewer fractional bits, so adding values of very different
    /// magnitudes grows the result mantissa accordingly.
    pub fn inplace_add(&mut self, other: &BigFloat) {
        if self.state == State::Error || other.state == State::Error {
            self.clear();
            self.state = State::Error;
            return;
        }
        if self.state == State::Inf {
            // Opposite infinities cancel into an undefined value.
            if other.state == State::Inf && self.sign != other.sign {
                self.clear();
                self.state = State::Error;
            }
            return;
        }
        if other.state == State::Inf {
            *self = other.clone();
            return;
        }

        // Align both mantissas on the larger shift.
        let mut other_mantissa = other.mantissa.clone();
        match self.shift.cmp(&other.shift) {
            core::cmp::Ordering::Greater => {
                other_mantissa.shift_left((self.shift - other.shift) as usize);
            }
            core::cmp::Ordering::Less => {
                self.mantissa
                    .shift_left((other.shift - self.shift) as usize);
                self.shift = other.shift;
            }
            core::cmp::Ordering::Equal => {}
        }

        if self.sign == other.sign {
            self.mantissa.inplace_add(&other_mantissa);
        } else {
            // Signs differ: the result is the absolute difference, signed
            // by whichever magnitude is larger.
            if other_mantissa > self.mantissa {
                self.sign = other.sign;
            }
            self.mantissa.inplace_sub(&other_mantissa);
        }

        self.normalize();
    }

    /// Subtract `other` from this value, exactly. Defined as addition of the
    /// negated operand.
    pub fn inplace_sub(&mut self, other: &BigFloat) {
        let mut other = other.clone();
        other.sign = !other.sign;
        self.inplace_add(&other);
    }

    /// Multiply this value by `other`, exactly.
    pub fn inplace_mul(&mut self, other: &BigFloat) {
        if self.state == State::Error || other.state == State::Error {
            self.clear();
            self.state = State::Error;
            return;
        }
        // Zero times infinity is undefined.
        if (self.state == State::Inf && other.is_zero())
            || (self.is_zero() && other.state == State::Inf)
        {
            self.clear();
            self.state = State::Error;
            return;
        }

        self.sign ^= other.sign;

        if self.state != State::Inf && other.state != State::Inf {
            self.shift += other.shift;
            self.mantissa.inplace_mul(&other.mantissa);
            self.normalize();
        } else {
            self.clear();
            self.state = State::Inf;
        }
    }

    /// Divide this value by `denominator`. When the quotient is not exactly
    /// representable, [`DIVISION_ACCURACY`] fractional bits are kept.
    pub fn inplace_div(&mut self, denominator: &BigFloat) {
        if self.state == State::Error || denominator.state == State::Error {
            self.clear();
            self.state = State::Error;
            return;
        }
        if self.state == State::Inf && denominator.state == State::Inf {
            self.clear();
            self.state = State::Error;
            return;
        }
        if self.is_zero() && denominator.is_zero() {
            self.clear();
            self.state = State::Error;
            return;
        }

        self.sign ^= denominator.sign;

        if denominator.is_zero() {
            // Division of a non-zero value by zero overflows to infinity.
            self.clear();
            self.state = State::Inf;
        } else if denominator.state == State::Inf {
            self.clear();
        } else if self.state != State::Inf {
            self.shift -= denominator.shift;
            // A mantissa of one means the denominator is a power of two,
            // fully handled by the shift above.
            if denominator.mantissa != BigNat::one() {
                self.shift += self
                    .mantissa
                    .divide(&denominator.mantissa, DIVISION_ACCURACY)
                    as i32;
                self.normalize();
            }
        }
    }
}

macro_rules! declare_float_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident) => {
        // Self + Self
        impl $trait_name for BigFloat {
            type Output = Self;

            fn $func_name(self, rhs: Self) -> Self::Output {
                self.$func_name(&rhs)
            }
        }

        // Self + &Self -> Self
        impl $trait_name<&Self> for BigFloat {
            type Output = Self;
            fn $func_name(self, rhs: &Self) -> Self::Output {
                let mut n = self;
                n.$func_impl_name(rhs);
                n
            }
        }

        // &Self + &Self -> Self
        impl $trait_name<Self> for &BigFloat {
            type Output = BigFloat;
            fn $func_name(self, rhs: Self) -> Self::Output {
                let mut n = self.clone();
                n.$func_impl_name(rhs);
                n
            }
        }

        // &Self + Self -> Self
        impl $trait_name<BigFloat> for &BigFloat {
            type Output = BigFloat;
            fn $func_name(self, rhs: BigFloat) -> Self::Output {
                let mut n = self.clone();
                n.$func_impl_name(&rhs);
                n
            }
        }
    };
}

declare_float_operator!(Add, add, inplace_add);
declare_float_operator!(Sub, sub, inplace_sub);
declare_float_operator!(Mul, mul, inplace_mul);
declare_float_operator!(Div, div, inplace_div);

macro_rules! declare_float_assign_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident) => {
        impl $trait_name for BigFloat {
            fn $func_name(&mut self, rhs: Self) {
                self.$func_impl_name(&rhs);
            }
        }

        impl $trait_name<&BigFloat> for BigFloat {
            fn $func_name(&mut self, rhs: &Self) {
                self.$func_impl_name(rhs);
            }
        }
    };
}

declare_float_assign_operator!(AddAssign, add_assign, inplace_add);
declare_float_assign_operator!(SubAssign, sub_assign, inplace_sub);
declare_float_assign_operator!(MulAssign, mul_assign, inplace_mul);
declare_float_assign_operator!(DivAssign, div_assign, inplace_div);

impl Neg for BigFloat {
    type Output = Self;
    fn neg(self) -> Self {
        BigFloat::neg(&self)
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;
    fn neg(self) -> BigFloat {
        BigFloat::neg(self)
    }
}

#[cfg(test)]
fn edge_values() -> [f64; 6] {
    [
        0.0,
        -0.0,
        1234.5678,
        -1234.5678,
        f64::INFINITY,
        f64::NEG_INFINITY,
    ]
}

#[cfg(test)]
fn assert_matches_host(result: &BigFloat, expected: f64) {
    if expected.is_nan() {
        assert!(result.is_error());
        return;
    }
    assert!(!result.is_error());
    if expected.is_infinite() {
        assert!(result.is_inf());
        assert_eq!(result.is_negative(), expected < 0.0);
        return;
    }
    let got = result.as_f64();
    if expected == 0.0 {
        assert_eq!(got, 0.0);
        return;
    }
    // The conversion back to a host float truncates, so allow an error in
    // the last couple of mantissa bits.
    assert!(
        ((got - expected) / expected).abs() < 1e-12,
        "got {}, expected {}",
        got,
        expected
    );
}

#[cfg(test)]
fn assert_canonical(f: &BigFloat) {
    if f.is_normal() {
        let m = f.get_mantissa();
        assert!(m.get_bit(0) || (m.is_zero() && f.get_shift() == 0));
    }
}

#[test]
fn test_add_edge_cases() {
    for i in edge_values() {
        for j in edge_values() {
            let r = BigFloat::from_f64(i) + BigFloat::from_f64(j);
            assert_matches_host(&r, i + j);
            assert_canonical(&r);
        }
    }
}

#[test]
fn test_sub_edge_cases() {
    for i in edge_values() {
        for j in edge_values() {
            let r = BigFloat::from_f64(i) - BigFloat::from_f64(j);
            assert_matches_host(&r, i - j);
            assert_canonical(&r);
        }
    }
}

#[test]
fn test_mul_edge_cases() {
    for i in edge_values() {
        for j in edge_values() {
            let r = BigFloat::from_f64(i) * BigFloat::from_f64(j);
            assert_matches_host(&r, i * j);
            assert_canonical(&r);
        }
    }
}

#[test]
fn test_div_edge_cases() {
    for i in edge_values() {
        for j in edge_values() {
            let r = BigFloat::from_f64(i) / BigFloat::from_f64(j);
            assert_matches_host(&r, i / j);
            assert_canonical(&r);
        }
    }
}

#[test]
fn test_addition_exact() {
    fn add_helper(a: f64, b: f64) -> f64 {
        (BigFloat::from_f64(a) + BigFloat::from_f64(b)).as_f64()
    }

    assert_eq!(add_helper(0., -4.), -4.);
    assert_eq!(add_helper(-4., 0.), -4.);
    assert_eq!(add_helper(1., 1.), 2.);
    assert_eq!(add_helper(128., -8.), 120.);
    assert_eq!(add_helper(64., -60.), 4.);
    assert_eq!(add_helper(69., 69.), 138.);
    assert_eq!(add_helper(-128., -8.), -136.);
    assert_eq!(add_helper(64., -65.), -1.);
    assert_eq!(add_helper(-15., 15.), 0.);

    for i in -20..20 {
        for j in -20..20 {
            assert_eq!(
                add_helper(f64::from(i), f64::from(j)),
                f64::from(i) + f64::from(j)
            );
        }
    }
}

#[test]
fn test_addition_of_zero_is_identity() {
    let x = BigFloat::from("1.23");
    let z = BigFloat::from("0");
    assert_eq!(&x + &z, x);
    assert_eq!(&z + &x, x);

    // +0 + -0 stays a normal zero.
    let r = BigFloat::zero(false) + BigFloat::zero(true);
    assert!(r.is_zero());
    assert!(!r.is_error());
}

#[test]
fn test_cancellation_leaves_canonical_zero() {
    let a = BigFloat::from_f64(1.5);
    let r = &a - &a.clone();
    assert!(r.is_zero());
    assert_eq!(r.get_shift(), 0);
}

#[test]
fn test_multiplication_exact() {
    fn mul_helper(a: f64, b: f64) -> f64 {
        (BigFloat::from_f64(a) * BigFloat::from_f64(b)).as_f64()
    }

    assert_eq!(mul_helper(1., 1.), 1.);
    assert_eq!(mul_helper(-5., 1.5), -7.5);
    assert_eq!(mul_helper(-5., -1.5), 7.5);
    assert_eq!(mul_helper(0.125, 8.), 1.);

    for i in -20..20 {
        for j in -20..20 {
            assert_eq!(
                mul_helper(f64::from(i), f64::from(j)),
                f64::from(i) * f64::from(j)
            );
        }
    }
}

#[test]
fn test_mul_is_commutative() {
    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();

    for _ in 0..200 {
        let a = BigFloat::from_u64(lfsr.get64());
        let b = BigFloat::from_u64(lfsr.get64());
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&a + &b, &b + &a);
    }
}

#[test]
fn test_division_by_power_of_two_is_exact() {
    // A power-of-two denominator reduces to a pure shift.
    let r = BigFloat::from_f64(5.0) / BigFloat::from_f64(2.0);
    assert_eq!(r.as_f64(), 2.5);
    let r = BigFloat::from_f64(5.0) / BigFloat::from_f64(0.25);
    assert_eq!(r.as_f64(), 20.0);
}

#[test]
fn test_division_exact_quotients() {
    fn div_helper(a: f64, b: f64) -> f64 {
        (BigFloat::from_f64(a) / BigFloat::from_f64(b)).as_f64()
    }

    assert_eq!(div_helper(703., 19.), 37.);
    assert_eq!(div_helper(-12., 3.), -4.);
    assert_eq!(div_helper(1., -8.), -0.125);
}

#[test]
fn test_division_accuracy() {
    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();

    // |(a / b) * b - a| < |a| * 2^-45. The divide keeps 50 fractional
    // bits; a few are lost to the round-trip through the product.
    let bound = BigFloat::from_f64(2f64.powi(-45));
    for _ in 0..200 {
        let a = BigFloat::from_u64(lfsr.get64() | 1);
        let b = BigFloat::from_u64(lfsr.get64() | 1);
        let residue = &(&(&a / &b) * &b) - &a;
        assert!(residue.abs() < &a.abs() * &bound);
    }
}

#[test]
fn test_division_sign_of_zero_and_infinity() {
    // x / inf is zero, x / 0 is infinity with the combined sign.
    let r = BigFloat::from_f64(-4.0) / BigFloat::inf(false);
    assert!(r.is_zero());

    let r = BigFloat::from_f64(-4.0) / BigFloat::zero(false);
    assert!(r.is_inf());
    assert!(r.is_negative());

    let r = BigFloat::from_f64(4.0) / BigFloat::zero(true);
    assert!(r.is_inf());
    assert!(r.is_negative());
}

#[test]
fn test_error_propagates() {
    let e = BigFloat::from("not a number");
    assert!(e.is_error());
    assert!((&e + &BigFloat::from_f64(1.0)).is_error());
    assert!((&BigFloat::from_f64(1.0) - &e).is_error());
    assert!((&e * &e).is_error());
    assert!((&BigFloat::from_f64(1.0) / &e).is_error());
}

#[test]
fn test_inf_absorbs_addition() {
    let inf = BigFloat::inf(false);
    let r = &inf + &BigFloat::from_f64(1e300);
    assert!(r.is_inf() && !r.is_negative());

    let r = BigFloat::inf(true) + BigFloat::inf(true);
    assert!(r.is_inf() && r.is_negative());

    let r = BigFloat::inf(false) + BigFloat::inf(true);
    assert!(r.is_error());
}
