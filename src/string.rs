//! Decimal string conversions for [`BigFloat`].
//!
//! Parsing accepts `[+-]digits[.digits][e[+-]digits]` and reports anything
//! else through the error state rather than a panic or a `Result`. The
//! fractional part is converted to binary with an iteration-bounded
//! long-division loop, so string construction is approximate; see
//! [`CONSTRUCTOR_MAX_ITERATIONS`].

extern crate alloc;

use alloc::string::{String, ToString};

use super::bignat::BigNat;
use super::float::{BigFloat, State, CONSTRUCTOR_MAX_ITERATIONS};

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Move the decimal point of `whole.decimal` by `exp` places to the right
/// (negative moves left), padding with zeros when the digits run out.
/// `12.34e4` becomes `123400.`, and `12.34e-3` becomes `0.01234`.
fn shift_point(whole: &str, decimal: &str, exp: i32) -> (String, String) {
    if exp > 0 {
        let exp = exp as usize;
        if decimal.len() > exp {
            let mut w = String::from(whole);
            w.push_str(&decimal[..exp]);
            (w, String::from(&decimal[exp..]))
        } else {
            let mut w = String::from(whole);
            w.push_str(decimal);
            w.push_str(&"0".repeat(exp - decimal.len()));
            (w, String::new())
        }
    } else {
        let exp = exp.unsigned_abs() as usize;
        if whole.len() > exp {
            let at = whole.len() - exp;
            let mut d = String::from(&whole[at..]);
            d.push_str(decimal);
            (String::from(&whole[..at]), d)
        } else {
            let mut d = "0".repeat(exp - whole.len());
            d.push_str(whole);
            d.push_str(decimal);
            (String::new(), d)
        }
    }
}

impl BigFloat {
    /// Parse a decimal string. A malformed input yields an error-state value
    /// instead of a failure: the numeric parts must be plain digit runs, the
    /// whole part must be present, and an exponent marker must be followed
    /// by an integer.
    pub fn from_decimal_str(input: &str) -> Self {
        let (sign, rest) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            Some(_) => (false, input),
            None => return Self::error(),
        };

        let (number, exp_str) = match rest.find(|c| c == 'e' || c == 'E') {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };

        let (whole, decimal) = match number.find('.') {
            Some(pos) => (&number[..pos], &number[pos + 1..]),
            None => (number, ""),
        };

        if whole.is_empty() || !is_digits(whole) || !is_digits(decimal) {
            return Self::error();
        }

        let exp: i32 = match exp_str {
            None => 0,
            Some(s) => match s.parse() {
                Ok(exp) => exp,
                Err(_) => return Self::error(),
            },
        };

        // Trailing zeros of the fraction carry no value; dropping them here
        // keeps the expansion loop bound tight.
        let decimal = decimal.trim_end_matches('0');

        let (whole, decimal) = if exp != 0 {
            shift_point(whole, decimal, exp)
        } else {
            (String::from(whole), String::from(decimal))
        };

        let mut f = Self::zero(sign);
        f.mantissa = BigNat::from_decimal_str(&whole);

        if !decimal.is_empty() {
            // Long-divide the fraction by 10^digits, one binary digit per
            // round, until it terminates or the iteration budget runs out.
            let mut decimals = BigNat::from_decimal_str(&decimal);
            let one = BigNat::pow10(decimal.len());
            let limit = (CONSTRUCTOR_MAX_ITERATIONS * decimal.len()) as i32;

            while !decimals.is_zero() && f.shift < limit {
                f.mantissa.shift_left(1);
                decimals.shift_left(1);
                if decimals >= one {
                    f.mantissa.set_bit(0, true);
                    decimals.inplace_sub(&one);
                }
                f.shift += 1;
            }
        }

        f.normalize();
        f
    }

    /// Render the value in base 10, in the form `[-]D.Ddddd[e+-N]` with one
    /// digit ahead of the point. The exponent is omitted for magnitudes in
    /// `[1, 10)`. `precision` caps the number of emitted fraction digits;
    /// zero means all the representation holds.
    pub fn to_decimal_string(&self, precision: usize) -> String {
        let sign = if self.sign { "-" } else { "" };
        match self.state {
            State::Error => return String::from("NaN"),
            State::Inf => return [sign, "Inf"].concat(),
            State::Normal => {}
        }

        if self.mantissa.is_zero() {
            return [sign, "0.0"].concat();
        }

        let bits = self.mantissa.msb_index();
        let head;
        let mut tail = String::new();
        let exp: i64;

        if self.shift <= 0 {
            // A whole number: restore the elided trailing zero bits and
            // print the integer.
            let mut whole = self.mantissa.clone();
            whole.shift_left(self.shift.unsigned_abs() as usize);
            let digits = whole.as_decimal();
            exp = digits.len() as i64 - 1;
            head = digits;
        } else if (self.shift as usize) < bits {
            // Mixed number: the bits above the shift are the whole part,
            // the bits below feed the fraction digit extractor.
            let places = self.shift as usize;
            let (whole, frac) = self.mantissa.split(places);
            let digits = whole.as_decimal();
            exp = digits.len() as i64 - 1;
            head = digits;
            extract_fraction_digits(frac, places, precision, &mut tail);
        } else {
            // Pure fraction: walk the digits, counting the zeros between
            // the point and the first significant digit.
            let places = self.shift as usize;
            let mut frac = self.mantissa.clone();
            let mut zeros = 0i64;
            let first;
            loop {
                frac.inplace_mul_u32(10);
                let (digit, rest) = frac.split(places);
                frac = rest;
                let digit = digit.as_u64() as u8;
                if digit != 0 {
                    first = (b'0' + digit) as char;
                    break;
                }
                zeros += 1;
            }
            exp = -(zeros + 1);
            head = first.to_string();
            extract_fraction_digits(frac, places, precision, &mut tail);
        }

        // The digits after the point come from the head's low digits and
        // the fraction.
        let mut after = String::from(&head[1..]);
        after.push_str(&tail);
        if after.is_empty() {
            after.push('0');
        }

        let mut out = String::from(sign);
        out.push_str(&head[..1]);
        out.push('.');
        out.push_str(&after);
        if exp != 0 {
            out.push('e');
            out.push_str(&exp.to_string());
        }
        out
    }
}

/// Pull base-10 digits out of the fraction `frac / 2^places`, one at a time,
/// by multiplying by ten and splitting off the new whole part. Stops after
/// `precision` digits (zero means no cap) or when the fraction is exhausted.
fn extract_fraction_digits(
    mut frac: BigNat,
    places: usize,
    precision: usize,
    out: &mut String,
) {
    while !frac.is_zero() && (precision == 0 || out.len() < precision) {
        frac.inplace_mul_u32(10);
        let (digit, rest) = frac.split(places);
        frac = rest;
        out.push((b'0' + digit.as_u64() as u8) as char);
    }
}

impl From<&str> for BigFloat {
    fn from(s: &str) -> Self {
        Self::from_decimal_str(s)
    }
}

impl core::fmt::Display for BigFloat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.to_decimal_string(0))
    }
}

#[test]
fn test_parse_invalid() {
    let invalid = [
        "",
        "+",
        "-",
        ".5",
        "1e",
        "e5",
        "1ee5",
        "afsdjklnasdfnjklasdfjknl",
        "123.456e-e",
        "123 .3",
        "1 23.4",
        "1 2",
        "567.4 e -7",
        "12.34.56",
        "--4",
        "1e99999999999999999999",
    ];
    for s in invalid {
        assert!(BigFloat::from(s).is_error(), "{:?} should not parse", s);
    }
}

#[test]
fn test_parse_exact() {
    // Dyadic fractions terminate, so these parse exactly.
    assert_eq!(BigFloat::from("1.5"), BigFloat::from_f64(1.5));
    assert_eq!(BigFloat::from("0.25"), BigFloat::from_f64(0.25));
    assert_eq!(BigFloat::from("-2.5"), BigFloat::from_f64(-2.5));
    assert_eq!(BigFloat::from("+4.0"), BigFloat::from_f64(4.0));
    assert_eq!(BigFloat::from("4."), BigFloat::from_f64(4.0));
    assert_eq!(BigFloat::from("0"), BigFloat::zero(false));
    assert_eq!(BigFloat::from("-0.000"), BigFloat::zero(true));
    assert_eq!(BigFloat::from("1000"), BigFloat::from_u64(1000));
    assert_eq!(BigFloat::from("0.500"), BigFloat::from_f64(0.5));
}

#[test]
fn test_parse_scientific() {
    assert_eq!(BigFloat::from("1e3"), BigFloat::from_u64(1000));
    assert_eq!(BigFloat::from("1E3"), BigFloat::from_u64(1000));
    assert_eq!(BigFloat::from("2.5e-1"), BigFloat::from_f64(0.25));
    assert_eq!(BigFloat::from("2.5e+1"), BigFloat::from_u64(25));
    assert_eq!(BigFloat::from("1.23456789e8"), BigFloat::from("123456789"));
    assert_eq!(BigFloat::from("123.456e2"), BigFloat::from("12345.6"));
    assert_eq!(BigFloat::from("123.456e-1"), BigFloat::from("12.3456"));
    assert_eq!(BigFloat::from("5e-3"), BigFloat::from("0.005"));
}

#[test]
fn test_parse_approximate() {
    // A one-digit fraction gets 20 binary digits, so the error bound is
    // around 2^-20 of the leading digit.
    let f = BigFloat::from("0.1");
    assert!((f.as_f64() - 0.1).abs() < 1e-5);

    // More input digits buy a larger iteration budget.
    let f = BigFloat::from("0.123456789");
    assert!((f.as_f64() - 0.123456789).abs() < 1e-15);

    let f = BigFloat::from("-1234.5678");
    assert!((f.as_f64() + 1234.5678).abs() < 1e-8);
}

#[test]
fn test_parse_big_values() {
    // The comparison scenarios run on values far outside the host range.
    let a = BigFloat::from("12341241234123412341234123412341234.23412341234");
    let b = BigFloat::from(
        "897543278905234780925432453890725438790245378905423879054238790452\
         3879045238790254387905243879078924350.45378904523987045239780542387\
         902453789023457890",
    );
    assert!(a.is_normal() && b.is_normal());
    assert!(a < b);
    assert!(BigFloat::from("1.9") < BigFloat::from("2.34"));
    assert!(BigFloat::from("-1000000.23") < BigFloat::from("-10.0"));
    assert!(BigFloat::from("1.23") < BigFloat::from("20000000000.34"));
    assert!(BigFloat::from("0.00002") > BigFloat::from("0.0000000000003"));
    assert!(BigFloat::from("1.23") == BigFloat::from("1.23"));
}

#[test]
fn test_to_string_whole_numbers() {
    assert_eq!(BigFloat::zero(false).to_decimal_string(0), "0.0");
    assert_eq!(BigFloat::zero(true).to_decimal_string(0), "-0.0");
    assert_eq!(BigFloat::from_u64(5).to_decimal_string(0), "5.0");
    assert_eq!(BigFloat::from_u64(256).to_decimal_string(0), "2.56e2");
    assert_eq!(BigFloat::from_u64(100).to_decimal_string(0), "1.00e2");
    assert_eq!(BigFloat::from_i64(-42).to_decimal_string(0), "-4.2e1");
}

#[test]
fn test_to_string_fractions() {
    assert_eq!(BigFloat::from_f64(1.5).to_decimal_string(0), "1.5");
    assert_eq!(BigFloat::from_f64(3.75).to_decimal_string(0), "3.75");
    assert_eq!(BigFloat::from_f64(-2.5).to_decimal_string(0), "-2.5");
    assert_eq!(BigFloat::from_f64(1234.5).to_decimal_string(0), "1.2345e3");
    assert_eq!(BigFloat::from_f64(0.0625).to_decimal_string(0), "6.25e-2");
    assert_eq!(
        BigFloat::from_f64(0.0009765625).to_decimal_string(0),
        "9.765625e-4"
    );
}

#[test]
fn test_to_string_precision() {
    let f = BigFloat::from_f64(3.140625);
    assert_eq!(f.to_decimal_string(0), "3.140625");
    assert_eq!(f.to_decimal_string(2), "3.14");
    assert_eq!(f.to_decimal_string(4), "3.1406");

    let f = BigFloat::from_f64(0.0625);
    assert_eq!(f.to_decimal_string(1), "6.2e-2");
}

#[test]
fn test_to_string_special() {
    use alloc::format;

    assert_eq!(BigFloat::inf(false).to_decimal_string(0), "Inf");
    assert_eq!(BigFloat::inf(true).to_decimal_string(0), "-Inf");
    assert_eq!(BigFloat::error().to_decimal_string(0), "NaN");
    assert_eq!(format!("{}", BigFloat::from_f64(1.5)), "1.5");
}

#[test]
fn test_whole_number_value_round_trip() {
    use crate::utils::Lfsr;
    use alloc::format;

    // Rendering a whole number and parsing it back reproduces the exact
    // value, scientific notation and all.
    let s = "123456789123456789123456789";
    let f = BigFloat::from(s);
    let rendered = f.to_decimal_string(0);
    assert_eq!(rendered, "1.23456789123456789123456789e26");
    assert_eq!(BigFloat::from(rendered.as_str()), f);

    let mut lfsr = Lfsr::new();
    for _ in 0..200 {
        let v = lfsr.get64();
        let f = BigFloat::from_u64(v);
        let rendered = f.to_decimal_string(0);
        assert_eq!(BigFloat::from(rendered.as_str()), f, "value {}", v);
        // The digit run matches the host rendering of the integer. A
        // single-digit value picks up the ".0" placeholder.
        let digits: String = rendered
            .chars()
            .take_while(|c| *c != 'e')
            .filter(|c| c.is_ascii_digit())
            .collect();
        let mut expected = format!("{}", v);
        if v < 10 {
            expected.push('0');
        }
        assert_eq!(digits, expected, "rendered {}", rendered);
    }
}

#[test]
fn test_dyadic_print_parse_round_trip() {
    // Dyadic fractions render exactly and parse back exactly.
    for v in [0.5, 0.25, 3.75, 1234.5625, 0.0009765625, 100.0, 7.0] {
        let f = BigFloat::from_f64(v);
        let s = f.to_decimal_string(0);
        assert_eq!(BigFloat::from(s.as_str()), f, "value {}", v);
    }
}
