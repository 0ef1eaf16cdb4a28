//!
//! Arbfloat is an implementation of
//! [arbitrary precision](https://en.wikipedia.org/wiki/Arbitrary-precision_arithmetic)
//! floating point arithmetic. Values carry a dynamically sized mantissa, so
//! addition, subtraction and multiplication are exact at any magnitude;
//! division and decimal parsing are approximate with tunable accuracy.

//!### Example
//!```
//!  use arbfloat::BigFloat;
//!
//!  // Parse decimal strings of any length.
//!  let a = BigFloat::from("123456789123456789.5");
//!  let b = BigFloat::from("0.5");
//!
//!  // The sum is exact, digit for digit.
//!  let c = &a + &b;
//!  assert_eq!(c.to_decimal_string(0), "1.23456789123456790e17");
//!```
//!
//! Malformed input and undefined arithmetic never panic; they surface
//! through the value's state:
//!
//!```
//!  use arbfloat::BigFloat;
//!
//!  let bad = BigFloat::from("not a number");
//!  assert!(bad.is_error());
//!
//!  // inf + -inf has no value either.
//!  let sum = BigFloat::inf(false) + BigFloat::inf(true);
//!  assert!(sum.is_error());
//!```
//!
//! Values convert to and from the host float types through their IEEE-754
//! bit patterns, and render in scientific notation:
//!
//!```
//!  use arbfloat::BigFloat;
//!
//!  let x = BigFloat::from_f64(0.0625);
//!  assert_eq!(x.to_decimal_string(0), "6.25e-2");
//!  assert_eq!(x.as_f64(), 0.0625);
//!
//!  // Newton-Raphson square root.
//!  let root = BigFloat::from("2.25").sqrt().unwrap();
//!  println!("sqrt(2.25) = {}", root); // about 1.5
//!```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod arithmetic;
mod bignat;
mod cast;
mod float;
mod functions;
mod string;
mod utils;

pub use self::bignat::BigNat;
pub use self::float::BigFloat;
pub use self::float::State;
pub use self::float::{
    CONSTRUCTOR_MAX_ITERATIONS, DIVISION_ACCURACY, SQRT_ACCURACY,
    SQRT_ACCURACY_INCREASE_RATIO,
};
