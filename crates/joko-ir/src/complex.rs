//! Complex amplitude arithmetic.
//!
//! Amplitudes are [`num_complex::Complex64`] values. The free functions here
//! are the arithmetic surface used by the gate catalogue and the simulator;
//! every one of them is total and returns a fresh value.

use num_complex::Complex64;

/// A complex amplitude.
pub type Complex = Complex64;

/// `0 + 0i`.
pub const ZERO: Complex = Complex::new(0.0, 0.0);

/// `1 + 0i`.
pub const ONE: Complex = Complex::new(1.0, 0.0);

/// The imaginary unit `0 + 1i`.
pub const I: Complex = Complex::new(0.0, 1.0);

/// Build a complex number from Cartesian components.
#[inline]
pub const fn complex(re: f64, im: f64) -> Complex {
    Complex::new(re, im)
}

/// `r · e^{iθ}`.
#[inline]
pub fn from_polar(r: f64, theta: f64) -> Complex {
    Complex::from_polar(r, theta)
}

#[inline]
pub fn add(a: Complex, b: Complex) -> Complex {
    a + b
}

#[inline]
pub fn subtract(a: Complex, b: Complex) -> Complex {
    a - b
}

#[inline]
pub fn multiply(a: Complex, b: Complex) -> Complex {
    a * b
}

/// Multiply by a real scalar.
#[inline]
pub fn scale(a: Complex, s: f64) -> Complex {
    a * s
}

#[inline]
pub fn conjugate(a: Complex) -> Complex {
    a.conj()
}

/// Modulus `|a|`.
#[inline]
pub fn magnitude(a: Complex) -> f64 {
    a.norm()
}

/// `|a|²`, the Born-rule probability of an amplitude.
#[inline]
pub fn magnitude_squared(a: Complex) -> f64 {
    a.norm_sqr()
}

/// Component-wise comparison within `tol`.
#[inline]
pub fn approx_eq(a: Complex, b: Complex, tol: f64) -> bool {
    (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol
}

/// Render a complex number for humans, rounded to `precision` decimals.
///
/// Trailing zeros are dropped and a zero component is omitted:
///
/// ```
/// use joko_ir::complex::{complex, format_complex};
///
/// assert_eq!(format_complex(complex(1.0, 0.0), 4), "1");
/// assert_eq!(format_complex(complex(0.0, -0.5), 4), "-0.5i");
/// assert_eq!(format_complex(complex(0.5, 0.5), 4), "0.5+0.5i");
/// assert_eq!(format_complex(complex(0.70710678, -0.25), 4), "0.7071-0.25i");
/// ```
pub fn format_complex(a: Complex, precision: usize) -> String {
    let re = round_to(a.re, precision);
    let im = round_to(a.im, precision);

    if im == 0.0 {
        return format_decimal(re, precision);
    }
    if re == 0.0 {
        return format!("{}i", format_decimal(im, precision));
    }
    let sign = if im < 0.0 { '-' } else { '+' };
    format!(
        "{}{sign}{}i",
        format_decimal(re, precision),
        format_decimal(im.abs(), precision)
    )
}

fn round_to(x: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    (x * factor).round() / factor
}

fn format_decimal(x: f64, precision: usize) -> String {
    // -0.0 prints as "0"
    if x == 0.0 {
        return "0".to_string();
    }
    let text = format!("{x:.precision$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
