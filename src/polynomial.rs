// Complex polynomial algebra and the newton raphson root search
//
// The polynomial carries the list of distinct roots found so far, so
// that later searches can recognise a root that has already been seen
// instead of recording it twice.

use json::JsonValue;
use num::complex::Complex;
use num::Zero;

use std::io::{Error, ErrorKind};

// Convergence threshold, root matching tolerance and zero test in one.
pub const ERROR : f64 = 0.01;
pub const MAX_ITER : usize = 30;

// The two ways a polynomial can be specified.
pub enum Representation {
    Coefficients(Vec<Complex<f64>>),
    Roots(Vec<Complex<f64>>)
}

pub struct Polynomial {
    // Coefficients with the highest degree term first
    coeff : Vec<Complex<f64>>,
    // Distinct roots found so far, within ERROR of each other counts as
    // the same root
    roots : Vec<Complex<f64>>
}

// Accept either a [re, im] pair or a bare number treated as real.
pub fn complex_from_json(input : &JsonValue) -> Option<Complex<f64>> {
    if let Some(re) = input.as_f64() {
        return Some(Complex::new(re, 0.0));
    }
    if input.is_array() && input.len() == 2 {
        let re = input[0].as_f64()?;
        let im = input[1].as_f64()?;
        return Some(Complex::new(re, im));
    }
    None
}

impl Representation {
    pub fn from_json(input : &JsonValue) -> std::io::Result<Representation> {
        if input["coefficients"].is_array() {
            let coeff : Vec<Complex<f64>> = input["coefficients"].members().filter_map(
                complex_from_json
            ).collect();
            if coeff.is_empty() {
                return Err(Error::new(ErrorKind::InvalidData, "Polynomial needs at least one coefficient"))
            }
            return Ok(Representation::Coefficients(coeff))
        }
        if input["roots"].is_array() {
            let roots : Vec<Complex<f64>> = input["roots"].members().filter_map(
                complex_from_json
            ).collect();
            if roots.is_empty() {
                return Err(Error::new(ErrorKind::InvalidData, "Polynomial needs at least one root"))
            }
            return Ok(Representation::Roots(roots))
        }
        Err(Error::new(ErrorKind::InvalidData, "Missing polynomial coefficients or roots"))
    }
}

impl Polynomial {
    pub fn new(repr : Representation) -> Polynomial {
        match repr {
            Representation::Coefficients(coeff) => {
                Polynomial { coeff : coeff, roots : Vec::new() }
            },
            Representation::Roots(roots) => {
                // Expand (x-x_0)*(x-x_1)*...*(x-x_n), keeping the given
                // roots as already known.
                let coeff = vec![Complex::new(1.0, 0.0), -roots[0]];
                let mut polynomial = Polynomial { coeff : coeff, roots : roots };
                for i in 1..polynomial.roots.len() {
                    let root = polynomial.roots[i];
                    polynomial.multiply_by_linear(&[Complex::new(1.0, 0.0), -root]);
                }
                polynomial
            }
        }
    }

    pub fn degree(&self) -> usize {
        self.coeff.len() - 1
    }

    pub fn coefficients(&self) -> &[Complex<f64>] {
        &self.coeff
    }

    pub fn roots(&self) -> &[Complex<f64>] {
        &self.roots
    }

    // Evaluate with Horner's method
    pub fn evaluate(&self, x : Complex<f64>) -> Complex<f64> {
        let mut val = Complex::zero();
        for coefficient in self.coeff.iter() {
            val = val * x + *coefficient;
        }
        val
    }

    // Coefficients of the formal derivative
    pub fn derive(&self) -> Vec<Complex<f64>> {
        let len = self.coeff.len();
        self.coeff.iter().take(len - 1).enumerate().map(
            |(i, &c)| c * (len - i - 1) as f64
        ).collect()
    }

    // Convolve the coefficients with the linear factor a[0]*x + a[1],
    // in place, raising the degree by one.
    pub fn multiply_by_linear(&mut self, factor : &[Complex<f64>]) {
        assert!(factor.len() == 2, "multiply_by_linear takes a factor with exactly two coefficients");
        let mut coeff = Vec::with_capacity(self.coeff.len() + 1);
        coeff.push(factor[0] * self.coeff[0]);
        for i in 1..self.coeff.len() {
            coeff.push(factor[0] * self.coeff[i] + factor[1] * self.coeff[i - 1]);
        }
        coeff.push(factor[1] * self.coeff[self.coeff.len() - 1]);
        self.coeff = coeff;
    }

    // Newton raphson search from the guess x0.
    //
    // Returns the final iterate and the number of iterations used,
    // whether or not it landed on a root. A root that passes the zero
    // test and is not within ERROR of a known root is appended to the
    // root list.
    pub fn newton(&mut self, x0 : Complex<f64>, max_iterations : usize) -> (Complex<f64>, usize) {
        let derivative = Polynomial::new(Representation::Coefficients(self.derive()));
        let mut x = x0;
        let mut x_prev = Complex::new(f64::INFINITY, 0.0);
        let mut k = 0;
        while (x - x_prev).norm() > ERROR * x.norm() && k < max_iterations {
            x_prev = x;
            let px = self.evaluate(x_prev);
            let pdx = derivative.evaluate(x_prev);
            if pdx.is_zero() {
                // Stationary point - send the iterate to infinity so the
                // zero test below rejects it.
                x = Complex::new(f64::INFINITY, 0.0);
            } else {
                x = x_prev - px / pdx;
            }
            k += 1;
        }
        let min_distance = self.roots.iter().map(
            |root| (*root - x).norm()
        ).fold(f64::INFINITY, f64::min);
        if self.evaluate(x).norm() < ERROR && min_distance > ERROR {
            self.roots.push(x);
        }
        (x, k)
    }
}

impl PartialEq for Polynomial {
    // Two polynomials are equal when their coefficients are, whatever
    // roots have been found so far.
    fn eq(&self, other : &Polynomial) -> bool {
        self.coeff == other.coeff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re : f64, im : f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    fn reals(values : &[f64]) -> Vec<Complex<f64>> {
        values.iter().map(|&re| c(re, 0.0)).collect()
    }

    #[test]
    fn multiply_by_linear_convolves() {
        // (1x + 2)(1x^2 + 2x + 3) = 1x^3 + 4x^2 + 7x + 6
        let mut p1 = Polynomial::new(Representation::Coefficients(reals(&[1.0, 2.0, 3.0])));
        p1.multiply_by_linear(&reals(&[1.0, 2.0]));
        assert_eq!(p1.coefficients(), reals(&[1.0, 4.0, 7.0, 6.0]));
        // (1x + 2)(1x^3 + 4x^2 + 7x + 6) = 1x^4 + 6x^3 + 15x^2 + 20x + 12
        p1.multiply_by_linear(&reals(&[1.0, 2.0]));
        assert_eq!(p1.coefficients(), reals(&[1.0, 6.0, 15.0, 20.0, 12.0]));
    }

    #[test]
    #[should_panic]
    fn multiply_by_linear_rejects_non_linear_factor() {
        let mut p = Polynomial::new(Representation::Coefficients(reals(&[1.0, 2.0, 3.0])));
        p.multiply_by_linear(&reals(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn built_from_roots_vanishes_at_them() {
        let roots = vec![c(2.0, 0.0), c(-4.0, 0.0), c(1.0, 1.0)];
        let p = Polynomial::new(Representation::Roots(roots.clone()));
        assert_eq!(p.degree(), 3);
        for root in roots {
            assert!(p.evaluate(root).norm() < ERROR);
        }
    }

    #[test]
    fn newton_converges_to_nearby_root() {
        let mut p = Polynomial::new(Representation::Roots(reals(&[2.0, -4.0])));
        let (root, _) = p.newton(c(-10.0, 0.0), MAX_ITER);
        assert!((root - c(-4.0, 0.0)).norm() < ERROR);
    }

    #[test]
    fn newton_escapes_zero_derivative_to_infinity() {
        // 2x^2 + 10 has derivative 4x, zero at the starting guess
        let mut p = Polynomial::new(Representation::Coefficients(reals(&[2.0, 0.0, 10.0])));
        let (root, _) = p.newton(c(0.0, 0.0), MAX_ITER);
        assert!(root.norm().is_infinite());
        assert!(p.roots().is_empty());
    }

    #[test]
    fn derive_drops_constant_term() {
        let p = Polynomial::new(Representation::Coefficients(vec![
            c(2.0, 0.0), c(-4.0, 0.0), c(10.0, 3.0), c(0.0, 0.0), c(0.0, 0.0)
        ]));
        assert_eq!(p.derive(), vec![c(8.0, 0.0), c(-12.0, 0.0), c(20.0, 6.0), c(0.0, 0.0)]);
    }

    #[test]
    fn equality_ignores_found_roots() {
        let from_roots = Polynomial::new(Representation::Roots(reals(&[1.0, 2.0])));
        let from_coeff = Polynomial::new(Representation::Coefficients(reals(&[1.0, -3.0, 2.0])));
        assert!(from_roots == from_coeff);
    }

    #[test]
    fn root_list_grows_monotonically_up_to_degree() {
        let mut p = Polynomial::new(Representation::Coefficients(reals(&[1.0, 0.0, -1.0])));
        let starts = [c(2.0, 0.1), c(-2.0, -0.1), c(0.5, 0.0), c(-0.5, 0.0), c(3.0, 2.0)];
        let mut previous = p.roots().len();
        for start in starts {
            p.newton(start, MAX_ITER);
            let found = p.roots().len();
            assert!(found >= previous);
            assert!(found <= p.degree());
            previous = found;
        }
        // Both roots of x^2 - 1 are reachable from these starts
        assert_eq!(previous, 2);
    }
}
