use std::collections::BTreeMap;

use super::simplify::simplify;
use crate::syntax::{is_constant_wrt, BinaryOperator, Expr};

/// Hard cap on the degree a coefficient extraction may produce; anything
/// larger is treated as not-a-polynomial rather than ground through.
const MAX_DEGREE: u32 = 64;

/// Map from exponent to (possibly symbolic) coefficient expression.
/// Absent exponents have coefficient zero.
pub type CoeffMap = BTreeMap<u32, Expr>;

/// Extract the coefficients of `expr` viewed as a polynomial in `var`.
/// Coefficients may contain other symbols (`coefficient of x in y*x` is
/// `y`). Returns `None` when the expression is not polynomial in `var`.
pub fn poly_coefficients(expr: &Expr, var: &str) -> Option<CoeffMap> {
  let raw = coeffs_inner(expr, var)?;
  let mut cleaned = CoeffMap::new();
  for (exponent, coeff) in raw {
    let coeff = simplify(coeff);
    if !coeff.is_zero() {
      cleaned.insert(exponent, coeff);
    }
  }
  Some(cleaned)
}

fn coeffs_inner(expr: &Expr, var: &str) -> Option<CoeffMap> {
  if is_constant_wrt(expr, var) {
    let mut map = CoeffMap::new();
    map.insert(0, expr.clone());
    return Some(map);
  }
  match expr {
    Expr::Identifier(name) if name == var => {
      let mut map = CoeffMap::new();
      map.insert(1, Expr::Integer(1));
      Some(map)
    }
    Expr::UnaryOp { operand, .. } => {
      let inner = coeffs_inner(operand, var)?;
      Some(negate_map(inner))
    }
    Expr::BinaryOp { op, left, right } => match op {
      BinaryOperator::Plus => {
        let a = coeffs_inner(left, var)?;
        let b = coeffs_inner(right, var)?;
        Some(add_maps(a, b))
      }
      BinaryOperator::Minus => {
        let a = coeffs_inner(left, var)?;
        let b = coeffs_inner(right, var)?;
        Some(add_maps(a, negate_map(b)))
      }
      BinaryOperator::Times => {
        let a = coeffs_inner(left, var)?;
        let b = coeffs_inner(right, var)?;
        mul_maps(&a, &b)
      }
      BinaryOperator::Divide => {
        // Only division by something free of the variable stays polynomial
        if !is_constant_wrt(right, var) {
          return None;
        }
        let a = coeffs_inner(left, var)?;
        Some(divide_map(a, right))
      }
      BinaryOperator::Power => {
        let exponent = match right.as_ref() {
          Expr::Integer(n) if *n >= 0 => *n as u32,
          _ => return None,
        };
        if exponent > MAX_DEGREE {
          return None;
        }
        let base = coeffs_inner(left, var)?;
        let mut result = constant_map(Expr::Integer(1));
        for _ in 0..exponent {
          result = mul_maps(&result, &base)?;
        }
        Some(result)
      }
    },
    // A function application involving the variable is not polynomial
    _ => None,
  }
}

fn constant_map(value: Expr) -> CoeffMap {
  let mut map = CoeffMap::new();
  map.insert(0, value);
  map
}

fn negate_map(map: CoeffMap) -> CoeffMap {
  map
    .into_iter()
    .map(|(exponent, coeff)| (exponent, Expr::neg(coeff)))
    .collect()
}

fn add_maps(a: CoeffMap, b: CoeffMap) -> CoeffMap {
  let mut result = a;
  for (exponent, coeff) in b {
    match result.remove(&exponent) {
      Some(existing) => {
        result.insert(
          exponent,
          Expr::binary(BinaryOperator::Plus, existing, coeff),
        );
      }
      None => {
        result.insert(exponent, coeff);
      }
    }
  }
  result
}

fn mul_maps(a: &CoeffMap, b: &CoeffMap) -> Option<CoeffMap> {
  let mut result = CoeffMap::new();
  for (ea, ca) in a {
    for (eb, cb) in b {
      let exponent = ea.checked_add(*eb)?;
      if exponent > MAX_DEGREE {
        return None;
      }
      let term = Expr::binary(BinaryOperator::Times, ca.clone(), cb.clone());
      match result.remove(&exponent) {
        Some(existing) => {
          result.insert(
            exponent,
            Expr::binary(BinaryOperator::Plus, existing, term),
          );
        }
        None => {
          result.insert(exponent, term);
        }
      }
    }
  }
  Some(result)
}

fn divide_map(map: CoeffMap, divisor: &Expr) -> CoeffMap {
  map
    .into_iter()
    .map(|(exponent, coeff)| {
      (
        exponent,
        Expr::binary(BinaryOperator::Divide, coeff, divisor.clone()),
      )
    })
    .collect()
}

/// Read an exact rational literal out of an expression, if it is one.
pub fn as_rational(expr: &Expr) -> Option<num_rational::Rational64> {
  match expr {
    Expr::Integer(n) => Some(num_rational::Rational64::from_integer(*n)),
    Expr::Rational(r) => Some(*r),
    Expr::UnaryOp { operand, .. } => as_rational(operand).map(|r| -r),
    _ => None,
  }
}

/// Check whether an expression is a polynomial in `var`.
pub fn is_polynomial(expr: &Expr, var: &str) -> bool {
  poly_coefficients(expr, var).is_some()
}

/// Polynomial degree of `expr` in `var`, when it has one. Constants have
/// degree zero.
pub fn degree(expr: &Expr, var: &str) -> Option<u32> {
  let coeffs = poly_coefficients(expr, var)?;
  Some(coeffs.keys().next_back().copied().unwrap_or(0))
}

/// The coefficient of the highest power of `var`.
pub fn leading_coefficient(expr: &Expr, var: &str) -> Option<Expr> {
  let coeffs = poly_coefficients(expr, var)?;
  match coeffs.iter().next_back() {
    Some((_, coeff)) => Some(coeff.clone()),
    None => Some(Expr::Integer(0)),
  }
}

/// Rebuild an expression from a coefficient map, highest power first.
pub fn poly_from_coefficients(coeffs: &CoeffMap, var: &str) -> Expr {
  let mut terms: Vec<Expr> = Vec::new();
  for (exponent, coeff) in coeffs.iter().rev() {
    let power = match exponent {
      0 => None,
      1 => Some(Expr::Identifier(var.to_string())),
      n => Some(Expr::binary(
        BinaryOperator::Power,
        Expr::Identifier(var.to_string()),
        Expr::Integer(*n as i64),
      )),
    };
    let term = match (power, coeff) {
      (None, c) => c.clone(),
      (Some(p), c) if c.is_one() => p,
      (Some(p), c) => Expr::binary(BinaryOperator::Times, c.clone(), p),
    };
    terms.push(term);
  }
  let mut iter = terms.into_iter();
  let first = match iter.next() {
    Some(t) => t,
    None => return Expr::Integer(0),
  };
  iter.fold(first, |acc, term| match negated_literal(&term) {
    Some(positive) => Expr::binary(BinaryOperator::Minus, acc, positive),
    None => Expr::binary(BinaryOperator::Plus, acc, term),
  })
}

/// For a literal negative term, return its positive counterpart so sums
/// render as subtractions (`x^2 - 4` instead of `x^2 + -4`).
fn negated_literal(term: &Expr) -> Option<Expr> {
  match term {
    Expr::Integer(n) if *n < 0 => Some(Expr::Integer(-n)),
    Expr::Real(f) if *f < 0.0 => Some(Expr::Real(-f)),
    Expr::Rational(r) if r.numer() < &0 => Some(Expr::Rational(-*r)),
    Expr::UnaryOp { operand, .. } => Some(operand.as_ref().clone()),
    _ => None,
  }
}
