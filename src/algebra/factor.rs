use num_rational::Rational64;
use num_traits::{Signed, Zero};

use super::poly::{as_rational, poly_coefficients};
use crate::syntax::{BinaryOperator, Expr};

/// Largest integer whose divisors the rational-root search will
/// enumerate; polynomials with bigger extreme coefficients are returned
/// unfactored.
const MAX_ROOT_SEARCH: i64 = 1_000_000;

/// Factor a polynomial in `var` into rational linear factors, as far as
/// the rational-root theorem reaches. Expressions that are not
/// polynomial, have non-rational coefficients, or admit no rational root
/// are returned unchanged.
pub fn factor_polynomial(expr: &Expr, var: &str) -> Expr {
  let map = match poly_coefficients(expr, var) {
    Some(map) => map,
    None => return expr.clone(),
  };
  let degree = map.keys().next_back().copied().unwrap_or(0) as usize;
  if degree < 2 {
    return expr.clone();
  }

  let mut dense = vec![Rational64::zero(); degree + 1];
  for (exponent, coeff) in &map {
    match as_rational(coeff) {
      Some(r) => dense[*exponent as usize] = r,
      None => return expr.clone(),
    }
  }

  let mut roots: Vec<Rational64> = Vec::new();
  // zero roots come out as plain x factors
  while dense.len() > 1 && dense[0].is_zero() {
    roots.push(Rational64::zero());
    dense.remove(0);
  }

  loop {
    let current_degree = dense.len() - 1;
    if current_degree < 1 {
      break;
    }
    if current_degree == 2 {
      if let Some((r1, r2)) = quadratic_rational_roots(&dense) {
        roots.push(r1);
        roots.push(r2);
        dense = vec![dense[2]];
      }
      break;
    }
    if current_degree == 1 {
      roots.push(-dense[0] / dense[1]);
      dense = vec![dense[1]];
      break;
    }
    match find_rational_root(&dense) {
      Some(root) => {
        roots.push(root);
        dense = deflate(&dense, root);
      }
      None => break,
    }
  }

  if roots.is_empty() {
    return expr.clone();
  }
  roots.sort();

  let mut result: Option<Expr> = None;
  let remainder_degree = dense.len() - 1;
  if remainder_degree > 0 {
    let mut remainder_map = super::poly::CoeffMap::new();
    for (exponent, coeff) in dense.iter().enumerate() {
      if !coeff.is_zero() {
        remainder_map.insert(exponent as u32, rational_expr(*coeff));
      }
    }
    result = Some(super::poly::poly_from_coefficients(&remainder_map, var));
  } else if !dense[0].is_zero() && dense[0] != Rational64::from_integer(1) {
    result = Some(rational_expr(dense[0]));
  }

  for root in roots {
    let factor = linear_factor(var, root);
    result = Some(match result {
      Some(acc) => Expr::binary(BinaryOperator::Times, acc, factor),
      None => factor,
    });
  }
  match result {
    Some(expr) => expr,
    None => expr.clone(),
  }
}

fn rational_expr(r: Rational64) -> Expr {
  if r.denom() == &1 {
    Expr::Integer(*r.numer())
  } else {
    Expr::Rational(r)
  }
}

fn linear_factor(var: &str, root: Rational64) -> Expr {
  let x = Expr::Identifier(var.to_string());
  if root.is_zero() {
    x
  } else if root.is_negative() {
    Expr::binary(BinaryOperator::Plus, x, rational_expr(-root))
  } else {
    Expr::binary(BinaryOperator::Minus, x, rational_expr(root))
  }
}

fn quadratic_rational_roots(
  dense: &[Rational64],
) -> Option<(Rational64, Rational64)> {
  let (c, b, a) = (dense[0], dense[1], dense[2]);
  let discriminant = b * b - Rational64::from_integer(4) * a * c;
  if discriminant.is_negative() {
    return None;
  }
  let root = rational_sqrt(discriminant)?;
  let two_a = Rational64::from_integer(2) * a;
  Some(((-b - root) / two_a, (-b + root) / two_a))
}

/// Exact square root of a non-negative rational, when one exists.
pub fn rational_sqrt(value: Rational64) -> Option<Rational64> {
  if value.is_negative() {
    return None;
  }
  let numer = integer_sqrt(*value.numer())?;
  let denom = integer_sqrt(*value.denom())?;
  Some(Rational64::new(numer, denom))
}

fn integer_sqrt(n: i64) -> Option<i64> {
  if n < 0 {
    return None;
  }
  let root = (n as f64).sqrt().round() as i64;
  (root.checked_mul(root) == Some(n)).then_some(root)
}

pub(crate) fn find_rational_root(dense: &[Rational64]) -> Option<Rational64> {
  // Scale to integer coefficients before applying the rational-root test
  let mut scale: i64 = 1;
  for coeff in dense {
    scale = lcm(scale, *coeff.denom())?;
  }
  let scaled: Vec<i64> = dense
    .iter()
    .map(|c| c.numer() * (scale / c.denom()))
    .collect();
  let constant = *scaled.first()?;
  let leading = *scaled.last()?;
  if constant == 0 || leading == 0 {
    return None;
  }
  if constant.abs() > MAX_ROOT_SEARCH || leading.abs() > MAX_ROOT_SEARCH {
    return None;
  }
  for p in divisors(constant.abs()) {
    for q in divisors(leading.abs()) {
      for candidate in [Rational64::new(p, q), Rational64::new(-p, q)] {
        if eval_poly(dense, candidate).is_zero() {
          return Some(candidate);
        }
      }
    }
  }
  None
}

fn eval_poly(dense: &[Rational64], at: Rational64) -> Rational64 {
  let mut result = Rational64::zero();
  for coeff in dense.iter().rev() {
    result = result * at + *coeff;
  }
  result
}

pub(crate) fn deflate(dense: &[Rational64], root: Rational64) -> Vec<Rational64> {
  let mut quotient = vec![Rational64::zero(); dense.len() - 1];
  let mut carry = Rational64::zero();
  for i in (0..dense.len() - 1).rev() {
    carry = dense[i + 1] + carry * root;
    quotient[i] = carry;
  }
  quotient
}

fn divisors(n: i64) -> Vec<i64> {
  let mut result = Vec::new();
  let mut d = 1;
  while d * d <= n {
    if n % d == 0 {
      result.push(d);
      if d != n / d {
        result.push(n / d);
      }
    }
    d += 1;
  }
  result.sort();
  result
}

fn lcm(a: i64, b: i64) -> Option<i64> {
  let gcd = num_integer_gcd(a.abs(), b.abs());
  (a / gcd).checked_mul(b)
}

fn num_integer_gcd(mut a: i64, mut b: i64) -> i64 {
  while b != 0 {
    let t = b;
    b = a % b;
    a = t;
  }
  a.max(1)
}
