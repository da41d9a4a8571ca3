use num_rational::Rational64;
use num_traits::{Signed, Zero};

use super::factor::{deflate, find_rational_root, rational_sqrt};
use super::numeric::eval_f64;
use super::poly::{as_rational, poly_coefficients, CoeffMap};
use super::rational::as_numer_denom;
use super::simplify::simplify;
use crate::syntax::{
  is_constant_wrt, substitute_variable, BinaryOperator, Expr, UnaryOperator,
};

/// A sub-problem the solver could not finish. Expected and common; callers
/// degrade to a fallback summary instead of failing the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsolvable(pub String);

impl std::fmt::Display for Unsolvable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Work budget bounding solver recursion. Symbolic solving must never
/// hang: exhaustion is reported as a regular unsolvable outcome.
pub struct Budget {
  remaining: u32,
}

impl Budget {
  pub fn new(limit: u32) -> Budget {
    Budget { remaining: limit }
  }

  fn spend(&mut self) -> Result<(), Unsolvable> {
    if self.remaining == 0 {
      return Err(Unsolvable("work budget exhausted".to_string()));
    }
    self.remaining -= 1;
    Ok(())
  }
}

pub type SolveResult = Result<Vec<Expr>, Unsolvable>;

/// Solve `lhs = rhs` for `var` over the reals, returning the finite list
/// of real solution expressions (possibly symbolic in other variables,
/// possibly empty when no real solution exists). Covers linear equations
/// with symbolic coefficients, numeric-coefficient polynomials, and
/// invertible chains of log/exp/sqrt/abs/powers; anything else is
/// `Unsolvable`.
pub fn solve_equation(lhs: &Expr, rhs: &Expr, var: &str) -> SolveResult {
  let mut budget = Budget::new(512);
  let solutions = solve_eq(lhs, rhs, var, &mut budget)?;
  Ok(dedupe_solutions(solutions))
}

fn solve_eq(
  lhs: &Expr,
  rhs: &Expr,
  var: &str,
  budget: &mut Budget,
) -> SolveResult {
  budget.spend()?;

  if !is_constant_wrt(rhs, var) {
    // Move everything to one side so the right-hand side is free of var
    let diff = simplify(Expr::binary(
      BinaryOperator::Minus,
      lhs.clone(),
      rhs.clone(),
    ));
    return solve_eq(&diff, &Expr::Integer(0), var, budget);
  }

  // Clear denominators first, then discard candidates they invalidate
  let (numer, denom) = as_numer_denom(lhs);
  if !denom.is_one() {
    let cleared = simplify(Expr::binary(
      BinaryOperator::Minus,
      numer,
      Expr::binary(BinaryOperator::Times, rhs.clone(), denom.clone()),
    ));
    let candidates = solve_eq(&cleared, &Expr::Integer(0), var, budget)?;
    return Ok(
      candidates
        .into_iter()
        .filter(|sol| !vanishes_at(&denom, var, sol))
        .collect(),
    );
  }

  let diff = simplify(Expr::binary(
    BinaryOperator::Minus,
    lhs.clone(),
    rhs.clone(),
  ));
  if let Some(coeffs) = poly_coefficients(&diff, var) {
    return solve_poly(coeffs, var, budget);
  }

  solve_structural(lhs, rhs, var, budget)
}

fn vanishes_at(denom: &Expr, var: &str, solution: &Expr) -> bool {
  if !is_constant_wrt(solution, var) {
    return false;
  }
  let substituted = substitute_variable(denom, var, solution);
  matches!(eval_f64(&substituted), Ok(v) if v.abs() < 1e-9)
}

/// Peel invertible structure off the left-hand side until a polynomial
/// core remains.
fn solve_structural(
  lhs: &Expr,
  rhs: &Expr,
  var: &str,
  budget: &mut Budget,
) -> SolveResult {
  match lhs {
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => {
      let negated = simplify(Expr::neg(rhs.clone()));
      solve_eq(operand, &negated, var, budget)
    }
    Expr::BinaryOp { op, left, right } => match op {
      BinaryOperator::Plus => {
        if is_constant_wrt(right, var) {
          let moved = simplify(Expr::binary(
            BinaryOperator::Minus,
            rhs.clone(),
            right.as_ref().clone(),
          ));
          solve_eq(left, &moved, var, budget)
        } else if is_constant_wrt(left, var) {
          let moved = simplify(Expr::binary(
            BinaryOperator::Minus,
            rhs.clone(),
            left.as_ref().clone(),
          ));
          solve_eq(right, &moved, var, budget)
        } else {
          Err(Unsolvable(format!("cannot isolate {} in {}", var, lhs)))
        }
      }
      BinaryOperator::Minus => {
        if is_constant_wrt(right, var) {
          let moved = simplify(Expr::binary(
            BinaryOperator::Plus,
            rhs.clone(),
            right.as_ref().clone(),
          ));
          solve_eq(left, &moved, var, budget)
        } else if is_constant_wrt(left, var) {
          let moved = simplify(Expr::binary(
            BinaryOperator::Minus,
            left.as_ref().clone(),
            rhs.clone(),
          ));
          solve_eq(right, &moved, var, budget)
        } else {
          Err(Unsolvable(format!("cannot isolate {} in {}", var, lhs)))
        }
      }
      BinaryOperator::Times => {
        if is_constant_wrt(left, var) && !left.is_zero() {
          let moved = simplify(Expr::binary(
            BinaryOperator::Divide,
            rhs.clone(),
            left.as_ref().clone(),
          ));
          solve_eq(right, &moved, var, budget)
        } else if is_constant_wrt(right, var) && !right.is_zero() {
          let moved = simplify(Expr::binary(
            BinaryOperator::Divide,
            rhs.clone(),
            right.as_ref().clone(),
          ));
          solve_eq(left, &moved, var, budget)
        } else if rhs.is_zero() {
          // A product vanishes when either factor does
          let mut solutions = solve_eq(left, rhs, var, budget)?;
          solutions.extend(solve_eq(right, rhs, var, budget)?);
          Ok(solutions)
        } else {
          Err(Unsolvable(format!("cannot isolate {} in {}", var, lhs)))
        }
      }
      BinaryOperator::Power => solve_power(left, right, rhs, var, budget),
      BinaryOperator::Divide => {
        Err(Unsolvable(format!("cannot isolate {} in {}", var, lhs)))
      }
    },
    Expr::FunctionCall { name, args } if args.len() == 1 => {
      solve_function(name, &args[0], rhs, var, budget)
    }
    _ => Err(Unsolvable(format!("cannot isolate {} in {}", var, lhs))),
  }
}

fn solve_power(
  base: &Expr,
  exponent: &Expr,
  rhs: &Expr,
  var: &str,
  budget: &mut Budget,
) -> SolveResult {
  if is_constant_wrt(exponent, var) {
    match exponent {
      Expr::Integer(n) if *n > 0 => {
        return solve_integer_power(base, *n, rhs, var, budget);
      }
      Expr::Integer(n) if *n < 0 => {
        // base^(-n) = rhs  =>  base^n = 1/rhs
        if rhs.is_zero() {
          return Ok(Vec::new());
        }
        let inverted = simplify(Expr::binary(
          BinaryOperator::Divide,
          Expr::Integer(1),
          rhs.clone(),
        ));
        return solve_integer_power(base, -n, &inverted, var, budget);
      }
      Expr::Rational(r) if r.numer() == &1 => {
        // base^(1/n) = rhs  =>  base = rhs^n, principal root only
        let index = *r.denom();
        if index % 2 == 0 {
          if let Ok(value) = eval_f64(rhs) {
            if value < 0.0 {
              return Ok(Vec::new());
            }
          }
        }
        let raised = simplify(Expr::binary(
          BinaryOperator::Power,
          rhs.clone(),
          Expr::Integer(index),
        ));
        return solve_eq(base, &raised, var, budget);
      }
      _ => {
        return Err(Unsolvable(format!(
          "cannot invert exponent {} in {}^{}",
          exponent, base, exponent
        )));
      }
    }
  }
  if is_constant_wrt(base, var) {
    // a^u = rhs  =>  u = log(rhs)/log(a)
    if let Ok(value) = eval_f64(rhs) {
      if value <= 0.0 {
        return Ok(Vec::new());
      }
    }
    let target = if matches!(base, Expr::Constant(name) if name == "e") {
      simplify(Expr::call("log", vec![rhs.clone()]))
    } else {
      simplify(Expr::binary(
        BinaryOperator::Divide,
        Expr::call("log", vec![rhs.clone()]),
        Expr::call("log", vec![base.clone()]),
      ))
    };
    return solve_eq(exponent, &target, var, budget);
  }
  Err(Unsolvable(format!(
    "cannot solve {}^{} = {}",
    base, exponent, rhs
  )))
}

fn solve_integer_power(
  base: &Expr,
  n: i64,
  rhs: &Expr,
  var: &str,
  budget: &mut Budget,
) -> SolveResult {
  if rhs.is_zero() {
    return solve_eq(base, &Expr::Integer(0), var, budget);
  }
  let rhs_value = eval_f64(rhs).ok();
  if n % 2 == 0 {
    match rhs_value {
      Some(value) if value < 0.0 => Ok(Vec::new()),
      Some(_) => {
        let root = nth_root_expr(rhs, n);
        let mut solutions = solve_eq(base, &root, var, budget)?;
        let negated = simplify(Expr::neg(root));
        solutions.extend(solve_eq(base, &negated, var, budget)?);
        Ok(solutions)
      }
      None => Err(Unsolvable(format!(
        "cannot take an even root of {} symbolically",
        rhs
      ))),
    }
  } else {
    let root = nth_root_expr(rhs, n);
    solve_eq(base, &root, var, budget)
  }
}

fn nth_root_expr(value: &Expr, n: i64) -> Expr {
  if n == 2 {
    if let Some(r) = as_rational(value) {
      if let Some(exact) = rational_sqrt(r) {
        return rational_to_expr(exact);
      }
    }
    return simplify(Expr::call("sqrt", vec![value.clone()]));
  }
  simplify(Expr::binary(
    BinaryOperator::Power,
    value.clone(),
    Expr::Rational(Rational64::new(1, n)),
  ))
}

fn solve_function(
  name: &str,
  arg: &Expr,
  rhs: &Expr,
  var: &str,
  budget: &mut Budget,
) -> SolveResult {
  match name {
    "log" => {
      let target = simplify(Expr::call("exp", vec![rhs.clone()]));
      solve_eq(arg, &target, var, budget)
    }
    "exp" => {
      if let Ok(value) = eval_f64(rhs) {
        if value <= 0.0 {
          return Ok(Vec::new());
        }
      }
      let target = simplify(Expr::call("log", vec![rhs.clone()]));
      solve_eq(arg, &target, var, budget)
    }
    "sqrt" => {
      if let Ok(value) = eval_f64(rhs) {
        if value < 0.0 {
          return Ok(Vec::new());
        }
      }
      let target = simplify(Expr::binary(
        BinaryOperator::Power,
        rhs.clone(),
        Expr::Integer(2),
      ));
      solve_eq(arg, &target, var, budget)
    }
    "abs" => match eval_f64(rhs) {
      Ok(value) if value < 0.0 => Ok(Vec::new()),
      Ok(value) if value == 0.0 => {
        solve_eq(arg, &Expr::Integer(0), var, budget)
      }
      Ok(_) => {
        let mut solutions = solve_eq(arg, rhs, var, budget)?;
        let negated = simplify(Expr::neg(rhs.clone()));
        solutions.extend(solve_eq(arg, &negated, var, budget)?);
        Ok(solutions)
      }
      Err(_) => Err(Unsolvable(format!(
        "cannot solve abs({}) = {} symbolically",
        arg, rhs
      ))),
    },
    other => Err(Unsolvable(format!(
      "cannot solve {}({}) = {} symbolically",
      other, arg, rhs
    ))),
  }
}

fn solve_poly(
  coeffs: CoeffMap,
  var: &str,
  budget: &mut Budget,
) -> SolveResult {
  budget.spend()?;
  let mut coeffs = coeffs;
  if coeffs.is_empty() {
    return Err(Unsolvable(
      "equation holds for every value of the variable".to_string(),
    ));
  }

  let mut solutions: Vec<Expr> = Vec::new();
  // A common x^k factor contributes the root 0
  let min_exponent = coeffs.keys().next().copied().unwrap_or(0);
  if min_exponent > 0 {
    solutions.push(Expr::Integer(0));
    coeffs = coeffs
      .into_iter()
      .map(|(exponent, coeff)| (exponent - min_exponent, coeff))
      .collect();
  }

  let degree = coeffs.keys().next_back().copied().unwrap_or(0);
  match degree {
    0 => {
      // Nonzero constant: no solutions beyond any extracted zero root
      Ok(solutions)
    }
    1 => {
      let a = coeffs.get(&1).cloned().unwrap_or(Expr::Integer(0));
      let b = coeffs.get(&0).cloned().unwrap_or(Expr::Integer(0));
      let root = simplify(Expr::binary(
        BinaryOperator::Divide,
        Expr::neg(b),
        a,
      ));
      solutions.push(root);
      Ok(solutions)
    }
    2 => {
      let roots = solve_quadratic(&coeffs)?;
      solutions.extend(roots);
      Ok(solutions)
    }
    _ => {
      let roots = solve_higher_degree(&coeffs, degree, var, budget)?;
      solutions.extend(roots);
      Ok(solutions)
    }
  }
}

fn solve_quadratic(coeffs: &CoeffMap) -> SolveResult {
  let a = coeffs.get(&2).cloned().unwrap_or(Expr::Integer(0));
  let b = coeffs.get(&1).cloned().unwrap_or(Expr::Integer(0));
  let c = coeffs.get(&0).cloned().unwrap_or(Expr::Integer(0));

  // Exact path for rational coefficients
  if let (Some(ra), Some(rb), Some(rc)) =
    (as_rational(&a), as_rational(&b), as_rational(&c))
  {
    let discriminant =
      rb * rb - Rational64::from_integer(4) * ra * rc;
    if discriminant.is_negative() {
      return Ok(Vec::new());
    }
    let two_a = Rational64::from_integer(2) * ra;
    if let Some(root) = rational_sqrt(discriminant) {
      let r1 = (-rb - root) / two_a;
      let r2 = (-rb + root) / two_a;
      if r1 == r2 {
        return Ok(vec![rational_to_expr(r1)]);
      }
      let mut pair = [r1, r2];
      pair.sort();
      return Ok(vec![rational_to_expr(pair[0]), rational_to_expr(pair[1])]);
    }
    // Irrational roots stay exact: (-b ± sqrt(d)) / (2a)
    let sqrt_d = Expr::call("sqrt", vec![rational_to_expr(discriminant)]);
    let minus = simplify(Expr::binary(
      BinaryOperator::Divide,
      Expr::binary(
        BinaryOperator::Minus,
        rational_to_expr(-rb),
        sqrt_d.clone(),
      ),
      rational_to_expr(two_a),
    ));
    let plus = simplify(Expr::binary(
      BinaryOperator::Divide,
      Expr::binary(BinaryOperator::Plus, rational_to_expr(-rb), sqrt_d),
      rational_to_expr(two_a),
    ));
    return Ok(vec![minus, plus]);
  }

  // Decimal path when every coefficient at least evaluates numerically
  if let (Ok(fa), Ok(fb), Ok(fc)) =
    (eval_f64(&a), eval_f64(&b), eval_f64(&c))
  {
    if fa == 0.0 {
      return Err(Unsolvable("degenerate quadratic".to_string()));
    }
    let discriminant = fb * fb - 4.0 * fa * fc;
    if discriminant < 0.0 {
      return Ok(Vec::new());
    }
    let sqrt_d = discriminant.sqrt();
    let mut roots = [
      (-fb - sqrt_d) / (2.0 * fa),
      (-fb + sqrt_d) / (2.0 * fa),
    ];
    roots.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    if (roots[0] - roots[1]).abs() < 1e-12 {
      return Ok(vec![Expr::Real(roots[0])]);
    }
    return Ok(vec![Expr::Real(roots[0]), Expr::Real(roots[1])]);
  }

  Err(Unsolvable(
    "quadratic with symbolic coefficients".to_string(),
  ))
}

fn solve_higher_degree(
  coeffs: &CoeffMap,
  degree: u32,
  var: &str,
  budget: &mut Budget,
) -> SolveResult {
  let mut dense = vec![Rational64::zero(); degree as usize + 1];
  for (exponent, coeff) in coeffs {
    match as_rational(coeff) {
      Some(r) => dense[*exponent as usize] = r,
      None => {
        return Err(Unsolvable(format!(
          "degree-{} equation with non-rational coefficients",
          degree
        )));
      }
    }
  }

  let mut solutions: Vec<Expr> = Vec::new();
  while dense.len() - 1 > 2 {
    budget.spend()?;
    match find_rational_root(&dense) {
      Some(root) => {
        solutions.push(rational_to_expr(root));
        dense = deflate(&dense, root);
      }
      None => {
        return Err(Unsolvable(format!(
          "no rational root found for the degree-{} factor",
          dense.len() - 1
        )));
      }
    }
  }

  let mut remaining = CoeffMap::new();
  for (exponent, coeff) in dense.iter().enumerate() {
    if !coeff.is_zero() {
      remaining.insert(exponent as u32, rational_to_expr(*coeff));
    }
  }
  solutions.extend(solve_poly(remaining, var, budget)?);
  Ok(solutions)
}

fn rational_to_expr(r: Rational64) -> Expr {
  if r.denom() == &1 {
    Expr::Integer(*r.numer())
  } else {
    Expr::Rational(r)
  }
}

/// Order solutions numerically where possible and drop duplicates.
fn dedupe_solutions(solutions: Vec<Expr>) -> Vec<Expr> {
  let mut numeric: Vec<(f64, Expr)> = Vec::new();
  let mut symbolic: Vec<Expr> = Vec::new();
  for solution in solutions {
    match eval_f64(&solution) {
      Ok(value) => {
        if !numeric.iter().any(|(v, _)| (v - value).abs() < 1e-9) {
          numeric.push((value, solution));
        }
      }
      Err(_) => {
        if !symbolic.contains(&solution) {
          symbolic.push(solution);
        }
      }
    }
  }
  numeric.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
  let mut result: Vec<Expr> =
    numeric.into_iter().map(|(_, expr)| expr).collect();
  result.extend(symbolic);
  result
}

/// One-sided solution of `expr > 0` (strict) or `expr >= 0` over the real
/// line, for the shapes the domain summary can phrase: numeric linear
/// terms and sign-definite quadratics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
  Greater,
  GreaterEq,
  Less,
  LessEq,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IneqSolution {
  AllReals,
  Never,
  Bound { kind: BoundKind, value: f64 },
}

pub fn solve_positivity(
  expr: &Expr,
  var: &str,
  strict: bool,
) -> Option<IneqSolution> {
  let coeffs = poly_coefficients(expr, var)?;
  let degree = coeffs.keys().next_back().copied().unwrap_or(0);
  let coeff_at = |k: u32| -> Option<f64> {
    match coeffs.get(&k) {
      Some(c) => eval_f64(c).ok(),
      None => Some(0.0),
    }
  };
  match degree {
    0 => {
      let c = coeff_at(0)?;
      let holds = if strict { c > 0.0 } else { c >= 0.0 };
      Some(if holds {
        IneqSolution::AllReals
      } else {
        IneqSolution::Never
      })
    }
    1 => {
      let a = coeff_at(1)?;
      let b = coeff_at(0)?;
      if a == 0.0 {
        return None;
      }
      let bound = -b / a;
      let kind = match (a > 0.0, strict) {
        (true, true) => BoundKind::Greater,
        (true, false) => BoundKind::GreaterEq,
        (false, true) => BoundKind::Less,
        (false, false) => BoundKind::LessEq,
      };
      Some(IneqSolution::Bound { kind, value: bound })
    }
    2 => {
      let a = coeff_at(2)?;
      let b = coeff_at(1)?;
      let c = coeff_at(0)?;
      let discriminant = b * b - 4.0 * a * c;
      if discriminant < 0.0 {
        return Some(if a > 0.0 {
          IneqSolution::AllReals
        } else {
          IneqSolution::Never
        });
      }
      if discriminant == 0.0 && !strict {
        return Some(if a > 0.0 {
          IneqSolution::AllReals
        } else {
          IneqSolution::Never
        });
      }
      None
    }
    _ => None,
  }
}

/// Structural proof that an expression is non-negative for every real
/// assignment of its variables. Conservative: `false` means unknown.
pub fn is_always_nonnegative(expr: &Expr) -> bool {
  match expr {
    Expr::Integer(n) => *n >= 0,
    Expr::Rational(r) => !r.is_negative(),
    Expr::Real(f) => *f >= 0.0,
    Expr::Constant(_) => true,
    Expr::FunctionCall { name, args } if args.len() == 1 => {
      matches!(name.as_str(), "abs" | "sqrt" | "exp" | "cosh")
    }
    Expr::BinaryOp { op, left, right } => match op {
      BinaryOperator::Power => match right.as_ref() {
        Expr::Integer(n) if *n > 0 && n % 2 == 0 => true,
        _ => is_always_nonnegative(left),
      },
      BinaryOperator::Plus => {
        is_always_nonnegative(left) && is_always_nonnegative(right)
      }
      BinaryOperator::Times | BinaryOperator::Divide => {
        (is_always_nonnegative(left) && is_always_nonnegative(right))
          || left == right
      }
      BinaryOperator::Minus => false,
    },
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::syntax::expr_to_string;

  fn x() -> Expr {
    Expr::Identifier("x".to_string())
  }

  fn y() -> Expr {
    Expr::Identifier("y".to_string())
  }

  #[test]
  fn solves_linear_equation() {
    // x - 2 = 0  =>  x = 2
    let lhs = Expr::binary(BinaryOperator::Minus, x(), Expr::Integer(2));
    let solutions = solve_equation(&lhs, &Expr::Integer(0), "x").unwrap();
    assert_eq!(solutions, vec![Expr::Integer(2)]);
  }

  #[test]
  fn solves_quadratic_with_integer_roots() {
    // x^2 - 4 = 0  =>  x = -2, 2
    let lhs = Expr::binary(
      BinaryOperator::Minus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(4),
    );
    let solutions = solve_equation(&lhs, &Expr::Integer(0), "x").unwrap();
    assert_eq!(solutions, vec![Expr::Integer(-2), Expr::Integer(2)]);
  }

  #[test]
  fn quadratic_without_real_roots_is_empty() {
    // x^2 + 1 = 0 has no real solutions
    let lhs = Expr::binary(
      BinaryOperator::Plus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(1),
    );
    let solutions = solve_equation(&lhs, &Expr::Integer(0), "x").unwrap();
    assert!(solutions.is_empty());
  }

  #[test]
  fn rational_equation_solves_through_numerator() {
    // (x + 1)/(x - 2) = 0  =>  x = -1
    let lhs = Expr::binary(
      BinaryOperator::Divide,
      Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1)),
      Expr::binary(BinaryOperator::Minus, x(), Expr::Integer(2)),
    );
    let solutions = solve_equation(&lhs, &Expr::Integer(0), "x").unwrap();
    assert_eq!(solutions, vec![Expr::Integer(-1)]);
  }

  #[test]
  fn inverts_rational_function_symbolically() {
    // (x + 1)/(x - 2) = y  =>  x linear in y
    let lhs = Expr::binary(
      BinaryOperator::Divide,
      Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1)),
      Expr::binary(BinaryOperator::Minus, x(), Expr::Integer(2)),
    );
    let solutions = solve_equation(&lhs, &y(), "x").unwrap();
    assert_eq!(solutions.len(), 1);
    let vars = crate::syntax::free_variables(&solutions[0]);
    assert!(vars.contains("y"));
    assert!(!vars.contains("x"));
  }

  #[test]
  fn quadratic_in_x_with_symbolic_target_is_unsolvable() {
    // x^2 - 4 = y is outside the supported forms
    let lhs = Expr::binary(
      BinaryOperator::Minus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(4),
    );
    assert!(solve_equation(&lhs, &y(), "x").is_err());
  }

  #[test]
  fn inverts_logarithm() {
    // log(x + 1) = y  =>  x = exp(y) - 1
    let lhs = Expr::call(
      "log",
      vec![Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1))],
    );
    let solutions = solve_equation(&lhs, &y(), "x").unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(expr_to_string(&solutions[0]), "exp(y) - 1");
  }

  #[test]
  fn trigonometric_equations_are_unsolvable() {
    let lhs = Expr::call("cos", vec![x()]);
    assert!(solve_equation(&lhs, &Expr::Integer(0), "x").is_err());
  }

  #[test]
  fn cubic_with_zero_root_factors_out() {
    // x^3 - 2x = 0  =>  x = -sqrt(2), 0, sqrt(2)
    let lhs = Expr::binary(
      BinaryOperator::Minus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(3)),
      Expr::binary(BinaryOperator::Times, Expr::Integer(2), x()),
    );
    let solutions = solve_equation(&lhs, &Expr::Integer(0), "x").unwrap();
    assert_eq!(solutions.len(), 3);
    let approximations: Vec<f64> = solutions
      .iter()
      .map(|s| eval_f64(s).unwrap())
      .collect();
    assert!((approximations[0] + std::f64::consts::SQRT_2).abs() < 1e-9);
    assert!(approximations[1].abs() < 1e-9);
    assert!((approximations[2] - std::f64::consts::SQRT_2).abs() < 1e-9);
  }

  #[test]
  fn exp_never_reaches_zero() {
    let lhs = Expr::call("exp", vec![x()]);
    let solutions = solve_equation(&lhs, &Expr::Integer(0), "x").unwrap();
    assert!(solutions.is_empty());
  }

  #[test]
  fn linear_positivity_produces_a_bound() {
    // x + 1 > 0  =>  x > -1
    let expr = Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1));
    let solution = solve_positivity(&expr, "x", true).unwrap();
    assert_eq!(
      solution,
      IneqSolution::Bound {
        kind: BoundKind::Greater,
        value: -1.0
      }
    );
  }

  #[test]
  fn sign_definite_quadratic_holds_everywhere() {
    // x^2 + 1 >= 0 holds for every real x
    let expr = Expr::binary(
      BinaryOperator::Plus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(1),
    );
    assert_eq!(
      solve_positivity(&expr, "x", false),
      Some(IneqSolution::AllReals)
    );
  }

  #[test]
  fn recognizes_always_nonnegative_shapes() {
    let squared_plus_one = Expr::binary(
      BinaryOperator::Plus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(1),
    );
    assert!(is_always_nonnegative(&squared_plus_one));
    let shifted = Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1));
    assert!(!is_always_nonnegative(&shifted));
  }
}
