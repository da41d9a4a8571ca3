use num_rational::Rational64;

use crate::algebra::{eval_f64, simplify};
use crate::syntax::{BinaryOperator, Expr};
use crate::AnalysisError;

/// Parse a user-supplied x-value: an integer or decimal literal, a
/// `numerator/denominator` fraction (exact when both sides are integers),
/// or a constant name (`pi`, `e`), each optionally negated. Anything else
/// is a descriptive error that stops before evaluation.
pub fn parse_x_value(text: &str) -> Result<Expr, AnalysisError> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return Err(AnalysisError::XValue("the value is empty".to_string()));
  }
  if let Some((numer_text, denom_text)) = trimmed.split_once('/') {
    let numer = parse_atom(numer_text)?;
    let denom = parse_atom(denom_text)?;
    if matches!(eval_f64(&denom), Ok(value) if value == 0.0) {
      return Err(AnalysisError::XValue(
        "the denominator is zero".to_string(),
      ));
    }
    if let (Expr::Integer(a), Expr::Integer(b)) = (&numer, &denom) {
      return Ok(Expr::Rational(Rational64::new(*a, *b)));
    }
    return Ok(simplify(Expr::binary(BinaryOperator::Divide, numer, denom)));
  }
  parse_atom(trimmed)
}

fn parse_atom(text: &str) -> Result<Expr, AnalysisError> {
  let trimmed = text.trim();
  if let Some(rest) = trimmed.strip_prefix('-') {
    return parse_atom(rest).map(|expr| simplify(Expr::neg(expr)));
  }
  if let Ok(n) = trimmed.parse::<i64>() {
    return Ok(Expr::Integer(n));
  }
  if let Ok(f) = trimmed.parse::<f64>() {
    if f.is_finite() && trimmed.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '.') {
      return Ok(Expr::Real(f));
    }
  }
  match trimmed {
    "pi" => Ok(Expr::Constant("pi".to_string())),
    "e" => Ok(Expr::Constant("e".to_string())),
    other => Err(AnalysisError::XValue(format!(
      "could not interpret '{}'",
      other
    ))),
  }
}
