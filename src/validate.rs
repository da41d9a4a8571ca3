use crate::algebra::simplify;
use crate::syntax::{free_variables, Expr};
use crate::{parse_expression, AnalysisError};

/// Confirm that normalized text denotes a valid expression in exactly the
/// variable `x`, returning the lightly pre-simplified tree. Parse errors
/// are quoted verbatim; a wrong free-variable set is its own message.
/// The single-variable invariant is enforced here once and never
/// re-checked downstream.
pub fn validate(normalized: &str) -> Result<Expr, AnalysisError> {
  if normalized.trim().is_empty() {
    return Err(AnalysisError::EmptyInput);
  }
  let expr = parse_expression(normalized)?;
  let variables = free_variables(&expr);
  if variables.is_empty() {
    return Err(AnalysisError::Validation(
      "The expression must be a function of x.".to_string(),
    ));
  }
  if variables.len() != 1 || !variables.contains("x") {
    let mut found: Vec<&str> =
      variables.iter().map(|name| name.as_str()).collect();
    found.sort();
    return Err(AnalysisError::Validation(format!(
      "The expression must depend on x only (found: {}).",
      found.join(", ")
    )));
  }
  Ok(simplify(expr))
}
