use super::format::{format_number, format_value, to_safe_float};
use super::restriction::{Restriction, RestrictionCheck};
use super::trace::AnalysisTrace;
use crate::algebra::{eval_f64, simplify};
use crate::syntax::{expr_to_string, substitute_variable, Expr};

/// Outcome of evaluating the function at one point. A domain violation is
/// a warning, not a failure: the numeric result is still produced when
/// possible, and conversion failures surface as a missing approximation
/// with the reason attached to the trace.
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
  pub trace: AnalysisTrace,
  pub exact: Option<Expr>,
  pub approx: Option<f64>,
  pub domain_violation: bool,
  pub violation_detail: Option<String>,
}

/// Evaluate `f` at `x_value`, checking the restriction list first. Never
/// fails for well-typed inputs: a malformed x is rejected by its parser
/// before reaching here.
pub fn evaluate_at(
  expr: &Expr,
  x_value: &Expr,
  original_text: &str,
  restrictions: &[Restriction],
) -> EvaluationOutcome {
  let mut trace = AnalysisTrace::new();
  let shown_x = format_value(x_value);
  trace.push(format!(
    "Step 1: evaluate f(x) = {} at x = {}",
    original_text, shown_x
  ));

  let mut violations: Vec<String> = Vec::new();
  for restriction in restrictions {
    if let RestrictionCheck::Violated(detail) =
      restriction.admits("x", x_value)
    {
      violations.push(detail);
    }
  }
  let domain_violation = !violations.is_empty();
  let violation_detail = if domain_violation {
    Some(violations.join("; "))
  } else {
    None
  };
  if let Some(detail) = &violation_detail {
    trace.push(format!(
      "Warning: x = {} is NOT in the domain.",
      shown_x
    ));
    trace.push(format!("Violated restrictions: {}", detail));
  }

  trace.push(format!(
    "Step 2: substitute x = {} into the function.",
    shown_x
  ));
  let substituted = substitute_variable(expr, "x", x_value);
  trace.push(format!(
    "Step 3: f({}) = {}",
    shown_x,
    expr_to_string(&substituted)
  ));

  trace.push("Step 4: simplify the result algebraically.".to_string());
  let simplified = simplify(substituted);
  trace.push(format!(
    "Simplified result: {}",
    expr_to_string(&simplified)
  ));

  trace.push("Step 5: convert to a numeric value.".to_string());
  let result = to_safe_float(&simplified, 2);
  match result.approx {
    Some(value) => {
      trace.push(format!(
        "Decimal value (2 decimals): {}",
        format_number(value)
      ));
      if let Ok(x_decimal) = eval_f64(x_value) {
        trace.push(format!(
          "Ordered pair: ({}, {})",
          format_number(x_decimal),
          format_number(value)
        ));
      }
    }
    None => {
      let reason = result
        .failure
        .as_ref()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "unknown".to_string());
      trace.push(format!("No decimal value: {}", reason));
    }
  }

  EvaluationOutcome {
    trace,
    exact: result.exact,
    approx: result.approx,
    domain_violation,
    violation_detail,
  }
}
