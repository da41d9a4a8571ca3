use crate::algebra::{eval_f64, simplify, EvalError};
use crate::syntax::{expr_to_string, Expr};

/// Why a symbolic value could not be reduced to a decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericFailure {
  NonReal(String),
  NonFinite(String),
  Conversion(String),
}

impl std::fmt::Display for NumericFailure {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      NumericFailure::NonReal(detail) => {
        write!(f, "the value is not real ({})", detail)
      }
      NumericFailure::NonFinite(detail) => {
        write!(f, "the value is not finite ({})", detail)
      }
      NumericFailure::Conversion(detail) => {
        write!(f, "could not convert to a decimal ({})", detail)
      }
    }
  }
}

/// Outcome of reducing a symbolic value to a decimal: either both the
/// exact and approximate forms, or the exact form with a failure reason.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericResult {
  pub exact: Option<Expr>,
  pub approx: Option<f64>,
  pub failure: Option<NumericFailure>,
}

impl NumericResult {
  pub fn is_ok(&self) -> bool {
    self.failure.is_none()
  }
}

/// Render a float for human display: fixed two decimals, switching to
/// scientific notation for magnitudes above 10000 or below 0.0001.
/// Never fails; non-finite floats are stringified as-is.
pub fn format_number(value: f64) -> String {
  if !value.is_finite() {
    return value.to_string();
  }
  let magnitude = value.abs();
  if magnitude > 10000.0 || (magnitude < 0.0001 && value != 0.0) {
    format!("{:.1e}", value)
  } else {
    format!("{:.2}", value)
  }
}

/// Display helper for values that may not be numeric: numeric expressions
/// go through `format_number`, anything else is stringified as-is.
pub fn format_value(expr: &Expr) -> String {
  match eval_f64(expr) {
    Ok(value) => format_number(value),
    Err(_) => expr_to_string(expr),
  }
}

/// The single gate between symbolic and decimal representations:
/// simplify, evaluate at full f64 precision, reject non-real and
/// non-finite values explicitly, and round to `decimals` places.
/// Never panics; every failure mode lands in the result's failure field.
pub fn to_safe_float(expr: &Expr, decimals: u32) -> NumericResult {
  let exact = simplify(expr.clone());
  match eval_f64(&exact) {
    Ok(value) => {
      let scale = 10f64.powi(decimals as i32);
      let rounded = (value * scale).round() / scale;
      NumericResult {
        exact: Some(exact),
        approx: Some(rounded),
        failure: None,
      }
    }
    Err(EvalError::NonReal(detail)) => NumericResult {
      exact: Some(exact),
      approx: None,
      failure: Some(NumericFailure::NonReal(detail)),
    },
    Err(EvalError::NonFinite(detail)) => NumericResult {
      exact: Some(exact),
      approx: None,
      failure: Some(NumericFailure::NonFinite(detail)),
    },
    Err(EvalError::FreeSymbol(detail)) => NumericResult {
      exact: Some(exact),
      approx: None,
      failure: Some(NumericFailure::Conversion(format!(
        "free symbol remains: {}",
        detail
      ))),
    },
  }
}
