use crate::syntax::{BinaryOperator, Expr, UnaryOperator};

/// Why a symbolic value has no meaningful decimal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
  /// The value has a non-negligible imaginary part (negative radicand,
  /// logarithm of a negative number, inverse trig outside [-1, 1]).
  NonReal(String),
  /// The value exists but is infinite or undefined (division by zero,
  /// logarithm of zero, overflow).
  NonFinite(String),
  /// The expression still contains a free symbol and cannot be reduced.
  FreeSymbol(String),
}

impl std::fmt::Display for EvalError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      EvalError::NonReal(detail) => write!(f, "non-real value: {}", detail),
      EvalError::NonFinite(detail) => {
        write!(f, "non-finite value: {}", detail)
      }
      EvalError::FreeSymbol(name) => {
        write!(f, "free symbol remains: {}", name)
      }
    }
  }
}

/// Evaluate a closed expression to an `f64`. Every failure mode is an
/// explicit error; the function never panics and never returns NaN or an
/// infinity as a success value.
pub fn eval_f64(expr: &Expr) -> Result<f64, EvalError> {
  let value = eval_inner(expr)?;
  if value.is_finite() {
    Ok(value)
  } else {
    Err(EvalError::NonFinite(format!(
      "{} does not evaluate to a finite number",
      expr
    )))
  }
}

fn eval_inner(expr: &Expr) -> Result<f64, EvalError> {
  match expr {
    Expr::Integer(n) => Ok(*n as f64),
    Expr::Rational(r) => Ok(*r.numer() as f64 / *r.denom() as f64),
    Expr::Real(f) => Ok(*f),
    Expr::Constant(name) => match name.as_str() {
      "pi" => Ok(std::f64::consts::PI),
      "e" => Ok(std::f64::consts::E),
      other => Err(EvalError::FreeSymbol(other.to_string())),
    },
    Expr::Identifier(name) => Err(EvalError::FreeSymbol(name.clone())),
    Expr::UnaryOp { op, operand } => {
      let value = eval_inner(operand)?;
      match op {
        UnaryOperator::Minus => Ok(-value),
      }
    }
    Expr::BinaryOp { op, left, right } => {
      let a = eval_inner(left)?;
      let b = eval_inner(right)?;
      match op {
        BinaryOperator::Plus => Ok(a + b),
        BinaryOperator::Minus => Ok(a - b),
        BinaryOperator::Times => Ok(a * b),
        BinaryOperator::Divide => {
          if b == 0.0 {
            Err(EvalError::NonFinite(format!("division by zero in {}", expr)))
          } else {
            Ok(a / b)
          }
        }
        BinaryOperator::Power => eval_power(a, b),
      }
    }
    Expr::FunctionCall { name, args } => eval_function(name, args),
  }
}

fn eval_power(base: f64, exponent: f64) -> Result<f64, EvalError> {
  if base == 0.0 && exponent < 0.0 {
    return Err(EvalError::NonFinite(
      "zero raised to a negative power".to_string(),
    ));
  }
  if base < 0.0 && exponent.fract() != 0.0 {
    return Err(EvalError::NonReal(format!(
      "negative base {} raised to fractional power {}",
      base, exponent
    )));
  }
  Ok(base.powf(exponent))
}

fn eval_function(name: &str, args: &[Expr]) -> Result<f64, EvalError> {
  if args.len() != 1 {
    return Err(EvalError::FreeSymbol(format!(
      "{} expects one argument",
      name
    )));
  }
  let u = eval_inner(&args[0])?;
  match name {
    "sin" => Ok(u.sin()),
    "cos" => Ok(u.cos()),
    "tan" => Ok(u.tan()),
    "cot" => nonzero_reciprocal(u.tan(), "cot"),
    "sec" => nonzero_reciprocal(u.cos(), "sec"),
    "csc" => nonzero_reciprocal(u.sin(), "csc"),
    "asin" => {
      if u.abs() > 1.0 {
        Err(EvalError::NonReal(format!("asin({}) is not real", u)))
      } else {
        Ok(u.asin())
      }
    }
    "acos" => {
      if u.abs() > 1.0 {
        Err(EvalError::NonReal(format!("acos({}) is not real", u)))
      } else {
        Ok(u.acos())
      }
    }
    "atan" => Ok(u.atan()),
    "acot" => Ok(std::f64::consts::FRAC_PI_2 - u.atan()),
    "sinh" => Ok(u.sinh()),
    "cosh" => Ok(u.cosh()),
    "tanh" => Ok(u.tanh()),
    "log" => {
      if u < 0.0 {
        Err(EvalError::NonReal(format!("log({}) is not real", u)))
      } else if u == 0.0 {
        Err(EvalError::NonFinite("log(0) is not finite".to_string()))
      } else {
        Ok(u.ln())
      }
    }
    "exp" => Ok(u.exp()),
    "sqrt" => {
      if u < 0.0 {
        Err(EvalError::NonReal(format!("sqrt({}) is not real", u)))
      } else {
        Ok(u.sqrt())
      }
    }
    "abs" => Ok(u.abs()),
    other => Err(EvalError::FreeSymbol(format!("unknown function {}", other))),
  }
}

fn nonzero_reciprocal(value: f64, name: &str) -> Result<f64, EvalError> {
  if value == 0.0 {
    Err(EvalError::NonFinite(format!("{} pole", name)))
  } else {
    Ok(1.0 / value)
  }
}
