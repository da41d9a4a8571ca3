use super::format::{format_number, to_safe_float};
use super::trace::AnalysisTrace;
use crate::algebra::{simplify, solve_equation};
use crate::syntax::{expr_to_string, substitute_variable, Expr};

/// Axis intercepts of the function, with the `(x, y)` pairs kept for the
/// plotting consumer.
#[derive(Debug, Clone)]
pub struct IntersectionAnalysis {
  pub summary: String,
  pub trace: AnalysisTrace,
  pub y_point: Option<(f64, f64)>,
  pub x_points: Vec<(f64, f64)>,
}

/// Locate the axis intercepts of a function of `x`. A failure on either
/// axis (or on an individual x-intercept candidate) is reported in place
/// and never aborts the rest.
pub fn analyze_intersections(expr: &Expr) -> IntersectionAnalysis {
  let mut trace = AnalysisTrace::new();
  let mut lines: Vec<String> = Vec::new();
  let mut y_point = None;
  let mut x_points: Vec<(f64, f64)> = Vec::new();

  trace.push("Step 1: intersection with the Y axis (x = 0).".to_string());
  let at_zero =
    simplify(substitute_variable(expr, "x", &Expr::Integer(0)));
  let y_result = to_safe_float(&at_zero, 2);
  match y_result.approx {
    Some(value) => {
      trace.push(format!(
        "Solution: f(0) = {} ≈ {}",
        expr_to_string(&at_zero),
        format_number(value)
      ));
      lines.push(format!("Y-intercept: (0, {})", format_number(value)));
      y_point = Some((0.0, value));
    }
    None => {
      let reason = y_result
        .failure
        .map(|f| f.to_string())
        .unwrap_or_else(|| "unknown".to_string());
      trace.push(format!("f(0) has no decimal value: {}", reason));
      lines.push("The function is not defined at x = 0.".to_string());
    }
  }

  trace.push("Step 2: intersection with the X axis (f(x) = 0).".to_string());
  match solve_equation(expr, &Expr::Integer(0), "x") {
    Ok(solutions) => {
      let mut shown: Vec<String> = Vec::new();
      for solution in solutions {
        let converted = to_safe_float(&solution, 2);
        match converted.approx {
          Some(value) => {
            shown.push(format_number(value));
            lines.push(format!("X-intercept: ({}, 0)", format_number(value)));
            x_points.push((value, 0.0));
          }
          None => {
            let reason = converted
              .failure
              .map(|f| f.to_string())
              .unwrap_or_else(|| "unknown".to_string());
            trace.push(format!(
              "Skipping the solution {} ({}).",
              expr_to_string(&solution),
              reason
            ));
          }
        }
      }
      if x_points.is_empty() {
        trace.push("Solution: f(x) = 0 has no real solution.".to_string());
        lines.push("No real x-intercepts.".to_string());
      } else {
        trace.push(format!(
          "Solution: f(x) = 0 => x = {}",
          shown.join(", ")
        ));
      }
    }
    Err(reason) => {
      trace.push(format!("Could not solve f(x) = 0 ({}).", reason));
      lines.push("The x-intercepts could not be determined.".to_string());
    }
  }

  IntersectionAnalysis {
    summary: lines.join("\n"),
    trace,
    y_point,
    x_points,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::syntax::BinaryOperator;

  fn x() -> Expr {
    Expr::Identifier("x".to_string())
  }

  #[test]
  fn rational_function_intercepts() {
    // (x + 1)/(x - 2): Y-intercept (0, -0.50), X-intercept (-1, 0)
    let expr = Expr::binary(
      BinaryOperator::Divide,
      Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1)),
      Expr::binary(BinaryOperator::Minus, x(), Expr::Integer(2)),
    );
    let analysis = analyze_intersections(&expr);
    assert_eq!(analysis.y_point, Some((0.0, -0.5)));
    assert_eq!(analysis.x_points, vec![(-1.0, 0.0)]);
    assert!(analysis.summary.contains("Y-intercept: (0, -0.50)"));
    assert!(analysis.summary.contains("X-intercept: (-1.00, 0)"));
  }

  #[test]
  fn parabola_has_two_x_intercepts() {
    let expr = Expr::binary(
      BinaryOperator::Minus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(4),
    );
    let analysis = analyze_intersections(&expr);
    assert_eq!(analysis.y_point, Some((0.0, -4.0)));
    assert_eq!(analysis.x_points, vec![(-2.0, 0.0), (2.0, 0.0)]);
  }

  #[test]
  fn reports_missing_real_intercepts() {
    // x^2 + 1 never crosses the X axis
    let expr = Expr::binary(
      BinaryOperator::Plus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(1),
    );
    let analysis = analyze_intersections(&expr);
    assert!(analysis.x_points.is_empty());
    assert!(analysis.summary.contains("No real x-intercepts."));
  }

  #[test]
  fn undefined_y_intercept_is_reported_not_fatal() {
    // 1/x is not defined at x = 0 but still has analysis output
    let expr =
      Expr::binary(BinaryOperator::Divide, Expr::Integer(1), x());
    let analysis = analyze_intersections(&expr);
    assert_eq!(analysis.y_point, None);
    assert!(analysis
      .summary
      .contains("The function is not defined at x = 0."));
  }

  #[test]
  fn intercepts_substitute_back_to_zero() {
    let expr = Expr::binary(
      BinaryOperator::Minus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(4),
    );
    let analysis = analyze_intersections(&expr);
    for (x_value, _) in &analysis.x_points {
      let substituted =
        substitute_variable(&expr, "x", &Expr::Real(*x_value));
      let back = to_safe_float(&substituted, 2);
      assert!(back.approx.unwrap().abs() < 1e-9);
    }
  }
}
