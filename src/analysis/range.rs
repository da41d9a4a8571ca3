use super::domain::analyze_domain_in;
use super::format::{format_number, to_safe_float};
use super::trace::AnalysisTrace;
use crate::algebra::{
  as_numer_denom, degree, differentiate, eval_f64, is_polynomial,
  leading_coefficient, solve_equation,
};
use crate::syntax::{expr_to_string, substitute_variable, Expr};

/// Result of a range analysis. The summary is best-effort: heuristic
/// branches that cannot resolve the range default to ℝ and say so.
#[derive(Debug, Clone)]
pub struct RangeAnalysis {
  pub summary: String,
  pub trace: AnalysisTrace,
}

const UNRESOLVED: &str = "ℝ (approximate, unresolved)";

/// Estimate the range of a function of `x`.
///
/// Primary strategy: solve `f(x) = y` for `x` and take the domain of the
/// inverse (in `y`). When the equation resists solving, fall back to a
/// structural classification: polynomial parity, then rational-function
/// degree comparison, then an explicit unresolved default.
pub fn analyze_range(expr: &Expr) -> RangeAnalysis {
  let mut trace = AnalysisTrace::new();
  trace.push("Step 1: try to find the range by solving y = f(x) for x.");

  let y = Expr::Identifier("y".to_string());
  match solve_equation(expr, &y, "x") {
    Ok(solutions) if !solutions.is_empty() => {
      inverse_path(&solutions[0], &mut trace)
    }
    Ok(_) => {
      trace.push(
        "Step 2: no solution for x was found. Analyzing the structure."
          .to_string(),
      );
      fallback_path(expr, trace)
    }
    Err(reason) => {
      trace.push(format!(
        "Step 2: could not solve y = f(x) for x ({}). Analyzing the structure.",
        reason
      ));
      fallback_path(expr, trace)
    }
  }
}

/// The range of f equals the domain of the inverse, read in `y`.
fn inverse_path(inverse: &Expr, trace: &mut AnalysisTrace) -> RangeAnalysis {
  trace.push(format!(
    "Step 2: solution for x = {}",
    expr_to_string(inverse)
  ));
  let (_, denom) = as_numer_denom(inverse);
  if !denom.is_one() {
    trace.push(format!(
      "Step 3: identify the denominator of the inverse: {}",
      expr_to_string(&denom)
    ));
  }
  let inverse_domain = analyze_domain_in(inverse, "y");
  for step in inverse_domain.trace.steps() {
    trace.push(step.clone());
  }
  let summary = inverse_domain.summary;
  trace.push(format!(
    "Step 4: domain of the inverse (range of f): {}",
    summary
  ));
  RangeAnalysis {
    summary,
    trace: trace.clone(),
  }
}

fn fallback_path(expr: &Expr, mut trace: AnalysisTrace) -> RangeAnalysis {
  if let Some(poly_degree) = degree(expr, "x") {
    return polynomial_branch(expr, poly_degree, trace);
  }

  let (numer, denom) = as_numer_denom(expr);
  if !denom.is_one()
    && is_polynomial(&numer, "x")
    && is_polynomial(&denom, "x")
  {
    return rational_branch(&numer, &denom, trace);
  }

  trace.push(
    "Step 3: no structural rule applies; the range is approximated as all reals."
      .to_string(),
  );
  finish(UNRESOLVED.to_string(), trace)
}

fn polynomial_branch(
  expr: &Expr,
  poly_degree: u32,
  mut trace: AnalysisTrace,
) -> RangeAnalysis {
  trace.push("Step 3: the function is a polynomial.".to_string());
  if poly_degree % 2 != 0 {
    trace.push(format!(
      "Step 4: polynomial of odd degree ({}); the range is all reals.",
      poly_degree
    ));
    return finish("ℝ".to_string(), trace);
  }

  trace.push(format!(
    "Step 4: polynomial of even degree ({}).",
    poly_degree
  ));
  let leading = leading_coefficient(expr, "x")
    .and_then(|coeff| eval_f64(&coeff).ok());
  let extremum = bounded_extremum(expr);
  match (leading, extremum) {
    (Some(lead), Some(value)) if lead > 0.0 => {
      trace.push(format!(
        "Step 5: minimum at y = {}",
        format_number(value)
      ));
      finish(format!("[{}, ∞)", format_number(value)), trace)
    }
    (Some(lead), Some(value)) if lead < 0.0 => {
      trace.push(format!(
        "Step 5: maximum at y = {}",
        format_number(value)
      ));
      finish(format!("(-∞, {}]", format_number(value)), trace)
    }
    _ => {
      trace.push(
        "Step 5: could not locate the extremum; the range is approximated as all reals."
          .to_string(),
      );
      finish(UNRESOLVED.to_string(), trace)
    }
  }
}

/// Value of the polynomial at the critical point of its derivative.
fn bounded_extremum(expr: &Expr) -> Option<f64> {
  let derivative = differentiate(expr, "x")?;
  let critical_points =
    solve_equation(&derivative, &Expr::Integer(0), "x").ok()?;
  let critical = critical_points.first()?;
  let value = substitute_variable(expr, "x", critical);
  to_safe_float(&value, 2).approx
}

fn rational_branch(
  numer: &Expr,
  denom: &Expr,
  mut trace: AnalysisTrace,
) -> RangeAnalysis {
  trace.push(
    "Step 3: the function is a ratio of polynomials; comparing degrees."
      .to_string(),
  );
  let numer_degree = degree(numer, "x").unwrap_or(0);
  let denom_degree = degree(denom, "x").unwrap_or(0);

  if numer_degree == denom_degree {
    let asymptote = leading_ratio(numer, denom);
    match asymptote {
      Some(value) => {
        trace.push(format!(
          "Step 4: horizontal asymptote at y = {}",
          format_number(value)
        ));
        finish(
          format!("ℝ \\ {{ {} }}", format_number(value)),
          trace,
        )
      }
      None => {
        trace.push(
          "Step 4: could not evaluate the asymptote; the range is approximated as all reals."
            .to_string(),
        );
        finish(UNRESOLVED.to_string(), trace)
      }
    }
  } else if numer_degree < denom_degree {
    trace.push("Step 4: horizontal asymptote at y = 0".to_string());
    finish(format!("ℝ \\ {{ {} }}", format_number(0.0)), trace)
  } else {
    trace.push(
      "Step 4: no horizontal asymptote; the range is approximated as all reals."
        .to_string(),
    );
    finish(UNRESOLVED.to_string(), trace)
  }
}

fn leading_ratio(numer: &Expr, denom: &Expr) -> Option<f64> {
  let a = eval_f64(&leading_coefficient(numer, "x")?).ok()?;
  let b = eval_f64(&leading_coefficient(denom, "x")?).ok()?;
  if b == 0.0 {
    return None;
  }
  Some(a / b)
}

fn finish(summary: String, mut trace: AnalysisTrace) -> RangeAnalysis {
  trace.push(format!("Final range: {}", summary));
  RangeAnalysis { summary, trace }
}
