use super::format::format_number;
use super::restriction::{Relation, Restriction};
use super::trace::AnalysisTrace;
use crate::algebra::{
  as_numer_denom, eval_f64, factor_polynomial, is_always_nonnegative,
  solve_equation, solve_positivity, BoundKind, IneqSolution,
};
use crate::syntax::{
  expr_to_string, find_even_root_bases, find_function_calls, Expr,
};

/// Result of a domain analysis: the human-readable summary, the reasoning
/// trace, and the restriction list that defines admissibility.
#[derive(Debug, Clone)]
pub struct DomainAnalysis {
  pub summary: String,
  pub trace: AnalysisTrace,
  pub restrictions: Vec<Restriction>,
}

/// Derive the domain of a function of `x`.
pub fn analyze_domain(expr: &Expr) -> DomainAnalysis {
  analyze_domain_in(expr, "x")
}

/// Derive the domain treating `var` as the free variable. The range
/// analyzer reuses this on inverse expressions with variable `y`.
///
/// Each rule is guarded on its own: an unsolvable sub-problem makes that
/// rule contribute nothing (with a trace note) and never aborts the rest.
pub fn analyze_domain_in(expr: &Expr, var: &str) -> DomainAnalysis {
  let mut trace = AnalysisTrace::new();
  let mut restrictions: Vec<Restriction> = Vec::new();
  let mut exclusions: Vec<f64> = Vec::new();
  let mut requirements: Vec<String> = Vec::new();

  denominator_rule(
    expr,
    var,
    &mut trace,
    &mut restrictions,
    &mut exclusions,
  );
  logarithm_rule(expr, var, &mut trace, &mut restrictions, &mut requirements);
  radical_rule(expr, var, &mut trace, &mut restrictions, &mut requirements);

  let mut parts: Vec<String> = Vec::new();
  if !exclusions.is_empty() {
    exclusions
      .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut shown: Vec<String> = Vec::new();
    let mut last: Option<f64> = None;
    for value in exclusions {
      if let Some(previous) = last {
        if (value - previous).abs() < 1e-9 {
          continue;
        }
      }
      last = Some(value);
      shown.push(format_number(value));
    }
    parts.push(format!("ℝ \\ {{ {} }}", shown.join(", ")));
  }
  parts.extend(requirements);

  let summary = if parts.is_empty() {
    "ℝ".to_string()
  } else {
    parts.join("; ")
  };
  trace.push(format!("Final domain: {}", summary));

  DomainAnalysis {
    summary,
    trace,
    restrictions,
  }
}

/// Rule 1: rewrite as a single fraction; real zeros of the denominator
/// are excluded points.
fn denominator_rule(
  expr: &Expr,
  var: &str,
  trace: &mut AnalysisTrace,
  restrictions: &mut Vec<Restriction>,
  exclusions: &mut Vec<f64>,
) {
  let (_, denom) = as_numer_denom(expr);
  if denom.is_one() {
    return;
  }
  trace.push(format!(
    "Step: identify the denominator: {}",
    expr_to_string(&denom)
  ));
  let factored = factor_polynomial(&denom, var);
  if factored != denom {
    trace.push(format!(
      "Factored denominator: {}",
      expr_to_string(&factored)
    ));
  }
  trace.push(format!(
    "Step: find the values where {} = 0",
    expr_to_string(&factored)
  ));
  match solve_equation(&denom, &Expr::Integer(0), var) {
    Ok(zeros) => {
      if zeros.is_empty() {
        trace.push("The denominator never vanishes.".to_string());
        return;
      }
      let mut shown: Vec<String> = Vec::new();
      for zero in zeros {
        if let Ok(value) = eval_f64(&zero) {
          exclusions.push(value);
        }
        shown.push(expr_to_string(&zero));
        restrictions.push(Restriction::new(
          Expr::Identifier(var.to_string()),
          Relation::NotEqual,
          zero,
        ));
      }
      trace.push(format!(
        "Solution: {} = 0 => {} = {}",
        expr_to_string(&denom),
        var,
        shown.join(", ")
      ));
    }
    Err(reason) => {
      trace.push(format!(
        "Could not solve {} = 0 ({}); no exclusion recorded.",
        expr_to_string(&denom),
        reason
      ));
    }
  }
}

/// Rule 2: every logarithm argument must be positive.
fn logarithm_rule(
  expr: &Expr,
  var: &str,
  trace: &mut AnalysisTrace,
  restrictions: &mut Vec<Restriction>,
  requirements: &mut Vec<String>,
) {
  let mut seen: Vec<Expr> = Vec::new();
  for call in find_function_calls(expr, "log") {
    let arg = match &call {
      Expr::FunctionCall { args, .. } if args.len() == 1 => args[0].clone(),
      _ => continue,
    };
    if seen.contains(&arg) {
      continue;
    }
    seen.push(arg.clone());
    trace.push(format!(
      "Step: for log({}), the argument must be positive: {} > 0",
      expr_to_string(&arg),
      expr_to_string(&arg)
    ));
    restrictions.push(Restriction::new(
      arg.clone(),
      Relation::Greater,
      Expr::Integer(0),
    ));
    record_inequality(&arg, var, true, trace, requirements);
  }
}

/// Rule 3: bases of even-index radicals must be non-negative. Radicands
/// that are provably non-negative for every real input impose nothing.
fn radical_rule(
  expr: &Expr,
  var: &str,
  trace: &mut AnalysisTrace,
  restrictions: &mut Vec<Restriction>,
  requirements: &mut Vec<String>,
) {
  let mut seen: Vec<Expr> = Vec::new();
  for base in find_even_root_bases(expr) {
    if seen.contains(&base) {
      continue;
    }
    seen.push(base.clone());
    if is_always_nonnegative(&base) {
      trace.push(format!(
        "Step: the radicand {} is non-negative for every real {}; no restriction needed.",
        expr_to_string(&base),
        var
      ));
      continue;
    }
    trace.push(format!(
      "Step: for an even-index root of {}, the base must be non-negative: {} ≥ 0",
      expr_to_string(&base),
      expr_to_string(&base)
    ));
    restrictions.push(Restriction::new(
      base.clone(),
      Relation::GreaterEq,
      Expr::Integer(0),
    ));
    record_inequality(&base, var, false, trace, requirements);
  }
}

fn record_inequality(
  subject: &Expr,
  var: &str,
  strict: bool,
  trace: &mut AnalysisTrace,
  requirements: &mut Vec<String>,
) {
  let comparison = if strict { ">" } else { "≥" };
  match solve_positivity(subject, var, strict) {
    Some(IneqSolution::Bound { kind, value }) => {
      let solved = format!(
        "{} {} {}",
        var,
        bound_symbol(kind),
        format_number(value)
      );
      trace.push(format!(
        "Solution: {} {} 0 => {}",
        expr_to_string(subject),
        comparison,
        solved
      ));
      requirements.push(solved);
    }
    Some(IneqSolution::AllReals) => {
      trace.push(format!(
        "The condition {} {} 0 holds for every real {}.",
        expr_to_string(subject),
        comparison,
        var
      ));
    }
    Some(IneqSolution::Never) => {
      let unsatisfied = format!(
        "{} {} 0 (never satisfied)",
        expr_to_string(subject),
        comparison
      );
      trace.push(format!(
        "No real {} satisfies {} {} 0.",
        var,
        expr_to_string(subject),
        comparison
      ));
      requirements.push(unsatisfied);
    }
    None => {
      let raw =
        format!("{} {} 0", expr_to_string(subject), comparison);
      trace.push(format!(
        "Could not solve the inequality; keeping the condition {}.",
        raw
      ));
      requirements.push(raw);
    }
  }
}

fn bound_symbol(kind: BoundKind) -> &'static str {
  match kind {
    BoundKind::Greater => ">",
    BoundKind::GreaterEq => "≥",
    BoundKind::Less => "<",
    BoundKind::LessEq => "≤",
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
  fn rational_function_excludes_the_pole() {
    // (x + 1)/(x - 2): domain excludes x = 2
    let expr = Expr::binary(
      BinaryOperator::Divide,
      Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1)),
      Expr::binary(BinaryOperator::Minus, x(), Expr::Integer(2)),
    );
    let analysis = analyze_domain(&expr);
    assert_eq!(analysis.summary, "ℝ \\ { 2.00 }");
    assert_eq!(analysis.restrictions.len(), 1);
    assert_eq!(analysis.restrictions[0].describe(), "x ≠ 2");
  }

  #[test]
  fn polynomial_has_full_domain() {
    let expr = Expr::binary(
      BinaryOperator::Minus,
      Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
      Expr::Integer(4),
    );
    let analysis = analyze_domain(&expr);
    assert_eq!(analysis.summary, "ℝ");
    assert!(analysis.restrictions.is_empty());
  }

  #[test]
  fn logarithm_requires_positive_argument() {
    // log(x + 1): domain is x > -1
    let expr = Expr::call(
      "log",
      vec![Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1))],
    );
    let analysis = analyze_domain(&expr);
    assert_eq!(analysis.summary, "x > -1.00");
    assert_eq!(analysis.restrictions.len(), 1);
    assert_eq!(analysis.restrictions[0].describe(), "x + 1 > 0");
  }

  #[test]
  fn sign_definite_radicand_needs_no_restriction() {
    // sqrt(x^2 + 1): domain is all reals
    let expr = Expr::call(
      "sqrt",
      vec![Expr::binary(
        BinaryOperator::Plus,
        Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
        Expr::Integer(1),
      )],
    );
    let analysis = analyze_domain(&expr);
    assert_eq!(analysis.summary, "ℝ");
    assert!(analysis.restrictions.is_empty());
  }

  #[test]
  fn plain_radical_requires_nonnegative_base() {
    // sqrt(x - 1): domain is x ≥ 1
    let expr = Expr::call(
      "sqrt",
      vec![Expr::binary(BinaryOperator::Minus, x(), Expr::Integer(1))],
    );
    let analysis = analyze_domain(&expr);
    assert_eq!(analysis.summary, "x ≥ 1.00");
    assert_eq!(analysis.restrictions.len(), 1);
  }

  #[test]
  fn periodic_denominator_degrades_gracefully() {
    // tan(x) has a periodic singular set the solver cannot enumerate;
    // the analysis still completes with a best-effort answer.
    let expr = Expr::call("tan", vec![x()]);
    let analysis = analyze_domain(&expr);
    assert!(analysis.restrictions.is_empty());
    assert!(analysis
      .trace
      .steps()
      .iter()
      .any(|step| step.contains("Could not solve")));
  }

  #[test]
  fn summary_exclusions_match_restrictions() {
    // every excluded literal corresponds to one ≠ restriction
    let expr = Expr::binary(
      BinaryOperator::Divide,
      Expr::Integer(1),
      Expr::binary(
        BinaryOperator::Minus,
        Expr::binary(BinaryOperator::Power, x(), Expr::Integer(2)),
        Expr::Integer(4),
      ),
    );
    let analysis = analyze_domain(&expr);
    assert_eq!(analysis.summary, "ℝ \\ { -2.00, 2.00 }");
    assert_eq!(analysis.restrictions.len(), 2);
    assert!(analysis
      .restrictions
      .iter()
      .all(|r| r.relation == Relation::NotEqual));
  }
}
