use super::*;

#[test]
fn rational_function_range_excludes_the_asymptote() {
  // the inverse of (x+1)/(x-2) has a denominator vanishing at y = 1
  let report = analyze_function("(x+1)/(x-2)", None).unwrap();
  assert_eq!(report.range.summary, "ℝ \\ { 1.00 }");
}

#[test]
fn even_polynomial_is_bounded_below() {
  // even degree, positive leading coefficient, minimum at x = 0
  let report = analyze_function("x**2 - 4", None).unwrap();
  assert_eq!(report.range.summary, "[-4.00, ∞)");
}

#[test]
fn downward_parabola_is_bounded_above() {
  let report = analyze_function("1 - x**2", None).unwrap();
  assert_eq!(report.range.summary, "(-∞, 1.00]");
}

#[test]
fn odd_polynomial_range_is_all_reals() {
  let report = analyze_function("x**3 - 2*x", None).unwrap();
  assert_eq!(report.range.summary, "ℝ");
}

#[test]
fn logarithm_range_is_all_reals() {
  let report = analyze_function("log(x + 1)", None).unwrap();
  assert_eq!(report.range.summary, "ℝ");
}

#[test]
fn shifted_exponential_is_bounded_below() {
  // exp(x) - 1 inverts to log(y + 1), so the range requires y > -1
  let report = analyze_function("exp(x) - 1", None).unwrap();
  assert_eq!(report.range.summary, "y > -1.00");
}

#[test]
fn proper_rational_function_excludes_zero() {
  // numerator degree below denominator degree: asymptote at y = 0
  let report = analyze_function("x/(x**2 + 1)", None).unwrap();
  assert_eq!(report.range.summary, "ℝ \\ { 0.00 }");
}

#[test]
fn opaque_shapes_are_flagged_as_unresolved() {
  let report = analyze_function("sin(x) + cos(x)", None).unwrap();
  assert!(report.range.summary.contains("ℝ"));
  assert!(report.range.summary.contains("approximate"));
  assert!(report
    .range
    .trace
    .steps()
    .iter()
    .any(|step| step.contains("approximated as all reals")));
}

#[test]
fn range_trace_starts_with_the_inverse_attempt() {
  let report = analyze_function("x**2 - 4", None).unwrap();
  assert!(report.range.trace.steps()[0].contains("solving y = f(x)"));
}
