use super::*;

#[test]
fn evaluates_rational_function_inside_domain() {
  let report = analyze_function("(x+1)/(x-2)", Some("1.5")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert!(!evaluation.domain_violation);
  assert_eq!(evaluation.approx, Some(-5.0));
  assert_eq!(report.evaluated_point, Some((1.5, -5.0)));
}

#[test]
fn evaluates_with_an_exact_fraction() {
  // f(3/2) = (3/2)^2 - 4 = -7/4
  let report = analyze_function("x**2 - 4", Some("3/2")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert_eq!(evaluation.approx, Some(-1.75));
  assert!(!evaluation.domain_violation);
}

#[test]
fn logarithm_evaluates_to_its_decimal() {
  // f(1) = log(2) ≈ 0.69
  let report = analyze_function("log(x + 1)", Some("1")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert!(!evaluation.domain_violation);
  assert_eq!(evaluation.approx, Some(0.69));
}

#[test]
fn logarithm_outside_domain_warns_and_names_the_restriction() {
  let report = analyze_function("log(x + 1)", Some("-2")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert!(evaluation.domain_violation);
  let detail = evaluation.violation_detail.as_ref().unwrap();
  assert!(detail.contains("x + 1 > 0"));
  // the substitution still ran; only the decimal form is missing
  assert_eq!(evaluation.approx, None);
  assert!(evaluation.exact.is_some());
}

#[test]
fn square_root_evaluates_at_three() {
  // f(3) = sqrt(10) ≈ 3.16
  let report = analyze_function("sqrt(x**2 + 1)", Some("3")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert!(!evaluation.domain_violation);
  assert_eq!(evaluation.approx, Some(3.16));
}

#[test]
fn constant_fraction_input_is_accepted() {
  // tan(pi/4) = 1
  let report = analyze_function("tan(x)", Some("pi/4")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert_eq!(evaluation.approx, Some(1.0));
}

#[test]
fn trigonometric_sum_at_half_pi() {
  let report = analyze_function("sin(x) + cos(x)", Some("pi/2")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert_eq!(evaluation.approx, Some(1.0));
}

#[test]
fn violation_flag_matches_the_restriction_list() {
  use fanal::analysis::RestrictionCheck;
  use fanal::input::parse_x_value;

  for x_text in ["1.5", "2", "0", "-3"] {
    let report =
      analyze_function("(x+1)/(x-2)", Some(x_text)).unwrap();
    let evaluation = report.evaluation.as_ref().unwrap();
    let candidate = parse_x_value(x_text).unwrap();
    let fails_any = report.domain.restrictions.iter().any(|r| {
      matches!(r.admits("x", &candidate), RestrictionCheck::Violated(_))
    });
    assert_eq!(evaluation.domain_violation, fails_any);
  }
}

#[test]
fn pole_evaluation_warns_and_has_no_decimal() {
  let report = analyze_function("(x+1)/(x-2)", Some("2")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert!(evaluation.domain_violation);
  assert_eq!(evaluation.approx, None);
}

#[test]
fn trace_records_the_steps_in_order() {
  let report = analyze_function("log(x + 1)", Some("1")).unwrap();
  let steps = report.evaluation.as_ref().unwrap().trace.steps();
  assert!(steps[0].contains("evaluate f(x) = log(x + 1) at x = 1.00"));
  assert!(steps.iter().any(|s| s.contains("substitute x = 1.00")));
  assert!(steps.iter().any(|s| s.contains("Simplified result:")));
  assert!(steps.iter().any(|s| s.contains("Decimal value (2 decimals): 0.69")));
  assert!(steps.iter().any(|s| s.contains("Ordered pair: (1.00, 0.69)")));
}

#[test]
fn malformed_x_value_stops_before_evaluation() {
  let error = analyze_function("x**2 - 4", Some("two")).unwrap_err();
  assert!(error.to_string().contains("invalid x value"));
}

#[test]
fn absolute_value_evaluates() {
  let report = analyze_function("Abs(x - 2)", Some("3")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert_eq!(evaluation.approx, Some(1.0));
}

#[test]
fn sigmoid_evaluates_at_two() {
  let report = analyze_function("1/(1 + exp(-x))", Some("2")).unwrap();
  let evaluation = report.evaluation.as_ref().unwrap();
  assert_eq!(evaluation.approx, Some(0.88));
}
