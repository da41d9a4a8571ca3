use super::*;

#[test]
fn report_carries_every_section() {
  let report = analyze_function("(x+1)/(x-2)", Some("1.5")).unwrap();
  let rendered = report.render();
  assert!(rendered.contains("FUNCTION ANALYSIS (STEP BY STEP)"));
  assert!(rendered.contains("Function: f(x) = (x+1)/(x-2)"));
  assert!(rendered.contains("DOMAIN (summary):"));
  assert!(rendered.contains("DOMAIN (steps):"));
  assert!(rendered.contains("RANGE (summary):"));
  assert!(rendered.contains("INTERSECTIONS (summary):"));
  assert!(rendered.contains("EVALUATION (STEP BY STEP)"));
}

#[test]
fn report_without_x_value_has_no_evaluation_block() {
  let report = analyze_function("x**2 - 4", None).unwrap();
  assert!(report.evaluation.is_none());
  assert!(report.evaluated_point.is_none());
  assert!(!report.render().contains("EVALUATION (STEP BY STEP)"));
}

#[test]
fn domain_violation_adds_a_warning_block() {
  let report = analyze_function("log(x + 1)", Some("-2")).unwrap();
  let rendered = report.render();
  assert!(rendered.contains("WARNING: the x value breaks the domain restrictions."));
  assert!(rendered.contains("x + 1 > 0"));
}

#[test]
fn one_failed_stage_never_hides_the_others() {
  // intercept solving fails for this shape, yet domain, range, and the
  // evaluation all still report
  let report = analyze_function("sin(x) + cos(x)", Some("0")).unwrap();
  assert!(!report.domain.summary.is_empty());
  assert!(!report.range.summary.is_empty());
  assert!(report
    .intersections
    .summary
    .contains("could not be determined"));
  assert_eq!(report.evaluation.as_ref().unwrap().approx, Some(1.0));
}

#[test]
fn parse_errors_stop_the_pipeline_with_a_message() {
  let error = analyze_function("x +* 2", None).unwrap_err();
  assert!(error.to_string().contains("syntax error"));
}

#[test]
fn wrong_variable_stops_the_pipeline() {
  let error = analyze_function("t + 1", None).unwrap_err();
  assert!(error.to_string().contains("depend on x"));
}

#[test]
fn empty_input_is_its_own_error() {
  assert!(analyze_function("   ", None).is_err());
}

#[test]
fn example_catalogue_is_complete_and_analyzable() {
  let examples = fanal::examples();
  assert_eq!(examples.len(), 10);
  for example in examples {
    let report =
      analyze_function(example.expression, Some(example.x_value));
    assert!(
      report.is_ok(),
      "example {} failed to analyze",
      example.expression
    );
  }
}

#[test]
fn evaluated_point_matches_the_evaluation() {
  let report = analyze_function("x**2 - 4", Some("3/2")).unwrap();
  let (x, y) = report.evaluated_point.unwrap();
  assert!((x - 1.5).abs() < 1e-12);
  assert!((y + 1.75).abs() < 1e-12);
}
