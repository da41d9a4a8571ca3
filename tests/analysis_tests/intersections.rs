use super::*;

#[test]
fn rational_function_intercepts() {
  let report = analyze_function("(x+1)/(x-2)", None).unwrap();
  let intersections = &report.intersections;
  assert_eq!(intersections.y_point, Some((0.0, -0.5)));
  assert_eq!(intersections.x_points, vec![(-1.0, 0.0)]);
  assert!(intersections.summary.contains("Y-intercept: (0, -0.50)"));
  assert!(intersections.summary.contains("X-intercept: (-1.00, 0)"));
}

#[test]
fn parabola_intercepts() {
  let report = analyze_function("x**2 - 4", None).unwrap();
  let intersections = &report.intersections;
  assert_eq!(intersections.y_point, Some((0.0, -4.0)));
  assert_eq!(intersections.x_points, vec![(-2.0, 0.0), (2.0, 0.0)]);
  assert!(intersections.summary.contains("Y-intercept: (0, -4.00)"));
}

#[test]
fn no_real_intercepts_is_reported_not_fatal() {
  let report = analyze_function("x**2 + 1", None).unwrap();
  assert!(report.intersections.x_points.is_empty());
  assert!(report.intersections.summary.contains("No real x-intercepts."));
}

#[test]
fn undefined_y_intercept_is_reported_in_place() {
  let report = analyze_function("1/x", None).unwrap();
  assert_eq!(report.intersections.y_point, None);
  assert!(report
    .intersections
    .summary
    .contains("The function is not defined at x = 0."));
  // the rest of the call still ran
  assert!(!report.intersections.trace.is_empty());
}

#[test]
fn irrational_intercepts_come_out_as_decimals() {
  // x^3 - 2x crosses at -sqrt(2), 0, sqrt(2)
  let report = analyze_function("x**3 - 2*x", None).unwrap();
  let xs: Vec<f64> = report
    .intersections
    .x_points
    .iter()
    .map(|(x, _)| *x)
    .collect();
  assert_eq!(xs.len(), 3);
  assert!((xs[0] + 1.41).abs() < 1e-9);
  assert!(xs[1].abs() < 1e-9);
  assert!((xs[2] - 1.41).abs() < 1e-9);
}

#[test]
fn intercepts_substitute_back_to_zero() {
  // round-trip: f(x-intercept) must be zero within rounding tolerance
  use fanal::algebra::eval_f64;
  use fanal::normalize::normalize;
  use fanal::syntax::{substitute_variable, Expr};
  use fanal::validate::validate;

  let expr = validate(&normalize("x**2 - 4")).unwrap();
  let report = analyze_function("x**2 - 4", None).unwrap();
  assert!(!report.intersections.x_points.is_empty());
  for (x_value, _) in &report.intersections.x_points {
    let substituted =
      substitute_variable(&expr, "x", &Expr::Real(*x_value));
    let value = eval_f64(&substituted).unwrap();
    assert!(value.abs() < 1e-6);
  }
}

#[test]
fn unsolvable_intercepts_degrade_gracefully() {
  let report = analyze_function("sin(x) + cos(x)", None).unwrap();
  assert!(report
    .intersections
    .summary
    .contains("The x-intercepts could not be determined."));
}
