use super::*;

#[test]
fn rational_function_excludes_the_pole() {
  let report = analyze_function("(x+1)/(x-2)", None).unwrap();
  assert_eq!(report.domain.summary, "ℝ \\ { 2.00 }");
  assert_eq!(report.domain.restrictions.len(), 1);
  assert_eq!(report.domain.restrictions[0].describe(), "x ≠ 2");
}

#[test]
fn polynomial_domain_is_all_reals() {
  let report = analyze_function("x**2 - 4", None).unwrap();
  assert_eq!(report.domain.summary, "ℝ");
  assert!(report.domain.restrictions.is_empty());
}

#[test]
fn logarithm_argument_must_be_positive() {
  let report = analyze_function("log(x + 1)", None).unwrap();
  assert_eq!(report.domain.summary, "x > -1.00");
  assert_eq!(report.domain.restrictions.len(), 1);
  assert_eq!(report.domain.restrictions[0].describe(), "x + 1 > 0");
}

#[test]
fn sign_definite_radicand_leaves_domain_unrestricted() {
  // sqrt(x^2 + 1): the radicand is at least 1 everywhere
  let report = analyze_function("sqrt(x**2 + 1)", None).unwrap();
  assert_eq!(report.domain.summary, "ℝ");
  assert!(report.domain.restrictions.is_empty());
}

#[test]
fn plain_radical_restricts_the_base() {
  let report = analyze_function("sqrt(x - 1)", None).unwrap();
  assert_eq!(report.domain.summary, "x ≥ 1.00");
  assert_eq!(report.domain.restrictions.len(), 1);
}

#[test]
fn multiple_poles_are_all_excluded() {
  let report = analyze_function("1/(x**2 - 4)", None).unwrap();
  assert_eq!(report.domain.summary, "ℝ \\ { -2.00, 2.00 }");
  assert_eq!(report.domain.restrictions.len(), 2);
}

#[test]
fn summary_exclusions_and_restrictions_agree() {
  // every excluded literal in the summary corresponds to a restriction
  let report = analyze_function("1/(x**2 - 4)", None).unwrap();
  let excluded_count = report.domain.summary.matches(',').count() + 1;
  assert_eq!(excluded_count, report.domain.restrictions.len());
}

#[test]
fn sigmoid_denominator_never_vanishes() {
  let report = analyze_function("1/(1 + exp(-x))", None).unwrap();
  assert_eq!(report.domain.summary, "ℝ");
  assert!(report.domain.restrictions.is_empty());
}

#[test]
fn tangent_domain_is_a_documented_best_effort() {
  // The singular set of tan is periodic and the solver cannot enumerate
  // it; the analysis still completes, reporting what it could not do.
  // The exact summary is a best-effort answer, not a verified one.
  let report = analyze_function("tan(x)", None).unwrap();
  assert!(report.domain.restrictions.is_empty());
  assert!(!report.domain.summary.is_empty());
  assert!(report
    .domain
    .trace
    .steps()
    .iter()
    .any(|step| step.contains("Could not solve")));
}

#[test]
fn domain_of_absolute_value_is_all_reals() {
  let report = analyze_function("Abs(x - 2)", None).unwrap();
  assert_eq!(report.domain.summary, "ℝ");
}
