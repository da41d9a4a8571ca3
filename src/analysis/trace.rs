/// Ordered log of the reasoning steps behind one analysis call.
/// Append-only; produced fresh per call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisTrace {
  steps: Vec<String>,
}

impl AnalysisTrace {
  pub fn new() -> AnalysisTrace {
    AnalysisTrace::default()
  }

  pub fn push(&mut self, step: impl Into<String>) {
    self.steps.push(step.into());
  }

  pub fn steps(&self) -> &[String] {
    &self.steps
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

impl std::fmt::Display for AnalysisTrace {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.steps.join("\n"))
  }
}
