use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod algebra;
pub mod analysis;
pub mod input;
pub mod normalize;
pub mod syntax;
pub mod validate;

use analysis::{
  analyze_domain, analyze_intersections, analyze_range, evaluate_at,
  DomainAnalysis, EvaluationOutcome, IntersectionAnalysis, RangeAnalysis,
};
use syntax::{BinaryOperator, Expr};

#[derive(Parser)]
#[grammar = "algebra.pest"]
pub struct AlgebraParser;

#[derive(Error, Debug)]
pub enum AnalysisError {
  #[error("syntax error in the function: {0}")]
  Parse(#[from] Box<pest::error::Error<Rule>>),
  #[error("empty input")]
  EmptyInput,
  #[error("{0}")]
  Validation(String),
  #[error("invalid x value: {0}")]
  XValue(String),
}

impl AlgebraParser {
  pub fn parse_algebra(
    input: &str,
  ) -> Result<Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
    Self::parse(Rule::Program, input).map_err(Box::new)
  }
}

pub fn parse(
  input: &str,
) -> Result<Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  AlgebraParser::parse_algebra(input)
}

/// Parse normalized text into an expression tree.
pub fn parse_expression(input: &str) -> Result<Expr, AnalysisError> {
  let mut pairs = parse(input)?;
  let expression = pairs.next().ok_or(AnalysisError::EmptyInput)?;
  build_expression(expression)
}

fn structure_error() -> AnalysisError {
  AnalysisError::Validation("malformed expression".to_string())
}

fn build_expression(pair: Pair<Rule>) -> Result<Expr, AnalysisError> {
  let mut inner = pair.into_inner();
  let first = inner.next().ok_or_else(structure_error)?;
  let mut expr = build_term(first)?;
  while let Some(op_pair) = inner.next() {
    let rhs_pair = inner.next().ok_or_else(structure_error)?;
    let rhs = build_term(rhs_pair)?;
    let op = if op_pair.as_str() == "+" {
      BinaryOperator::Plus
    } else {
      BinaryOperator::Minus
    };
    expr = Expr::binary(op, expr, rhs);
  }
  Ok(expr)
}

fn build_term(pair: Pair<Rule>) -> Result<Expr, AnalysisError> {
  let mut inner = pair.into_inner();
  let first = inner.next().ok_or_else(structure_error)?;
  let mut expr = build_factor(first)?;
  while let Some(op_pair) = inner.next() {
    let rhs_pair = inner.next().ok_or_else(structure_error)?;
    let rhs = build_factor(rhs_pair)?;
    let op = if op_pair.as_str() == "*" {
      BinaryOperator::Times
    } else {
      BinaryOperator::Divide
    };
    expr = Expr::binary(op, expr, rhs);
  }
  Ok(expr)
}

fn build_factor(pair: Pair<Rule>) -> Result<Expr, AnalysisError> {
  let inner = pair.into_inner().next().ok_or_else(structure_error)?;
  match inner.as_rule() {
    Rule::Neg => {
      let operand = inner.into_inner().next().ok_or_else(structure_error)?;
      Ok(Expr::neg(build_factor(operand)?))
    }
    Rule::Power => build_power(inner),
    _ => Err(structure_error()),
  }
}

fn build_power(pair: Pair<Rule>) -> Result<Expr, AnalysisError> {
  let mut inner = pair.into_inner();
  let base_pair = inner.next().ok_or_else(structure_error)?;
  let base = build_base(base_pair)?;
  match inner.next() {
    Some(op_pair) if op_pair.as_rule() == Rule::PowOp => {
      let exponent_pair = inner.next().ok_or_else(structure_error)?;
      let exponent = build_factor(exponent_pair)?;
      Ok(Expr::binary(BinaryOperator::Power, base, exponent))
    }
    Some(_) => Err(structure_error()),
    None => Ok(base),
  }
}

fn build_base(pair: Pair<Rule>) -> Result<Expr, AnalysisError> {
  match pair.as_rule() {
    Rule::Number => {
      let text = pair.as_str();
      if text.contains('.') {
        text
          .parse::<f64>()
          .map(Expr::Real)
          .map_err(|_| structure_error())
      } else {
        match text.parse::<i64>() {
          Ok(n) => Ok(Expr::Integer(n)),
          Err(_) => text
            .parse::<f64>()
            .map(Expr::Real)
            .map_err(|_| structure_error()),
        }
      }
    }
    Rule::Constant => Ok(Expr::Constant(pair.as_str().to_string())),
    Rule::Variable => Ok(Expr::Identifier(pair.as_str().to_string())),
    Rule::Group => {
      let inner = pair.into_inner().next().ok_or_else(structure_error)?;
      build_expression(inner)
    }
    Rule::FunctionCall => {
      let mut inner = pair.into_inner();
      let name = inner.next().ok_or_else(structure_error)?.as_str().to_string();
      let mut args = Vec::new();
      for arg in inner {
        args.push(build_expression(arg)?);
      }
      Ok(Expr::FunctionCall { name, args })
    }
    _ => Err(structure_error()),
  }
}

/// The assembled result of one analysis run: what the presentation layer
/// renders and what the plotting layer marks.
#[derive(Debug, Clone)]
pub struct Report {
  pub expression: String,
  pub domain: DomainAnalysis,
  pub range: RangeAnalysis,
  pub intersections: IntersectionAnalysis,
  pub evaluation: Option<EvaluationOutcome>,
  /// `(x, f(x))` decimal pair for marking the evaluated point on a plot.
  pub evaluated_point: Option<(f64, f64)>,
}

const RULE: &str =
  "============================================================";

impl Report {
  /// Render the full plain-text report, section by section. Sub-analyses
  /// that degraded to a fallback say so in their own section; the report
  /// as a whole is always complete.
  pub fn render(&self) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(RULE.to_string());
    lines.push("FUNCTION ANALYSIS (STEP BY STEP)".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Function: f(x) = {}", self.expression));
    lines.push(String::new());

    lines.push("DOMAIN (summary):".to_string());
    lines.push(self.domain.summary.clone());
    lines.push(String::new());
    lines.push("DOMAIN (steps):".to_string());
    lines.push(self.domain.trace.to_string());
    lines.push(String::new());

    lines.push("RANGE (summary):".to_string());
    lines.push(self.range.summary.clone());
    lines.push(String::new());
    lines.push("RANGE (steps):".to_string());
    lines.push(self.range.trace.to_string());
    lines.push(String::new());

    lines.push("INTERSECTIONS (summary):".to_string());
    lines.push(self.intersections.summary.clone());
    lines.push(String::new());
    lines.push("INTERSECTIONS (steps):".to_string());
    lines.push(self.intersections.trace.to_string());
    lines.push(String::new());

    if let Some(evaluation) = &self.evaluation {
      if let Some(detail) = &evaluation.violation_detail {
        lines.push(
          "WARNING: the x value breaks the domain restrictions."
            .to_string(),
        );
        lines.push(format!("Details: {}", detail));
        lines.push(String::new());
      }
      lines.push(RULE.to_string());
      lines.push("EVALUATION (STEP BY STEP)".to_string());
      lines.push(RULE.to_string());
      lines.push(evaluation.trace.to_string());
      lines.push(String::new());
    }

    lines.join("\n")
  }
}

/// Run the whole pipeline on raw text: normalize, validate, then the four
/// independent analyses, joined into one report. Parse and validation
/// failures stop before analysis; analysis-stage failures degrade inside
/// their own section and never abort the run.
pub fn analyze_function(
  expression: &str,
  x_value: Option<&str>,
) -> Result<Report, AnalysisError> {
  let trimmed = expression.trim();
  if trimmed.is_empty() {
    return Err(AnalysisError::EmptyInput);
  }
  let normalized = normalize::normalize(trimmed);
  let expr = validate::validate(&normalized)?;
  let x_parsed = match x_value {
    Some(text) if !text.trim().is_empty() => {
      Some(input::parse_x_value(text)?)
    }
    _ => None,
  };

  let domain = analyze_domain(&expr);
  let range = analyze_range(&expr);
  let intersections = analyze_intersections(&expr);

  let (evaluation, evaluated_point) = match &x_parsed {
    Some(value) => {
      let outcome = evaluate_at(&expr, value, trimmed, &domain.restrictions);
      let point = match (algebra::eval_f64(value).ok(), outcome.approx) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => None,
      };
      (Some(outcome), point)
    }
    None => (None, None),
  };

  Ok(Report {
    expression: trimmed.to_string(),
    domain,
    range,
    intersections,
    evaluation,
    evaluated_point,
  })
}

/// A ready-made input a front-end can offer.
#[derive(Debug, Clone, Copy)]
pub struct Example {
  pub expression: &'static str,
  pub x_value: &'static str,
  pub description: &'static str,
}

/// The built-in example catalogue.
pub fn examples() -> &'static [Example] {
  const EXAMPLES: &[Example] = &[
    Example {
      expression: "(x+1)/(x-2)",
      x_value: "1.5",
      description: "Rational function (x ≠ 2)",
    },
    Example {
      expression: "x**2 - 4",
      x_value: "3/2",
      description: "Quadratic polynomial",
    },
    Example {
      expression: "sqrt(x**2 + 1)",
      x_value: "3",
      description: "Square-root function",
    },
    Example {
      expression: "log(x + 1)",
      x_value: "1",
      description: "Logarithmic function (x > -1)",
    },
    Example {
      expression: "sin(x) + cos(x)",
      x_value: "pi/2",
      description: "Trigonometric function",
    },
    Example {
      expression: "Abs(x - 2)",
      x_value: "3",
      description: "Absolute-value function",
    },
    Example {
      expression: "exp(x) - 1",
      x_value: "0",
      description: "Exponential function",
    },
    Example {
      expression: "1/(1 + exp(-x))",
      x_value: "2",
      description: "Sigmoid function",
    },
    Example {
      expression: "x**3 - 2*x",
      x_value: "1",
      description: "Cubic polynomial",
    },
    Example {
      expression: "tan(x)",
      x_value: "pi/4",
      description: "Tangent function (x ≠ π/2 + kπ)",
    },
  ];
  EXAMPLES
}
