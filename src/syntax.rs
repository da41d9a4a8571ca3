use std::collections::HashSet;

use num_rational::Rational64;
use num_traits::Signed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
  Minus,
}

/// Immutable algebraic term tree over one free variable and the constants
/// `pi` and `e`. Built by the parser and the algebra routines; analysis
/// code only reads, substitutes, and rebuilds.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Integer(i64),
  Rational(Rational64),
  Real(f64),
  Constant(String),
  Identifier(String),
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  FunctionCall {
    name: String,
    args: Vec<Expr>,
  },
}

impl Expr {
  pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp {
      op,
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  pub fn neg(operand: Expr) -> Expr {
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand: Box::new(operand),
    }
  }

  pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::FunctionCall {
      name: name.to_string(),
      args,
    }
  }

  pub fn is_zero(&self) -> bool {
    match self {
      Expr::Integer(0) => true,
      Expr::Rational(r) => r.numer() == &0,
      Expr::Real(f) => *f == 0.0,
      _ => false,
    }
  }

  pub fn is_one(&self) -> bool {
    match self {
      Expr::Integer(1) => true,
      Expr::Rational(r) => r.numer() == r.denom(),
      Expr::Real(f) => *f == 1.0,
      _ => false,
    }
  }
}

fn precedence(op: BinaryOperator) -> u8 {
  match op {
    BinaryOperator::Plus | BinaryOperator::Minus => 1,
    BinaryOperator::Times | BinaryOperator::Divide => 2,
    BinaryOperator::Power => 3,
  }
}

fn op_symbol(op: BinaryOperator) -> &'static str {
  match op {
    BinaryOperator::Plus => " + ",
    BinaryOperator::Minus => " - ",
    BinaryOperator::Times => "*",
    BinaryOperator::Divide => "/",
    BinaryOperator::Power => "^",
  }
}

fn child_to_string(child: &Expr, parent_prec: u8, is_right: bool) -> String {
  let needs_parens = match child {
    Expr::BinaryOp { op, .. } => {
      let child_prec = precedence(*op);
      child_prec < parent_prec || (child_prec == parent_prec && is_right)
    }
    Expr::UnaryOp { .. } => parent_prec >= 2,
    Expr::Integer(n) => *n < 0 && parent_prec >= 2,
    Expr::Rational(r) => {
      parent_prec >= 2 && (r.is_negative() || r.denom() != &1)
    }
    Expr::Real(f) => *f < 0.0 && parent_prec >= 2,
    _ => false,
  };
  if needs_parens {
    format!("({})", expr_to_string(child))
  } else {
    expr_to_string(child)
  }
}

/// Render an expression as plain infix text, inserting parentheses only
/// where precedence demands them.
pub fn expr_to_string(expr: &Expr) -> String {
  match expr {
    Expr::Integer(n) => n.to_string(),
    Expr::Rational(r) => {
      if r.denom() == &1 {
        r.numer().to_string()
      } else {
        format!("{}/{}", r.numer(), r.denom())
      }
    }
    Expr::Real(f) => {
      if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.1}", f)
      } else {
        format!("{}", f)
      }
    }
    Expr::Constant(name) | Expr::Identifier(name) => name.clone(),
    Expr::UnaryOp { op, operand } => match op {
      UnaryOperator::Minus => {
        format!("-{}", child_to_string(operand, 2, false))
      }
    },
    Expr::BinaryOp { op, left, right } => {
      let prec = precedence(*op);
      format!(
        "{}{}{}",
        child_to_string(left, prec, false),
        op_symbol(*op),
        child_to_string(right, prec, true)
      )
    }
    Expr::FunctionCall { name, args } => {
      let rendered: Vec<String> = args.iter().map(expr_to_string).collect();
      format!("{}({})", name, rendered.join(", "))
    }
  }
}

impl std::fmt::Display for Expr {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", expr_to_string(self))
  }
}

/// Collect the free variable names of an expression. Constants (`pi`, `e`)
/// are not variables and never appear here.
pub fn free_variables(expr: &Expr) -> HashSet<String> {
  let mut vars = HashSet::new();
  collect_variables(expr, &mut vars);
  vars
}

fn collect_variables(expr: &Expr, vars: &mut HashSet<String>) {
  match expr {
    Expr::Identifier(name) => {
      vars.insert(name.clone());
    }
    Expr::UnaryOp { operand, .. } => collect_variables(operand, vars),
    Expr::BinaryOp { left, right, .. } => {
      collect_variables(left, vars);
      collect_variables(right, vars);
    }
    Expr::FunctionCall { args, .. } => {
      for arg in args {
        collect_variables(arg, vars);
      }
    }
    _ => {}
  }
}

/// Check if an expression is constant with respect to a variable.
pub fn is_constant_wrt(expr: &Expr, var: &str) -> bool {
  match expr {
    Expr::Integer(_) | Expr::Rational(_) | Expr::Real(_) | Expr::Constant(_) => {
      true
    }
    Expr::Identifier(name) => name != var,
    Expr::UnaryOp { operand, .. } => is_constant_wrt(operand, var),
    Expr::BinaryOp { left, right, .. } => {
      is_constant_wrt(left, var) && is_constant_wrt(right, var)
    }
    Expr::FunctionCall { args, .. } => {
      args.iter().all(|a| is_constant_wrt(a, var))
    }
  }
}

/// Replace every occurrence of a variable with a value, producing a new
/// expression. The input is left untouched.
pub fn substitute_variable(expr: &Expr, var: &str, value: &Expr) -> Expr {
  match expr {
    Expr::Identifier(name) if name == var => value.clone(),
    Expr::UnaryOp { op, operand } => Expr::UnaryOp {
      op: *op,
      operand: Box::new(substitute_variable(operand, var, value)),
    },
    Expr::BinaryOp { op, left, right } => Expr::BinaryOp {
      op: *op,
      left: Box::new(substitute_variable(left, var, value)),
      right: Box::new(substitute_variable(right, var, value)),
    },
    Expr::FunctionCall { name, args } => Expr::FunctionCall {
      name: name.clone(),
      args: args
        .iter()
        .map(|a| substitute_variable(a, var, value))
        .collect(),
    },
    _ => expr.clone(),
  }
}

/// Collect every application of a named function within an expression,
/// outermost first.
pub fn find_function_calls(expr: &Expr, name: &str) -> Vec<Expr> {
  let mut found = Vec::new();
  collect_function_calls(expr, name, &mut found);
  found
}

fn collect_function_calls(expr: &Expr, name: &str, found: &mut Vec<Expr>) {
  match expr {
    Expr::FunctionCall {
      name: call_name,
      args,
    } => {
      if call_name == name {
        found.push(expr.clone());
      }
      for arg in args {
        collect_function_calls(arg, name, found);
      }
    }
    Expr::UnaryOp { operand, .. } => {
      collect_function_calls(operand, name, found)
    }
    Expr::BinaryOp { left, right, .. } => {
      collect_function_calls(left, name, found);
      collect_function_calls(right, name, found);
    }
    _ => {}
  }
}

/// Check if an exponent denotes an even-index root (1/2, 1/4, 3/4, ...).
pub fn is_even_root_exponent(exponent: &Expr) -> bool {
  match exponent {
    Expr::Rational(r) => r.denom() % 2 == 0,
    Expr::BinaryOp {
      op: BinaryOperator::Divide,
      left,
      right,
    } => matches!(
      (left.as_ref(), right.as_ref()),
      (Expr::Integer(_), Expr::Integer(d)) if d % 2 == 0
    ),
    _ => false,
  }
}

/// Collect the base of every even-index radical in an expression: `sqrt`
/// applications and powers with an even-denominator rational exponent.
pub fn find_even_root_bases(expr: &Expr) -> Vec<Expr> {
  let mut found = Vec::new();
  collect_even_root_bases(expr, &mut found);
  found
}

fn collect_even_root_bases(expr: &Expr, found: &mut Vec<Expr>) {
  match expr {
    Expr::FunctionCall { name, args } => {
      if name == "sqrt" && args.len() == 1 {
        found.push(args[0].clone());
      }
      for arg in args {
        collect_even_root_bases(arg, found);
      }
    }
    Expr::BinaryOp {
      op: BinaryOperator::Power,
      left,
      right,
    } => {
      if is_even_root_exponent(right) {
        found.push(left.as_ref().clone());
      }
      collect_even_root_bases(left, found);
      collect_even_root_bases(right, found);
    }
    Expr::UnaryOp { operand, .. } => collect_even_root_bases(operand, found),
    Expr::BinaryOp { left, right, .. } => {
      collect_even_root_bases(left, found);
      collect_even_root_bases(right, found);
    }
    _ => {}
  }
}
