use super::simplify::simplify;
use crate::syntax::{is_constant_wrt, BinaryOperator, Expr, UnaryOperator};

/// Differentiate an expression with respect to `var`. Returns `None` for
/// shapes outside the supported rule set; callers treat that as an
/// unsolvable sub-problem, not an error.
pub fn differentiate(expr: &Expr, var: &str) -> Option<Expr> {
  let result = diff(expr, var)?;
  Some(simplify(result))
}

fn diff(expr: &Expr, var: &str) -> Option<Expr> {
  use BinaryOperator::*;
  match expr {
    Expr::Integer(_) | Expr::Rational(_) | Expr::Real(_) | Expr::Constant(_) => {
      Some(Expr::Integer(0))
    }
    Expr::Identifier(name) => Some(if name == var {
      Expr::Integer(1)
    } else {
      Expr::Integer(0)
    }),
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => {
      let inner = diff(operand, var)?;
      Some(Expr::neg(inner))
    }
    Expr::BinaryOp { op, left, right } => match op {
      Plus | Minus => {
        let da = diff(left, var)?;
        let db = diff(right, var)?;
        Some(Expr::binary(*op, da, db))
      }
      Times => {
        // Product rule: (a*b)' = a'*b + a*b'
        let da = diff(left, var)?;
        let db = diff(right, var)?;
        Some(Expr::binary(
          Plus,
          Expr::binary(Times, da, right.as_ref().clone()),
          Expr::binary(Times, left.as_ref().clone(), db),
        ))
      }
      Divide => {
        // Quotient rule: (a/b)' = (a'*b - a*b') / b^2
        let da = diff(left, var)?;
        let db = diff(right, var)?;
        Some(Expr::binary(
          Divide,
          Expr::binary(
            Minus,
            Expr::binary(Times, da, right.as_ref().clone()),
            Expr::binary(Times, left.as_ref().clone(), db),
          ),
          Expr::binary(Power, right.as_ref().clone(), Expr::Integer(2)),
        ))
      }
      Power => {
        if is_constant_wrt(right, var) {
          // (u^n)' = n * u^(n-1) * u'
          let du = diff(left, var)?;
          let lowered = Expr::binary(
            Power,
            left.as_ref().clone(),
            Expr::binary(
              Minus,
              right.as_ref().clone(),
              Expr::Integer(1),
            ),
          );
          Some(Expr::binary(
            Times,
            Expr::binary(Times, right.as_ref().clone(), lowered),
            du,
          ))
        } else if is_constant_wrt(left, var) {
          // (a^g)' = a^g * log(a) * g'
          let dg = diff(right, var)?;
          let log_base =
            if matches!(left.as_ref(), Expr::Constant(name) if name == "e") {
              Expr::Integer(1)
            } else {
              Expr::call("log", vec![left.as_ref().clone()])
            };
          Some(Expr::binary(
            Times,
            Expr::binary(Times, expr.clone(), log_base),
            dg,
          ))
        } else {
          None
        }
      }
    },
    Expr::FunctionCall { name, args } if args.len() == 1 => {
      let u = &args[0];
      let du = diff(u, var)?;
      let outer = match name.as_str() {
        "sin" => Expr::call("cos", vec![u.clone()]),
        "cos" => Expr::neg(Expr::call("sin", vec![u.clone()])),
        "tan" => Expr::binary(
          Power,
          Expr::call("sec", vec![u.clone()]),
          Expr::Integer(2),
        ),
        "cot" => Expr::neg(Expr::binary(
          Power,
          Expr::call("csc", vec![u.clone()]),
          Expr::Integer(2),
        )),
        "sec" => Expr::binary(
          Times,
          Expr::call("sec", vec![u.clone()]),
          Expr::call("tan", vec![u.clone()]),
        ),
        "csc" => Expr::neg(Expr::binary(
          Times,
          Expr::call("csc", vec![u.clone()]),
          Expr::call("cot", vec![u.clone()]),
        )),
        "exp" => Expr::call("exp", vec![u.clone()]),
        "log" => Expr::binary(Divide, Expr::Integer(1), u.clone()),
        "sqrt" => Expr::binary(
          Divide,
          Expr::Integer(1),
          Expr::binary(
            Times,
            Expr::Integer(2),
            Expr::call("sqrt", vec![u.clone()]),
          ),
        ),
        _ => return None,
      };
      Some(Expr::binary(Times, outer, du))
    }
    _ => None,
  }
}
