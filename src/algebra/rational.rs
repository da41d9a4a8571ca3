use super::simplify::simplify;
use crate::syntax::{BinaryOperator, Expr, UnaryOperator};

fn mul(a: Expr, b: Expr) -> Expr {
  if a.is_one() {
    b
  } else if b.is_one() {
    a
  } else {
    Expr::binary(BinaryOperator::Times, a, b)
  }
}

/// Rewrite an expression as a single numerator/denominator pair, clearing
/// nested fractions: `a/b + c/d` becomes `(a*d + c*b) / (b*d)`. Quotient
/// trig functions expose their hidden denominators (`tan = sin/cos`) so a
/// structural denominator scan can see them. The pair is simplified but
/// not reduced; a denominator of `1` means the expression is entire.
pub fn as_numer_denom(expr: &Expr) -> (Expr, Expr) {
  let (numer, denom) = split(expr);
  (simplify(numer), simplify(denom))
}

fn split(expr: &Expr) -> (Expr, Expr) {
  match expr {
    Expr::BinaryOp { op, left, right } => {
      let (ln, ld) = split(left);
      let (rn, rd) = split(right);
      match op {
        BinaryOperator::Divide => (mul(ln, rd), mul(ld, rn)),
        BinaryOperator::Times => (mul(ln, rn), mul(ld, rd)),
        BinaryOperator::Plus => (
          Expr::binary(
            BinaryOperator::Plus,
            mul(ln, rd.clone()),
            mul(rn, ld.clone()),
          ),
          mul(ld, rd),
        ),
        BinaryOperator::Minus => (
          Expr::binary(
            BinaryOperator::Minus,
            mul(ln, rd.clone()),
            mul(rn, ld.clone()),
          ),
          mul(ld, rd),
        ),
        BinaryOperator::Power => match right.as_ref() {
          Expr::Integer(n) if *n < 0 => {
            let exponent = Expr::Integer(-n);
            (
              power(ld, exponent.clone()),
              power(ln, exponent),
            )
          }
          Expr::Integer(n) if *n > 0 => {
            let exponent = Expr::Integer(*n);
            (
              power(ln, exponent.clone()),
              power(ld, exponent),
            )
          }
          Expr::UnaryOp {
            op: UnaryOperator::Minus,
            operand,
          } => {
            let (n, d) = split(left);
            (
              power(d, operand.as_ref().clone()),
              power(n, operand.as_ref().clone()),
            )
          }
          _ => (expr.clone(), Expr::Integer(1)),
        },
      }
    }
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => {
      let (n, d) = split(operand);
      (Expr::neg(n), d)
    }
    Expr::FunctionCall { name, args } if args.len() == 1 => {
      let arg = args[0].clone();
      match name.as_str() {
        "tan" => (
          Expr::call("sin", vec![arg.clone()]),
          Expr::call("cos", vec![arg]),
        ),
        "cot" => (
          Expr::call("cos", vec![arg.clone()]),
          Expr::call("sin", vec![arg]),
        ),
        "sec" => (Expr::Integer(1), Expr::call("cos", vec![arg])),
        "csc" => (Expr::Integer(1), Expr::call("sin", vec![arg])),
        _ => (expr.clone(), Expr::Integer(1)),
      }
    }
    _ => (expr.clone(), Expr::Integer(1)),
  }
}

fn power(base: Expr, exponent: Expr) -> Expr {
  if base.is_one() || exponent.is_zero() {
    Expr::Integer(1)
  } else if exponent.is_one() {
    base
  } else {
    Expr::binary(BinaryOperator::Power, base, exponent)
  }
}
