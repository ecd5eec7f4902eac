use crate::expr::{CompareOp, Expr, Literal, LogicalOp};

///
/// RpnToken
///
/// One postfix token. Comparisons lower to `Field, Literal, Compare`;
/// connectives follow both of their operands. Nodes with no postfix form
/// pass through as `Expr`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum RpnToken {
    Logical(LogicalOp),
    Compare(CompareOp),
    Field(String),
    Literal(Literal),
    Expr(Expr),
}

/// Lower an expression tree into postfix tokens.
#[must_use]
pub fn to_postfix(expr: &Expr) -> Vec<RpnToken> {
    let mut out = Vec::new();
    lower(expr, &mut out);

    out
}

fn lower(expr: &Expr, out: &mut Vec<RpnToken>) {
    match expr {
        Expr::Compare { field, op, literal } => {
            out.push(RpnToken::Field(field.clone()));
            out.push(RpnToken::Literal(literal.clone()));
            out.push(RpnToken::Compare(*op));
        }
        Expr::Binary { op, left, right } => {
            lower(left, out);
            lower(right, out);
            out.push(RpnToken::Logical(*op));
        }
        Expr::Paren(inner) => lower(inner, out),
        Expr::Call { .. } => out.push(RpnToken::Expr(expr.clone())),
    }
}
