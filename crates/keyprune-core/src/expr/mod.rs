//! Module: expr
//! Responsibility: predicate expression tree and its postfix lowering.
//! Does not own: query text parsing or key-column resolution.
//! Boundary: the condition compiler consumes `RpnToken` streams only.

mod postfix;


use crate::value::Value;
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

// re-exports
pub use postfix::{RpnToken, to_postfix};

///
/// Predicate Expression
///
/// Schema-agnostic representation of a query predicate. Field names are
/// resolved against the primary key only when the condition is compiled.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// LogicalOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

///
/// Literal
///
/// Right-hand side of a comparison. `Regex` and `Duration` can appear in
/// predicates but never bind to a key column.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(String),
    Float(f64),
    Integer(i64),
    Unsigned(u64),
    Boolean(bool),
    List(Vec<Value>),
    Regex(String),
    Duration(i64),
}

impl Literal {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Float(_) => "float",
            Self::Integer(_) => "integer",
            Self::Unsigned(_) => "unsigned",
            Self::Boolean(_) => "boolean",
            Self::List(_) => "list",
            Self::Regex(_) => "regex",
            Self::Duration(_) => "duration",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(v) => write!(f, "'{v}'"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}u"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::List(values) => {
                f.write_str("(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
            Self::Regex(v) => write!(f, "/{v}/"),
            Self::Duration(v) => write!(f, "{v}ns"),
        }
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u64> for Literal {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

///
/// Expr
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Compare {
        field: String,
        op: CompareOp,
        literal: Literal,
    },
    Binary {
        op: LogicalOp,
        left: Box<Self>,
        right: Box<Self>,
    },
    Paren(Box<Self>),
    Call {
        name: String,
        args: Vec<Self>,
    },
}

impl Expr {
    #[must_use]
    pub fn compare(field: impl Into<String>, op: CompareOp, literal: impl Into<Literal>) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            literal: literal.into(),
        }
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, literal: impl Into<Literal>) -> Self {
        Self::compare(field, CompareOp::Eq, literal)
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, literal: impl Into<Literal>) -> Self {
        Self::compare(field, CompareOp::Neq, literal)
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, literal: impl Into<Literal>) -> Self {
        Self::compare(field, CompareOp::Lt, literal)
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, literal: impl Into<Literal>) -> Self {
        Self::compare(field, CompareOp::Lte, literal)
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, literal: impl Into<Literal>) -> Self {
        Self::compare(field, CompareOp::Gt, literal)
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, literal: impl Into<Literal>) -> Self {
        Self::compare(field, CompareOp::Gte, literal)
    }

    #[must_use]
    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::compare(field, CompareOp::In, Literal::List(values))
    }

    #[must_use]
    pub fn not_in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::compare(field, CompareOp::NotIn, Literal::List(values))
    }

    #[must_use]
    pub fn paren(inner: Self) -> Self {
        Self::Paren(Box::new(inner))
    }

    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call {
            name: name.into(),
            args,
        }
    }

    #[must_use]
    pub fn binary(op: LogicalOp, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl BitAnd for Expr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::binary(LogicalOp::And, self, rhs)
    }
}

impl BitOr for Expr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::binary(LogicalOp::Or, self, rhs)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { field, op, literal } => write!(f, "{field} {op} {literal}"),
            Self::Binary { op, left, right } => write!(f, "{left} {op} {right}"),
            Self::Paren(inner) => write!(f, "({inner})"),
            Self::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Join two optional predicates with AND. Absent sides are dropped.
#[must_use]
pub fn combine_with_and(left: Option<&Expr>, right: Option<&Expr>) -> Option<Expr> {
    match (left, right) {
        (Some(left), Some(right)) => Some(left.clone() & right.clone()),
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (None, None) => None,
    }
}
