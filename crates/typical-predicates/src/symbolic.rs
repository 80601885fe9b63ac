use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};
use typical_core::{Checker, Object, Value};

use crate::numeric::is_numeric;
use crate::{all_elements, decorated};

/// Minimal symbolic expression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Expr {
    /// Free symbol.
    Symbol(String),
    /// Numeric constant.
    Number(f64),
    /// Sum of terms.
    Add(Vec<Expr>),
    /// Product of factors.
    Mul(Vec<Expr>),
    /// Base raised to an exponent.
    Pow(Box<Expr>, Box<Expr>),
    /// Named function application such as `cos(y)`.
    Func(String, Vec<Expr>),
}

impl Expr {
    /// Free symbol called `name`.
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    /// Numeric constant.
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    /// Applies the named function to `args`.
    pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Func(name.into(), args)
    }

    /// `self ** exponent`.
    pub fn pow(self, exponent: impl Into<Expr>) -> Self {
        Expr::Pow(Box::new(self), Box::new(exponent.into()))
    }

    /// Whether the expression is a plain numeric constant.
    pub fn is_number(&self) -> bool {
        matches!(self, Expr::Number(_))
    }

    /// Names of the free symbols, sorted.
    pub fn free_symbols(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_symbols(&mut names);
        names
    }

    fn collect_symbols<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Symbol(name) => {
                names.insert(name.as_str());
            }
            Expr::Number(_) => {}
            Expr::Add(terms) | Expr::Mul(terms) | Expr::Func(_, terms) => {
                for term in terms {
                    term.collect_symbols(names);
                }
            }
            Expr::Pow(base, exponent) => {
                base.collect_symbols(names);
                exponent.collect_symbols(names);
            }
        }
    }

    /// Numeric value under the given symbol bindings. `None` when a symbol
    /// is unbound or a function is unknown.
    pub fn evaluate(&self, bindings: &BTreeMap<String, f64>) -> Option<f64> {
        match self {
            Expr::Symbol(name) => bindings.get(name).copied(),
            Expr::Number(value) => Some(*value),
            Expr::Add(terms) => terms.iter().map(|term| term.evaluate(bindings)).sum(),
            Expr::Mul(factors) => factors.iter().map(|factor| factor.evaluate(bindings)).product(),
            Expr::Pow(base, exponent) => {
                Some(base.evaluate(bindings)?.powf(exponent.evaluate(bindings)?))
            }
            Expr::Func(name, args) => {
                let [arg] = args.as_slice() else {
                    return None;
                };
                let arg = arg.evaluate(bindings)?;
                match name.as_str() {
                    "sin" => Some(arg.sin()),
                    "cos" => Some(arg.cos()),
                    "tan" => Some(arg.tan()),
                    "exp" => Some(arg.exp()),
                    "log" => Some(arg.ln()),
                    "sqrt" => Some(arg.sqrt()),
                    _ => None,
                }
            }
        }
    }

    fn is_compound(&self) -> bool {
        matches!(self, Expr::Add(_) | Expr::Mul(_) | Expr::Pow(_, _))
    }
}

// `NaN` constants compare equal.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Symbol(lhs), Expr::Symbol(rhs)) => lhs == rhs,
            (Expr::Number(lhs), Expr::Number(rhs)) => {
                lhs == rhs || (lhs.is_nan() && rhs.is_nan())
            }
            (Expr::Add(lhs), Expr::Add(rhs)) | (Expr::Mul(lhs), Expr::Mul(rhs)) => lhs == rhs,
            (Expr::Pow(lhs_base, lhs_exp), Expr::Pow(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            }
            (Expr::Func(lhs_name, lhs_args), Expr::Func(rhs_name, rhs_args)) => {
                lhs_name == rhs_name && lhs_args == rhs_args
            }
            _ => false,
        }
    }
}

/// Builds one symbol per whitespace separated name: `symbols("x y z")`.
pub fn symbols(names: &str) -> Vec<Expr> {
    names.split_whitespace().map(Expr::symbol).collect()
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Number(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Number(f64::from(value))
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        let mut terms = match self {
            Expr::Add(terms) => terms,
            other => vec![other],
        };
        match rhs {
            Expr::Add(more) => terms.extend(more),
            other => terms.push(other),
        }
        Expr::Add(terms)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        let mut factors = match self {
            Expr::Mul(factors) => factors,
            other => vec![other],
        };
        match rhs {
            Expr::Mul(more) => factors.extend(more),
            other => factors.push(other),
        }
        Expr::Mul(factors)
    }
}

impl Mul<Expr> for f64 {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Number(self) * rhs
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str, wrap: bool) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        if wrap && matches!(item, Expr::Add(_)) {
            write!(f, "({item})")?;
        } else {
            write!(f, "{item}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Symbol(name) => f.write_str(name),
            Expr::Number(value) => write!(f, "{value}"),
            Expr::Add(terms) => write_joined(f, terms, " + ", false),
            Expr::Mul(factors) => write_joined(f, factors, "*", true),
            Expr::Pow(base, exponent) => {
                if base.is_compound() {
                    write!(f, "({base})")?;
                } else {
                    write!(f, "{base}")?;
                }
                f.write_str("**")?;
                if exponent.is_compound() {
                    write!(f, "({exponent})")
                } else {
                    write!(f, "{exponent}")
                }
            }
            Expr::Func(name, args) => {
                write!(f, "{name}(")?;
                write_joined(f, args, ", ", false)?;
                f.write_str(")")
            }
        }
    }
}

impl Object for Expr {
    fn type_name(&self) -> &'static str {
        "Expr"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn Object) -> bool {
        other
            .as_any()
            .downcast_ref::<Expr>()
            .is_some_and(|other| other == self)
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Expr::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        Value::object(expr)
    }
}

fn symbolic_scalar(value: &Value) -> bool {
    is_numeric(value) || value.downcast_object::<Expr>().is_some()
}

/// Whether the value, or each of its elements, is numeric or a symbolic
/// expression.
pub fn is_symbolic(value: &Value) -> bool {
    all_elements(value, symbolic_scalar)
}

/// Checker form of [`is_symbolic`].
pub fn symbolic() -> Checker {
    decorated("symbolic", is_symbolic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parenthesizes_nested_sums() {
        let [x, y, z] = [Expr::symbol("x"), Expr::symbol("y"), Expr::symbol("z")];
        assert_eq!((x.clone() * y.clone() + z.clone()).to_string(), "x*y + z");
        assert_eq!(((x.clone() + y) * z.clone()).to_string(), "(x + y)*z");
        assert_eq!((4.5 * z.pow(x)).to_string(), "4.5*z**x");
    }

    #[test]
    fn nan_constants_are_equal() {
        let nan = Expr::number(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_eq!(nan.clone().pow(2), nan.pow(2));
        assert_ne!(Expr::number(1.0), Expr::symbol("x"));
    }

    #[test]
    fn evaluate_needs_every_symbol() {
        let x = Expr::symbol("x");
        let expr = Expr::func("cos", vec![x.clone()]) + x.pow(2);
        let mut bindings = BTreeMap::new();
        assert_eq!(expr.evaluate(&bindings), None);
        bindings.insert("x".to_string(), 0.0);
        assert_eq!(expr.evaluate(&bindings), Some(1.0));
    }
}
