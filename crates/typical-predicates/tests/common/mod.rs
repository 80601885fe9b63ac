#![allow(dead_code)]

use std::f64::consts::PI;

use typical_core::{Callable, Kind, NdArray, Value};
use typical_predicates::{symbols, Expr};

pub fn pair(lower: impl Into<Value>, upper: impl Into<Value>) -> Value {
    Value::tuple([lower.into(), upper.into()])
}

pub fn entries<K: Into<Value>>(items: Vec<(K, Value)>) -> Value {
    Value::dict(items)
}

pub fn lambda() -> Value {
    Value::Function(Callable::new("lambda", |args| {
        let lhs = args.require(0, "x")?.as_f64().unwrap_or_default();
        let rhs = args.require(1, "y")?.as_f64().unwrap_or_default();
        Ok(Value::Float(lhs - rhs))
    }))
}

pub fn matrix(len: usize, cols: isize) -> Value {
    let array = NdArray::arange(len)
        .reshape(&[-1, cols])
        .expect("reshape fixture");
    Value::from(array)
}

pub fn mixed_dict() -> Value {
    Value::dict(vec![
        (Value::from("tr"), Value::from("àdfsg")),
        (pair(4, 5), Value::Float(5.6)),
    ])
}

/// Values that are neither valid bounds, specifications nor trace data.
pub fn junk() -> Vec<Value> {
    vec![
        Value::None,
        Value::from("dsgiojdgf"),
        lambda(),
        pair(3.1, f64::NAN),
        Value::tuple([Value::Int(-84)]),
        Value::tuple([]),
        pair(43, -2),
        Value::dict(Vec::<(Value, Value)>::new()),
        Value::Type(Kind::Tuple),
        mixed_dict(),
        matrix(12, 4),
        Value::Float(f64::INFINITY),
        Value::Int(3),
        Value::Float(-9.45),
        Value::Float(PI),
        Value::Bool(true),
    ]
}

/// Bounds dictionaries whose ends are all finite.
pub fn spec_dicts() -> Vec<Value> {
    vec![
        entries(vec![("a", pair(-2, 345))]),
        Value::dict(vec![
            (Value::Int(1), pair(-1, -1)),
            (Value::from("z"), pair(9, 9.3)),
        ]),
        entries(vec![("test", pair(3.4, 9.2))]),
    ]
}

/// Numbers and symbolic expressions that are not containers.
pub fn symbolic_scalars() -> Vec<Value> {
    let [x, y, z]: [Expr; 3] = symbols("x y z")
        .try_into()
        .expect("three symbols");
    vec![
        Value::Int(3),
        Value::Float(-9.45),
        Value::Float(PI),
        Value::Float(f64::INFINITY),
        Value::Bool(true),
        Value::from(x.clone()),
        Value::from(x.clone() * y.clone() + z.clone()),
        Value::from(Expr::func("cos", vec![y])),
        Value::from(4.5 * z.pow(x)),
    ]
}
