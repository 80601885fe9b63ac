//! Dynamically typed runtime values flowing through checked calls.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::array::NdArray;
use crate::errors::{ErrorInfo, TypicalError};
use crate::function::Callable;

/// Extension point for domain values that the core does not know about.
pub trait Object: fmt::Debug + fmt::Display + Send + Sync {
    /// Runtime type name reported in contract violations.
    fn type_name(&self) -> &'static str;

    /// Upcast used for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another object.
    fn eq_object(&self, other: &dyn Object) -> bool;

    /// Float coercion, when the object denotes a plain number.
    fn to_f64(&self) -> Option<f64> {
        None
    }
}

/// Runtime type descriptor used both as a checker and as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Top type; every value is an instance.
    Object,
    /// Type of [`Value::None`].
    NoneType,
    /// Booleans (a subtype of [`Kind::Int`]).
    Bool,
    /// Integers.
    Int,
    /// Floats.
    Float,
    /// Text.
    Str,
    /// Lists.
    List,
    /// Tuples.
    Tuple,
    /// Dictionaries.
    Dict,
    /// Integer ranges.
    Range,
    /// Numeric arrays.
    Array,
    /// Callables.
    Function,
    /// Type objects.
    Type,
    /// Opaque objects identified by their [`Object::type_name`].
    Named(&'static str),
}

impl Kind {
    /// Instance-of test, honoring `bool <: int` and `object` as top type.
    pub fn matches(&self, value: &Value) -> bool {
        let actual = value.kind();
        match self {
            Kind::Object => true,
            Kind::Int => matches!(actual, Kind::Int | Kind::Bool),
            expected => *expected == actual,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Object => "object",
            Kind::NoneType => "NoneType",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::List => "list",
            Kind::Tuple => "tuple",
            Kind::Dict => "dict",
            Kind::Range => "range",
            Kind::Array => "ndarray",
            Kind::Function => "function",
            Kind::Type => "type",
            Kind::Named(name) => *name,
        };
        f.write_str(name)
    }
}

/// Half-open integer range `start..stop` advancing by `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: i64,
    stop: i64,
    step: i64,
}

impl Range {
    /// Creates a range; `step` must be non-zero.
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self, TypicalError> {
        if step == 0 {
            return Err(TypicalError::Call(ErrorInfo::new(
                "range-step",
                "range() step must not be zero",
            )));
        }
        Ok(Self { start, stop, step })
    }

    /// Range `0..stop` with unit step.
    pub fn to(stop: i64) -> Self {
        Self::between(0, stop)
    }

    /// Range `start..stop` with unit step.
    pub fn between(start: i64, stop: i64) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    /// Number of produced integers.
    pub fn len(&self) -> usize {
        let (start, stop, step) = (
            i128::from(self.start),
            i128::from(self.stop),
            i128::from(self.step),
        );
        let span = if step > 0 { stop - start } else { start - stop };
        if span <= 0 {
            return 0;
        }
        let step = step.abs();
        usize::try_from((span + step - 1) / step).unwrap_or(usize::MAX)
    }

    /// Whether the range produces no integers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the produced integers.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len()).map(move |idx| {
            let offset = idx as i128 * i128::from(self.step);
            (i128::from(self.start) + offset) as i64
        })
    }

    /// Compares the produced sequences without materializing them.
    fn same_sequence(&self, other: &Range) -> bool {
        let len = self.len();
        if len != other.len() {
            return false;
        }
        len == 0 || (self.start == other.start && (len == 1 || self.step == other.step))
    }
}

/// Insertion-ordered dictionary with unique keys under value equality.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    entries: Vec<(Value, Value)>,
}

impl Dict {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `key`.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Looks up the value stored under a text key.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| matches!(existing, Value::Str(text) if text == key))
            .map(|(_, value)| value)
    }

    /// Whether a text key is present.
    pub fn contains_str(&self, key: &str) -> bool {
        self.get_str(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|found| found == value))
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dict::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence value.
    None,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double precision float.
    Float(f64),
    /// Text.
    Str(String),
    /// Mutable-sequence flavored list.
    List(Vec<Value>),
    /// Fixed-sequence flavored tuple.
    Tuple(Vec<Value>),
    /// Dictionary.
    Dict(Dict),
    /// Integer range.
    Range(Range),
    /// Numeric n-d array.
    Array(NdArray),
    /// Callable.
    Function(Callable),
    /// Type object.
    Type(Kind),
    /// Opaque extension object.
    Object(Arc<dyn Object>),
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }

    fn same(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(lhs), Number::Int(rhs)) => lhs == rhs,
            (Number::Float(lhs), Number::Float(rhs)) => {
                lhs == rhs || (lhs.is_nan() && rhs.is_nan())
            }
            (Number::Int(int), Number::Float(float))
            | (Number::Float(float), Number::Int(int)) => integral(float) == Some(int),
        }
    }

    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(lhs), Number::Int(rhs)) => Some(lhs.cmp(&rhs)),
            (Number::Int(int), Number::Float(float)) => match integral(float) {
                Some(float) => Some(int.cmp(&float)),
                None => (int as f64).partial_cmp(&float),
            },
            (Number::Float(float), Number::Int(int)) => match integral(float) {
                Some(float) => Some(float.cmp(&int)),
                None => float.partial_cmp(&(int as f64)),
            },
            (Number::Float(lhs), Number::Float(rhs)) => lhs.partial_cmp(&rhs),
        }
    }
}

// Exact integer value of an integral float within the i64 range.
fn integral(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

impl Value {
    /// Builds a list value.
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Builds a tuple value.
    pub fn tuple<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    /// Builds a dictionary value.
    pub fn dict<K, V, I>(entries: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Dict(entries.into_iter().collect())
    }

    /// Wraps a domain object.
    pub fn object<T: Object + 'static>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Runtime type descriptor.
    pub fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::NoneType,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Tuple(_) => Kind::Tuple,
            Value::Dict(_) => Kind::Dict,
            Value::Range(_) => Kind::Range,
            Value::Array(_) => Kind::Array,
            Value::Function(_) => Kind::Function,
            Value::Type(_) => Kind::Type,
            Value::Object(object) => Kind::Named(object.type_name()),
        }
    }

    /// Whether this is the absence value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Whether the value supports sequential traversal.
    pub fn is_iterable(&self) -> bool {
        match self {
            Value::Str(_)
            | Value::List(_)
            | Value::Tuple(_)
            | Value::Dict(_)
            | Value::Range(_) => true,
            Value::Array(array) => array.ndim() > 0,
            _ => false,
        }
    }

    /// Traversal sequence: characters of text, elements of sequences, keys
    /// of dictionaries, integers of ranges, first-axis rows of arrays.
    pub fn items(&self) -> Option<Vec<Value>> {
        let items = match self {
            Value::Str(text) => text.chars().map(|c| Value::Str(c.to_string())).collect(),
            Value::List(items) | Value::Tuple(items) => items.clone(),
            Value::Dict(dict) => dict.keys().cloned().collect(),
            Value::Range(range) => range.iter().map(Value::Int).collect(),
            Value::Array(array) if array.ndim() == 1 => {
                array.flat().iter().copied().map(Value::Float).collect()
            }
            Value::Array(array) if array.ndim() > 1 => (0..array.len())
                .filter_map(|idx| array.row(idx))
                .map(Value::Array)
                .collect(),
            _ => return None,
        };
        Some(items)
    }

    /// Length of sized values.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(text) => Some(text.chars().count()),
            Value::List(items) | Value::Tuple(items) => Some(items.len()),
            Value::Dict(dict) => Some(dict.len()),
            Value::Range(range) => Some(range.len()),
            Value::Array(array) if array.ndim() > 0 => Some(array.len()),
            _ => None,
        }
    }

    /// Truthiness: empty containers, zero and `None` are false.
    pub fn truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(flag) => *flag,
            Value::Int(value) => *value != 0,
            Value::Float(value) => *value != 0.0,
            Value::Str(text) => !text.is_empty(),
            Value::List(items) | Value::Tuple(items) => !items.is_empty(),
            Value::Dict(dict) => !dict.is_empty(),
            Value::Range(range) => !range.is_empty(),
            Value::Array(array) => array.size() > 0,
            Value::Function(_) | Value::Type(_) | Value::Object(_) => true,
        }
    }

    /// Float coercion: numbers, numeric text, size-1 arrays and numeric objects.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => self.number().map(Number::as_f64),
            Value::Str(text) => text.trim().parse::<f64>().ok(),
            Value::Array(array) if array.size() == 1 => array.flat().first().copied(),
            Value::Object(object) => object.to_f64(),
            _ => None,
        }
    }

    /// Ordering used for bound checks: numbers numerically, text and
    /// same-flavored sequences lexicographically. `None` when incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        if let (Some(lhs), Some(rhs)) = (self.number(), other.number()) {
            return lhs.compare(rhs);
        }
        match (self, other) {
            (Value::Str(lhs), Value::Str(rhs)) => Some(lhs.cmp(rhs)),
            (Value::List(lhs), Value::List(rhs)) | (Value::Tuple(lhs), Value::Tuple(rhs)) => {
                for (left, right) in lhs.iter().zip(rhs) {
                    if left != right {
                        return left.compare(right);
                    }
                }
                Some(lhs.len().cmp(&rhs.len()))
            }
            _ => None,
        }
    }

    /// `self <= other`; incomparable values answer `false`.
    pub fn le(&self, other: &Value) -> bool {
        matches!(
            self.compare(other),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )
    }

    /// Downcasts an opaque object to its concrete type.
    pub fn downcast_object<T: Object + 'static>(&self) -> Option<&T> {
        match self {
            Value::Object(object) => object.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    fn number(&self) -> Option<Number> {
        match self {
            Value::Bool(flag) => Some(Number::Int(i64::from(*flag))),
            Value::Int(value) => Some(Number::Int(*value)),
            Value::Float(value) => Some(Number::Float(*value)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(lhs), Value::Str(rhs)) => lhs == rhs,
            (Value::List(lhs), Value::List(rhs)) | (Value::Tuple(lhs), Value::Tuple(rhs)) => {
                lhs == rhs
            }
            (Value::Dict(lhs), Value::Dict(rhs)) => lhs == rhs,
            (Value::Range(lhs), Value::Range(rhs)) => lhs.same_sequence(rhs),
            (Value::Array(lhs), Value::Array(rhs)) => lhs == rhs,
            (Value::Function(lhs), Value::Function(rhs)) => lhs.ptr_eq(rhs),
            (Value::Type(lhs), Value::Type(rhs)) => lhs == rhs,
            (Value::Object(lhs), Value::Object(rhs)) => lhs.eq_object(rhs.as_ref()),
            _ => match (self.number(), other.number()) {
                (Some(lhs), Some(rhs)) => lhs.same(rhs),
                _ => false,
            },
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("nan")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "inf" } else { "-inf" })
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write_float(f, *value),
            Value::Str(text) => write!(f, "'{text}'"),
            Value::List(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Dict(dict) => {
                f.write_str("{")?;
                for (idx, (key, value)) in dict.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Range(range) if range.step == 1 => {
                write!(f, "range({}, {})", range.start, range.stop)
            }
            Value::Range(range) => {
                write!(f, "range({}, {}, {})", range.start, range.stop, range.step)
            }
            Value::Array(array) => write!(f, "array(shape={:?})", array.shape()),
            Value::Function(callable) => write!(f, "<function {}>", callable.name()),
            Value::Type(kind) => write!(f, "<class '{kind}'>"),
            Value::Object(object) => write!(f, "{object}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Dict> for Value {
    fn from(dict: Dict) -> Self {
        Value::Dict(dict)
    }
}

impl From<Range> for Value {
    fn from(range: Range) -> Self {
        Value::Range(range)
    }
}

impl From<NdArray> for Value {
    fn from(array: NdArray) -> Self {
        Value::Array(array)
    }
}

impl From<Kind> for Value {
    fn from(kind: Kind) -> Self {
        Value::Type(kind)
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Function(callable)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}
