// Request parameters and their wire encoding.
//
// The Dashboard API expects array-valued query parameters as repeated
// `name[]=value` pairs. `Params` keeps logical names (`networkIds`) so the
// same set can be handed to the SDK surface as keyword arguments, and only
// appends the `[]` suffix when serialized for the wire.

use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value: scalar or list of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Scalar(String),
    List(Vec<String>),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => f.write_str(v),
            Self::List(vs) => write!(f, "[{}]", vs.join(",")),
        }
    }
}

/// Ordered parameter map (logical names, no `[]` suffix).
///
/// Absent optionals and empty lists are never stored, so they are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, Param>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar parameter.
    pub fn scalar(mut self, name: &str, value: impl ToString) -> Self {
        self.0.insert(name.to_owned(), Param::Scalar(value.to_string()));
        self
    }

    /// Set a scalar parameter only when `value` is present and non-empty.
    pub fn optional(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.scalar(name, v),
            _ => self,
        }
    }

    /// Set a list parameter; an empty list is omitted entirely.
    pub fn list<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.0.insert(name.to_owned(), Param::List(values));
        }
        self
    }

    /// Insert a pre-built value.
    pub fn insert(&mut self, name: impl Into<String>, value: Param) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Param> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameter names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode for the wire: lists become repeated `name[]=value` pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (name, value) in &self.0 {
            match value {
                Param::Scalar(v) => pairs.push((name.clone(), v.clone())),
                Param::List(vs) => {
                    let key = format!("{name}[]");
                    pairs.extend(vs.iter().map(|v| (key.clone(), v.clone())));
                }
            }
        }
        pairs
    }
}
