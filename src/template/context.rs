//! Template variables.
//!
//! [`VariableBag`] is the value container handed to expansion. Values are
//! normalized on insertion: scalars become strings, sequences are
//! flattened one level into lists of strings, and deeper nesting is
//! rejected.

use std::collections::BTreeMap;

use crate::template::error::{ExpandError, ExpandErrorKind};

/// Input value for a template variable.
///
/// This is the shape callers hand to [`VariableBag::assign`]; the bag
/// never stores it as-is but normalizes it to a [`Binding`] first.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Undefined (i.e. null). Assigning it removes the binding.
    Undefined,
    /// Boolean, normalized to `"1"` / `"0"`.
    Bool(bool),
    /// Integer, normalized to its decimal form.
    Integer(i64),
    /// Float, normalized to its decimal form.
    Float(f64),
    /// String.
    String(String),
    /// Ordered sequence. Members must normalize to scalars.
    List(Vec<Value>),
    /// Ordered associative array. Member values must normalize to
    /// scalars.
    Assoc(Vec<(String, Value)>),
}

impl Value {
    /// Builds an [`Value::Assoc`] from key-value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::template::Value;
    ///
    /// let keys = Value::assoc([("semi", ";"), ("dot", ".")]);
    /// ```
    pub fn assoc<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Assoc(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

/// Normalized value of a template variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Scalar string.
    Scalar(String),
    /// Ordered list of strings.
    List(Vec<String>),
    /// Ordered associative array of string pairs.
    Pairs(Vec<(String, String)>),
}

/// Normalized template-variable container.
///
/// The bag has value semantics: it is cheap to clone, comparable, and
/// never shares state.
///
/// # Examples
///
/// ```
/// use uri_value::template::{Template, VariableBag};
///
/// let mut bag = VariableBag::new();
/// bag.assign("user", "fred")?;
/// bag.assign("admin", true)?;
/// bag.assign("page", 3)?;
///
/// let template = Template::parse("/u/{user}{?admin,page}")?;
/// assert_eq!(template.expand(&bag)?, "/u/fred?admin=1&page=3");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct VariableBag {
    /// Normalized bindings.
    variables: BTreeMap<String, Binding>,
}

impl VariableBag {
    /// Creates an empty bag.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and stores a value, returning the previous binding.
    ///
    /// [`Value::Undefined`] (and an undefined-only content) removes the
    /// binding instead.
    ///
    /// # Failures
    ///
    /// Fails when a sequence nests inside another sequence.
    pub fn assign<K, V>(&mut self, name: K, value: V) -> Result<Option<Binding>, ExpandError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        match normalize_value(value.into())? {
            Some(binding) => Ok(self.variables.insert(name, binding)),
            None => Ok(self.variables.remove(&name)),
        }
    }

    /// Returns the binding for the name.
    #[inline]
    #[must_use]
    pub fn fetch(&self, name: &str) -> Option<&Binding> {
        self.variables.get(name)
    }

    /// Left-biased merge: keeps own bindings and adds the other bag's
    /// bindings for names not present here.
    #[must_use]
    pub fn replace(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (name, binding) in &other.variables {
            merged
                .variables
                .entry(name.clone())
                .or_insert_with(|| binding.clone());
        }
        merged
    }

    /// Iterates over the bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.variables
            .iter()
            .map(|(name, binding)| (name.as_str(), binding))
    }

    /// Returns the number of bindings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if the bag holds no bindings.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Normalizes an input value. `None` means "do not store".
fn normalize_value(value: Value) -> Result<Option<Binding>, ExpandError> {
    let binding = match value {
        Value::Undefined => return Ok(None),
        Value::Bool(v) => Binding::Scalar(if v { "1" } else { "0" }.to_owned()),
        Value::Integer(v) => Binding::Scalar(v.to_string()),
        Value::Float(v) => Binding::Scalar(v.to_string()),
        Value::String(v) => Binding::Scalar(v),
        Value::List(items) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                if let Some(scalar) = normalize_scalar(item)? {
                    list.push(scalar);
                }
            }
            Binding::List(list)
        }
        Value::Assoc(pairs) => {
            let mut normalized = Vec::with_capacity(pairs.len());
            for (key, value) in pairs {
                if let Some(scalar) = normalize_scalar(value)? {
                    normalized.push((key, scalar));
                }
            }
            Binding::Pairs(normalized)
        }
    };
    Ok(Some(binding))
}

/// Normalizes a sequence member, which must be scalar.
fn normalize_scalar(value: Value) -> Result<Option<String>, ExpandError> {
    match value {
        Value::Undefined => Ok(None),
        Value::Bool(v) => Ok(Some(if v { "1" } else { "0" }.to_owned())),
        Value::Integer(v) => Ok(Some(v.to_string())),
        Value::Float(v) => Ok(Some(v.to_string())),
        Value::String(v) => Ok(Some(v)),
        Value::List(_) | Value::Assoc(_) => {
            Err(ExpandError::new(ExpandErrorKind::NestedValue))
        }
    }
}
