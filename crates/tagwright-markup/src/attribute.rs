//! Attribute sets and their serialization.

use std::borrow::Cow;

use tagwright_xchar::{encode_attribute, sanitize, Charset, Quote};

/// The value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Free text, escaped on output.
    Text(String),
    /// A token written by its literal name with no escaping.
    ///
    /// Callers must keep tokens to characters that are safe inside a quoted
    /// attribute value.
    Token(String),
    /// No value. Omitted from output.
    Nil,
}

impl AttrValue {
    /// Create a token value.
    pub fn token(name: impl Into<String>) -> Self {
        AttrValue::Token(name.into())
    }

    /// Check whether this is [`AttrValue::Nil`].
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, AttrValue::Nil)
    }

    /// The unescaped text of the value, or `None` for nil.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) | AttrValue::Token(text) => Some(text),
            AttrValue::Nil => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Nil, Into::into)
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(bool, char, i32, i64, u32, u64, usize, f32, f64);

/// An ordered mapping of attribute names to values.
///
/// Insertion order is kept. Inserting an existing name replaces its value in
/// place.
///
/// # Example
///
/// ```
/// use tagwright_markup::{AttrValue, AttributeSet};
///
/// let attrs = AttributeSet::new()
///     .with("b", "2")
///     .with("a", "1")
///     .with("skipped", AttrValue::Nil);
///
/// assert_eq!(attrs.len(), 3);
/// assert_eq!(attrs.get("a").and_then(AttrValue::as_str), Some("1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add an attribute, replacing the value of an existing one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Insert every attribute of `other`, later values winning.
    pub fn merge(&mut self, other: &AttributeSet) {
        for (name, value) in &other.entries {
            self.insert(name.as_str(), value.clone());
        }
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Check whether a name is present, nil or not.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of entries, nil ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the set has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether any entry is nil.
    pub fn has_nil(&self) -> bool {
        self.entries.iter().any(|(_, value)| value.is_nil())
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate over the non-nil entries in output order.
    ///
    /// Names listed in `priority` come first, in priority order; the rest
    /// follow in insertion order. Each name appears at most once.
    pub fn ordered<'a>(&'a self, priority: &'a [&'a str]) -> impl Iterator<Item = (&'a str, &'a AttrValue)> + 'a {
        let first = priority
            .iter()
            .enumerate()
            .filter(move |&(index, name)| !priority[..index].contains(name))
            .filter_map(move |(_, &name)| self.get(name).map(|value| (name, value)));
        let rest = self.iter().filter(move |(name, _)| !priority.contains(name));

        first.chain(rest).filter(|(_, value)| !value.is_nil())
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

/// An attribute as handed to an event target: sanitized, not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name.
    pub name: &'a str,
    /// Attribute value, with invalid characters repaired.
    pub value: Cow<'a, str>,
}

/// Renders an [`AttributeSet`] as ` name="value"` pairs.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSerializer<'a> {
    quote: Quote,
    charset: &'a Charset,
}

impl<'a> AttributeSerializer<'a> {
    /// Create a serializer for the given quote style and document charset.
    pub fn new(quote: Quote, charset: &'a Charset) -> Self {
        Self { quote, charset }
    }

    /// Quote style in use.
    #[inline]
    pub fn quote(&self) -> Quote {
        self.quote
    }

    /// Serialize to a new string. Empty sets give an empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use tagwright_markup::{AttributeSerializer, AttributeSet};
    /// use tagwright_xchar::{Charset, Quote};
    ///
    /// let charset = Charset::utf8();
    /// let serializer = AttributeSerializer::new(Quote::Double, &charset);
    /// let attrs = AttributeSet::new().with("b", "2").with("a", "1");
    ///
    /// assert_eq!(serializer.serialize(&attrs, &[]), r#" b="2" a="1""#);
    /// assert_eq!(serializer.serialize(&attrs, &["a"]), r#" a="1" b="2""#);
    /// ```
    pub fn serialize(&self, attrs: &AttributeSet, priority: &[&str]) -> String {
        let mut out = String::new();
        self.write_to(&mut out, attrs, priority);
        out
    }

    /// Append the serialized pairs to `out`.
    pub fn write_to(&self, out: &mut String, attrs: &AttributeSet, priority: &[&str]) {
        let quote = self.quote.as_char();
        for (name, value) in attrs.ordered(priority) {
            out.push(' ');
            out.push_str(name);
            out.push('=');
            out.push(quote);
            out.push_str(&self.value(value));
            out.push(quote);
        }
    }

    /// Escaped text of a single value.
    pub fn value<'v>(&self, value: &'v AttrValue) -> Cow<'v, str> {
        match value {
            AttrValue::Token(token) => Cow::Borrowed(token),
            AttrValue::Text(text) => self.charset.represent(encode_attribute(text, self.quote)),
            AttrValue::Nil => Cow::Borrowed(""),
        }
    }

    /// Resolve attributes for an event target, in output order.
    pub fn resolve<'v>(&self, attrs: &'v AttributeSet, priority: &'v [&'v str]) -> Vec<Attribute<'v>> {
        attrs
            .ordered(priority)
            .map(|(name, value)| Attribute {
                name,
                value: match value {
                    AttrValue::Text(text) => sanitize(text),
                    other => Cow::Borrowed(other.as_str().unwrap_or_default()),
                },
            })
            .collect()
    }
}
