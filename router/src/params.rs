use core::{fmt, slice};

use xitca_unsafe_collection::small_str::SmallBoxedStr;

/// A single URL parameter, consisting of a key and a value.
#[derive(Clone, PartialEq, Eq)]
struct Param {
    key: SmallBoxedStr,
    value: String,
}

impl Param {
    fn key_str(&self) -> &str {
        self.key.as_ref()
    }

    fn value_str(&self) -> &str {
        self.value.as_str()
    }
}

/// Parameters captured from a matched path.
///
/// Keys keep the leading colon of their declaration, e.g. `:id`, `:splat`, `:ext`.
/// Every key is present at most once; storing a key again replaces its value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: Vec<Param>,
}

impl Params {
    pub(crate) const fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no parameters in the list.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the value of the parameter registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.inner
            .iter()
            .find(|param| param.key_str() == key)
            .map(Param::value_str)
    }

    /// Returns `true` if a parameter is registered under the given key.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over the parameters in the order they were captured.
    pub fn iter(&self) -> ParamsIter<'_> {
        ParamsIter {
            inner: self.inner.iter(),
        }
    }

    /// Inserts a key value parameter pair into the list.
    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        match self.inner.iter_mut().find(|param| param.key_str() == key) {
            Some(param) => {
                param.value.clear();
                param.value.push_str(value);
            }
            None => self.inner.push(Param {
                key: SmallBoxedStr::from(key),
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = ParamsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over key value pairs of [`Params`].
pub struct ParamsIter<'a> {
    inner: slice::Iter<'a, Param>,
}

impl<'a> Iterator for ParamsIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (p.key_str(), p.value_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter<'_> {}
