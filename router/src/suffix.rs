use core::slice;

const DEFAULT_EXTS: [&str; 3] = [".json", ".xml", ".html"];

/// Ordered set of extensions the matcher may strip from the last segment of a path.
///
/// When the last segment resolves nothing as is, each extension is tried in order and the
/// first one that lets the stripped segment resolve is bound to `:ext` without its dot.
///
/// ```rust
/// use trie_mux::SuffixExts;
///
/// let mut exts = SuffixExts::default();
/// exts.add("foo");
/// exts.remove(".xml");
///
/// assert!(exts.iter().eq([".json", ".html", ".foo"]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuffixExts {
    exts: Vec<String>,
}

impl Default for SuffixExts {
    fn default() -> Self {
        Self {
            exts: DEFAULT_EXTS.iter().map(|ext| (*ext).to_owned()).collect(),
        }
    }
}

impl SuffixExts {
    /// Construct an empty set. Suffix fallback never applies with it.
    pub const fn empty() -> Self {
        Self { exts: Vec::new() }
    }

    /// Add an extension. A missing leading `.` is added and duplicates are ignored.
    ///
    /// Returns `true` if the extension was not present.
    pub fn add(&mut self, ext: &str) -> bool {
        let ext = normalize(ext);
        if ext.len() < 2 || self.contains(&ext) {
            return false;
        }
        self.exts.push(ext);
        true
    }

    /// Remove an extension. Returns `true` if it was present.
    pub fn remove(&mut self, ext: &str) -> bool {
        let ext = normalize(ext);
        let len = self.exts.len();
        self.exts.retain(|e| *e != ext);
        len != self.exts.len()
    }

    pub fn contains(&self, ext: &str) -> bool {
        let ext = normalize(ext);
        self.exts.iter().any(|e| *e == ext)
    }

    pub fn len(&self) -> usize {
        self.exts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }

    /// Extensions in insertion order, each with its leading `.`.
    pub fn iter(&self) -> SuffixIter<'_> {
        SuffixIter {
            inner: self.exts.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a SuffixExts {
    type Item = &'a str;
    type IntoIter = SuffixIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the extensions of [`SuffixExts`].
pub struct SuffixIter<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> Iterator for SuffixIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

fn normalize(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_owned()
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let exts = SuffixExts::default();
        assert_eq!(exts.len(), 3);
        assert!(exts.iter().eq(DEFAULT_EXTS));
        assert!(exts.contains("json"));
        assert!(exts.contains(".xml"));
    }

    #[test]
    fn add_remove() {
        let mut exts = SuffixExts::empty();
        assert!(exts.is_empty());

        assert!(exts.add(".foo"));
        assert!(exts.add("foo2"));
        assert!(!exts.add("foo"));
        assert!(!exts.add("."));
        assert!(exts.iter().eq([".foo", ".foo2"]));

        assert!(exts.remove("foo"));
        assert!(!exts.remove(".foo"));
        assert!(exts.iter().eq([".foo2"]));
    }
}
