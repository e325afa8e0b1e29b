use url::form_urlencoded;

/// Form fields for a URL-encoded POST.
///
/// Keys keep the order they were first inserted in; values under one key
/// keep the order they were appended in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, Vec<String>)>,
}

impl Form {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a form from `(key, values)` entries.
    ///
    /// A key repeated across entries merges into its first occurrence.
    pub fn from_pairs<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut form = Self::new();
        for (key, values) in entries {
            let key = key.into();
            for value in values {
                form.append(key.clone(), value);
            }
        }
        form
    }

    /// Appends one value under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((key, vec![value])),
        }
        self
    }

    /// Values stored under `key`, in append order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of encoded `key=value` pairs.
    pub fn len(&self) -> usize {
        self.fields.iter().map(|(_, values)| values.len()).sum()
    }

    /// Flattened pairs in encoding order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Encodes as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

impl<K, V> From<Vec<(K, Vec<V>)>> for Form
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: Vec<(K, Vec<V>)>) -> Self {
        Self::from_pairs(entries)
    }
}

impl<K, V, const N: usize, const M: usize> From<[(K, [V; M]); N]> for Form
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, [V; M]); N]) -> Self {
        Self::from_pairs(entries)
    }
}
