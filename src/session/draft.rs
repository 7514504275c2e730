//! Form field accumulator.

/// An ordered set of form fields, keyed by field name.
///
/// The session keeps one as its *draft*: fields every write should carry
/// (the anti-forgery token after a successful login check, plus anything added
/// with [`Session::with_draft_field`](crate::Session::with_draft_field)). Each
/// action overlays its own fields onto a copy of the draft, so nothing an
/// action submits leaks into the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    fields: Vec<(String, String)>,
}

impl FormDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder form of [`FormDraft::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(existing, _)| existing == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Removes every field.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns true if the draft has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns a new draft with `overlay`'s fields laid over this one.
    ///
    /// On a name collision the overlay wins. `self` is left untouched.
    pub fn overlay(&self, overlay: &FormDraft) -> FormDraft {
        let mut merged = self.clone();
        for (name, value) in overlay.iter() {
            merged.set(name, value);
        }
        merged
    }

    /// Copies the fields out as owned pairs, ready for URL encoding.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.fields.clone()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormDraft {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut draft = FormDraft::new();
        for (name, value) in iter {
            draft.set(name, value);
        }
        draft
    }
}
