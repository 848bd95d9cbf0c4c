use std::borrow::{Borrow, Cow};
use std::fmt;

use crate::error::InvalidKey;

/// A dotted path addressing one resource, i.e. `cmd.guide.title`.
///
/// A valid key is non-empty, has no empty segments and contains no
/// whitespace.
///
/// Keys for literals should be created with [`ResourceKey::from_static`],
/// preferably in a `const` so invalid literals fail to compile:
///
/// ```
/// use hoshi_l10n::ResourceKey;
///
/// const TITLE: ResourceKey = ResourceKey::from_static("cmd.guide.title");
/// assert_eq!(TITLE.as_str(), "cmd.guide.title");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey(Cow<'static, str>);

impl ResourceKey {
    /// Creates a key from a static string.
    ///
    /// # Panics
    ///
    /// Panics if `key` isn't valid. In `const` context, this is a compile
    /// error instead.
    #[must_use]
    pub const fn from_static(key: &'static str) -> Self {
        if check(key.as_bytes()).is_err() {
            panic!("invalid static resource key");
        }

        Self(Cow::Borrowed(key))
    }

    /// Creates a key from an arbitrary string.
    ///
    /// # Errors
    ///
    /// Returns an error if the key isn't valid.
    pub fn new(key: &str) -> Result<Self, InvalidKey> {
        Self::try_from(key.to_owned())
    }

    /// Appends more segments, separated by a dot.
    ///
    /// `segment` may itself contain dots.
    ///
    /// # Errors
    ///
    /// Returns an error if `segment` isn't a valid key by itself.
    pub fn join(&self, segment: &str) -> Result<Self, InvalidKey> {
        let mut key = String::with_capacity(self.0.len() + 1 + segment.len());
        key.push_str(&self.0);
        key.push('.');
        key.push_str(segment);

        match check(segment.as_bytes()) {
            Ok(()) => Ok(Self(Cow::Owned(key))),
            Err(reason) => Err(InvalidKey { key, reason }),
        }
    }

    /// Gets the key as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gets the last segment of the key.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Gets the key without its last segment, if it has more than one.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (parent, _) = self.0.rsplit_once('.')?;
        Some(Self(Cow::Owned(parent.to_owned())))
    }
}

const fn check(key: &[u8]) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("key is empty");
    }

    let mut index = 0;
    let mut segment_len = 0;
    while index < key.len() {
        let byte = key[index];
        if byte == b'.' {
            if segment_len == 0 {
                return Err("key has an empty segment");
            }

            segment_len = 0;
        } else if byte.is_ascii_whitespace() {
            return Err("key contains whitespace");
        } else {
            segment_len += 1;
        }

        index += 1;
    }

    if segment_len == 0 {
        return Err("key has an empty segment");
    }

    Ok(())
}

impl TryFrom<String> for ResourceKey {
    type Error = InvalidKey;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        match check(key.as_bytes()) {
            Ok(()) => Ok(Self(Cow::Owned(key))),
            Err(reason) => Err(InvalidKey { key, reason }),
        }
    }
}

impl Borrow<str> for ResourceKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        for key in ["greet", "cmd.trivia.trivia-title", "guide.content.widget-7", "a.b"] {
            assert_eq!(ResourceKey::new(key).map(|k| k.to_string()), Ok(key.to_owned()));
        }
    }

    #[test]
    fn invalid() {
        for key in ["", ".", "a.", ".a", "a..b", "a b", "a.\tb"] {
            assert!(ResourceKey::new(key).is_err(), "{key:?} should be rejected");
        }
    }

    #[test]
    fn join() {
        const GUIDE: ResourceKey = ResourceKey::from_static("guide");
        let key = GUIDE.join("content").and_then(|k| k.join("widget-7"));
        assert_eq!(key.as_ref().map(ResourceKey::as_str), Ok("guide.content.widget-7"));
        assert!(GUIDE.join("has space").is_err(), "segment with space must be rejected");
        assert!(GUIDE.join("").is_err(), "empty segment must be rejected");
    }

    #[test]
    fn segments() {
        let key = ResourceKey::from_static("guide.search");
        assert_eq!(key.last_segment(), "search");
        assert_eq!(key.parent(), Some(ResourceKey::from_static("guide")));
        assert_eq!(ResourceKey::from_static("guide").parent(), None);
    }
}
