//! Tongue: the language code sent as `sl`, `tl` and `hl`.
//!
//! Codes are passed through verbatim. Whether the service understands a code
//! is the service's business; nothing here validates it.

use std::borrow::Cow;
use std::fmt;

/// A language code such as `"en"` or `"zh-CN"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tongue {
    code: Cow<'static, str>,
}

impl Tongue {
    /// Let the service detect the source language.
    pub const AUTO: Tongue = Tongue::from_static("auto");
    pub const ENGLISH: Tongue = Tongue::from_static("en");
    pub const CHINESE: Tongue = Tongue::from_static("zh");
    pub const ARABIC: Tongue = Tongue::from_static("ar");
    pub const FRENCH: Tongue = Tongue::from_static("fr");
    pub const SPANISH: Tongue = Tongue::from_static("es");

    pub const fn from_static(code: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
        }
    }

    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Cow::Owned(code.into()),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Tongue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl From<&str> for Tongue {
    fn from(code: &str) -> Self {
        Tongue::new(code)
    }
}

impl From<String> for Tongue {
    fn from(code: String) -> Self {
        Tongue::new(code)
    }
}

impl AsRef<str> for Tongue {
    fn as_ref(&self) -> &str {
        self.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_codes() {
        assert_eq!(Tongue::ENGLISH.code(), "en");
        assert_eq!(Tongue::CHINESE.code(), "zh");
        assert_eq!(Tongue::AUTO.code(), "auto");
    }

    #[test]
    fn test_owned_equals_static() {
        assert_eq!(Tongue::new("en"), Tongue::ENGLISH);
        assert_eq!(Tongue::from("fr"), Tongue::FRENCH);
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Tongue::new("zh-TW").to_string(), "zh-TW");
    }
}
