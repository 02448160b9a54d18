//! Parses GRUB configuration files into [`BootEntry`](crate::config::BootEntry).
//!
//! The currently supported dialects are as follows:
//! - GRUB legacy (also known as GRUB 0.97)
//! - GRUB2
//!
//! Both dialects share the same directives. They only differ in how arguments are escaped.

use alloc::borrow::Cow;

use thiserror::Error;

/// The GRUB configuration parser.
pub mod grub;

/// Relative paths where GRUB2 configuration files may be found, in the order that they are probed.
pub const GRUB2_PATHS: [&str; 4] = [
    "boot/grub2/grub.cfg",
    "boot/grub2.cfg",
    "grub2/grub.cfg",
    "grub2.cfg",
];

/// Relative paths where GRUB legacy configuration files may be found, in the order that they are probed.
pub const LEGACY_PATHS: [&str; 4] = [
    "boot/grub/grub.cfg",
    "boot/grub.cfg",
    "grub/grub.cfg",
    "grub.cfg",
];

/// Errors that may result from selecting a parser.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The GRUB version does not correspond to any supported [`Dialect`].
    #[error("Invalid GRUB version: {0}")]
    InvalidDialect(u32),
}

/// The GRUB configuration dialects that exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// GRUB legacy, which has no escaping.
    Legacy,

    /// GRUB2, where a `$` may be escaped as `\$`.
    Grub2,
}

impl Dialect {
    /// Every [`Dialect`], in the order that the scanner probes them.
    pub const SCAN_ORDER: [Self; 2] = [Self::Grub2, Self::Legacy];

    /// Convert a [`Dialect`] type into an [`&str`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "grub-legacy",
            Self::Grub2 => "grub2",
        }
    }

    /// Gets the relative paths where configuration files of this [`Dialect`] are found.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn candidate_paths(self) -> &'static [&'static str] {
        match self {
            Self::Legacy => &LEGACY_PATHS,
            Self::Grub2 => &GRUB2_PATHS,
        }
    }

    /// Checks if scanning for this [`Dialect`] was enabled at build time.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn is_enabled(self) -> bool {
        match self {
            Self::Legacy => cfg!(feature = "legacy"),
            Self::Grub2 => cfg!(feature = "grub2"),
        }
    }

    /// Removes the escaping of a directive argument string.
    ///
    /// GRUB2 allows a literal `$` to be written as `\$`, so that it is not expanded as a variable. Every other
    /// escape sequence is kept as is. GRUB legacy strings are returned unmodified.
    #[must_use = "Has no effect if the result is unused"]
    pub fn unescape(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Grub2 if text.contains("\\$") => Cow::Owned(text.replace("\\$", "$")),
            Self::Grub2 | Self::Legacy => Cow::Borrowed(text),
        }
    }
}

impl TryFrom<u32> for Dialect {
    type Error = ParseError;

    fn try_from(version: u32) -> Result<Self, Self::Error> {
        match version {
            1 => Ok(Self::Legacy),
            2 => Ok(Self::Grub2),
            other => Err(ParseError::InvalidDialect(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions() {
        assert_eq!(Dialect::try_from(1), Ok(Dialect::Legacy));
        assert_eq!(Dialect::try_from(2), Ok(Dialect::Grub2));
        assert_eq!(Dialect::try_from(0), Err(ParseError::InvalidDialect(0)));
        assert_eq!(Dialect::try_from(3), Err(ParseError::InvalidDialect(3)));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(Dialect::Grub2.unescape("init=\\$foo"), "init=$foo");
        assert_eq!(Dialect::Legacy.unescape("init=\\$foo"), "init=\\$foo");

        // only \$ is an escape, anything else is left alone
        assert_eq!(Dialect::Grub2.unescape("a\\b \\\"c\\\""), "a\\b \\\"c\\\"");
        assert_eq!(Dialect::Grub2.unescape("\\$a \\$b"), "$a $b");
    }

    #[test]
    fn test_candidate_paths() {
        assert_eq!(Dialect::Grub2.candidate_paths()[0], "boot/grub2/grub.cfg");
        assert_eq!(Dialect::Legacy.candidate_paths()[3], "grub.cfg");
        assert_eq!(Dialect::SCAN_ORDER, [Dialect::Grub2, Dialect::Legacy]);
    }

    #[test]
    fn test_enabled_dialects() {
        assert_eq!(Dialect::Grub2.is_enabled(), cfg!(feature = "grub2"));
        assert_eq!(Dialect::Legacy.is_enabled(), cfg!(feature = "legacy"));
    }
}
