//! OGSON sentinel table and offset search helpers.
//!
//! OGSON delimits every construct with a pair of fixed, three-character ASCII markers.
//! There is no escaping and no other reserved character.
//!
//! | Construct | Begin | End |
//! |-----------|-------|-----|
//! | Value     | `@@@` | `!!!` |
//! | Object    | `###` | `^^^` |
//! | Array     | `[[[` | `]]]` |
//!
//! ## Values
//!
//! ```text
//! @@@true!!!
//! @@@42!!!
//! @@@hey there homey!!!
//! ```
//!
//! A value payload is type-inferred when decoded: `true`/`false` (any case, surrounding
//! whitespace ignored) become booleans, finite numbers become numbers, and anything
//! else is kept verbatim as a string, whitespace included.
//!
//! ## Arrays
//!
//! ```text
//! [[[@@@foo!!!@@@bar!!!@@@baz!!!]]]
//! ```
//!
//! ## Objects
//!
//! Keys and values alternate. A member whose value is a container carries one extra
//! value wrapper around the container:
//!
//! ```text
//! ###@@@name!!!@@@ogson!!!@@@keywords!!!@@@[[[@@@wheel!!!]]]!!!^^^
//! ```
//!
//! ## Limitations
//!
//! - **No escaping**: a payload containing a sentinel substring corrupts the parse.
//! - **Nesting**: in the default decoding mode an object member may hold a container
//!   only if that container's own members are scalars. See
//!   [`Nesting`](crate::options::Nesting).
//! - **Array elements**: direct array elements must be value-wrapped scalars in the
//!   default mode.
//!
//! Text before the first sentinel is ignored, so a document may start with free-form
//! commentary:
//!
//! ```text
//! a comment
//! @@@ yoyoyo !!!
//! ```
//!
//! All positions handled here are byte offsets into the original input. Sentinels are
//! ASCII, so every offset returned by a search lands on a character boundary.

use std::fmt;

/// Width in bytes of every sentinel.
pub const SENTINEL_LEN: usize = 3;

/// The three constructs a sentinel pair can delimit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Construct {
    Value,
    Object,
    Array,
}

impl Construct {
    /// Every construct, in the order a tie between openers is resolved.
    pub const ALL: [Construct; 3] = [Construct::Value, Construct::Object, Construct::Array];

    /// Returns the opening sentinel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ogson::sentinel::Construct;
    ///
    /// assert_eq!(Construct::Value.begin(), "@@@");
    /// assert_eq!(Construct::Object.begin(), "###");
    /// assert_eq!(Construct::Array.begin(), "[[[");
    /// ```
    #[must_use]
    pub const fn begin(self) -> &'static str {
        match self {
            Construct::Value => "@@@",
            Construct::Object => "###",
            Construct::Array => "[[[",
        }
    }

    /// Returns the closing sentinel.
    #[must_use]
    pub const fn end(self) -> &'static str {
        match self {
            Construct::Value => "!!!",
            Construct::Object => "^^^",
            Construct::Array => "]]]",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Construct::Value => "value",
            Construct::Object => "object",
            Construct::Array => "array",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Construct::Object | Construct::Array)
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finds the first occurrence of `needle` starting at or after `from` and ending at or
/// before `to`.
#[inline]
pub(crate) fn find_from(haystack: &str, needle: &str, from: usize, to: usize) -> Option<usize> {
    haystack
        .get(from..to)?
        .find(needle)
        .map(|index| index + from)
}

/// Finds the last occurrence of `needle` lying entirely inside `from..to`.
#[inline]
pub(crate) fn rfind_within(haystack: &str, needle: &str, from: usize, to: usize) -> Option<usize> {
    haystack
        .get(from..to)?
        .rfind(needle)
        .map(|index| index + from)
}

/// Returns the leftmost opener of any construct inside `from..to`.
///
/// Each later search stops at the best opener found so far. Sentinels of different
/// constructs share no character, so an opener cannot straddle that bound.
pub(crate) fn first_opener(haystack: &str, from: usize, to: usize) -> Option<(Construct, usize)> {
    let mut best: Option<(Construct, usize)> = None;
    for construct in Construct::ALL {
        let bound = best.map_or(to, |(_, at)| at);
        if let Some(at) = find_from(haystack, construct.begin(), from, bound) {
            best = Some((construct, at));
        }
    }
    best
}

/// Returns the leftmost object or array opener inside `from..to`.
pub(crate) fn first_container_opener(
    haystack: &str,
    from: usize,
    to: usize,
) -> Option<(Construct, usize)> {
    [Construct::Object, Construct::Array]
        .into_iter()
        .filter_map(|construct| {
            find_from(haystack, construct.begin(), from, to).map(|at| (construct, at))
        })
        .min_by_key(|&(_, at)| at)
}

/// Finds the closer matching the opener of `construct` at `open_at`, counting nested
/// openers and closers of the same construct.
///
/// Returns the offset of the matching closer, or `None` when the opener is never
/// balanced before `to`.
pub(crate) fn matching_end(
    haystack: &str,
    construct: Construct,
    open_at: usize,
    to: usize,
) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = open_at + SENTINEL_LEN;

    loop {
        let next_end = find_from(haystack, construct.end(), pos, to)?;
        match find_from(haystack, construct.begin(), pos, next_end) {
            Some(nested) => {
                depth += 1;
                pos = nested + SENTINEL_LEN;
            }
            None => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_end);
                }
                pos = next_end + SENTINEL_LEN;
            }
        }
    }
}
