//! Configuration options for OGSON decoding.
//!
//! This module provides types to choose how forgiving and how deep the decoder is:
//!
//! - [`DecodeOptions`]: Main configuration struct
//! - [`Mode`]: Lenient (never fails) or strict (reports malformed input)
//! - [`Nesting`]: First-closer matching (one nested level) or depth-counted matching
//!
//! The defaults reproduce the reference behavior of the format: lenient decoding with
//! single-level nesting under object members.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ogson::{decode_with_options, DecodeOptions, Mode, Nesting};
//!
//! // Report truncated input instead of returning a partial tree
//! let options = DecodeOptions::new().with_mode(Mode::Strict);
//! assert!(decode_with_options("###@@@key!!!", &options).is_err());
//!
//! // Decode arbitrarily deep trees
//! let options = DecodeOptions::new().with_nesting(Nesting::DepthCounted);
//! let text = "###@@@a!!!@@@###@@@b!!!@@@###@@@c!!!@@@deep!!!^^^!!!^^^!!!^^^";
//! let value = decode_with_options(text, &options).unwrap();
//! assert_eq!(value["a"]["b"]["c"].as_str(), Some("deep"));
//! ```

/// How the decoder reacts to malformed input.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::Mode;
///
/// assert_eq!(Mode::default(), Mode::Lenient);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Degrade silently: truncated containers come back partial, dangling keys keep
    /// `Null`, unterminated values run to the end of the input.
    #[default]
    Lenient,
    /// Fail with an [`Error`](crate::Error) describing the first malformed construct.
    Strict,
}

/// How the decoder locates the end of a nested container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Nesting {
    /// Take the first closing sentinel of each kind. An object member may hold a
    /// container only if that container's members are scalars, and array elements
    /// must be value-wrapped scalars.
    #[default]
    SingleLevel,
    /// Match each opener with its closer by counting nested sentinels of the same
    /// kind. Supports arbitrary depth and containers as direct array elements.
    DepthCounted,
}

/// Configuration options for OGSON decoding.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::{DecodeOptions, Mode, Nesting};
///
/// // Default lenient, single-level options
/// let options = DecodeOptions::new();
/// assert_eq!(options.mode, Mode::Lenient);
///
/// // Strict error reporting
/// let options = DecodeOptions::strict();
///
/// // Custom configuration
/// let options = DecodeOptions::new()
///     .with_mode(Mode::Strict)
///     .with_nesting(Nesting::DepthCounted);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mode: Mode,
    pub nesting: Nesting,
}

impl DecodeOptions {
    /// Creates default options (lenient, single-level nesting).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that report malformed input as errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ogson::{DecodeOptions, Mode, Nesting};
    ///
    /// let options = DecodeOptions::strict();
    /// assert_eq!(options.mode, Mode::Strict);
    /// assert_eq!(options.nesting, Nesting::SingleLevel);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        DecodeOptions {
            mode: Mode::Strict,
            ..Default::default()
        }
    }

    /// Creates lenient options with depth-counted nesting.
    #[must_use]
    pub fn extended() -> Self {
        DecodeOptions {
            nesting: Nesting::DepthCounted,
            ..Default::default()
        }
    }

    /// Sets the error mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the nesting strategy.
    #[must_use]
    pub fn with_nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }

    #[inline]
    pub(crate) fn is_strict(&self) -> bool {
        self.mode == Mode::Strict
    }
}
