/// Configuration for a [`crate::decode::Decoder`].
///
/// Structurally parallel to the teacher lineage's `ParserOptions`: a small,
/// `Copy`, all-defaults-sensible struct constructed in-process by the
/// caller. There is no environment variable or file-based configuration —
/// the decoder core has no I/O of its own.
///
/// # Examples
///
/// ```rust
/// use symgraph_decode::DecoderOptions;
///
/// let options = DecoderOptions {
///     strict_leading_zeros: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecoderOptions {
    /// Maximum nesting depth of the path-tracking stack. Exceeding this
    /// raises `DataCorrupted` rather than growing unboundedly.
    ///
    /// # Default
    ///
    /// `64`, the reference capacity.
    pub max_path_depth: usize,

    /// Whether to reject numbers with a leading zero before any other digit
    /// (e.g. `01`), per strict RFC 8259 grammar.
    ///
    /// The reference decoder this crate is based on accepts `01` leniently;
    /// that behavior is preserved by default and can be tightened here.
    ///
    /// # Default
    ///
    /// `false` (lenient, matching reference behavior).
    pub strict_leading_zeros: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_path_depth: 64,
            strict_leading_zeros: false,
        }
    }
}
