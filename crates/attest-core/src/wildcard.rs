//! Wildcard vocabulary: reserved pattern tokens an expected scalar can carry
//! to stand in for a whole class of acceptable actual values.
//!
//! A token travels inside a JSON string wrapped in a fixed marker frame, e.g.
//! `"[##_CORE_##_][_ANY_][##_CORE_##]"`. Recognition strips the frame and the
//! quotes and matches the remainder case-insensitively against the closed
//! token set; the short symbols (`*`, `+`, `[?]`, `[1]`, `[>1]`) are accepted
//! as equivalent spellings.

const MARKER_START: &str = "[##_CORE_##_][_";
const MARKER_END: &str = "_][##_CORE_##]";

/// The closed set of wildcard tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wildcard {
    /// Matches anything except an array.
    Any,
    /// Matches anything non-null except an array.
    Some,
    /// Matches an array of any length, including zero.
    ArrayUndeterminedLength,
    /// Matches an array with exactly one element.
    ArrayExactlyOne,
    /// Matches an array with at least two elements.
    ArrayMoreThanOne,
}

impl Wildcard {
    pub const ALL: [Wildcard; 5] = [
        Wildcard::Any,
        Wildcard::Some,
        Wildcard::ArrayUndeterminedLength,
        Wildcard::ArrayExactlyOne,
        Wildcard::ArrayMoreThanOne,
    ];

    /// Canonical marker text.
    pub fn text(self) -> &'static str {
        match self {
            Wildcard::Any => "ANY",
            Wildcard::Some => "SOME",
            Wildcard::ArrayUndeterminedLength => "ARRAY_UNDETERMINED_LENGTH",
            Wildcard::ArrayExactlyOne => "ARRAY_EXACTLY_ONE",
            Wildcard::ArrayMoreThanOne => "ARRAY_MORE_THAN_ONE",
        }
    }

    /// Short symbol used when rendering an expected subtree in diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            Wildcard::Any => "*",
            Wildcard::Some => "+",
            Wildcard::ArrayUndeterminedLength => "[?]",
            Wildcard::ArrayExactlyOne => "[1]",
            Wildcard::ArrayMoreThanOne => "[>1]",
        }
    }

    /// Human label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Wildcard::Any => "anything (except array)",
            Wildcard::Some => "something not null (except array)",
            Wildcard::ArrayUndeterminedLength => "a non-null array of undetermined length",
            Wildcard::ArrayExactlyOne => "a non-null array with just one element",
            Wildcard::ArrayMoreThanOne => "a non-null array with more than one element",
        }
    }

    /// The token as it appears embedded in serialized JSON: a quoted string
    /// holding the framed marker text.
    pub fn marker(self) -> String {
        format!("\"{}{}{}\"", MARKER_START, self.text(), MARKER_END)
    }

    /// Recognize a wildcard in the serialized form of an expected node.
    ///
    /// Returns `None` unless the text, after stripping the marker frame and
    /// quotes, reduces to exactly one token text or symbol.
    pub fn recognize(raw: &str) -> Option<Wildcard> {
        if raw.trim().is_empty() {
            return None;
        }
        let stripped = raw
            .replace(MARKER_START, "")
            .replace(MARKER_END, "")
            .replace('"', "");
        let stripped = stripped.trim();
        if stripped.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|token| {
            token.text().eq_ignore_ascii_case(stripped) || token.symbol() == stripped
        })
    }

    /// Rewrite every embedded marker in `text` to its short symbol. Cosmetic
    /// only: used to render a whole expected subtree compactly.
    pub fn strip_markers(text: &str) -> String {
        let mut out = text.to_string();
        for token in Self::ALL {
            out = out.replace(&token.marker(), &format!("\"{}\"", token.symbol()));
        }
        out
    }
}
