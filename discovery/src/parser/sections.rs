//! Splitting help text into its usage and options-description blocks.

/// Header that opens the usage block.
pub const USAGE_HEADER: &str = "Usage:";
/// Header that opens the options-description block.
pub const OPTIONS_HEADER: &str = "Options:";

/// Help text split into the two blocks the parser reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageDocument<'a> {
    /// The complete help text.
    pub text: &'a str,
    /// Text after the first `Usage:` up to the next `Options:`.
    pub usage: &'a str,
    /// Text after that `Options:`; empty when there is no such header.
    pub options: &'a str,
}

impl<'a> UsageDocument<'a> {
    /// Locates both blocks by plain substring search.
    ///
    /// # Examples
    ///
    /// ```
    /// use docopt_completion_discovery::parser::UsageDocument;
    ///
    /// let doc = UsageDocument::split("Usage:\n  prog run\n\nOptions:\n  -v  verbose\n");
    /// assert_eq!(doc.usage.trim(), "prog run");
    /// assert_eq!(doc.options.trim(), "-v  verbose");
    ///
    /// let bare = UsageDocument::split("Usage: prog run\n");
    /// assert!(bare.options.is_empty());
    /// ```
    pub fn split(text: &'a str) -> Self {
        let usage_start = text
            .find(USAGE_HEADER)
            .map(|idx| idx + USAGE_HEADER.len());
        let search_from = usage_start.unwrap_or(0);

        let options_at = text[search_from..]
            .find(OPTIONS_HEADER)
            .map(|idx| search_from + idx);

        let usage = match (usage_start, options_at) {
            (Some(start), Some(end)) => &text[start..end],
            (Some(start), None) => &text[start..],
            (None, _) => "",
        };
        let options = options_at
            .map(|idx| &text[idx + OPTIONS_HEADER.len()..])
            .unwrap_or("");

        Self {
            text,
            usage,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_without_usage_header_has_empty_usage() {
        let doc = UsageDocument::split("Options:\n  -v  verbose\n");
        assert_eq!(doc.usage, "");
        assert_eq!(doc.options.trim(), "-v  verbose");
    }

    #[test]
    fn test_split_ignores_options_header_before_usage() {
        let doc = UsageDocument::split("Options: none\nUsage: prog go\n");
        assert_eq!(doc.usage, " prog go\n");
        assert_eq!(doc.options, "");
    }

    #[test]
    fn test_split_keeps_inline_usage_line() {
        let doc = UsageDocument::split("Usage: prog ship new\nOptions:\n");
        assert_eq!(doc.usage, " prog ship new\n");
        assert_eq!(doc.options, "\n");
    }
}
