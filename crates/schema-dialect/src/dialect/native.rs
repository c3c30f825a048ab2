use std::fmt;

/// A parsed native column type descriptor.
///
/// Parsing never fails. A descriptor the parser cannot make sense of yields
/// an empty base keyword or no arguments, and the dialect falls back to its
/// generic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeType {
    raw: String,
    base: String,
    args: Vec<u32>,
    modifiers: Vec<String>,
}

impl NativeType {
    /// Parse a descriptor: base keyword, optional `(n[,m])` argument list,
    /// then any trailing modifier tokens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use schema_dialect::dialect::NativeType;
    ///
    /// let native = NativeType::parse("DECIMAL(11,2) UNSIGNED ZEROFILL");
    /// assert_eq!(native.base(), "decimal");
    /// assert_eq!(native.length(), Some(11));
    /// assert_eq!(native.precision(), Some(2));
    /// assert!(native.is_unsigned());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let base_end = trimmed
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(trimmed.len());
        let base = trimmed[..base_end].to_ascii_lowercase();

        let mut rest = trimmed[base_end..].trim_start();
        let mut args = Vec::new();
        if let Some(inner) = rest.strip_prefix('(') {
            match closing_paren(inner) {
                Some(end) => {
                    args = parse_args(&inner[..end]);
                    rest = &inner[end + 1..];
                }
                // Unbalanced list: nothing after it is trustworthy.
                None => rest = "",
            }
        }

        let modifiers = rest
            .split_whitespace()
            .map(|token| token.to_ascii_lowercase())
            .collect();

        Self {
            raw: raw.to_string(),
            base,
            args,
            modifiers,
        }
    }

    /// The descriptor as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercase base keyword; empty when the descriptor has none.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Integer arguments (zero to two). Non-integer lists such as
    /// `enum('a','b')` produce no arguments.
    pub fn args(&self) -> &[u32] {
        &self.args
    }

    /// First argument: length, display width or total digits.
    pub fn length(&self) -> Option<u32> {
        self.args.first().copied()
    }

    /// Second argument: fractional digits.
    pub fn precision(&self) -> Option<u32> {
        self.args.get(1).copied()
    }

    /// Lowercase trailing tokens (`unsigned`, `zerofill`, ...).
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers
            .iter()
            .any(|m| m.eq_ignore_ascii_case(modifier))
    }

    pub fn is_unsigned(&self) -> bool {
        self.has_modifier("unsigned")
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Byte offset of the `)` closing an argument list, skipping quoted text.
fn closing_paren(inner: &str) -> Option<usize> {
    let mut in_quote = false;
    for (idx, ch) in inner.char_indices() {
        match ch {
            '\'' => in_quote = !in_quote,
            ')' if !in_quote => return Some(idx),
            _ => {}
        }
    }
    None
}

fn parse_args(inner: &str) -> Vec<u32> {
    let parsed: Option<Vec<u32>> = inner
        .split(',')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect();
    match parsed {
        Some(args) if args.len() <= 2 => args,
        _ => Vec::new(),
    }
}
