//! Typed argument decoders.
//!
//! The free functions are pure; the `Parser` methods wrap them, read the
//! current line's argument slices and report anything odd as a diagnostic
//! before falling back to a default.

use std::ops::BitOrAssign;

use super::keyword::Keyword;
use super::line::split_trimmed;
use super::Parser;
use crate::diagnostics::DiagnosticKind;
use crate::types::{
    FlareType, MinimassOption, NodeId, NodeRef, NodeToken, RefFlags, WheelBraking,
    WheelPropulsion, WheelSide, WingControl,
};

/// Why a number could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    /// No digits at the start.
    Invalid,
    /// A number followed by other characters.
    TrailingCharacters,
}

/// Length of the numeric prefix of `text`, 0 when there is none.
fn numeric_prefix_len(text: &str, allow_fraction: bool) -> usize {
    let b = text.as_bytes();
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let digits_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa = i - digits_start;

    if allow_fraction {
        if i < b.len() && b[i] == b'.' {
            let mut j = i + 1;
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            mantissa += j - i - 1;
            if mantissa > 0 {
                i = j;
            }
        }
        if mantissa > 0 && i < b.len() && matches!(b[i], b'e' | b'E') {
            let mut j = i + 1;
            if matches!(b.get(j), Some(b'+' | b'-')) {
                j += 1;
            }
            let exp_start = j;
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            if j > exp_start {
                i = j;
            }
        }
    }

    if mantissa == 0 {
        0
    } else {
        i
    }
}

pub fn parse_float(text: &str) -> Result<f32, NumberError> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f32>() {
        return Ok(value);
    }
    if numeric_prefix_len(text, true) > 0 {
        Err(NumberError::TrailingCharacters)
    } else {
        Err(NumberError::Invalid)
    }
}

pub fn parse_int(text: &str) -> Result<i32, NumberError> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i32>() {
        return Ok(value);
    }
    if numeric_prefix_len(text, false) > 0 {
        Err(NumberError::TrailingCharacters)
    } else {
        Err(NumberError::Invalid)
    }
}

/// `true|yes|1|on` or `false|no|0|off`, matched as a case-insensitive prefix.
pub fn parse_bool(text: &str) -> Option<bool> {
    let lower = text.trim().to_ascii_lowercase();
    if ["true", "yes", "1", "on"].iter().any(|p| lower.starts_with(p)) {
        Some(true)
    } else if ["false", "no", "0", "off"].iter().any(|p| lower.starts_with(p)) {
        Some(false)
    } else {
        None
    }
}

/// Legacy reading of a node token: absolute value of its leading integer.
pub fn leading_int(text: &str) -> u32 {
    let text = text.trim_start();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut value: u32 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    value
}

/// Decode an option string one character at a time.
///
/// Returns the combined bits and every character `lookup` rejected, in order.
/// Characters mapping to an empty value are accepted and set nothing.
pub fn decode_option_bits<T, F>(text: &str, lookup: F) -> (T, Vec<char>)
where
    T: Default + BitOrAssign,
    F: Fn(char) -> Option<T>,
{
    let mut bits = T::default();
    let mut unknown = Vec::new();
    for c in text.chars() {
        match lookup(c) {
            Some(bit) => bits |= bit,
            None => unknown.push(c),
        }
    }
    (bits, unknown)
}

impl Parser {
    /// Number of argument slices on the current line.
    pub(super) fn num_args(&self) -> usize {
        self.args.len()
    }

    /// Argument text; empty when out of range.
    pub(super) fn arg(&self, index: usize) -> &str {
        self.args
            .get(index)
            .and_then(|range| self.line.get(range.clone()))
            .unwrap_or("")
    }

    pub(super) fn arg_string(&self, index: usize) -> String {
        self.arg(index).to_string()
    }

    /// The current line split on `delims` instead of the usual separators.
    pub(super) fn split_line(&self, delims: &[char]) -> Vec<String> {
        split_trimmed(&self.line, delims)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Like `split_line`, for the text following the directive keyword.
    pub(super) fn split_after_keyword(&self, keyword: Keyword, delims: &[char]) -> Vec<String> {
        let rest = self.line.get(keyword.spelling().len()..).unwrap_or("");
        split_trimmed(rest, delims)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub(super) fn check_num_arguments(&mut self, min: usize) -> bool {
        let got = self.args.len();
        self.check_token_count(got, min)
    }

    pub(super) fn check_token_count(&mut self, got: usize, min: usize) -> bool {
        if got < min {
            self.warn(
                DiagnosticKind::ArgumentCount,
                format!(
                    "Not enough arguments (got {}, {} needed), skipping line",
                    got, min
                ),
            );
            return false;
        }
        true
    }

    fn report_number(&mut self, err: NumberError, text: &str, what: &str) {
        match err {
            NumberError::Invalid => self.error(
                DiagnosticKind::ValueDecode,
                format!("Invalid {} argument '{}', using 0", what, text),
            ),
            NumberError::TrailingCharacters => self.warn(
                DiagnosticKind::ValueDecode,
                format!("Trailing characters in {} argument '{}', using 0", what, text),
            ),
        }
    }

    pub(super) fn float_of(&mut self, text: &str) -> f32 {
        match parse_float(text) {
            Ok(value) => value,
            Err(err) => {
                self.report_number(err, text, "float");
                0.0
            }
        }
    }

    pub(super) fn int_of(&mut self, text: &str) -> i32 {
        match parse_int(text) {
            Ok(value) => value,
            Err(err) => {
                self.report_number(err, text, "integer");
                0
            }
        }
    }

    pub(super) fn arg_float(&mut self, index: usize) -> f32 {
        match parse_float(self.arg(index)) {
            Ok(value) => value,
            Err(err) => {
                let text = self.arg_string(index);
                self.report_number(err, &text, "float");
                0.0
            }
        }
    }

    pub(super) fn arg_int(&mut self, index: usize) -> i32 {
        match parse_int(self.arg(index)) {
            Ok(value) => value,
            Err(err) => {
                let text = self.arg_string(index);
                self.report_number(err, &text, "integer");
                0
            }
        }
    }

    /// Non-negative integer; a negative value is reported and read as 0.
    pub(super) fn arg_uint(&mut self, index: usize) -> u32 {
        let value = self.arg_int(index);
        u32::try_from(value).unwrap_or_else(|_| {
            self.warn(
                DiagnosticKind::ValueDecode,
                format!("Negative value {} where a count is expected, using 0", value),
            );
            0
        })
    }

    pub(super) fn opt_float(&mut self, index: usize) -> Option<f32> {
        (index < self.num_args()).then(|| self.arg_float(index))
    }

    pub(super) fn opt_int(&mut self, index: usize) -> Option<i32> {
        (index < self.num_args()).then(|| self.arg_int(index))
    }

    pub(super) fn opt_string(&self, index: usize) -> Option<String> {
        (index < self.num_args()).then(|| self.arg_string(index))
    }

    pub(super) fn arg_bool(&mut self, index: usize) -> bool {
        parse_bool(self.arg(index)).unwrap_or_else(|| {
            let text = self.arg_string(index);
            self.warn(
                DiagnosticKind::ValueDecode,
                format!("Invalid boolean '{}', using false", text),
            );
            false
        })
    }

    pub(super) fn arg_char(&self, index: usize) -> Option<char> {
        self.arg(index).chars().next()
    }

    /// Store a node token and return its handle.
    ///
    /// Import-only tokens (`forset`) are read by legacy number alone.
    pub(super) fn node_ref_from(&mut self, text: &str, import_only: bool) -> NodeRef {
        let import_number = leading_int(text);
        let resolved = if import_only {
            NodeId::Num(import_number)
        } else {
            NodeId::from_token(text)
        };
        self.document.node_refs.push(NodeToken {
            text: text.to_string(),
            import_number,
            flags: RefFlags {
                import_valid: true,
                regular_valid: !import_only,
                check_named_first: self.any_named_node_defined,
            },
            line: self.line_number,
            resolved,
        })
    }

    pub(super) fn arg_node(&mut self, index: usize) -> NodeRef {
        let text = self.arg_string(index);
        self.node_ref_from(&text, false)
    }

    /// Node or nothing: `-1` means no node.
    pub(super) fn arg_nullable_node(&mut self, index: usize) -> Option<NodeRef> {
        if parse_float(self.arg(index)) == Ok(-1.0) {
            None
        } else {
            Some(self.arg_node(index))
        }
    }

    /// Wheel rigidity node: `9999` means no node.
    pub(super) fn arg_rigidity_node(&mut self, index: usize) -> Option<NodeRef> {
        if self.arg(index) == "9999" {
            None
        } else {
            Some(self.arg_node(index))
        }
    }

    pub(super) fn arg_braking(&mut self, index: usize) -> WheelBraking {
        let code = self.arg_int(index);
        WheelBraking::from_code(code).unwrap_or_else(|| {
            self.error(
                DiagnosticKind::ValueDecode,
                format!("Invalid braking value {}, using 0 (no brakes)", code),
            );
            WheelBraking::None
        })
    }

    pub(super) fn arg_propulsion(&mut self, index: usize) -> WheelPropulsion {
        let code = self.arg_int(index);
        WheelPropulsion::from_code(code).unwrap_or_else(|| {
            self.error(
                DiagnosticKind::ValueDecode,
                format!("Invalid propulsion value {}, using 0 (none)", code),
            );
            WheelPropulsion::None
        })
    }

    pub(super) fn arg_wheel_side(&mut self, index: usize) -> WheelSide {
        match self.arg_char(index) {
            Some('r') => WheelSide::Right,
            Some('l') => WheelSide::Left,
            _ => {
                let text = self.arg_string(index);
                self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Invalid wheel side '{}', using 'l' (left)", text),
                );
                WheelSide::Left
            }
        }
    }

    pub(super) fn arg_flare_type(&mut self, index: usize) -> FlareType {
        match self.arg_char(index).and_then(FlareType::from_char) {
            Some(kind) => kind,
            None => {
                let text = self.arg_string(index);
                self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Invalid flare type '{}', using 'f' (headlight)", text),
                );
                FlareType::Headlight
            }
        }
    }

    pub(super) fn arg_wing_control(&mut self, index: usize) -> WingControl {
        let text = self.arg_string(index);
        if text.chars().count() > 1 {
            self.warn(
                DiagnosticKind::ValueDecode,
                format!("Wing control surface '{}' has extra characters, using the first", text),
            );
        }
        match text.chars().next().and_then(WingControl::from_char) {
            Some(control) => control,
            None => {
                self.error(
                    DiagnosticKind::ValueDecode,
                    format!(
                        "Invalid wing control surface '{}', use one of: {}",
                        text,
                        WingControl::LEGAL_CHARS
                    ),
                );
                WingControl::None
            }
        }
    }

    pub(super) fn arg_minimass_option(&mut self, index: usize) -> MinimassOption {
        match self.arg_char(index) {
            Some('l') => MinimassOption::SkipLoaded,
            Some('n') => MinimassOption::Dummy,
            _ => {
                let text = self.arg_string(index);
                self.warn(
                    DiagnosticKind::ValueDecode,
                    format!("Invalid minimass option '{}', using 'n'", text),
                );
                MinimassOption::Dummy
            }
        }
    }

    /// Texture name; absent when missing or starting with `-`.
    pub(super) fn arg_managed_texture(&self, index: usize) -> Option<String> {
        let text = self.arg(index);
        if text.is_empty() || text.starts_with('-') {
            None
        } else {
            Some(text.to_string())
        }
    }

    /// Decode an option string, one warning per unknown character.
    pub(super) fn decode_options<T, F>(&mut self, text: &str, what: &str, lookup: F) -> T
    where
        T: Default + BitOrAssign,
        F: Fn(char) -> Option<T>,
    {
        let (bits, unknown) = decode_option_bits(text, lookup);
        for c in unknown {
            self.warn(
                DiagnosticKind::ValueDecode,
                format!("Ignoring invalid {} option '{}'", what, c),
            );
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BeamOptions;

    fn beam_option(c: char) -> Option<BeamOptions> {
        match c {
            'v' => Some(BeamOptions::empty()),
            'i' => Some(BeamOptions::INVISIBLE),
            'r' => Some(BeamOptions::ROPE),
            's' => Some(BeamOptions::SUPPORT),
            _ => None,
        }
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("1.5"), Ok(1.5));
        assert_eq!(parse_float("-0.25"), Ok(-0.25));
        assert_eq!(parse_float("3"), Ok(3.0));
        assert_eq!(parse_float("1e3"), Ok(1000.0));
        assert_eq!(parse_float("1.5x"), Err(NumberError::TrailingCharacters));
        assert_eq!(parse_float("abc"), Err(NumberError::Invalid));
        assert_eq!(parse_float(""), Err(NumberError::Invalid));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Ok(42));
        assert_eq!(parse_int("-7"), Ok(-7));
        assert_eq!(parse_int("12.5"), Err(NumberError::TrailingCharacters));
        assert_eq!(parse_int("x1"), Err(NumberError::Invalid));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("12"), 12);
        assert_eq!(leading_int("-3"), 3);
        assert_eq!(leading_int("7abc"), 7);
        assert_eq!(leading_int("node"), 0);
    }

    #[test]
    fn test_option_bits_idempotent() {
        let first = decode_option_bits("irxs", beam_option);
        let second = decode_option_bits("irxs", beam_option);

        assert_eq!(first, second);
        assert_eq!(
            first.0,
            BeamOptions::INVISIBLE | BeamOptions::ROPE | BeamOptions::SUPPORT
        );
        assert_eq!(first.1, vec!['x']);
    }

    #[test]
    fn test_option_bits_unknown_set_nothing() {
        let (bits, unknown) = decode_option_bits("qzq", beam_option);
        assert!(bits.is_empty());
        assert_eq!(unknown, vec!['q', 'z', 'q']);

        let (bits, unknown) = decode_option_bits("v", beam_option);
        assert!(bits.is_empty());
        assert!(unknown.is_empty());
    }
}
