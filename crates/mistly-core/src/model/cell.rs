// ── Spreadsheet cell values ──

use std::fmt;

use serde::Serialize;

/// One spreadsheet cell after reading, independent of the file format.
///
/// Serializes to the matching JSON scalar, `Null` as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Copy of this value with non-finite floats (NaN, ±inf) replaced by `Null`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        match self {
            Self::Float(f) if !f.is_finite() => Self::Null,
            other => other.clone(),
        }
    }

    /// `true` for an empty cell or an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(f) => f.is_nan(),
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) | Self::Int(_) => false,
        }
    }

    /// The string content if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text rendering of any cell; empty for `Null` and NaN.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Float(f) if f.is_nan() => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_floats_normalize_to_null() {
        assert_eq!(CellValue::Float(f64::NAN).normalized(), CellValue::Null);
        assert_eq!(CellValue::Float(f64::INFINITY).normalized(), CellValue::Null);
        assert_eq!(
            CellValue::Float(f64::NEG_INFINITY).normalized(),
            CellValue::Null
        );
        assert_eq!(CellValue::Float(51.5).normalized(), CellValue::Float(51.5));
    }

    #[test]
    fn empty_string_is_kept_but_blank() {
        let cell = CellValue::from("");
        assert_eq!(cell.normalized(), CellValue::Text(String::new()));
        assert!(cell.is_blank());
    }

    #[test]
    fn serializes_as_json_scalars() {
        let cells = vec![
            CellValue::Null,
            CellValue::Bool(true),
            CellValue::Int(7),
            CellValue::Float(1.5),
            CellValue::from("x"),
        ];
        assert_eq!(
            serde_json::to_string(&cells).unwrap(),
            r#"[null,true,7,1.5,"x"]"#
        );
    }

    #[test]
    fn text_rendering() {
        assert_eq!(CellValue::Null.to_text(), "");
        assert_eq!(CellValue::Float(f64::NAN).to_text(), "");
        assert_eq!(CellValue::Int(42).to_text(), "42");
        assert_eq!(CellValue::from(" org-1 ").to_text(), " org-1 ");
    }
}
