//! Blank-line separated blocks of `KEY: value` lines.

use crate::error::{DataError, DataResult};

/// One `KEY: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The key, as written.
    pub key: String,
    /// The value with surrounding whitespace removed.
    pub value: String,
    /// 1-based line number.
    pub line: usize,
}

/// A group of fields describing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    line: usize,
    fields: Vec<Field>,
}

impl Block {
    /// Line number of the block's first field.
    pub fn line(&self) -> usize {
        self.line
    }

    /// All fields, in file order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Look up a field that must be present.
    pub fn require(&self, key: &str) -> DataResult<&Field> {
        self.get(key)
            .ok_or_else(|| DataError::format(self.line, format!("missing {key}")))
    }

    /// Value of a required non-negative integer field.
    pub fn require_u32(&self, key: &str) -> DataResult<u32> {
        let field = self.require(key)?;
        parse_u32(&field.value).ok_or_else(|| {
            DataError::format(
                field.line,
                format!("{key} must be a non-negative integer, got '{}'", field.value),
            )
        })
    }

    /// Fail on any key not in `allowed`.
    pub fn check_keys(&self, allowed: &[&str]) -> DataResult<()> {
        match self.fields.iter().find(|f| !allowed.contains(&f.key.as_str())) {
            Some(field) => Err(DataError::format(
                field.line,
                format!("unknown key {}", field.key),
            )),
            None => Ok(()),
        }
    }
}

/// Digits only: no sign, no whitespace, no decimal point.
fn parse_u32(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Split text into blocks. Blank lines separate blocks.
pub fn parse_blocks(text: &str) -> DataResult<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            blocks.extend(current.take());
            continue;
        }

        let (key, value) = trimmed
            .split_once(':')
            .ok_or_else(|| DataError::format(line, format!("expected 'KEY: value', got '{trimmed}'")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DataError::format(line, "empty key"));
        }

        let block = current.get_or_insert_with(|| Block {
            line,
            fields: Vec::new(),
        });
        if block.get(key).is_some() {
            return Err(DataError::format(line, format!("duplicate key {key}")));
        }
        block.fields.push(Field {
            key: key.to_string(),
            value: value.trim().to_string(),
            line,
        });
    }
    blocks.extend(current);
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let text = "A: 1\nB: two\n\n\nA: 3\n   \nA: 4";
        let blocks = parse_blocks(text).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].line(), 1);
        assert_eq!(blocks[0].fields().len(), 2);
        assert_eq!(blocks[0].require("B").unwrap().value, "two");
        assert_eq!(blocks[1].line(), 5);
        assert_eq!(blocks[2].line(), 7);
    }

    #[test]
    fn value_may_contain_colons() {
        let blocks = parse_blocks("EFFECT: health:50").unwrap();
        assert_eq!(blocks[0].require("EFFECT").unwrap().value, "health:50");
    }

    #[test]
    fn empty_text_has_no_blocks() {
        assert!(parse_blocks("").unwrap().is_empty());
        assert!(parse_blocks("\n\n  \n").unwrap().is_empty());
    }

    #[test]
    fn line_without_separator() {
        let err = parse_blocks("A: 1\nnonsense").unwrap_err();
        assert!(matches!(err, DataError::InvalidDataFormat { line: 2, .. }));
    }

    #[test]
    fn duplicate_key() {
        let err = parse_blocks("A: 1\nA: 2").unwrap_err();
        assert!(matches!(err, DataError::InvalidDataFormat { line: 2, .. }));
    }

    #[test]
    fn strict_integers() {
        let blocks = parse_blocks("N: 42\nNEG: -3\nPLUS: +3\nF: 1.5\nE:").unwrap();
        let b = &blocks[0];
        assert_eq!(b.require_u32("N").unwrap(), 42);
        for key in ["NEG", "PLUS", "F", "E"] {
            assert!(matches!(
                b.require_u32(key),
                Err(DataError::InvalidDataFormat { .. })
            ));
        }
        assert!(matches!(
            b.require_u32("MISSING"),
            Err(DataError::InvalidDataFormat { line: 1, .. })
        ));
    }

    #[test]
    fn unknown_keys() {
        let blocks = parse_blocks("A: 1\nB: 2\nC: 3").unwrap();
        assert!(blocks[0].check_keys(&["A", "B", "C"]).is_ok());
        let err = blocks[0].check_keys(&["A", "B"]).unwrap_err();
        assert_eq!(err.to_string(), "line 3: unknown key C");
    }
}
