//! Content predicate library.
//!
//! Every predicate works on the raw text of one file. Nothing here
//! understands Terraform beyond block headers and brace nesting.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::blocks;
use crate::error::{VerifyError, VerifyResult};

/// Compile a built-in pattern, reporting failures as [`VerifyError::Pattern`].
pub fn compile(pattern: &str) -> VerifyResult<Regex> {
    Regex::new(pattern).map_err(|source| VerifyError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Text of a single artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    path: PathBuf,
    text: String,
}

impl Content {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Load `path`; absence is [`VerifyError::FileNotFound`], anything else [`VerifyError::Io`].
    pub fn read(path: &Path) -> VerifyResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| VerifyError::from_read(path, e))?;
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    pub fn matches(&self, pattern: &str) -> VerifyResult<bool> {
        Ok(compile(pattern)?.is_match(&self.text))
    }

    /// Non-overlapping occurrences of `needle`.
    pub fn count(&self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        self.text.matches(needle).count()
    }

    /// First capture group of `pattern`, if it matches.
    pub fn capture(&self, pattern: &str) -> VerifyResult<Option<String>> {
        let re = compile(pattern)?;
        Ok(re
            .captures(&self.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()))
    }

    /// Names of every `<keyword> "<name>" {` header, in file order.
    pub fn named_blocks(&self, keyword: &str) -> VerifyResult<NamedBlocks<'_>> {
        let pattern = compile(&format!(r#"\b{}\s+"([^"]+)"\s*\{{"#, regex::escape(keyword)))?;
        Ok(NamedBlocks {
            pattern,
            haystack: &self.text,
            pos: 0,
        })
    }

    pub fn outputs(&self) -> VerifyResult<NamedBlocks<'_>> {
        self.named_blocks("output")
    }

    /// Number of `resource "<resource_type>" "<name>" {` headers.
    pub fn resource_count(&self, resource_type: &str) -> VerifyResult<usize> {
        let re = compile(&format!(
            r#"\bresource\s+"{}"\s+"[^"]+"\s*\{{"#,
            regex::escape(resource_type)
        ))?;
        Ok(re.find_iter(&self.text).count())
    }

    /// `variable "<field>"` contains a nested `validation {` block.
    pub fn has_validation_for(&self, field: &str) -> VerifyResult<bool> {
        let Some(body) = blocks::find_block(&self.text, "variable", field)? else {
            return Ok(false);
        };
        Ok(compile(r"\bvalidation\s*\{")?.is_match(body))
    }

    /// The named block carries a non-empty `description = "..."`.
    pub fn has_description(&self, block_type: &str, name: &str) -> VerifyResult<bool> {
        let Some(body) = blocks::find_block(&self.text, block_type, name)? else {
            return Ok(false);
        };
        Ok(compile(r#"\bdescription\s*=\s*"[^"\n]*[^"\s][^"\n]*""#)?.is_match(body))
    }
}

/// Lazy scan over block names; consumed by iteration.
#[derive(Debug)]
pub struct NamedBlocks<'a> {
    pattern: Regex,
    haystack: &'a str,
    pos: usize,
}

impl<'a> Iterator for NamedBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.haystack.len() {
            return None;
        }
        let caps = self.pattern.captures_at(self.haystack, self.pos)?;
        let whole = caps.get(0)?;
        self.pos = whole.end();
        caps.get(1).map(|m| m.as_str())
    }
}
