//! Splitting of page text into service-sized chunks
//!
//! A page longer than `max_bytes` is cut into chunks that
//! - end on UTF-8 character boundaries,
//! - prefer to end after whitespace,
//! - never cut through an SSN-shaped number,
//! - overlap their predecessor by up to `overlap_bytes`.
//!
//! Each chunk remembers where it starts in the page so entity offsets
//! reported against the chunk can be mapped back to the page.

use crate::domain::errors::PiiScanError;
use crate::domain::result::Result;
use regex::Regex;
use std::ops::Range;

/// Digits shaped like an SSN, with optional dash or space separators
const SSN_CANDIDATE_PATTERN: &str = r"\d{3}[- ]?\d{2}[- ]?\d{4}";

/// A slice of page text submitted in one detection request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk<'a> {
    /// Chunk text
    pub text: &'a str,
    /// Byte offset of the chunk within the page
    pub byte_offset: usize,
    /// Character offset of the chunk within the page
    pub char_offset: usize,
}

impl TextChunk<'_> {
    /// Map chunk-relative character offsets to page-relative ones
    pub fn to_page_offsets(&self, begin: usize, end: usize) -> (usize, usize) {
        (self.char_offset + begin, self.char_offset + end)
    }

    /// Length of the chunk in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits page text into overlapping chunks
#[derive(Debug, Clone)]
pub struct Chunker {
    max_bytes: usize,
    overlap_bytes: usize,
    candidate: Regex,
}

impl Chunker {
    /// Create a chunker
    ///
    /// `overlap_bytes` must be less than half of `max_bytes`; configuration
    /// validation enforces this.
    pub fn new(max_bytes: usize, overlap_bytes: usize) -> Result<Self> {
        if max_bytes < 8 || overlap_bytes * 2 >= max_bytes {
            return Err(PiiScanError::Configuration(format!(
                "Invalid chunk sizes: max_bytes={max_bytes}, overlap_bytes={overlap_bytes}"
            )));
        }
        let candidate = Regex::new(SSN_CANDIDATE_PATTERN)
            .map_err(|e| PiiScanError::Other(format!("Invalid SSN candidate pattern: {e}")))?;

        Ok(Self {
            max_bytes,
            overlap_bytes,
            candidate,
        })
    }

    /// Split `text` into chunks of at most `max_bytes` bytes
    ///
    /// Text that fits in one chunk is returned whole. Empty text yields no
    /// chunks.
    pub fn split<'a>(&self, text: &'a str) -> Vec<TextChunk<'a>> {
        if text.is_empty() {
            return Vec::new();
        }
        if text.len() <= self.max_bytes {
            return vec![TextChunk {
                text,
                byte_offset: 0,
                char_offset: 0,
            }];
        }

        let candidates: Vec<Range<usize>> =
            self.candidate.find_iter(text).map(|m| m.range()).collect();

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut counted_bytes = 0;
        let mut counted_chars = 0;

        loop {
            counted_chars += text[counted_bytes..start].chars().count();
            counted_bytes = start;

            if text.len() - start <= self.max_bytes {
                chunks.push(TextChunk {
                    text: &text[start..],
                    byte_offset: start,
                    char_offset: counted_chars,
                });
                break;
            }

            let end = self.cut_point(text, start, &candidates);
            chunks.push(TextChunk {
                text: &text[start..end],
                byte_offset: start,
                char_offset: counted_chars,
            });

            start = self.next_start(text, start, end, &candidates);
        }

        chunks
    }

    /// End of the chunk beginning at `start`
    fn cut_point(&self, text: &str, start: usize, candidates: &[Range<usize>]) -> usize {
        let limit = floor_char_boundary(text, start + self.max_bytes);
        let mut end = limit;

        // Prefer a cut after whitespace in the second half of the window.
        let search_from = floor_char_boundary(text, start + self.max_bytes / 2);
        if let Some((idx, ws)) = text[search_from..limit]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
        {
            end = search_from + idx + ws.len_utf8();
        }

        if let Some(straddling) = straddling(candidates, end) {
            if straddling.start > start {
                end = straddling.start;
            }
        }

        if end <= start {
            limit
        } else {
            end
        }
    }

    /// Start of the chunk following `start..end`
    fn next_start(
        &self,
        text: &str,
        start: usize,
        end: usize,
        candidates: &[Range<usize>],
    ) -> usize {
        let mut next = floor_char_boundary(text, end.saturating_sub(self.overlap_bytes));
        if let Some(straddling) = straddling(candidates, next) {
            next = straddling.start;
        }
        if next <= start {
            end
        } else {
            next
        }
    }
}

/// Candidate that a cut at `at` would split
fn straddling(candidates: &[Range<usize>], at: usize) -> Option<&Range<usize>> {
    candidates.iter().find(|c| c.start < at && c.end > at)
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Slice `text` by character offsets
///
/// Returns `None` when the range is empty or out of bounds.
pub fn char_span(text: &str, begin: usize, end: usize) -> Option<&str> {
    if begin >= end {
        return None;
    }
    let mut indices = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()));
    let begin_byte = indices.nth(begin)?;
    let end_byte = indices.nth(end - begin - 1)?;
    Some(&text[begin_byte..end_byte])
}
