//! Delimiter auto-detection by bounded row sampling.

use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

use super::options::{DetectorOptions, ReadOptions};
use super::reader::RowReader;
use crate::common::Result;

/// Samples a source against a set of candidate delimiters and picks the
/// one that splits rows consistently.
///
/// A candidate is plausible when at least `min_rows` sampled rows (blank
/// lines ignored, at most `max_rows` inspected) all split into the same
/// number of cells and that number is greater than one; a candidate that
/// never splits anything is not a match. Detection succeeds only when
/// exactly one candidate is plausible: ambiguity is failure, not a
/// first-match win, so candidate order affects early-exit cost only.
///
/// The sampling pass restores the source position to its pre-detection
/// offset on every exit path, success or error, so a subsequent full parse
/// starts where the caller left the stream.
#[derive(Debug, Clone)]
pub struct DelimiterDetector {
    options: DetectorOptions,
}

impl DelimiterDetector {
    /// Detector with the default candidate set and sampling window.
    pub fn new() -> Self {
        DelimiterDetector {
            options: DetectorOptions::default(),
        }
    }

    /// Detector with explicit options. Fails fast on invalid bounds.
    pub fn with_options(options: DetectorOptions) -> Result<Self> {
        options.validate()?;
        Ok(DelimiterDetector { options })
    }

    /// The sampling bounds in use.
    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Probe `source`, returning the single plausible delimiter or `None`
    /// when zero or several candidates qualify.
    pub fn detect<R: Read + Seek>(&self, source: &mut R) -> Result<Option<String>> {
        let origin = source.stream_position()?;
        let outcome = self.sample_candidates(source, origin);
        let restore = source.seek(SeekFrom::Start(origin));
        let plausible = outcome?;
        restore?;

        match plausible.as_slice() {
            [delimiter] => {
                debug!(delimiter = %delimiter, "detected delimiter");
                Ok(Some(delimiter.clone()))
            }
            _ => {
                debug!(plausible = plausible.len(), "no single plausible delimiter");
                Ok(None)
            }
        }
    }

    fn sample_candidates<R: Read + Seek>(
        &self,
        source: &mut R,
        origin: u64,
    ) -> Result<Vec<String>> {
        let mut plausible = Vec::new();
        for candidate in &self.options.candidates {
            source.seek(SeekFrom::Start(origin))?;
            if self.candidate_is_plausible(&mut *source, candidate)? {
                plausible.push(candidate.clone());
            }
        }
        Ok(plausible)
    }

    /// Tokenize up to `max_rows` rows with `candidate` and check that
    /// every row splits into the same, greater-than-one number of cells.
    fn candidate_is_plausible<R: Read>(&self, source: &mut R, candidate: &str) -> Result<bool> {
        let options = ReadOptions::new()
            .with_delimiter(candidate)
            .with_headers(false)
            .with_skip_blank_lines(true);
        let reader = RowReader::new(source, &options)?;

        let mut width = None;
        let mut rows_seen = 0usize;
        for row in reader.take(self.options.max_rows) {
            let row = row?;
            if row.is_malformed() {
                debug!(candidate, "candidate rejected: unparseable sample line");
                return Ok(false);
            }
            match width {
                None => width = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    debug!(
                        candidate,
                        expected,
                        found = row.len(),
                        "candidate rejected: inconsistent cell count"
                    );
                    return Ok(false);
                }
                Some(_) => {}
            }
            rows_seen += 1;
        }

        Ok(rows_seen >= self.options.min_rows && width.is_some_and(|w| w > 1))
    }
}

impl Default for DelimiterDetector {
    fn default() -> Self {
        Self::new()
    }
}
