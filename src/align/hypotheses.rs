use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::count_lines;

use super::error::AlignError;
use super::gold::trim_line_ending;

/// How the generation phase recorded failed samples in the results file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum HypothesisEncoding {
    /// Failed samples occupy no line; only the failure set records them.
    #[default]
    Omitted,
    /// Failed samples occupy one line holding the placeholder token.
    Sentinel {
        #[serde(default = "default_sentinel_token")]
        token: String,
    },
}

fn default_sentinel_token() -> String {
    "0".to_string()
}

#[derive(Debug)]
pub struct SummaryReader {
    path: PathBuf,
    reader: BufReader<File>,
    length: usize,
    cursor: usize,
}

impl SummaryReader {
    pub fn open(path: &Path) -> Result<Self, AlignError> {
        let length = count_lines(path).map_err(|source| AlignError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let file = File::open(path).map_err(|source| AlignError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            length,
            cursor: 0,
        })
    }

    pub fn read_next(&mut self) -> Result<String, AlignError> {
        if self.cursor >= self.length {
            return Err(AlignError::EndOfStore {
                path: self.path.clone(),
                length: self.length,
            });
        }

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|source| AlignError::Read {
                path: self.path.clone(),
                source,
            })?;
        self.cursor += 1;
        trim_line_ending(&mut line);

        Ok(line)
    }

    pub fn reset(&mut self) -> Result<(), AlignError> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(|source| AlignError::Read {
                path: self.path.clone(),
                source,
            })?;
        self.cursor = 0;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
