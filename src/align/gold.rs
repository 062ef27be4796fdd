use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::count_lines;

use super::error::AlignError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldFormat {
    Text,
    Json,
    Xml,
}

impl GoldFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceLine {
    references: Vec<String>,
}

#[derive(Debug)]
pub struct GoldReader {
    path: PathBuf,
    format: GoldFormat,
    reader: BufReader<File>,
    length: usize,
    cursor: usize,
}

impl GoldReader {
    pub fn open(path: &Path, declared: Option<GoldFormat>) -> Result<Self, AlignError> {
        let length = count_lines(path).map_err(|source| AlignError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let file = File::open(path).map_err(|source| AlignError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let format = match declared {
            Some(format) => format,
            None => {
                let mut first = String::new();
                reader
                    .read_line(&mut first)
                    .map_err(|source| AlignError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;
                reader
                    .seek(SeekFrom::Start(0))
                    .map_err(|source| AlignError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;
                infer_format(&first)
            }
        };

        if format == GoldFormat::Xml {
            return Err(AlignError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: format.as_str(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            format,
            reader,
            length,
            cursor: 0,
        })
    }

    pub fn read_next(&mut self) -> Result<Vec<String>, AlignError> {
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

        match self.format {
            GoldFormat::Text => Ok(vec![line]),
            GoldFormat::Json => {
                let parsed: ReferenceLine =
                    serde_json::from_str(&line).map_err(|err| AlignError::MalformedReference {
                        path: self.path.clone(),
                        line: self.cursor,
                        reason: err.to_string(),
                    })?;
                Ok(parsed.references)
            }
            GoldFormat::Xml => Err(AlignError::UnsupportedFormat {
                path: self.path.clone(),
                format: self.format.as_str(),
            }),
        }
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

    pub fn format(&self) -> GoldFormat {
        self.format
    }
}

fn infer_format(first_line: &str) -> GoldFormat {
    match first_line.trim_start().chars().next() {
        Some('<') => GoldFormat::Xml,
        Some('{') => GoldFormat::Json,
        _ => GoldFormat::Text,
    }
}

pub(super) fn trim_line_ending(line: &mut String) {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
}
