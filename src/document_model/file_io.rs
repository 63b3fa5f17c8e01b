use super::buffer::Buffer;
use super::encoding::{self, LineEnding};
use super::error::{EditError, EditResult};
use super::gap_buffer::GapBuffer;
use super::kill_ring::SharedKillRing;
use crate::config::RcConfig;
use encoding_rs::Encoding;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

impl Buffer {
    pub fn open(
        path: impl AsRef<Path>,
        kill_ring: SharedKillRing,
        config: &RcConfig,
    ) -> EditResult<Self> {
        let mut buffer = Self::with_config(kill_ring, config);
        buffer.load(path)?;
        Ok(buffer)
    }

    /// Replaces the content with the file at `path`, decoded with the first
    /// candidate encoding that accepts it. On failure the buffer is left as
    /// it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> EditResult<()> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let (text, file_encoding) = encoding::decode(&bytes, &self.encodings).ok_or_else(|| {
            EditError::EncodingDetection {
                path: path.to_path_buf(),
            }
        })?;
        let line_ending = LineEnding::detect(&text);
        let text = match line_ending {
            LineEnding::Unix => text,
            _ => line_ending.normalize(&text),
        };

        self.contents = GapBuffer::from_bytes(text.as_bytes(), self.gap_slack);
        self.point = 0;
        self.marks.reset(0);
        self.goal_column = None;
        self.file_name = Some(path.to_path_buf());
        self.file_encoding = file_encoding;
        self.line_ending = line_ending;
        self.modified = false;

        debug!(
            path = %path.display(),
            encoding = file_encoding.name(),
            line_ending = line_ending.name(),
            bytes = bytes.len(),
            "loaded file"
        );
        Ok(())
    }

    /// Writes back to the associated file in its original encoding and
    /// line ending. Returns the number of bytes written.
    pub fn save(&mut self) -> EditResult<usize> {
        let path = self.file_name.clone().ok_or(EditError::NoFilename)?;
        self.write_to(&path)
    }

    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> EditResult<usize> {
        let path = path.into();
        let written = self.write_to(&path)?;
        self.file_name = Some(path);
        Ok(written)
    }

    fn write_to(&mut self, path: &Path) -> EditResult<usize> {
        let text = self.line_ending.apply(&self.text());
        let bytes = encoding::encode(&text, self.file_encoding)?;
        fs::write(path, &bytes)?;
        self.modified = false;
        debug!(
            path = %path.display(),
            encoding = self.file_encoding.name(),
            bytes = bytes.len(),
            "saved file"
        );
        Ok(bytes.len())
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, path: impl Into<PathBuf>) {
        self.file_name = Some(path.into());
    }

    pub fn display_name(&self) -> &str {
        self.file_name
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("[No Name]")
    }

    pub fn file_encoding(&self) -> &'static Encoding {
        self.file_encoding
    }

    /// Changes the encoding used by the next save.
    pub fn set_file_encoding(&mut self, file_encoding: &'static Encoding) {
        if self.file_encoding != file_encoding {
            self.file_encoding = file_encoding;
            self.modified = true;
        }
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        if self.line_ending != line_ending {
            self.line_ending = line_ending;
            self.modified = true;
        }
    }
}
