use crate::config::RcConfig;
use crate::document_model::{Buffer, EditError, EditResult, KillRing, SharedKillRing};
use std::io::ErrorKind;
use std::path::Path;
use std::rc::Rc;
use tracing::info;

/// One editing session: the configuration plus the kill ring that every
/// buffer it creates shares.
pub struct Session {
    config: RcConfig,
    kill_ring: SharedKillRing,
}

impl Session {
    pub fn new(config: RcConfig) -> Self {
        let kill_ring = KillRing::shared(config.kill_ring_max);
        Self { config, kill_ring }
    }

    pub fn config(&self) -> &RcConfig {
        &self.config
    }

    pub fn kill_ring(&self) -> &SharedKillRing {
        &self.kill_ring
    }

    pub fn new_buffer(&self) -> Buffer {
        Buffer::with_config(Rc::clone(&self.kill_ring), &self.config)
    }

    /// Opens `path`, or starts an empty buffer bound to it if the file does
    /// not exist yet.
    pub fn open_file(&self, path: impl AsRef<Path>) -> EditResult<Buffer> {
        let path = path.as_ref();
        match Buffer::open(path, Rc::clone(&self.kill_ring), &self.config) {
            Ok(buffer) => Ok(buffer),
            Err(EditError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "new file");
                let mut buffer = self.new_buffer();
                buffer.set_file_name(path);
                Ok(buffer)
            }
            Err(err) => Err(err),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RcConfig::default())
    }
}
