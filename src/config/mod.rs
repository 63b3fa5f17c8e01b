/// Configuration subsystem - Editor settings loaded from .gapeditrc files

pub mod rc;

pub use rc::{RcConfig, RcLoader};
