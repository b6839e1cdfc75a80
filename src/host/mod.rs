//! Minimal build host
//!
//! Owns the file map and metadata store, runs plugins over them in order and
//! stops at the first error. Also loads records from a source directory and
//! writes the result to a destination directory.

pub mod collections;
pub mod destination;
pub mod source;

pub use collections::CollectionsPlugin;
pub use destination::write_destination;
pub use source::load_source;

use log::debug;

use crate::error::Result;
use crate::models::{Files, Metadata};

/// One step of a build
pub trait Plugin {
    fn name(&self) -> &str;

    fn run(&self, files: &mut Files, metadata: &mut Metadata) -> Result<()>;
}

/// Files and metadata plus the plugins that transform them
pub struct Build {
    files: Files,
    metadata: Metadata,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Build {
    pub fn new(files: Files) -> Self {
        Self { files, metadata: Metadata::new(), plugins: Vec::new() }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn use_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every plugin in order; the first failure ends the build
    pub fn build(&mut self) -> Result<()> {
        for plugin in &self.plugins {
            debug!("running plugin {}", plugin.name());
            plugin.run(&mut self.files, &mut self.metadata)?;
        }
        Ok(())
    }

    pub fn files(&self) -> &Files {
        &self.files
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_parts(self) -> (Files, Metadata) {
        (self.files, self.metadata)
    }
}
