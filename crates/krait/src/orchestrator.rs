//! End-to-end pipeline: discover the dependency tree, then assemble the
//! inlined script.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::Settings;
use crate::emitter::OutputAssembler;
use crate::tree_builder::TreeBuilder;

/// Drives the whole inlining pipeline for one entry script.
#[derive(Debug)]
pub struct Orchestrator {
    settings: Settings,
}

impl Orchestrator {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Inlines `entry` into `output`, truncating any previous contents.
    pub fn inline(&self, entry: &Path, output: &Path) -> Result<()> {
        info!("inlining {} into {}", entry.display(), output.display());
        let tree = TreeBuilder::new(&self.settings).build(entry)?;
        debug!("discovered {} packages", tree.len());
        let file = File::create(output)
            .with_context(|| format!("failed to create output file {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        OutputAssembler::new(&tree).assemble(entry, &mut writer)?;
        writer
            .flush()
            .with_context(|| format!("failed to flush output file {}", output.display()))?;
        info!("wrote inlined script to {}", output.display());
        Ok(())
    }
}
