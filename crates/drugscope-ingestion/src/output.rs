//! Output document serialization.
//!
//! One indented JSON file, written once at the very end of the run and
//! overwriting any existing file. A write failure is fatal and surfaces the
//! underlying I/O error to the operator.

use std::path::Path;

use tracing::info;

use crate::models::OutputDocument;

/// Default output filename, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "chembl_uniprot_keywords.json";

/// Serialize the document as indented JSON and write it to `path`.
pub fn write_output(document: &OutputDocument, path: &Path) -> drugscope_common::Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "Output document written");
    Ok(())
}
