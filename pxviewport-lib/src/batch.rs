//! Many stylesheets, one compiled plugin, processed in parallel.

use crate::error::Result;
use crate::generate::viewport_css::{self, Output, OutputOptions};
use crate::transform::PxToViewport;
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub css: String,
}

#[derive(Debug)]
pub struct Processed {
    pub path: PathBuf,
    pub result: Result<Output>,
}

/// Run every source through its own transform invocation. Results come back
/// in input order.
pub fn process_all(sources: Vec<SourceFile>, plugin: &PxToViewport, output: OutputOptions) -> Vec<Processed> {
    sources
        .into_par_iter()
        .map(|source| {
            let result = viewport_css::process(&source.css, Some(&source.path), plugin, output);
            if let Ok(out) = &result {
                log::debug!(
                    "{}: {} warning(s), {} landscape rule(s)",
                    source.path.display(),
                    out.report.warnings.len(),
                    out.report.landscape_rules
                );
            }
            Processed {
                path: source.path,
                result,
            }
        })
        .collect()
}
