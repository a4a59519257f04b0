use crate::error::{Error, Result};
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet as LightningStyleSheet};

/// Minify transformed CSS with LightningCSS.
///
/// Runs after the transform, so dropping comments here (lightningcss does)
/// cannot affect directive or ignore markers.
pub fn minify(css: &str) -> Result<String> {
    let mut sheet = LightningStyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| Error::Minify(e.to_string()))?;
    sheet
        .minify(MinifyOptions::default())
        .map_err(|e| Error::Minify(e.to_string()))?;

    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| Error::Minify(e.to_string()))?;
    Ok(printed.code)
}
