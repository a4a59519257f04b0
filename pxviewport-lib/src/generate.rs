use crate::error::Result;
use crate::parser::{css_printer, css_reader, minify};
use crate::transform::{PxToViewport, TransformReport};
use std::path::Path;

pub mod viewport_css {
    use super::*;

    /// Output settings applied after the transform.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct OutputOptions {
        pub minify: bool,
    }

    #[derive(Debug, Clone)]
    pub struct Output {
        pub css: String,
        pub report: TransformReport,
    }

    /// Read `css`, convert it, print it back. `from` is the path rules are
    /// attributed to for include/exclude filtering.
    pub fn process(css: &str, from: Option<&Path>, plugin: &PxToViewport, output: OutputOptions) -> Result<Output> {
        let mut sheet = css_reader::parse_stylesheet(css, from);
        let report = plugin.transform(&mut sheet);

        let mut css = css_printer::to_css(&sheet);
        if output.minify {
            css = minify::minify(&css)?;
        }
        Ok(Output { css, report })
    }
}

#[cfg(test)]
mod tests {
    use super::viewport_css::*;
    use super::*;
    use crate::options::PartialOptions;

    #[test]
    fn processes_text_end_to_end() {
        let plugin = PxToViewport::from_partial(PartialOptions::default()).unwrap();
        let out = process(".a { width: 100px; }", None, &plugin, OutputOptions::default()).unwrap();
        assert_eq!(out.css, ".a { width: 31.25vw; }");
        assert!(out.report.warnings.is_empty());
    }

    #[test]
    fn minified_output() {
        let plugin = PxToViewport::from_partial(PartialOptions::default()).unwrap();
        let out = process(
            "/* viewport-width: 100 */\n.a {\n  margin: 10px 20px;\n}\n",
            None,
            &plugin,
            OutputOptions { minify: true },
        )
        .unwrap();
        assert!(out.css.contains("10vw 20vw"), "{}", out.css);
        assert!(!out.css.contains('\n') && !out.css.contains("/*"));
    }
}
