use pxviewport_lib::generate::viewport_css::{process, Output, OutputOptions};
use pxviewport_lib::options::{PartialOptions, PatternOption};
use pxviewport_lib::{Error, PxToViewport};
use std::path::Path;

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_from(css: &str, from: Option<&Path>, partial: PartialOptions) -> Output {
        let plugin = PxToViewport::from_partial(partial).expect("valid options");
        process(css, from, &plugin, OutputOptions::default()).expect("processed")
    }

    fn convert(css: &str, partial: PartialOptions) -> String {
        run_from(css, None, partial).css
    }

    #[test]
    fn converts_with_default_width() {
        assert_eq!(
            convert(".rule { width: 100px; }", PartialOptions::default()),
            ".rule { width: 31.25vw; }"
        );
    }

    #[test]
    fn min_pixel_value_boundary() {
        let partial = PartialOptions {
            min_pixel_value: Some(2.0),
            ..PartialOptions::default()
        };
        assert_eq!(
            convert(".a { border-width: 2px; width: 3px; }", partial),
            ".a { border-width: 2px; width: 0.9375vw; }"
        );
        assert_eq!(
            convert(".a { border: 1px solid; width: 2px; }", PartialOptions::default()),
            ".a { border: 1px solid; width: 0.625vw; }"
        );
    }

    #[test]
    fn zero_result_drops_the_unit() {
        let partial = PartialOptions {
            min_pixel_value: Some(0.0),
            unit_precision: Some(2),
            ..PartialOptions::default()
        };
        assert_eq!(convert(".a { margin: 0.01px 32px; }", partial), ".a { margin: 0 10vw; }");
    }

    #[test]
    fn viewport_directive_applies_from_its_position() {
        let css = ".r1 { width: 100px; }\n/* viewport-width: 400 */\n.r2 { width: 100px; }";
        assert_eq!(
            convert(css, PartialOptions::default()),
            ".r1 { width: 31.25vw; }\n.r2 { width: 25vw; }"
        );
    }

    #[test]
    fn malformed_directive_is_an_ordinary_comment() {
        let css = "/* viewport-width: abc */\n.a { width: 100px; }";
        assert_eq!(
            convert(css, PartialOptions::default()),
            "/* viewport-width: abc */\n.a { width: 31.25vw; }"
        );
    }

    #[test]
    fn ignore_next_marker() {
        let css = ".a {\n  /* px-to-viewport-ignore-next */\n  width: 100px;\n  height: 100px;\n}";
        assert_eq!(
            convert(css, PartialOptions::default()),
            ".a {\n  width: 100px;\n  height: 31.25vw;\n}"
        );
    }

    #[test]
    fn ignore_previous_marker_on_same_line() {
        let css = ".a {\n  width: 100px; /* px-to-viewport-ignore */\n  height: 100px;\n}";
        assert_eq!(
            convert(css, PartialOptions::default()),
            ".a {\n  width: 100px;\n  height: 31.25vw;\n}"
        );
    }

    #[test]
    fn ignore_previous_marker_after_last_declaration_without_semicolon() {
        let css = ".a {\n  width: 100px /* px-to-viewport-ignore */\n}";
        assert_eq!(convert(css, PartialOptions::default()), ".a {\n  width: 100px\n}");

        let css = ".a {\n  height: 64px;\n  width: 100px /* px-to-viewport-ignore */\n}";
        assert_eq!(
            convert(css, PartialOptions::default()),
            ".a {\n  height: 20vw;\n  width: 100px\n}"
        );
    }

    #[test]
    fn ignore_previous_marker_before_semicolon_terminated_end() {
        let css = ".a {\n  width: 100px; /* px-to-viewport-ignore */\n}";
        assert_eq!(convert(css, PartialOptions::default()), ".a {\n  width: 100px;\n}");
    }

    #[test]
    fn ignore_previous_marker_on_own_line_warns() {
        let css = ".a {\n  width: 100px;\n  /* px-to-viewport-ignore */\n  height: 100px;\n}";
        let out = run_from(css, None, PartialOptions::default());
        assert_eq!(
            out.css,
            ".a {\n  width: 31.25vw;\n  /* px-to-viewport-ignore */\n  height: 31.25vw;\n}"
        );
        assert_eq!(out.report.warnings.len(), 1);
        let warning = &out.report.warnings[0];
        assert_eq!(
            warning.message,
            "Unexpected comment /* px-to-viewport-ignore */ must be after declaration at same line."
        );
        assert_eq!(warning.line, Some(3));
    }

    #[test]
    fn landscape_block_is_generated_once() {
        let partial = PartialOptions {
            landscape: Some(true),
            ..PartialOptions::default()
        };
        let out = run_from(".rule { width: 100px; }", None, partial);
        assert_eq!(
            out.css,
            ".rule { width: 31.25vw; }\n@media (orientation: landscape) {\n  .rule {\n    width: 17.60563vw;\n  }\n}"
        );
        assert_eq!(out.css.matches("@media").count(), 1);
        assert_eq!(out.report.landscape_rules, 1);
    }

    #[test]
    fn landscape_directive_and_media_rules() {
        let partial = PartialOptions {
            landscape: Some(true),
            ..PartialOptions::default()
        };
        let css = "/* landscape-width: 1000 */\n.a { width: 100px; color: red; }\n.b { color: blue; }\n@media (min-width: 10px) {\n  .c { width: 100px; }\n}";
        assert_eq!(
            convert(css, partial),
            "\n.a { width: 31.25vw; color: red; }\n.b { color: blue; }\n@media (min-width: 10px) {\n  .c { width: 100px; }\n}\n@media (orientation: landscape) {\n  .a {\n    width: 10vw;\n  }\n}"
        );
    }

    #[test]
    fn replace_mode_is_idempotent() {
        let css = "/* viewport-width: 750 */\n.a {\n  width: 750px;\n  border: 1px solid #000;\n  font-size: 28px;\n}\n@media (max-width: 600px) {\n  .b { height: 20px; }\n}\n";
        let once = convert(css, PartialOptions::default());
        let twice = convert(&once, PartialOptions::default());
        assert_eq!(once, twice);
        assert_eq!(
            once,
            "\n.a {\n  width: 100vw;\n  border: 1px solid #000;\n  font-size: 3.73333vw;\n}\n@media (max-width: 600px) {\n  .b { height: 20px; }\n}\n"
        );
    }

    #[test]
    fn non_replace_mode_inserts_copies_without_duplicates() {
        let partial = || PartialOptions {
            replace: Some(false),
            ..PartialOptions::default()
        };
        assert_eq!(
            convert(".a {\n  width: 100px;\n  height: 64px;\n}", partial()),
            ".a {\n  width: 100px;\n  width: 31.25vw;\n  height: 64px;\n  height: 20vw;\n}"
        );
        assert_eq!(
            convert(".a {\n  width: 100px;\n  width: 31.25vw;\n}", partial()),
            ".a {\n  width: 100px;\n  width: 31.25vw;\n}"
        );
    }

    #[test]
    fn selector_and_property_filters() {
        let partial = PartialOptions {
            selector_black_list: Some(vec![".ignore".to_string(), "/^html$/".to_string()]),
            prop_list: Some(vec!["*".to_string(), "!letter-spacing".to_string()]),
            ..PartialOptions::default()
        };
        let css = ".ignore-me { width: 100px; }\nhtml { width: 100px; }\n.keep { width: 100px; letter-spacing: 10px; }";
        assert_eq!(
            convert(css, partial),
            ".ignore-me { width: 100px; }\nhtml { width: 100px; }\n.keep { width: 31.25vw; letter-spacing: 10px; }"
        );
    }

    #[test]
    fn file_filters_use_source_path() {
        let partial = || PartialOptions {
            include: Some(PatternOption::from(r"/src/")),
            exclude: Some(PatternOption::Many(vec![r"/node_modules/".to_string()])),
            ..PartialOptions::default()
        };
        let css = ".a { width: 100px; }";

        let included = run_from(css, Some(Path::new("/app/src/a.css")), partial());
        assert_eq!(included.css, ".a { width: 31.25vw; }");

        let outside = run_from(css, Some(Path::new("/app/lib/a.css")), partial());
        assert_eq!(outside.css, css);

        let excluded = run_from(css, Some(Path::new("/app/src/node_modules/x/a.css")), partial());
        assert_eq!(excluded.css, css);

        let unnamed = run_from(css, None, partial());
        assert_eq!(unnamed.css, ".a { width: 31.25vw; }");
    }

    #[test]
    fn excluded_file_is_left_byte_for_byte() {
        let partial = PartialOptions {
            exclude: Some(PatternOption::from("node_modules")),
            landscape: Some(true),
            ..PartialOptions::default()
        };
        let css = "/* viewport-width: 400 */\n.a { width: 100px; }";
        let out = run_from(css, Some(Path::new("/app/node_modules/x.css")), partial);
        assert_eq!(out.css, css);
        assert_eq!(out.report.directives_removed, 0);
        assert_eq!(out.report.landscape_rules, 0);
    }

    #[test]
    fn oversized_precision_is_rejected() {
        let partial = PartialOptions {
            unit_precision: Some(400),
            ..PartialOptions::default()
        };
        let err = PxToViewport::from_partial(partial).unwrap_err();
        assert!(matches!(err, Error::InvalidPrecision { value: 400, .. }));
    }

    #[test]
    fn invalid_pattern_shape_fails_before_any_work() {
        let partial: PartialOptions = serde_json::from_str(r#"{"include": 42}"#).unwrap();
        let err = PxToViewport::from_partial(partial).unwrap_err();
        assert!(matches!(err, Error::InvalidPatternOption { option: "include" }));
        assert_eq!(err.to_string(), "options.include should be a pattern or an array of patterns");
    }

    #[test]
    fn mixed_directives_with_landscape_and_media_query() {
        let css = "/* viewport-width: 100 */\n  /* simple comment */\n  /* landscape-width: 100 */\n.rule {\n  font-size: 15px;\n  width: 100px;\n  height: 50px;\n}";
        let partial = PartialOptions {
            exclude: Some(PatternOption::Many(vec![r"/node_modules/".to_string(), r"/exclude/".to_string()])),
            media_query: Some(true),
            landscape: Some(true),
            ..PartialOptions::default()
        };
        let out = run_from(css, Some(Path::new("/pc-project/main.css")), partial);
        assert_eq!(
            out.css,
            "\n  /* simple comment */\n.rule {\n  font-size: 15vw;\n  width: 100vw;\n  height: 50vw;\n}\n@media (orientation: landscape) {\n  .rule {\n    font-size: 15vw;\n    width: 100vw;\n    height: 50vw;\n  }\n}"
        );
        assert_eq!(out.report.directives_removed, 2);
    }

    #[test]
    fn strings_urls_and_other_units_survive() {
        let css = ".a { background: url(\"icon-32px.png\") 10px 0 / 64px; content: \"12px\"; width: calc(100% - 32px); height: 2em; }";
        assert_eq!(
            convert(css, PartialOptions::default()),
            ".a { background: url(\"icon-32px.png\") 3.125vw 0 / 20vw; content: \"12px\"; width: calc(100% - 10vw); height: 2em; }"
        );
    }
}
