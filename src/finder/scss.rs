//! Compile SCSS code.
//!
//! This module uses [`grass`] under the hood.

use std::path::Path;

use grass::Options;

use crate::{config::OutputStyle, error::Error};

/// SCSS compiler.
pub(crate) struct ScssCompiler<'o> {
    options: Options<'o>,
}

impl ScssCompiler<'_> {
    /// Create a SCSS compiler rendering the given output style.
    ///
    /// The compiler renders either expanded or compressed CSS, so `nested`
    /// and `compact` fall back to expanded.
    pub(crate) fn new(output_style: OutputStyle) -> Self {
        let style = match output_style {
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
            OutputStyle::Nested | OutputStyle::Expanded | OutputStyle::Compact => {
                grass::OutputStyle::Expanded
            },
        };

        Self {
            options: Options::default().style(style),
        }
    }

    /// Compile a SCSS string to CSS.
    ///
    /// `name` identifies the stylesheet in error messages.
    pub(crate) fn compile(&self, input: impl Into<String>, name: &str) -> Result<String, Error> {
        grass::from_string(input, &self.options).map_err(|diagnostic| Error::Compile {
            input: name.to_owned(),
            diagnostic,
        })
    }

    /// Compile a SCSS file to CSS.
    ///
    /// Imports are resolved relative to the file.
    pub(crate) fn compile_file(&self, path: &Path) -> Result<String, Error> {
        grass::from_path(path, &self.options).map_err(|diagnostic| Error::Compile {
            input: format!("{path:?}"),
            diagnostic,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;

    use super::ScssCompiler;
    use crate::{config::OutputStyle, error::Error};

    #[test]
    fn compile() {
        const CASES: [(OutputStyle, &str, &str); 2] = [
            (
                OutputStyle::Nested,
                ".outer { .inner { color: #abcdef; } }",
                ".outer .inner {\n  color: #abcdef;\n}\n",
            ),
            (
                OutputStyle::Compressed,
                ".outer { .inner { color: #abcdef; } }",
                ".outer .inner{color:#abcdef}",
            ),
        ];

        for (style, input, expected) in CASES {
            let result = ScssCompiler::new(style).compile(input, "test").unwrap();
            assert_eq!(
                result.trim_end(),
                expected.trim_end(),
                "\ncompile({input:?}) expected {expected:?} but received {result:?}"
            );
        }
    }

    #[test]
    fn compile_error_keeps_diagnostic() {
        let error = ScssCompiler::new(OutputStyle::Nested)
            .compile(".a { color: $undefined; }", "css/bulma.css")
            .unwrap_err();

        assert!(matches!(error, Error::Compile { .. }));

        let message = error.to_string();
        assert!(message.contains("css/bulma.css"));
        assert!(message.contains("Undefined variable"));
    }

    #[test]
    fn compile_file_resolves_relative_imports() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("_colors.scss").write_str("$accent: #abcdef;").unwrap();
        dir.child("main.scss")
            .write_str("@import \"colors\";\n.a { color: $accent; }")
            .unwrap();

        let result = ScssCompiler::new(OutputStyle::Expanded)
            .compile_file(&dir.path().join("main.scss"))
            .unwrap();

        assert!(result.contains("color: #abcdef"));
    }
}
