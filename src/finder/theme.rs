//! Compile themes.

use super::{css_variables, extension::Extension, framework::Framework, scss::ScssCompiler};
use crate::{config::Variables, error::Error, util::path::PathExt};

/// Return the logical path of a theme stylesheet.
pub(crate) fn output_path(name: &str) -> String {
    if name.is_empty() {
        String::from("css/bulma.css")
    } else {
        format!("css/bulma_{name}.css")
    }
}

/// Build the entry stylesheet of a theme.
///
/// Overrides are declared before the framework is imported, so they take
/// precedence over its `!default` values.
pub(crate) fn entry_stylesheet(
    variables: &Variables,
    framework: &Framework,
    extensions: &[Extension],
) -> String {
    let mut scss = String::from("@charset \"utf-8\";\n");

    for (name, value) in variables {
        scss.push_str(&format!("${name}: {value};\n"));
    }

    let imports = framework
        .modules
        .iter()
        .chain(extensions.iter().flat_map(|extension| extension.sass.iter()));

    for path in imports {
        scss.push_str(&format!("@import \"{}\";\n", path.to_slash()));
    }

    scss
}

/// Compile a theme stylesheet.
pub(crate) fn compile(
    compiler: &ScssCompiler,
    name: &str,
    variables: &Variables,
    framework: &Framework,
    extensions: &[Extension],
) -> Result<String, Error> {
    let output_path = output_path(name);

    let mut css = compiler.compile(
        entry_stylesheet(variables, framework, extensions),
        &output_path,
    )?;

    if framework.uses_css_variables() {
        let root = css_variables::to_css_variables(variables);
        if !root.is_empty() {
            if !css.is_empty() && !css.ends_with('\n') {
                css.push('\n');
            }
            css.push_str(&root);
        }
    }

    Ok(css)
}
