use crate::model::Module;

/// Remove content that may not be redistributed
///
/// For each package not marked redistributable, clears the synopsis and
/// blanks the documentation HTML. A present documentation value becomes
/// `Some("")`, never `None`: redaction must not turn a valid submission
/// into an invalid one. If the module itself is not redistributable, the
/// readme path and contents are cleared as well.
///
/// Idempotent. Runs strictly after validation and strictly before any
/// write.
pub fn redact_module(module: &mut Module) {
    for package in &mut module.packages {
        if !package.is_redistributable {
            package.synopsis.clear();
            if let Some(html) = &mut package.documentation_html {
                html.clear();
            }
        }
    }
    if !module.is_redistributable {
        module.readme_file_path.clear();
        module.readme_contents.clear();
    }
}
