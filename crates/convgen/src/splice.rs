use crate::{
    Error, Project,
    verify::{VerifyError, locate},
};
use convgen_config::Markers;
use std::{fs, path::Path};
use tracing::info;

/// Replace both marker sections of `text` with fresh output. Everything
/// outside the sections, markers included, is kept byte for byte.
pub fn splice_sections(
    text: &str,
    markers: &Markers,
    functions: &str,
    names: &str,
    path: &Path,
) -> Result<String, VerifyError> {
    let ranges = locate(text, markers, path)?;

    let mut out = String::with_capacity(text.len() + functions.len() + names.len());
    out.push_str(&text[..ranges.functions.start]);
    push_section(&mut out, functions);
    out.push_str(&text[ranges.functions.end..ranges.names.start]);
    push_section(&mut out, names);
    out.push_str(&text[ranges.names.end..]);

    Ok(out)
}

// the end marker must stay on its own line
fn push_section(out: &mut String, body: &str) {
    out.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        out.push('\n');
    }
}

/// Regenerate one version and write it into its target file. Returns
/// whether the file changed.
pub fn update_version(project: &Project, version: &str) -> Result<bool, Error> {
    let target = project.config.target(version)?;
    let path = project.config.output_path(target);
    let output = project.generate(version)?;

    let text = fs::read_to_string(&path).map_err(Error::io(&path))?;
    let updated = splice_sections(
        &text,
        &project.config.markers,
        &output.functions,
        &output.names,
        &path,
    )?;

    if updated == text {
        return Ok(false);
    }
    fs::write(&path, updated).map_err(Error::io(&path))?;
    info!(%version, path = %path.display(), "updated generated conversions");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::{compare, extract_sections};
    use proptest::prelude::*;

    fn template() -> String {
        let markers = Markers::default();

        format!(
            "use super::*;\n\n{}\nstale\n{}\n\npub fn init(scheme: &mut Scheme) {{\n{}\n\t\tStale,\n{}\n}}\n",
            markers.functions_start, markers.functions_end, markers.names_start, markers.names_end
        )
    }

    #[test]
    fn replaces_only_the_sections() {
        let markers = Markers::default();
        let text = template();

        let out = splice_sections(
            &text,
            &markers,
            "fn a() {}\n",
            "\t\ta,\n",
            Path::new("x.rs"),
        )
        .unwrap();

        assert!(out.starts_with("use super::*;\n\n"));
        assert!(out.ends_with("\t)\n}\n"));
        assert!(!out.contains("stale"));
        assert!(!out.contains("Stale"));

        let sections = extract_sections(&out, &markers, Path::new("x.rs")).unwrap();
        assert_eq!(compare(&sections.functions, "fn a() {}\n"), None);
        assert_eq!(compare(&sections.names, "\t\ta,\n"), None);
    }

    #[test]
    fn splicing_twice_is_stable() {
        let markers = Markers::default();
        let once = splice_sections(&template(), &markers, "fn a() {}\n", "", Path::new("x.rs"))
            .unwrap();
        let twice =
            splice_sections(&once, &markers, "fn a() {}\n", "", Path::new("x.rs")).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn unterminated_body_gets_a_newline() {
        let markers = Markers::default();

        let out =
            splice_sections(&template(), &markers, "fn a() {}", "", Path::new("x.rs")).unwrap();

        assert!(out.contains("fn a() {}\n// AUTO-GENERATED FUNCTIONS END HERE\n"));
    }

    #[test]
    fn missing_markers_are_errors() {
        let err = splice_sections("fn main() {}\n", &Markers::default(), "", "", Path::new("x.rs"))
            .unwrap_err();

        assert!(matches!(err, VerifyError::MissingMarker { .. }));
    }

    fn body() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-z(){};, ]{0,16}", 0..8)
            .prop_map(|lines| lines.iter().map(|line| format!("{line}\n")).collect())
    }

    proptest! {
        #[test]
        fn spliced_sections_read_back(functions in body(), names in body()) {
            let markers = Markers::default();
            let path = Path::new("x.rs");

            let out = splice_sections(&template(), &markers, &functions, &names, path).unwrap();
            let sections = extract_sections(&out, &markers, path).unwrap();

            prop_assert_eq!(compare(&sections.functions, &functions), None);
            prop_assert_eq!(compare(&sections.names, &names), None);
        }
    }
}
