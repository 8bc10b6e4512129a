//! Checks that committed generated code matches a fresh generation.
//!
//! A target file carries two marker-delimited sections: the function bodies
//! and the registration list. Both are compared line by line against the
//! generator's output. On a mismatch the fresh text is left in a side file
//! so it can be inspected or copied over.

use crate::{Error, Project, driver::TypeFailure};
use convgen_config::Markers;
use std::{
    fmt, fs, io,
    ops::Range,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::{debug, info};

///
/// Section
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Section {
    Functions,
    Names,
}

impl Section {
    /// Suffix of the side file written on mismatch.
    #[must_use]
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Functions => "functions.txt",
            Self::Names => "names.txt",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Functions => f.write_str("conversion functions"),
            Self::Names => f.write_str("conversion function names"),
        }
    }
}

///
/// VerifyError
///

#[derive(Debug, ThisError)]
pub enum VerifyError {
    #[error("'{marker}' line not found in '{}'", path.display())]
    MissingMarker { marker: String, path: PathBuf },

    #[error(
        "please update {section} in '{}'; generated: '{}'; {diff}",
        path.display(),
        generated.display()
    )]
    Mismatch {
        section: Section,
        path: PathBuf,
        generated: PathBuf,
        diff: LineDiff,
    },
}

///
/// Sections
/// Text between the markers, each line keeping its terminator.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sections {
    pub functions: String,
    pub names: String,
}

impl Sections {
    #[must_use]
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Functions => &self.functions,
            Section::Names => &self.names,
        }
    }
}

/// Byte ranges of both section bodies within a file.
pub(crate) struct SectionRanges {
    pub functions: Range<usize>,
    pub names: Range<usize>,
}

/// Find both sections. The names section is searched for after the end of
/// the functions section.
pub(crate) fn locate(
    text: &str,
    markers: &Markers,
    path: &Path,
) -> Result<SectionRanges, VerifyError> {
    let mut lines = text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    });

    let functions = find_section(
        &mut lines,
        &markers.functions_start,
        &markers.functions_end,
        path,
    )?;
    let names = find_section(&mut lines, &markers.names_start, &markers.names_end, path)?;

    Ok(SectionRanges { functions, names })
}

fn find_section<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    start: &str,
    end: &str,
    path: &Path,
) -> Result<Range<usize>, VerifyError> {
    let missing = |marker: &str| VerifyError::MissingMarker {
        marker: marker.to_string(),
        path: path.to_path_buf(),
    };

    let body_start = lines
        .find(|(_, line)| is_marker(line, start))
        .map(|(offset, line)| offset + line.len())
        .ok_or_else(|| missing(start))?;
    let body_end = lines
        .find(|(_, line)| is_marker(line, end))
        .map(|(offset, _)| offset)
        .ok_or_else(|| missing(end))?;

    Ok(body_start..body_end)
}

fn is_marker(line: &str, marker: &str) -> bool {
    line.strip_suffix('\n').unwrap_or(line) == marker
}

/// Extract both sections from file text.
pub fn extract_sections(
    text: &str,
    markers: &Markers,
    path: &Path,
) -> Result<Sections, VerifyError> {
    let ranges = locate(text, markers, path)?;

    Ok(Sections {
        functions: text[ranges.functions].to_string(),
        names: text[ranges.names].to_string(),
    })
}

/// Read a committed file and extract both sections.
pub fn read_sections(path: &Path, markers: &Markers) -> Result<Sections, Error> {
    let text = fs::read_to_string(path).map_err(Error::io(path))?;

    Ok(extract_sections(&text, markers, path)?)
}

///
/// LineDiff
///
/// First differing line between committed and generated text. `None` on
/// either side means that text ended before the other.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineDiff {
    /// 1-based.
    pub line: usize,
    pub existing: Option<String>,
    pub generated: Option<String>,
}

impl fmt::Display for LineDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |text: &Option<String>| match text {
            Some(line) => format!("{:?}", line.trim_end_matches('\n')),
            None => "end of text".to_string(),
        };

        write!(
            f,
            "first difference at line {}: expected {}, got {}",
            self.line,
            show(&self.generated),
            show(&self.existing)
        )
    }
}

/// Compare line by line, terminators included. Returns the first
/// difference, if any.
#[must_use]
pub fn compare(existing: &str, generated: &str) -> Option<LineDiff> {
    let mut existing_lines = existing.split_inclusive('\n');
    let mut generated_lines = generated.split_inclusive('\n');

    for line in 1.. {
        match (existing_lines.next(), generated_lines.next()) {
            (None, None) => return None,
            (a, b) if a == b => {}
            (a, b) => {
                return Some(LineDiff {
                    line,
                    existing: a.map(ToString::to_string),
                    generated: b.map(ToString::to_string),
                });
            }
        }
    }

    None
}

///
/// VerifyReport
///

#[derive(Debug)]
pub struct VerifyReport {
    pub version: String,
    pub path: PathBuf,
    pub mismatches: Vec<(Section, PathBuf, LineDiff)>,
    pub failures: Vec<TypeFailure>,
}

impl VerifyReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// One error per mismatched section.
    #[must_use]
    pub fn errors(&self) -> Vec<VerifyError> {
        self.mismatches
            .iter()
            .map(|(section, generated, diff)| VerifyError::Mismatch {
                section: *section,
                path: self.path.clone(),
                generated: generated.clone(),
                diff: diff.clone(),
            })
            .collect()
    }
}

/// Regenerate one version and compare it with its committed file. Fresh
/// text for a mismatched section is written to
/// `<side_dir>/<version>.<section>.txt`; a stale side file for a matching
/// section is removed.
pub fn check_version(
    project: &Project,
    version: &str,
    side_dir: &Path,
) -> Result<VerifyReport, Error> {
    let target = project.config.target(version)?;
    let path = project.config.output_path(target);

    let existing = read_sections(&path, &project.config.markers)?;
    let output = project.generate(version)?;
    let generated = Sections {
        functions: output.functions,
        names: output.names,
    };

    let mut mismatches = Vec::new();
    for section in [Section::Functions, Section::Names] {
        let side = side_dir.join(format!("{version}.{}", section.file_suffix()));

        match compare(existing.get(section), generated.get(section)) {
            Some(diff) => {
                fs::create_dir_all(side_dir).map_err(Error::io(side_dir))?;
                fs::write(&side, generated.get(section)).map_err(Error::io(&side))?;
                info!(%version, %section, side = %side.display(), "mismatch");
                mismatches.push((section, side, diff));
            }
            None => {
                remove_if_present(&side)?;
                debug!(%version, %section, "up to date");
            }
        }
    }

    Ok(VerifyReport {
        version: version.to_string(),
        path,
        mismatches,
        failures: output.failures,
    })
}

fn remove_if_present(path: &Path) -> Result<(), Error> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(Error::io(path)(e)),
        _ => Ok(()),
    }
}
