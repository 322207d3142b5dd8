use std::path::Path;

use super::{ValidationCheck, ValidationError, ValidationReport};
use crate::pipeline::OutputNames;

/// Verify the directory and every artifact exist. Returns false if any file is missing.
pub(crate) fn check_structure(
    dir: &Path,
    names: &OutputNames,
    report: &mut ValidationReport,
) -> Result<bool, ValidationError> {
    if !dir.is_dir() {
        report.add_check(ValidationCheck::failed(
            "Export directory exists",
            format!("Not a directory: {}", dir.display()),
        ));
        return Err(ValidationError::StructureError(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    report.add_check(ValidationCheck::ok("Export directory exists"));

    let mut complete = true;
    for name in names.all() {
        let check = format!("File present: {name}");
        if dir.join(name).is_file() {
            report.add_check(ValidationCheck::ok(check));
        } else {
            report.add_check(ValidationCheck::failed(check, "missing"));
            complete = false;
        }
    }
    Ok(complete)
}
