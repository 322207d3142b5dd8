use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::{ValidationCheck, ValidationReport};
use crate::mgf::read_mgf_file;
use crate::pipeline::{ExportSummary, OutputNames};
use crate::spectrum::SpectrumCollection;

/// How many offending identifiers to name in a failure message
const MAX_LISTED: usize = 5;

/// Header and first-column identifiers of a written table
#[derive(Debug)]
pub(crate) struct TableIds {
    header: Vec<String>,
    ids: Vec<String>,
}

fn read_table(path: &Path) -> Result<TableIds, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(true)
        .from_path(path)?;
    let header = reader.headers()?.iter().map(str::to_string).collect();
    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        ids.push(record.get(0).unwrap_or_default().to_string());
    }
    Ok(TableIds { header, ids })
}

fn listed<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let mut ids: Vec<&str> = ids.collect();
    let total = ids.len();
    ids.truncate(MAX_LISTED);
    let mut text = ids.join(", ");
    if total > MAX_LISTED {
        text.push_str(&format!(" (+{} more)", total - MAX_LISTED));
    }
    text
}

/// `SCANS` numbers shared by records of different features or by an unlinked record
fn aliased_scans(spectra: &SpectrumCollection) -> Vec<u32> {
    let mut owners: HashMap<u32, Option<&str>> = HashMap::new();
    let mut aliased = Vec::new();
    for spectrum in spectra.iter() {
        let Some(scan) = spectrum.scan else {
            continue;
        };
        let feature = spectrum.feature_id.as_deref();
        match owners.entry(scan) {
            Entry::Vacant(entry) => {
                entry.insert(feature);
            }
            Entry::Occupied(entry) => {
                let clash = feature.is_none() || *entry.get() != feature;
                if clash && !aliased.contains(&scan) {
                    aliased.push(scan);
                }
            }
        }
    }
    aliased
}

/// Load one artifact, recording a failed check if it cannot be parsed
fn load<T, E: std::fmt::Display>(
    report: &mut ValidationReport,
    name: &str,
    result: Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => {
            report.add_check(ValidationCheck::ok(format!("Readable: {name}")));
            Some(value)
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed(format!("Readable: {name}"), e.to_string()));
            None
        }
    }
}

/// Cross-check the identifier linkage between tables and spectra files
pub(crate) fn check_linkage(dir: &Path, names: &OutputNames, report: &mut ValidationReport) {
    let full = load(report, &names.full_table, read_table(&dir.join(&names.full_table)));
    let ms2 = load(report, &names.ms2_table, read_table(&dir.join(&names.ms2_table)));
    let all_spectra = load(report, &names.full_mgf, read_mgf_file(dir.join(&names.full_mgf)));
    let representatives = load(
        report,
        &names.representative_mgf,
        read_mgf_file(dir.join(&names.representative_mgf)),
    );
    let (Some(full), Some(ms2), Some(all_spectra), Some(representatives)) =
        (full, ms2, all_spectra, representatives)
    else {
        return;
    };

    check_tables(&full, &ms2, report);
    check_representatives(&ms2, &representatives, report);
    check_spectra(&full, &ms2, &all_spectra, report);
    check_summary(dir, names, &full, &ms2, &all_spectra, &representatives, report);
}

fn check_tables(full: &TableIds, ms2: &TableIds, report: &mut ValidationReport) {
    const SCHEMA: &str = "Tables share one schema";
    if full.header == ms2.header {
        report.add_check(ValidationCheck::ok(SCHEMA));
    } else {
        report.add_check(ValidationCheck::failed(
            SCHEMA,
            format!(
                "{} columns in the full table, {} in the MS2-only table",
                full.header.len(),
                ms2.header.len()
            ),
        ));
    }

    const UNIQUE: &str = "Feature identifiers unique";
    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = full
        .ids
        .iter()
        .map(String::as_str)
        .filter(|id| !seen.insert(*id))
        .collect();
    if duplicates.is_empty() {
        report.add_check(ValidationCheck::ok(UNIQUE));
    } else {
        report.add_check(ValidationCheck::failed(
            UNIQUE,
            format!("duplicated: {}", listed(duplicates.into_iter())),
        ));
    }

    const SUBSET: &str = "MS2-only rows drawn from full table";
    let positions: HashMap<&str, usize> = full
        .ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    let unknown: Vec<&str> = ms2
        .ids
        .iter()
        .map(String::as_str)
        .filter(|id| !positions.contains_key(id))
        .collect();
    if !unknown.is_empty() {
        report.add_check(ValidationCheck::failed(
            SUBSET,
            format!("not in full table: {}", listed(unknown.into_iter())),
        ));
        return;
    }
    let ordered = ms2
        .ids
        .windows(2)
        .all(|w| positions[w[0].as_str()] < positions[w[1].as_str()]);
    if ordered {
        report.add_check(ValidationCheck::ok(SUBSET));
    } else {
        report.add_check(ValidationCheck::warning(
            SUBSET,
            "rows are not in full-table order",
        ));
    }

    if ms2.ids.is_empty() {
        report.add_check(ValidationCheck::warning(
            "MS2 coverage",
            "no feature has an MS2 spectrum",
        ));
    }
}

fn check_representatives(
    ms2: &TableIds,
    representatives: &SpectrumCollection,
    report: &mut ValidationReport,
) {
    const LINKED: &str = "Representative spectra linked to features";
    let unlinked = representatives.unlinked_count();
    if unlinked == 0 {
        report.add_check(ValidationCheck::ok(LINKED));
    } else {
        report.add_check(ValidationCheck::failed(
            LINKED,
            format!("{unlinked} records without FEATURE_ID"),
        ));
    }

    const ONE_PER_FEATURE: &str = "One representative per feature";
    let mut seen = HashSet::new();
    let repeated: Vec<&str> = representatives
        .iter()
        .filter_map(|s| s.feature_id.as_deref())
        .filter(|id| !seen.insert(*id))
        .collect();
    if repeated.is_empty() {
        report.add_check(ValidationCheck::ok(ONE_PER_FEATURE));
    } else {
        report.add_check(ValidationCheck::failed(
            ONE_PER_FEATURE,
            format!("repeated: {}", listed(repeated.into_iter())),
        ));
    }

    const MATCH: &str = "MS2-only table matches representative spectra";
    let table_ids: HashSet<&str> = ms2.ids.iter().map(String::as_str).collect();
    let without_spectrum: Vec<&str> = ms2
        .ids
        .iter()
        .map(String::as_str)
        .filter(|id| !seen.contains(id))
        .collect();
    let without_row: Vec<&str> = representatives
        .feature_ids()
        .into_iter()
        .filter(|id| !table_ids.contains(id))
        .collect();
    match (without_spectrum.is_empty(), without_row.is_empty()) {
        (true, true) => report.add_check(ValidationCheck::ok(MATCH)),
        (false, _) => report.add_check(ValidationCheck::failed(
            MATCH,
            format!(
                "rows without a representative spectrum: {}",
                listed(without_spectrum.into_iter())
            ),
        )),
        (true, false) => report.add_check(ValidationCheck::failed(
            MATCH,
            format!(
                "spectra without an MS2-only row: {}",
                listed(without_row.into_iter())
            ),
        )),
    }
}

fn check_spectra(
    full: &TableIds,
    ms2: &TableIds,
    all_spectra: &SpectrumCollection,
    report: &mut ValidationReport,
) {
    const DEFINED: &str = "Spectrum features defined in full table";
    let full_ids: HashSet<&str> = full.ids.iter().map(String::as_str).collect();
    let spectrum_ids = all_spectra.feature_ids();
    let undefined: Vec<&str> = spectrum_ids
        .iter()
        .copied()
        .filter(|id| !full_ids.contains(id))
        .collect();
    if undefined.is_empty() {
        report.add_check(ValidationCheck::ok(DEFINED));
    } else {
        report.add_check(ValidationCheck::failed(
            DEFINED,
            format!("undefined: {}", listed(undefined.into_iter())),
        ));
    }

    const COMPLETE: &str = "MS2-only table covers every spectrum feature";
    let ms2_ids: HashSet<&str> = ms2.ids.iter().map(String::as_str).collect();
    let dropped: Vec<&str> = spectrum_ids
        .iter()
        .copied()
        .filter(|id| full_ids.contains(id) && !ms2_ids.contains(id))
        .collect();
    if dropped.is_empty() {
        report.add_check(ValidationCheck::ok(COMPLETE));
    } else {
        report.add_check(ValidationCheck::failed(
            COMPLETE,
            format!("missing rows: {}", listed(dropped.into_iter())),
        ));
    }

    const SCANS: &str = "SCANS values identify one feature";
    let aliased: Vec<String> = aliased_scans(all_spectra)
        .into_iter()
        .map(|scan| scan.to_string())
        .collect();
    if aliased.is_empty() {
        report.add_check(ValidationCheck::ok(SCANS));
    } else {
        report.add_check(ValidationCheck::failed(
            SCANS,
            format!("shared: {}", listed(aliased.iter().map(String::as_str))),
        ));
    }

    let unlinked = all_spectra.unlinked_count();
    if unlinked > 0 {
        report.add_check(ValidationCheck::warning(
            "Spectra linked to features",
            format!("{unlinked} of {} spectra have no feature", all_spectra.len()),
        ));
    }
}

fn check_summary(
    dir: &Path,
    names: &OutputNames,
    full: &TableIds,
    ms2: &TableIds,
    all_spectra: &SpectrumCollection,
    representatives: &SpectrumCollection,
    report: &mut ValidationReport,
) {
    const NAME: &str = "Summary matches artifacts";
    let parsed = std::fs::read_to_string(dir.join(&names.summary))
        .map_err(|e| e.to_string())
        .and_then(|text| {
            serde_json::from_str::<ExportSummary>(&text).map_err(|e| e.to_string())
        });
    let summary = match parsed {
        Ok(summary) => summary,
        Err(e) => {
            report.add_check(ValidationCheck::failed(NAME, e));
            return;
        }
    };

    let observed = [
        ("features", summary.features, full.ids.len()),
        ("ms2_features", summary.ms2_features, ms2.ids.len()),
        ("spectra", summary.spectra, all_spectra.len()),
        (
            "representative_spectra",
            summary.representative_spectra,
            representatives.len(),
        ),
    ];
    let mismatches: Vec<String> = observed
        .iter()
        .filter(|(_, recorded, actual)| recorded != actual)
        .map(|(field, recorded, actual)| format!("{field} {recorded} != {actual}"))
        .collect();
    if mismatches.is_empty() {
        report.add_check(ValidationCheck::ok(NAME));
    } else {
        report.add_check(ValidationCheck::warning(NAME, mismatches.join("; ")));
    }
}
