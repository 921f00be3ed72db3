use log::{info, warn};
use serde::Serialize;

use crate::classes::EquivalenceClasses;
use crate::error::AnonymizeError;
use crate::table::Table;

/// Suppression figures for a release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReleaseStats {
    pub classes_before_suppression: usize,
    pub suppressed_classes: usize,
    pub suppressed_records: usize,
    /// Share of input records dropped, in percent, rounded to two decimals.
    pub percent_suppressed: f64,
}

/// Drops every equivalence class smaller than `k` from an already
/// generalized table. Retained classes are emitted whole, in the order their
/// first record appears.
pub fn make_release(
    generalized: &Table,
    qi_columns: &[usize],
    k: usize,
) -> Result<(Table, ReleaseStats), AnonymizeError> {
    generalized.check_columns(qi_columns)?;
    let classes = EquivalenceClasses::from_rows(generalized.rows(), qi_columns)?;

    let mut rows = Vec::with_capacity(generalized.len());
    let mut suppressed_classes = 0;
    let mut suppressed_records = 0;
    for class in classes.iter() {
        if class.len() >= k {
            rows.extend(class.rows().iter().map(|&r| generalized.rows()[r].clone()));
        } else {
            suppressed_classes += 1;
            suppressed_records += class.len();
        }
    }

    let percent_suppressed = if generalized.is_empty() {
        0.0
    } else {
        round2(suppressed_records as f64 / generalized.len() as f64 * 100.0)
    };
    let stats = ReleaseStats {
        classes_before_suppression: classes.len(),
        suppressed_classes,
        suppressed_records,
        percent_suppressed,
    };
    if suppressed_records > 0 {
        warn!(
            "suppressed {suppressed_records} records in {suppressed_classes} classes ({percent_suppressed}%)"
        );
    }
    info!("{stats:?}");
    Ok((generalized.with_rows(rows), stats))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
