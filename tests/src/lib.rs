//! Shared fixtures for the integration tests.

use ola::{GenRule, Strategy, Table};
use ola_hierarchy::Hierarchy;

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(strings(columns), rows.iter().map(|r| strings(r)).collect())
        .expect("fixture table is rectangular")
}

/// Ages 0..100 binned by decade, then suppressed.
pub fn age_rule() -> GenRule {
    let rows = (0..100u32).map(|age| {
        let lo = age / 10 * 10;
        vec![age.to_string(), format!("{lo}s")]
    });
    Hierarchy::from_rows("age", rows)
        .expect("age hierarchy")
        .into_rule()
}

/// Five-digit zip codes cut to their three-digit prefix, then suppressed.
pub fn zip_rule(zips: &[&str]) -> GenRule {
    let rows = zips.iter().map(|zip| vec![zip.to_string(), zip[..3].to_string()]);
    Hierarchy::from_rows("zip", rows)
        .expect("zip hierarchy")
        .into_rule()
}

/// Every strategy below `max_levels`, in lexicographic order.
pub fn all_strategies(max_levels: &[usize]) -> Vec<Strategy> {
    let mut out = vec![Vec::new()];
    for &max in max_levels {
        out = out
            .into_iter()
            .flat_map(|prefix: Vec<usize>| {
                (0..=max).map(move |level| {
                    let mut next = prefix.clone();
                    next.push(level);
                    next
                })
            })
            .collect();
    }
    out.into_iter().map(Strategy::new).collect()
}

/// Minimal elements of `suitable`, sorted.
pub fn minimal(suitable: &[Strategy]) -> Vec<Strategy> {
    let mut out: Vec<Strategy> = suitable
        .iter()
        .filter(|s| !suitable.iter().any(|o| o != *s && s.dominates(o)))
        .cloned()
        .collect();
    out.sort();
    out
}
