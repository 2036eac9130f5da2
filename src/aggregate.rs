//! Aggregation of canonical records into a deduplicated, eta-ordered dataset,
//! and the combiner that merges several datasets under the same contract.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::record::{CanonicalRecord, Direction, Port};

type GroupKey = (Port, Direction, NaiveDate, String, String);

fn group_key(record: &CanonicalRecord) -> GroupKey {
    (
        record.port,
        record.direction,
        record.eta,
        record.commodity.clone(),
        record.weight_unit.clone(),
    )
}

/// Group records by (port, direction, eta, commodity, unit), summing weights,
/// and return them ordered ascending by `eta`.
///
/// Groups accumulate in first-seen order and the sort is stable, so records
/// sharing an `eta` keep a deterministic relative order regardless of how
/// duplicates were interleaved in the input. The output has no duplicate
/// group keys.
pub fn aggregate(records: impl IntoIterator<Item = CanonicalRecord>) -> Vec<CanonicalRecord> {
    let mut seen: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<CanonicalRecord> = Vec::new();

    for record in records {
        match seen.get(&group_key(&record)) {
            Some(&idx) => groups[idx].weight += record.weight,
            None => {
                seen.insert(group_key(&record), groups.len());
                groups.push(record);
            }
        }
    }

    groups.sort_by_key(|record| record.eta);
    groups
}

/// Concatenate several datasets and aggregate the result.
///
/// Datasets may be raw or already aggregated; aggregation is idempotent, so
/// combining is associative and disjoint-key inputs reduce to a plain
/// concatenate-then-aggregate. Records keep their own `direction`: a source's
/// combined import/export category is extra rows, never merged arithmetically
/// into import + export.
pub fn combine(
    datasets: impl IntoIterator<Item = Vec<CanonicalRecord>>,
) -> Vec<CanonicalRecord> {
    aggregate(datasets.into_iter().flatten())
}
