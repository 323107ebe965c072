//! Filter, group and order raw records into the displayable sequence.
//!
//! Groups are visited in ascending `group_id` order; within a group the
//! [`OrderPolicy`] decides. Both orderings are stable, so records with equal
//! keys keep their input order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::{RankParseError, Record};

/// Intra-group ordering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderPolicy {
    /// Ascending by the integer rank in the name. Records without a rank go
    /// last within their group.
    #[default]
    ByNameRank,
    /// Ascending by price.
    ByPrice,
}

/// Pipeline output plus the records whose rank could not be parsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Processed {
    pub items: Vec<Record>,
    pub rank_failures: Vec<RankParseError>,
}

/// Runs the pipeline and returns the ordered, displayable records.
pub fn process(records: &[Record], policy: OrderPolicy) -> Vec<Record> {
    process_with_report(records, policy).items
}

/// Like [`process`], also reporting rank failures under [`OrderPolicy::ByNameRank`].
pub fn process_with_report(records: &[Record], policy: OrderPolicy) -> Processed {
    let mut groups: BTreeMap<i64, Vec<&Record>> = BTreeMap::new();
    for record in records.iter().filter(|record| record.is_displayable()) {
        groups.entry(record.group_id()).or_default().push(record);
    }

    let mut processed = Processed {
        items: Vec::with_capacity(groups.values().map(Vec::len).sum()),
        rank_failures: Vec::new(),
    };

    for group in groups.into_values() {
        match policy {
            OrderPolicy::ByNameRank => {
                let mut ranked: Vec<(Option<i64>, &Record)> = group
                    .into_iter()
                    .map(|record| match record.sort_rank() {
                        Ok(rank) => (Some(rank), record),
                        Err(err) => {
                            processed.rank_failures.push(err);
                            (None, record)
                        }
                    })
                    .collect();
                ranked.sort_by(|(a, _), (b, _)| compare_rank(*a, *b));
                processed
                    .items
                    .extend(ranked.into_iter().map(|(_, record)| record.clone()));
            }
            OrderPolicy::ByPrice => {
                let mut group = group;
                group.sort_by(|a, b| a.price().total_cmp(&b.price()));
                processed.items.extend(group.into_iter().cloned());
            }
        }
    }

    processed
}

fn compare_rank(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
