use crate::{CycleStatus, Record};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogViewModel {
    pub status: CycleStatus,
    pub error: Option<String>,
    pub item_count: usize,
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub group_id: i64,
    pub rows: Vec<ItemRowView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRowView {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub rating: i64,
}

impl CatalogViewModel {
    /// Splits already ordered items into consecutive runs of equal `group_id`.
    pub fn from_items(items: &[Record], error: Option<String>, status: CycleStatus) -> Self {
        let mut groups: Vec<GroupView> = Vec::new();
        for record in items {
            let row = ItemRowView {
                id: record.id(),
                name: record.name().unwrap_or_default().to_string(),
                price: record.price(),
                rating: record.rating(),
            };
            match groups.last_mut() {
                Some(group) if group.group_id == record.group_id() => group.rows.push(row),
                _ => groups.push(GroupView {
                    group_id: record.group_id(),
                    rows: vec![row],
                }),
            }
        }

        Self {
            status,
            error,
            item_count: items.len(),
            groups,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == CycleStatus::Fetching && self.item_count == 0 && self.error.is_none()
    }
}
