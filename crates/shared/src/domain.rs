use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

/// The persisted shape of one tracked item.
///
/// `id` is `None` for a record that has never been written to the store; a
/// present `id` always refers to an existing row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sprite: String,
    pub date: String,
    pub place: String,
    pub game: String,
    pub notes: String,
    pub caught: bool,
    pub dex_no: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_kind_as_type() {
        let record = CatchRecord {
            id: Some(RecordId(7)),
            name: "Pika".to_string(),
            kind: "electric".to_string(),
            ..CatchRecord::default()
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["type"], "electric");
        assert_eq!(json["id"], 7);
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn default_record_has_no_identity() {
        assert_eq!(CatchRecord::default().id, None);
    }
}
