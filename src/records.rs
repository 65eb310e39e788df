use serde::{Deserialize, Serialize};
use std::fmt;

/// Column order for entity output files.
pub const ENTITY_COLUMNS: [&str; 6] = ["ns", "type", "id", "name", "description", "code"];

/// Column order for entity files that carry provenance (superset namespaces).
pub const ENTITY_COLUMNS_WITH_SAME_AS: [&str; 7] =
    ["ns", "type", "id", "name", "description", "code", "sameAs"];

/// Leading column order for relationship output files; extra scalar
/// attribute columns are appended per relationship kind.
pub const RELATIONSHIP_COLUMNS: [&str; 7] = [
    "fromNs",
    "fromType",
    "fromId",
    "toNs",
    "toType",
    "toId",
    "relationshipType",
];

/// A flattened representation of one entity from a classification or
/// reference standard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardRecord {
    pub ns: String,
    pub entity_type: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub code: String,
    /// Back-reference to the canonical record this one was derived from.
    /// Only superset namespaces populate this.
    pub same_as: Option<SameAsRef>,
}

impl StandardRecord {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.ns.clone(),
            self.entity_type.clone(),
            self.id.clone(),
            self.name.clone(),
            self.description.clone(),
            self.code.clone(),
        ]
    }

    pub fn to_row_with_same_as(&self) -> Vec<String> {
        let mut row = self.to_row();
        row.push(
            self.same_as
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default(),
        );
        row
    }
}

/// A structured same-as identifier composed of the canonical namespace,
/// type, and id, serialized as `ns:type:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SameAsRef {
    pub ns: String,
    pub entity_type: String,
    pub id: String,
}

impl fmt::Display for SameAsRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.ns, self.entity_type, self.id)
    }
}

/// A directed, typed edge between two StandardRecords, optionally carrying
/// extra scalar attributes as additional columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub from_ns: String,
    pub from_type: String,
    pub from_id: String,
    pub to_ns: String,
    pub to_type: String,
    pub to_id: String,
    pub relationship_type: String,
    /// Values for the extra attribute columns, in the order the owning
    /// relationship file declares them.
    pub extra: Vec<String>,
}

impl RelationshipRecord {
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.from_ns.clone(),
            self.from_type.clone(),
            self.from_id.clone(),
            self.to_ns.clone(),
            self.to_type.clone(),
            self.to_id.clone(),
            self.relationship_type.clone(),
        ];
        row.extend(self.extra.iter().cloned());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_as_display() {
        let same_as = SameAsRef {
            ns: "Onet".to_string(),
            entity_type: "Occupation".to_string(),
            id: "Chief_Executives".to_string(),
        };
        assert_eq!(same_as.to_string(), "Onet:Occupation:Chief_Executives");
    }

    #[test]
    fn test_record_row_order_matches_columns() {
        let record = StandardRecord {
            ns: "Mcc".to_string(),
            entity_type: "MerchantCategory".to_string(),
            id: "Eating_Places".to_string(),
            name: "5812 - Eating Places".to_string(),
            description: String::new(),
            code: "5812".to_string(),
            same_as: None,
        };
        let row = record.to_row();
        assert_eq!(row.len(), ENTITY_COLUMNS.len());
        assert_eq!(row[0], "Mcc");
        assert_eq!(row[5], "5812");

        let with_same_as = record.to_row_with_same_as();
        assert_eq!(with_same_as.len(), ENTITY_COLUMNS_WITH_SAME_AS.len());
        assert_eq!(with_same_as[6], "");
    }
}
