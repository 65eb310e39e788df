use crate::records::RelationshipRecord;

/// A parent row identified by an inclusive numeric `[start, end]` band,
/// used where the child key is a number falling inside a parent's range
/// (merchant category codes to their category bands).
#[derive(Debug, Clone)]
pub struct RangeBand {
    pub start: i64,
    pub end: i64,
    /// Slug id of the parent record owning this band
    pub parent_id: String,
}

impl RangeBand {
    pub fn contains(&self, key: i64) -> bool {
        key >= self.start && key <= self.end
    }
}

/// Find the band containing a child's numeric key by linear scan.
/// First matching band wins; overlapping bands are not diagnosed.
/// A non-numeric or unparseable key yields `None` (the child contributes
/// no edge).
pub fn range_lookup<'a>(bands: &'a [RangeBand], key: &str) -> Option<&'a RangeBand> {
    let numeric: i64 = key.trim().parse().ok()?;
    bands.iter().find(|band| band.contains(numeric))
}

/// Build a plain directed edge between two records identified by slug id.
pub fn edge(
    from: (&str, &str, &str),
    to: (&str, &str, &str),
    relationship_type: &str,
) -> RelationshipRecord {
    RelationshipRecord {
        from_ns: from.0.to_string(),
        from_type: from.1.to_string(),
        from_id: from.2.to_string(),
        to_ns: to.0.to_string(),
        to_type: to.1.to_string(),
        to_id: to.2.to_string(),
        relationship_type: relationship_type.to_string(),
        extra: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> Vec<RangeBand> {
        vec![
            RangeBand {
                start: 100,
                end: 199,
                parent_id: "A".to_string(),
            },
            RangeBand {
                start: 200,
                end: 299,
                parent_id: "B".to_string(),
            },
        ]
    }

    #[test]
    fn test_range_lookup_finds_containing_band() {
        let bands = bands();
        assert_eq!(range_lookup(&bands, "150").unwrap().parent_id, "A");
        assert_eq!(range_lookup(&bands, "200").unwrap().parent_id, "B");
    }

    #[test]
    fn test_range_lookup_outside_all_bands() {
        assert!(range_lookup(&bands(), "500").is_none());
    }

    #[test]
    fn test_range_lookup_non_numeric_key() {
        assert!(range_lookup(&bands(), "n/a").is_none());
        assert!(range_lookup(&bands(), "").is_none());
    }

    #[test]
    fn test_range_lookup_first_match_wins() {
        let overlapping = vec![
            RangeBand {
                start: 100,
                end: 300,
                parent_id: "first".to_string(),
            },
            RangeBand {
                start: 200,
                end: 400,
                parent_id: "second".to_string(),
            },
        ];
        assert_eq!(
            range_lookup(&overlapping, "250").unwrap().parent_id,
            "first"
        );
    }

    #[test]
    fn test_edge_builder() {
        let e = edge(
            ("EDI", "Segment", "Beginning_Segment"),
            ("EDI", "TransactionSet", "Purchase_Order"),
            "part_of",
        );
        assert_eq!(e.from_id, "Beginning_Segment");
        assert_eq!(e.to_type, "TransactionSet");
        assert_eq!(e.relationship_type, "part_of");
        assert!(e.extra.is_empty());
    }
}
