//! Milestone model - recovery events tied to an offset after quitting.

use serde::{Deserialize, Serialize};
use crate::error::{CalcError, Result};

/// A biological recovery event that completes a fixed number of hours
/// after the quit moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Short label
    pub name: String,

    /// Hours after the quit moment at which this milestone completes
    pub hours_offset: f64,

    /// What happens at this point
    pub description: String,
}

impl Milestone {
    /// Create a new milestone.
    pub fn new(name: impl Into<String>, hours_offset: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hours_offset,
            description: description.into(),
        }
    }
}

const RECOVERY_MILESTONES: [(&str, f64, &str); 11] = [
    ("Blood pressure normalised", 0.33, "Within 20 minutes your blood pressure drops back to normal levels."),
    ("Carbon monoxide normalised", 12.0, "Carbon monoxide in the blood falls back to normal."),
    ("Heart attack risk dropping", 24.0, "Your risk of a heart attack starts to go down."),
    ("Senses recovering", 48.0, "Smell and taste begin to improve noticeably."),
    ("Nicotine eliminated", 72.0, "Your body is completely free of physical nicotine."),
    ("Circulation improved", 2160.0, "3 months: lung function increases by up to 30%."),
    ("Lung cilia recovered", 6570.0, "9 months: less coughing and fatigue, the lungs clean themselves."),
    ("Coronary risk halved", 8760.0, "1 year: the risk of coronary heart disease is 50% lower."),
    ("Stroke risk of a non-smoker", 43800.0, "5 years: the arteries have healed enough."),
    ("Lung cancer risk halved", 87600.0, "10 years: precancerous cells have been replaced."),
    ("Cardiovascular health restored", 131400.0, "15 years: your heart matches someone who never smoked."),
];

/// An ordered, validated set of milestones.
///
/// Entries are sorted ascending by `hours_offset`, every offset is finite and
/// non-negative, and the table is never empty. The table is immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MilestoneTable {
    milestones: Vec<Milestone>,
}

impl MilestoneTable {
    /// Build a table, checking the ordering invariant.
    pub fn new(milestones: Vec<Milestone>) -> Result<Self> {
        if milestones.is_empty() {
            return Err(CalcError::InvalidMilestoneTable("table is empty".to_string()));
        }

        for (i, m) in milestones.iter().enumerate() {
            if !m.hours_offset.is_finite() || m.hours_offset < 0.0 {
                return Err(CalcError::InvalidMilestoneTable(format!(
                    "milestone '{}' has invalid offset {}",
                    m.name, m.hours_offset
                )));
            }
            if i > 0 && m.hours_offset < milestones[i - 1].hours_offset {
                return Err(CalcError::InvalidMilestoneTable(format!(
                    "milestone '{}' ({}h) is out of order after '{}' ({}h)",
                    m.name,
                    m.hours_offset,
                    milestones[i - 1].name,
                    milestones[i - 1].hours_offset
                )));
            }
        }

        Ok(Self { milestones })
    }

    /// The built-in 11-entry recovery table.
    pub fn recovery() -> Self {
        Self {
            milestones: RECOVERY_MILESTONES
                .iter()
                .map(|(name, hours, desc)| Milestone::new(*name, *hours, *desc))
                .collect(),
        }
    }

    /// Milestones in ascending offset order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Number of milestones.
    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Iterate in ascending offset order.
    pub fn iter(&self) -> std::slice::Iter<'_, Milestone> {
        self.milestones.iter()
    }
}

impl Default for MilestoneTable {
    fn default() -> Self {
        Self::recovery()
    }
}

impl<'de> Deserialize<'de> for MilestoneTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let milestones = Vec::<Milestone>::deserialize(deserializer)?;
        MilestoneTable::new(milestones).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a MilestoneTable {
    type Item = &'a Milestone;
    type IntoIter = std::slice::Iter<'a, Milestone>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_table_is_sorted() {
        let table = MilestoneTable::recovery();
        assert_eq!(table.len(), 11);
        assert_eq!(table.milestones()[0].hours_offset, 0.33);
        assert_eq!(table.milestones()[10].hours_offset, 131400.0);

        // Passing the built-in entries back through validation must succeed
        let rebuilt = MilestoneTable::new(table.milestones().to_vec()).unwrap();
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = MilestoneTable::new(vec![]).unwrap_err();
        assert!(matches!(err, CalcError::InvalidMilestoneTable(_)));
    }

    #[test]
    fn test_rejects_unsorted_table() {
        let err = MilestoneTable::new(vec![
            Milestone::new("later", 48.0, ""),
            Milestone::new("earlier", 12.0, ""),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn test_rejects_bad_offsets() {
        assert!(MilestoneTable::new(vec![Milestone::new("neg", -1.0, "")]).is_err());
        assert!(MilestoneTable::new(vec![Milestone::new("nan", f64::NAN, "")]).is_err());
    }

    #[test]
    fn test_equal_offsets_allowed() {
        let table = MilestoneTable::new(vec![
            Milestone::new("a", 1.0, ""),
            Milestone::new("b", 1.0, ""),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: MilestoneTable = serde_json::from_str(
            r#"[{"name": "a", "hours_offset": 1.0, "description": "x"}]"#,
        )
        .unwrap();
        assert_eq!(ok.len(), 1);

        let bad = serde_json::from_str::<MilestoneTable>(
            r#"[{"name": "a", "hours_offset": 5.0, "description": ""},
                {"name": "b", "hours_offset": 2.0, "description": ""}]"#,
        );
        assert!(bad.is_err());
    }
}
