use std::collections::BTreeMap;

pub type LabelName = String;

pub type LabelValue = String;

// A BTreeMap keeps the label set in a sorted canonical order, so equality,
// ordering, and formatting never depend on the order labels appeared in the
// input text.
pub type Labels = BTreeMap<LabelName, LabelValue>;

pub trait LabelsTrait {
    fn to_pairs(&self) -> Vec<(LabelName, LabelValue)>;
}

impl LabelsTrait for Labels {
    fn to_pairs(&self) -> Vec<(LabelName, LabelValue)> {
        self.iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}
