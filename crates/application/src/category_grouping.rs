use std::collections::BTreeMap;

use ipa_domain::Feature;

/// Groups features by category label for display.
///
/// Categories are keyed alphabetically; features inside a category keep the
/// order they had in `features`.
#[must_use]
pub fn group_by_category<'a>(
    features: impl IntoIterator<Item = &'a Feature>,
) -> BTreeMap<String, Vec<Feature>> {
    let mut grouped: BTreeMap<String, Vec<Feature>> = BTreeMap::new();
    for feature in features {
        grouped
            .entry(feature.category().to_owned())
            .or_default()
            .push(feature.clone());
    }

    grouped
}
