use crate::catalog::MetadataIndex;
use crate::catalog::keys::{Category, SPECIAL_SLOT_ID};
use crate::error::IResult;

/// Resolves upgrade type ids to slot names, dropping the "Special" pseudo-slot.
pub fn parse_slots(available_upgrades: &[i64], metadata: &MetadataIndex) -> IResult<Vec<String>> {
    available_upgrades
        .iter()
        .filter(|id| **id != SPECIAL_SLOT_ID)
        .map(|id| {
            metadata
                .name(Category::UpgradeTypes, *id)
                .map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::convert::fixtures;
    use crate::error::ErrorKind;

    #[test]
    fn drops_only_the_special_sentinel() {
        let metadata = fixtures::metadata();
        let input = [999, 1, 10, 999, 2, 10];

        let slots = parse_slots(&input, &metadata).unwrap();

        let sentinels = input.iter().filter(|id| **id == SPECIAL_SLOT_ID).count();
        assert_eq!(slots.len(), input.len() - sentinels);
        assert_eq!(slots, ["Talent", "Torpedo", "Astromech", "Torpedo"]);
    }

    #[test]
    fn unknown_slot_is_fatal() {
        let metadata = fixtures::metadata();
        assert!(matches!(
            parse_slots(&[10, 55], &metadata),
            Err(ErrorKind::MissingMetadata {
                category: Category::UpgradeTypes,
                id: 55
            })
        ));
    }
}
