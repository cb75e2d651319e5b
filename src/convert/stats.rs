use crate::catalog::MetadataIndex;
use crate::catalog::keys::Category;
use crate::catalog::raw::RawStatistic;
use crate::error::{ErrorKind, IResult};
use crate::model::{Charges, Force, Stat};
use crate::text::TextNormalizer;

/// A card's statistics split into the ship stat line and its resource pools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStats {
    /// Attack, agility, hull and shield values in card order.
    pub stats: Vec<Stat>,
    pub charges: Option<Charges>,
    pub force: Option<Force>,
}

pub fn parse_stats(
    statistics: &[RawStatistic],
    force_side: Option<i64>,
    metadata: &MetadataIndex,
    text: &dyn TextNormalizer,
) -> IResult<ParsedStats> {
    let mut parsed = ParsedStats::default();

    for statistic in statistics {
        let record = metadata.statistic(statistic.statistic_id)?;
        let value = statistic.value.parse_int()?;
        let recovers = u8::from(statistic.recurring);

        if record.is_attack() {
            parsed.stats.push(Stat::Attack {
                value,
                arc: text.fix_exact_match(&record.name().replace(' ', "")),
            });
            continue;
        }

        match record.name() {
            "Agility" => parsed.stats.push(Stat::Agility { value }),
            "Hull" => parsed.stats.push(Stat::Hull { value }),
            "Shields" => parsed.stats.push(Stat::Shields { value }),
            // Only one of each pool is expected per card; the last one wins.
            "Charge" => parsed.charges = Some(Charges { value, recovers }),
            "Force" => {
                let side_id = force_side.ok_or(ErrorKind::MissingField("force_side"))?;
                let side = metadata
                    .name(Category::ForceAffiliation, side_id)?
                    .to_lowercase();
                parsed.force = Some(Force {
                    value,
                    recovers,
                    side: vec![side],
                });
            }
            other => return Err(ErrorKind::UnknownStatistic(other.to_string())),
        }
    }

    Ok(parsed)
}
