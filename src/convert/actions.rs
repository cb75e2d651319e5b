use crate::catalog::MetadataIndex;
use crate::catalog::keys::{Category, STRESS_SIDE_EFFECT};
use crate::catalog::raw::RawAction;
use crate::error::IResult;
use crate::model::{Action, Difficulty};
use crate::text::TextNormalizer;

/// Resolves a single action id. Actions that stress the pilot are red.
pub fn parse_action(
    id: i64,
    side_effect: Option<&str>,
    metadata: &MetadataIndex,
    text: &dyn TextNormalizer,
) -> IResult<Action> {
    let name = metadata.name(Category::CardActionTypes, id)?;
    let difficulty = if side_effect == Some(STRESS_SIDE_EFFECT) {
        Difficulty::Red
    } else {
        Difficulty::White
    };

    Ok(Action {
        difficulty,
        kind: text.fix_exact_match(name),
        linked: None,
    })
}

pub fn parse_actions(
    available_actions: &[RawAction],
    metadata: &MetadataIndex,
    text: &dyn TextNormalizer,
) -> IResult<Vec<Action>> {
    available_actions
        .iter()
        .map(|raw| {
            let mut action = parse_action(
                raw.base_action_id,
                raw.base_action_side_effect.as_deref(),
                metadata,
                text,
            )?;

            // The API uses both null and 0 for "no linked action".
            if let Some(related_id) = raw.related_action_id.filter(|id| *id != 0) {
                action.linked = Some(Box::new(parse_action(
                    related_id,
                    raw.related_action_side_effect.as_deref(),
                    metadata,
                    text,
                )?));
            }

            Ok(action)
        })
        .collect()
}
