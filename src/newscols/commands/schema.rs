use crate::attributes::ATTRIBUTES;
use crate::block::{get_block_type, BLOCK_TYPES};
use crate::commands::{AttributeInfo, CmdResult};
use crate::error::{NewscolsError, Result};

/// The attribute schema, restricted to one block type when `block_name` is given.
pub fn run(block_name: Option<&str>) -> Result<CmdResult> {
    let types = match block_name {
        Some(name) => {
            let block_type =
                get_block_type(name).ok_or_else(|| NewscolsError::UnknownBlockType(name.to_string()))?;
            vec![block_type]
        }
        None => BLOCK_TYPES.iter().collect(),
    };

    let attributes = ATTRIBUTES
        .iter()
        .filter_map(|spec| {
            let block_types: Vec<_> = types
                .iter()
                .filter(|bt| bt.profile.supports(spec))
                .map(|bt| bt.name)
                .collect();
            (!block_types.is_empty()).then(|| AttributeInfo {
                name: spec.name,
                kind: spec.kind.as_str(),
                range: spec.bounds.map(|b| (b.min, b.max)),
                options: spec.options.to_vec(),
                default: spec.default,
                block_types,
            })
        })
        .collect();

    Ok(CmdResult::default().with_attributes(attributes))
}
