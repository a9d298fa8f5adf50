//! Connection legality rules.
//!
//! Only entity-to-attribute and entity-to-relationship edges are legal, in
//! either direction. The reason text is what the user sees.

use crate::types::ElementType;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectionRejection {
    #[error("Entities cannot connect directly to other entities")]
    EntityToEntity,
    #[error("Attributes can only connect to entities")]
    AttributeToNonEntity,
    #[error("Relationships can only connect to entities")]
    RelationshipToNonEntity,
}

/// Check whether an edge between the two element types is allowed.
pub fn check_connection(from: ElementType, to: ElementType) -> Result<(), ConnectionRejection> {
    use ElementType::*;

    match (from, to) {
        (Entity, Entity) => Err(ConnectionRejection::EntityToEntity),
        (Attribute, other) | (other, Attribute) if other != Entity => {
            Err(ConnectionRejection::AttributeToNonEntity)
        }
        (Relationship, other) | (other, Relationship) if other != Entity => {
            Err(ConnectionRejection::RelationshipToNonEntity)
        }
        _ => Ok(()),
    }
}

pub fn can_connect(from: ElementType, to: ElementType) -> bool {
    check_connection(from, to).is_ok()
}
