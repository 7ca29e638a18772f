pub mod entity_id;
pub mod json_body;

pub use entity_id::EntityId;
pub use json_body::JsonBody;
