//! Document-store collection names.

pub const PLACE: &str = "Place";
pub const PLACE_IS_PART_OF_PLACE: &str = "PlaceIsPartOfPlace";
pub const IS_LOCATED_IN_PLACE: &str = "IsLocatedInPlace";
pub const POST: &str = "Post";
pub const FORUM_CONTAINER_POST: &str = "ForumContainerPost";
pub const ORGANISATION: &str = "Organisation";
