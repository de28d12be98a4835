/// Interned item key. Items are names to this layer; the host owns the
/// actual item registry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ItemId(pub u16);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct RecipeId(pub u16);
