/// Semantic role annotation for assistive tooling and tests.
///
/// Roles never affect layout or painting; they describe what an element
/// *is* so that interaction code and tests can reason about intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A dialog surface layered above the main content.
    Dialog,
    /// An activatable control.
    Button,
    /// One choice in a mutually exclusive group.
    Radio,
    /// A container grouping related controls.
    Group,
}
