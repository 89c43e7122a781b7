//! # Tile Catalog
//!
//! **Immutable table of tiles and their edge connectors**
//!
//! Every tile has four edge labels in `[top, right, bottom, left]` order.
//! Two tiles may sit next to each other when the edges that touch are
//! compatible under the catalog's [`EdgeRule`]. The rule is chosen once per
//! catalog and applied to every adjacency in both directions.
//!
//! The catalog precomputes a dense adjacency table when it is built, so the
//! solver's hot path never compares strings.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut builder = CatalogBuilder::new(EdgeRule::Exact);
//! let edges = ["bbb", "aaa", "aaa", "aaa"].map(EdgeLabel::from);
//! let shore = builder.add_tile(TileSpec::new(1, edges))?;
//! let shore_east = builder.rotate(shore)?;
//! let catalog = builder.build()?;
//!
//! assert!(!catalog.compatible(shore, Direction::Up, shore_east));
//! ```

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{WaveError, WaveResult};

/// Unique identifier for a tile.
pub type TileId = u32;

/// A symbolic edge connector (socket) label such as `"aaa"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeLabel(String);

impl EdgeLabel {
    /// Creates a new edge label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the label with its characters in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.chars().rev().collect())
    }
}

impl From<&str> for EdgeLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// How two touching edge labels are judged compatible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRule {
    /// Labels must be identical.
    #[default]
    Exact,
    /// One label must equal the other read backwards, as when both edges
    /// are read clockwise around their own tile.
    Reversed,
}

impl EdgeRule {
    /// Checks two touching edges. Symmetric in its arguments for every rule.
    #[must_use]
    pub fn matches(self, a: &EdgeLabel, b: &EdgeLabel) -> bool {
        match self {
            Self::Exact => a == b,
            Self::Reversed => a.0.chars().eq(b.0.chars().rev()),
        }
    }
}

/// A catalog entry: a tile and its four edge connectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSpec {
    id: TileId,
    edges: [EdgeLabel; 4],
    sprite: Option<String>,
    quarter_turns: u8,
}

impl TileSpec {
    /// Creates a tile with edges in `[top, right, bottom, left]` order.
    #[must_use]
    pub fn new(id: TileId, edges: [EdgeLabel; 4]) -> Self {
        Self {
            id,
            edges,
            sprite: None,
            quarter_turns: 0,
        }
    }

    /// Sets the sprite name a renderer should draw for this tile.
    #[must_use]
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    /// The tile identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// All four edges, `[top, right, bottom, left]`.
    #[inline]
    #[must_use]
    pub const fn edges(&self) -> &[EdgeLabel; 4] {
        &self.edges
    }

    /// The edge facing `direction`.
    #[inline]
    #[must_use]
    pub const fn edge(&self, direction: Direction) -> &EdgeLabel {
        &self.edges[direction.index()]
    }

    /// Sprite name, if the tile has one.
    #[must_use]
    pub fn sprite(&self) -> Option<&str> {
        self.sprite.as_deref()
    }

    /// Clockwise quarter turns applied to the sprite, 0..4.
    #[inline]
    #[must_use]
    pub const fn quarter_turns(&self) -> u8 {
        self.quarter_turns
    }

    /// Derives a 90° rotated variant under a new id.
    ///
    /// Edges shift one position: top takes the old left, right takes the old
    /// top, bottom takes the old right, left takes the old bottom.
    #[must_use]
    pub fn rotated(&self, id: TileId) -> Self {
        let [top, right, bottom, left] = self.edges.clone();
        Self {
            id,
            edges: [left, top, right, bottom],
            sprite: self.sprite.clone(),
            quarter_turns: (self.quarter_turns + 1) % 4,
        }
    }
}

/// Collects tiles and rotation derivations, then freezes them into a [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    rule: EdgeRule,
    tiles: Vec<TileSpec>,
}

impl CatalogBuilder {
    /// Creates an empty builder using `rule` for every adjacency.
    #[must_use]
    pub fn new(rule: EdgeRule) -> Self {
        Self {
            rule,
            tiles: Vec::new(),
        }
    }

    /// Adds an explicitly specified tile.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the id is already taken or an edge label is empty.
    pub fn add_tile(&mut self, tile: TileSpec) -> WaveResult<TileId> {
        if self.get(tile.id).is_some() {
            return Err(WaveError::InvalidConfig(format!(
                "Tile ID {} already exists",
                tile.id
            )));
        }
        if tile.edges.iter().any(|edge| edge.as_str().is_empty()) {
            return Err(WaveError::InvalidConfig(format!(
                "Tile {} has an empty edge label",
                tile.id
            )));
        }

        let id = tile.id;
        self.tiles.push(tile);
        Ok(id)
    }

    /// Adds `base` rotated by `turns` quarter turns under an explicit id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTile` if `base` has not been added yet, or
    /// `InvalidConfig` if `id` is already taken.
    pub fn add_rotation(&mut self, id: TileId, base: TileId, turns: u8) -> WaveResult<TileId> {
        let mut tile = self.get(base).ok_or(WaveError::UnknownTile(base))?.clone();
        for _ in 0..turns % 4 {
            tile = tile.rotated(id);
        }
        tile.id = id;
        self.add_tile(tile)
    }

    /// Adds `base` rotated one quarter turn under a fresh id (highest id + 1).
    ///
    /// # Errors
    ///
    /// Returns `UnknownTile` if `base` has not been added yet, or
    /// `InvalidConfig` if the highest id is already `TileId::MAX`.
    pub fn rotate(&mut self, base: TileId) -> WaveResult<TileId> {
        let id = self.fresh_id()?;
        self.add_rotation(id, base, 1)
    }

    /// Freezes the tiles and precomputes the adjacency table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if no tiles were added.
    pub fn build(mut self) -> WaveResult<Catalog> {
        if self.tiles.is_empty() {
            return Err(WaveError::InvalidConfig(
                "Catalog must contain at least one tile".to_string(),
            ));
        }

        self.tiles.sort_by_key(TileSpec::id);
        let adjacency = adjacency_table(&self.tiles, self.rule);

        tracing::info!(
            "Tile catalog built: {} tiles, {:?} edge rule",
            self.tiles.len(),
            self.rule
        );

        Ok(Catalog {
            tiles: self.tiles,
            rule: self.rule,
            adjacency,
        })
    }

    fn get(&self, id: TileId) -> Option<&TileSpec> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    fn fresh_id(&self) -> WaveResult<TileId> {
        match self.tiles.iter().map(TileSpec::id).max() {
            None => Ok(0),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                WaveError::InvalidConfig(format!("No tile ID left above {max}"))
            }),
        }
    }
}

/// `table[(from * 4 + direction) * n + to]` is true when `to` may sit on the
/// `direction` side of `from`.
fn adjacency_table(tiles: &[TileSpec], rule: EdgeRule) -> Vec<bool> {
    let n = tiles.len();
    let mut table = vec![false; n * 4 * n];
    for (from_idx, from) in tiles.iter().enumerate() {
        for direction in Direction::ALL {
            let facing = from.edge(direction);
            for (to_idx, to) in tiles.iter().enumerate() {
                table[(from_idx * 4 + direction.index()) * n + to_idx] =
                    rule.matches(facing, to.edge(direction.opposite()));
            }
        }
    }
    table
}

/// The immutable tile table shared by every grid of a generation run.
///
/// Cells refer to tiles by [`TileId`] only.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Tiles sorted by id.
    tiles: Vec<TileSpec>,
    rule: EdgeRule,
    adjacency: Vec<bool>,
}

impl Catalog {
    /// Looks up a tile by id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTile` if the id is not in the catalog.
    pub fn lookup(&self, id: TileId) -> WaveResult<&TileSpec> {
        self.position(id)
            .map(|idx| &self.tiles[idx])
            .ok_or(WaveError::UnknownTile(id))
    }

    /// Returns whether the id is in the catalog.
    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.position(id).is_some()
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns whether the catalog has no tiles. Never true once built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles, ordered by id.
    #[must_use]
    pub fn tiles(&self) -> &[TileSpec] {
        &self.tiles
    }

    /// All tile ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().map(TileSpec::id)
    }

    /// The edge rule used by every adjacency check.
    #[must_use]
    pub const fn rule(&self) -> EdgeRule {
        self.rule
    }

    /// True if tile `to` may be placed on the `direction` side of tile `from`.
    ///
    /// Unknown ids are never compatible.
    #[must_use]
    pub fn compatible(&self, from: TileId, direction: Direction, to: TileId) -> bool {
        match (self.position(from), self.position(to)) {
            (Some(from_idx), Some(to_idx)) => {
                let n = self.tiles.len();
                self.adjacency[(from_idx * 4 + direction.index()) * n + to_idx]
            }
            _ => false,
        }
    }

    fn position(&self, id: TileId) -> Option<usize> {
        self.tiles.binary_search_by_key(&id, TileSpec::id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(labels: [&str; 4]) -> [EdgeLabel; 4] {
        labels.map(EdgeLabel::from)
    }

    fn create_test_catalog(rule: EdgeRule) -> Catalog {
        let mut builder = CatalogBuilder::new(rule);
        builder
            .add_tile(TileSpec::new(1, edges(["bbb", "aaa", "aaa", "aaa"])).with_sprite("4"))
            .unwrap();
        builder
            .add_tile(TileSpec::new(2, edges(["abc", "xyz", "cba", "zyx"])))
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let catalog = create_test_catalog(EdgeRule::Exact);
        assert_eq!(catalog.lookup(1).unwrap().sprite(), Some("4"));
        assert_eq!(catalog.lookup(99), Err(WaveError::UnknownTile(99)));
        assert!(catalog.contains(2));
        assert!(!catalog.contains(3));
    }

    #[test]
    fn test_rotation_shifts_edges_clockwise() {
        let tile = TileSpec::new(1, edges(["t", "r", "b", "l"]));
        let turned = tile.rotated(7);
        assert_eq!(turned.id(), 7);
        assert_eq!(turned.edges(), &edges(["l", "t", "r", "b"]));
        assert_eq!(turned.quarter_turns(), 1);
    }

    #[test]
    fn test_builder_rotate_assigns_fresh_id() {
        let mut builder = CatalogBuilder::new(EdgeRule::Exact);
        builder
            .add_tile(TileSpec::new(5, edges(["bbb", "aaa", "aaa", "aaa"])))
            .unwrap();
        let turned = builder.rotate(5).unwrap();
        assert_eq!(turned, 6);
        let again = builder.rotate(turned).unwrap();
        assert_eq!(again, 7);

        let catalog = builder.build().unwrap();
        assert_eq!(catalog.lookup(6).unwrap().edges(), &edges(["aaa", "bbb", "aaa", "aaa"]));
        assert_eq!(catalog.lookup(7).unwrap().edges(), &edges(["aaa", "aaa", "bbb", "aaa"]));
        assert_eq!(catalog.lookup(7).unwrap().quarter_turns(), 2);
    }

    #[test]
    fn test_rotate_at_max_id_is_rejected() {
        let mut builder = CatalogBuilder::new(EdgeRule::Exact);
        builder
            .add_tile(TileSpec::new(TileId::MAX, edges(["bbb", "aaa", "aaa", "aaa"])))
            .unwrap();
        assert!(matches!(
            builder.rotate(TileId::MAX),
            Err(WaveError::InvalidConfig(_))
        ));

        // Nothing was added, and an explicit id still works.
        assert_eq!(builder.add_rotation(0, TileId::MAX, 1), Ok(0));
        assert_eq!(builder.build().unwrap().len(), 2);
    }

    #[test]
    fn test_rotation_of_unknown_base_fails() {
        let mut builder = CatalogBuilder::new(EdgeRule::Exact);
        assert_eq!(builder.rotate(4), Err(WaveError::UnknownTile(4)));
        assert_eq!(builder.add_rotation(1, 4, 2), Err(WaveError::UnknownTile(4)));
    }

    #[test]
    fn test_duplicate_and_empty_tiles_rejected() {
        let mut builder = CatalogBuilder::new(EdgeRule::Exact);
        builder
            .add_tile(TileSpec::new(1, edges(["a", "a", "a", "a"])))
            .unwrap();
        assert!(matches!(
            builder.add_tile(TileSpec::new(1, edges(["b", "b", "b", "b"]))),
            Err(WaveError::InvalidConfig(_))
        ));
        assert!(matches!(
            builder.add_tile(TileSpec::new(2, edges(["b", "", "b", "b"]))),
            Err(WaveError::InvalidConfig(_))
        ));
        assert!(matches!(
            CatalogBuilder::new(EdgeRule::Exact).build(),
            Err(WaveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_exact_rule_adjacency() {
        let catalog = create_test_catalog(EdgeRule::Exact);
        // Tile 1 right "aaa" meets tile 1 left "aaa".
        assert!(catalog.compatible(1, Direction::Right, 1));
        // Tile 1 top "bbb" against tile 1 bottom "aaa".
        assert!(!catalog.compatible(1, Direction::Up, 1));
        assert!(!catalog.compatible(1, Direction::Right, 2));
        assert!(!catalog.compatible(1, Direction::Right, 42));
    }

    #[test]
    fn test_reversed_rule_adjacency() {
        let catalog = create_test_catalog(EdgeRule::Reversed);
        // Tile 2 bottom "cba" reversed is "abc", its own top.
        assert!(catalog.compatible(2, Direction::Down, 2));
        assert!(catalog.compatible(2, Direction::Up, 2));
        // Tile 2 right "xyz" reversed is "zyx", its own left.
        assert!(catalog.compatible(2, Direction::Right, 2));
        // Palindromes behave the same under both rules.
        assert!(catalog.compatible(1, Direction::Left, 1));
    }

    #[test]
    fn test_rules_are_symmetric() {
        let labels = ["aaa", "abc", "cba", "ab", "ba", "a"].map(EdgeLabel::from);
        for rule in [EdgeRule::Exact, EdgeRule::Reversed] {
            for a in &labels {
                for b in &labels {
                    assert_eq!(rule.matches(a, b), rule.matches(b, a), "{rule:?} {a:?} {b:?}");
                }
            }
        }
        assert_eq!(EdgeLabel::from("abc").reversed(), EdgeLabel::from("cba"));
    }
}
