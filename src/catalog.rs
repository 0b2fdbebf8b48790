//! Dimension catalog: the versioned item bank an assessment runs against.
//!
//! A catalog is an ordered list of bipolar dimensions, each measured by an
//! ordered list of Likert items. Items are addressed two ways:
//!
//! - locally, as `(dimension index, item index)`;
//! - globally, by concatenating every dimension's items in catalog order.
//!
//! The global index is what the response store and the session cursor work
//! with; [`Catalog::locate`] and [`Catalog::global_index`] convert between
//! the two addressings (a bijection).
//!
//! Catalogs are immutable once constructed and are plain configuration:
//! they can be loaded from TOML or JSON documents, so item-bank revisions
//! ship as data, not code. [`culture_map`] returns the built-in bank.

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

// =============================================================================
// Scale
// =============================================================================

/// Inclusive ordinal response scale, `min..=max`.
///
/// Reversed items are reflected through the scale as `(min + max) - value`,
/// which on the default 1..=7 scale is `8 - value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertScale {
    #[serde(default = "default_scale_min")]
    pub min: u8,
    #[serde(default = "default_scale_max")]
    pub max: u8,
}

fn default_scale_min() -> u8 {
    1
}

fn default_scale_max() -> u8 {
    7
}

impl Default for LikertScale {
    fn default() -> Self {
        Self { min: 1, max: 7 }
    }
}

impl LikertScale {
    /// Whether `value` falls on the scale.
    pub fn contains(&self, value: u8) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reflect a value through the scale: `(min + max) - value`.
    ///
    /// `reflect(reflect(v)) == v`, and the midpoint is a fixed point.
    pub fn reflect(&self, value: u8) -> u8 {
        self.min + self.max - value
    }

    /// Scale midpoint (4.0 on the default scale).
    pub fn midpoint(&self) -> f64 {
        f64::from(self.min) / 2.0 + f64::from(self.max) / 2.0
    }

    fn validate(&self) -> Result<(), AssessmentError> {
        if self.min >= self.max {
            return Err(AssessmentError::invalid_catalog(format!(
                "scale min {} must be below max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Items and dimensions
// =============================================================================

/// Whether an item's raw score aligns with (`Normal`) or opposes
/// (`Reversed`) the dimension's high-pole direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Normal,
    Reversed,
}

/// A single rated statement.
#[derive(Debug, Clone)]
pub struct Item {
    /// Statement shown to the respondent.
    pub text: String,
    /// Scoring direction relative to the dimension's high pole.
    pub polarity: Polarity,
}

impl Item {
    /// An item keyed toward the high pole.
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            polarity: Polarity::Normal,
        }
    }

    /// A reverse-keyed item: agreement indicates the low pole.
    pub fn reversed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            polarity: Polarity::Reversed,
        }
    }
}

/// One bipolar trait scale measured by several items.
#[derive(Debug, Clone)]
pub struct Dimension {
    /// Unique identifier within the catalog.
    pub name: String,
    /// Label of the low pole (scores near `scale.min`).
    pub low_label: String,
    /// Label of the high pole (scores near `scale.max`).
    pub high_label: String,
    /// Ordered items. Never empty.
    pub items: Vec<Item>,
}

impl Dimension {
    pub fn new(
        name: impl Into<String>,
        low_label: impl Into<String>,
        high_label: impl Into<String>,
        items: Vec<Item>,
    ) -> Self {
        Self {
            name: name.into(),
            low_label: low_label.into(),
            high_label: high_label.into(),
            items,
        }
    }
}

/// An item resolved from its global index.
#[derive(Debug, Clone, Copy)]
pub struct LocatedItem<'a> {
    pub dimension: &'a Dimension,
    pub item: &'a Item,
    pub dimension_index: usize,
    pub item_index: usize,
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable, validated item bank.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: u32,
    scale: LikertScale,
    dimensions: Vec<Dimension>,
    /// Global index of each dimension's first item.
    offsets: Vec<usize>,
    total_items: usize,
}

impl Catalog {
    /// Build and validate a catalog.
    ///
    /// Rejects an empty dimension list, duplicate dimension names, a
    /// dimension with no items, and a degenerate scale.
    pub fn new(
        version: u32,
        scale: LikertScale,
        dimensions: Vec<Dimension>,
    ) -> Result<Self, AssessmentError> {
        scale.validate()?;
        if dimensions.is_empty() {
            return Err(AssessmentError::invalid_catalog(
                "catalog has no dimensions",
            ));
        }

        let mut offsets = Vec::with_capacity(dimensions.len());
        let mut total_items = 0usize;
        for (i, dim) in dimensions.iter().enumerate() {
            if dim.name.is_empty() {
                return Err(AssessmentError::invalid_catalog(format!(
                    "dimension {i} has an empty name"
                )));
            }
            if dim.items.is_empty() {
                return Err(AssessmentError::invalid_catalog(format!(
                    "dimension '{}' has no items",
                    dim.name
                )));
            }
            if dimensions[..i].iter().any(|d| d.name == dim.name) {
                return Err(AssessmentError::invalid_catalog(format!(
                    "duplicate dimension name '{}'",
                    dim.name
                )));
            }
            offsets.push(total_items);
            total_items += dim.items.len();
        }

        Ok(Self {
            version,
            scale,
            dimensions,
            offsets,
            total_items,
        })
    }

    /// Parse a catalog from a TOML document.
    pub fn from_toml_str(doc: &str) -> Result<Self, AssessmentError> {
        let spec: CatalogSpec =
            toml::from_str(doc).map_err(|e| AssessmentError::parse(e.to_string()))?;
        spec.into_catalog()
    }

    /// Parse a catalog from a JSON document.
    pub fn from_json_str(doc: &str) -> Result<Self, AssessmentError> {
        let spec: CatalogSpec =
            serde_json::from_str(doc).map_err(|e| AssessmentError::parse(e.to_string()))?;
        spec.into_catalog()
    }

    /// Item-bank revision this catalog was built from.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn scale(&self) -> LikertScale {
        self.scale
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Sum of all dimensions' item counts.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Resolve a global item index to its dimension and item.
    pub fn locate(&self, index: usize) -> Option<LocatedItem<'_>> {
        if index >= self.total_items {
            return None;
        }
        // offsets is sorted; find the last dimension starting at or before index.
        let dimension_index = match self.offsets.binary_search(&index) {
            Ok(d) => d,
            Err(next) => next - 1,
        };
        let item_index = index - self.offsets[dimension_index];
        let dimension = &self.dimensions[dimension_index];
        Some(LocatedItem {
            dimension,
            item: &dimension.items[item_index],
            dimension_index,
            item_index,
        })
    }

    /// Inverse of [`Catalog::locate`]: global index of `(dimension, item)`.
    pub fn global_index(&self, dimension_index: usize, item_index: usize) -> Option<usize> {
        let dim = self.dimensions.get(dimension_index)?;
        if item_index >= dim.items.len() {
            return None;
        }
        Some(self.offsets[dimension_index] + item_index)
    }

    /// Iterate all items in global order with their location.
    pub fn iter_items(&self) -> impl Iterator<Item = (usize, LocatedItem<'_>)> {
        self.dimensions
            .iter()
            .enumerate()
            .flat_map(move |(dimension_index, dimension)| {
                let offset = self.offsets[dimension_index];
                dimension
                    .items
                    .iter()
                    .enumerate()
                    .map(move |(item_index, item)| {
                        (
                            offset + item_index,
                            LocatedItem {
                                dimension,
                                item,
                                dimension_index,
                                item_index,
                            },
                        )
                    })
            })
    }
}

// =============================================================================
// Serialized form
// =============================================================================

/// On-disk catalog document.
///
/// Items are records with an explicit `reversed` flag defaulting to false;
/// a bare-string item shape is deliberately not accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSpec {
    pub version: u32,
    #[serde(default)]
    pub scale: LikertScale,
    pub dimensions: Vec<DimensionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    pub low_label: String,
    pub high_label: String,
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub text: String,
    #[serde(default)]
    pub reversed: bool,
}

impl CatalogSpec {
    /// Validate into a [`Catalog`].
    pub fn into_catalog(self) -> Result<Catalog, AssessmentError> {
        let dimensions = self
            .dimensions
            .into_iter()
            .map(|d| {
                let items = d
                    .items
                    .into_iter()
                    .map(|it| {
                        if it.reversed {
                            Item::reversed(it.text)
                        } else {
                            Item::normal(it.text)
                        }
                    })
                    .collect();
                Dimension::new(d.name, d.low_label, d.high_label, items)
            })
            .collect();
        Catalog::new(self.version, self.scale, dimensions)
    }
}

// =============================================================================
// Built-in item bank
// =============================================================================

/// The built-in eight-dimension culture-style item bank (revision 3).
///
/// Most items are worded toward the low pole of their scale, so agreement
/// opposes the high-pole direction and the item is reverse-keyed. Trusting
/// keeps its first item forward-keyed, matching the shipped revision.
pub fn culture_map() -> Catalog {
    let dimensions = vec![
        Dimension::new(
            "Communicating",
            "Low-Context",
            "High-Context",
            vec![
                Item::reversed(
                    "I strive to communicate simply, clearly, and explicitly. I avoid \
                     reading (and speaking) between the lines.",
                ),
                Item::reversed(
                    "The most effective presenters spell out what they're going to tell \
                     you, then tell you, and then summarize what they've told you, to \
                     ensure that the communication is crystal clear.",
                ),
                Item::reversed(
                    "After a meeting or a phone call, it is important to recap in writing \
                     exactly what was said, to prevent misunderstanding or confusion.",
                ),
            ],
        ),
        Dimension::new(
            "Evaluating",
            "Direct Negative Feedback",
            "Indirect Negative Feedback",
            vec![
                Item::reversed(
                    "If I've done poor work, I prefer to be told bluntly rather than \
                     gently or diplomatically.",
                ),
                Item::reversed(
                    "When I give negative feedback I pay more attention to the clarity of \
                     my criticism than how the person feels receiving the message.",
                ),
                Item::reversed(
                    "I prefer to give negative feedback immediately and all at once rather \
                     than little by little, building the picture up over time.",
                ),
            ],
        ),
        Dimension::new(
            "Persuading",
            "Principles-First",
            "Applications-First",
            vec![
                Item::reversed(
                    "A good presenter influences by first explaining and validating the \
                     concepts and principles behind the point before coming to practical \
                     examples and next steps.",
                ),
                Item::reversed(
                    "Presenters who arrive quickly to outcomes, conclusions and next steps \
                     without spending time explaining theory and concepts first are less \
                     engaging to me.",
                ),
                Item::reversed(
                    "Before making a business decision it is important to spend ample time \
                     on conceptual debate.",
                ),
            ],
        ),
        Dimension::new(
            "Leading",
            "Egalitarian",
            "Hierarchical",
            vec![
                Item::reversed(
                    "If I don't agree with the senior leaders in the room, I feel \
                     comfortable speaking up.",
                ),
                Item::reversed(
                    "When meeting with other teams, I don't pay too much attention to the \
                     hierarchical position of the people attending the meeting.",
                ),
                Item::reversed(
                    "If I have ideas to share with someone several levels above or below \
                     me in the company, I will speak to that person directly rather than \
                     passing through my boss.",
                ),
            ],
        ),
        Dimension::new(
            "Deciding",
            "Consensual",
            "Top-Down",
            vec![
                Item::reversed(
                    "Even if it takes a long time, it is better to involve all \
                     stakeholders in the decision-making process.",
                ),
                Item::reversed(
                    "Consensus-building ultimately leads to better decisions and stronger \
                     buy-in.",
                ),
                Item::reversed(
                    "If my boss makes a unilateral decision I disagree with, I find it \
                     difficult to follow the decision.",
                ),
            ],
        ),
        Dimension::new(
            "Trusting",
            "Task-Based",
            "Relationship-Based",
            vec![
                Item::normal(
                    "It is better not to get too emotionally close to those you work with.",
                ),
                Item::reversed(
                    "I rarely devote time to socializing with colleagues, during which we \
                     don't discuss work but just get to know each other.",
                ),
                Item::reversed(
                    "If a colleague is reliable and hardworking, I tend to trust them even \
                     if I don't know them well on a personal level.",
                ),
            ],
        ),
        Dimension::new(
            "Disagreeing",
            "Confrontational",
            "Avoids Confrontation",
            vec![
                Item::reversed(
                    "Expressing open disagreement with other team members frequently is \
                     likely to have a positive impact on a team's success.",
                ),
                Item::reversed(
                    "When I disagree strongly with a point made by a colleague making a \
                     presentation I am comfortable expressing my disagreement.",
                ),
                Item::reversed(
                    "Open debate, where team members confront one another's ideas and \
                     opinions, is healthy even if it is received negatively by some.",
                ),
            ],
        ),
        Dimension::new(
            "Scheduling",
            "Linear-Time",
            "Flexible-Time",
            vec![
                Item::reversed(
                    "In order to show professionalism it is more important to be organized \
                     and structured than flexible and reactive.",
                ),
                Item::reversed(
                    "If I have a meeting at 9:00, that's when I will arrive, not 5 or 15 \
                     minutes later.",
                ),
                Item::reversed(
                    "A meeting agenda should be followed as closely as possible; it should \
                     not be altered just because the group wants to take the discussion in \
                     a different direction.",
                ),
            ],
        ),
    ];

    Catalog::new(3, LikertScale::default(), dimensions).expect("built-in item bank is valid")
}
