//! Spread definitions
//!
//! A spread is a named, ordered set of card positions; the position order is
//! also the draw order. Spreads are plain immutable records built from a few
//! fixed constructors and the template enums in [`patterns`].

use std::fmt;

pub mod patterns;
pub mod result;

pub use patterns::{FourCardPattern, SpreadTemplate, ThreeCardPattern};
pub use result::{SpreadError, SpreadResult};

/// One position within a spread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPosition {
    label: String,
    description: String,
}

impl CardPosition {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }

    /// Short label shown next to the drawn card, e.g. 过去 / 现在 / 未来
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Longer meaning used for interpretation; may be blank
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for CardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A named, ordered set of card positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spread {
    name: String,
    positions: Vec<CardPosition>,
}

impl Spread {
    pub fn new(name: impl Into<String>, positions: Vec<CardPosition>) -> Self {
        Self {
            name: name.into(),
            positions,
        }
    }

    /// Single card reading for open-ended questions
    pub fn single_card() -> Self {
        Self::new(
            "单张牌：主题指引",
            vec![CardPosition::new("主题", "对本次问题或当下状态的整体提示")],
        )
    }

    /// Four cards: you / the other / where the relationship is heading / advice
    pub fn relationship_four_card() -> Self {
        Self::new(
            "四张牌：你 / 对方 / 关系走向 / 建议",
            vec![
                CardPosition::new("你", "你在这段关系中的状态、立场与感受"),
                CardPosition::new("对方", "对方在这段关系中的状态或态度"),
                CardPosition::new("关系走向", "在当前互动模式下，关系可能的发展方向"),
                CardPosition::new("建议", "对你更有帮助的态度和行动模式"),
            ],
        )
    }

    /// Build a spread from a reading template, prefixing the card-count label
    /// (e.g. 三张牌 / 四张牌). A blank prefix uses the template name alone.
    pub fn from_template(prefix: &str, template: &impl SpreadTemplate) -> Self {
        let name = if prefix.trim().is_empty() {
            template.display_name().to_string()
        } else {
            format!("{}：{}", prefix, template.display_name())
        };
        Self::new(name, template.positions())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[CardPosition] {
        &self.positions
    }

    /// Number of cards this spread draws; equals the position count
    pub fn card_count(&self) -> usize {
        self.positions.len()
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The full fixed catalog of known spreads, in a stable order: single card,
/// the relationship four-card spread, every three-card template, every
/// four-card template.
pub fn default_catalog() -> Vec<Spread> {
    let mut catalog = vec![Spread::single_card(), Spread::relationship_four_card()];
    for pattern in ThreeCardPattern::ALL {
        catalog.push(Spread::from_template("三张牌", &pattern));
    }
    for pattern in FourCardPattern::ALL {
        catalog.push(Spread::from_template("四张牌", &pattern));
    }
    catalog
}
