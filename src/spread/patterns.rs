//! Reading templates
//!
//! Closed sets of position-meaning configurations. A template does not draw
//! cards by itself; it is combined with a card-count prefix through
//! [`Spread::from_template`](super::Spread::from_template).

use super::CardPosition;

/// A named configuration of position meanings
pub trait SpreadTemplate {
    /// Display name, e.g. 过去 / 现在 / 未来
    fn display_name(&self) -> &'static str;

    /// Position definitions, in draw and reading order
    fn positions(&self) -> Vec<CardPosition>;
}

/// Standard three-card reading templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreeCardPattern {
    PastPresentFuture,
    SituationObstacleAdvice,
    YouRelationshipOther,
}

impl ThreeCardPattern {
    pub const ALL: [ThreeCardPattern; 3] = [
        ThreeCardPattern::PastPresentFuture,
        ThreeCardPattern::SituationObstacleAdvice,
        ThreeCardPattern::YouRelationshipOther,
    ];
}

impl SpreadTemplate for ThreeCardPattern {
    fn display_name(&self) -> &'static str {
        match self {
            ThreeCardPattern::PastPresentFuture => "过去 / 现在 / 未来",
            ThreeCardPattern::SituationObstacleAdvice => "现状 / 困境 / 建议",
            ThreeCardPattern::YouRelationshipOther => "你 / 关系 / 对方",
        }
    }

    fn positions(&self) -> Vec<CardPosition> {
        match self {
            ThreeCardPattern::PastPresentFuture => vec![
                CardPosition::new("过去", "影响当前问题的过去经历与背景"),
                CardPosition::new("现在", "当前正在发生的情况与核心问题"),
                CardPosition::new("未来", "在当前轨迹下可能的发展趋势"),
            ],
            ThreeCardPattern::SituationObstacleAdvice => vec![
                CardPosition::new("现状", "你当前所处的状态和客观情况"),
                CardPosition::new("困境", "阻碍、矛盾、压力或需要看见的问题"),
                CardPosition::new("建议", "对你更有帮助的态度、方向或行动建议"),
            ],
            ThreeCardPattern::YouRelationshipOther => vec![
                CardPosition::new("你", "你在这段关系中的状态、立场与感受"),
                CardPosition::new("关系", "当前互动模式与关系氛围"),
                CardPosition::new("对方", "对方当前的状态、立场或倾向"),
            ],
        }
    }
}

/// Standard four-card reading templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourCardPattern {
    YouOtherRelationshipAdvice,
    SituationObstacleHelpAdvice,
    ProblemCauseSolutionOutcome,
    InnerOuterBlockAdvice,
    TimeLine,
    FireWaterAirEarth,
}

impl FourCardPattern {
    pub const ALL: [FourCardPattern; 6] = [
        FourCardPattern::YouOtherRelationshipAdvice,
        FourCardPattern::SituationObstacleHelpAdvice,
        FourCardPattern::ProblemCauseSolutionOutcome,
        FourCardPattern::InnerOuterBlockAdvice,
        FourCardPattern::TimeLine,
        FourCardPattern::FireWaterAirEarth,
    ];
}

impl SpreadTemplate for FourCardPattern {
    fn display_name(&self) -> &'static str {
        match self {
            FourCardPattern::YouOtherRelationshipAdvice => "你 / 对方 / 关系 / 建议",
            FourCardPattern::SituationObstacleHelpAdvice => "现状 / 阻碍 / 助力 / 建议",
            FourCardPattern::ProblemCauseSolutionOutcome => "问题 / 成因 / 解决方案 / 结果",
            FourCardPattern::InnerOuterBlockAdvice => "内在 / 外在 / 阻碍 / 建议",
            FourCardPattern::TimeLine => "过去 / 现在 / 未来 / 建议",
            FourCardPattern::FireWaterAirEarth => "火 / 水 / 风 / 土",
        }
    }

    fn positions(&self) -> Vec<CardPosition> {
        match self {
            FourCardPattern::YouOtherRelationshipAdvice => vec![
                CardPosition::new("你", "你在这段关系中的感受、状态与立场"),
                CardPosition::new("对方", "对方的感受、态度或潜在倾向"),
                CardPosition::new("关系", "当前关系的氛围、互动模式或核心议题"),
                CardPosition::new("建议", "这段关系的未来方向、可采取的行动或态度"),
            ],
            FourCardPattern::SituationObstacleHelpAdvice => vec![
                CardPosition::new("现状", "当前客观情况或你所处的位置"),
                CardPosition::new("阻碍", "挑战、矛盾、问题源头或阻力"),
                CardPosition::new("助力", "你可以利用的优势、资源或隐藏支持"),
                CardPosition::new("建议", "最佳行动方向、态度或可采取的策略"),
            ],
            FourCardPattern::ProblemCauseSolutionOutcome => vec![
                CardPosition::new("问题", "表面的困境、阻碍或正在发生的核心问题"),
                CardPosition::new("原因", "造成问题或瓶颈的深层原因"),
                CardPosition::new("解决方案", "可采取的行动方案、应对建议或破局方向"),
                CardPosition::new("结果", "若采取方案后可能出现的走向或发展"),
            ],
            FourCardPattern::InnerOuterBlockAdvice => vec![
                CardPosition::new("内在", "你的内在状态、情绪、心理或潜意识"),
                CardPosition::new("外在", "外在环境、实际状况、人际交互"),
                CardPosition::new("阻碍", "造成内外不一致的阻碍或关键矛盾"),
                CardPosition::new("建议", "如何协调内外、整合力量或前进方向"),
            ],
            FourCardPattern::TimeLine => vec![
                CardPosition::new("过去", "影响当前情况的重要历史因素或模式"),
                CardPosition::new("现在", "当前事件的核心、此刻的关键能量"),
                CardPosition::new("未来", "在当前轨迹下最可能的发展趋势"),
                CardPosition::new("建议", "应采取何种方式应对未来或改变轨迹"),
            ],
            FourCardPattern::FireWaterAirEarth => vec![
                CardPosition::new("火", "动力、意志、行动力、热情"),
                CardPosition::new("水", "情感、感受、人际关系、直觉"),
                CardPosition::new("风", "思维、逻辑、学习与沟通"),
                CardPosition::new("土", "物质、工作、稳定与现实基础"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_card_templates_have_three_positions() {
        for pattern in ThreeCardPattern::ALL {
            assert_eq!(pattern.positions().len(), 3, "{:?}", pattern);
            assert!(!pattern.display_name().is_empty());
        }
    }

    #[test]
    fn four_card_templates_have_four_positions() {
        for pattern in FourCardPattern::ALL {
            assert_eq!(pattern.positions().len(), 4, "{:?}", pattern);
            assert!(!pattern.display_name().is_empty());
        }
    }

    #[test]
    fn display_names_match_position_labels() {
        for pattern in FourCardPattern::ALL {
            let labels: Vec<_> = pattern
                .positions()
                .iter()
                .map(|p| p.label().to_string())
                .collect();
            // Every label should appear somewhere in the display name, except
            // for templates whose name uses a different wording (成因 vs 原因).
            if pattern != FourCardPattern::ProblemCauseSolutionOutcome {
                for label in labels {
                    assert!(
                        pattern.display_name().contains(&label),
                        "{:?} missing label {}",
                        pattern,
                        label
                    );
                }
            }
        }
    }
}
