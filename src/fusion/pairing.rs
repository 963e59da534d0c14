// 最优配对搜索
// 开发心理：候选融合构成完全图，穷举回溯求不相交配对的最优总分
// 设计原则：显式最优解累加器、插入序决定同分先后、规模小可接受指数搜索

use std::collections::BTreeSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use log::debug;

use super::generator::AnalyzedFusion;

// (head, body) → 指标值；插入顺序即枚举顺序
pub type PairScores = IndexMap<(String, String), f64>;

// 可作为配对目标的指标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingMetric {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Bst,
    EffectiveDelta,
    TotalResistances,
    TotalWeaknesses,
}

impl PairingMetric {
    // 弱点合计越低越好，其余指标越高越好
    pub fn lower_is_better(&self) -> bool {
        matches!(self, PairingMetric::TotalWeaknesses)
    }

    pub fn value_of(&self, row: &AnalyzedFusion) -> f64 {
        match self {
            PairingMetric::Hp => row.fusion.stats.hp as f64,
            PairingMetric::Attack => row.fusion.stats.attack as f64,
            PairingMetric::Defense => row.fusion.stats.defense as f64,
            PairingMetric::SpecialAttack => row.fusion.stats.special_attack as f64,
            PairingMetric::SpecialDefense => row.fusion.stats.special_defense as f64,
            PairingMetric::Speed => row.fusion.stats.speed as f64,
            PairingMetric::Bst => row.fusion.bst as f64,
            PairingMetric::EffectiveDelta => row.profile.effective_delta,
            PairingMetric::TotalResistances => row.profile.total_resistances as f64,
            PairingMetric::TotalWeaknesses => row.profile.total_weaknesses as f64,
        }
    }
}

impl Default for PairingMetric {
    fn default() -> Self {
        PairingMetric::EffectiveDelta
    }
}

// 从分析结果行构建配对评分表，保持行顺序
pub fn pair_scores(rows: &[AnalyzedFusion], metric: PairingMetric) -> PairScores {
    let mut scores = PairScores::new();
    for row in rows {
        let pair = (row.fusion.head.clone(), row.fusion.body.clone());
        scores.insert(pair, metric.value_of(row));
    }
    scores
}

// 当前最优解持有者
struct BestAssignment {
    score: f64,
    pairs: Vec<(String, String)>,
}

fn backtrack(
    scores: &PairScores,
    elements: &BTreeSet<String>,
    current_score: f64,
    current_pairs: &mut Vec<(String, String)>,
    best: &mut BestAssignment,
    find_max: bool,
) {
    // 剩余元素≤1时到达叶子：严格不等式才替换，同分保留先找到的解
    if elements.len() <= 1 {
        let better = if find_max {
            current_score > best.score
        } else {
            current_score < best.score
        };
        if better {
            best.score = current_score;
            best.pairs = current_pairs.clone();
        }
        return;
    }

    for (pair, score) in scores {
        if elements.contains(&pair.0) && elements.contains(&pair.1) {
            let mut remaining = elements.clone();
            remaining.remove(&pair.0);
            remaining.remove(&pair.1);

            current_pairs.push(pair.clone());
            backtrack(scores, &remaining, current_score + score, current_pairs, best, find_max);
            current_pairs.pop();
        }
    }
}

// 在配对评分表上求最优不相交配对集合
// find_max为假时求最小总分；奇数个元素时允许剩下一个不配对的元素，不计入总分
pub fn find_extreme_pairs(scores: &PairScores, find_max: bool) -> Vec<(String, String)> {
    let mut elements = BTreeSet::new();
    for (head, body) in scores.keys() {
        elements.insert(head.clone());
        elements.insert(body.clone());
    }

    let mut best = BestAssignment {
        score: if find_max { f64::NEG_INFINITY } else { f64::INFINITY },
        pairs: Vec::new(),
    };
    let mut current_pairs = Vec::new();

    backtrack(scores, &elements, 0.0, &mut current_pairs, &mut best, find_max);

    debug!("最优配对搜索完成: {}对, 总分{}", best.pairs.len(), best.score);
    best.pairs
}

// 按指定指标筛选最优融合行：构表、搜索、按胜出配对过滤
pub fn optimal_fusions(rows: &[AnalyzedFusion], metric: PairingMetric) -> Vec<AnalyzedFusion> {
    let scores = pair_scores(rows, metric);
    let winning = find_extreme_pairs(&scores, !metric.lower_is_better());
    let winning_set: BTreeSet<&(String, String)> = winning.iter().collect();

    rows.iter()
        .filter(|row| {
            winning_set.contains(&(row.fusion.head.clone(), row.fusion.body.clone()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::StaticDex;
    use crate::fusion::effectiveness::ScoringMode;
    use crate::fusion::generator::possible_fusions;

    fn fixture_scores(entries: &[(&str, &str, f64)]) -> PairScores {
        let mut scores = PairScores::new();
        for (head, body, score) in entries {
            scores.insert((head.to_string(), body.to_string()), *score);
        }
        scores
    }

    #[test]
    fn test_four_element_maximum() {
        // AC=10 + BD=1 = 11 胜过 AB=5 + CD=5 = 10
        let scores = fixture_scores(&[
            ("A", "B", 5.0),
            ("C", "D", 5.0),
            ("A", "C", 10.0),
            ("B", "D", 1.0),
            ("A", "D", 2.0),
            ("B", "C", 1.0),
        ]);

        let pairs = find_extreme_pairs(&scores, true);
        assert_eq!(pairs.len(), 2);

        let total: f64 = pairs.iter().map(|p| scores[p]).sum();
        assert_eq!(total, 11.0);

        let set: BTreeSet<_> = pairs.into_iter().collect();
        assert!(set.contains(&("A".to_string(), "C".to_string())));
        assert!(set.contains(&("B".to_string(), "D".to_string())));
    }

    #[test]
    fn test_four_element_minimum() {
        let scores = fixture_scores(&[
            ("A", "B", 5.0),
            ("C", "D", 5.0),
            ("A", "C", 10.0),
            ("B", "D", 1.0),
            ("A", "D", 2.0),
            ("B", "C", 1.0),
        ]);

        // 最小: AD=2 + BC=1 = 3
        let pairs = find_extreme_pairs(&scores, false);
        let total: f64 = pairs.iter().map(|p| scores[p]).sum();
        assert_eq!(total, 3.0);
    }

    #[test]
    fn test_tie_keeps_first_found() {
        // 两种完整配对同分，保留先枚举到的
        let scores = fixture_scores(&[
            ("A", "B", 5.0),
            ("C", "D", 5.0),
            ("A", "C", 5.0),
            ("B", "D", 5.0),
        ]);

        let pairs = find_extreme_pairs(&scores, true);
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "B".to_string()),
                ("C".to_string(), "D".to_string())
            ]
        );
    }

    #[test]
    fn test_odd_element_left_out() {
        // 5个元素：一个元素落单且不计分
        let scores = fixture_scores(&[
            ("A", "B", 3.0),
            ("C", "D", 4.0),
            ("A", "E", 1.0),
        ]);

        let pairs = find_extreme_pairs(&scores, true);
        let total: f64 = pairs.iter().map(|p| scores[p]).sum();
        assert_eq!(total, 7.0);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_empty_scores() {
        let scores = PairScores::new();
        assert!(find_extreme_pairs(&scores, true).is_empty());
    }

    #[test]
    fn test_optimal_fusions_filters_rows() {
        let provider = StaticDex::new();
        let names: Vec<String> = ["charizard", "blastoise", "venusaur", "pikachu"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = possible_fusions(&names, &provider, ScoringMode::Unweighted).unwrap();
        assert_eq!(rows.len(), 12);

        let optimal = optimal_fusions(&rows, PairingMetric::EffectiveDelta);

        // 4个元素 → 2个不相交配对
        assert_eq!(optimal.len(), 2);
        let mut used = BTreeSet::new();
        for row in &optimal {
            assert!(used.insert(row.fusion.head.clone()));
            assert!(used.insert(row.fusion.body.clone()));
        }

        // 胜出总分不低于任何其他完整配对方案
        let scores = pair_scores(&rows, PairingMetric::EffectiveDelta);
        let best_total: f64 = optimal.iter().map(|r| r.effective_delta()).sum();
        for (pair_a, score_a) in &scores {
            for (pair_b, score_b) in &scores {
                let mut elements = BTreeSet::new();
                elements.insert(&pair_a.0);
                elements.insert(&pair_a.1);
                elements.insert(&pair_b.0);
                elements.insert(&pair_b.1);
                if elements.len() == 4 {
                    assert!(best_total >= score_a + score_b);
                }
            }
        }
    }

    #[test]
    fn test_total_weaknesses_minimizes() {
        let provider = StaticDex::new();
        let names: Vec<String> = ["charizard", "blastoise", "gengar", "snorlax"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = possible_fusions(&names, &provider, ScoringMode::Unweighted).unwrap();

        let optimal = optimal_fusions(&rows, PairingMetric::TotalWeaknesses);
        assert_eq!(optimal.len(), 2);

        let scores = pair_scores(&rows, PairingMetric::TotalWeaknesses);
        let best_total: f64 = optimal
            .iter()
            .map(|r| r.profile.total_weaknesses as f64)
            .sum();
        for (pair_a, score_a) in &scores {
            for (pair_b, score_b) in &scores {
                let mut elements = BTreeSet::new();
                elements.insert(&pair_a.0);
                elements.insert(&pair_a.1);
                elements.insert(&pair_b.0);
                elements.insert(&pair_b.1);
                if elements.len() == 4 {
                    assert!(best_total <= score_a + score_b);
                }
            }
        }
    }
}
