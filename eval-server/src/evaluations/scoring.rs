//! 评分计算

use shared::models::{Criterion, Response};

/// 评估总分：评分项平均值，四舍五入到两位小数
///
/// 无评分项时返回 `None`（未评分），而不是 0。
pub fn overall_score(criteria: &[Criterion]) -> Option<f64> {
    if criteria.is_empty() {
        return None;
    }
    let sum: u64 = criteria.iter().map(|c| u64::from(c.score)).sum();
    let n = criteria.len() as u64;
    // 整数运算做 round-half-up，避免浮点误差
    let hundredths = (sum * 200 + n) / (2 * n);
    Some(hundredths as f64 / 100.0)
}

/// 单个评估的得分：所有评分项和反馈评分的平均值，无内容时为 0
pub fn evaluation_score(criteria: &[Criterion], responses: &[Response]) -> f64 {
    let values: Vec<f64> = criteria
        .iter()
        .map(|c| f64::from(c.score))
        .chain(responses.iter().map(|r| f64::from(r.rating)))
        .collect();
    round2(mean(&values))
}

/// 算术平均，空集为 0
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CriterionCategory;

    fn criteria(scores: &[u8]) -> Vec<Criterion> {
        scores
            .iter()
            .map(|&score| Criterion {
                category: CriterionCategory::TechnicalSkills,
                name: "Rust".into(),
                score,
                comment: None,
            })
            .collect()
    }

    fn response(rating: u8) -> Response {
        Response {
            question_id: "overall".into(),
            rating,
            comment: None,
        }
    }

    #[test]
    fn test_overall_score_empty_is_none() {
        assert_eq!(overall_score(&[]), None);
    }

    #[test]
    fn test_overall_score_rounding() {
        assert_eq!(overall_score(&criteria(&[5, 4, 3])), Some(4.0));
        assert_eq!(overall_score(&criteria(&[4, 4, 3])), Some(3.67));
        assert_eq!(overall_score(&criteria(&[5, 3, 3])), Some(3.67));
        assert_eq!(overall_score(&criteria(&[1, 2, 2])), Some(1.67));
        // 1/8 = 0.125 -> 0.13 (half-up)
        assert_eq!(overall_score(&criteria(&[2, 1, 1, 1, 1, 1, 1, 1])), Some(1.13));
        assert_eq!(overall_score(&criteria(&[5])), Some(5.0));
    }

    #[test]
    fn test_evaluation_score_mixes_criteria_and_responses() {
        assert_eq!(evaluation_score(&criteria(&[5, 3]), &[response(1)]), 3.0);
        assert_eq!(evaluation_score(&[], &[response(4)]), 4.0);
        assert_eq!(evaluation_score(&[], &[]), 0.0);
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[4.0, 2.0]), 3.0);
    }
}
