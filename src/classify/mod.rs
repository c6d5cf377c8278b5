//! Guesses whether a category name denotes income or an expense.
//!
//! Classification is a pure substring scan over two fixed keyword
//! vocabularies. The expense vocabulary is checked first, so a name that
//! contains keywords from both sets (e.g. "保險理賠") always classifies as
//! an expense. Names that match neither set classify as unknown, never as an
//! error.
//!
//! ```
//! use moneybook::{CategoryType, classify};
//!
//! assert_eq!(classify::classify("薪資"), Some(CategoryType::Income));
//! assert_eq!(classify::classify("午餐"), Some(CategoryType::Expense));
//! assert_eq!(classify::classify("小明"), None);
//! ```

mod keywords;

use serde::Serialize;

use crate::category::{CategoryColor, CategoryType};

use keywords::{
    DEFAULT_EXPENSE_COLOR, DEFAULT_INCOME_COLOR, EXPENSE_COLOR_RULES, EXPENSE_KEYWORDS,
    INCOME_COLOR_RULES, INCOME_KEYWORDS,
};

/// The result of suggesting a type for a category name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSuggestion {
    /// The suggested type, or `None` when the name matched no vocabulary.
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
    /// How confident the suggestion is, in `[0, 1]`. Zero for unknown names.
    pub confidence: f64,
    /// A human-readable justification for the suggestion.
    pub reason: String,
    /// The keywords from the winning vocabulary found in the name, in
    /// vocabulary order. Empty for unknown names.
    pub matched_keywords: Vec<String>,
}

/// Classify a category name as income or expense.
///
/// The name is trimmed and Latin script is case folded before matching.
/// Returns `None` for empty names and names that match neither vocabulary.
pub fn classify(name: &str) -> Option<CategoryType> {
    let name = fold(name);

    if name.is_empty() {
        return None;
    }

    if EXPENSE_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
        return Some(CategoryType::Expense);
    }

    if INCOME_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
        return Some(CategoryType::Income);
    }

    None
}

/// Suggest a type for a category name, with a confidence score and the
/// matched keywords as justification.
///
/// The confidence is `min(0.9, 0.6 + 0.3 × matches)` where `matches` counts
/// the keywords of the winning vocabulary found in the name. Unknown names
/// get confidence zero. The formula is kept bit-for-bit compatible with the
/// values callers already store, so do not retune it here.
pub fn suggest_type(name: &str) -> TypeSuggestion {
    let Some(category_type) = classify(name) else {
        return TypeSuggestion {
            category_type: None,
            confidence: 0.0,
            reason: "the name matches no income or expense keywords".to_string(),
            matched_keywords: Vec::new(),
        };
    };

    let vocabulary = match category_type {
        CategoryType::Income => INCOME_KEYWORDS,
        CategoryType::Expense => EXPENSE_KEYWORDS,
    };

    let folded = fold(name);
    let matched_keywords: Vec<String> = vocabulary
        .iter()
        .filter(|keyword| folded.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect();

    let confidence = (0.6 + 0.3 * matched_keywords.len() as f64).min(0.9);
    let reason = format!(
        "the name contains {} keyword(s): {}",
        category_type,
        matched_keywords.join(", ")
    );

    TypeSuggestion {
        category_type: Some(category_type),
        confidence,
        reason,
        matched_keywords,
    }
}

/// Pick a display color for a category from its type and name.
///
/// Each type has an ordered rule table mapping keywords to colors; the first
/// rule whose keyword is contained in the name wins, so the table order is
/// part of the contract. Names matching no rule get the per-type default.
pub fn recommended_color(category_type: CategoryType, name: &str) -> CategoryColor {
    let folded = fold(name);

    let (rules, default) = match category_type {
        CategoryType::Income => (INCOME_COLOR_RULES, DEFAULT_INCOME_COLOR),
        CategoryType::Expense => (EXPENSE_COLOR_RULES, DEFAULT_EXPENSE_COLOR),
    };

    for (keyword, color) in rules {
        if folded.contains(keyword) {
            return CategoryColor::new_unchecked(color);
        }
    }

    CategoryColor::new_unchecked(default)
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod classify_tests {
    use crate::{
        category::CategoryType,
        classify::{classify, suggest_type},
    };

    #[test]
    fn salary_classifies_as_income() {
        assert_eq!(classify("薪資"), Some(CategoryType::Income));
    }

    #[test]
    fn lunch_classifies_as_expense() {
        assert_eq!(classify("午餐"), Some(CategoryType::Expense));
    }

    #[test]
    fn plain_name_is_unknown() {
        assert_eq!(classify("小明"), None);
    }

    #[test]
    fn empty_and_whitespace_names_are_unknown() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   \t"), None);
    }

    #[test]
    fn latin_names_are_case_folded() {
        assert_eq!(classify("Salary"), Some(CategoryType::Income));
        assert_eq!(classify("COFFEE"), Some(CategoryType::Expense));
    }

    #[test]
    fn expense_wins_when_both_vocabularies_match() {
        // 保險 is an expense keyword, 理賠 an income keyword.
        assert_eq!(classify("保險理賠"), Some(CategoryType::Expense));
        // "rent" is an expense keyword inside the income phrase.
        assert_eq!(classify("rent received"), Some(CategoryType::Expense));
    }

    #[test]
    fn suggest_type_for_salary_is_confident_income() {
        let suggestion = suggest_type("薪資");

        assert_eq!(suggestion.category_type, Some(CategoryType::Income));
        assert!(suggestion.confidence >= 0.6);
        assert_eq!(suggestion.matched_keywords, vec!["薪資".to_string()]);
    }

    #[test]
    fn suggest_type_for_lunch_is_confident_expense() {
        let suggestion = suggest_type("午餐");

        assert_eq!(suggestion.category_type, Some(CategoryType::Expense));
        assert!(suggestion.confidence >= 0.6);
    }

    #[test]
    fn suggest_type_for_unknown_name_has_zero_confidence() {
        let suggestion = suggest_type("小明");

        assert_eq!(suggestion.category_type, None);
        assert_eq!(suggestion.confidence, 0.0);
        assert!(suggestion.matched_keywords.is_empty());
    }

    #[test]
    fn confidence_follows_the_match_count_formula() {
        let one_match = suggest_type("薪資");
        assert_eq!(one_match.confidence, 0.9);

        let two_matches = suggest_type("薪資獎金");
        assert_eq!(two_matches.matched_keywords.len(), 2);
        assert_eq!(two_matches.confidence, 0.9);
    }

    #[test]
    fn confidence_is_capped_and_never_decreases_with_more_matches() {
        let names = ["午餐", "午餐咖啡", "午餐咖啡飲料"];
        let mut previous = 0.0;

        for name in names {
            let suggestion = suggest_type(name);
            assert!(suggestion.confidence >= previous);
            assert!(suggestion.confidence <= 0.9);
            previous = suggestion.confidence;
        }
    }

    #[test]
    fn matched_keywords_are_in_vocabulary_order() {
        let suggestion = suggest_type("咖啡早餐");

        assert_eq!(
            suggestion.matched_keywords,
            vec!["早餐".to_string(), "咖啡".to_string()]
        );
    }
}

#[cfg(test)]
mod recommended_color_tests {
    use crate::{
        category::CategoryType,
        classify::recommended_color,
    };

    #[test]
    fn salary_gets_blue() {
        let color = recommended_color(CategoryType::Income, "薪資");

        assert_eq!(color.as_ref(), "#3b82f6");
    }

    #[test]
    fn dining_gets_orange() {
        let color = recommended_color(CategoryType::Expense, "餐飲");

        assert_eq!(color.as_ref(), "#f97316");
    }

    #[test]
    fn transport_gets_purple() {
        let color = recommended_color(CategoryType::Expense, "交通");

        assert_eq!(color.as_ref(), "#8b5cf6");
    }

    #[test]
    fn unmatched_names_get_the_per_type_default() {
        let income = recommended_color(CategoryType::Income, "小明");
        let expense = recommended_color(CategoryType::Expense, "小明");

        assert_eq!(income.as_ref(), "#10b981");
        assert_eq!(expense.as_ref(), "#ef4444");
    }

    #[test]
    fn first_rule_in_table_order_wins_on_multiple_matches() {
        // 交通 precedes 購物 in the rule table, regardless of the order the
        // keywords appear in the name.
        let forward = recommended_color(CategoryType::Expense, "交通購物");
        let reversed = recommended_color(CategoryType::Expense, "購物交通");

        assert_eq!(forward.as_ref(), "#8b5cf6");
        assert_eq!(reversed.as_ref(), "#8b5cf6");
    }
}
