/*!
 * Tests for keyword classification and category ranking
 */

use regex::Regex;

use kisanroute::classification::{CategoryRules, Classifier, IntentCategory, KeywordGroup};

fn classify(text: &str) -> kisanroute::ClassificationResult {
    Classifier::new().classify(text)
}

/// Equal scores resolve by priority: pest outranks market
#[test]
fn test_classify_withPestMarketTie_shouldRankPestFirst() {
    let result = classify("pest rates at the mandi");

    assert_eq!(result.score_of(IntentCategory::Pest), 0.5);
    assert_eq!(result.score_of(IntentCategory::Market), 0.5);
    assert_eq!(result.top().category, IntentCategory::Pest);
}

#[test]
fn test_classify_withIrrigationCropTie_shouldRankIrrigationFirst() {
    let result = classify("When to irrigate wheat crop?");

    assert_eq!(result.score_of(IntentCategory::Irrigation), 0.7);
    assert_eq!(result.score_of(IntentCategory::Crop), 0.7);
    assert_eq!(result.entries()[0].category, IntentCategory::Irrigation);
    assert_eq!(result.entries()[1].category, IntentCategory::Crop);
}

#[test]
fn test_classify_withSymptomDescription_shouldPickPest() {
    let result = classify("My tomato plants have yellow leaves");

    assert_eq!(result.top().category, IntentCategory::Pest);
    assert_eq!(result.score_of(IntentCategory::Pest), 0.4);
    assert_eq!(result.score_of(IntentCategory::Crop), 0.3);
}

#[test]
fn test_classify_withPriceQuestion_shouldCountPatternOnce() {
    let result = classify("What is the current price of cotton?");

    assert_eq!(result.top().category, IntentCategory::Market);
    assert_eq!(result.score_of(IntentCategory::Market), 0.7);
}

#[test]
fn test_classify_withSchemeQuestion_shouldScoreFullFinance() {
    let result = classify("How to apply for PM Kisan scheme loan");
    assert_eq!(result.score_of(IntentCategory::Finance), 1.0);
}

#[test]
fn test_classify_withEmptyText_shouldBeUnclassified() {
    let result = classify("");
    assert!(result.is_unclassified());
    assert_eq!(result.top().score, 0.0);
}

#[test]
fn test_classify_ranking_shouldBeSortedByScore() {
    let result = classify("irrigation cost for cotton in kharif");
    let scores = result.entries().iter().map(|e| e.score).collect::<Vec<_>>();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(!result.entries().iter().any(|e| e.category == IntentCategory::Unclassified));
}

#[test]
fn test_qualifying_shouldApplyThresholdAndKeepRank() {
    let result = classify("irrigation cost for cotton in kharif");
    let qualifying = result
        .qualifying(0.35)
        .iter()
        .map(|e| e.category)
        .collect::<Vec<_>>();
    assert_eq!(qualifying, vec![IntentCategory::Irrigation, IntentCategory::Crop]);
}

#[test]
fn test_withRules_customTables_shouldOnlyScoreThoseCategories() {
    let classifier = Classifier::with_rules(vec![CategoryRules {
        category: IntentCategory::Crop,
        groups: vec![
            KeywordGroup::terms(3, &["arhar", "tur"]),
            KeywordGroup::pattern(1, Regex::new(r"\bpigeon pea\b").unwrap()),
        ],
    }]);

    let result = classifier.classify("arhar or pigeon pea");
    assert_eq!(result.entries().len(), 1);
    assert_eq!(result.score_of(IntentCategory::Crop), 1.0);
    assert!(classifier.classify("wheat price").is_unclassified());
}

#[test]
fn test_intentCategory_fromStr_shouldAcceptLegacyNames() {
    assert_eq!("market_price".parse::<IntentCategory>().unwrap(), IntentCategory::Market);
    assert_eq!("pest_disease".parse::<IntentCategory>().unwrap(), IntentCategory::Pest);
    assert!("livestock".parse::<IntentCategory>().is_err());
}
