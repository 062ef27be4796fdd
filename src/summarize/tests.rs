use super::*;

#[test]
fn lead_takes_the_first_sentences() {
    let text = "First point here. Second point follows. Third point ends.";
    let summary = LeadSummarizer
        .summarize(text, 2)
        .expect("lead should summarize")
        .expect("non-empty text should produce a summary");
    assert_eq!(summary, "First point here. Second point follows.");
}

#[test]
fn lead_caps_at_available_sentences() {
    let summary = LeadSummarizer
        .summarize("Only one sentence here.", 5)
        .expect("lead should summarize")
        .expect("non-empty text should produce a summary");
    assert_eq!(summary, "Only one sentence here.");
}

#[test]
fn lead_fails_on_empty_text() {
    let result = LeadSummarizer
        .summarize("   ", 3)
        .expect("lead should not error");
    assert!(result.is_none());
}

#[test]
fn frequency_prefers_sentences_about_the_dominant_topic() {
    let text = "Solar panels convert sunlight. The weather was pleasant yesterday. \
                Solar panels store solar energy. Solar energy powers panels at night.";
    let summary = FrequencySummarizer
        .summarize(text, 2)
        .expect("frequency should summarize")
        .expect("non-empty text should produce a summary");
    assert!(
        summary.contains("Solar"),
        "dominant-topic sentences should be selected: {summary}"
    );
    assert!(
        !summary.contains("weather"),
        "off-topic sentence should be dropped: {summary}"
    );
}

#[test]
fn frequency_preserves_original_sentence_order() {
    let text = "Rust compiles fast code. Something unrelated entirely happened. \
                Rust code stays fast.";
    let summary = FrequencySummarizer
        .summarize(text, 2)
        .expect("frequency should summarize")
        .expect("non-empty text should produce a summary");
    let first = summary.find("Rust compiles").expect("first topic sentence kept");
    let second = summary.find("Rust code stays").expect("second topic sentence kept");
    assert!(first < second, "selected sentences should keep document order");
}

#[test]
fn frequency_fails_on_empty_text() {
    let result = FrequencySummarizer
        .summarize("", 3)
        .expect("frequency should not error");
    assert!(result.is_none());
}

#[test]
fn registry_rejects_unknown_summarizer_names() {
    let registry = builtin_registry();
    let error = registry
        .resolve(&["lead".to_string(), "smmry".to_string()])
        .expect_err("unknown summarizer should be a configuration error");
    assert!(
        error.to_string().contains("smmry"),
        "error should name the offender: {error}"
    );
    assert!(
        error.to_string().contains("choose from"),
        "error should list supported options: {error}"
    );
}

#[test]
fn registry_resolves_case_insensitively_and_deduplicates() {
    let registry = builtin_registry();
    let resolved = registry
        .resolve(&[
            "Lead".to_string(),
            "FREQUENCY".to_string(),
            "lead".to_string(),
        ])
        .expect("known summarizers should resolve");
    let names: Vec<&str> = resolved.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["lead", "frequency"]);
}
