//! Property-based tests for the sequencer
//!
//! These tests verify key invariants hold across generated catalogs,
//! rule sets and answer sequences.

use super::*;
use crate::db::{Question, SkipRule};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Arbitrary Generators
// ============================================================================

const SYMPTOMS: [&str; 5] = ["spots", "wilting", "leaf drop", "rot", "yellow"];

fn arb_catalog_texts() -> impl Strategy<Value = Vec<String>> {
    (1usize..8).prop_map(|n| (1..=n).map(|i| format!("question {i}?")).collect())
}

fn arb_symptom() -> impl Strategy<Value = String> {
    prop::sample::select(SYMPTOMS.to_vec()).prop_map(String::from)
}

fn arb_rules(texts: Vec<String>) -> impl Strategy<Value = (Vec<String>, Vec<SkipRule>)> {
    let pick = prop::sample::select(texts.clone());
    let rule = (pick.clone(), arb_symptom(), pick)
        .prop_map(|(parent, trigger, child)| SkipRule::new(parent, trigger, child));
    proptest::collection::vec(rule, 0..6).prop_map(move |rules| (texts.clone(), rules))
}

fn arb_answer() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,12}",
        arb_symptom().prop_map(|s| format!("I see {s}")),
        (arb_symptom(), arb_symptom()).prop_map(|(a, b)| format!("{a} and {b}")),
    ]
}

fn catalog_from(texts: &[String], rules: Vec<SkipRule>) -> Catalog {
    let questions = texts
        .iter()
        .zip(1i64..)
        .map(|(t, id)| Question::new(id, t.clone(), Some("yes/no")))
        .collect();
    Catalog::new(questions, rules)
}

fn is_subsequence(sub: &[String], full: &[String]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| f == s))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_pruning_is_idempotent(
        texts in arb_catalog_texts(),
        mask in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let skip: BTreeSet<String> = texts
            .iter()
            .zip(mask.iter())
            .filter(|(_, m)| **m)
            .map(|(t, _)| t.clone())
            .collect();
        let once = prune(&texts, &skip);
        let twice = prune(&once, &skip);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_pruning_preserves_order(
        texts in arb_catalog_texts(),
        mask in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let skip: BTreeSet<String> = texts
            .iter()
            .zip(mask.iter())
            .filter(|(_, m)| **m)
            .map(|(t, _)| t.clone())
            .collect();
        let pruned = prune(&texts, &skip);
        prop_assert!(is_subsequence(&pruned, &texts));
        prop_assert!(pruned.iter().all(|q| !skip.contains(q)));
    }

    #[test]
    fn prop_exactly_one_branch_by_count(
        mentioned in proptest::collection::btree_set(arb_symptom(), 0..5),
    ) {
        let policy = SkipPolicy::for_mentions(&mentioned);
        let expected = match mentioned.len() {
            0 => SkipPolicy::NoMention,
            1 => SkipPolicy::SingleExact,
            _ => SkipPolicy::MultiContainment,
        };
        prop_assert_eq!(policy, expected);
    }

    #[test]
    fn prop_no_mention_never_skips(
        (texts, rules) in arb_catalog_texts().prop_flat_map(arb_rules),
    ) {
        let skipped = resolve_skips(&BTreeSet::new(), &rules, &texts[0]);
        prop_assert!(skipped.is_empty());
    }

    #[test]
    fn prop_skips_only_rule_children(
        (texts, rules) in arb_catalog_texts().prop_flat_map(arb_rules),
        mentioned in proptest::collection::btree_set(arb_symptom(), 0..4),
    ) {
        let children: BTreeSet<String> =
            rules.iter().map(|r| r.skip_child_text.clone()).collect();
        let skipped = resolve_skips(&mentioned, &rules, &texts[0]);
        prop_assert!(skipped.is_subset(&children));
    }

    #[test]
    fn prop_without_rules_advances_monotonically_and_terminates(
        texts in arb_catalog_texts(),
        answers in proptest::collection::vec(arb_answer(), 8),
    ) {
        let catalog = catalog_from(&texts, vec![]);
        let mut session = Session::new("s", texts[0].clone());
        let mut last_index = 0usize;
        let mut asked = vec![texts[0].clone()];

        for (n, answer) in answers.iter().enumerate() {
            let adv = advance(&mut session, &catalog, answer).unwrap();
            prop_assert!(adv.next_index > last_index || n == 0);
            last_index = adv.next_index;
            match adv.step {
                Step::Next { question, .. } => {
                    prop_assert!(!asked.contains(&question));
                    asked.push(question);
                }
                Step::Exhausted { .. } => {
                    prop_assert_eq!(n + 1, texts.len());
                    prop_assert_eq!(asked.clone(), texts.clone());
                    return Ok(());
                }
            }
        }
        // Enough answers were supplied for any catalog size
        prop_assert!(false, "session never finalized");
    }

    #[test]
    fn prop_working_list_stays_subsequence_of_catalog(
        (texts, rules) in arb_catalog_texts().prop_flat_map(arb_rules),
        answers in proptest::collection::vec(arb_answer(), 1..12),
    ) {
        let catalog = catalog_from(&texts, rules);
        let mut session = Session::new("s", texts[0].clone());

        for answer in &answers {
            let Ok(adv) = advance(&mut session, &catalog, answer) else {
                break;
            };
            let list = session.working_questions().unwrap_or_default();
            prop_assert!(is_subsequence(list, &texts));
            if let Step::Next { question, .. } = adv.step {
                prop_assert!(list.contains(&question));
                prop_assert_eq!(session.current_question.clone(), question);
            }
        }
    }

    #[test]
    fn prop_transcript_holds_every_answer_in_order(
        texts in arb_catalog_texts(),
        answers in proptest::collection::vec("[a-z]{1,6}", 8),
    ) {
        let catalog = catalog_from(&texts, vec![]);
        let mut session = Session::new("s", texts[0].clone());
        for answer in &answers {
            if let Step::Exhausted { transcript } =
                advance(&mut session, &catalog, answer).unwrap().step
            {
                let expected = answers[..texts.len()].join(finalize::TRANSCRIPT_SEPARATOR);
                prop_assert_eq!(transcript, expected);
                return Ok(());
            }
        }
        prop_assert!(false, "session never finalized");
    }
}
