//! Canned reply text for the debate opponent.
//!
//! Every template embeds the literal thesis so each bot turn restates the
//! claim it defends. Two rebuttal templates alternate between turns; the
//! marker phrases identify which one produced the previous bot reply.

/// Phrase unique to the evidence-led rebuttal template.
pub const EVIDENCE_MARKER: &str = "practical evidence from comparable cases";

/// Phrase unique to the trade-off rebuttal template.
pub const TRADEOFF_MARKER: &str = "trade-off perspective";

/// The recurring claim sentence embedded in every templated reply.
pub fn stance_claim(thesis: &str) -> String {
    format!("My stance remains: {}.", thesis)
}

/// Evidence-led rebuttal (template A).
pub fn evidence_reply(thesis: &str) -> String {
    format!(
        "I see your point. {} One key reason is practical evidence from \
         comparable cases. Can you challenge that with a concrete counterexample?",
        stance_claim(thesis)
    )
}

/// Trade-off rebuttal (template B).
pub fn tradeoff_reply(thesis: &str) -> String {
    format!(
        "{} From a trade-off perspective - costs, outcomes, and adoption - \
         the conclusion still holds. Which aspect do you disagree with most?",
        stance_claim(thesis)
    )
}

/// Picks the rebuttal template for this turn, avoiding whichever produced
/// the previous bot reply. Defaults to the evidence template.
pub fn alternate_reply(thesis: &str, last_bot_text: Option<&str>) -> String {
    if let Some(last) = last_bot_text {
        let last = last.to_lowercase();
        if last.contains(EVIDENCE_MARKER) {
            return tradeoff_reply(thesis);
        }
        if last.contains(TRADEOFF_MARKER) {
            return evidence_reply(thesis);
        }
    }
    evidence_reply(thesis)
}

/// Reply when the user repeats their previous point. The anchor is the
/// claim sentence in template mode and the bare thesis in model mode.
pub fn same_point_reply(anchor: &str) -> String {
    format!(
        "It looks like you're asking the same point again. {} Would you like \
         me to address it from a different angle - evidence, costs, ethics, \
         or feasibility?",
        anchor
    )
}

/// Redirect for off-topic turns.
pub fn stay_on_topic_reply(topic: &str, thesis: &str) -> String {
    format!(
        "Let's stay on topic: {}. {} Could you address that point directly?",
        topic,
        stance_claim(thesis)
    )
}

/// Refusal when a prompt-injection attempt is detected.
pub fn injection_refusal(thesis: &str) -> String {
    format!(
        "I can't follow instructions that try to change my rules or access \
         external data. We must stay on the original debate: {}. Present an \
         argument or evidence and I'll counter it.",
        thesis
    )
}

/// Fallback when model mode is selected but no API key is configured.
pub fn model_unavailable_reply() -> &'static str {
    "AI is temporarily unavailable. My stance remains the same. \
     Could you address the main point?"
}

/// Fallback for expected model failures (auth, rate limit, connection).
pub fn temporary_issue_reply() -> &'static str {
    "Temporary issue reaching the language model. I'll keep it brief: \
     my stance remains unchanged. Could you address the main point?"
}

/// Fallback for failures outside the expected taxonomy.
pub fn unexpected_issue_reply() -> &'static str {
    "I'm having trouble generating a full response right now. My stance \
     remains the same - could you address the main point directly?"
}

#[cfg(test)]
mod tests {
    use super::*;

    const THESIS: &str = "tea is better than coffee";

    #[test]
    fn every_template_embeds_the_thesis() {
        for text in [
            evidence_reply(THESIS),
            tradeoff_reply(THESIS),
            same_point_reply(&stance_claim(THESIS)),
            stay_on_topic_reply("tea vs coffee", THESIS),
            injection_refusal(THESIS),
        ] {
            assert!(text.contains(THESIS), "thesis missing from: {}", text);
        }
    }

    #[test]
    fn templates_carry_their_own_marker_only() {
        let a = evidence_reply(THESIS);
        let b = tradeoff_reply(THESIS);
        assert!(a.contains(EVIDENCE_MARKER) && !a.contains(TRADEOFF_MARKER));
        assert!(b.contains(TRADEOFF_MARKER) && !b.contains(EVIDENCE_MARKER));
    }

    #[test]
    fn alternation_switches_template_each_turn() {
        let first = alternate_reply(THESIS, None);
        assert!(first.contains(EVIDENCE_MARKER));

        let second = alternate_reply(THESIS, Some(&first));
        assert!(second.contains(TRADEOFF_MARKER));

        let third = alternate_reply(THESIS, Some(&second));
        assert!(third.contains(EVIDENCE_MARKER));
    }

    #[test]
    fn alternation_matches_markers_case_insensitively() {
        let shouted = evidence_reply(THESIS).to_uppercase();
        let next = alternate_reply(THESIS, Some(&shouted));
        assert!(next.contains(TRADEOFF_MARKER));
    }

    #[test]
    fn unrecognized_previous_reply_defaults_to_evidence() {
        let next = alternate_reply(THESIS, Some("a reply from another path"));
        assert!(next.contains(EVIDENCE_MARKER));
    }

    #[test]
    fn stay_on_topic_names_the_topic() {
        let text = stay_on_topic_reply("tea vs coffee", THESIS);
        assert!(text.contains("stay on topic"));
        assert!(text.contains("tea vs coffee"));
    }
}
