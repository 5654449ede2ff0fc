//! Quality judges: a scripted one for offline runs and an LLM-backed one.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use frontier_core::{
    traits::{Judgement, QualityJudge, TextGenerator},
    Result,
};

/// Deterministic judge for tests and mock benchmark runs.
///
/// Scores by response markers: the first configured marker found inside the
/// response decides the score. Mock generators embed their model id in every
/// response, so keying markers by model id scripts an entire sweep.
pub struct ScriptedJudge {
    scores: BTreeMap<String, f64>,
    default_score: f64,
}

impl ScriptedJudge {
    /// Judge assigning the same score to every response.
    pub fn fixed(score: f64) -> Self {
        Self {
            scores: BTreeMap::new(),
            default_score: score,
        }
    }

    /// Judge scoring by marker substring, with a default for unmatched
    /// responses. Markers are checked in sorted order.
    pub fn keyed(scores: BTreeMap<String, f64>, default_score: f64) -> Self {
        Self {
            scores,
            default_score,
        }
    }
}

#[async_trait]
impl QualityJudge for ScriptedJudge {
    async fn score(&self, _prompt: &str, response: &str, _category: &str) -> Result<Judgement> {
        for (marker, score) in &self.scores {
            if response.contains(marker.as_str()) {
                return Ok(Judgement::new(
                    *score,
                    format!("scripted score for marker '{}'", marker),
                ));
            }
        }
        Ok(Judgement::new(self.default_score, "scripted default score"))
    }
}

const EVALUATION_TEMPLATE: &str = "You are an expert evaluator of AI responses. Rate the \
following response on a scale of 0.0 to 1.0 based on accuracy, completeness, clarity, and \
relevance to the prompt.\n\n\
Prompt Category: {category}\n\
Original Prompt: {prompt}\n\n\
Response to Evaluate:\n{response}\n\n\
Provide your evaluation in the following format:\n\
Score: [0.0-1.0]\n\
Reasoning: [Your explanation]\n\n\
Be strict but fair. Only exceptional responses should score above 0.9.";

const JUDGE_MAX_TOKENS: u32 = 500;

/// Judge that asks another model to grade the response.
pub struct GeneratorJudge {
    generator: Arc<dyn TextGenerator>,
}

impl GeneratorJudge {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl QualityJudge for GeneratorJudge {
    async fn score(&self, prompt: &str, response: &str, category: &str) -> Result<Judgement> {
        let evaluation_prompt = EVALUATION_TEMPLATE
            .replace("{category}", category)
            .replace("{prompt}", prompt)
            .replace("{response}", response);

        let generation = self
            .generator
            .generate(&evaluation_prompt, JUDGE_MAX_TOKENS)
            .await?;
        Ok(parse_judgement(&generation.text))
    }
}

/// Extract "Score:" and "Reasoning:" lines from a judge response. A missing
/// or unparsable score reads as zero; the raw text stands in for a missing
/// reasoning line.
fn parse_judgement(text: &str) -> Judgement {
    let mut score = 0.0;
    let mut reasoning = String::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("Score:") {
            if let Ok(value) = rest.trim().parse::<f64>() {
                score = value;
            }
        } else if let Some(rest) = line.strip_prefix("Reasoning:") {
            reasoning = rest.trim().to_string();
        }
    }

    if reasoning.is_empty() {
        reasoning = text.trim().chars().take(200).collect();
    }
    Judgement::new(score, reasoning)
}
