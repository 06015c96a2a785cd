/*!
 * Prompt templates for batch translation and long-entry splitting.
 *
 * The templates pin the model to a strict `[index] text` line contract so
 * the response can be parsed with a formal line grammar; anything outside
 * that contract is discarded downstream.
 */

use crate::app_config::QualityMode;

/// Instructions for a batch of independent sentence groups
const BATCH_PROMPT_TEMPLATE: &str = "\
You are an expert subtitle translator. Your task is to translate a batch of distinct subtitle groups into fluent, natural {target_language}.

CRITICAL INSTRUCTIONS - FOLLOW WITH 100% PRECISION:
1. INDEPENDENT GROUPS: The input contains multiple, separate sentence groups. Each group is enclosed by [GROUP START] and [GROUP END]. You MUST treat each group as a completely independent translation task. DO NOT merge context or meaning between different groups.
2. FOR EACH GROUP INDIVIDUALLY:
   a. COMBINE: Mentally combine the text from all [index] lines within that single group to understand the full sentence.
   b. TRANSLATE: Translate the complete sentence into high-quality, natural-sounding {target_language}.
   c. RE-SPLIT: Intelligently distribute your single translated sentence back across the original [index] lines for that group. The number of output [index] lines for a group must EXACTLY match the number of input [index] lines for that same group.
3. PRESERVE ALL INDEXES: The [index] number is critical. Your output must contain every single [index] from the input, each on a new line.
4. OUTPUT FORMAT: Only output the [index] <translation> lines. Do not include group markers ([GROUP START], [GROUP END]) or any other explanatory text in your response.
5. QUALITY: {quality_instruction}

Now, process the following batch of groups, ensuring each group is translated independently:
{subtitle_batch}
";

/// Instructions for splitting long entries into timed parts
const SPLIT_PROMPT_TEMPLATE: &str = "\
You are an expert subtitle editor. For each numbered task below you are given a subtitle sentence in the source language (ORIGINAL) and its {target_language} translation (TRANSLATED), plus a target part count N.

CRITICAL INSTRUCTIONS - FOLLOW WITH 100% PRECISION:
1. Split the ORIGINAL text into exactly N parts at natural pause points (clause boundaries, breathing points).
2. Split the TRANSLATED text into exactly N corresponding parts, so that part k of the translation is the translation of part k of the original.
3. Every part must be non-empty.
4. OUTPUT FORMAT: one line per part, nothing else:
[SPLIT-<task>-ORIGINAL-<part>] <original part text>
[SPLIT-<task>-TRANSLATED-<part>] <translated part text>
Part numbers start at 1.

Tasks:
{split_tasks}
";

/// Quality clause injected into the batch prompt
fn quality_instruction(quality: QualityMode) -> &'static str {
    match quality {
        QualityMode::Fast => {
            "Favor speed. Concise, direct translations are acceptable as long as the meaning is preserved."
        }
        QualityMode::Standard => {
            "Balance fluency and fidelity. The translation should read naturally while staying close to the original."
        }
        QualityMode::High => {
            "Take maximum care with nuance, idiom, tone and register. Prefer the most natural native phrasing even if it departs from the literal wording."
        }
    }
}

/// Build the batch translation prompt
pub fn batch_prompt(batch_text: &str, target_language: &str, quality: QualityMode) -> String {
    BATCH_PROMPT_TEMPLATE
        .replace("{target_language}", target_language)
        .replace("{quality_instruction}", quality_instruction(quality))
        .replace("{subtitle_batch}", batch_text)
}

/// Build the long-entry split prompt
pub fn split_prompt(tasks_text: &str, target_language: &str) -> String {
    SPLIT_PROMPT_TEMPLATE
        .replace("{target_language}", target_language)
        .replace("{split_tasks}", tasks_text)
}
