// Shared prompt fragments.
// Each caller that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to every structured-extraction prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY the JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps list items short so the completion is less likely to be cut off mid-array.
pub const BREVITY_INSTRUCTION: &str = "Keep every list item short and plain: \
    no markdown, no bullet characters, no numbering.";
