use regex::Regex;
use std::sync::LazyLock;

/// Tool invocations the model sometimes echoes into its answer.
static TOOL_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)google_?[mM]aps\(.*?\)").expect("valid regex"));

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));

/// Strip tool-call fragments and fenced code blocks from model output.
///
/// Must run before any day or place splitting: both patterns may span lines
/// and swallow `[DAY n]` / `[PLACE]` markers that belong to the artifact.
pub fn sanitize(text: &str) -> String {
    let without_calls = TOOL_CALL.replace_all(text, "");
    CODE_FENCE.replace_all(&without_calls, "").into_owned()
}
