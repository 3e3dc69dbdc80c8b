//! Message text formatting
//!
//! Chat text uses a tiny Markdown subset. [`format_message`] rewrites it into
//! display markup with three rules applied in a fixed order:
//!
//! 1. `**bold**` becomes `<strong>bold</strong>` (shortest span, never across a line
//!    terminator)
//! 2. each newline becomes `<br>`
//! 3. a triple-backtick fence becomes `<pre><code>...</code></pre>`
//!
//! The order is observable: bold markers inside a fence are still rewritten,
//! and newlines inside a fence show up as `<br>` in the code block.
//!
//! [`markup_to_terminal`] turns that markup into styled terminal text.

use colored::Colorize;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// A bold span stops at any line terminator: \n, \r, U+2028 or U+2029
static BOLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").expect("Invalid bold pattern")
});

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(.*?)```").expect("Invalid code fence pattern"));

static CODE_BLOCK_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").expect("Invalid code block pattern")
});

static STRONG_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<strong>(.*?)</strong>").expect("Invalid strong pattern"));

/// Convert raw message text into display markup
///
/// Unmatched `**` or triple backticks are left untouched. The function is
/// pure; it performs no escaping of the input.
///
/// # Examples
///
/// ```
/// use chatwidget::formatter::format_message;
///
/// assert_eq!(format_message("**hi**"), "<strong>hi</strong>");
/// assert_eq!(format_message("a\nb"), "a<br>b");
/// assert_eq!(format_message("```code```"), "<pre><code>code</code></pre>");
/// ```
pub fn format_message(text: &str) -> String {
    let bolded = BOLD.replace_all(text, "<strong>${1}</strong>");
    let broken = bolded.replace('\n', "<br>");
    CODE_FENCE
        .replace_all(&broken, "<pre><code>${1}</code></pre>")
        .into_owned()
}

/// Render display markup for a terminal
///
/// `<strong>` spans become bold, `<br>` becomes a newline and code blocks
/// are printed on their own lines, indented and dimmed. Whether ANSI codes
/// are emitted follows the global `colored` override.
pub fn markup_to_terminal(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut last = 0;

    for caps in CODE_BLOCK_MARKUP.captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&render_inline(&markup[last..whole.start()]));
        out.push_str(&render_code_block(&caps[1]));
        last = whole.end();
    }
    out.push_str(&render_inline(&markup[last..]));
    out
}

fn render_inline(markup: &str) -> String {
    STRONG_MARKUP
        .replace_all(markup, |caps: &Captures| caps[1].bold().to_string())
        .replace("<br>", "\n")
}

fn render_code_block(body: &str) -> String {
    let body = render_inline(body);
    let mut block = String::from("\n");
    for line in body.trim_matches('\n').lines() {
        block.push_str("    ");
        block.push_str(&line.dimmed().to_string());
        block.push('\n');
    }
    block
}
