//! Server-side HTML for the single practice page.

use std::collections::{HashMap, HashSet};

use crate::models::Question;

/// Message block shown under the answer form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Collaborator markdown, rendered and sanitized.
    Feedback(String),
    Warning(String),
    Error(String),
    Info(String),
}

pub struct PageView<'a> {
    pub question: &'a Question,
    pub answer: &'a str,
    pub notice: Option<Notice>,
}

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "br", "hr", "em", "strong", "b", "i", "del", "code", "pre", "blockquote", "ul", "ol",
        "li", "a", "h1", "h2", "h3", "h4", "h5", "h6", "table", "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Feedback(markdown) => format!(
            r#"<div class="notice success">✅ Feedback &amp; Coaching Ready!</div>
<article class="feedback">{}</article>"#,
            markdown_to_html(markdown)
        ),
        Notice::Warning(message) => {
            format!(r#"<div class="notice warning">{}</div>"#, escape(message))
        }
        Notice::Error(message) => format!(r#"<div class="notice error">{}</div>"#, escape(message)),
        Notice::Info(message) => format!(r#"<div class="notice info">{}</div>"#, escape(message)),
    }
}

#[must_use]
pub fn render_page(view: &PageView<'_>) -> String {
    let notice = view.notice.as_ref().map(render_notice).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Mock Interviewer</title>
<style>{STYLE}</style>
</head>
<body>
<main>
<h3 class="title">🎓 AI Admissions Coach</h3>
<p class="subtitle">Practice your boarding school interview. Get instant feedback and brainstorming guidance.</p>
<h5>🗣️ Interview Question:</h5>
<div class="question"><strong>{question}</strong></div>
<details>
<summary>Need a hint? What is the interviewer actually asking?</summary>
<div class="hint">{hint}</div>
</details>
<form method="post" action="/shuffle">
<button type="submit">🔄 Shuffle Question</button>
</form>
<form method="post" action="/feedback" id="answer-form">
<label for="answer">Your Answer (Try your best, it doesn't have to be perfect):</label>
<textarea id="answer" name="answer" rows="7" placeholder="Well, I think...">{answer}</textarea>
<button type="submit" class="primary" id="submit-answer">Submit for AI Feedback</button>
</form>
{notice}
</main>
<script>
document.getElementById("answer-form").addEventListener("submit", function () {{
  var button = document.getElementById("submit-answer");
  button.disabled = true;
  button.textContent = "Analyzing and preparing brainstorming tips...";
}});
</script>
</body>
</html>
"#,
        STYLE = STYLE,
        question = escape(&view.question.text),
        hint = markdown_to_html(&view.question.hint),
        answer = escape(view.answer),
        notice = notice,
    )
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;background:#f8fafc;color:#1e293b;margin:0}\
main{max-width:720px;margin:0 auto;padding:2rem 1rem}\
.title{text-align:center;color:#1e293b}\
.subtitle{text-align:center;color:#64748b}\
.question{background:#e0f2fe;border-radius:.5rem;padding:1rem;margin-bottom:1rem}\
details{margin-bottom:1rem}\
textarea{width:100%;box-sizing:border-box;margin:.5rem 0}\
button{padding:.5rem 1rem;border-radius:.5rem;border:1px solid #cbd5e1;background:#fff;cursor:pointer}\
button.primary{width:100%;background:#ef4444;color:#fff;border:none}\
button:disabled{opacity:.6;cursor:wait}\
.notice{padding:.75rem 1rem;border-radius:.5rem;margin:1rem 0}\
.success{background:#dcfce7}.warning{background:#fef9c3}.error{background:#fee2e2}.info{background:#e0f2fe}";
