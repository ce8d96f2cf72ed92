//! Context assembly and the generation prompt template.

use wiki_search::{Candidate, Language};

/// Caps applied while assembling the generation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextBudget {
    /// Total characters of passage text across the context.
    pub max_chars: usize,
    /// Optional cap on the number of passages.
    pub max_documents: Option<usize>,
}

impl ContextBudget {
    pub const DEFAULT_MAX_CHARS: usize = 6000;
}

impl Default for ContextBudget {
    fn default() -> Self {
        Self {
            max_chars: Self::DEFAULT_MAX_CHARS,
            max_documents: None,
        }
    }
}

/// One candidate as it appears in the context.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextPassage {
    /// Zero-based position in the ordered list the context was built from.
    pub position: usize,
    pub title: String,
    pub url: String,
    pub text: String,
    /// `true` when the text was cut to fit the budget.
    pub truncated: bool,
}

/// Ordered passages fed to the generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    pub passages: Vec<ContextPassage>,
}

impl Context {
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Characters of passage text, the quantity bounded by `max_chars`.
    pub fn char_count(&self) -> usize {
        self.passages.iter().map(|p| p.text.chars().count()).sum()
    }
}

/// Builds the context from `ordered` in rank order.
///
/// Whole passages are added while they fit in `max_chars`. The first passage
/// that does not fit is cut to the remaining characters and closes the
/// context. `max_documents` stops earlier when set.
pub fn build_context<'a, I>(ordered: I, budget: &ContextBudget) -> Context
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let cap = budget.max_documents.unwrap_or(usize::MAX);
    let mut remaining = budget.max_chars;
    let mut passages = Vec::new();

    for (position, c) in ordered.into_iter().enumerate() {
        if passages.len() >= cap || remaining == 0 {
            break;
        }
        let text = c.text.trim();
        let len = text.chars().count();

        if len <= remaining {
            remaining -= len;
            passages.push(ContextPassage {
                position,
                title: c.title.clone(),
                url: c.url.clone(),
                text: text.to_string(),
                truncated: false,
            });
        } else {
            passages.push(ContextPassage {
                position,
                title: c.title.clone(),
                url: c.url.clone(),
                text: text.chars().take(remaining).collect(),
                truncated: true,
            });
            break;
        }
    }

    Context { passages }
}

/// Instruction used when the context does not hold the answer.
pub const FALLBACK_INSTRUCTION: &str = "Answer the question using only the context above. \
If the answer truly is not in the context, respond that the answer is not in the context.";

/// Renders the generation prompt.
///
/// Slots, in order: language hint, context block, question block, fallback
/// instruction. Output depends only on the arguments.
pub fn build_prompt(context: &Context, question: &str, language: Language) -> String {
    let mut out = String::new();

    out.push_str("You answer questions using excerpts from Wikipedia articles.\n");
    out.push_str(&format!("Respond in {}.\n\n", language.display_name()));

    out.push_str("Context:\n");
    if context.is_empty() {
        out.push_str("(no documents)\n");
    }
    for (i, p) in context.passages.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", i + 1, p.title.trim()));
        out.push_str(&p.text);
        out.push_str("\n\n");
    }

    out.push_str("Question: ");
    out.push_str(question);
    out.push_str("\n\n");

    out.push_str(FALLBACK_INSTRUCTION);
    out.push_str("\nAnswer:");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(title: &str, text: &str) -> Candidate {
        Candidate {
            title: title.into(),
            text: text.into(),
            url: format!("https://en.wikipedia.org/wiki/{title}"),
            language: Language::En,
            views: None,
            score: None,
            distance: None,
        }
    }

    #[test]
    fn whole_passages_until_budget_then_cut() {
        let docs = [cand("A", "aaaa"), cand("B", "bbbbbb"), cand("C", "cc")];
        let ctx = build_context(&docs, &ContextBudget { max_chars: 7, max_documents: None });

        assert_eq!(ctx.passages.len(), 2);
        assert_eq!(ctx.passages[0].text, "aaaa");
        assert!(!ctx.passages[0].truncated);
        assert_eq!(ctx.passages[1].text, "bbb");
        assert!(ctx.passages[1].truncated);
        assert_eq!(ctx.char_count(), 7);
    }

    #[test]
    fn document_cap_applies_before_char_budget() {
        let docs = [cand("A", "a"), cand("B", "b"), cand("C", "c")];
        let ctx = build_context(&docs, &ContextBudget { max_chars: 100, max_documents: Some(2) });
        assert_eq!(
            ctx.passages.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            ["A", "B"]
        );
    }

    #[test]
    fn zero_budget_gives_empty_context() {
        let docs = [cand("A", "a")];
        assert!(build_context(&docs, &ContextBudget { max_chars: 0, max_documents: None }).is_empty());
        assert!(build_context(&docs, &ContextBudget { max_chars: 10, max_documents: Some(0) }).is_empty());
    }

    #[test]
    fn budget_counts_characters_not_bytes() {
        let docs = [cand("東京", "東京は日本の首都です")];
        let ctx = build_context(&docs, &ContextBudget { max_chars: 4, max_documents: None });
        assert_eq!(ctx.passages[0].text, "東京は日");
    }

    #[test]
    fn prompt_has_all_slots_in_order() {
        let docs = [cand("Paris", "Paris is the capital of France.")];
        let ctx = build_context(&docs, &ContextBudget::default());
        let prompt = build_prompt(&ctx, "capital of France", Language::Fr);

        let hint = prompt.find("Respond in French.").unwrap();
        let context = prompt.find("[1] Paris\nParis is the capital of France.").unwrap();
        let question = prompt.find("Question: capital of France\n").unwrap();
        let fallback = prompt.find("respond that the answer is not in the context").unwrap();
        assert!(hint < context && context < question && question < fallback);
    }

    #[test]
    fn prompt_is_deterministic() {
        let docs = [cand("A", "alpha"), cand("B", "beta")];
        let ctx = build_context(&docs, &ContextBudget::default());
        assert_eq!(
            build_prompt(&ctx, "q", Language::En),
            build_prompt(&ctx.clone(), "q", Language::En)
        );
    }
}
