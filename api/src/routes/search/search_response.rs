use pipeline::{AnswerOutcome, PipelineResponse, RankingOutcome};
use serde::Serialize;
use wiki_search::{Language, SearchStrategy};

/// Characters of article text shown per item.
pub const PREVIEW_MAX_CHARS: usize = 1000;

/// Response payload for `POST /search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub language: Language,
    pub strategy: SearchStrategy,
    pub presearch: Vec<PresearchItem>,
    pub ranking: RankingView,
    pub answer: AnswerView,
    pub references: Vec<ReferenceItem>,
}

#[derive(Debug, Serialize)]
pub struct PresearchItem {
    /// 1-based position in the pre-search list.
    pub index: usize,
    pub title: String,
    pub url: String,
    pub text: String,
    pub views: Option<u64>,
    pub score: Option<f32>,
    pub distance: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct RankingView {
    /// `reranked` | `skipped` | `no_candidates` | `unavailable`
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub items: Vec<RankedItem>,
}

#[derive(Debug, Serialize)]
pub struct RankedItem {
    /// 1-based rank.
    pub rank: usize,
    /// 1-based position in the pre-search list.
    pub document_index: usize,
    pub relevance_score: Option<f32>,
    pub title: String,
    pub url: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerView {
    /// `generated` | `skipped` | `no_candidates` | `unavailable`
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReferenceItem {
    pub title: String,
    pub url: String,
    pub relevance_score: Option<f32>,
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_MAX_CHARS).collect()
}

impl From<PipelineResponse> for SearchResponse {
    fn from(r: PipelineResponse) -> Self {
        let presearch = r
            .presearch
            .iter()
            .enumerate()
            .map(|(i, c)| PresearchItem {
                index: i + 1,
                title: c.title.clone(),
                url: c.url.clone(),
                text: preview(&c.text),
                views: c.views,
                score: c.score,
                distance: c.distance,
            })
            .collect();

        let items = r
            .ranked
            .iter()
            .enumerate()
            .map(|(i, rc)| RankedItem {
                rank: i + 1,
                document_index: rc.original_index + 1,
                relevance_score: rc.relevance_score,
                title: rc.candidate.title.clone(),
                url: rc.candidate.url.clone(),
                text: preview(&rc.candidate.text),
            })
            .collect();

        let ranking = match r.ranking {
            RankingOutcome::Reranked => RankingView { status: "reranked", reason: None, items },
            RankingOutcome::Skipped => RankingView { status: "skipped", reason: None, items },
            RankingOutcome::NoCandidates => RankingView {
                status: "no_candidates",
                reason: None,
                items,
            },
            RankingOutcome::Unavailable { reason } => RankingView {
                status: "unavailable",
                reason: Some(reason),
                items,
            },
        };

        let answer = match r.answer {
            AnswerOutcome::Generated { answer } => AnswerView {
                status: "generated",
                text: Some(answer.text),
                reason: None,
            },
            AnswerOutcome::Skipped => AnswerView { status: "skipped", text: None, reason: None },
            AnswerOutcome::NoCandidates => AnswerView {
                status: "no_candidates",
                text: None,
                reason: None,
            },
            AnswerOutcome::Unavailable { reason } => AnswerView {
                status: "unavailable",
                text: None,
                reason: Some(reason),
            },
        };

        let references = r
            .references
            .into_iter()
            .map(|rf| ReferenceItem {
                title: rf.title,
                url: rf.url,
                relevance_score: rf.relevance_score,
            })
            .collect();

        Self {
            query: r.query.text,
            language: r.query.language,
            strategy: r.query.strategy,
            presearch,
            ranking,
            answer,
            references,
        }
    }
}
