pub mod completion;
pub mod insights_api;

use anyhow::Result;
use async_trait::async_trait;

use crate::insights::InsightRecord;

pub use completion::CompletionClient;
pub use insights_api::InsightsApiClient;

/// Source of the pre-computed insight list. Implementations are opaque
/// remote calls; any error routes the panel to its fallback card.
#[async_trait]
pub trait InsightSource: Send + Sync {
    async fn fetch_insights(&self) -> Result<Vec<InsightRecord>>;
}

/// On-demand natural-language answer generation: question in, answer out.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, question: &str) -> Result<String>;
}
