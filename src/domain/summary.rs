#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: String,
    pub message_count: usize,
}
