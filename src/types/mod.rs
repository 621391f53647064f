pub mod company;
pub mod competitor;
pub mod customer;
pub mod research;

pub use company::{CompanyInfo, NewsItem, SnsInfo, TimelineEvent, Tone};
pub use competitor::{Competitor, CompetitorInfo, DEFAULT_COORDINATE, Position};
pub use customer::{CustomerInfo, SimilarCase};
pub use research::{
    PerspectiveAnalysis, PerspectiveView, QuestionsAnalysis, ResearchResult, SourceInfo,
    dedup_sources,
};
