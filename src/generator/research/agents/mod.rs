pub mod company_researcher;
pub mod competitor_researcher;
pub mod customer_researcher;
pub mod key_findings_synthesizer;
