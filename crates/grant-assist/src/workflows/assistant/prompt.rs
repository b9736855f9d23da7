use std::collections::BTreeSet;

use crate::workflows::content::SearchHit;

pub const SYSTEM_PROMPT: &str = "You are an expert grant advisor for Pennsylvania DCNR Community Conservation Partnership Program grants.
Help users understand grant opportunities, eligibility requirements, application processes, and deadlines.
Be specific and helpful, citing sources when possible. Use emojis occasionally to make responses friendlier.

You can also evaluate grant applications based on these scoring criteria:
- Entity Type (20 points): Municipalities/counties score highest, nonprofits limited
- Community Impact (20 points): Based on population served or facility usage
- Matching Funds (20 points): Dollar-for-dollar match required
- Project Readiness (20 points): Scope, quotes, site control
- Public Support (10 points): Demonstrated support and partnerships
- Planning Priorities (10 points): Equity and rehabilitation projects score higher

If asked about approval chances, explain that applications scoring:
- 80+ points: Excellent chances (80-95%)
- 65-79 points: Good chances (60-80%)
- 50-64 points: Moderate chances (40-60%)
- Below 50: Need significant improvements";

pub const NO_MATCH_REPLY: &str = "I couldn't find specific information about that in the uploaded documents or grant data. Try asking about grant types, eligibility requirements, or application deadlines.";

pub const GENERAL_INFO_REPLY: &str = "I found no specific matches in the available documents.

Some general information about PA DCNR grants:
• Recreation and Conservation grants for municipalities and counties
• Partnership grants for nonprofits and educational institutions
• Land Trust grants for conservation organizations
• Most grants require matching funds

💡 *Set OPENAI_API_KEY for detailed AI-powered answers!*";

pub const SAMPLE_QUESTIONS: [&str; 12] = [
    "What types of DCNR grants are available?",
    "What are the eligibility requirements for Recreation and Conservation grants?",
    "When is the 2025 grant application deadline?",
    "How much matching funding is required?",
    "Can nonprofits apply for DCNR grants?",
    "What documents do I need for the application?",
    "What is a master site development plan?",
    "What are the ready-to-go requirements for planning applications?",
    "What types of planning projects does DCNR fund?",
    "How do I develop a scope of work for my grant?",
    "What is the typical grant award range for planning projects?",
    "Who should I contact for help with my application?",
];

const DIGEST_HITS: usize = 3;
const DIGEST_SNIPPET_CHARS: usize = 200;

pub fn build_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| format!("[From {}]\n{}...", hit.source_name, hit.snippet))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn user_prompt(context: &str, question: &str) -> String {
    format!(
        "Context from documents and website:\n{context}\n\nQuestion: {question}\n\nPlease provide a helpful answer based on the context. If discussing eligibility, be specific about requirements."
    )
}

/// Distinct source names, alphabetically.
pub fn unique_sources(hits: &[SearchHit]) -> Vec<String> {
    hits.iter()
        .map(|hit| hit.source_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn with_sources(answer: &str, sources: &[String]) -> String {
    format!("{answer}\n\n📚 **Sources:** {}", sources.join(", "))
}

/// Plain listing of the best hits, used when no model is configured.
pub fn search_digest(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return GENERAL_INFO_REPLY.to_string();
    }

    let mut digest = String::from("🔍 **Search Results:**\n\n");
    for hit in hits.iter().take(DIGEST_HITS) {
        let snippet: String = hit.snippet.chars().take(DIGEST_SNIPPET_CHARS).collect();
        digest.push_str(&format!("**From {}:**\n{snippet}...\n\n", hit.source_name));
    }
    digest.push_str("\n💡 *Set OPENAI_API_KEY for AI-powered answers!*");
    digest
}
