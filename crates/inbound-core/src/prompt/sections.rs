//! Reusable blocks of the task instruction.

use crate::query::SearchPlatform;
use std::collections::BTreeSet;

pub const SEARCH_METHODS_HEADING: &str = "**Search Methods:**";

/// The descriptive clause added for one selected platform.
pub fn platform_clause(platform: SearchPlatform) -> &'static str {
    match platform {
        SearchPlatform::GeneralWeb => {
            "- In-depth Web Search: Look for news, press releases, or reports about international expansion, funding for emerging markets, or partnerships in the Asia-Pacific region."
        }
        SearchPlatform::LinkedIn => {
            "- LinkedIn: Scan for companies posting jobs in India or showing increased engagement from Indian professionals."
        }
        SearchPlatform::SocialMedia => {
            "- Social Media (Facebook, X, Instagram, Reddit, etc.): Analyze mentions, discussions, and official posts from Indian users or related to Indian market interest to gauge organic engagement and expansion signals."
        }
    }
}

/// "Search Methods" block with one clause per platform, in canonical order.
pub fn search_methods(platforms: &BTreeSet<SearchPlatform>) -> String {
    let mut block = String::from(SEARCH_METHODS_HEADING);
    for platform in platforms {
        block.push('\n');
        block.push_str(platform_clause(*platform));
    }
    block
}

/// Hard exclusion rule naming every entry verbatim; `None` when nothing is excluded.
pub fn exclusion_rule(exclusions: &[&str]) -> Option<String> {
    if exclusions.is_empty() {
        return None;
    }
    Some(format!(
        "**IMPORTANT EXCLUSION RULE:** You MUST NOT include any of the following companies in your results, even if they are a perfect match: {}.",
        exclusions.join(", ")
    ))
}

const COMPANY_FIELD_RULES: &str = r#"    - companyName: Official name.
    - companyLinkedIn: Full LinkedIn URL.
    - category: Company's industry.
    - email: Find a public contact email from the company's official site. Use "N/A" if none.
    - phone: Find a public phone number from the company's official site. Use "N/A" if none.
    - justification: A brief, detailed reason why this company is a strong lead for Indian market expansion, citing specific evidence.
    - leadScore: A numerical score from 1-100 indicating the strength of the lead, where 100 is the strongest. Base this on the recency and relevance of their expansion signals (e.g., recent funding, job postings, official announcements).
    - outreachSuggestion: A single, compelling sentence to use as a personalized icebreaker in an outreach email, directly referencing the 'justification'.
    - employeeCount: Estimated number of employees (e.g., "51-200").
    - latestFunding: Details of the most recent funding round (e.g., "$50M Series B - Oct 2023"). Use "N/A" if not found.
    - techStack: An array of key technologies the company uses (e.g., ["Salesforce", "AWS", "Shopify"]).
    - competitors: An array of 2-3 main competitors.
    - latestNews: An object containing the 'title' and 'url' of the most recent, relevant general news article about the company (e.g. funding, product launch). The URL must be a direct link. If none, return an object with "N/A" for both title and url.
    - latestIndiaNews: An object containing the 'title' and 'url' of the most recent news, press release, or significant public statement specifically mentioning the company's interest, plans, or activities related to the Indian market. The URL must be a direct link. If no such specific news is found, return an object with "N/A" for both title and url.
    - latestInstagramPosts: An array of up to 5 of the company's most recent Instagram posts. Each object in the array should contain 'caption' and 'url' (direct link to the post). If no Instagram profile is found or there are no posts, return an empty array []."#;

const COMPOSED_EMAIL_RULE: &str = r#"    - composedEmail: A full, personalized, and professional outreach email (3-4 paragraphs) ready to send. It should be friendly, concise, and professional. Start with the 'outreachSuggestion' as an opener, briefly expand on the 'justification' to show you've done your research, explain the value proposition for Indian expansion, and end with a clear, low-friction call-to-action (e.g., "Would you be open to a brief 15-minute call next week to explore this further?"). The email should be addressed to the primary contact you've identified."#;

const CONTACT_RULES: &str = r#"2.  **Contacts (Find up to 5 people in the specified department):**
    For each potential contact, you MUST perform this verification:
    1. Find their LinkedIn profile using a targeted search.
    2. **Verify (ALL MUST BE TRUE):**
        a. **Company:** Current company on LinkedIn EXACTLY matches the researched company.
        b. **Region:** LinkedIn location is CONSISTENT with the target region.
        c. **Role:** Job title matches the target department.
    3. **Result:**
        - **MANDATORY:** If a contact is VERIFIED, you MUST provide their full, valid LinkedIn profile URL for the 'contactLinkedIn' field. It cannot be empty.
        - If you cannot find or verify a contact's LinkedIn profile after a thorough search, use the exact string "Not found" for the 'contactLinkedIn' value. Do not invent a URL.
        - If a contact fails the verification check at any step, DISCARD them immediately and find a different person who meets all criteria."#;

/// Per-field collection rules and contact verification rules.
pub fn data_gathering_rules(compose_email: bool) -> String {
    let mut rules = String::from(
        "**Data Gathering Rules:**\n\n**For each identified company:**\n1.  **Company Info & Deep-Dive Analysis:**\n",
    );
    rules.push_str(COMPANY_FIELD_RULES);
    if compose_email {
        rules.push('\n');
        rules.push_str(COMPOSED_EMAIL_RULE);
    }
    rules.push_str("\n\n");
    rules.push_str(CONTACT_RULES);
    rules
}

pub const OUTPUT_FORMAT: &str = "**Output Format:**\nYour entire response MUST be a single, valid JSON array of lead objects. Do NOT include any text, explanations, or markdown before or after the array. The response must start with '[' and end with ']'. All strings must be properly JSON-escaped.";

const EXAMPLE_HEAD: &str = r#"{
  "companyName": "Example Corp",
  "category": "Technology",
  "companyLinkedIn": "https://www.linkedin.com/company/example-corp",
  "justification": "Recent press release mentioned plans for APAC expansion.",
  "email": "contact@example.com",
  "phone": "+1-555-123-4567",
  "leadScore": 85,
  "outreachSuggestion": "I saw your recent press release about expanding into the APAC region and was very impressed with your growth.",
  "employeeCount": "201-500",
  "latestFunding": "$25M Series C - Jan 2024",
  "techStack": ["React", "Node.js", "Google Cloud"],
  "competitors": ["Competitor Inc", "Another Corp"],
  "latestNews": { "title": "Example Corp Raises $25M for Global Expansion", "url": "https://www.example.com/news/series-c" },
  "latestIndiaNews": { "title": "Example Corp Partners with Indian Distributor", "url": "https://www.example.com/news/india-partnership" },
  "latestInstagramPosts": [{ "caption": "Our new product launch!", "url": "https://www.instagram.com/p/Cxyz..." }, { "caption": "Team photo from the annual offsite!", "url": "https://www.instagram.com/p/Cabc..." }],"#;

const EXAMPLE_EMAIL: &str = r#"  "composedEmail": "Subject: Exploring Example Corp's Expansion into India\n\nHi Jane Doe,\n\nI saw your recent press release about expanding into the APAC region and was very impressed with your growth. Given your focus on global markets, the Indian market seems like a significant opportunity for Example Corp.\n\nMy company specializes in helping Technology companies like yours successfully launch in India, navigating the unique market landscape to drive rapid growth.\n\nWould you be open to a brief 15-minute call next week to explore how we could support your potential expansion?\n\nBest regards,\n[Your Name]","#;

const EXAMPLE_TAIL: &str = r#"  "contacts": [
    { "contactName": "Jane Doe", "designation": "VP of Marketing", "contactLinkedIn": "https://www.linkedin.com/in/janedoe-example" },
    { "contactName": "John Smith", "designation": "Marketing Director", "contactLinkedIn": "Not found" }
  ]
}"#;

/// Example lead object shown to the model.
pub fn example_object(compose_email: bool) -> String {
    let mut example = String::from("**Example Object:**\n");
    example.push_str(EXAMPLE_HEAD);
    example.push('\n');
    if compose_email {
        example.push_str(EXAMPLE_EMAIL);
        example.push('\n');
    }
    example.push_str(EXAMPLE_TAIL);
    example
}
