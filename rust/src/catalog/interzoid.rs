use super::{same, ToolDescriptor};

const ALGORITHM: &str = "Algorithm variant (optional)";

/// Every Interzoid API exposed as a tool, in publication order.
///
/// Standard APIs cost $0.0125 per call and premium APIs $0.3125 per call
/// (USDC on Base) when no API key is supplied and the x402 flow applies.
pub fn interzoid_tools() -> Vec<ToolDescriptor> {
    let mut tools = Vec::with_capacity(31);
    tools.extend(matching_tools());
    tools.extend(enrichment_tools());
    tools.extend(standardization_tools());
    tools.extend(enhancement_tools());
    tools.extend(utility_tools());
    tools
}

fn matching_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "interzoid_company_match_advanced",
            "Generate an advanced AI-powered similarity key for company/organization name matching. Names like 'IBM', 'International Business Machines', 'IBM Corp' produce the same key for deduplication and record linkage. Cost: $0.0125 USDC via x402.",
            "/getcompanymatchadvanced",
        )
        .required(same("company", "Company or organization name"))
        .optional(same("algorithm", "Algorithm variant (optional, e.g. 'ai-deep')")),
        ToolDescriptor::new(
            "interzoid_fullname_match",
            "Generate an AI-powered similarity key for individual/person name matching. Handles variations like 'Bob Smith', 'Robert Smith', 'Smith, Robert J.' producing the same key. Cost: $0.0125 USDC via x402.",
            "/getfullnamematch",
        )
        .required(same("fullname", "Full individual name")),
        ToolDescriptor::new(
            "interzoid_address_match_advanced",
            "Generate an advanced AI-powered similarity key for US street address matching. Handles unit numbers, directionals, and abbreviations. Cost: $0.0125 USDC via x402.",
            "/getaddressmatchadvanced",
        )
        .required(same("address", "Street address"))
        .optional(same("algorithm", ALGORITHM)),
        ToolDescriptor::new(
            "interzoid_global_address_match",
            "Generate an AI-powered similarity key for global/international address matching. Handles international address formats and variations across countries. Cost: $0.0125 USDC via x402.",
            "/getglobaladdressmatch",
        )
        .required(same("address", "Full international address string")),
        ToolDescriptor::new(
            "interzoid_product_match",
            "Generate an AI-powered similarity key for product name matching. Handles variations in product names, model numbers, and descriptions. Cost: $0.0125 USDC via x402.",
            "/getproductmatch",
        )
        .required(same("product", "Product name, description, or model"))
        .optional(same("algorithm", ALGORITHM)),
        ToolDescriptor::new(
            "interzoid_org_match_score",
            "Compare two organization/company names and receive a match score from 0-100 indicating similarity. Useful for determining if two company names refer to the same entity. Cost: $0.0125 USDC via x402.",
            "/getorgmatchscore",
        )
        .required(same("org1", "First organization name"))
        .required(same("org2", "Second organization name to compare")),
        ToolDescriptor::new(
            "interzoid_fullname_match_score",
            "Compare two individual/person names and receive a match score from 0-100 indicating similarity. Handles name order, nicknames, and abbreviations. Cost: $0.0125 USDC via x402.",
            "/getfullnamematchscore",
        )
        .required(same("fullname1", "First full name"))
        .required(same("fullname2", "Second full name to compare")),
    ]
}

fn enrichment_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "interzoid_business_info",
            "Retrieve comprehensive AI-powered business intelligence for a company including industry, revenue, employee counts, and executive info. Premium API. Cost: $0.3125 USDC via x402.",
            "/getbusinessinfo",
        )
        .required(same("lookup", "Company name, website, or email")),
        ToolDescriptor::new(
            "interzoid_parent_company_info",
            "Retrieve parent company information for a given company or subsidiary. Identifies corporate ownership hierarchies and holding company relationships. Premium API. Cost: $0.3125 USDC via x402.",
            "/getparentcompanyinfo",
        )
        .required(same("lookup", "Company name or domain to find parent company for")),
        ToolDescriptor::new(
            "interzoid_executive_profile",
            "Retrieve executive profile information for a company including leadership details, roles, and professional background. Premium API. Cost: $0.3125 USDC via x402.",
            "/getexecutiveprofile",
        )
        .required(same("lookup", "Company name and job title (e.g. 'Coinbase CEO')")),
        ToolDescriptor::new(
            "interzoid_recent_news",
            "Retrieve recent news and developments for a company or topic. AI-powered aggregation from multiple real-time sources. Premium API. Cost: $0.3125 USDC via x402.",
            "/getrecentnews",
        )
        .required(same("topic", "Company name or topic to get news for")),
        ToolDescriptor::new(
            "interzoid_email_trust_score",
            "Get an email trust score (0-99) and AI-generated risk analysis. Validates deliverability, identifies disposable addresses, and assesses legitimacy. Premium API. Cost: $0.3125 USDC via x402.",
            "/emailtrustscore",
        )
        .required(same("lookup", "Email address to score and validate")),
        ToolDescriptor::new(
            "interzoid_ip_profile",
            "Get comprehensive profile for an IP address including geolocation, ISP, organization, CIDR block, and reputation assessment. Premium API. Cost: $0.3125 USDC via x402.",
            "/getipprofile",
        )
        .required(same("lookup", "IPv4 or IPv6 address to profile")),
        ToolDescriptor::new(
            "interzoid_phone_profile",
            "Get profile for a phone number including carrier, line type, geographic location, validation status, and risk assessment. Premium API. Cost: $0.3125 USDC via x402.",
            "/getphoneprofile",
        )
        .required(same("lookup", "Phone number to profile")),
        ToolDescriptor::new(
            "interzoid_company_verification",
            "Verify whether a company exists and get a verification score (0-99) with AI-generated reasoning about legitimacy and credibility. Premium API. Cost: $0.3125 USDC via x402.",
            "/getcompanyverification",
        )
        .required(same("lookup", "Company or organization name to verify")),
        ToolDescriptor::new(
            "interzoid_stock_info",
            "Get AI-powered stock analysis for a ticker symbol including price, market cap, P/E ratio, EPS, and analyst assessment. Premium API. Cost: $0.3125 USDC via x402.",
            "/getstockinfo",
        )
        .required(same("lookup", "Stock ticker symbol or company name (e.g. 'AAPL', 'COIN')")),
    ]
}

fn standardization_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "interzoid_org_standard",
            "Standardize an organization name to its canonical form. Normalizes abbreviations, suffixes, and formatting (e.g. 'b.o.a.' -> 'Bank of America'). Cost: $0.0125 USDC via x402.",
            "/getorgstandard",
        )
        .required(same("org", "Organization name to standardize")),
        ToolDescriptor::new(
            "interzoid_country_standard",
            "Standardize a country name to a consistent canonical form. Handles variations like 'Great Britain', 'UK', 'United Kingdom'. Cost: $0.0125 USDC via x402.",
            "/getcountrystandard",
        )
        .required(same("country", "Country name to standardize"))
        .optional(same("algorithm", ALGORITHM)),
        ToolDescriptor::new(
            "interzoid_country_info",
            "Standardize a country name and return comprehensive info: ISO codes (2/3-letter, 3-digit), currency details, internet code, and calling code. Cost: $0.0125 USDC via x402.",
            "/getcountryinfo",
        )
        .required(same("country", "Country name in any language or format"))
        .optional(same(
            "algorithm",
            "Algorithm variant (optional, defaults to 'ai-medium')",
        )),
        ToolDescriptor::new(
            "interzoid_state_abbreviation",
            "Standardize US state/province names to full name plus abbreviation. Handles 'Calif', 'CA', 'Cal' -> 'California' / 'CA'. Cost: $0.0125 USDC via x402.",
            "/getstateabbreviation",
        )
        .required(same("state", "State or province name/abbreviation"))
        .optional(same("algorithm", ALGORITHM)),
        ToolDescriptor::new(
            "interzoid_city_standard",
            "Standardize city name data to a consistent canonical form. Handles abbreviations, alternate spellings, and local variations. Cost: $0.0125 USDC via x402.",
            "/getcitystandard",
        )
        .required(same("city", "City name to standardize"))
        .optional(same("algorithm", ALGORITHM)),
    ]
}

fn enhancement_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "interzoid_entity_type",
            "Determine the entity type of a data value - whether it represents a person, company/organization, location, or other entity type. Cost: $0.0125 USDC via x402.",
            "/getentitytype",
        )
        .required(same("data", "Text data value to classify")),
        ToolDescriptor::new(
            "interzoid_gender",
            "Determine the likely gender associated with an individual name. Supports international names. Cost: $0.0125 USDC via x402.",
            "/getgender",
        )
        .required(same("name", "First name to determine gender for")),
        ToolDescriptor::new(
            "interzoid_name_origin",
            "Determine the likely cultural or geographic origin of an individual name. Useful for demographic analysis and internationalization. Cost: $0.0125 USDC via x402.",
            "/getnameorigin",
        )
        .required(same("name", "Full name to determine origin for")),
        ToolDescriptor::new(
            "interzoid_identify_language",
            "Identify the language of a given text string. Supports detection of numerous world languages. Cost: $0.0125 USDC via x402.",
            "/identifylanguage",
        )
        .required(same("text", "Text snippet to identify the language of")),
        ToolDescriptor::new(
            "interzoid_translate_to_english",
            "Detect the language of input text and translate it to English. AI-powered translation supporting numerous world languages. Cost: $0.0125 USDC via x402.",
            "/translatetoenglish",
        )
        .required(same("text", "Text in any language to translate to English")),
        ToolDescriptor::new(
            "interzoid_translate_to_any",
            "Detect the language of input text and translate it to any specified target language. Cost: $0.0125 USDC via x402.",
            "/translatetoany",
        )
        .required(same("text", "Text to translate"))
        .required(same(
            "to",
            "Target language name (e.g. 'Japanese', 'French', 'Spanish')",
        )),
        ToolDescriptor::new(
            "interzoid_address_parse",
            "Parse a full address string into component parts: street number, street name, unit, city, state, zip code. Cost: $0.0125 USDC via x402.",
            "/addressparse",
        )
        .required(same("address", "Full address string to parse")),
    ]
}

fn utility_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "interzoid_zipcode_info",
            "Get detailed info for a US ZIP code: city, state, county, timezone, area codes, latitude/longitude. Cost: $0.0125 USDC via x402.",
            "/getzipcodeinfo",
        )
        .required(same("zip", "US ZIP code (5-digit)")),
        ToolDescriptor::new(
            "interzoid_currency_rate",
            "Get live currency exchange rates between two currencies. Returns current mid-market rates. Cost: $0.0125 USDC via x402.",
            "/getrates",
        )
        .required(same("from", "Source currency code (e.g. USD, EUR, GBP)"))
        .required(same("to", "Target currency code (e.g. JPY, GBP, EUR)")),
        ToolDescriptor::new(
            "interzoid_global_weather",
            "Get current weather for any city worldwide including temperature (F/C), conditions, and wind speed. Cost: $0.0125 USDC via x402.",
            "/getglobalweather",
        )
        .required(same("location", "City name (e.g. 'London', 'Tokyo', 'San Francisco')")),
    ]
}
