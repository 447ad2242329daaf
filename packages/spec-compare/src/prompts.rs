//! LLM prompts for spec extraction and product comparison.

/// Prompt sent with each uploaded spec sheet.
pub const EXTRACT_SPEC_PROMPT: &str = r#"Extract these fields from the PDF and return ONLY valid JSON:
{
    "product_name": "...",
    "processor": "...",
    "ram": "...",
    "storage": "...",
    "price": (number only),
    "battery": "...",
    "weight": "..."
}

Rules:
- "price" must be a bare JSON number (no currency symbol, no quotes, no thousands separators)
- Use null for any field the document does not state
- Do not add commentary before or after the JSON"#;

/// Prompt for the cross-product comparison.
pub const COMPARE_PRODUCTS_PROMPT: &str = r#"You are a retail product analyst.

Compare the following products and return ONLY valid JSON in this format:

{
    "best_value_product": "...",
    "reason": "...",
    "comparison_summary": [
        {
            "product_name": "...",
            "strengths": ["..."],
            "weaknesses": ["..."]
        }
    ]
}

Products data:
{products}"#;

/// Format the comparison prompt with the products serialized as JSON.
pub fn format_compare_prompt(products_json: &str) -> String {
    COMPARE_PRODUCTS_PROMPT.replace("{products}", products_json)
}
