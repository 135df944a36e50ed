use serde_json::{json, Value};

/// Fields every slide object must carry.
pub const REQUIRED_SLIDE_FIELDS: [&str; 4] = ["id", "title", "bulletPoints", "chartType"];

/// Response schema in the OpenAPI subset accepted by `generationConfig.responseSchema`.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "slides": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "subtitle": { "type": "STRING" },
                        "bulletPoints": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        },
                        "imagePrompt": { "type": "STRING" },
                        "chartType": {
                            "type": "STRING",
                            "description": "One of: 'bar', 'pie', 'line', 'none'"
                        },
                        "chartData": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "value": { "type": "NUMBER" },
                                    "secondary": {
                                        "type": "NUMBER",
                                        "description": "Optional secondary value"
                                    }
                                }
                            }
                        },
                        "footer": { "type": "STRING" }
                    },
                    "required": REQUIRED_SLIDE_FIELDS
                }
            }
        },
        "required": ["slides"]
    })
}
