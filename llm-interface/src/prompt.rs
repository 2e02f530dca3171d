use snooscope_core::{CoreError, UserActivity};

/// Fixed instruction text sent ahead of the serialized activity. The
/// extractor depends on the model honoring the single-JSON-object
/// instruction, so the phrasing here is load-bearing.
const INSTRUCTION: &str = r#"Analyze the following Reddit user's activity and provide insights into their interests, topics they engage with, and overall posting/commenting behavior return a string of a JSON with corresponding keys and values for example like this {  "age": "50+",
    "sex": "M",
    "hobby": "3D Printing, Gaming, Firearms",
    "location": "X",
    "occupation": "X",
    "relationship": "X",
    "income_level": "X",
    "interests": [
        "Cars", "Destiny", "Fixing Things"
    ],
    "brand_mentions": [
        "Porsche", "Ender", "Xbox"
    ],
    "life_stage": "X",
    "personality": "Positive"} do not add explainations in brackets , just the words return a single json like "{
    "key1": "value1", "key2": "value2"}" so that i can just parse what you give and i get a json object i can send in a response:"#;

/// Composes the insight prompt: the fixed instruction followed by the
/// JSON-serialized activity, verbatim and untruncated. For very active
/// accounts the prompt grows unboundedly; bounding it is a known
/// limitation left to the caller.
pub fn build_prompt(activity: &UserActivity) -> Result<String, CoreError> {
    let serialized = serde_json::to_string(activity)?;
    Ok(format!("{INSTRUCTION}\n{serialized}"))
}
