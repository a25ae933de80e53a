use serde::{ Serialize, Deserialize, Deserializer };

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Reply language requested by the client. Unknown values fall back to
/// taglish rather than failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Tagalog,
    Taglish,
}

impl Default for Language {
    fn default() -> Self {
        Language::Taglish
    }
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "english" => Language::English,
            "tagalog" => Language::Tagalog,
            _ => Language::Taglish,
        }
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let tag = String::deserialize(deserializer)?;
        Ok(Language::from_tag(&tag))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub language: Language,
    #[serde(rename = "conversationId", default)]
    pub conversation_id: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
}
