use crate::domain::AccessibilityRecord;

const UNKNOWN_LOCATION: &str = "Tespit Edilemedi";

const SYSTEM_TURN: &str = r#"<|im_start|>system
Sen SafePath adlı, engelli bireylere şehirde yardımcı olan bir yapay zeka asistanısın. Görevin, sana verilen BİLGİ KARTI'nı ve kullanıcının sorusunu analiz ederek, net, yardımcı ve empatik bir yanıt vermektir.

CEVAP FORMATI:
Yanıtını MUTLAKA aşağıdaki JSON formatında ver. Başka hiçbir metin ekleme.
{
  "thought": "Kullanıcının ana ihtiyacını ve hangi bilgileri kullanacağını özetleyen kısa bir düşünce süreci.",
  "responseText": "Kullanıcıya gösterilecek, akıcı ve doğal dildeki metin.",
  "suggestedActions": ["Sonraki adım için öneri 1", "Sonraki adım için öneri 2"]
}
<|im_end|>"#;

/// Renders the ChatML prompt for the assistant.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(
        &self,
        utterance: &str,
        location: Option<&str>,
        record: &AccessibilityRecord,
    ) -> String {
        let card = data_card(location, record);

        format!(
            "{SYSTEM_TURN}\n<|im_start|>user\n{card}\n\nKullanıcı Sorusu: \"{utterance}\"\n\n\
             Yukarıdaki bilgi kartını ve kullanıcının sorusunu kullanarak istenen JSON formatında bir yanıt oluştur.\n\
             <|im_end|>\n<|im_start|>assistant\n"
        )
    }
}

fn data_card(location: Option<&str>, record: &AccessibilityRecord) -> String {
    format!(
        "\n### BÖLGE BİLGİ KARTI: {} ###\n\
         - Güvenlik Skoru: {}/10\n\
         - Tespit Edilen Erişilebilir Tuvaletler: {}\n\
         - Tespit Edilen Erişilebilir Kafe/Restoranlar: {}\n\
         - Tespit Edilen Erişilebilir Ulaşım Seçenekleri: {}\n",
        location.unwrap_or(UNKNOWN_LOCATION),
        record.safety_score,
        to_json(&record.accessible_toilets),
        to_json(&record.accessible_food),
        to_json(&record.transport),
    )
}

fn to_json<T: serde::Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
